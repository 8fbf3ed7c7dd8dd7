//! CLI command implementations

pub mod categories;
pub mod query;
pub mod rank;
pub mod show;
pub mod tools;
