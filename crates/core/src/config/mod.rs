//! Configuration loading and schema definitions
//!
//! TOML configuration shared by the loader client and the CLI.

mod loader;
mod schema;

pub use loader::{validate, Config};
pub use schema::*;
