//! Placefinder CLI - nearest places and radius counts over a place catalog
//!
//! Loads the places and categories feeds, then answers proximity questions
//! for a query point.

use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use placefinder_core::{exit_codes, Error, ErrorCode};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod context;
mod output;

use context::Context;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON on stdout
    Json,
}

/// Find the nearest places of interest and count places around a point
#[derive(Parser)]
#[command(name = "placefinder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Path to a configuration file
    #[arg(short, long, global = true, env = "PLACEFINDER_CONFIG")]
    config: Option<PathBuf>,

    /// Places feed (URL or JSON file), overrides configuration
    #[arg(long, global = true)]
    places: Option<String>,

    /// Categories feed (URL or JSON file), overrides configuration
    #[arg(long, global = true)]
    categories: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Query point arguments shared by the catalog commands
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct PointArgs {
    /// Query latitude (defaults to the configured fallback)
    #[arg(long, allow_negative_numbers = true, requires = "lng")]
    pub lat: Option<f64>,

    /// Query longitude (defaults to the configured fallback)
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lng: Option<f64>,

    /// Category id to keep (-1 or omitted for all)
    #[arg(long, allow_negative_numbers = true)]
    pub category: Option<i64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable categories
    Categories,

    /// Nearest place, distance, and count within the radius
    Query {
        #[command(flatten)]
        point: PointArgs,

        /// Radius in kilometers (defaults to the configured radius)
        #[arg(short, long, allow_negative_numbers = true)]
        radius: Option<f64>,
    },

    /// Nearest place to the query point
    Nearest {
        #[command(flatten)]
        point: PointArgs,
    },

    /// Number of places within a radius of the query point
    Count {
        #[command(flatten)]
        point: PointArgs,

        /// Radius in kilometers
        #[arg(short, long, allow_negative_numbers = true)]
        radius: f64,
    },

    /// Every field of one place
    Show {
        /// Place id
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Places ordered by distance from the query point
    Rank {
        #[command(flatten)]
        point: PointArgs,

        /// Maximum number of places to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,

        /// Only show places within this radius (kilometers)
        #[arg(short, long, allow_negative_numbers = true)]
        radius: Option<f64>,
    },

    /// Great-circle distance between two coordinates
    Distance {
        /// First latitude
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        /// First longitude
        #[arg(allow_negative_numbers = true)]
        lng1: f64,
        /// Second latitude
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        /// Second longitude
        #[arg(allow_negative_numbers = true)]
        lng2: f64,
    },

    /// Format a distance in kilometers for display
    Format {
        /// Distance in kilometers
        #[arg(allow_negative_numbers = true)]
        km: f64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = cli.format;

    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = match format {
                OutputFormat::Json => report_json(e),
                OutputFormat::Text => {
                    eprintln!("{} {}", "Error:".red().bold(), e);
                    e.downcast_ref::<Error>()
                        .map_or(exit_codes::FAILURE, Error::exit_code)
                }
            };
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

/// Print the error as a JSON report on stdout and return its exit code
fn report_json(e: anyhow::Error) -> i32 {
    let (error, code) = match e.downcast::<Error>() {
        Ok(error) => {
            let code = error.exit_code();
            (error, code)
        }
        Err(other) => (Error::new(ErrorCode::Internal, other.to_string()), exit_codes::FAILURE),
    };

    if let Err(e) = output::print_json(&error.to_report()) {
        eprintln!("{} {}", "Error:".red().bold(), e);
    }
    code
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::new(cli.config.as_deref(), cli.format)?;
    ctx.init_logging(cli.verbose)?;

    let sources = context::SourceOverrides {
        places: cli.places,
        categories: cli.categories,
    };

    match cli.command {
        Commands::Categories => commands::categories::run(&ctx, &sources).await,

        Commands::Query { point, radius } => {
            commands::query::run(&ctx, &sources, point, radius).await
        }

        Commands::Nearest { point } => commands::query::nearest(&ctx, &sources, point).await,

        Commands::Count { point, radius } => {
            commands::query::count(&ctx, &sources, point, radius).await
        }

        Commands::Show { id } => commands::show::run(&ctx, &sources, id).await,

        Commands::Rank { point, limit, radius } => {
            commands::rank::run(&ctx, &sources, point, limit, radius).await
        }

        Commands::Distance { lat1, lng1, lat2, lng2 } => {
            commands::tools::distance(&ctx, (lat1, lng1), (lat2, lng2))
        }

        Commands::Format { km } => commands::tools::format(&ctx, km),
    }
}
