//! `erlpkg` command-line adapter.
//!
//! Parses arguments with clap, composes the recipe context in [`bootstrap`],
//! and dispatches to the command [`handlers`].
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary target only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

pub use bootstrap::{CliConfig, CliContext, SKIP_TEST_ENV, bootstrap};
pub use commands::{Commands, RecipeArgs};
pub use error::CliError;
pub use parser::Cli;

/// Run one parsed command line.
pub fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Inspect { json } => handlers::inspect::execute(json),
        Commands::Requirements { json } => handlers::requirements::execute(json),
        Commands::Options(args) => {
            let ctx = bootstrap(CliConfig::from_args(&args))?;
            handlers::options::execute(&ctx, args.json)
        }
        Commands::Build(args) => {
            let ctx = bootstrap(CliConfig::from_args(&args))?;
            handlers::build::execute(&ctx, args.json)
        }
        Commands::Package(args) => {
            let ctx = bootstrap(CliConfig::from_args(&args))?;
            handlers::package::execute(&ctx, args.json)
        }
    }
}
