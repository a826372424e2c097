//! docnav CLI - Navigation declaration checker.
//!
//! Provides commands for:
//! - `check`: Validate a navigation declaration
//! - `nav`: Print the resolved top navigation
//! - `sidebar`: Print the sidebar resolved for a page

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, NavArgs, SidebarArgs};
use output::Output;

/// docnav - Navigation declaration checker.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the navigation declaration.
    Check(CheckArgs),
    /// Print the top navigation links.
    Nav(NavArgs),
    /// Print the sidebar for a page.
    Sidebar(SidebarArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Check(args) => args.declaration.verbose,
        Commands::Nav(args) => args.declaration.verbose,
        Commands::Sidebar(args) => args.declaration.verbose,
    };

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
        Commands::Sidebar(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
