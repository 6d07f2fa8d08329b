// ABOUTME: Entry point for the sequester CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use sequester::error::Result;
use sequester::output::Output;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let output = Output::new(commands::output_mode(cli.json, cli.quiet));

    let result = run(cli, output).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: Output) -> Result<()> {
    match cli.command {
        Commands::Contain {
            event,
            inventory,
            config,
            plan_only,
        } => commands::contain(event, inventory, config, plan_only, output).await,
        Commands::Describe { inventory } => commands::describe(inventory, output).await,
        Commands::Tag {
            inventory,
            id,
            key,
            desc,
            emit_event,
        } => commands::tag(inventory, id, key, desc, emit_event, output).await,
        Commands::Untag {
            inventory,
            id,
            key,
            emit_event,
        } => commands::untag(inventory, id, key, emit_event, output).await,
    }
}
