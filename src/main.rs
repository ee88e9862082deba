use anyhow::Result;
use clap::Parser;

mod cli;

use ev_savings::{config, init_tracing, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    // Initialize tracing/logging early
    init_tracing();

    // Dispatch to appropriate command handler
    match args.get_command() {
        cli::Commands::Start => {
            let cfg = config::load_config(&args.config)?;
            server::start_server(cfg, args.config.clone()).await?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => {
                let cfg = config::load_config(&args.config)?;
                println!("Current Configuration:");
                println!();
                println!("{}", toml::to_string_pretty(&cfg)?);
            }
            cli::ConfigCommands::Validate => {
                let cfg = config::load_config(&args.config)?;
                println!("✓ Configuration is valid");
                println!();
                println!("Summary:");
                println!("  Listen Address: {}:{}", cfg.server.host, cfg.server.port);
                println!("  Allowed Origins: {}", cfg.cors.allowed_origins.len());
            }
        },
        cli::Commands::Version => {
            println!("EV Savings v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
