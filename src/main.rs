mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use iiifbox::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Logs go to stderr so `tasks` output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Count(args) => commands::count(&config, args.manifest_uri).await?,
        Commands::Tasks(args) => commands::tasks(&config, args.manifest_uri, args.pretty).await?,
        Commands::Server(args) => iiifbox::api::run(config, args.address).await?,
    }

    Ok(())
}
