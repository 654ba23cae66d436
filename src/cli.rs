use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "iiifbox")]
#[command(about = "Generate import tasks from IIIF manifests", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $IIIFBOX_CONFIG or config/iiifbox.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print how many tasks a manifest would produce
    Count(ManifestArgs),
    /// Print the tasks for a manifest as JSON
    Tasks(TasksArgs),
    /// Run the HTTP API
    Server(ServerArgs),
}

#[derive(clap::Args, Debug)]
pub struct ManifestArgs {
    /// Address of the IIIF presentation manifest
    pub manifest_uri: String,
}

#[derive(clap::Args, Debug)]
pub struct TasksArgs {
    /// Address of the IIIF presentation manifest
    pub manifest_uri: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(clap::Args, Debug)]
pub struct ServerArgs {
    /// Address to bind to, overriding server.bind_addr
    #[arg(long)]
    pub address: Option<SocketAddr>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tasks() {
        let cli = Cli::parse_from([
            "iiifbox",
            "tasks",
            "http://example.org/iiif/book1/manifest",
            "--pretty",
        ]);

        match cli.command {
            Commands::Tasks(args) => {
                assert_eq!(args.manifest_uri, "http://example.org/iiif/book1/manifest");
                assert!(args.pretty);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_server_with_config() {
        let cli = Cli::parse_from([
            "iiifbox",
            "server",
            "--address",
            "127.0.0.1:9000",
            "--config",
            "custom.toml",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Commands::Server(args) => {
                assert_eq!(args.address, Some("127.0.0.1:9000".parse().unwrap()));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
