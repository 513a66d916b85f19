use asset_sync::BootstrapOutcome;
use asset_sync_cli::commands::{
    assets_cmd::{self, StorageArgs},
    config_cmd::{self, ConfigCommands},
    sync_cmd::{self, SyncArgs},
};
use asset_sync_cli::errors::Error;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// asset-sync CLI: mirror a GitHub repository directory into local storage
#[derive(Parser)]
#[command(name = "asset-sync")]
#[command(about = "Mirror a GitHub repository directory into local storage", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Download the assets unless a previous sync already completed
    Sync(SyncArgs),

    /// List the downloaded asset files
    List(StorageArgs),

    /// Show whether the assets have been downloaded
    Status(StorageArgs),

    /// Show the CLI version
    Version,
}

fn exit_with(e: Error) -> ! {
    error!("Error: {e}");
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().pretty())
        .with(EnvFilter::from_env("ASSET_SYNC_LOG"))
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Config(cmd) => {
            if let Err(e) = config_cmd::execute(cmd) {
                exit_with(e);
            }
        }
        Commands::Sync(args) => match sync_cmd::execute(args).await {
            Ok(BootstrapOutcome::Synced { assets }) => {
                println!("Downloaded {} assets", assets.len());
            }
            Ok(BootstrapOutcome::AlreadyComplete { assets }) => {
                println!("Assets already downloaded ({} files)", assets.len());
            }
            Ok(BootstrapOutcome::Failed) => {
                println!("Asset sync failed; it will run again next time");
                std::process::exit(1);
            }
            Err(e) => exit_with(e),
        },
        Commands::List(args) => match assets_cmd::list(args).await {
            Ok(assets) => {
                for asset in assets {
                    if let Some(name) = asset.file_name() {
                        println!("{}", name.to_string_lossy());
                    }
                }
            }
            Err(e) => exit_with(e),
        },
        Commands::Status(args) => match assets_cmd::status(args).await {
            Ok((_, Some(state))) if state.assets_downloaded => {
                println!("Assets downloaded at {}", state.completed_at.to_rfc3339());
            }
            Ok((path, _)) => {
                println!("Assets not downloaded yet (no completion marker at {:?})", path);
            }
            Err(e) => exit_with(e),
        },
        Commands::Version => {
            println!(
                "asset-sync version {}",
                option_env!("ASSET_SYNC_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
        }
    }
}
