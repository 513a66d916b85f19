use clap::Subcommand;
use tracing::{debug, error, info, instrument};

use crate::config::{get_config_path, AppConfig};
use crate::errors::Error;

/// Subcommands for the config command
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Create initial configuration file
    Init {
        /// Path to save the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Check configuration syntax
    Validate {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Show the effective configuration
    Show {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },
}

/// Execute the config command
#[instrument]
pub fn execute(cmd: &ConfigCommands) -> Result<(), Error> {
    match cmd {
        ConfigCommands::Init { path } => init_config(path.as_deref()),
        ConfigCommands::Validate { path } => validate_config(path.as_deref()),
        ConfigCommands::Show { path } => show_config(path.as_deref()),
    }
}

/// Initialize a new configuration file
#[instrument]
fn init_config(path: Option<&str>) -> Result<(), Error> {
    let config_path = get_config_path(path);
    debug!(message = "Initializing configuration", path = ?config_path);

    if config_path.exists() {
        let err = Error::Config(format!(
            "Configuration file already exists at {:?}",
            config_path
        ));
        error!(
            message = "Configuration file already exists",
            path = ?config_path,
            error = ?err
        );
        return Err(err);
    }

    AppConfig::default().save(&config_path)?;

    info!(message = "Configuration initialized", path = ?config_path);
    println!("Configuration initialized at {:?}", config_path);
    Ok(())
}

/// Validate a configuration file
#[instrument]
fn validate_config(path: Option<&str>) -> Result<(), Error> {
    let config_path = get_config_path(path);
    debug!(message = "Validating configuration", path = ?config_path);

    let config = AppConfig::load(&config_path)?;
    config.sync_source()?;

    info!(message = "Configuration is valid", path = ?config_path);
    println!("Configuration is valid");
    Ok(())
}

/// Print the configuration the sync would run with
#[instrument]
fn show_config(path: Option<&str>) -> Result<(), Error> {
    let config = match path {
        Some(p) => AppConfig::load(&get_config_path(Some(p)))?,
        None => AppConfig::resolve(None)?,
    };

    let content = toml::to_string_pretty(&config)
        .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;
    println!("{}", content);
    Ok(())
}
