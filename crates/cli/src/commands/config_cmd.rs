use clap::Subcommand;
use tracing::debug;

use crate::config::{get_config_path, resolve_config, save_config, SettingOverrides};
use crate::errors::CliError;
use backport_warden_core::config::BackportConfig;

/// Subcommands for the config command
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Create a configuration file with the default settings
    Init {
        /// Path to save the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Show the effective configuration
    Show {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,

        /// Settings overriding the config file
        #[command(flatten)]
        settings: SettingOverrides,
    },
}

/// Execute the config command
pub async fn execute(cmd: ConfigCommands) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Init { path } => init_config(path.as_deref()),
        ConfigCommands::Show { path, settings } => show_config(path.as_deref(), &settings),
    }
}

/// Initialize a new configuration file
fn init_config(path: Option<&str>) -> Result<(), CliError> {
    let config_path = get_config_path(path);
    debug!("Initializing configuration at {:?}", config_path);

    if config_path.exists() {
        return Err(CliError::ConfigError(format!(
            "Configuration file already exists at {:?}",
            config_path
        )));
    }

    save_config(&BackportConfig::default(), &config_path)?;

    println!("Configuration initialized at {:?}", config_path);
    Ok(())
}

/// Print the configuration a check would run with
fn show_config(path: Option<&str>, settings: &SettingOverrides) -> Result<(), CliError> {
    let config = resolve_config(path, settings)?;

    let config_str = toml::to_string_pretty(&config)
        .map_err(|e| CliError::ConfigError(format!("Failed to serialize configuration: {}", e)))?;
    println!("{}", config_str);

    Ok(())
}
