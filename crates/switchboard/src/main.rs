// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Switchboard - content-aware model routing proxy.
//!
//! This is the binary entry point for the proxy.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use switchboard_config::{ConfigError, SwitchboardConfig};

/// Switchboard - content-aware model routing proxy.
#[derive(Parser, Debug)]
#[command(name = "switchboard", version, about, long_about = None)]
struct Cli {
    /// Load this file instead of the standard config locations.
    #[arg(long, short, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Start the proxy server (the default).
    Serve,
    /// Validate the configuration and print the effective routing settings.
    CheckConfig,
}

fn load_config(path: Option<&PathBuf>) -> Result<SwitchboardConfig, Vec<ConfigError>> {
    match path {
        Some(path) => switchboard_config::load_and_validate_path(path),
        None => switchboard_config::load_and_validate(),
    }
}

/// Human-readable summary printed by `check-config`.
fn describe_config(config: &SwitchboardConfig) -> String {
    let models = match config.models.source {
        switchboard_config::model::ModelSource::Request => {
            "models: taken from each request".to_string()
        }
        switchboard_config::model::ModelSource::Config => format!(
            "models: long_text={} text={} vision={}",
            config.models.long_text_model, config.models.text_model, config.models.vision_model
        ),
    };

    [
        format!("listen: {}:{}", config.server.host, config.server.port),
        format!(
            "upstream: {} (credentials: {:?})",
            config.upstream.base_url, config.upstream.credential_mode
        ),
        models,
        format!(
            "routing: long_text_chars>{} token_budget>{} fold={:?} token_override={:?}",
            config.routing.long_text_chars,
            config.routing.token_budget,
            config.routing.fold_policy,
            config.routing.token_override
        ),
        format!(
            "defaults: temperature={} top_p={}",
            config.defaults.temperature, config.defaults.top_p
        ),
    ]
    .join("\n")
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            switchboard_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Commands::CheckConfig => {
            println!("switchboard: config ok");
            println!("{}", describe_config(&config));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = switchboard_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.server.port, 8280);
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["switchboard"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());

        let cli = Cli::try_parse_from(["switchboard", "serve", "--config", "/tmp/s.toml"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Serve));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.toml")));
    }

    #[test]
    fn check_config_subcommand_parses() {
        let cli = Cli::try_parse_from(["switchboard", "check-config"]).unwrap();
        assert_eq!(cli.command, Some(Commands::CheckConfig));
    }

    #[test]
    fn describe_config_lists_routing_settings() {
        let config = SwitchboardConfig::default();
        let summary = describe_config(&config);
        assert!(summary.contains("listen: 0.0.0.0:8280"));
        assert!(summary.contains("models: taken from each request"));
        assert!(summary.contains("long_text_chars>15000"));
        assert!(summary.contains("token_budget>25000"));
        assert!(summary.contains("temperature=1 top_p=0.7"));
    }

    #[test]
    fn describe_config_never_prints_api_key() {
        let mut config = SwitchboardConfig::default();
        config.upstream.api_key = Some("sk-very-secret".to_string());
        assert!(!describe_config(&config).contains("sk-very-secret"));
    }
}
