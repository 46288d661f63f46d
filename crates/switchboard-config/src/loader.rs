// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `/etc/switchboard/switchboard.toml`, then
//! `~/.config/switchboard/switchboard.toml`, then `./switchboard.toml`, with
//! `SWITCHBOARD_` environment variables applied last.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SwitchboardConfig;

/// Config file name searched for in each location.
pub const CONFIG_FILE_NAME: &str = "switchboard.toml";

/// Top-level sections, used to turn `SWITCHBOARD_<SECTION>_<KEY>` into `section.key`.
const SECTIONS: &[&str] = &["server", "upstream", "models", "routing", "defaults"];

/// Config file locations, lowest priority first.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/switchboard").join(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("switchboard").join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}

/// Build the layered Figment: defaults, every config file that exists, env.
pub fn build_figment() -> Figment {
    config_paths()
        .into_iter()
        .fold(
            Figment::new().merge(Serialized::defaults(SwitchboardConfig::default())),
            |figment, path| figment.merge(Toml::file(path)),
        )
        .merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<SwitchboardConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from one explicit file, with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SwitchboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SwitchboardConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<SwitchboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SwitchboardConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Environment provider mapping `SWITCHBOARD_UPSTREAM_API_KEY` to `upstream.api_key`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// keys like `long_text_model` keep their underscores.
fn env_provider() -> Env {
    Env::prefixed("SWITCHBOARD_").map(|key| {
        let key_str = key.as_str();
        SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key_str.to_string())
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CredentialMode, ModelSource};

    #[test]
    fn env_overrides_map_to_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SWITCHBOARD_UPSTREAM_API_KEY", "sk-env");
            jail.set_env("SWITCHBOARD_UPSTREAM_CREDENTIAL_MODE", "server_key");
            jail.set_env("SWITCHBOARD_MODELS_LONG_TEXT_MODEL", "long-env");
            jail.set_env("SWITCHBOARD_SERVER_PORT", "9000");
            let config: SwitchboardConfig = build_figment().extract()?;
            assert_eq!(config.upstream.api_key.as_deref(), Some("sk-env"));
            assert_eq!(config.upstream.credential_mode, CredentialMode::ServerKey);
            assert_eq!(config.models.long_text_model, "long-env");
            assert_eq!(config.server.port, 9000);
            Ok(())
        });
    }

    #[test]
    fn local_file_is_merged() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                r#"
[models]
source = "config"
long_text_model = "a"
text_model = "b"
vision_model = "c"
"#,
            )?;
            let config: SwitchboardConfig = build_figment().extract()?;
            assert_eq!(config.models.source, ModelSource::Config);
            assert_eq!(config.models.vision_model, "c");
            Ok(())
        });
    }

    #[test]
    fn env_beats_explicit_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[server]\nport = 1234\n")?;
            jail.set_env("SWITCHBOARD_SERVER_PORT", "4321");
            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.server.port, 4321);
            Ok(())
        });
    }

    #[test]
    fn config_paths_end_with_local_file() {
        let paths = config_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from(CONFIG_FILE_NAME)));
        assert!(paths[0].starts_with("/etc/switchboard"));
    }
}
