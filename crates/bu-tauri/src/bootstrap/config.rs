//! # Configuration Resolution / 配置解析
//!
//! Picks the bridge configuration at plugin setup:
//!
//! 1. `BLINKUP_BRIDGE_CONFIG` set → load that TOML file
//! 2. Otherwise → protocol defaults
//!
//! An empty `plan_id_dir` is then filled with the app's local data directory,
//! and a `max_timeout_ms` of zero falls back to the protocol maximum.

use std::path::PathBuf;

use anyhow::Context;
use bu_core::config::BridgeConfig;
use bu_core::provisioning::MAX_TIMEOUT_MS;
use bu_infra::load_config;
use tracing::{info, warn};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "BLINKUP_BRIDGE_CONFIG";

pub fn resolve_config(
    config_path: Option<PathBuf>,
    data_dir: PathBuf,
) -> anyhow::Result<BridgeConfig> {
    let mut config = match config_path {
        Some(path) => {
            info!(path = %path.display(), "loading bridge config");
            load_config(&path)
                .with_context(|| format!("Failed to load {}", CONFIG_PATH_ENV))?
        }
        None => BridgeConfig::default(),
    };

    if config.plan_id_dir.as_os_str().is_empty() {
        config.plan_id_dir = data_dir;
    }

    if config.max_timeout_ms == 0 {
        warn!(
            default_ms = MAX_TIMEOUT_MS,
            "max_timeout_ms must be positive, using default"
        );
        config.max_timeout_ms = MAX_TIMEOUT_MS;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_use_data_dir() {
        let config = resolve_config(None, PathBuf::from("/data/app")).unwrap();

        assert_eq!(config.plan_id_dir, PathBuf::from("/data/app"));
        assert_eq!(config.max_timeout_ms, MAX_TIMEOUT_MS);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\nplan_id_dir = \"/custom\"\n\n[provisioning]\nmax_timeout_ms = 30000\n")
            .unwrap();

        let config =
            resolve_config(Some(temp_file.path().to_path_buf()), PathBuf::from("/data/app"))
                .unwrap();

        assert_eq!(config.plan_id_dir, PathBuf::from("/custom"));
        assert_eq!(config.max_timeout_ms, 30000);
    }

    #[test]
    fn test_config_file_without_storage_falls_back_to_data_dir() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[provisioning]\nmax_timeout_ms = 10000\n")
            .unwrap();

        let config =
            resolve_config(Some(temp_file.path().to_path_buf()), PathBuf::from("/data/app"))
                .unwrap();

        assert_eq!(config.plan_id_dir, PathBuf::from("/data/app"));
    }

    #[test]
    fn test_zero_or_negative_max_timeout_uses_default() {
        for value in ["0", "-5"] {
            let mut temp_file = NamedTempFile::new().unwrap();
            write!(temp_file, "[provisioning]\nmax_timeout_ms = {value}\n").unwrap();

            let config =
                resolve_config(Some(temp_file.path().to_path_buf()), PathBuf::from("/data/app"))
                    .unwrap();

            assert_eq!(config.max_timeout_ms, MAX_TIMEOUT_MS, "max_timeout_ms = {value}");
        }
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let err = resolve_config(
            Some(PathBuf::from("/this/path/does/not/exist.toml")),
            PathBuf::from("/data/app"),
        )
        .unwrap_err();

        assert!(err.to_string().contains(CONFIG_PATH_ENV));
    }
}
