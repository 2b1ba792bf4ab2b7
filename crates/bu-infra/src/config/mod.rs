//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Parse TOML into BridgeConfig DTO / 将 TOML 解析为 BridgeConfig DTO
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! > **Pure data loading only. Accept whatever is in the file.**

use std::path::{Path, PathBuf};

use anyhow::Context;
use bu_core::config::BridgeConfig;

/// Application directory name under the platform data dir.
pub const APP_DIR_NAME: &str = "blinkup-bridge";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: impl AsRef<Path>) -> anyhow::Result<BridgeConfig> {
    let config_path = config_path.as_ref();
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    BridgeConfig::from_toml(&toml_value)
}

/// Platform data directory for the bridge, e.g.
/// `~/.local/share/blinkup-bridge` on Linux.
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir().context("Failed to determine local data directory")?;
    Ok(base.join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [storage]
            plan_id_dir = "/data/blinkup"

            [provisioning]
            max_timeout_ms = 45000
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.plan_id_dir, PathBuf::from("/data/blinkup"));
        assert_eq!(config.max_timeout_ms, 45000);
    }

    #[test]
    fn test_load_config_returns_io_error_on_file_not_found() {
        let result = load_config("/this/path/does/not/exist/config.toml");

        let err = result.unwrap_err();
        assert!(
            err.to_string().contains("Failed to read config file"),
            "Expected IO error message, got: {}",
            err
        );
    }

    #[test]
    fn test_load_config_returns_parse_error_on_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[storage\nplan_id_dir = ").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }
}
