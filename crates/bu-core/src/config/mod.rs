//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define bridge configuration data structures / 定义桥接配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No business rules / 禁止业务规则**
//!
//! Missing keys map to the protocol defaults; nothing else is inferred.

use std::path::PathBuf;

use crate::provisioning::MAX_TIMEOUT_MS;

/// Bridge configuration DTO (pure data, no logic)
/// 桥接配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Directory holding the plan id document (empty = platform default)
    /// 计划 ID 文档所在目录（空 = 平台默认目录）
    pub plan_id_dir: PathBuf,

    /// Requested timeouts above this value are clamped
    pub max_timeout_ms: u64,
}

impl BridgeConfig {
    /// Create BridgeConfig from TOML value
    /// 从 TOML 值创建 BridgeConfig
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let provisioning = toml_value.get("provisioning");
        Ok(Self {
            plan_id_dir: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("plan_id_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            max_timeout_ms: provisioning
                .and_then(|p| p.get("max_timeout_ms"))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
                .unwrap_or(MAX_TIMEOUT_MS),
        })
    }

    /// Create BridgeConfig rooted at a platform data directory
    /// 使用平台数据目录创建 BridgeConfig
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            plan_id_dir: data_dir,
            max_timeout_ms: MAX_TIMEOUT_MS,
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::with_system_defaults(PathBuf::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_reads_all_keys() {
        let toml_str = r#"
            [storage]
            plan_id_dir = "/data/blinkup"

            [provisioning]
            max_timeout_ms = 45000
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = BridgeConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.plan_id_dir, PathBuf::from("/data/blinkup"));
        assert_eq!(config.max_timeout_ms, 45000);
    }

    #[test]
    fn test_from_toml_uses_protocol_defaults_when_missing() {
        let toml_value: Value = toml::from_str("[storage]\n").unwrap();

        let config = BridgeConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.plan_id_dir, PathBuf::new());
        assert_eq!(config.max_timeout_ms, MAX_TIMEOUT_MS);
    }

    #[test]
    fn test_default_matches_system_defaults_with_empty_dir() {
        assert_eq!(
            BridgeConfig::default(),
            BridgeConfig::with_system_defaults(PathBuf::new())
        );
    }
}
