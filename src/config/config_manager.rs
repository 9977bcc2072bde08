// ==========================================
// 聚合物需求看板 - 配置管理器
// ==========================================
// 职责: 定位并加载配置文件
// 优先级: 环境变量 > 用户配置目录 > 内置默认值
// ==========================================

use crate::config::dashboard_config::{ConfigError, DashboardConfig};
use std::path::{Path, PathBuf};

/// 环境变量：显式指定配置文件路径
pub const ENV_CONFIG_PATH: &str = "POLYMER_DEMAND_CONFIG";

const CONFIG_DIR_NAME: &str = "polymer-demand";
const CONFIG_FILE_NAME: &str = "config.json";

pub struct ConfigManager;

impl ConfigManager {
    /// 按优先级加载配置
    ///
    /// 1. `POLYMER_DEMAND_CONFIG` 指定的文件（必须存在）
    /// 2. `<config_dir>/polymer-demand/config.json`（存在时）
    /// 3. 内置默认值
    pub fn load() -> Result<DashboardConfig, ConfigError> {
        if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                tracing::info!(path = trimmed, "使用环境变量指定的配置文件");
                return Self::load_from_path(Path::new(trimmed));
            }
        }

        if let Some(path) = Self::default_config_path().filter(|p| p.exists()) {
            tracing::info!(path = %path.display(), "使用用户配置目录中的配置文件");
            return Self::load_from_path(&path);
        }

        tracing::info!("未找到配置文件，使用内置默认配置");
        Ok(DashboardConfig::default())
    }

    /// 从指定文件加载并校验配置
    pub fn load_from_path(path: &Path) -> Result<DashboardConfig, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: DashboardConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// 用户配置目录下的默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_path() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{ "locale": "en", "stock": {{ "sheet": "Estoque" }} }}"#
        )
        .unwrap();

        let config = ConfigManager::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.locale, "en");
        assert_eq!(config.stock.sheet, "Estoque");
        assert_eq!(config.stock.product_column, "Produto");
    }

    #[test]
    fn test_load_from_missing_path() {
        let result = ConfigManager::load_from_path(Path::new("/nao/existe/config.json"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_load_from_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{{ not json").unwrap();

        let result = ConfigManager::load_from_path(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{ "production": {{ "sheet": "" }} }}"#).unwrap();

        let result = ConfigManager::load_from_path(temp_file.path());
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
