// ==========================================
// 聚合物需求看板 - 配置层
// ==========================================
// 职责: 工作簿布局与显示格式配置
// 存储: JSON 文件（可选），缺省使用内置默认值
// ==========================================

pub mod config_manager;
pub mod dashboard_config;

// 重导出核心配置类型
pub use config_manager::{ConfigManager, ENV_CONFIG_PATH};
pub use dashboard_config::{
    default_aliases, ConfigError, DashboardConfig, DateColumnSelector, ProductionLayout,
    QuantityLayout, StockLayout, TrackingLayout,
};
