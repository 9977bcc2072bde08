// ==========================================
// 聚合物需求看板 - 核心库
// ==========================================
// 职责: 生产需求与仓库库存对账、配料分布、生产跟踪
// 技术栈: Rust + calamine/csv（工作簿读取）
// 系统定位: 看板数据层（图表渲染由展示层负责）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 规范化、聚合、对账
pub mod engine;

// 导入层 - 工作簿读取
pub mod importer;

// 配置层 - 工作簿布局
pub mod config;

// 数值/日期格式化
pub mod format;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// 国际化
pub mod i18n;

// API 层 - 报表接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Month, UNDEFINED_KEY};

// 领域实体
pub use domain::{
    ColorBreakdown, DemandSummary, DemandTotal, MaterialRef, ProductionDay, ProductionRecord,
    ReconciliationRow, StockRecord, StockTotal, TrackingSummary,
};

// 引擎
pub use engine::{
    aggregate_stock, extract_color, reconcile, AliasEntry, AliasTable, DemandAggregator,
    StockAggregator,
};

// API
pub use api::{ApiError, DemandReport, ReportApi, TrackingReport};

// 配置
pub use config::{ConfigManager, DashboardConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Dashboard Operacional - Compostos";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
