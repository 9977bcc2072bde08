// ==========================================
// 聚合物需求看板 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读取逻辑，不含引擎逻辑
// ==========================================

pub mod material;
pub mod totals;
pub mod tracking;
pub mod types;

// 重导出核心类型
pub use material::{MaterialRef, ProductionRecord, StockRecord};
pub use totals::{ColorBreakdown, DemandSummary, DemandTotal, ReconciliationRow, StockTotal};
pub use tracking::{MonthTotal, ProductionDay, TrackingSummary};
pub use types::{Month, UNDEFINED_KEY};
