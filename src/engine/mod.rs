// ==========================================
// 聚合物需求看板 - 引擎层
// ==========================================
// 职责: 规范化、聚合、对账、生产跟踪
// 红线: 引擎不读文件，只处理已加载的 RawTable
// ==========================================

pub mod color;
pub mod demand;
pub mod error;
pub mod normalizer;
pub mod reconcile;
pub mod stock;
pub mod tracking;

// 重导出核心引擎
pub use color::extract_color;
pub use demand::{sum_column, DemandAggregator};
pub use error::{EngineError, EngineResult};
pub use normalizer::{AliasEntry, AliasTable};
pub use reconcile::{reconcile, shortfalls, sort_by_balance_desc};
pub use stock::{aggregate_stock, StockAggregator};
pub use tracking::{load_tracking_sheet, parse_month_sheet, summarize};
