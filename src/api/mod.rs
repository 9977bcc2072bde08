// ==========================================
// 聚合物需求看板 - API 层
// ==========================================
// 职责: 提供报表接口，供 CLI / 展示层调用
// ==========================================

pub mod dto;
pub mod error;
pub mod report_api;

// 重导出核心类型
pub use dto::{
    AvailablePeriods, ChartPoint, ChartSeries, CompoundDistribution, DemandReport,
    MaterialDetail, TrackingReport,
};
pub use error::{ApiError, ApiResult};
pub use report_api::ReportApi;
