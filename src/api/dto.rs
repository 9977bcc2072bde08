// ==========================================
// 聚合物需求看板 - 报表 DTO
// ==========================================
// 职责: 报表输出结构（序列化为 JSON 供展示层使用）
// ==========================================

use crate::domain::totals::ReconciliationRow;
use crate::domain::tracking::TrackingSummary;
use crate::domain::types::Month;
use serde::Serialize;

// ==========================================
// 图表序列
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(title: impl Into<String>, points: Vec<ChartPoint>) -> Self {
        Self {
            title: title.into(),
            points,
        }
    }

    /// (label, value) 列表 → 序列
    pub fn from_pairs(title: impl Into<String>, pairs: &[(String, f64)]) -> Self {
        Self::new(
            title,
            pairs
                .iter()
                .map(|(label, value)| ChartPoint::new(label.clone(), *value))
                .collect(),
        )
    }
}

// ==========================================
// 需求/库存对账报表
// ==========================================

/// 单个物料的颜色明细（展开详情）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialDetail {
    pub material: String,
    pub total: f64,
    pub colors: Vec<ChartPoint>, // 按需求量降序
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandReport {
    pub rows: Vec<ReconciliationRow>,       // 物料键字典序
    pub shortfalls: Vec<ReconciliationRow>, // balance > 0，按缺口降序
    pub details: Vec<MaterialDetail>,
    pub distribution: Vec<ChartPoint>,
    pub total_hours: Option<f64>,
    pub stock_column: String, // 作为库存快照的日期列
    pub charts: Vec<ChartSeries>,
}

// ==========================================
// 配料分布报表（仅生产计划）
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundDistribution {
    pub distribution: Vec<ChartPoint>,
    pub total: f64,
    pub total_hours: Option<f64>,
    pub chart: ChartSeries,
}

// ==========================================
// 生产跟踪报表
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingReport {
    pub years: Vec<i32>,
    pub months: Vec<Month>,
    pub summary: TrackingSummary,
    pub charts: Vec<ChartSeries>,
}

/// 跟踪工作簿中可选的期间
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AvailablePeriods {
    pub years: Vec<i32>,    // 升序去重
    pub months: Vec<Month>, // 日历顺序去重
    pub sheets: Vec<String>,
}
