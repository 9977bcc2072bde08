// ==========================================
// 聚合物需求看板 - 生产跟踪领域模型
// ==========================================
// 来源: 生产跟踪工作簿，每个 "<月份>-<年份>" 工作表一个月
// ==========================================

use crate::domain::types::Month;
use chrono::NaiveDate;
use serde::Serialize;

// ==========================================
// ProductionDay - 单日产量
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionDay {
    pub date: NaiveDate,
    pub day_index: u32, // 当月第几条记录（1 基，按行顺序，每月重新计数）
    pub month: Month,   // 来源工作表的月份
    pub year: i32,      // 来源工作表的年份
    pub copper_done: f64,
    pub copper_target: f64,
    pub aluminium_done: f64,
    pub aluminium_target: f64,
}

// ==========================================
// MonthTotal - 月度合计
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub year: i32,
    pub month: Month,
    pub copper_done: f64,
    pub aluminium_done: f64,
}

impl MonthTotal {
    /// 图表标签，如 "Novembro/2024"
    pub fn label(&self) -> String {
        format!("{}/{}", self.month, self.year)
    }
}

// ==========================================
// TrackingSummary - 筛选后的汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackingSummary {
    pub days: Vec<ProductionDay>,
    pub copper_total: f64,
    pub aluminium_total: f64,
    pub by_month: Vec<MonthTotal>, // 按 (年, 月) 日历顺序
}
