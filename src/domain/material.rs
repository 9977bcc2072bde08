// ==========================================
// 聚合物需求看板 - 物料领域模型
// ==========================================
// 用途: 导入层写入，引擎层只读
// 生命周期: 由只读工作表快照派生，加载后不可变
// ==========================================

use crate::importer::table::Cell;
use serde::Serialize;

// ==========================================
// MaterialRef - 物料引用
// ==========================================
// 库存记录没有颜色维度，color 为 None
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MaterialRef {
    pub name: String,
    pub color: Option<String>,
}

impl MaterialRef {
    pub fn new(name: impl Into<String>, color: Option<String>) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

// ==========================================
// ProductionRecord - 生产计划行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionRecord {
    pub row_number: usize,            // 数据行号（1 基，不含表头）
    pub description: Option<String>,  // 原始描述（DESCRIÇÃO）
    pub quantities: Vec<(String, Cell)>, // 数量字段（列名, 原始单元格），按列顺序
    pub material: MaterialRef,        // 派生：规范物料键 + 颜色键
}

impl ProductionRecord {
    /// 按列名读取数量字段
    pub fn quantity(&self, field: &str) -> Option<&Cell> {
        self.quantities
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, cell)| cell)
    }
}

// ==========================================
// StockRecord - 仓库库存行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockRecord {
    pub row_number: usize,   // 数据行号（1 基，不含表头）
    pub product: String,     // 原始产品名（Produto）
    pub material: MaterialRef, // 派生：规范物料键（无颜色）
    pub quantity: f64,       // 选定日期列的库存量
}
