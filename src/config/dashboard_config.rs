// ==========================================
// 聚合物需求看板 - 看板配置
// ==========================================
// 职责: 工作簿路径、工作表名、表头行、列名、别名表、显示格式
// 红线: 列一律按名称配置，不按位置
// 存储: JSON 文件（所有字段均有默认值，可部分覆写）
// ==========================================

use crate::engine::normalizer::AliasEntry;
use crate::format::NumberFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置读取失败 (path: {path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置格式错误 (path: {path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// DashboardConfig - 顶层配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub locale: String,               // 用户提示语言（"pt-BR" / "en"）
    pub base_dir: PathBuf,            // 相对路径的基准目录
    pub number_format: NumberFormat,  // 报表数值格式
    pub production: ProductionLayout, // 生产计划（需求）
    pub stock: StockLayout,           // 仓库库存
    pub tracking: TrackingLayout,     // 生产跟踪
    pub aliases: Vec<AliasEntry>,     // 物料别名表
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            locale: "pt-BR".to_string(),
            base_dir: PathBuf::from("."),
            number_format: NumberFormat::pt_br(),
            production: ProductionLayout::default(),
            stock: StockLayout::default(),
            tracking: TrackingLayout::default(),
            aliases: default_aliases(),
        }
    }
}

impl DashboardConfig {
    /// 相对路径按 base_dir 解析
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// 校验配置（空工作表名、空列名、零除数等）
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("production.sheet", &self.production.sheet),
            ("production.description_column", &self.production.description_column),
            ("stock.sheet", &self.stock.sheet),
            ("stock.product_column", &self.stock.product_column),
            ("tracking.date_column", &self.tracking.date_column),
            ("tracking.copper_done_column", &self.tracking.copper_done_column),
            ("tracking.copper_target_column", &self.tracking.copper_target_column),
            ("tracking.aluminium_done_column", &self.tracking.aluminium_done_column),
            ("tracking.aluminium_target_column", &self.tracking.aluminium_target_column),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "不能为空".to_string(),
                });
            }
        }

        match &self.production.quantities {
            QuantityLayout::Single { field } if field.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    key: "production.quantities.field".to_string(),
                    message: "不能为空".to_string(),
                });
            }
            QuantityLayout::PerCompound { first_column } if first_column.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    key: "production.quantities.first_column".to_string(),
                    message: "不能为空".to_string(),
                });
            }
            _ => {}
        }

        if let DateColumnSelector::From { column } = &self.stock.date_columns {
            if column.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "stock.date_columns.column".to_string(),
                    message: "不能为空".to_string(),
                });
            }
        }

        if !self.number_format.divisor.is_finite() || self.number_format.divisor == 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "number_format.divisor".to_string(),
                message: format!("必须为非零有限值，实际 {}", self.number_format.divisor),
            });
        }

        if let Some(entry) = self
            .aliases
            .iter()
            .find(|e| e.alias.trim().is_empty() || e.canonical.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                key: "aliases".to_string(),
                message: format!("别名条目不完整: {:?}", entry),
            });
        }

        Ok(())
    }
}

// ==========================================
// ProductionLayout - 生产计划工作表布局
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionLayout {
    pub path: PathBuf,
    pub sheet: String,
    pub header_row: usize,
    pub description_column: String,
    pub quantities: QuantityLayout,
    pub hours_column: Option<String>, // 总工时列（可选）
}

impl Default for ProductionLayout {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".database/DATABASE.xlsx"),
            sheet: "ProgramaExtrusão".to_string(),
            header_row: 4,
            description_column: "DESCRIÇÃO".to_string(),
            quantities: QuantityLayout::default(),
            hours_column: Some("Tot Hrs".to_string()),
        }
    }
}

/// 数量字段布局
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuantityLayout {
    /// 长表：单一数量列（如 PESO），物料由描述规范化得到
    Single { field: String },
    /// 宽表：从 first_column 起每列一种配料，物料由列名规范化得到
    PerCompound { first_column: String },
}

impl Default for QuantityLayout {
    fn default() -> Self {
        QuantityLayout::Single {
            field: "PESO".to_string(),
        }
    }
}

// ==========================================
// StockLayout - 仓库库存工作表布局
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockLayout {
    pub path: PathBuf,
    pub sheet: String,
    pub header_row: usize,
    pub product_column: String,
    pub date_columns: DateColumnSelector,
}

impl Default for StockLayout {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".database/Novembro-2024.xlsx"),
            sheet: "Folha1".to_string(),
            header_row: 1,
            product_column: "Produto".to_string(),
            date_columns: DateColumnSelector::Detect,
        }
    }
}

/// 库存日期列的选择方式
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateColumnSelector {
    /// 表头形如日期的列（19/nov、19/11/2024 …）
    #[default]
    Detect,
    /// 指定列及其右侧所有列
    From { column: String },
}

// ==========================================
// TrackingLayout - 生产跟踪工作簿布局
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingLayout {
    pub path: PathBuf,
    pub header_row: usize,
    pub date_column: String,
    pub copper_done_column: String,
    pub copper_target_column: String,
    pub aluminium_done_column: String,
    pub aluminium_target_column: String,
}

impl Default for TrackingLayout {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".database/ACOMPANHAMENTO.xlsx"),
            header_row: 0,
            date_column: "Data".to_string(),
            copper_done_column: "Produção Cobre Realizado".to_string(),
            copper_target_column: "Meta/Dia Cobre".to_string(),
            aluminium_done_column: "Produção Alumínio Realizado".to_string(),
            aluminium_target_column: "Meta/Dia Alumínio".to_string(),
        }
    }
}

/// 默认别名表（可在配置文件中整体替换）
pub fn default_aliases() -> Vec<AliasEntry> {
    vec![
        AliasEntry::new("PVC CRISTAL", "PVC CRISTAL"),
        AliasEntry::new("PVC ANTICHAMA", "PVC ANTICHAMA"),
        AliasEntry::new("PVC", "PVC"),
        AliasEntry::new("PEAD", "PEAD"),
        AliasEntry::new("PEBD", "PEBD"),
        AliasEntry::new("XLPE", "XLPE"),
    ]
}
