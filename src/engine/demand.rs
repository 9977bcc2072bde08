// ==========================================
// 聚合物需求看板 - 需求聚合引擎
// ==========================================
// 输入: 生产计划工作表（ProgramaExtrusão）
// 输出: 物料需求合计 + 物料 × 颜色明细
// 红线: 非数值单元格按 0 计，单个坏单元格不影响整体聚合
// ==========================================

use crate::config::{ProductionLayout, QuantityLayout};
use crate::domain::material::{MaterialRef, ProductionRecord};
use crate::domain::totals::{ColorBreakdown, DemandSummary};
use crate::domain::types::UNDEFINED_KEY;
use crate::engine::color::extract_color;
use crate::engine::error::EngineResult;
use crate::engine::normalizer::AliasTable;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::table::RawTable;
use tracing::instrument;

// 空表头列的占位前缀（见 RawTable::from_grid）
const UNNAMED_PREFIX: &str = "Unnamed: ";

// ==========================================
// DemandAggregator - 需求聚合器
// ==========================================
pub struct DemandAggregator<'a> {
    aliases: &'a AliasTable,
    cleaner: DataCleaner,
}

impl<'a> DemandAggregator<'a> {
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self {
            aliases,
            cleaner: DataCleaner,
        }
    }

    /// 生产计划表 → ProductionRecord 列表
    ///
    /// # 规则
    /// - 描述列按名称查找
    /// - 长表: 数量字段为配置的单列
    /// - 宽表: 数量字段为 first_column 及其右侧所有具名列
    /// - 物料键 = normalize(描述)，颜色键 = extract_color(描述)
    #[instrument(skip(self, table, layout), fields(sheet = %table.sheet, rows = table.row_count()))]
    pub fn load_records(
        &self,
        table: &RawTable,
        layout: &ProductionLayout,
    ) -> EngineResult<Vec<ProductionRecord>> {
        let description_col = table.require_column(&layout.description_column)?;

        let quantity_cols: Vec<usize> = match &layout.quantities {
            QuantityLayout::Single { field } => vec![table.require_column(field)?],
            QuantityLayout::PerCompound { first_column } => {
                let start = table.require_column(first_column)?;
                (start..table.headers.len())
                    .filter(|&idx| !table.headers[idx].starts_with(UNNAMED_PREFIX))
                    .collect()
            }
        };

        let records = (0..table.row_count())
            .map(|idx| {
                let description = table.cell(idx, description_col).as_text();
                let raw = description.as_deref().unwrap_or("");

                ProductionRecord {
                    row_number: idx + 1,
                    material: MaterialRef::new(
                        self.aliases.normalize(raw),
                        Some(extract_color(raw)),
                    ),
                    description,
                    quantities: quantity_cols
                        .iter()
                        .map(|&col| (table.headers[col].clone(), table.cell(idx, col).clone()))
                        .collect(),
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            records = records.len(),
            quantity_fields = quantity_cols.len(),
            "生产计划记录加载完成"
        );

        Ok(records)
    }

    /// 按 (物料, 颜色) 分组求和，并由颜色明细派生物料合计
    ///
    /// 空输入返回空结果
    #[instrument(skip(self, records, layout), fields(count = records.len()))]
    pub fn aggregate(&self, records: &[ProductionRecord], layout: &QuantityLayout) -> DemandSummary {
        let mut by_color = ColorBreakdown::default();

        for record in records {
            let color = record.material.color.as_deref().unwrap_or(UNDEFINED_KEY);

            match layout {
                QuantityLayout::Single { field } => {
                    let quantity = record
                        .quantity(field)
                        .map(|cell| self.cleaner.number_or_zero(cell))
                        .unwrap_or(0.0);
                    by_color.add(&record.material.name, color, quantity);
                }
                QuantityLayout::PerCompound { .. } => {
                    for (compound, cell) in &record.quantities {
                        let material = self.aliases.normalize(compound);
                        by_color.add(&material, color, self.cleaner.number_or_zero(cell));
                    }
                }
            }
        }

        let totals = by_color.material_totals();
        tracing::debug!(materials = totals.by_material.len(), "需求聚合完成");

        DemandSummary { totals, by_color }
    }
}

/// 数值列合计（如总工时）；列不存在返回 None
pub fn sum_column(table: &RawTable, column: &str) -> Option<f64> {
    let col = table.column_index(column)?;
    let cleaner = DataCleaner;
    Some(
        (0..table.row_count())
            .map(|row| cleaner.number_or_zero(table.cell(row, col)))
            .sum(),
    )
}
