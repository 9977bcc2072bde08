// ==========================================
// 聚合物需求看板 - 库存聚合引擎
// ==========================================
// 输入: 仓库工作表（Produto + 每日库存列）
// 输出: 物料库存合计
// 规则:
// 1. 日期列由新到旧扫描，首个含非空值的列即当前库存快照
// 2. 丢弃产品名或库存为空的行
// 3. 产品名规范化后同键求和
// ==========================================

use crate::config::{DateColumnSelector, StockLayout};
use crate::domain::material::{MaterialRef, StockRecord};
use crate::domain::totals::StockTotal;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::normalizer::AliasTable;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::table::RawTable;
use std::collections::BTreeMap;
use tracing::instrument;

// ==========================================
// StockAggregator - 库存聚合器
// ==========================================
pub struct StockAggregator<'a> {
    aliases: &'a AliasTable,
    cleaner: DataCleaner,
}

impl<'a> StockAggregator<'a> {
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self {
            aliases,
            cleaner: DataCleaner,
        }
    }

    /// 按配置解析日期列（按表格顺序，旧 → 新）
    pub fn resolve_date_columns(
        &self,
        table: &RawTable,
        selector: &DateColumnSelector,
    ) -> EngineResult<Vec<String>> {
        let columns = match selector {
            DateColumnSelector::Detect => table
                .headers
                .iter()
                .filter(|h| self.cleaner.looks_like_date_header(h))
                .cloned()
                .collect(),
            DateColumnSelector::From { column } => {
                let start = table.require_column(column)?;
                table.headers[start..].to_vec()
            }
        };
        Ok(columns)
    }

    /// 选出当前库存列：由新到旧，首个含非空值的列
    pub fn latest_populated_column(
        &self,
        table: &RawTable,
        date_columns: &[String],
    ) -> EngineResult<String> {
        for column in date_columns.iter().rev() {
            let col = table.require_column(column)?;
            if table.column_has_values(col) {
                return Ok(table.headers[col].clone());
            }
            tracing::debug!(column = %column, "日期列为空，继续向前查找");
        }

        Err(EngineError::NoValidStockColumn {
            checked: date_columns.len(),
            columns: date_columns.to_vec(),
        })
    }

    /// 聚合库存
    ///
    /// # 参数
    /// - table: 仓库工作表
    /// - product_column: 产品名列
    /// - date_columns: 日期列（旧 → 新）
    ///
    /// # 返回
    /// - Ok(StockTotal): 物料库存合计
    /// - Err(NoValidStockColumn): 所有日期列均为空
    ///
    /// 不修改输入，重复调用结果一致
    #[instrument(skip(self, table, date_columns), fields(sheet = %table.sheet, dates = date_columns.len()))]
    pub fn aggregate(
        &self,
        table: &RawTable,
        product_column: &str,
        date_columns: &[String],
    ) -> EngineResult<StockTotal> {
        let product_col = table.require_column(product_column)?;
        let source_column = self.latest_populated_column(table, date_columns)?;
        let quantity_col = table.require_column(&source_column)?;

        let mut records = Vec::new();
        let mut by_material: BTreeMap<String, f64> = BTreeMap::new();

        for row in 0..table.row_count() {
            let Some(product) = table.cell(row, product_col).as_text() else {
                continue;
            };
            let quantity_cell = table.cell(row, quantity_col);
            if quantity_cell.is_empty() {
                continue;
            }

            let quantity = self.cleaner.number_or_zero(quantity_cell);
            let material = MaterialRef::new(self.aliases.normalize(&product), None);
            *by_material.entry(material.name.clone()).or_insert(0.0) += quantity;

            records.push(StockRecord {
                row_number: row + 1,
                product,
                material,
                quantity,
            });
        }

        tracing::info!(
            source_column = %source_column,
            records = records.len(),
            materials = by_material.len(),
            "库存聚合完成"
        );

        Ok(StockTotal {
            source_column,
            by_material,
            records,
        })
    }

    /// 按布局配置聚合（解析日期列 + 聚合）
    pub fn aggregate_with_layout(
        &self,
        table: &RawTable,
        layout: &StockLayout,
    ) -> EngineResult<StockTotal> {
        let date_columns = self.resolve_date_columns(table, &layout.date_columns)?;
        self.aggregate(table, &layout.product_column, &date_columns)
    }
}

/// 库存聚合（函数式入口）
pub fn aggregate_stock(
    table: &RawTable,
    product_column: &str,
    date_columns: &[String],
    aliases: &AliasTable,
) -> EngineResult<StockTotal> {
    StockAggregator::new(aliases).aggregate(table, product_column, date_columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::normalizer::AliasEntry;
    use crate::importer::table::Cell;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn aliases() -> AliasTable {
        AliasTable::new(&[AliasEntry::new("PVC CRISTAL", "PVC CRISTAL")])
    }

    fn stock_table() -> RawTable {
        let grid = vec![
            vec![text("Código"), text("Produto"), text("18/nov"), text("19/nov"), text("20/nov")],
            vec![text("1"), text("PVC CRISTAL"), Cell::Number(70.0), Cell::Number(50.0), Cell::Empty],
            vec![text("2"), text("pvc cristal 80"), Cell::Number(5.0), Cell::Number(30.0), Cell::Empty],
            vec![text("3"), text("XLPE"), Cell::Number(9.0), Cell::Empty, Cell::Empty],
            vec![text("4"), Cell::Empty, Cell::Number(1.0), Cell::Number(99.0), Cell::Empty],
            vec![text("5"), text("PEAD"), Cell::Empty, text("n/d"), Cell::Empty],
        ];
        RawTable::from_grid("Folha1", grid, 0).unwrap()
    }

    #[test]
    fn test_latest_populated_column_skips_empty_tail() {
        let aliases = aliases();
        let aggregator = StockAggregator::new(&aliases);
        let table = stock_table();
        let dates = aggregator
            .resolve_date_columns(&table, &DateColumnSelector::Detect)
            .unwrap();

        assert_eq!(dates, vec!["18/nov", "19/nov", "20/nov"]);
        assert_eq!(aggregator.latest_populated_column(&table, &dates).unwrap(), "19/nov");
    }

    #[test]
    fn test_aggregate_sums_normalized_duplicates() {
        let aliases = aliases();
        let aggregator = StockAggregator::new(&aliases);
        let table = stock_table();
        let dates = vec!["18/nov".to_string(), "19/nov".to_string(), "20/nov".to_string()];

        let stock = aggregator.aggregate(&table, "Produto", &dates).unwrap();

        assert_eq!(stock.source_column, "19/nov");
        assert_eq!(stock.get("PVC CRISTAL"), 80.0);
        // 库存为空的行被丢弃
        assert!(!stock.by_material.contains_key("XLPE"));
        // 产品名为空的行被丢弃
        assert_eq!(stock.records.len(), 3);
        // 非数值库存按 0 计
        assert_eq!(stock.get("PEAD"), 0.0);
        assert!(stock.by_material.contains_key("PEAD"));
    }

    #[test]
    fn test_all_date_columns_empty() {
        let aliases = aliases();
        let aggregator = StockAggregator::new(&aliases);
        let grid = vec![
            vec![text("Produto"), text("Jan"), text("Fev")],
            vec![text("PVC"), Cell::Empty, Cell::Empty],
        ];
        let table = RawTable::from_grid("Folha1", grid, 0).unwrap();
        let dates = vec!["Jan".to_string(), "Fev".to_string()];

        let result = aggregator.aggregate(&table, "Produto", &dates);
        assert!(matches!(
            result,
            Err(EngineError::NoValidStockColumn { checked: 2, .. })
        ));
    }

    #[test]
    fn test_no_date_columns_at_all() {
        let aliases = aliases();
        let aggregator = StockAggregator::new(&aliases);
        let table = RawTable::from_grid("Folha1", vec![vec![text("Produto")]], 0).unwrap();

        let result = aggregator.aggregate(&table, "Produto", &[]);
        assert!(matches!(result, Err(EngineError::NoValidStockColumn { checked: 0, .. })));
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let aliases = aliases();
        let aggregator = StockAggregator::new(&aliases);
        let table = stock_table();
        let before = table.clone();
        let dates = vec!["18/nov".to_string(), "19/nov".to_string()];

        let first = aggregator.aggregate(&table, "Produto", &dates).unwrap();
        let second = aggregator.aggregate(&table, "Produto", &dates).unwrap();

        assert_eq!(first, second);
        assert_eq!(table, before);
    }

    #[test]
    fn test_date_selector_from_column() {
        let aliases = aliases();
        let aggregator = StockAggregator::new(&aliases);
        let table = stock_table();
        let layout = StockLayout {
            header_row: 0,
            date_columns: DateColumnSelector::From {
                column: "19/nov".to_string(),
            },
            ..StockLayout::default()
        };

        let stock = aggregator.aggregate_with_layout(&table, &layout).unwrap();
        assert_eq!(stock.source_column, "19/nov");

        let missing = StockLayout {
            date_columns: DateColumnSelector::From {
                column: "01/dez".to_string(),
            },
            ..layout
        };
        assert!(matches!(
            aggregator.aggregate_with_layout(&table, &missing),
            Err(EngineError::Import(_))
        ));
    }

    #[test]
    fn test_missing_product_column() {
        let aliases = aliases();
        let aggregator = StockAggregator::new(&aliases);
        let table = stock_table();

        let result = aggregator.aggregate(&table, "Produtos", &["18/nov".to_string()]);
        assert!(matches!(result, Err(EngineError::Import(_))));
    }
}
