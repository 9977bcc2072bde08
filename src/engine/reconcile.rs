// ==========================================
// 聚合物需求看板 - 需求/库存对账
// ==========================================
// 口径: balance = demand - stock（正数为缺口）
// 键集合: 需求键 ∪ 库存键，缺失一侧按 0 计
// 输出顺序: 物料键字典序（展示排序由调用方决定）
// ==========================================

use crate::domain::totals::{DemandTotal, ReconciliationRow, StockTotal};
use std::collections::BTreeSet;

/// 需求与库存外连接对账
pub fn reconcile(demand: &DemandTotal, stock: &StockTotal) -> Vec<ReconciliationRow> {
    let keys: BTreeSet<&String> = demand
        .by_material
        .keys()
        .chain(stock.by_material.keys())
        .collect();

    let rows: Vec<ReconciliationRow> = keys
        .into_iter()
        .map(|material| {
            let demand = demand.get(material);
            let stock = stock.get(material);
            ReconciliationRow {
                material: material.clone(),
                demand,
                stock,
                balance: demand - stock,
            }
        })
        .collect();

    tracing::debug!(
        rows = rows.len(),
        shortfalls = rows.iter().filter(|r| r.is_shortfall()).count(),
        "对账完成"
    );

    rows
}

/// 需补货的物料（balance > 0），按缺口降序
pub fn shortfalls(rows: &[ReconciliationRow]) -> Vec<ReconciliationRow> {
    let mut result: Vec<ReconciliationRow> =
        rows.iter().filter(|r| r.is_shortfall()).cloned().collect();
    sort_by_balance_desc(&mut result);
    result
}

/// 按 balance 降序，同值按物料名升序
pub fn sort_by_balance_desc(rows: &mut [ReconciliationRow]) {
    rows.sort_by(|a, b| {
        b.balance
            .total_cmp(&a.balance)
            .then_with(|| a.material.cmp(&b.material))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn demand(items: &[(&str, f64)]) -> DemandTotal {
        DemandTotal {
            by_material: items.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    fn stock(items: &[(&str, f64)]) -> StockTotal {
        StockTotal {
            source_column: "19/nov".to_string(),
            by_material: items
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
            records: Vec::new(),
        }
    }

    #[test]
    fn test_shortfall_balance_is_positive() {
        let rows = reconcile(&demand(&[("PVC CRISTAL", 150.0)]), &stock(&[("PVC CRISTAL", 80.0)]));

        assert_eq!(
            rows,
            vec![ReconciliationRow {
                material: "PVC CRISTAL".to_string(),
                demand: 150.0,
                stock: 80.0,
                balance: 70.0,
            }]
        );
        assert!(rows[0].is_shortfall());
    }

    #[test]
    fn test_stock_only_material_is_negative() {
        let rows = reconcile(&demand(&[]), &stock(&[("XLPE", 40.0)]));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].demand, 0.0);
        assert_eq!(rows[0].stock, 40.0);
        assert_eq!(rows[0].balance, -40.0);
        assert!(!rows[0].is_shortfall());
    }

    #[test]
    fn test_row_count_is_key_union() {
        let d = demand(&[("PVC", 10.0), ("PEAD", 5.0), ("XLPE", 1.0)]);
        let s = stock(&[("PEAD", 8.0), ("PEBD", 3.0)]);

        let rows = reconcile(&d, &s);
        let materials: Vec<&str> = rows.iter().map(|r| r.material.as_str()).collect();

        assert_eq!(rows.len(), 4);
        assert_eq!(materials, vec!["PEAD", "PEBD", "PVC", "XLPE"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(reconcile(&demand(&[]), &stock(&[])).is_empty());
    }

    #[test]
    fn test_shortfalls_sorted_desc() {
        let d = demand(&[("PVC", 10.0), ("PEAD", 50.0), ("XLPE", 1.0)]);
        let s = stock(&[("PEAD", 8.0), ("XLPE", 5.0)]);

        let rows = reconcile(&d, &s);
        let result = shortfalls(&rows);
        let materials: Vec<&str> = result.iter().map(|r| r.material.as_str()).collect();

        assert_eq!(materials, vec!["PEAD", "PVC"]);
        assert_eq!(result[0].balance, 42.0);
    }
}
