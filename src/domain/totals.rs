// ==========================================
// 聚合物需求看板 - 汇总与对账结果
// ==========================================
// 说明: 所有映射使用 BTreeMap，保证输出顺序确定
// ==========================================

use crate::domain::material::StockRecord;
use serde::Serialize;
use std::collections::BTreeMap;

// ==========================================
// DemandTotal - 物料需求合计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DemandTotal {
    pub by_material: BTreeMap<String, f64>,
}

impl DemandTotal {
    pub fn get(&self, material: &str) -> f64 {
        self.by_material.get(material).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.by_material.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.by_material.values().sum()
    }
}

// ==========================================
// ColorBreakdown - 物料 × 颜色需求明细
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColorBreakdown {
    pub by_material: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ColorBreakdown {
    pub fn add(&mut self, material: &str, color: &str, quantity: f64) {
        *self
            .by_material
            .entry(material.to_string())
            .or_default()
            .entry(color.to_string())
            .or_insert(0.0) += quantity;
    }

    /// 某物料的颜色明细，按需求量降序（同量按颜色名升序）
    pub fn colors_for(&self, material: &str) -> Vec<(String, f64)> {
        let mut colors: Vec<(String, f64)> = self
            .by_material
            .get(material)
            .map(|m| m.iter().map(|(c, q)| (c.clone(), *q)).collect())
            .unwrap_or_default();
        sort_desc(&mut colors);
        colors
    }

    pub fn get(&self, material: &str, color: &str) -> f64 {
        self.by_material
            .get(material)
            .and_then(|m| m.get(color))
            .copied()
            .unwrap_or(0.0)
    }

    /// 由颜色明细派生物料合计
    pub fn material_totals(&self) -> DemandTotal {
        DemandTotal {
            by_material: self
                .by_material
                .iter()
                .map(|(material, colors)| (material.clone(), colors.values().sum()))
                .collect(),
        }
    }
}

// ==========================================
// DemandSummary - 需求聚合结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DemandSummary {
    pub totals: DemandTotal,
    pub by_color: ColorBreakdown,
}

impl DemandSummary {
    /// 物料需求分布（饼图），按需求量降序
    pub fn distribution(&self) -> Vec<(String, f64)> {
        let mut items: Vec<(String, f64)> = self
            .totals
            .by_material
            .iter()
            .map(|(m, q)| (m.clone(), *q))
            .collect();
        sort_desc(&mut items);
        items
    }
}

// ==========================================
// StockTotal - 物料库存合计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StockTotal {
    pub source_column: String, // 选定的库存快照日期列
    pub by_material: BTreeMap<String, f64>,
    pub records: Vec<StockRecord>,
}

impl StockTotal {
    pub fn get(&self, material: &str) -> f64 {
        self.by_material.get(material).copied().unwrap_or(0.0)
    }
}

// ==========================================
// ReconciliationRow - 对账行
// ==========================================
// 口径: balance = demand - stock
// - 正数: 缺口（需采购）
// - 负数: 富余
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationRow {
    pub material: String,
    pub demand: f64,
    pub stock: f64,
    pub balance: f64,
}

impl ReconciliationRow {
    pub fn is_shortfall(&self) -> bool {
        self.balance > 0.0
    }
}

fn sort_desc(items: &mut [(String, f64)]) {
    items.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_breakdown_derives_totals() {
        let mut breakdown = ColorBreakdown::default();
        breakdown.add("PVC CRISTAL", "AZUL", 100.0);
        breakdown.add("PVC CRISTAL", "VERDE", 50.0);
        breakdown.add("PVC CRISTAL", "AZUL", 10.0);
        breakdown.add("PE", "PRETO", 5.0);

        let totals = breakdown.material_totals();
        assert_eq!(totals.get("PVC CRISTAL"), 160.0);
        assert_eq!(totals.get("PE"), 5.0);
        assert_eq!(totals.get("XLPE"), 0.0);
        assert_eq!(breakdown.get("PVC CRISTAL", "AZUL"), 110.0);
    }

    #[test]
    fn test_colors_for_sorted_desc() {
        let mut breakdown = ColorBreakdown::default();
        breakdown.add("PVC", "AZUL", 10.0);
        breakdown.add("PVC", "VERDE", 30.0);
        breakdown.add("PVC", "BRANCO", 10.0);

        let colors = breakdown.colors_for("PVC");
        assert_eq!(
            colors,
            vec![
                ("VERDE".to_string(), 30.0),
                ("AZUL".to_string(), 10.0),
                ("BRANCO".to_string(), 10.0),
            ]
        );
        assert!(breakdown.colors_for("PE").is_empty());
    }
}
