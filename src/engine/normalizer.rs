// ==========================================
// 聚合物需求看板 - 物料名称规范化
// ==========================================
// 规则:
// 1. TRIM + UPPER；空值 → INDEFINIDO
// 2. 别名表按键长降序扫描，首个子串命中即返回规范键
// 3. 未命中 → 原样返回大写值（未知物料自成一类，不丢弃）
// ==========================================

use crate::domain::types::UNDEFINED_KEY;
use serde::{Deserialize, Serialize};

/// 别名表条目：描述中出现 `alias` 即归入 `canonical`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub alias: String,
    pub canonical: String,
}

impl AliasEntry {
    pub fn new(alias: &str, canonical: &str) -> Self {
        Self {
            alias: alias.to_string(),
            canonical: canonical.to_string(),
        }
    }
}

// ==========================================
// AliasTable - 别名表
// ==========================================
// 内部按键长降序（同长按字典序）排列，"PVC CRISTAL" 总是先于 "PVC" 被检查
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasTable {
    entries: Vec<(String, String)>, // (大写别名, 大写规范键)
}

impl AliasTable {
    pub fn new(entries: &[AliasEntry]) -> Self {
        let mut entries: Vec<(String, String)> = entries
            .iter()
            .map(|e| (e.alias.trim().to_uppercase(), e.canonical.trim().to_uppercase()))
            .filter(|(alias, canonical)| !alias.is_empty() && !canonical.is_empty())
            .collect();

        entries.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(&b.0))
        });
        entries.dedup_by(|a, b| a.0 == b.0);

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 规范化物料名称（全函数，任何输入都返回非空键）
    pub fn normalize(&self, raw: &str) -> String {
        let upper = raw.trim().to_uppercase();
        if upper.is_empty() {
            return UNDEFINED_KEY.to_string();
        }

        self.entries
            .iter()
            .find(|(alias, _)| upper.contains(alias.as_str()))
            .map(|(_, canonical)| canonical.clone())
            .unwrap_or(upper)
    }
}
