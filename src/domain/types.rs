// ==========================================
// 聚合物需求看板 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 无法识别的物料/颜色统一记为该哨兵值
pub const UNDEFINED_KEY: &str = "INDEFINIDO";

// ==========================================
// 月份 (Month)
// ==========================================
// 生产跟踪工作簿按 "<月份>-<年份>" 命名工作表，月份为葡萄牙语全称
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    Janeiro,
    Fevereiro,
    Marco,
    Abril,
    Maio,
    Junho,
    Julho,
    Agosto,
    Setembro,
    Outubro,
    Novembro,
    Dezembro,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Janeiro,
        Month::Fevereiro,
        Month::Marco,
        Month::Abril,
        Month::Maio,
        Month::Junho,
        Month::Julho,
        Month::Agosto,
        Month::Setembro,
        Month::Outubro,
        Month::Novembro,
        Month::Dezembro,
    ];

    /// 葡萄牙语全称（区分大小写，与工作表命名一致）
    pub fn pt_name(&self) -> &'static str {
        match self {
            Month::Janeiro => "Janeiro",
            Month::Fevereiro => "Fevereiro",
            Month::Marco => "Março",
            Month::Abril => "Abril",
            Month::Maio => "Maio",
            Month::Junho => "Junho",
            Month::Julho => "Julho",
            Month::Agosto => "Agosto",
            Month::Setembro => "Setembro",
            Month::Outubro => "Outubro",
            Month::Novembro => "Novembro",
            Month::Dezembro => "Dezembro",
        }
    }

    pub fn from_pt_name(name: &str) -> Option<Month> {
        Month::ALL.into_iter().find(|m| m.pt_name() == name)
    }

    /// 1..=12
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    pub fn from_number(number: u32) -> Option<Month> {
        number
            .checked_sub(1)
            .and_then(|idx| Month::ALL.get(idx as usize).copied())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pt_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        assert_eq!(Month::from_pt_name("Março"), Some(Month::Marco));
        assert_eq!(Month::from_pt_name("novembro"), None);
        assert_eq!(Month::Dezembro.number(), 12);
        assert_eq!(Month::from_number(1), Some(Month::Janeiro));
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }
}
