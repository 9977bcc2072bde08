// ==========================================
// 聚合物需求看板 - 数值与日期格式化
// ==========================================
// 说明: 格式通过参数显式传入，不修改任何进程级 locale 状态
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// NumberFormat - 数值显示格式
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub decimals: usize,
    pub decimal_separator: char,
    pub thousands_separator: Option<char>,
    pub divisor: f64, // 显示前先除以该值（如 1000 → 以千为单位）
}

impl NumberFormat {
    /// pt-BR: 10.000,00
    pub fn pt_br() -> Self {
        Self {
            decimals: 2,
            decimal_separator: ',',
            thousands_separator: Some('.'),
            divisor: 1.0,
        }
    }

    /// pt-BR，以千为单位: 10000 → 10,00
    pub fn pt_br_thousands() -> Self {
        Self {
            divisor: 1000.0,
            ..Self::pt_br()
        }
    }

    /// en: 10,000.00
    pub fn en() -> Self {
        Self {
            decimals: 2,
            decimal_separator: '.',
            thousands_separator: Some(','),
            divisor: 1.0,
        }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::pt_br()
    }
}

/// 按给定格式输出数值
///
/// # 示例
/// ```
/// use polymer_demand::format::{format_number, NumberFormat};
/// assert_eq!(format_number(10000.0, &NumberFormat::pt_br()), "10.000,00");
/// assert_eq!(format_number(-1234.5, &NumberFormat::en()), "-1,234.50");
/// ```
pub fn format_number(value: f64, format: &NumberFormat) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let divisor = if format.divisor == 0.0 { 1.0 } else { format.divisor };
    let scaled = value / divisor;
    let fixed = format!("{:.*}", format.decimals, scaled.abs());

    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            if let Some(sep) = format.thousands_separator {
                grouped.push(sep);
            }
        }
        grouped.push(ch);
    }

    // 舍入后为 0 时不显示负号
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let mut out = String::new();
    if scaled < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(format.decimal_separator);
        out.push_str(frac);
    }
    out
}

/// 日期输出为 dd/mm/yyyy
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
