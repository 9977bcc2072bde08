// ==========================================
// 聚合物需求看板 - 数据清洗器
// ==========================================
// 职责: 数值强制转换 / 日期解析 / 日期表头识别
// 红线: 单个坏单元格不得导致整张报表失败
// ==========================================

use crate::importer::table::Cell;
use chrono::{Duration, NaiveDate};

// 葡萄牙语月份缩写（表头如 "19/nov"）
const PT_MONTH_ABBR: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

// Excel 序列日期的合法上限（9999-12-31）
const EXCEL_SERIAL_MAX: f64 = 2_958_465.0;

/// 文本数值的书写习惯
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    /// 未知来源：`1.5`、`1.500`（千分位）、`1.500,00` 均可
    Auto,
    /// pt-BR 导出（';' 分隔的 CSV）：'.' 只作千分位，',' 为小数点
    DecimalComma,
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// `1.500`、`12.345.678`：首组 1-3 位且不以 0 开头，其余每组 3 位
fn is_thousands_grouped(value: &str) -> bool {
    let mut groups = value.split('.');
    let head = groups.next().unwrap_or_default();
    if !is_digits(head) || head.len() > 3 || head.starts_with('0') {
        return false;
    }

    let mut tail = 0;
    for group in groups {
        if group.len() != 3 || !is_digits(group) {
            return false;
        }
        tail += 1;
    }
    tail > 0
}

fn finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub struct DataCleaner;

impl DataCleaner {
    /// 单元格 → 数值
    ///
    /// # 规则
    /// - Number: 原值（非有限值视为无法解析）
    /// - Text: 按 `NumberStyle::Auto` 解析（`1.500`、`10.000,50` 均为 pt-BR 写法）
    /// - 其他: None
    ///
    /// # 说明
    /// 返回 None 时由调用方决定按 0 处理还是丢弃该行
    pub fn coerce_number(&self, cell: &Cell) -> Option<f64> {
        match cell {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Text(s) => self.parse_number_str(s, NumberStyle::Auto),
            _ => None,
        }
    }

    /// 单元格 → 数值，无法解析按 0 处理
    pub fn number_or_zero(&self, cell: &Cell) -> f64 {
        match self.coerce_number(cell) {
            Some(v) => v,
            None => {
                if !cell.is_empty() {
                    tracing::debug!(cell = %cell, "非数值单元格按 0 处理");
                }
                0.0
            }
        }
    }

    /// 文本 → 数值
    ///
    /// # 规则
    /// - Auto: 形如 `1.500` 的分组数按千分位处理；否则先按普通格式，再按 pt-BR 格式
    /// - DecimalComma: 只接受 pt-BR 写法，`1.5` 这类文本返回 None
    pub fn parse_number_str(&self, value: &str, style: NumberStyle) -> Option<f64> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        match style {
            NumberStyle::DecimalComma => self.parse_decimal_comma(trimmed),
            NumberStyle::Auto => {
                let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
                if is_thousands_grouped(unsigned) {
                    return finite(&trimmed.replace('.', ""));
                }
                if let Some(v) = finite(trimmed) {
                    return Some(v);
                }
                if trimmed.contains(',') {
                    return self.parse_decimal_comma(trimmed);
                }
                None
            }
        }
    }

    // pt-BR: '.' 千分位，',' 小数点
    fn parse_decimal_comma(&self, value: &str) -> Option<f64> {
        let (int_part, frac_part) = match value.split_once(',') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (value, None),
        };
        let unsigned = int_part.strip_prefix('-').unwrap_or(int_part);
        let int_ok = is_digits(unsigned) || is_thousands_grouped(unsigned);
        let frac_ok = frac_part.map_or(true, is_digits);
        if !int_ok || !frac_ok {
            return None;
        }

        finite(&value.replace('.', "").replace(',', "."))
    }

    /// 单元格 → 日期（无法解析返回 None）
    pub fn parse_date(&self, cell: &Cell) -> Option<NaiveDate> {
        match cell {
            Cell::Date(d) => Some(*d),
            Cell::Number(n) => self.excel_serial_to_date(*n),
            Cell::Text(s) => self.parse_date_text(s),
            _ => None,
        }
    }

    fn parse_date_text(&self, value: &str) -> Option<NaiveDate> {
        let trimmed = value.trim();
        const FORMATS: [&str; 4] = ["%d/%m/%Y", "%Y-%m-%d", "%d/%m/%y", "%d-%m-%Y"];

        for fmt in FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
                return Some(d);
            }
        }

        // "2024-11-19 00:00:00" 一类的日期时间文本
        trimmed
            .split_whitespace()
            .next()
            .filter(|first| first.len() < trimmed.len())
            .and_then(|first| NaiveDate::parse_from_str(first, "%Y-%m-%d").ok())
    }

    /// Excel 序列日期（1900 日期系统）→ NaiveDate
    pub fn excel_serial_to_date(&self, serial: f64) -> Option<NaiveDate> {
        if !serial.is_finite() || serial < 1.0 || serial > EXCEL_SERIAL_MAX {
            return None;
        }
        let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
        base.checked_add_signed(Duration::days(serial.floor() as i64))
    }

    /// 判断表头是否为日期列
    ///
    /// # 支持
    /// - `19/nov`、`19-NOV`、`19/nov/2024`
    /// - `19/11`、`19/11/2024`、`19/11/24`
    /// - `2024-11-19`、`2024-11-19 00:00:00`
    pub fn looks_like_date_header(&self, header: &str) -> bool {
        let trimmed = header.trim();
        if trimmed.is_empty() {
            return false;
        }
        if self.parse_date_text(trimmed).is_some() {
            return true;
        }

        let parts: Vec<&str> = trimmed.split(['/', '-']).map(str::trim).collect();
        if parts.len() < 2 || parts.len() > 3 {
            return false;
        }

        let day_ok = parts[0]
            .parse::<u32>()
            .map(|d| (1..=31).contains(&d))
            .unwrap_or(false);
        if !day_ok {
            return false;
        }

        let month = parts[1].to_lowercase();
        let month_ok = PT_MONTH_ABBR.contains(&month.as_str())
            || month
                .parse::<u32>()
                .map(|m| (1..=12).contains(&m))
                .unwrap_or(false);
        let year_ok = parts
            .get(2)
            .map(|y| !y.is_empty() && y.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or(true);

        month_ok && year_ok
    }
}
