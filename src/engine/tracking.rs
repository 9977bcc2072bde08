// ==========================================
// 聚合物需求看板 - 生产跟踪引擎
// ==========================================
// 输入: 跟踪工作簿，每月一个 "<月份>-<年份>" 工作表
// 输出: 铜/铝日产量与目标、按年月汇总
// 规则:
// 1. 日期无法解析的行丢弃
// 2. 数值无法解析按 0 计
// 3. 日序号按日期所在月份重新计数（行顺序）
// ==========================================

use crate::config::TrackingLayout;
use crate::domain::tracking::{MonthTotal, ProductionDay, TrackingSummary};
use crate::domain::types::Month;
use crate::engine::error::EngineResult;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::table::RawTable;
use chrono::Datelike;
use std::collections::{BTreeMap, HashMap};
use tracing::instrument;

/// 解析月度工作表名，如 "Novembro-2024" → (Novembro, 2024)
///
/// 其他工作表（汇总页、格式不符的名称）返回 None
pub fn parse_month_sheet(name: &str) -> Option<(Month, i32)> {
    let parts: Vec<&str> = name.split('-').map(str::trim).collect();
    let [month, year] = parts.as_slice() else {
        return None;
    };

    let month = Month::from_pt_name(month)?;
    if year.is_empty() || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year = year.parse::<i32>().ok()?;

    Some((month, year))
}

/// 加载单个月度工作表
#[instrument(skip(table, layout), fields(sheet = %table.sheet))]
pub fn load_tracking_sheet(
    table: &RawTable,
    layout: &TrackingLayout,
    month: Month,
    year: i32,
) -> EngineResult<Vec<ProductionDay>> {
    let cleaner = DataCleaner;
    let date_col = table.require_column(&layout.date_column)?;
    let copper_done_col = table.require_column(&layout.copper_done_column)?;
    let copper_target_col = table.require_column(&layout.copper_target_column)?;
    let aluminium_done_col = table.require_column(&layout.aluminium_done_column)?;
    let aluminium_target_col = table.require_column(&layout.aluminium_target_column)?;

    let mut day_counters: HashMap<(i32, u32), u32> = HashMap::new();
    let mut days = Vec::new();
    let mut dropped = 0usize;

    for row in 0..table.row_count() {
        let Some(date) = cleaner.parse_date(table.cell(row, date_col)) else {
            dropped += 1;
            continue;
        };

        let counter = day_counters.entry((date.year(), date.month())).or_insert(0);
        *counter += 1;

        days.push(ProductionDay {
            date,
            day_index: *counter,
            month,
            year,
            copper_done: cleaner.number_or_zero(table.cell(row, copper_done_col)),
            copper_target: cleaner.number_or_zero(table.cell(row, copper_target_col)),
            aluminium_done: cleaner.number_or_zero(table.cell(row, aluminium_done_col)),
            aluminium_target: cleaner.number_or_zero(table.cell(row, aluminium_target_col)),
        });
    }

    if dropped > 0 {
        tracing::debug!(dropped, "日期无法解析的行已丢弃");
    }

    Ok(days)
}

/// 按所选年份、月份筛选并汇总
///
/// 年份或月份任一为空 → 空汇总
pub fn summarize(days: &[ProductionDay], years: &[i32], months: &[Month]) -> TrackingSummary {
    if years.is_empty() || months.is_empty() {
        return TrackingSummary::default();
    }

    let selected: Vec<ProductionDay> = days
        .iter()
        .filter(|d| years.contains(&d.year) && months.contains(&d.month))
        .cloned()
        .collect();

    let mut grouped: BTreeMap<(i32, Month), (f64, f64)> = BTreeMap::new();
    for day in &selected {
        let entry = grouped.entry((day.year, day.month)).or_insert((0.0, 0.0));
        entry.0 += day.copper_done;
        entry.1 += day.aluminium_done;
    }

    TrackingSummary {
        copper_total: selected.iter().map(|d| d.copper_done).sum(),
        aluminium_total: selected.iter().map(|d| d.aluminium_done).sum(),
        by_month: grouped
            .into_iter()
            .map(|((year, month), (copper_done, aluminium_done))| MonthTotal {
                year,
                month,
                copper_done,
                aluminium_done,
            })
            .collect(),
        days: selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::table::Cell;
    use chrono::NaiveDate;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn header() -> Vec<Cell> {
        vec![
            text("Data"),
            text("Produção Cobre Realizado"),
            text("Meta/Dia Cobre"),
            text("Produção Alumínio Realizado"),
            text("Meta/Dia Alumínio"),
        ]
    }

    fn day(year: i32, month: Month, copper: f64, aluminium: f64) -> ProductionDay {
        ProductionDay {
            date: NaiveDate::from_ymd_opt(year, month.number(), 1).unwrap(),
            day_index: 1,
            month,
            year,
            copper_done: copper,
            copper_target: 0.0,
            aluminium_done: aluminium,
            aluminium_target: 0.0,
        }
    }

    #[test]
    fn test_parse_month_sheet() {
        assert_eq!(parse_month_sheet("Novembro-2024"), Some((Month::Novembro, 2024)));
        assert_eq!(parse_month_sheet(" Março - 2025 "), Some((Month::Marco, 2025)));
        assert_eq!(parse_month_sheet("Resumo"), None);
        assert_eq!(parse_month_sheet("Novembro-24a"), None);
        assert_eq!(parse_month_sheet("Novembro-2024-b"), None);
        assert_eq!(parse_month_sheet("novembro-2024"), None);
        assert_eq!(parse_month_sheet("Novembro-"), None);
    }

    #[test]
    fn test_load_sheet_drops_bad_dates_and_zeroes_bad_numbers() {
        let grid = vec![
            header(),
            vec![text("01/11/2024"), Cell::Number(10.0), Cell::Number(12.0), Cell::Number(3.0), Cell::Number(4.0)],
            vec![text("TOTAL"), Cell::Number(99.0), Cell::Empty, Cell::Empty, Cell::Empty],
            vec![Cell::Number(45615.0), text("x"), Cell::Number(12.0), text("2,5"), Cell::Empty],
        ];
        let table = RawTable::from_grid("Novembro-2024", grid, 0).unwrap();

        let days =
            load_tracking_sheet(&table, &TrackingLayout::default(), Month::Novembro, 2024).unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 11, 19).unwrap());
        assert_eq!(days[1].copper_done, 0.0);
        assert_eq!(days[1].aluminium_done, 2.5);
        assert_eq!(days[1].aluminium_target, 0.0);
        assert_eq!(days.iter().map(|d| d.day_index).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_day_index_restarts_per_month() {
        let grid = vec![
            header(),
            vec![text("30/10/2024"), Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty],
            vec![text("31/10/2024"), Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty],
            vec![text("01/11/2024"), Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty],
            vec![text("04/11/2024"), Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty],
        ];
        let table = RawTable::from_grid("Novembro-2024", grid, 0).unwrap();

        let days =
            load_tracking_sheet(&table, &TrackingLayout::default(), Month::Novembro, 2024).unwrap();
        let indexes: Vec<u32> = days.iter().map(|d| d.day_index).collect();

        assert_eq!(indexes, vec![1, 2, 1, 2]);
    }

    #[test]
    fn test_load_sheet_missing_column() {
        let grid = vec![vec![text("Data"), text("Cobre")]];
        let table = RawTable::from_grid("Novembro-2024", grid, 0).unwrap();

        assert!(load_tracking_sheet(&table, &TrackingLayout::default(), Month::Novembro, 2024).is_err());
    }

    #[test]
    fn test_summarize_groups_in_calendar_order() {
        let days = vec![
            day(2024, Month::Novembro, 10.0, 1.0),
            day(2024, Month::Outubro, 5.0, 2.0),
            day(2024, Month::Novembro, 20.0, 3.0),
            day(2023, Month::Novembro, 7.0, 7.0),
        ];

        let summary = summarize(&days, &[2024], &[Month::Outubro, Month::Novembro]);

        assert_eq!(summary.days.len(), 3);
        assert_eq!(summary.copper_total, 35.0);
        assert_eq!(summary.aluminium_total, 6.0);
        assert_eq!(summary.by_month.len(), 2);
        assert_eq!(summary.by_month[0].month, Month::Outubro);
        assert_eq!(summary.by_month[1].copper_done, 30.0);
        assert_eq!(summary.by_month[1].label(), "Novembro/2024");
    }

    #[test]
    fn test_summarize_empty_selection() {
        let days = vec![day(2024, Month::Novembro, 10.0, 1.0)];

        assert_eq!(summarize(&days, &[], &[Month::Novembro]), TrackingSummary::default());
        assert_eq!(summarize(&days, &[2024], &[]), TrackingSummary::default());
    }
}
