// ==========================================
// 聚合物需求看板 - 命令行入口
// ==========================================
// 用法:
//   polymer-demand [demanda|compostos|acompanhamento]
// 报表输出到 stdout，日志输出到 stderr
// ==========================================

use anyhow::{bail, Context};
use polymer_demand::api::{ApiError, CompoundDistribution, DemandReport, ReportApi, TrackingReport};
use polymer_demand::config::ConfigManager;
use polymer_demand::format::{format_date, format_number, NumberFormat};
use polymer_demand::i18n::{set_locale, t, t_with_args};
use polymer_demand::{logging, APP_NAME, VERSION};

/// 可选报表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Report {
    Demand,
    Compounds,
    Tracking,
}

impl Report {
    fn parse(name: &str) -> Option<Report> {
        match name.trim().to_lowercase().as_str() {
            "demanda" => Some(Report::Demand),
            "compostos" => Some(Report::Compounds),
            "acompanhamento" => Some(Report::Tracking),
            _ => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("{} v{}", APP_NAME, VERSION);

    let config = ConfigManager::load().context("配置加载失败")?;
    set_locale(&config.locale);

    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demanda".to_string());
    let Some(report) = Report::parse(&name) else {
        bail!(t_with_args("cli.unknown_report", &[("name", name.as_str())]));
    };

    let fmt = config.number_format.clone();
    let api = ReportApi::with_default_loader(config);

    let result = match report {
        Report::Demand => api.demand_report().map(|r| print_demand(&r, &fmt)),
        Report::Compounds => api.compound_distribution().map(|r| print_compounds(&r, &fmt)),
        Report::Tracking => api
            .available_periods()
            .and_then(|p| api.tracking_report(&p.years, &p.months))
            .map(|r| print_tracking(&r, &fmt)),
    };

    if let Err(err) = result {
        tracing::error!(error = %err, report = ?report, "报表生成失败");
        eprintln!("{}", err.user_message());
        return Err(report_failed(err));
    }

    Ok(())
}

fn report_failed(err: ApiError) -> anyhow::Error {
    anyhow::Error::new(err).context("报表生成失败")
}

fn print_title(key: &str) {
    let title = t(key);
    println!("{}", title);
    println!("{}", "=".repeat(title.chars().count()));
}

fn print_demand(report: &DemandReport, fmt: &NumberFormat) {
    print_title("title.demand");
    println!("{}: {}", t("common.stock_column"), report.stock_column);
    if let Some(hours) = report.total_hours {
        println!("{}: {}", t("common.total_hours"), format_number(hours, fmt));
    }
    println!();

    println!(
        "{:<24} {:>14} {:>14} {:>14}",
        t("common.material"),
        t("common.demand"),
        t("common.stock"),
        t("common.balance")
    );
    for row in &report.rows {
        println!(
            "{:<24} {:>14} {:>14} {:>14}",
            row.material,
            format_number(row.demand, fmt),
            format_number(row.stock, fmt),
            format_number(row.balance, fmt)
        );
    }

    println!();
    print_title("title.shortfalls");
    if report.shortfalls.is_empty() {
        println!("{}", t("common.no_data"));
    }
    for row in &report.shortfalls {
        println!("{:<24} {:>14}", row.material, format_number(row.balance, fmt));
    }

    for detail in &report.details {
        println!();
        println!("{} ({})", detail.material, format_number(detail.total, fmt));
        for color in &detail.colors {
            println!("  {:<22} {:>14}", color.label, format_number(color.value, fmt));
        }
    }
}

fn print_compounds(report: &CompoundDistribution, fmt: &NumberFormat) {
    print_title("title.compounds");
    if let Some(hours) = report.total_hours {
        println!("{}: {}", t("common.total_hours"), format_number(hours, fmt));
    }
    println!();

    for point in &report.distribution {
        println!("{:<24} {:>14}", point.label, format_number(point.value, fmt));
    }
    println!("{:<24} {:>14}", t("common.total"), format_number(report.total, fmt));
}

fn print_tracking(report: &TrackingReport, fmt: &NumberFormat) {
    print_title("title.tracking");
    if report.summary.days.is_empty() {
        println!("{}", t("common.no_data"));
        return;
    }

    println!(
        "{}: {}    {}: {}",
        t("common.copper"),
        format_number(report.summary.copper_total, fmt),
        t("common.aluminium"),
        format_number(report.summary.aluminium_total, fmt)
    );
    println!();

    println!(
        "{:<20} {:>14} {:>14}",
        t("common.period"),
        t("common.copper"),
        t("common.aluminium")
    );
    for month in &report.summary.by_month {
        println!(
            "{:<20} {:>14} {:>14}",
            month.label(),
            format_number(month.copper_done, fmt),
            format_number(month.aluminium_done, fmt)
        );
    }

    println!();
    for day in &report.summary.days {
        println!(
            "{} #{:<3} {:>14} / {:<14} {:>14} / {:<14}",
            format_date(day.date),
            day.day_index,
            format_number(day.copper_done, fmt),
            format_number(day.copper_target, fmt),
            format_number(day.aluminium_done, fmt),
            format_number(day.aluminium_target, fmt)
        );
    }
}
