// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 生成 CSV 工作簿夹具、构建指向临时目录的配置
// ==========================================

#![allow(dead_code)]

use polymer_demand::config::{DashboardConfig, QuantityLayout};
use std::error::Error;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PRODUCTION_FILE: &str = "DATABASE.csv";
pub const STOCK_FILE: &str = "Estoque.csv";
pub const TRACKING_FILE: &str = "Novembro-2024.csv";

/// 写入 CSV 文件（允许行长度不一致）
pub fn write_csv(
    dir: &Path,
    name: &str,
    delimiter: u8,
    rows: &[Vec<&str>],
) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join(name);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(&path)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(path)
}

/// 生产计划 CSV：4 行抬头 + 表头（第 5 行）+ 数据
pub fn write_production(dir: &Path, rows: &[(&str, &str, &str)]) -> Result<PathBuf, Box<dyn Error>> {
    let mut grid: Vec<Vec<&str>> = vec![
        vec!["PROGRAMA DE EXTRUSÃO", "", ""],
        vec!["", "", ""],
        vec!["Semana 47", "", ""],
        vec!["", "", ""],
        vec!["DESCRIÇÃO", "PESO", "Tot Hrs"],
    ];
    grid.extend(rows.iter().map(|(d, p, h)| vec![*d, *p, *h]));
    write_csv(dir, PRODUCTION_FILE, b',', &grid)
}

/// 库存 CSV（';' 分隔）：1 行抬头 + 表头（第 2 行）+ 数据
pub fn write_stock(
    dir: &Path,
    dates: &[&str],
    rows: &[Vec<&str>],
) -> Result<PathBuf, Box<dyn Error>> {
    let mut header = vec!["Produto"];
    header.extend_from_slice(dates);

    let mut grid: Vec<Vec<&str>> = vec![vec!["Almoxarifado", "Compostos"], header];
    grid.extend(rows.iter().cloned());
    write_csv(dir, STOCK_FILE, b';', &grid)
}

/// 跟踪 CSV（单一月度工作表，名称取文件名）
pub fn write_tracking(dir: &Path, rows: &[Vec<&str>]) -> Result<PathBuf, Box<dyn Error>> {
    let mut grid: Vec<Vec<&str>> = vec![vec![
        "Data",
        "Produção Cobre Realizado",
        "Meta/Dia Cobre",
        "Produção Alumínio Realizado",
        "Meta/Dia Alumínio",
    ]];
    grid.extend(rows.iter().cloned());
    write_csv(dir, TRACKING_FILE, b',', &grid)
}

/// 指向临时目录内 CSV 夹具的配置
pub fn fixture_config(dir: &TempDir) -> DashboardConfig {
    let mut config = DashboardConfig::default();
    config.base_dir = dir.path().to_path_buf();
    config.production.path = PathBuf::from(PRODUCTION_FILE);
    config.production.quantities = QuantityLayout::Single {
        field: "PESO".to_string(),
    };
    config.stock.path = PathBuf::from(STOCK_FILE);
    config.tracking.path = PathBuf::from(TRACKING_FILE);
    config
}
