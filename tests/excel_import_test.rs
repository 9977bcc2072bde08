// ==========================================
// 聚合物需求看板 - Excel 导入集成测试
// ==========================================
// 测试目标: 真实 .xlsx 工作簿 → ExcelParser → ReportApi
// 夹具: rust_xlsxwriter 在临时目录中生成
// ==========================================

mod test_helpers;

use chrono::NaiveDate;
use polymer_demand::api::ReportApi;
use polymer_demand::importer::{Cell, ExcelParser, SheetLoader};
use rust_xlsxwriter::{Format, Workbook};
use std::error::Error;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use test_helpers::{fixture_config, write_production};

const STOCK_XLSX: &str = "Estoque.xlsx";

/// 库存工作簿：前两行空白、A 列空白，抬头在 B3，表头在第 4 行（0 基 3）
///
/// 日期表头写为带日期格式的序列值，20/11 列没有数据
fn write_stock_xlsx(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join(STOCK_XLSX);
    let date_format = Format::new().set_num_format("dd/mm/yyyy");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet().set_name("Folha1")?;

    worksheet.write_string(2, 1, "Almoxarifado")?;
    worksheet.write_string(3, 1, "Produto")?;
    // 18/11/2024、19/11/2024、20/11/2024
    worksheet.write_number_with_format(3, 2, 45614.0, &date_format)?;
    worksheet.write_number_with_format(3, 3, 45615.0, &date_format)?;
    worksheet.write_number_with_format(3, 4, 45616.0, &date_format)?;

    worksheet.write_string(4, 1, "PVC CRISTAL")?;
    worksheet.write_number(4, 2, 90.0)?;
    worksheet.write_number(4, 3, 80.0)?;
    worksheet.write_string(5, 1, "PEAD")?;
    worksheet.write_number(5, 2, 15.0)?;
    worksheet.write_number(5, 3, 12.0)?;

    workbook.save(&path)?;
    Ok(path)
}

#[test]
fn test_excel_header_row_is_absolute() {
    let dir = TempDir::new().unwrap();
    let path = write_stock_xlsx(dir.path()).unwrap();

    assert_eq!(ExcelParser.sheet_names(&path).unwrap(), vec!["Folha1"]);

    let table = ExcelParser.load_table(&path, "Folha1", 3).unwrap();

    // 左侧空白列补齐为 Unnamed，日期表头按日期显示
    assert_eq!(
        table.headers,
        vec!["Unnamed: 0", "Produto", "18/11/2024", "19/11/2024", "20/11/2024"]
    );
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0][1], Cell::Text("PVC CRISTAL".to_string()));
    assert_eq!(table.rows[0][3], Cell::Number(80.0));
    assert_eq!(table.rows[1][4], Cell::Empty);
}

#[test]
fn test_excel_date_header_cells_are_dates() {
    let dir = TempDir::new().unwrap();
    let path = write_stock_xlsx(dir.path()).unwrap();

    // 表头行作为数据行读取，检查日期单元格类型
    let table = ExcelParser.load_table(&path, "Folha1", 2).unwrap();

    assert_eq!(
        table.rows[0][2],
        Cell::Date(NaiveDate::from_ymd_opt(2024, 11, 18).unwrap())
    );
    assert_eq!(
        table.rows[0][3],
        Cell::Date(NaiveDate::from_ymd_opt(2024, 11, 19).unwrap())
    );
}

#[test]
fn test_demand_report_with_excel_stock() {
    let dir = TempDir::new().unwrap();
    write_production(dir.path(), &[("PVC CRISTAL-AZUL", "150", "1")]).unwrap();
    write_stock_xlsx(dir.path()).unwrap();

    let mut config = fixture_config(&dir);
    config.stock.path = PathBuf::from(STOCK_XLSX);
    config.stock.header_row = 3;
    let api = ReportApi::with_default_loader(config);

    let report = api.demand_report().expect("对账报表生成失败");

    // 日期表头自动识别，20/11 为空，取 19/11
    assert_eq!(report.stock_column, "19/11/2024");
    let pvc = report
        .rows
        .iter()
        .find(|r| r.material == "PVC CRISTAL")
        .expect("缺少 PVC CRISTAL 行");
    assert_eq!(pvc.stock, 80.0);
    assert_eq!(pvc.balance, 70.0);
}
