// ==========================================
// 聚合物需求看板 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xlsm/.xlsb/.xls/.ods) / CSV (.csv)
// 说明: CSV 只有一个工作表，名称为文件名（不含扩展名）
// ==========================================

use crate::importer::data_cleaner::{DataCleaner, NumberStyle};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::sheet_loader_trait::SheetLoader;
use crate::importer::table::{Cell, RawTable};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const EXCEL_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    fn convert_cell(data: &Data) -> Cell {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => {
                // 默认按 1900 日期系统换算
                let serial = dt.as_f64();
                DataCleaner
                    .excel_serial_to_date(serial)
                    .map(Cell::Date)
                    .unwrap_or(Cell::Number(serial))
            }
            Data::DateTimeIso(s) => {
                let text = Cell::Text(s.clone());
                DataCleaner.parse_date(&text).map(Cell::Date).unwrap_or(text)
            }
            other => Cell::Text(other.to_string()),
        }
    }

    fn check_extension(path: &Path) -> ImportResult<()> {
        let ext = extension_of(path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }
        Ok(())
    }
}

impl SheetLoader for ExcelParser {
    fn sheet_names(&self, path: &Path) -> ImportResult<Vec<String>> {
        ensure_exists(path)?;
        Self::check_extension(path)?;

        let workbook = open_workbook_auto(path)?;
        Ok(workbook.sheet_names())
    }

    fn load_table(&self, path: &Path, sheet: &str, header_row: usize) -> ImportResult<RawTable> {
        ensure_exists(path)?;
        Self::check_extension(path)?;

        let mut workbook = open_workbook_auto(path)?;
        if !workbook.sheet_names().iter().any(|name| name == sheet) {
            return Err(ImportError::SheetNotFound {
                path: path.display().to_string(),
                sheet: sheet.to_string(),
            });
        }

        let range = workbook.worksheet_range(sheet)?;

        // Range 从第一个非空单元格开始，这里补齐为绝对坐标，保证 header_row 语义一致
        let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
        let mut grid: Vec<Vec<Cell>> = vec![Vec::new(); row_offset as usize];
        for data_row in range.rows() {
            let mut cells = vec![Cell::Empty; col_offset as usize];
            cells.extend(data_row.iter().map(Self::convert_cell));
            grid.push(cells);
        }

        tracing::debug!(
            path = %path.display(),
            sheet,
            header_row,
            grid_rows = grid.len(),
            "Excel 工作表读取完成"
        );

        RawTable::from_grid(sheet, grid, header_row)
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 根据首行判断分隔符（pt-BR 导出常用 ';'）
    ///
    /// 按字节统计，首行非 UTF-8（Windows-1252 导出）时同样有效
    fn sniff_delimiter(path: &Path) -> ImportResult<u8> {
        let mut first_line = Vec::new();
        let mut reader = BufReader::new(File::open(path)?);
        reader.read_until(b'\n', &mut first_line)?;

        let semicolons = first_line.iter().filter(|&&b| b == b';').count();
        let commas = first_line.iter().filter(|&&b| b == b',').count();
        Ok(if semicolons > commas { b';' } else { b',' })
    }

    /// ';' 分隔的文件按 pt-BR 数值书写解析
    fn number_style(delimiter: u8) -> NumberStyle {
        if delimiter == b';' {
            NumberStyle::DecimalComma
        } else {
            NumberStyle::Auto
        }
    }

    fn convert_field(field: &[u8], style: NumberStyle) -> Cell {
        let value = String::from_utf8_lossy(field);
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match DataCleaner.parse_number_str(trimmed, style) {
            Some(n) => Cell::Number(n),
            None => Cell::Text(trimmed.to_string()),
        }
    }

    fn check_extension(path: &Path) -> ImportResult<()> {
        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }
        Ok(())
    }
}

impl SheetLoader for CsvParser {
    fn sheet_names(&self, path: &Path) -> ImportResult<Vec<String>> {
        ensure_exists(path)?;
        Self::check_extension(path)?;

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(vec![stem])
    }

    fn load_table(&self, path: &Path, sheet: &str, header_row: usize) -> ImportResult<RawTable> {
        ensure_exists(path)?;
        Self::check_extension(path)?;

        let delimiter = Self::sniff_delimiter(path)?;
        let style = Self::number_style(delimiter);
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .delimiter(delimiter)
            .from_reader(file);

        let mut grid = Vec::new();
        for result in reader.byte_records() {
            let record = result?;
            grid.push(
                record
                    .iter()
                    .map(|field| Self::convert_field(field, style))
                    .collect::<Vec<_>>(),
            );
        }

        RawTable::from_grid(sheet, grid, header_row)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    fn dispatch(&self, path: &Path) -> ImportResult<&'static dyn SheetLoader> {
        let ext = extension_of(path);
        match ext.as_str() {
            "csv" => Ok(&CsvParser),
            e if EXCEL_EXTENSIONS.contains(&e) => Ok(&ExcelParser),
            _ => {
                ensure_exists(path)?;
                Err(ImportError::UnsupportedFormat(ext))
            }
        }
    }
}

impl SheetLoader for UniversalFileParser {
    fn sheet_names(&self, path: &Path) -> ImportResult<Vec<String>> {
        self.dispatch(path)?.sheet_names(path)
    }

    fn load_table(&self, path: &Path, sheet: &str, header_row: usize) -> ImportResult<RawTable> {
        self.dispatch(path)?.load_table(path, sheet, header_row)
    }
}
