// ==========================================
// 聚合物需求看板 - 原始表格模型
// ==========================================
// 职责: 工作表 → 矩形表格（表头 + 数据行）
// 红线: 列一律按名称查找，不按位置硬编码
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

// ==========================================
// Cell - 单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Cell {
    /// 空单元格或仅含空白的文本视为空
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 文本形式（去首尾空白）；空单元格返回 None
    pub fn as_text(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(self.to_string().trim().to_string())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Number(n) => {
                // 整数不带小数点，与表格显示一致
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Cell::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Cell::Date(d) => write!(f, "{}", d.format("%d/%m/%Y")),
        }
    }
}

// ==========================================
// RawTable - 已解析的工作表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawTable {
    pub sheet: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// 由完整网格构建表格
    ///
    /// # 参数
    /// - sheet: 工作表名称（用于错误信息）
    /// - grid: 从第 0 行开始的绝对网格
    /// - header_row: 表头所在行（0 基）
    ///
    /// # 规则
    /// - 表头去首尾空白；空表头记为 `Unnamed: {列号}`
    /// - 重名表头追加 `.1`、`.2` 后缀
    /// - 完全空白的数据行跳过
    /// - 短行以 Empty 补齐
    pub fn from_grid(sheet: &str, grid: Vec<Vec<Cell>>, header_row: usize) -> ImportResult<Self> {
        if header_row >= grid.len() {
            return Err(ImportError::HeaderRowOutOfRange {
                sheet: sheet.to_string(),
                header_row,
                row_count: grid.len(),
            });
        }

        let width = grid.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut grid = grid.into_iter().skip(header_row);
        let header_cells = grid.next().unwrap_or_default();

        let mut seen: HashMap<String, usize> = HashMap::new();
        let headers = (0..width)
            .map(|idx| {
                let base = header_cells
                    .get(idx)
                    .and_then(Cell::as_text)
                    .unwrap_or_else(|| format!("Unnamed: {}", idx));
                let count = seen.entry(base.clone()).or_insert(0);
                let name = if *count == 0 {
                    base
                } else {
                    format!("{}.{}", base, count)
                };
                *count += 1;
                name
            })
            .collect::<Vec<_>>();

        let rows = grid
            .filter(|row| !row.iter().all(Cell::is_empty))
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();

        Ok(Self {
            sheet: sheet.to_string(),
            headers,
            rows,
        })
    }

    /// 按名称查找列（忽略首尾空白）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.headers.iter().position(|h| h == wanted)
    }

    /// 按名称查找列，不存在时报错
    pub fn require_column(&self, name: &str) -> ImportResult<usize> {
        self.column_index(name)
            .ok_or_else(|| ImportError::ColumnNotFound {
                sheet: self.sheet.clone(),
                column: name.trim().to_string(),
            })
    }

    /// 读取单元格（越界返回 Empty）
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// 列中是否存在任一非空单元格
    pub fn column_has_values(&self, col: usize) -> bool {
        self.rows
            .iter()
            .any(|row| row.get(col).map(|c| !c.is_empty()).unwrap_or(false))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
