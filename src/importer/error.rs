// ==========================================
// 聚合物需求看板 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 所有导入错误对单个报表是致命的，不做重试
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xlsm/.xlsb/.xls/.ods/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 表结构错误 =====
    #[error("工作表不存在: {sheet}（文件 {path}）")]
    SheetNotFound { path: String, sheet: String },

    #[error("列不存在: {column}（工作表 {sheet}）")]
    ColumnNotFound { sheet: String, column: String },

    #[error("表头行越界: header_row={header_row}, 总行数={row_count}（工作表 {sheet}）")]
    HeaderRowOutOfRange {
        sheet: String,
        header_row: usize,
        row_count: usize,
    },
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
