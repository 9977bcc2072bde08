// ==========================================
// 聚合物需求看板 - API层错误类型
// ==========================================
// 职责: 将导入层/引擎层/配置层错误转换为面向用户的报表错误
// 说明: 每个报表调用独立失败，错误不跨报表传播
// ==========================================

use crate::config::ConfigError;
use crate::engine::error::EngineError;
use crate::i18n::t_with_args;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 数据源错误
    // ==========================================
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    /// 工作表缺失、列缺失、表头行越界
    #[error("工作表或列缺失: {0}")]
    MissingSheetOrColumn(String),

    #[error("没有可用的库存日期列（已检查 {checked} 列）")]
    NoValidStockColumn { checked: usize, columns: Vec<String> },

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 本地化的用户提示（按当前 locale）
    pub fn user_message(&self) -> String {
        match self {
            ApiError::FileNotFound(path) => {
                t_with_args("report.file_not_found", &[("path", path.as_str())])
            }
            ApiError::MissingSheetOrColumn(detail) => {
                t_with_args("report.missing_sheet_or_column", &[("detail", detail.as_str())])
            }
            ApiError::NoValidStockColumn { checked, .. } => t_with_args(
                "report.no_valid_stock_column",
                &[("count", checked.to_string().as_str())],
            ),
            ApiError::InvalidInput(detail) => {
                t_with_args("report.invalid_input", &[("detail", detail.as_str())])
            }
            ApiError::InternalError(detail) => {
                t_with_args("report.internal_error", &[("detail", detail.as_str())])
            }
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(path) => ApiError::FileNotFound(path),
            ImportError::UnsupportedFormat(_) => ApiError::InvalidInput(err.to_string()),
            ImportError::SheetNotFound { .. }
            | ImportError::ColumnNotFound { .. }
            | ImportError::HeaderRowOutOfRange { .. } => {
                ApiError::MissingSheetOrColumn(err.to_string())
            }
            ImportError::FileReadError(_)
            | ImportError::ExcelParseError(_)
            | ImportError::CsvParseError(_) => ApiError::InternalError(err.to_string()),
        }
    }
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NoValidStockColumn { checked, columns } => {
                ApiError::NoValidStockColumn { checked, columns }
            }
            EngineError::Import(e) => e.into(),
        }
    }
}

// ==========================================
// 从 ConfigError 转换
// ==========================================
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
