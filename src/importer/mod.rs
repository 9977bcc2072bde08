// ==========================================
// 聚合物需求看板 - 导入层
// ==========================================
// 职责: 外部工作簿读取，生成内部 RawTable
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod sheet_cache;
pub mod sheet_loader_trait;
pub mod table;

// 重导出核心类型
pub use data_cleaner::{DataCleaner, NumberStyle};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use sheet_cache::{TableCache, TableKey};
pub use sheet_loader_trait::SheetLoader;
pub use table::{Cell, RawTable};
