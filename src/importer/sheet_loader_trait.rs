// ==========================================
// 聚合物需求看板 - 工作表加载 Trait
// ==========================================
// 职责: 定义工作表读取接口（不包含实现）
// 实现者: ExcelParser, CsvParser, UniversalFileParser
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::table::RawTable;
use std::path::Path;

// ==========================================
// SheetLoader Trait
// ==========================================
// 用途: 报表层通过此接口读取工作簿，便于测试替换
pub trait SheetLoader: Send + Sync {
    /// 列出工作簿中的工作表名称（按工作簿顺序）
    ///
    /// # 返回
    /// - Ok(Vec<String>): 工作表名称
    /// - Err: 文件不存在、格式不支持、解析失败
    fn sheet_names(&self, path: &Path) -> ImportResult<Vec<String>>;

    /// 读取单个工作表为 RawTable
    ///
    /// # 参数
    /// - path: 文件路径
    /// - sheet: 工作表名称
    /// - header_row: 表头所在行（0 基，绝对行号）
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 数据行
    /// - Err: FileNotFound / SheetNotFound / HeaderRowOutOfRange / 解析失败
    fn load_table(&self, path: &Path, sheet: &str, header_row: usize) -> ImportResult<RawTable>;
}
