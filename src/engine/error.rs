// ==========================================
// 聚合物需求看板 - 引擎层错误类型
// ==========================================

use crate::importer::error::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// 所有日期列均为空，无法确定当前库存
    #[error("没有可用的库存日期列（已检查 {checked} 列: {columns:?}）")]
    NoValidStockColumn { checked: usize, columns: Vec<String> },

    /// 列缺失 / 表头越界等表结构问题
    #[error(transparent)]
    Import(#[from] ImportError),
}

pub type EngineResult<T> = Result<T, EngineError>;
