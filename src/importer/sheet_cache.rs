// ==========================================
// 聚合物需求看板 - 工作表缓存
// ==========================================
// 职责: 按 (路径, 工作表, 表头行) 缓存已解析的 RawTable
// 说明: 不检测文件变化；只能通过 invalidate / clear 显式失效
// 并发: 加载在锁外执行，重复加载直接覆盖（结果相同，幂等）
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::sheet_loader_trait::SheetLoader;
use crate::importer::table::RawTable;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// 缓存键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableKey {
    pub path: PathBuf,
    pub sheet: String,
    pub header_row: usize,
}

impl TableKey {
    pub fn new(path: impl Into<PathBuf>, sheet: &str, header_row: usize) -> Self {
        Self {
            path: path.into(),
            sheet: sheet.to_string(),
            header_row,
        }
    }
}

#[derive(Default)]
pub struct TableCache {
    entries: Mutex<HashMap<TableKey, Arc<RawTable>>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 命中缓存直接返回，否则通过 loader 加载并写入
    ///
    /// 加载失败不写缓存，下次请求会重新尝试读取文件
    pub fn get_or_load(
        &self,
        loader: &dyn SheetLoader,
        path: &Path,
        sheet: &str,
        header_row: usize,
    ) -> ImportResult<Arc<RawTable>> {
        let key = TableKey::new(path, sheet, header_row);

        if let Some(table) = self.get(&key) {
            tracing::debug!(path = %path.display(), sheet, header_row, "工作表缓存命中");
            return Ok(table);
        }

        let table = Arc::new(loader.load_table(path, sheet, header_row)?);
        tracing::debug!(
            path = %path.display(),
            sheet,
            header_row,
            rows = table.row_count(),
            "工作表已加载并缓存"
        );

        self.lock_entries().insert(key, Arc::clone(&table));
        Ok(table)
    }

    pub fn get(&self, key: &TableKey) -> Option<Arc<RawTable>> {
        self.lock_entries().get(key).cloned()
    }

    /// 使单个条目失效；返回是否存在该条目
    pub fn invalidate(&self, key: &TableKey) -> bool {
        self.lock_entries().remove(key).is_some()
    }

    /// 清空所有条目
    pub fn clear(&self) {
        self.lock_entries().clear();
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<TableKey, Arc<RawTable>>> {
        // 条目均为不可变 Arc，锁中毒时数据依然有效
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
