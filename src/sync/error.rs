// ==========================================
// 无人机作业协调系统 - 表格同步错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Sheet store error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Sheet store lock failed: {0}")]
    Lock(String),

    #[error("Sheet '{0}' not found in store.")]
    SheetMissing(String),

    #[error("{id} not found in sheet '{sheet}'.")]
    RowMissing { sheet: String, id: String },

    #[error("Sheet store not configured.")]
    NotConfigured,
}

pub type SyncResult<T> = Result<T, SyncError>;
