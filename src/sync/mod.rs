// ==========================================
// 无人机作业协调系统 - 表格同步层
// ==========================================
// 职责: 名册与持久化表格存储之间的双向同步
// 红线: 外部失败在此层转换为告警
// ==========================================

pub mod error;
pub mod service;
pub mod sheet_store;

pub use error::{SyncError, SyncResult};
pub use service::{PullError, SyncNotice, SyncService};
pub use sheet_store::{CellUpdate, SheetData, SheetSync, SqliteSheetStore};
