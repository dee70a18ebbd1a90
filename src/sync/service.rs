// ==========================================
// 无人机作业协调系统 - 表格同步服务
// ==========================================
// 职责: 把单条写入与全量覆写镜像到表格存储;从表格存储拉取名册
// 红线: 同步失败只产生告警,永不阻塞引擎写入
// ==========================================

use crate::domain::{
    ResourceKind, RosterTables, DRONE_TABLE, MISSION_TABLE, PILOT_TABLE,
};
use crate::engine::MutationOutcome;
use crate::importer::field_mapper::{
    DRONE_ASSIGNMENT_COL, DRONE_STATUS_COL, PILOT_ASSIGNMENT_COL, PILOT_STATUS_COL,
};
use crate::importer::{ImportError, RawTable, RosterImporter};
use crate::sync::error::{SyncError, SyncResult};
use crate::sync::sheet_store::{CellUpdate, SheetSync};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// 同步结果（成功或告警,均为展示文本）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncNotice {
    Synced(String),
    Warning(String),
    Skipped,
}

impl SyncNotice {
    pub fn is_warning(&self) -> bool {
        matches!(self, SyncNotice::Warning(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SyncNotice::Synced(m) | SyncNotice::Warning(m) => Some(m),
            SyncNotice::Skipped => None,
        }
    }
}

/// 从表格存储拉取失败的原因
#[derive(Debug, thiserror::Error)]
pub enum PullError {
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error(transparent)]
    Import(#[from] ImportError),
}

pub struct SyncService {
    store: Option<Arc<dyn SheetSync>>,
}

impl SyncService {
    pub fn new(store: Option<Arc<dyn SheetSync>>) -> Self {
        Self { store }
    }

    /// 未配置存储的同步服务
    pub fn disabled() -> Self {
        Self { store: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// 镜像单条写入结果
    pub fn sync_mutation(&self, outcome: &MutationOutcome) -> SyncNotice {
        let store = match &self.store {
            Some(store) => store,
            None => return SyncNotice::Skipped,
        };

        let (sheet, status_col, assignment_col) = match outcome.resource_kind {
            ResourceKind::Pilot => (PILOT_TABLE, PILOT_STATUS_COL, PILOT_ASSIGNMENT_COL),
            ResourceKind::Drone => (DRONE_TABLE, DRONE_STATUS_COL, DRONE_ASSIGNMENT_COL),
        };
        let update = CellUpdate {
            sheet,
            id: &outcome.resource_id,
            status_col,
            status: &outcome.status,
            assignment_col,
            assignment: outcome.assignment.as_deref().unwrap_or(""),
        };

        match store.update_status_cells(&update) {
            Ok(row_no) => {
                info!(sheet, resource_id = %outcome.resource_id, row_no, "表格已同步");
                SyncNotice::Synced(format!("{} status synced to sheet.", outcome.resource_id))
            }
            Err(e) => {
                warn!(sheet, resource_id = %outcome.resource_id, error = %e, "表格同步失败");
                SyncNotice::Warning(format!("Sync failed: {}", e))
            }
        }
    }

    /// 全量覆写三张表
    pub fn push_all(&self, importer: &RosterImporter, tables: &RosterTables) -> Vec<SyncNotice> {
        let store = match &self.store {
            Some(store) => store,
            None => return vec![SyncNotice::Skipped],
        };

        importer
            .to_sheet_rows(tables)
            .into_iter()
            .map(|(sheet, headers, rows)| match store.write_sheet(sheet, &headers, &rows) {
                Ok(()) => {
                    info!(sheet, rows = rows.len(), "表格已覆写");
                    SyncNotice::Synced(format!("{} synced ({} rows).", sheet, rows.len()))
                }
                Err(e) => {
                    warn!(sheet, error = %e, "表格覆写失败");
                    SyncNotice::Warning(format!("Sync failed for {}: {}", sheet, e))
                }
            })
            .collect()
    }

    /// 从表格存储拉取名册
    pub fn pull_all(&self, importer: &RosterImporter) -> Result<RosterTables, PullError> {
        let store = self.store.as_ref().ok_or(SyncError::NotConfigured)?;
        let read = |sheet: &str| -> SyncResult<RawTable> {
            let data = store.read_sheet(sheet)?;
            Ok(RawTable::from_rows(data.headers, data.rows))
        };
        let pilots = read(PILOT_TABLE)?;
        let drones = read(DRONE_TABLE)?;
        let missions = read(MISSION_TABLE)?;
        Ok(importer.build(pilots, drones, missions)?)
    }
}
