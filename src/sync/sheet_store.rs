// ==========================================
// 无人机作业协调系统 - 表格存储
// ==========================================
// 存储模型: sheet_cell(sheet, row_no, col_no, value)
// - row_no = 1 为表头,数据行从 2 开始
// - col_no 为 1-based 列号
// 红线: 存储层不做业务校验,只做单元格映射
// ==========================================

use crate::sync::error::{SyncError, SyncResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// 表格内容: 表头 + 数据行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// 单行状态/分派单元格更新
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate<'a> {
    pub sheet: &'a str,
    /// 第 1 列的值（资源编号）
    pub id: &'a str,
    pub status_col: usize,
    pub status: &'a str,
    pub assignment_col: usize,
    pub assignment: &'a str,
}

// ==========================================
// SheetSync Trait
// ==========================================
pub trait SheetSync: Send + Sync {
    /// 读取整张表
    fn read_sheet(&self, sheet: &str) -> SyncResult<SheetData>;

    /// 全量覆写整张表
    fn write_sheet(&self, sheet: &str, headers: &[String], rows: &[Vec<String>]) -> SyncResult<()>;

    /// 按第 1 列定位行,更新状态与分派单元格
    ///
    /// # 返回
    /// - Ok(row_no): 被更新的行号
    /// - Err(RowMissing): 表中无该编号
    fn update_status_cells(&self, update: &CellUpdate<'_>) -> SyncResult<usize>;
}

// ==========================================
// SqliteSheetStore
// ==========================================
pub struct SqliteSheetStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSheetStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> SyncResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| SyncError::Lock(e.to_string()))
    }
}

impl SheetSync for SqliteSheetStore {
    fn read_sheet(&self, sheet: &str) -> SyncResult<SheetData> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT row_no, col_no, value FROM sheet_cell WHERE sheet = ?1 ORDER BY row_no, col_no",
        )?;
        let cells = stmt
            .query_map(params![sheet], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if cells.is_empty() {
            return Err(SyncError::SheetMissing(sheet.to_string()));
        }

        let width = cells.iter().map(|(_, col, _)| *col).max().unwrap_or(0) as usize;
        let mut grid: BTreeMap<i64, Vec<String>> = BTreeMap::new();
        for (row_no, col_no, value) in cells {
            let row = grid
                .entry(row_no)
                .or_insert_with(|| vec![String::new(); width]);
            if let Some(slot) = (col_no as usize).checked_sub(1).and_then(|i| row.get_mut(i)) {
                *slot = value;
            }
        }

        let mut rows = grid.into_iter();
        let headers = match rows.next() {
            Some((1, headers)) => headers,
            _ => return Err(SyncError::SheetMissing(sheet.to_string())),
        };
        Ok(SheetData {
            headers,
            rows: rows.map(|(_, row)| row).collect(),
        })
    }

    fn write_sheet(&self, sheet: &str, headers: &[String], rows: &[Vec<String>]) -> SyncResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM sheet_cell WHERE sheet = ?1", params![sheet])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO sheet_cell (sheet, row_no, col_no, value) VALUES (?1, ?2, ?3, ?4)",
            )?;
            let all_rows = std::iter::once(headers).chain(rows.iter().map(Vec::as_slice));
            for (row_idx, row) in all_rows.enumerate() {
                for (col_idx, value) in row.iter().enumerate() {
                    stmt.execute(params![
                        sheet,
                        (row_idx + 1) as i64,
                        (col_idx + 1) as i64,
                        value
                    ])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn update_status_cells(&self, update: &CellUpdate<'_>) -> SyncResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let row_no: Option<i64> = tx
            .query_row(
                "SELECT row_no FROM sheet_cell WHERE sheet = ?1 AND col_no = 1 AND row_no > 1 AND value = ?2 ORDER BY row_no LIMIT 1",
                params![update.sheet, update.id],
                |row| row.get(0),
            )
            .optional()?;
        let row_no = row_no.ok_or_else(|| SyncError::RowMissing {
            sheet: update.sheet.to_string(),
            id: update.id.to_string(),
        })?;

        for (col, value) in [
            (update.status_col, update.status),
            (update.assignment_col, update.assignment),
        ] {
            tx.execute(
                "INSERT INTO sheet_cell (sheet, row_no, col_no, value) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(sheet, row_no, col_no) DO UPDATE SET value = excluded.value",
                params![update.sheet, row_no, col as i64, value],
            )?;
        }
        tx.commit()?;
        Ok(row_no as usize)
    }
}
