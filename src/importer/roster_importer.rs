// ==========================================
// 无人机作业协调系统 - 名册导入/导出
// ==========================================
// 数据源: CSV 目录（pilot_roster.csv / drone_fleet.csv / missions.csv）
//         或 Excel 工作簿（同名工作表）
//         或表格存储读出的 表头 + 行
// 导入完成后统一执行任务编号规范化
// ==========================================

use crate::domain::assignment::MissionIdCodec;
use crate::domain::{RosterTables, DRONE_TABLE, MISSION_TABLE, PILOT_TABLE};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{FieldMapper, DRONE_COLUMNS, MISSION_COLUMNS, PILOT_COLUMNS};
use crate::importer::file_parser::{CsvParser, ExcelParser, FileParser, RawTable};
use csv::WriterBuilder;
use std::path::Path;
use tracing::{info, instrument};

pub struct RosterImporter {
    mapper: FieldMapper,
    codec: MissionIdCodec,
}

impl RosterImporter {
    /// # 参数
    /// - codec: 任务编号双格式规则（用于加载后规范化）
    pub fn new(codec: MissionIdCodec) -> Self {
        Self {
            mapper: FieldMapper,
            codec,
        }
    }

    /// 从 CSV 目录加载三张表
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn load_csv_dir(&self, dir: &Path) -> ImportResult<RosterTables> {
        let parser = CsvParser;
        let pilots = parser.parse_table(&dir.join(format!("{}.csv", PILOT_TABLE)), PILOT_TABLE)?;
        let drones = parser.parse_table(&dir.join(format!("{}.csv", DRONE_TABLE)), DRONE_TABLE)?;
        let missions =
            parser.parse_table(&dir.join(format!("{}.csv", MISSION_TABLE)), MISSION_TABLE)?;
        self.build(pilots, drones, missions)
    }

    /// 从 Excel 工作簿加载三张表
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load_workbook(&self, path: &Path) -> ImportResult<RosterTables> {
        let parser = ExcelParser;
        let pilots = parser.parse_table(path, PILOT_TABLE)?;
        let drones = parser.parse_table(path, DRONE_TABLE)?;
        let missions = parser.parse_table(path, MISSION_TABLE)?;
        self.build(pilots, drones, missions)
    }

    /// 从已解析的原始表构建
    pub fn build(
        &self,
        pilots: RawTable,
        drones: RawTable,
        missions: RawTable,
    ) -> ImportResult<RosterTables> {
        let mut tables = RosterTables::new(
            self.mapper.map_pilots(&pilots)?,
            self.mapper.map_drones(&drones)?,
            self.mapper.map_missions(&missions)?,
        );
        let rewritten = tables.normalize_mission_refs(&self.codec);
        info!(
            pilots = tables.pilots.len(),
            drones = tables.drones.len(),
            missions = tables.missions.len(),
            rewritten,
            "名册加载完成"
        );
        Ok(tables)
    }

    // ==========================================
    // 导出
    // ==========================================

    /// 三张表的 表头 + 行（表格存储全量覆写使用）
    pub fn to_sheet_rows(&self, tables: &RosterTables) -> Vec<(&'static str, Vec<String>, Vec<Vec<String>>)> {
        vec![
            (
                PILOT_TABLE,
                header(&PILOT_COLUMNS),
                tables.pilots.iter().map(|p| self.mapper.pilot_to_row(p)).collect(),
            ),
            (
                DRONE_TABLE,
                header(&DRONE_COLUMNS),
                tables.drones.iter().map(|d| self.mapper.drone_to_row(d)).collect(),
            ),
            (
                MISSION_TABLE,
                header(&MISSION_COLUMNS),
                tables.missions.iter().map(|m| self.mapper.mission_to_row(m)).collect(),
            ),
        ]
    }

    /// 写出为 CSV 目录（与 load_csv_dir 互逆）
    #[instrument(skip(self, tables), fields(dir = %dir.display()))]
    pub fn export_csv_dir(&self, tables: &RosterTables, dir: &Path) -> ImportResult<()> {
        std::fs::create_dir_all(dir)?;
        for (name, headers, rows) in self.to_sheet_rows(tables) {
            let path = dir.join(format!("{}.csv", name));
            let mut writer = WriterBuilder::new().from_path(&path)?;
            writer.write_record(&headers)?;
            for row in rows {
                writer.write_record(&row)?;
            }
            writer.flush()?;
        }
        info!("名册已导出");
        Ok(())
    }
}

fn header(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}
