// ==========================================
// 无人机作业协调系统 - 字段映射器实现
// ==========================================
// 职责: 原始行 → 领域记录（类型转换 + 校验）,以及领域记录 → 表格行（导出/同步）
// 列顺序固定: 表格同步按列号写状态与分派
// ==========================================

use crate::domain::assignment::normalize_assignment_cell;
use crate::domain::dates::parse_flexible_date;
use crate::domain::tags::split_tags;
use crate::domain::{
    Drone, DroneStatus, Mission, MissionPriority, Pilot, PilotStatus, WeatherForecast,
    DRONE_TABLE, MISSION_TABLE, PILOT_TABLE,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, RawTable};
use chrono::NaiveDate;
use std::collections::HashSet;

// ===== 列契约 =====
pub const PILOT_COLUMNS: [&str; 9] = [
    "pilot_id",
    "name",
    "skills",
    "certifications",
    "location",
    "status",
    "current_assignment",
    "available_from",
    "daily_rate_inr",
];

pub const DRONE_COLUMNS: [&str; 8] = [
    "drone_id",
    "model",
    "capabilities",
    "status",
    "location",
    "current_assignment",
    "maintenance_due",
    "weather_resistance",
];

pub const MISSION_COLUMNS: [&str; 10] = [
    "project_id",
    "client",
    "location",
    "required_skills",
    "required_certs",
    "start_date",
    "end_date",
    "priority",
    "mission_budget_inr",
    "weather_forecast",
];

// 1-based 列号（表格同步按此定位单元格）
pub const PILOT_STATUS_COL: usize = 6;
pub const PILOT_ASSIGNMENT_COL: usize = 7;
pub const DRONE_STATUS_COL: usize = 4;
pub const DRONE_ASSIGNMENT_COL: usize = 6;

pub struct FieldMapper;

impl FieldMapper {
    // ==========================================
    // 表级映射
    // ==========================================

    pub fn map_pilots(&self, table: &RawTable) -> ImportResult<Vec<Pilot>> {
        self.require_columns(PILOT_TABLE, table, &["pilot_id", "status"])?;
        let pilots = table
            .records
            .iter()
            .enumerate()
            .map(|(idx, row)| self.map_pilot(row, idx + 1))
            .collect::<ImportResult<Vec<_>>>()?;
        check_unique(PILOT_TABLE, pilots.iter().map(|p| p.pilot_id.as_str()))?;
        Ok(pilots)
    }

    pub fn map_drones(&self, table: &RawTable) -> ImportResult<Vec<Drone>> {
        self.require_columns(DRONE_TABLE, table, &["drone_id", "status"])?;
        let drones = table
            .records
            .iter()
            .enumerate()
            .map(|(idx, row)| self.map_drone(row, idx + 1))
            .collect::<ImportResult<Vec<_>>>()?;
        check_unique(DRONE_TABLE, drones.iter().map(|d| d.drone_id.as_str()))?;
        Ok(drones)
    }

    pub fn map_missions(&self, table: &RawTable) -> ImportResult<Vec<Mission>> {
        self.require_columns(MISSION_TABLE, table, &["project_id", "start_date", "end_date"])?;
        let missions = table
            .records
            .iter()
            .enumerate()
            .map(|(idx, row)| self.map_mission(row, idx + 1))
            .collect::<ImportResult<Vec<_>>>()?;
        check_unique(MISSION_TABLE, missions.iter().map(|m| m.project_id.as_str()))?;
        Ok(missions)
    }

    // ==========================================
    // 行级映射
    // ==========================================

    pub fn map_pilot(&self, row: &RawRecord, row_number: usize) -> ImportResult<Pilot> {
        let t = PILOT_TABLE;
        let status_raw = get(row, "status");
        let status = PilotStatus::parse(&status_raw).ok_or_else(|| ImportError::InvalidEnumValue {
            table: t.to_string(),
            row: row_number,
            field: "status".to_string(),
            value: status_raw.clone(),
        })?;

        Ok(Pilot {
            pilot_id: self.primary_key(t, row, "pilot_id", row_number)?,
            name: get(row, "name"),
            skills: split_tags(&get(row, "skills")),
            certifications: split_tags(&get(row, "certifications")),
            location: get(row, "location"),
            status,
            current_assignment: normalize_assignment_cell(row.get("current_assignment").map(String::as_str)),
            available_from: self.parse_optional_date(t, row, "available_from", row_number)?,
            daily_rate_inr: self.parse_amount(t, row, "daily_rate_inr", row_number)?,
        })
    }

    pub fn map_drone(&self, row: &RawRecord, row_number: usize) -> ImportResult<Drone> {
        let t = DRONE_TABLE;
        let status_raw = get(row, "status");
        let status = DroneStatus::parse(&status_raw).ok_or_else(|| ImportError::InvalidEnumValue {
            table: t.to_string(),
            row: row_number,
            field: "status".to_string(),
            value: status_raw.clone(),
        })?;

        Ok(Drone {
            drone_id: self.primary_key(t, row, "drone_id", row_number)?,
            model: get(row, "model"),
            capabilities: split_tags(&get(row, "capabilities")),
            status,
            location: get(row, "location"),
            current_assignment: normalize_assignment_cell(row.get("current_assignment").map(String::as_str)),
            maintenance_due: self.parse_optional_date(t, row, "maintenance_due", row_number)?,
            weather_resistance: get(row, "weather_resistance"),
        })
    }

    pub fn map_mission(&self, row: &RawRecord, row_number: usize) -> ImportResult<Mission> {
        let t = MISSION_TABLE;
        let priority_raw = get(row, "priority");
        let priority =
            MissionPriority::parse(&priority_raw).ok_or_else(|| ImportError::InvalidEnumValue {
                table: t.to_string(),
                row: row_number,
                field: "priority".to_string(),
                value: priority_raw.clone(),
            })?;

        let start_date = self.parse_required_date(t, row, "start_date", row_number)?;
        let end_date = self.parse_required_date(t, row, "end_date", row_number)?;
        if end_date < start_date {
            return Err(ImportError::InvalidDateRange {
                table: t.to_string(),
                row: row_number,
            });
        }

        Ok(Mission {
            project_id: self.primary_key(t, row, "project_id", row_number)?,
            client: get(row, "client"),
            location: get(row, "location"),
            required_skills: split_tags(&get(row, "required_skills")),
            required_certs: split_tags(&get(row, "required_certs")),
            start_date,
            end_date,
            priority,
            budget_inr: self.parse_amount(t, row, "mission_budget_inr", row_number)?,
            weather_forecast: WeatherForecast::parse(&get(row, "weather_forecast")),
        })
    }

    // ==========================================
    // 反向映射（导出 / 同步）
    // ==========================================

    pub fn pilot_to_row(&self, pilot: &Pilot) -> Vec<String> {
        vec![
            pilot.pilot_id.clone(),
            pilot.name.clone(),
            pilot.skills.join(", "),
            pilot.certifications.join(", "),
            pilot.location.clone(),
            pilot.status.to_string(),
            pilot.current_assignment.clone().unwrap_or_default(),
            format_date(pilot.available_from),
            pilot.daily_rate_inr.to_string(),
        ]
    }

    pub fn drone_to_row(&self, drone: &Drone) -> Vec<String> {
        vec![
            drone.drone_id.clone(),
            drone.model.clone(),
            drone.capabilities.join(", "),
            drone.status.to_string(),
            drone.location.clone(),
            drone.current_assignment.clone().unwrap_or_default(),
            format_date(drone.maintenance_due),
            drone.weather_resistance.clone(),
        ]
    }

    pub fn mission_to_row(&self, mission: &Mission) -> Vec<String> {
        vec![
            mission.project_id.clone(),
            mission.client.clone(),
            mission.location.clone(),
            mission.required_skills.join(", "),
            mission.required_certs.join(", "),
            mission.start_date.to_string(),
            mission.end_date.to_string(),
            mission.priority.to_string(),
            mission.budget_inr.to_string(),
            mission.weather_forecast.to_string(),
        ]
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn require_columns(&self, table: &str, raw: &RawTable, columns: &[&str]) -> ImportResult<()> {
        // 空表不强制表头
        if raw.records.is_empty() {
            return Ok(());
        }
        for column in columns {
            if !raw.headers.iter().any(|h| h == column) {
                return Err(ImportError::MissingColumn {
                    table: table.to_string(),
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }

    fn primary_key(
        &self,
        table: &str,
        row: &RawRecord,
        key: &str,
        row_number: usize,
    ) -> ImportResult<String> {
        let id = get(row, key);
        if id.is_empty() {
            return Err(ImportError::PrimaryKeyMissing {
                table: table.to_string(),
                row: row_number,
            });
        }
        Ok(id)
    }

    /// 解析金额（INR,必须为正）;允许 "5000.0" 这类 Excel 数值文本
    fn parse_amount(
        &self,
        table: &str,
        row: &RawRecord,
        key: &str,
        row_number: usize,
    ) -> ImportResult<u64> {
        let raw = get(row, key).replace(',', "");
        let conversion_error = |message: String| ImportError::TypeConversionError {
            table: table.to_string(),
            row: row_number,
            field: key.to_string(),
            message,
        };

        let amount = match raw.parse::<u64>() {
            Ok(v) => v,
            Err(_) => {
                let v: f64 = raw
                    .parse()
                    .map_err(|_| conversion_error(format!("'{}' is not a number", raw)))?;
                if v.fract() != 0.0 || v < 0.0 {
                    return Err(conversion_error(format!(
                        "'{}' is not a whole INR amount",
                        raw
                    )));
                }
                v as u64
            }
        };

        if amount == 0 {
            return Err(conversion_error("amount must be positive".to_string()));
        }
        Ok(amount)
    }

    fn parse_optional_date(
        &self,
        table: &str,
        row: &RawRecord,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<NaiveDate>> {
        let raw = get(row, key);
        if raw.is_empty() || raw == "-" {
            return Ok(None);
        }
        parse_flexible_date(&raw)
            .map(Some)
            .ok_or_else(|| ImportError::DateFormatError {
                table: table.to_string(),
                row: row_number,
                field: key.to_string(),
                value: raw,
            })
    }

    fn parse_required_date(
        &self,
        table: &str,
        row: &RawRecord,
        key: &str,
        row_number: usize,
    ) -> ImportResult<NaiveDate> {
        let raw = get(row, key);
        parse_flexible_date(&raw).ok_or_else(|| ImportError::DateFormatError {
            table: table.to_string(),
            row: row_number,
            field: key.to_string(),
            value: raw,
        })
    }
}

fn get(row: &RawRecord, key: &str) -> String {
    row.get(key).map(|v| v.trim().to_string()).unwrap_or_default()
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

fn check_unique<'a>(table: &str, ids: impl Iterator<Item = &'a str>) -> ImportResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ImportError::DuplicateId {
                table: table.to_string(),
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn pilot_row(id: &str) -> RawRecord {
        row(&[
            ("pilot_id", id),
            ("name", "Arjun"),
            ("skills", "Mapping, Survey"),
            ("certifications", "DGCA, Night Ops"),
            ("location", "Bangalore"),
            ("status", "On Leave"),
            ("current_assignment", "–"),
            ("available_from", "05/02/2026"),
            ("daily_rate_inr", "5000"),
        ])
    }

    #[test]
    fn test_map_pilot() {
        let pilot = FieldMapper.map_pilot(&pilot_row("P001"), 1).unwrap();
        assert_eq!(pilot.skills, vec!["Mapping", "Survey"]);
        assert_eq!(pilot.status, PilotStatus::OnLeave);
        assert_eq!(pilot.current_assignment, None);
        assert_eq!(pilot.available_from, NaiveDate::from_ymd_opt(2026, 2, 5));
        assert_eq!(pilot.daily_rate_inr, 5000);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let mut r = pilot_row("P001");
        r.insert("status".to_string(), "Vacation".to_string());
        let result = FieldMapper.map_pilot(&r, 3);
        assert!(matches!(result, Err(ImportError::InvalidEnumValue { row: 3, .. })));
    }

    #[test]
    fn test_amount_parsing() {
        let mut r = pilot_row("P001");
        r.insert("daily_rate_inr".to_string(), "4500.0".to_string());
        assert_eq!(FieldMapper.map_pilot(&r, 1).unwrap().daily_rate_inr, 4500);

        r.insert("daily_rate_inr".to_string(), "0".to_string());
        assert!(matches!(
            FieldMapper.map_pilot(&r, 1),
            Err(ImportError::TypeConversionError { .. })
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let table = RawTable {
            headers: PILOT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            records: vec![pilot_row("P001"), pilot_row("P001")],
        };
        let result = FieldMapper.map_pilots(&table);
        assert!(matches!(result, Err(ImportError::DuplicateId { .. })));
    }

    #[test]
    fn test_mission_date_range_checked() {
        let r = row(&[
            ("project_id", "PRJ001"),
            ("client", "Client A"),
            ("location", "Bangalore"),
            ("required_skills", "Mapping"),
            ("required_certs", ""),
            ("start_date", "2026-02-08"),
            ("end_date", "2026-02-06"),
            ("priority", "High"),
            ("mission_budget_inr", "20000"),
            ("weather_forecast", "Sunny"),
        ]);
        assert!(matches!(
            FieldMapper.map_mission(&r, 1),
            Err(ImportError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_row_column_order() {
        let pilot = FieldMapper.map_pilot(&pilot_row("P001"), 1).unwrap();
        let cells = FieldMapper.pilot_to_row(&pilot);
        assert_eq!(cells.len(), PILOT_COLUMNS.len());
        assert_eq!(cells[PILOT_STATUS_COL - 1], "On Leave");
        assert_eq!(cells[PILOT_ASSIGNMENT_COL - 1], "");
    }
}
