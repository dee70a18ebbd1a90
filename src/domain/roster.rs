// ==========================================
// 无人机作业协调系统 - 名册数据集
// ==========================================
// 三张表一起加载、一起重置、一起导出
// ==========================================

use crate::domain::assignment::MissionIdCodec;
use crate::domain::{Drone, Mission, Pilot};
use serde::{Deserialize, Serialize};
use tracing::warn;

// 表名（CSV 文件名 / 工作表名 / 表格存储 sheet 名）
pub const PILOT_TABLE: &str = "pilot_roster";
pub const DRONE_TABLE: &str = "drone_fleet";
pub const MISSION_TABLE: &str = "missions";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterTables {
    pub pilots: Vec<Pilot>,
    pub drones: Vec<Drone>,
    pub missions: Vec<Mission>,
}

impl RosterTables {
    pub fn new(pilots: Vec<Pilot>, drones: Vec<Drone>, missions: Vec<Mission>) -> Self {
        Self {
            pilots,
            drones,
            missions,
        }
    }

    /// 将旧格式任务编号改写为规范编号
    ///
    /// # 返回
    /// - 改写的单元格数量
    pub fn normalize_mission_refs(&mut self, codec: &MissionIdCodec) -> usize {
        let mut rewritten = 0;
        for pilot in &mut self.pilots {
            if let Some(value) = codec.canonicalize_cell(pilot.current_assignment.as_deref()) {
                warn!(
                    pilot_id = %pilot.pilot_id,
                    from = ?pilot.current_assignment,
                    to = %value,
                    "旧格式任务编号已改写"
                );
                pilot.current_assignment = Some(value);
                rewritten += 1;
            }
        }
        for drone in &mut self.drones {
            if let Some(value) = codec.canonicalize_cell(drone.current_assignment.as_deref()) {
                warn!(
                    drone_id = %drone.drone_id,
                    from = ?drone.current_assignment,
                    to = %value,
                    "旧格式任务编号已改写"
                );
                drone.current_assignment = Some(value);
                rewritten += 1;
            }
        }
        rewritten
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PilotStatus;

    #[test]
    fn test_normalize_mission_refs() {
        let mut tables = RosterTables::default();
        tables.pilots.push(Pilot {
            pilot_id: "P001".to_string(),
            name: "Arjun".to_string(),
            skills: vec![],
            certifications: vec![],
            location: "Bangalore".to_string(),
            status: PilotStatus::Assigned,
            current_assignment: Some("Project-001".to_string()),
            available_from: None,
            daily_rate_inr: 5000,
        });
        let rewritten = tables.normalize_mission_refs(&MissionIdCodec::default());
        assert_eq!(rewritten, 1);
        assert_eq!(tables.pilots[0].current_assignment.as_deref(), Some("PRJ001"));
        assert_eq!(tables.normalize_mission_refs(&MissionIdCodec::default()), 0);
    }
}
