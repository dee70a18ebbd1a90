// ==========================================
// 无人机作业协调系统 - 名册写入
// ==========================================
// 职责: 状态更新 + 任务派工
// 红线: 校验通过后一次性写入;校验失败不改动任何字段
// ==========================================
// 状态/分派一致性（唯一校验入口 resolve_assignment）:
// - Assigned    → 必须有分派值
// - Available   → 清空分派值
// - 其他状态    → 保留分派值,由冲突检测暴露缺口
// ==========================================

use crate::domain::assignment::normalize_assignment_cell;
use crate::domain::{Drone, DroneStatus, Mission, Pilot, PilotStatus, ResourceKind};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::lookup::{find_drone_mut, find_mission, find_pilot_mut};
use serde::{Deserialize, Serialize};
use tracing::info;

/// 写入结果（供日志、表格同步与界面确认使用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationOutcome {
    pub message: String,
    pub resource_kind: ResourceKind,
    pub resource_id: String,
    pub status: String,
    pub assignment: Option<String>,
}

/// 计算新状态下的分派值
///
/// # 参数
/// - assigned: 新状态是否为 Assigned
/// - available: 新状态是否为 Available
/// - current: 现有分派值
/// - requested: 本次显式给出的分派值（派工时）
pub fn resolve_assignment(
    assigned: bool,
    available: bool,
    current: Option<&str>,
    requested: Option<&str>,
) -> EngineResult<Option<String>> {
    let current = normalize_assignment_cell(current);
    let requested = normalize_assignment_cell(requested);
    if assigned {
        return requested.or(current).map(Some).ok_or_else(|| {
            EngineError::InvalidArgument(
                "Status 'Assigned' requires a mission; use assign instead.".to_string(),
            )
        });
    }
    if available {
        return Ok(None);
    }
    Ok(requested.or(current))
}

pub struct RosterMutator;

impl RosterMutator {
    /// 更新飞手状态
    ///
    /// # 错误
    /// - InvalidArgument: 状态值不在封闭枚举内,或 Assigned 缺少分派
    /// - NotFound: 飞手编号不存在
    pub fn update_pilot_status(
        pilots: &mut [Pilot],
        pilot_id: &str,
        new_status: &str,
    ) -> EngineResult<MutationOutcome> {
        let status = PilotStatus::parse(new_status).ok_or_else(|| {
            EngineError::InvalidArgument(invalid_status_message(
                new_status,
                &PilotStatus::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            ))
        })?;
        let pilot = find_pilot_mut(pilots, pilot_id)?;
        let assignment = resolve_assignment(
            status == PilotStatus::Assigned,
            status == PilotStatus::Available,
            pilot.current_assignment.as_deref(),
            None,
        )?;

        pilot.status = status;
        pilot.current_assignment = assignment;
        info!(pilot_id = %pilot.pilot_id, status = %status, "飞手状态已更新");

        Ok(MutationOutcome {
            message: format!(
                "{} ({}) status updated to '{}'.",
                pilot.name, pilot.pilot_id, status
            ),
            resource_kind: ResourceKind::Pilot,
            resource_id: pilot.pilot_id.clone(),
            status: status.to_string(),
            assignment: pilot.current_assignment.clone(),
        })
    }

    /// 更新无人机状态
    pub fn update_drone_status(
        drones: &mut [Drone],
        drone_id: &str,
        new_status: &str,
    ) -> EngineResult<MutationOutcome> {
        let status = DroneStatus::parse(new_status).ok_or_else(|| {
            EngineError::InvalidArgument(invalid_status_message(
                new_status,
                &DroneStatus::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            ))
        })?;
        let drone = find_drone_mut(drones, drone_id)?;
        let assignment = resolve_assignment(
            status == DroneStatus::Assigned,
            status == DroneStatus::Available,
            drone.current_assignment.as_deref(),
            None,
        )?;

        drone.status = status;
        drone.current_assignment = assignment;
        info!(drone_id = %drone.drone_id, status = %status, "无人机状态已更新");

        Ok(MutationOutcome {
            message: format!(
                "{} ({}) status updated to '{}'.",
                drone.drone_id, drone.model, status
            ),
            resource_kind: ResourceKind::Drone,
            resource_id: drone.drone_id.clone(),
            status: status.to_string(),
            assignment: drone.current_assignment.clone(),
        })
    }

    /// 飞手派工（覆盖原分派,不阻止重复分派）
    pub fn assign_pilot(
        pilots: &mut [Pilot],
        missions: &[Mission],
        pilot_id: &str,
        mission_id: &str,
    ) -> EngineResult<MutationOutcome> {
        let mission = find_mission(missions, mission_id)?;
        let pilot = find_pilot_mut(pilots, pilot_id)?;
        let assignment = resolve_assignment(true, false, None, Some(&mission.project_id))?;

        pilot.status = PilotStatus::Assigned;
        pilot.current_assignment = assignment;
        info!(pilot_id = %pilot.pilot_id, mission_id = %mission.project_id, "飞手已派工");

        Ok(MutationOutcome {
            message: format!(
                "{} ({}) assigned to {}.",
                pilot.name, pilot.pilot_id, mission.project_id
            ),
            resource_kind: ResourceKind::Pilot,
            resource_id: pilot.pilot_id.clone(),
            status: PilotStatus::Assigned.to_string(),
            assignment: pilot.current_assignment.clone(),
        })
    }

    /// 无人机派工
    pub fn assign_drone(
        drones: &mut [Drone],
        missions: &[Mission],
        drone_id: &str,
        mission_id: &str,
    ) -> EngineResult<MutationOutcome> {
        let mission = find_mission(missions, mission_id)?;
        let drone = find_drone_mut(drones, drone_id)?;
        let assignment = resolve_assignment(true, false, None, Some(&mission.project_id))?;

        drone.status = DroneStatus::Assigned;
        drone.current_assignment = assignment;
        info!(drone_id = %drone.drone_id, mission_id = %mission.project_id, "无人机已派工");

        Ok(MutationOutcome {
            message: format!(
                "{} ({}) assigned to {}.",
                drone.drone_id, drone.model, mission.project_id
            ),
            resource_kind: ResourceKind::Drone,
            resource_id: drone.drone_id.clone(),
            status: DroneStatus::Assigned.to_string(),
            assignment: drone.current_assignment.clone(),
        })
    }
}

fn invalid_status_message(value: &str, allowed: &[&str]) -> String {
    format!(
        "Invalid status '{}'. Choose from: {}",
        value,
        allowed.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MissionPriority, WeatherForecast};
    use chrono::NaiveDate;

    fn pilots() -> Vec<Pilot> {
        vec![Pilot {
            pilot_id: "P001".to_string(),
            name: "Arjun".to_string(),
            skills: vec![],
            certifications: vec![],
            location: "Bangalore".to_string(),
            status: PilotStatus::Assigned,
            current_assignment: Some("PRJ001".to_string()),
            available_from: None,
            daily_rate_inr: 5000,
        }]
    }

    fn missions() -> Vec<Mission> {
        vec![Mission {
            project_id: "PRJ002".to_string(),
            client: "Client B".to_string(),
            location: "Mumbai".to_string(),
            required_skills: vec![],
            required_certs: vec![],
            start_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            priority: MissionPriority::Standard,
            budget_inr: 10000,
            weather_forecast: WeatherForecast::Cloudy,
        }]
    }

    #[test]
    fn test_invalid_status_leaves_table_unchanged() {
        let mut table = pilots();
        let before = table.clone();
        let err = RosterMutator::update_pilot_status(&mut table, "P001", "Vacation").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status 'Vacation'. Choose from: Available, Assigned, On Leave, Unavailable"
        );
        assert_eq!(table, before);
    }

    #[test]
    fn test_available_clears_assignment() {
        let mut table = pilots();
        let outcome = RosterMutator::update_pilot_status(&mut table, "P001", "available").unwrap();
        assert_eq!(outcome.message, "Arjun (P001) status updated to 'Available'.");
        assert_eq!(table[0].current_assignment, None);
    }

    #[test]
    fn test_on_leave_keeps_assignment() {
        let mut table = pilots();
        RosterMutator::update_pilot_status(&mut table, "P001", "On Leave").unwrap();
        assert_eq!(table[0].status, PilotStatus::OnLeave);
        assert_eq!(table[0].current_assignment.as_deref(), Some("PRJ001"));
    }

    #[test]
    fn test_assigned_without_mission_rejected() {
        let mut table = pilots();
        table[0].status = PilotStatus::Available;
        table[0].current_assignment = None;
        let result = RosterMutator::update_pilot_status(&mut table, "P001", "Assigned");
        assert!(matches!(result, Err(EngineError::InvalidArgument(_))));
        assert_eq!(table[0].status, PilotStatus::Available);
    }

    #[test]
    fn test_assign_overwrites() {
        let mut table = pilots();
        let outcome =
            RosterMutator::assign_pilot(&mut table, &missions(), "P001", "PRJ002").unwrap();
        assert_eq!(outcome.message, "Arjun (P001) assigned to PRJ002.");
        assert_eq!(table[0].current_assignment.as_deref(), Some("PRJ002"));
    }

    #[test]
    fn test_assign_unknown_ids() {
        let mut table = pilots();
        assert_eq!(
            RosterMutator::assign_pilot(&mut table, &missions(), "P404", "PRJ002"),
            Err(EngineError::not_found("Pilot", "P404"))
        );
        assert_eq!(
            RosterMutator::assign_pilot(&mut table, &missions(), "P001", "PRJ404"),
            Err(EngineError::not_found("Mission", "PRJ404"))
        );
    }
}
