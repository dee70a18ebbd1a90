// ==========================================
// 无人机作业协调系统 - 名册报表
// ==========================================
// 职责: 当前分派清单、驾驶舱 KPI、对话代理用的数据快照文本
// ==========================================

use crate::domain::{Drone, DroneStatus, Mission, Pilot, PilotStatus};
use crate::engine::conflict::ConflictReport;
use serde::{Deserialize, Serialize};

pub const NO_ASSIGNED_PILOTS: &str = "No pilots currently assigned.";

/// 当前分派行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    pub pilot_id: String,
    pub name: String,
    pub assignment: String,
    pub location: String,
}

/// 驾驶舱 KPI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub available_pilots: usize,
    pub total_pilots: usize,
    pub available_drones: usize,
    pub total_drones: usize,
    pub urgent_missions: usize,
    pub active_conflicts: usize,
}

impl DashboardSummary {
    pub fn render(&self) -> String {
        format!(
            "Available Pilots: {}/{}\nAvailable Drones: {}/{}\nUrgent Missions: {}\nActive Conflicts: {}",
            self.available_pilots,
            self.total_pilots,
            self.available_drones,
            self.total_drones,
            self.urgent_missions,
            self.active_conflicts
        )
    }
}

pub struct RosterReports;

impl RosterReports {
    /// 已派工飞手
    pub fn current_assignments(pilots: &[Pilot]) -> Vec<AssignmentRow> {
        pilots
            .iter()
            .filter(|p| p.status == PilotStatus::Assigned)
            .map(|p| AssignmentRow {
                pilot_id: p.pilot_id.clone(),
                name: p.name.clone(),
                assignment: p.current_assignment.clone().unwrap_or_default(),
                location: p.location.clone(),
            })
            .collect()
    }

    pub fn render_current_assignments(pilots: &[Pilot]) -> String {
        let rows = Self::current_assignments(pilots);
        if rows.is_empty() {
            return NO_ASSIGNED_PILOTS.to_string();
        }
        rows.iter()
            .map(|r| format!("{} | {} | {} | {}", r.pilot_id, r.name, r.assignment, r.location))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn dashboard_summary(
        pilots: &[Pilot],
        drones: &[Drone],
        missions: &[Mission],
        conflicts: &ConflictReport,
    ) -> DashboardSummary {
        DashboardSummary {
            available_pilots: pilots
                .iter()
                .filter(|p| p.status == PilotStatus::Available)
                .count(),
            total_pilots: pilots.len(),
            available_drones: drones
                .iter()
                .filter(|d| d.status == DroneStatus::Available)
                .count(),
            total_drones: drones.len(),
            urgent_missions: missions.iter().filter(|m| m.is_urgent()).count(),
            active_conflicts: conflicts.active().len(),
        }
    }

    /// 数据快照: 每条记录一行,作为对话代理的上下文
    pub fn data_snapshot(pilots: &[Pilot], drones: &[Drone], missions: &[Mission]) -> String {
        let mut lines = Vec::with_capacity(pilots.len() + drones.len() + missions.len() + 4);
        lines.push("=== CURRENT DATA SNAPSHOT ===".to_string());

        lines.push(format!("PILOTS ({}):", pilots.len()));
        for p in pilots {
            lines.push(format!(
                "- {} {} | Skills: {} | Certs: {} | Location: {} | Status: {} | Assignment: {} | Available from: {} | Rate: ₹{}/day",
                p.pilot_id,
                p.name,
                p.skills.join(", "),
                p.certifications.join(", "),
                p.location,
                p.status,
                p.current_assignment.as_deref().unwrap_or("-"),
                p.available_from
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                p.daily_rate_inr
            ));
        }

        lines.push(format!("DRONES ({}):", drones.len()));
        for d in drones {
            lines.push(format!(
                "- {} {} | Capabilities: {} | Status: {} | Location: {} | Assignment: {} | Maintenance due: {} | Weather: {}",
                d.drone_id,
                d.model,
                d.capabilities.join(", "),
                d.status,
                d.location,
                d.current_assignment.as_deref().unwrap_or("-"),
                d.maintenance_due
                    .map(|due| due.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                d.weather_resistance
            ));
        }

        lines.push(format!("MISSIONS ({}):", missions.len()));
        for m in missions {
            lines.push(format!(
                "- {} {} | Location: {} | Skills: {} | Certs: {} | Dates: {} to {} | Priority: {} | Budget: ₹{} | Weather: {}",
                m.project_id,
                m.client,
                m.location,
                m.required_skills.join(", "),
                m.required_certs.join(", "),
                m.start_date,
                m.end_date,
                m.priority,
                m.budget_inr,
                m.weather_forecast
            ));
        }

        lines.join("\n")
    }
}
