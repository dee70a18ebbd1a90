// ==========================================
// 无人机作业协调系统 - 冲突检测引擎
// ==========================================
// 职责: 无状态全量扫描,找出已分派资源与任务要求之间的违规
// 输入: 飞手/无人机/任务三张表
// 输出: ConflictReport（零违规时恰好一条 Clear 记录）
// ==========================================
// 规则:
// - 飞手: 缺技能（每项一条）、缺证书（每项一条）、地点不符、费用超预算
// - 无人机: 维护中仍被分派、非防雨机型遇雨、地点不符
// - 独立扫描: 分派值解码出多个任务编号 → 重复分派（每个资源仅一条）
// - 地点不符为 Advisory,其余为 Critical
// ==========================================

use crate::config::EngineConfig;
use crate::domain::tags::{eq_ci, format_tag_list};
use crate::domain::{Drone, DroneStatus, Mission, Pilot, ResourceKind, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};

pub const ALL_CLEAR_MESSAGE: &str = "No conflicts detected across all missions.";

/// 冲突类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictKind {
    SkillMismatch,
    CertMismatch,
    LocationMismatch,
    BudgetOverrun,
    Maintenance,
    WeatherRisk,
    DoubleBooked,
    Clear,
}

impl ConflictKind {
    pub fn severity(&self) -> Severity {
        match self {
            ConflictKind::LocationMismatch => Severity::Advisory,
            ConflictKind::Clear => Severity::Clear,
            _ => Severity::Critical,
        }
    }
}

/// 单条检测结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictFinding {
    pub kind: ConflictKind,
    pub severity: Severity,
    pub mission_id: Option<String>,
    pub resource_kind: Option<ResourceKind>,
    pub resource_id: Option<String>,
    pub message: String,
}

impl ConflictFinding {
    fn new(
        kind: ConflictKind,
        mission_id: Option<&str>,
        resource: (ResourceKind, &str),
        message: String,
    ) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            mission_id: mission_id.map(str::to_string),
            resource_kind: Some(resource.0),
            resource_id: Some(resource.1.to_string()),
            message,
        }
    }

    fn all_clear() -> Self {
        Self {
            kind: ConflictKind::Clear,
            severity: Severity::Clear,
            mission_id: None,
            resource_kind: None,
            resource_id: None,
            message: ALL_CLEAR_MESSAGE.to_string(),
        }
    }
}

impl fmt::Display for ConflictFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity.marker(), self.message)
    }
}

/// 扫描报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub entries: Vec<ConflictFinding>,
}

impl ConflictReport {
    /// 是否无任何违规
    pub fn is_clear(&self) -> bool {
        self.entries.iter().all(|e| e.kind == ConflictKind::Clear)
    }

    /// 真实违规（排除 Clear 记录）
    pub fn active(&self) -> Vec<&ConflictFinding> {
        self.entries
            .iter()
            .filter(|e| e.kind != ConflictKind::Clear)
            .collect()
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|e| e.severity == severity).count()
    }

    /// 带标记前缀的消息列表
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.to_string()).collect()
    }

    pub fn render(&self) -> String {
        self.messages().join("\n")
    }
}

// ==========================================
// ConflictDetector - 冲突检测引擎
// ==========================================
pub struct ConflictDetector {
    config: Arc<EngineConfig>,
}

impl ConflictDetector {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// 全量扫描
    ///
    /// 同一输入多次调用结果一致;不修改任何表
    #[instrument(skip_all, fields(missions = missions.len()))]
    pub fn detect(&self, pilots: &[Pilot], drones: &[Drone], missions: &[Mission]) -> ConflictReport {
        let mut entries = Vec::new();

        for mission in missions {
            for pilot in pilots.iter().filter(|p| self.references(p.current_assignment.as_deref(), mission)) {
                self.check_pilot(pilot, mission, &mut entries);
            }
            for drone in drones.iter().filter(|d| self.references(d.current_assignment.as_deref(), mission)) {
                self.check_drone(drone, mission, &mut entries);
            }
        }

        self.check_double_bookings(pilots, drones, &mut entries);

        info!(findings = entries.len(), "冲突扫描完成");

        if entries.is_empty() {
            entries.push(ConflictFinding::all_clear());
        }
        ConflictReport { entries }
    }

    fn references(&self, assignment: Option<&str>, mission: &Mission) -> bool {
        self.config
            .mission_id_codec
            .assignment_references(assignment, &mission.project_id)
    }

    fn check_pilot(&self, pilot: &Pilot, mission: &Mission, entries: &mut Vec<ConflictFinding>) {
        let resource = (ResourceKind::Pilot, pilot.pilot_id.as_str());
        let mission_id = Some(mission.project_id.as_str());

        for skill in pilot.missing_skills(&mission.required_skills) {
            entries.push(ConflictFinding::new(
                ConflictKind::SkillMismatch,
                mission_id,
                resource,
                format!(
                    "SKILL MISMATCH: {} assigned to {} but lacks '{}' skill",
                    pilot.name, mission.project_id, skill
                ),
            ));
        }

        for cert in pilot.missing_certifications(&mission.required_certs) {
            entries.push(ConflictFinding::new(
                ConflictKind::CertMismatch,
                mission_id,
                resource,
                format!(
                    "CERT MISMATCH: {} assigned to {} but lacks '{}' certification",
                    pilot.name, mission.project_id, cert
                ),
            ));
        }

        if !eq_ci(&pilot.location, &mission.location) {
            entries.push(ConflictFinding::new(
                ConflictKind::LocationMismatch,
                mission_id,
                resource,
                format!(
                    "LOCATION MISMATCH: {} is in {} but {} is in {}",
                    pilot.name, pilot.location, mission.project_id, mission.location
                ),
            ));
        }

        let cost = pilot.cost_for_days(mission.duration_days());
        if cost > mission.budget_inr {
            entries.push(ConflictFinding::new(
                ConflictKind::BudgetOverrun,
                mission_id,
                resource,
                format!(
                    "BUDGET OVERRUN: {} costs ₹{} for {} (budget: ₹{})",
                    pilot.name, cost, mission.project_id, mission.budget_inr
                ),
            ));
        }
    }

    fn check_drone(&self, drone: &Drone, mission: &Mission, entries: &mut Vec<ConflictFinding>) {
        let resource = (ResourceKind::Drone, drone.drone_id.as_str());
        let mission_id = Some(mission.project_id.as_str());

        if drone.status == DroneStatus::Maintenance {
            entries.push(ConflictFinding::new(
                ConflictKind::Maintenance,
                mission_id,
                resource,
                format!(
                    "MAINTENANCE: {} assigned to {} but currently in Maintenance",
                    drone.drone_id, mission.project_id
                ),
            ));
        }

        if mission.weather_forecast.is_rainy()
            && !drone.is_rain_capable(&self.config.rain_capable_marker)
        {
            entries.push(ConflictFinding::new(
                ConflictKind::WeatherRisk,
                mission_id,
                resource,
                format!(
                    "WEATHER RISK: {} is not rain-rated but {} forecast is Rainy",
                    drone.drone_id, mission.project_id
                ),
            ));
        }

        if !eq_ci(&drone.location, &mission.location) {
            entries.push(ConflictFinding::new(
                ConflictKind::LocationMismatch,
                mission_id,
                resource,
                format!(
                    "LOCATION MISMATCH: {} is in {} but {} is in {}",
                    drone.drone_id, drone.location, mission.project_id, mission.location
                ),
            ));
        }
    }

    fn check_double_bookings(
        &self,
        pilots: &[Pilot],
        drones: &[Drone],
        entries: &mut Vec<ConflictFinding>,
    ) {
        for pilot in pilots {
            let ids = pilot.assigned_missions();
            if ids.len() > 1 {
                entries.push(ConflictFinding::new(
                    ConflictKind::DoubleBooked,
                    None,
                    (ResourceKind::Pilot, pilot.pilot_id.as_str()),
                    format!(
                        "DOUBLE-BOOKED: {} assigned to multiple: {}",
                        pilot.name,
                        format_tag_list(&ids)
                    ),
                ));
            }
        }
        for drone in drones {
            let ids = drone.assigned_missions();
            if ids.len() > 1 {
                entries.push(ConflictFinding::new(
                    ConflictKind::DoubleBooked,
                    None,
                    (ResourceKind::Drone, drone.drone_id.as_str()),
                    format!(
                        "DOUBLE-BOOKED: {} assigned to multiple: {}",
                        drone.drone_id,
                        format_tag_list(&ids)
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MissionPriority, PilotStatus, WeatherForecast};
    use chrono::NaiveDate;

    fn detector() -> ConflictDetector {
        ConflictDetector::new(Arc::new(EngineConfig::default()))
    }

    fn pilot(assignment: Option<&str>) -> Pilot {
        Pilot {
            pilot_id: "P001".to_string(),
            name: "Arjun".to_string(),
            skills: vec!["Mapping".to_string()],
            certifications: vec!["DGCA".to_string()],
            location: "Bangalore".to_string(),
            status: PilotStatus::Assigned,
            current_assignment: assignment.map(str::to_string),
            available_from: None,
            daily_rate_inr: 5000,
        }
    }

    fn mission(id: &str) -> Mission {
        Mission {
            project_id: id.to_string(),
            client: "Client A".to_string(),
            location: "Bangalore".to_string(),
            required_skills: vec!["Mapping".to_string()],
            required_certs: vec!["DGCA".to_string()],
            start_date: NaiveDate::from_ymd_opt(2026, 2, 6).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 8).unwrap(),
            priority: MissionPriority::High,
            budget_inr: 20000,
            weather_forecast: WeatherForecast::Rainy,
        }
    }

    #[test]
    fn test_clear_sweep_yields_single_entry() {
        let report = detector().detect(&[pilot(None)], &[], &[mission("PRJ001")]);
        assert!(report.is_clear());
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].severity, Severity::Clear);
        assert_eq!(
            report.messages(),
            vec!["[CLEAR] No conflicts detected across all missions.".to_string()]
        );
    }

    #[test]
    fn test_double_booking_flagged_once() {
        let report = detector().detect(
            &[pilot(Some("PRJ001, PRJ002"))],
            &[],
            &[mission("PRJ001"), mission("PRJ002")],
        );
        let doubles: Vec<_> = report
            .entries
            .iter()
            .filter(|e| e.kind == ConflictKind::DoubleBooked)
            .collect();
        assert_eq!(doubles.len(), 1);
        assert_eq!(
            doubles[0].message,
            "DOUBLE-BOOKED: Arjun assigned to multiple: ['PRJ001', 'PRJ002']"
        );
    }

    #[test]
    fn test_legacy_reference_is_checked() {
        let mut p = pilot(Some("Project-001"));
        p.location = "Mumbai".to_string();
        let report = detector().detect(&[p], &[], &[mission("PRJ001")]);
        let active = report.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].kind, ConflictKind::LocationMismatch);
        assert_eq!(active[0].severity, Severity::Advisory);
    }

    #[test]
    fn test_one_entry_per_missing_skill() {
        let mut m = mission("PRJ001");
        m.required_skills = vec!["Mapping".to_string(), "Thermal".to_string(), "Night Ops".to_string()];
        let report = detector().detect(&[pilot(Some("PRJ001"))], &[], &[m]);
        let skills = report
            .entries
            .iter()
            .filter(|e| e.kind == ConflictKind::SkillMismatch)
            .count();
        assert_eq!(skills, 2);
    }

    #[test]
    fn test_drone_findings() {
        let drone = Drone {
            drone_id: "D002".to_string(),
            model: "Mavic".to_string(),
            capabilities: vec!["RGB".to_string()],
            status: DroneStatus::Maintenance,
            location: "Bangalore".to_string(),
            current_assignment: Some("PRJ001".to_string()),
            maintenance_due: None,
            weather_resistance: "None".to_string(),
        };
        let report = detector().detect(&[], &[drone], &[mission("PRJ001")]);
        assert_eq!(
            report.messages(),
            vec![
                "[CRITICAL] MAINTENANCE: D002 assigned to PRJ001 but currently in Maintenance"
                    .to_string(),
                "[CRITICAL] WEATHER RISK: D002 is not rain-rated but PRJ001 forecast is Rainy"
                    .to_string(),
            ]
        );
    }
}
