// ==========================================
// 无人机作业协调系统 - 维护到期监控
// ==========================================
// 规则:
// - maintenance_due <= today          → Critical "Maintenance OVERDUE"
// - maintenance_due <= today + window → Advisory "Maintenance due soon"
// - 无告警 → 单条 Clear 记录
// 输入 today 由调用方显式给出
// ==========================================

use crate::domain::{Drone, Severity};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NO_MAINTENANCE_ISSUES: &str = "No maintenance issues flagged.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceAlert {
    pub drone_id: Option<String>,
    pub model: Option<String>,
    pub due: Option<NaiveDate>,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for MaintenanceAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.drone_id, &self.model) {
            (Some(id), Some(model)) => write!(
                f,
                "{} {} ({}): {}",
                self.severity.marker(),
                id,
                model,
                self.message
            ),
            _ => write!(f, "{} {}", self.severity.marker(), self.message),
        }
    }
}

pub struct MaintenanceMonitor {
    warning_days: i64,
}

impl MaintenanceMonitor {
    /// # 参数
    /// - warning_days: 预警窗口（天）
    pub fn new(warning_days: i64) -> Self {
        Self { warning_days }
    }

    pub fn scan(&self, drones: &[Drone], today: NaiveDate) -> Vec<MaintenanceAlert> {
        let horizon = Duration::try_days(self.warning_days.max(0))
            .and_then(|window| today.checked_add_signed(window))
            .unwrap_or(NaiveDate::MAX);
        let mut alerts: Vec<MaintenanceAlert> = drones
            .iter()
            .filter_map(|drone| {
                let due = drone.maintenance_due?;
                let (severity, message) = if due <= today {
                    (Severity::Critical, format!("Maintenance OVERDUE (was due {})", due))
                } else if due <= horizon {
                    (Severity::Advisory, format!("Maintenance due soon ({})", due))
                } else {
                    return None;
                };
                Some(MaintenanceAlert {
                    drone_id: Some(drone.drone_id.clone()),
                    model: Some(drone.model.clone()),
                    due: Some(due),
                    severity,
                    message,
                })
            })
            .collect();

        if alerts.is_empty() {
            alerts.push(MaintenanceAlert {
                drone_id: None,
                model: None,
                due: None,
                severity: Severity::Clear,
                message: NO_MAINTENANCE_ISSUES.to_string(),
            });
        }
        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DroneStatus;

    fn drone(id: &str, due: Option<NaiveDate>) -> Drone {
        Drone {
            drone_id: id.to_string(),
            model: "M300".to_string(),
            capabilities: vec![],
            status: DroneStatus::Available,
            location: "Pune".to_string(),
            current_assignment: None,
            maintenance_due: due,
            weather_resistance: "None".to_string(),
        }
    }

    #[test]
    fn test_overdue_and_due_soon() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let drones = vec![
            drone("D001", NaiveDate::from_ymd_opt(2026, 3, 1)),
            drone("D002", NaiveDate::from_ymd_opt(2026, 3, 8)),
            drone("D003", NaiveDate::from_ymd_opt(2026, 3, 9)),
            drone("D004", None),
        ];
        let alerts = MaintenanceMonitor::new(7).scan(&drones, today);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert_eq!(alerts[0].message, "Maintenance OVERDUE (was due 2026-03-01)");
        assert_eq!(alerts[1].severity, Severity::Advisory);
        assert_eq!(
            alerts[1].to_string(),
            "[ADVISORY] D002 (M300): Maintenance due soon (2026-03-08)"
        );
    }

    #[test]
    fn test_nothing_flagged() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let alerts = MaintenanceMonitor::new(7).scan(&[drone("D001", None)], today);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Clear);
        assert_eq!(alerts[0].message, NO_MAINTENANCE_ISSUES);
    }

    #[test]
    fn test_oversized_window_does_not_overflow() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let drones = vec![drone("D001", NaiveDate::from_ymd_opt(2030, 1, 1))];
        let alerts = MaintenanceMonitor::new(i64::MAX).scan(&drones, today);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Advisory);

        let alerts = MaintenanceMonitor::new(-5).scan(&drones, today);
        assert_eq!(alerts[0].severity, Severity::Clear);
    }
}
