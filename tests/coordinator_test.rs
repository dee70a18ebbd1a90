// ==========================================
// 协调器集成测试
// ==========================================
// 职责: 查询 / 计费 / 写入校验 / 报表 / 操作日志
// ==========================================

mod helpers;

use helpers::sample_coordinator;
use skyops::domain::{ActionType, DroneStatus, PilotStatus};
use skyops::engine::{DroneQuery, PilotQuery};
use skyops::ApiError;

// ==========================================
// 查询
// ==========================================

#[test]
fn test_pilot_query_combines_predicates() {
    let coordinator = sample_coordinator();

    let all = coordinator.query_pilots(&PilotQuery::default());
    assert_eq!(all.len(), 4);

    let query = PilotQuery {
        skill: Some("mapping".to_string()),
        location: Some("mumbai".to_string()),
        ..PilotQuery::default()
    };
    let ids: Vec<&str> = coordinator
        .query_pilots(&query)
        .iter()
        .map(|p| p.pilot_id.as_str())
        .collect();
    assert_eq!(ids, vec!["P003"]);
}

#[test]
fn test_pilot_query_blank_predicate_is_ignored() {
    let coordinator = sample_coordinator();
    let query = PilotQuery {
        certification: Some("  ".to_string()),
        status: Some("leave".to_string()),
        ..PilotQuery::default()
    };
    let ids: Vec<&str> = coordinator
        .query_pilots(&query)
        .iter()
        .map(|p| p.pilot_id.as_str())
        .collect();
    assert_eq!(ids, vec!["P004"]);
}

#[test]
fn test_drone_query_rainy_keeps_rain_rated() {
    let coordinator = sample_coordinator();
    let query = DroneQuery {
        weather: Some("Rainy".to_string()),
        ..DroneQuery::default()
    };
    let ids: Vec<&str> = coordinator
        .query_drones(&query)
        .iter()
        .map(|d| d.drone_id.as_str())
        .collect();
    assert_eq!(ids, vec!["D001", "D003"]);

    let sunny = DroneQuery {
        weather: Some("Sunny".to_string()),
        capability: Some("thermal".to_string()),
        ..DroneQuery::default()
    };
    assert_eq!(coordinator.query_drones(&sunny).len(), 2);
}

// ==========================================
// 计费
// ==========================================

#[test]
fn test_cost_single_day_and_range() {
    let coordinator = sample_coordinator();

    let one_day = coordinator
        .calculate_pilot_cost("P001", "2026-02-06", "2026-02-06")
        .unwrap();
    assert_eq!(one_day.days, 1);
    assert_eq!(one_day.total_inr, 1500);

    let range = coordinator
        .calculate_pilot_cost("P004", "06/02/2026", "2026-02-10")
        .unwrap();
    assert_eq!(range.breakdown, "Sneha @ ₹5000/day × 5 days = ₹25000");
}

#[test]
fn test_cost_errors() {
    let coordinator = sample_coordinator();

    let reversed = coordinator
        .calculate_pilot_cost("P001", "2026-02-10", "2026-02-06")
        .unwrap_err();
    assert!(matches!(reversed, ApiError::InvalidArgument(_)));

    let bad_date = coordinator
        .calculate_pilot_cost("P001", "tomorrow", "2026-02-06")
        .unwrap_err();
    assert!(matches!(bad_date, ApiError::ParseError(_)));

    let unknown = coordinator
        .calculate_pilot_cost("P404", "2026-02-06", "2026-02-06")
        .unwrap_err();
    assert_eq!(unknown.to_string(), "Pilot P404 not found.");
}

#[test]
fn test_budget_check_against_mission() {
    let coordinator = sample_coordinator();

    let within = coordinator.check_pilot_budget("P001", "PRJ001").unwrap();
    assert_eq!(within.over_budget_by, None);
    assert!(within.summary().contains("Within budget (₹105000)"));
}

// ==========================================
// 写入
// ==========================================

#[test]
fn test_invalid_status_leaves_table_unchanged() {
    let mut coordinator = sample_coordinator();
    let before = coordinator.tables().clone();

    let err = coordinator
        .update_pilot_status("P001", "Vacation", "test")
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument(_)));
    assert_eq!(
        err.to_string(),
        "Invalid status 'Vacation'. Choose from: Available, Assigned, On Leave, Unavailable"
    );
    assert_eq!(coordinator.tables(), &before);
}

#[test]
fn test_assigned_status_requires_mission() {
    let mut coordinator = sample_coordinator();
    let err = coordinator
        .update_pilot_status("P001", "Assigned", "test")
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument(_)));
    assert_eq!(coordinator.pilots()[0].status, PilotStatus::Available);
}

#[test]
fn test_available_clears_assignment_other_statuses_keep_it() {
    let mut coordinator = sample_coordinator();

    let on_leave = coordinator
        .update_pilot_status("P002", "On Leave", "test")
        .unwrap();
    assert_eq!(on_leave.assignment.as_deref(), Some("PRJ001"));

    let available = coordinator
        .update_pilot_status("P002", "available", "test")
        .unwrap();
    assert_eq!(available.assignment, None);
    assert_eq!(available.message, "Neha (P002) status updated to 'Available'.");
    assert_eq!(coordinator.pilots()[1].current_assignment, None);
}

#[test]
fn test_assign_overwrites_and_logs() {
    let mut coordinator = sample_coordinator();

    let pilot = coordinator.assign_pilot("P003", "PRJ002", "dashboard").unwrap();
    assert_eq!(pilot.message, "Rohit (P003) assigned to PRJ002.");
    assert_eq!(coordinator.pilots()[2].status, PilotStatus::Assigned);

    let drone = coordinator.assign_drone("D003", "PRJ002", "dashboard").unwrap();
    assert_eq!(drone.message, "D003 (DJI Mavic 3T) assigned to PRJ002.");
    assert_eq!(coordinator.drones()[2].status, DroneStatus::Assigned);

    let log = coordinator.action_log();
    assert_eq!(log.len(), 2);
    assert!(log.iter().all(|entry| entry.action_type == ActionType::Assign));
    assert_eq!(log[0].actor, "dashboard");
    assert_eq!(log[0].resource_id.as_deref(), Some("P003"));
}

#[test]
fn test_assign_to_unknown_mission_changes_nothing() {
    let mut coordinator = sample_coordinator();
    let before = coordinator.tables().clone();

    let err = coordinator.assign_pilot("P001", "PRJ404", "test").unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert_eq!(coordinator.tables(), &before);
    assert!(coordinator.action_log().is_empty());
}

#[test]
fn test_drone_status_update_keeps_assignment_in_maintenance() {
    let mut coordinator = sample_coordinator();
    coordinator.assign_drone("D001", "PRJ001", "test").unwrap();

    let outcome = coordinator
        .update_drone_status("D001", "Maintenance", "test")
        .unwrap();
    assert_eq!(outcome.assignment.as_deref(), Some("PRJ001"));

    let report = coordinator.detect_conflicts();
    assert!(report
        .messages()
        .contains(&"[CRITICAL] MAINTENANCE: D001 assigned to PRJ001 but currently in Maintenance".to_string()));
}

// ==========================================
// 报表
// ==========================================

#[test]
fn test_current_assignments_and_summary() {
    let coordinator = sample_coordinator();

    assert_eq!(
        coordinator.render_current_assignments(),
        "P002 | Neha | PRJ001 | Mumbai"
    );

    let summary = coordinator.dashboard_summary();
    assert_eq!(summary.available_pilots, 2);
    assert_eq!(summary.total_pilots, 4);
    assert_eq!(summary.available_drones, 3);
    assert_eq!(summary.urgent_missions, 1);
    assert_eq!(summary.active_conflicts, 2);
}

#[test]
fn test_data_snapshot_lists_every_record() {
    let coordinator = sample_coordinator();
    let snapshot = coordinator.data_snapshot();

    assert!(snapshot.starts_with("=== CURRENT DATA SNAPSHOT ==="));
    let record_lines = snapshot.lines().filter(|l| l.starts_with("- ")).count();
    assert_eq!(record_lines, 4 + 4 + 3);
    assert!(snapshot.contains("- P002 Neha"));
}
