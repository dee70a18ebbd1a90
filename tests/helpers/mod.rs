// ==========================================
// 集成测试共享辅助
// ==========================================

#![allow(dead_code)]

pub mod test_data_builder;

use skyops::config::EngineConfig;
use skyops::domain::{DroneStatus, MissionPriority, RosterTables, WeatherForecast};
use skyops::Coordinator;
use std::sync::Arc;
use test_data_builder::{date, DroneBuilder, MissionBuilder, PilotBuilder};

/// 标准演示名册: 4 名飞手 / 4 架无人机 / 3 个任务
///
/// - P002 Neha (Mumbai, 仅 Inspection) 被派到 PRJ001 (Bangalore, Mapping)
/// - D002 在维护中
/// - PRJ003 预报有雨
pub fn sample_roster() -> RosterTables {
    let pilots = vec![
        PilotBuilder::new("P001", "Arjun")
            .skills(&["Mapping", "Survey"])
            .certs(&["DGCA", "Night Ops"])
            .location("Bangalore")
            .rate(1500)
            .build(),
        PilotBuilder::new("P002", "Neha")
            .skills(&["Inspection"])
            .certs(&["DGCA"])
            .location("Mumbai")
            .assigned_to("PRJ001")
            .rate(3000)
            .build(),
        PilotBuilder::new("P003", "Rohit")
            .skills(&["Inspection", "Mapping"])
            .certs(&["DGCA"])
            .location("Mumbai")
            .rate(1500)
            .build(),
        PilotBuilder::new("P004", "Sneha")
            .skills(&["Survey", "Thermal"])
            .certs(&["DGCA", "Night Ops"])
            .location("Bangalore")
            .on_leave_until(date(2026, 2, 15))
            .rate(5000)
            .build(),
    ];

    let drones = vec![
        DroneBuilder::new("D001", "DJI M300")
            .capabilities(&["LiDAR", "RGB"])
            .location("Bangalore")
            .maintenance_due(date(2026, 3, 1))
            .rain_rated()
            .build(),
        DroneBuilder::new("D002", "DJI Mavic 3")
            .capabilities(&["RGB"])
            .status(DroneStatus::Maintenance)
            .location("Mumbai")
            .maintenance_due(date(2026, 2, 1))
            .build(),
        DroneBuilder::new("D003", "DJI Mavic 3T")
            .capabilities(&["Thermal"])
            .location("Mumbai")
            .maintenance_due(date(2026, 4, 1))
            .rain_rated()
            .build(),
        DroneBuilder::new("D004", "Autel Evo II")
            .capabilities(&["Thermal", "RGB"])
            .location("Bangalore")
            .maintenance_due(date(2026, 2, 10))
            .build(),
    ];

    let missions = vec![
        MissionBuilder::new("PRJ001")
            .client("Client A")
            .location("Bangalore")
            .skills(&["Mapping"])
            .certs(&["DGCA"])
            .dates(date(2026, 2, 6), date(2026, 2, 8))
            .priority(MissionPriority::High)
            .budget(105_000)
            .build(),
        MissionBuilder::new("PRJ002")
            .client("Client B")
            .location("Mumbai")
            .skills(&["Inspection"])
            .certs(&["DGCA"])
            .dates(date(2026, 2, 7), date(2026, 2, 9))
            .priority(MissionPriority::Urgent)
            .budget(85_000)
            .weather(WeatherForecast::Cloudy)
            .build(),
        MissionBuilder::new("PRJ003")
            .client("Client C")
            .location("Bangalore")
            .skills(&["Thermal"])
            .certs(&["DGCA", "Night Ops"])
            .dates(date(2026, 2, 10), date(2026, 2, 12))
            .budget(120_000)
            .weather(WeatherForecast::Rainy)
            .build(),
    ];

    RosterTables::new(pilots, drones, missions)
}

pub fn sample_coordinator() -> Coordinator {
    Coordinator::new(sample_roster(), Arc::new(EngineConfig::default()))
}
