// ==========================================
// 无人机作业协调系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、标签与分派字段规则
// 红线: 不含 I/O,不含引擎评分逻辑
// ==========================================

pub mod action_log;
pub mod assignment;
pub mod dates;
pub mod drone;
pub mod mission;
pub mod pilot;
pub mod roster;
pub mod tags;
pub mod types;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType};
pub use assignment::{decode_assignment, MissionIdCodec};
pub use dates::parse_flexible_date;
pub use drone::Drone;
pub use mission::{inclusive_day_count, Mission};
pub use pilot::Pilot;
pub use roster::{RosterTables, DRONE_TABLE, MISSION_TABLE, PILOT_TABLE};
pub use types::{
    DroneStatus, Fit, MissionPriority, PilotStatus, ResourceKind, Severity, WeatherForecast,
};
