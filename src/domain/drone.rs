// ==========================================
// 无人机作业协调系统 - 无人机领域模型
// ==========================================
// 对齐: drone_fleet 表
// ==========================================

use crate::domain::assignment::decode_assignment;
use crate::domain::tags::contains_ci;
use crate::domain::types::DroneStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Drone - 无人机
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drone {
    pub drone_id: String,                    // 主键
    pub model: String,                       // 型号
    pub capabilities: Vec<String>,           // 载荷能力（LiDAR/RGB/Thermal）
    pub status: DroneStatus,                 // 状态
    pub location: String,                    // 驻地
    pub current_assignment: Option<String>,  // 当前任务
    pub maintenance_due: Option<NaiveDate>,  // 下次维护日期
    pub weather_resistance: String,          // 防护等级（如 "IP43 (Rain)"）
}

impl Drone {
    /// 是否具备雨天作业能力
    ///
    /// # 参数
    /// - rain_marker: 防护等级中代表防雨的子串（默认 IP43）
    pub fn is_rain_capable(&self, rain_marker: &str) -> bool {
        contains_ci(&self.weather_resistance, rain_marker)
    }

    pub fn assigned_missions(&self) -> Vec<String> {
        decode_assignment(self.current_assignment.as_deref())
    }
}
