// ==========================================
// 无人机作业协调系统 - 任务领域模型
// ==========================================
// 对齐: missions 表
// 红线: end_date >= start_date（导入时校验）
// ==========================================

use crate::domain::types::{MissionPriority, WeatherForecast};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Mission - 作业任务
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub project_id: String,                  // 主键（如 PRJ001）
    pub client: String,                      // 客户
    pub location: String,                    // 作业地点
    pub required_skills: Vec<String>,        // 所需技能
    pub required_certs: Vec<String>,         // 所需证书
    pub start_date: NaiveDate,               // 开始日期（含）
    pub end_date: NaiveDate,                 // 结束日期（含）
    pub priority: MissionPriority,           // 优先级
    pub budget_inr: u64,                     // 预算（INR）
    pub weather_forecast: WeatherForecast,   // 天气预报
}

impl Mission {
    /// 任务天数（首尾均含）
    pub fn duration_days(&self) -> i64 {
        inclusive_day_count(self.start_date, self.end_date)
    }

    pub fn is_urgent(&self) -> bool {
        self.priority == MissionPriority::Urgent
    }
}

/// 闭区间天数: (end - start) + 1
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}
