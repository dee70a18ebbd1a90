// ==========================================
// 无人机作业协调系统 - 飞手领域模型
// ==========================================
// 对齐: pilot_roster 表
// 红线: status 与 current_assignment 的一致性只由 Mutator 维护
// ==========================================

use crate::domain::assignment::decode_assignment;
use crate::domain::tags::missing_tags;
use crate::domain::types::PilotStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Pilot - 飞手
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pilot {
    pub pilot_id: String,                    // 主键
    pub name: String,                        // 姓名
    pub skills: Vec<String>,                 // 技能标签
    pub certifications: Vec<String>,         // 证书标签
    pub location: String,                    // 驻地
    pub status: PilotStatus,                 // 状态
    pub current_assignment: Option<String>,  // 当前任务（可能为逗号拼接的多个任务号）
    pub available_from: Option<NaiveDate>,   // 休假结束日期（仅 On Leave 有意义）
    pub daily_rate_inr: u64,                 // 日费率（INR）
}

impl Pilot {
    /// 缺失的技能（保持需求顺序）
    pub fn missing_skills(&self, required: &[String]) -> Vec<String> {
        missing_tags(&self.skills, required)
    }

    /// 缺失的证书（保持需求顺序）
    pub fn missing_certifications(&self, required: &[String]) -> Vec<String> {
        missing_tags(&self.certifications, required)
    }

    /// 解码后的分派任务号列表
    pub fn assigned_missions(&self) -> Vec<String> {
        decode_assignment(self.current_assignment.as_deref())
    }

    /// 指定天数的总费用
    pub fn cost_for_days(&self, days: i64) -> u64 {
        self.daily_rate_inr.saturating_mul(days.max(0) as u64)
    }
}
