// ==========================================
// 无人机作业协调系统 - 操作日志领域模型
// ==========================================
// 红线: 所有写入必须记录
// 用途: 会话内审计追踪（驾驶舱"操作日志"面板）
// ==========================================

use crate::domain::types::ResourceKind;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// ActionLog - 操作日志
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub action_id: String,              // 日志ID
    pub action_type: ActionType,        // 操作类型
    pub action_ts: NaiveDateTime,       // 操作时间戳
    pub actor: String,                  // 操作来源（dashboard / agent / cli）
    pub resource_kind: Option<ResourceKind>, // 受影响资源类型
    pub resource_id: Option<String>,    // 受影响资源ID
    pub detail: String,                 // 确认消息
}

impl ActionLog {
    pub fn new(
        action_type: ActionType,
        actor: &str,
        resource: Option<(ResourceKind, &str)>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            action_id: Uuid::new_v4().to_string(),
            action_type,
            action_ts: Utc::now().naive_utc(),
            actor: actor.to_string(),
            resource_kind: resource.map(|(kind, _)| kind),
            resource_id: resource.map(|(_, id)| id.to_string()),
            detail: detail.into(),
        }
    }
}

// ==========================================
// ActionType - 操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    Load,             // 加载数据
    Reset,            // 重置为原始数据
    StatusUpdate,     // 状态更新
    Assign,           // 派工
    SheetPull,        // 从表格拉取
    SheetPush,        // 推送到表格
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Load => "Load",
            ActionType::Reset => "Reset",
            ActionType::StatusUpdate => "StatusUpdate",
            ActionType::Assign => "Assign",
            ActionType::SheetPull => "SheetPull",
            ActionType::SheetPush => "SheetPush",
        }
    }
}
