// ==========================================
// 无人机作业协调系统 - 领域类型定义
// ==========================================
// 职责: 封闭枚举（状态/优先级/天气/匹配度/严重度）
// 红线: 状态值只允许枚举内取值,越界一律 InvalidArgument
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 飞手状态 (Pilot Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PilotStatus {
    Available,   // 可用
    Assigned,    // 已派
    #[serde(rename = "On Leave")]
    OnLeave,     // 休假
    Unavailable, // 不可用
}

impl PilotStatus {
    /// 封闭取值集合（用于错误提示）
    pub const ALL: [PilotStatus; 4] = [
        PilotStatus::Available,
        PilotStatus::Assigned,
        PilotStatus::OnLeave,
        PilotStatus::Unavailable,
    ];

    /// 从字符串解析（忽略大小写与首尾空白）
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = normalize_enum_text(s);
        Self::ALL
            .iter()
            .copied()
            .find(|status| normalize_enum_text(status.as_str()) == normalized)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PilotStatus::Available => "Available",
            PilotStatus::Assigned => "Assigned",
            PilotStatus::OnLeave => "On Leave",
            PilotStatus::Unavailable => "Unavailable",
        }
    }
}

impl fmt::Display for PilotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 无人机状态 (Drone Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DroneStatus {
    Available,   // 可用
    Assigned,    // 已派
    Maintenance, // 维护中
}

impl DroneStatus {
    pub const ALL: [DroneStatus; 3] = [
        DroneStatus::Available,
        DroneStatus::Assigned,
        DroneStatus::Maintenance,
    ];

    /// 从字符串解析（忽略大小写与首尾空白）
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = normalize_enum_text(s);
        Self::ALL
            .iter()
            .copied()
            .find(|status| normalize_enum_text(status.as_str()) == normalized)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DroneStatus::Available => "Available",
            DroneStatus::Assigned => "Assigned",
            DroneStatus::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 任务优先级 (Mission Priority)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MissionPriority {
    Urgent,   // 紧急
    High,     // 高
    Standard, // 常规
    Low,      // 低
}

impl MissionPriority {
    /// 从字符串解析
    ///
    /// Medium / Normal 视为 Standard
    pub fn parse(s: &str) -> Option<Self> {
        match normalize_enum_text(s).as_str() {
            "urgent" => Some(MissionPriority::Urgent),
            "high" => Some(MissionPriority::High),
            "standard" | "medium" | "normal" => Some(MissionPriority::Standard),
            "low" => Some(MissionPriority::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MissionPriority::Urgent => "Urgent",
            MissionPriority::High => "High",
            MissionPriority::Standard => "Standard",
            MissionPriority::Low => "Low",
        }
    }
}

impl fmt::Display for MissionPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 天气预报 (Weather Forecast)
// ==========================================
// 只有 Rainy 参与评分；其余取值原样保留用于展示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherForecast {
    Sunny,
    Cloudy,
    Rainy,
    Windy,
    Other(String),
}

impl WeatherForecast {
    /// 从字符串解析（不会失败,未知取值落入 Other）
    pub fn parse(s: &str) -> Self {
        match normalize_enum_text(s).as_str() {
            "sunny" | "clear" => WeatherForecast::Sunny,
            "cloudy" => WeatherForecast::Cloudy,
            "rainy" | "rain" => WeatherForecast::Rainy,
            "windy" => WeatherForecast::Windy,
            _ => WeatherForecast::Other(s.trim().to_string()),
        }
    }

    pub fn is_rainy(&self) -> bool {
        matches!(self, WeatherForecast::Rainy)
    }
}

impl fmt::Display for WeatherForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherForecast::Sunny => write!(f, "Sunny"),
            WeatherForecast::Cloudy => write!(f, "Cloudy"),
            WeatherForecast::Rainy => write!(f, "Rainy"),
            WeatherForecast::Windy => write!(f, "Windy"),
            WeatherForecast::Other(raw) => write!(f, "{}", raw),
        }
    }
}

// ==========================================
// 匹配度 (Fit)
// ==========================================
// 由分数派生的定性分档
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Fit {
    Poor,
    Partial,
    Perfect,
}

impl Fit {
    /// 按阈值分档: score >= perfect → Perfect; score >= partial → Partial; 否则 Poor
    pub fn from_score(score: u32, perfect_threshold: u32, partial_threshold: u32) -> Self {
        if score >= perfect_threshold {
            Fit::Perfect
        } else if score >= partial_threshold {
            Fit::Partial
        } else {
            Fit::Poor
        }
    }
}

impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fit::Perfect => write!(f, "Perfect"),
            Fit::Partial => write!(f, "Partial"),
            Fit::Poor => write!(f, "Poor"),
        }
    }
}

// ==========================================
// 严重度 (Severity)
// ==========================================
// Clear 仅用于"无冲突/无告警"的单条肯定消息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical, // 严重
    Advisory, // 提示
    Clear,    // 无问题
}

impl Severity {
    /// 消息前缀标记
    pub fn marker(&self) -> &'static str {
        match self {
            Severity::Critical => "[CRITICAL]",
            Severity::Advisory => "[ADVISORY]",
            Severity::Clear => "[CLEAR]",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::Advisory => write!(f, "ADVISORY"),
            Severity::Clear => write!(f, "CLEAR"),
        }
    }
}

// ==========================================
// 资源类型 (Resource Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Pilot,
    Drone,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Pilot => "Pilot",
            ResourceKind::Drone => "Drone",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn normalize_enum_text(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
