// ==========================================
// 无人机作业协调系统 - 名册查询
// ==========================================
// 职责: 谓词过滤（AND 组合,忽略大小写子串匹配）
// 红线: 只读,不修改输入;空字段永不匹配
// ==========================================

use crate::domain::tags::{any_tag_contains, contains_ci};
use crate::domain::{Drone, Pilot, WeatherForecast};
use serde::{Deserialize, Serialize};

// ==========================================
// PilotQuery - 飞手过滤条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PilotQuery {
    pub skill: Option<String>,
    pub certification: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

impl PilotQuery {
    /// 是否没有任何条件
    pub fn is_empty(&self) -> bool {
        active(&self.skill).is_none()
            && active(&self.certification).is_none()
            && active(&self.location).is_none()
            && active(&self.status).is_none()
    }

    pub fn matches(&self, pilot: &Pilot) -> bool {
        if let Some(skill) = active(&self.skill) {
            if !any_tag_contains(&pilot.skills, skill) {
                return false;
            }
        }
        if let Some(cert) = active(&self.certification) {
            if !any_tag_contains(&pilot.certifications, cert) {
                return false;
            }
        }
        if let Some(location) = active(&self.location) {
            if !contains_ci(&pilot.location, location) {
                return false;
            }
        }
        if let Some(status) = active(&self.status) {
            if !contains_ci(pilot.status.as_str(), status) {
                return false;
            }
        }
        true
    }

    /// 过滤飞手名册（保持原顺序）
    pub fn filter<'a>(&self, pilots: &'a [Pilot]) -> Vec<&'a Pilot> {
        pilots.iter().filter(|p| self.matches(p)).collect()
    }
}

// ==========================================
// DroneQuery - 无人机过滤条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DroneQuery {
    pub capability: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    /// 天气条件: 仅当为 Rainy 时要求防雨
    pub weather: Option<String>,
}

impl DroneQuery {
    pub fn is_empty(&self) -> bool {
        active(&self.capability).is_none()
            && active(&self.status).is_none()
            && active(&self.location).is_none()
            && active(&self.weather).is_none()
    }

    pub fn matches(&self, drone: &Drone, rain_marker: &str) -> bool {
        if let Some(capability) = active(&self.capability) {
            if !any_tag_contains(&drone.capabilities, capability) {
                return false;
            }
        }
        if let Some(status) = active(&self.status) {
            if !contains_ci(drone.status.as_str(), status) {
                return false;
            }
        }
        if let Some(location) = active(&self.location) {
            if !contains_ci(&drone.location, location) {
                return false;
            }
        }
        if let Some(weather) = active(&self.weather) {
            if WeatherForecast::parse(weather).is_rainy() && !drone.is_rain_capable(rain_marker) {
                return false;
            }
        }
        true
    }

    /// 过滤机队（保持原顺序）
    pub fn filter<'a>(&self, drones: &'a [Drone], rain_marker: &str) -> Vec<&'a Drone> {
        drones
            .iter()
            .filter(|d| self.matches(d, rain_marker))
            .collect()
    }
}

/// 空白条件视为未提供
fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
