// ==========================================
// 无人机作业协调系统 - 按编号定位记录
// ==========================================
// 编号比较去除首尾空白、区分大小写
// ==========================================

use crate::domain::{Drone, Mission, Pilot};
use crate::engine::error::{EngineError, EngineResult};

pub fn find_pilot<'a>(pilots: &'a [Pilot], pilot_id: &str) -> EngineResult<&'a Pilot> {
    let pilot_id = pilot_id.trim();
    pilots
        .iter()
        .find(|p| p.pilot_id == pilot_id)
        .ok_or_else(|| EngineError::not_found("Pilot", pilot_id))
}

pub fn find_pilot_mut<'a>(pilots: &'a mut [Pilot], pilot_id: &str) -> EngineResult<&'a mut Pilot> {
    let pilot_id = pilot_id.trim();
    pilots
        .iter_mut()
        .find(|p| p.pilot_id == pilot_id)
        .ok_or_else(|| EngineError::not_found("Pilot", pilot_id))
}

pub fn find_drone<'a>(drones: &'a [Drone], drone_id: &str) -> EngineResult<&'a Drone> {
    let drone_id = drone_id.trim();
    drones
        .iter()
        .find(|d| d.drone_id == drone_id)
        .ok_or_else(|| EngineError::not_found("Drone", drone_id))
}

pub fn find_drone_mut<'a>(drones: &'a mut [Drone], drone_id: &str) -> EngineResult<&'a mut Drone> {
    let drone_id = drone_id.trim();
    drones
        .iter_mut()
        .find(|d| d.drone_id == drone_id)
        .ok_or_else(|| EngineError::not_found("Drone", drone_id))
}

pub fn find_mission<'a>(missions: &'a [Mission], mission_id: &str) -> EngineResult<&'a Mission> {
    let mission_id = mission_id.trim();
    missions
        .iter()
        .find(|m| m.project_id == mission_id)
        .ok_or_else(|| EngineError::not_found("Mission", mission_id))
}
