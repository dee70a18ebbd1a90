// ==========================================
// 无人机作业协调系统 - 候选匹配引擎
// ==========================================
// 职责: 对每位飞手/每架无人机独立评分,按分数降序稳定排序
// 输入: 名册 + 任务编号
// 输出: 候选列表（长度 = 名册规模）,每项带扣分原因
// ==========================================
// 红线: 只读;数据质量问题只产生 issue,不报错
// ==========================================

use crate::config::EngineConfig;
use crate::domain::tags::{eq_ci, format_tag_list};
use crate::domain::{Drone, DroneStatus, Fit, Mission, Pilot, PilotStatus};
use crate::engine::error::EngineResult;
use crate::engine::lookup::find_mission;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

// ===== 飞手评分项 =====
const PILOT_SKILL_POINTS: u32 = 3;
const PILOT_CERT_POINTS: u32 = 3;
const PILOT_LOCATION_POINTS: u32 = 2;
const PILOT_AVAILABLE_POINTS: u32 = 2;
const PILOT_RETURNING_POINTS: u32 = 1;
const PILOT_BUDGET_POINTS: u32 = 2;

// ===== 无人机评分项 =====
const DRONE_CAPABILITY_POINTS: u32 = 3;
const DRONE_WEATHER_POINTS: u32 = 3;
const DRONE_AVAILABLE_POINTS: u32 = 2;
const DRONE_LOCATION_POINTS: u32 = 2;

/// 飞手候选
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotCandidate {
    pub pilot_id: String,
    pub name: String,
    pub score: u32,
    /// 任务全程费用（始终给出,便于预算判断）
    pub total_cost: u64,
    pub issues: Vec<String>,
    pub fit: Fit,
}

/// 无人机候选
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroneCandidate {
    pub drone_id: String,
    pub model: String,
    pub score: u32,
    pub issues: Vec<String>,
    pub fit: Fit,
}

// ==========================================
// MatchEngine - 候选匹配引擎
// ==========================================
pub struct MatchEngine {
    config: Arc<EngineConfig>,
}

impl MatchEngine {
    /// 创建匹配引擎
    ///
    /// # 参数
    /// - config: 评分阈值与技能→载荷映射
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    // ==========================================
    // 飞手
    // ==========================================

    /// 为任务给全部飞手评分
    ///
    /// # 返回
    /// - Ok(Vec<PilotCandidate>): 按分数降序,同分保持名册顺序
    /// - Err(NotFound): 任务编号不存在
    #[instrument(skip(self, pilots, missions), fields(pilots = pilots.len()))]
    pub fn match_pilots(
        &self,
        pilots: &[Pilot],
        missions: &[Mission],
        mission_id: &str,
    ) -> EngineResult<Vec<PilotCandidate>> {
        let mission = find_mission(missions, mission_id)?;
        let mut candidates: Vec<PilotCandidate> =
            pilots.iter().map(|p| self.score_pilot(p, mission)).collect();
        // sort_by 为稳定排序
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(candidates)
    }

    /// 单个飞手评分
    pub fn score_pilot(&self, pilot: &Pilot, mission: &Mission) -> PilotCandidate {
        let mut score = 0;
        let mut issues = Vec::new();

        // 1. 技能
        let missing_skills = pilot.missing_skills(&mission.required_skills);
        if missing_skills.is_empty() {
            score += PILOT_SKILL_POINTS;
        } else {
            issues.push(format!(
                "Missing skill(s): {}",
                format_tag_list(&missing_skills)
            ));
        }

        // 2. 证书
        let missing_certs = pilot.missing_certifications(&mission.required_certs);
        if missing_certs.is_empty() {
            score += PILOT_CERT_POINTS;
        } else {
            issues.push(format!(
                "Missing cert(s): {}",
                format_tag_list(&missing_certs)
            ));
        }

        // 3. 地点
        if eq_ci(&pilot.location, &mission.location) {
            score += PILOT_LOCATION_POINTS;
        } else {
            issues.push(format!(
                "Location mismatch: pilot in {}, mission in {}",
                pilot.location, mission.location
            ));
        }

        // 4. 状态
        match pilot.status {
            PilotStatus::Available => score += PILOT_AVAILABLE_POINTS,
            PilotStatus::OnLeave => match pilot.available_from {
                Some(back) if back <= mission.start_date => {
                    score += PILOT_RETURNING_POINTS;
                    issues.push(format!(
                        "On leave until {}, but available before mission start",
                        back
                    ));
                }
                Some(back) => issues.push(format!(
                    "On leave until {} (after mission start {})",
                    back, mission.start_date
                )),
                None => issues.push("On leave (return date unknown)".to_string()),
            },
            other => issues.push(format!("Status: {}", other)),
        }

        // 5. 预算
        let days = mission.duration_days();
        let total_cost = pilot.cost_for_days(days);
        if total_cost <= mission.budget_inr {
            score += PILOT_BUDGET_POINTS;
        } else {
            issues.push(format!(
                "Over budget: ₹{} > ₹{} budget",
                total_cost, mission.budget_inr
            ));
        }

        let fit = Fit::from_score(
            score,
            self.config.pilot_perfect_threshold,
            self.config.pilot_partial_threshold,
        );
        debug!(
            pilot_id = %pilot.pilot_id,
            mission_id = %mission.project_id,
            score,
            fit = %fit,
            issues = issues.len(),
            "飞手评分"
        );

        PilotCandidate {
            pilot_id: pilot.pilot_id.clone(),
            name: pilot.name.clone(),
            score,
            total_cost,
            issues,
            fit,
        }
    }

    // ==========================================
    // 无人机
    // ==========================================

    /// 为任务给全部无人机评分
    ///
    /// # 返回
    /// - Ok(Vec<DroneCandidate>): 按分数降序,同分保持机队顺序
    /// - Err(NotFound): 任务编号不存在
    #[instrument(skip(self, drones, missions), fields(drones = drones.len()))]
    pub fn match_drones(
        &self,
        drones: &[Drone],
        missions: &[Mission],
        mission_id: &str,
    ) -> EngineResult<Vec<DroneCandidate>> {
        let mission = find_mission(missions, mission_id)?;
        let mut candidates: Vec<DroneCandidate> =
            drones.iter().map(|d| self.score_drone(d, mission)).collect();
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(candidates)
    }

    /// 单架无人机评分
    pub fn score_drone(&self, drone: &Drone, mission: &Mission) -> DroneCandidate {
        let mut score = 0;
        let mut issues = Vec::new();

        // 1. 载荷能力: 需求为空或命中任一即可
        let needed = self.config.needed_capabilities(&mission.required_skills);
        let has_any = needed.is_empty()
            || needed
                .iter()
                .any(|cap| drone.capabilities.iter().any(|c| eq_ci(c, cap)));
        if has_any {
            score += DRONE_CAPABILITY_POINTS;
        } else {
            issues.push(format!(
                "Missing capabilities: needs {}, has {}",
                format_tag_list(&needed),
                format_tag_list(&drone.capabilities)
            ));
        }

        // 2. 天气
        let rain_ok = drone.is_rain_capable(&self.config.rain_capable_marker);
        if !mission.weather_forecast.is_rainy() || rain_ok {
            score += DRONE_WEATHER_POINTS;
        } else {
            issues.push(format!(
                "Not rain-rated ({}), mission forecast: Rainy",
                drone.weather_resistance
            ));
        }

        // 3. 状态
        match drone.status {
            DroneStatus::Available => score += DRONE_AVAILABLE_POINTS,
            DroneStatus::Maintenance => issues.push("Currently in Maintenance".to_string()),
            other => issues.push(format!("Status: {}", other)),
        }

        // 4. 地点
        if eq_ci(&drone.location, &mission.location) {
            score += DRONE_LOCATION_POINTS;
        } else {
            issues.push(format!(
                "Location mismatch: drone in {}, mission in {}",
                drone.location, mission.location
            ));
        }

        let fit = Fit::from_score(
            score,
            self.config.drone_perfect_threshold,
            self.config.drone_partial_threshold,
        );
        debug!(
            drone_id = %drone.drone_id,
            mission_id = %mission.project_id,
            score,
            fit = %fit,
            "无人机评分"
        );

        DroneCandidate {
            drone_id: drone.drone_id.clone(),
            model: drone.model.clone(),
            score,
            issues,
            fit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MissionPriority, WeatherForecast};
    use crate::engine::error::EngineError;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn engine() -> MatchEngine {
        MatchEngine::new(Arc::new(EngineConfig::default()))
    }

    fn arjun() -> Pilot {
        Pilot {
            pilot_id: "P001".to_string(),
            name: "Arjun".to_string(),
            skills: vec!["Mapping".to_string(), "Survey".to_string()],
            certifications: vec!["DGCA".to_string()],
            location: "Bangalore".to_string(),
            status: PilotStatus::Available,
            current_assignment: None,
            available_from: None,
            daily_rate_inr: 5000,
        }
    }

    fn mission(location: &str, weather: WeatherForecast) -> Mission {
        Mission {
            project_id: "PRJ001".to_string(),
            client: "Client A".to_string(),
            location: location.to_string(),
            required_skills: vec!["Mapping".to_string()],
            required_certs: vec![],
            start_date: date("2026-02-06"),
            end_date: date("2026-02-08"),
            priority: MissionPriority::High,
            budget_inr: 20000,
            weather_forecast: weather,
        }
    }

    fn drone(id: &str, caps: &[&str], weather: &str, status: DroneStatus) -> Drone {
        Drone {
            drone_id: id.to_string(),
            model: "DJI M300".to_string(),
            capabilities: caps.iter().map(|c| c.to_string()).collect(),
            status,
            location: "Bangalore".to_string(),
            current_assignment: None,
            maintenance_due: None,
            weather_resistance: weather.to_string(),
        }
    }

    #[test]
    fn test_perfect_pilot_scores_twelve() {
        let candidate = engine().score_pilot(&arjun(), &mission("Bangalore", WeatherForecast::Sunny));
        assert_eq!(candidate.score, 12);
        assert_eq!(candidate.fit, Fit::Perfect);
        assert_eq!(candidate.total_cost, 15000);
        assert!(candidate.issues.is_empty());
    }

    #[test]
    fn test_location_mismatch_costs_two_points() {
        let candidate = engine().score_pilot(&arjun(), &mission("Mumbai", WeatherForecast::Sunny));
        assert_eq!(candidate.score, 10);
        assert_eq!(candidate.fit, Fit::Perfect);
        assert_eq!(
            candidate.issues,
            vec!["Location mismatch: pilot in Bangalore, mission in Mumbai".to_string()]
        );
    }

    #[test]
    fn test_missing_skill_withholds_points() {
        let mut pilot = arjun();
        pilot.skills = vec!["Inspection".to_string()];
        let candidate = engine().score_pilot(&pilot, &mission("Bangalore", WeatherForecast::Sunny));
        assert_eq!(candidate.score, 9);
        assert_eq!(candidate.issues[0], "Missing skill(s): ['Mapping']");
    }

    #[test]
    fn test_on_leave_variants() {
        let m = mission("Bangalore", WeatherForecast::Sunny);
        let mut pilot = arjun();
        pilot.status = PilotStatus::OnLeave;

        pilot.available_from = Some(date("2026-02-05"));
        let early = engine().score_pilot(&pilot, &m);
        assert_eq!(early.score, 11);
        assert!(early.issues[0].contains("but available before mission start"));

        pilot.available_from = Some(date("2026-02-10"));
        let late = engine().score_pilot(&pilot, &m);
        assert_eq!(late.score, 10);
        assert_eq!(
            late.issues[0],
            "On leave until 2026-02-10 (after mission start 2026-02-06)"
        );
    }

    #[test]
    fn test_over_budget_issue() {
        let mut pilot = arjun();
        pilot.daily_rate_inr = 9000;
        let candidate = engine().score_pilot(&pilot, &mission("Bangalore", WeatherForecast::Sunny));
        assert_eq!(candidate.score, 10);
        assert_eq!(candidate.issues, vec!["Over budget: ₹27000 > ₹20000 budget".to_string()]);
    }

    #[test]
    fn test_drone_rain_rule() {
        let m = mission("Bangalore", WeatherForecast::Rainy);
        let rated = engine().score_drone(&drone("D001", &["LiDAR"], "IP43 (Rain)", DroneStatus::Available), &m);
        let unrated = engine().score_drone(&drone("D002", &["LiDAR"], "None", DroneStatus::Available), &m);
        assert_eq!(rated.score, 10);
        assert_eq!(rated.fit, Fit::Perfect);
        assert_eq!(unrated.score, 7);
        assert_eq!(unrated.fit, Fit::Partial);
        assert_eq!(unrated.issues, vec!["Not rain-rated (None), mission forecast: Rainy".to_string()]);
    }

    #[test]
    fn test_drone_capability_and_maintenance() {
        let m = mission("Bangalore", WeatherForecast::Sunny);
        let candidate =
            engine().score_drone(&drone("D003", &["Thermal"], "None", DroneStatus::Maintenance), &m);
        assert_eq!(candidate.score, 5);
        assert_eq!(
            candidate.issues,
            vec![
                "Missing capabilities: needs ['LiDAR', 'RGB'], has ['Thermal']".to_string(),
                "Currently in Maintenance".to_string(),
            ]
        );
    }

    #[test]
    fn test_ranking_is_stable_and_complete() {
        let mut second = arjun();
        second.pilot_id = "P002".to_string();
        let mut third = arjun();
        third.pilot_id = "P003".to_string();
        third.location = "Delhi".to_string();
        let pilots = vec![third, arjun(), second];
        let missions = vec![mission("Bangalore", WeatherForecast::Sunny)];

        let ranked = engine().match_pilots(&pilots, &missions, "PRJ001").unwrap();
        let ids: Vec<&str> = ranked.iter().map(|c| c.pilot_id.as_str()).collect();
        assert_eq!(ids, vec!["P001", "P002", "P003"]);
    }

    #[test]
    fn test_unknown_mission() {
        let result = engine().match_drones(&[], &[], "PRJ404");
        assert_eq!(result, Err(EngineError::not_found("Mission", "PRJ404")));
    }
}
