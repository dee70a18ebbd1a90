// ==========================================
// 无人机作业协调系统 - 紧急改派规划
// ==========================================
// 职责: 资源失效时为单个任务给出排序后的替补清单
// 输入: MatchEngine 的候选结果
// 输出: ReassignmentPlan（结构化数据 + 文本渲染）
// ==========================================

use crate::config::EngineConfig;
use crate::domain::{Drone, Fit, Mission, Pilot};
use crate::engine::error::EngineResult;
use crate::engine::lookup::find_mission;
use crate::engine::matcher::{DroneCandidate, MatchEngine, PilotCandidate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::info;

pub const NO_PILOTS_MESSAGE: &str = "No suitable pilots available. Consider: extending dates, increasing budget, or cross-location deployment.";
pub const NO_DRONES_MESSAGE: &str =
    "No suitable drones available. Consider: rescheduling or sourcing an external drone.";

/// 改派方案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignmentPlan {
    pub mission: Mission,
    pub pilot_options: Vec<PilotCandidate>,
    pub drone_options: Vec<DroneCandidate>,
}

impl ReassignmentPlan {
    pub fn has_options(&self) -> bool {
        !self.pilot_options.is_empty() || !self.drone_options.is_empty()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ReassignmentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.mission;
        writeln!(
            f,
            "URGENT REASSIGNMENT PLAN for {} ({}, {})",
            m.project_id, m.client, m.location
        )?;
        writeln!(
            f,
            "Priority: {} | Dates: {} to {}",
            m.priority, m.start_date, m.end_date
        )?;
        writeln!(f, "Weather: {} | Budget: ₹{}", m.weather_forecast, m.budget_inr)?;

        writeln!(f)?;
        writeln!(f, "PILOT OPTIONS:")?;
        if self.pilot_options.is_empty() {
            writeln!(f, "  {}", NO_PILOTS_MESSAGE)?;
        }
        for (i, c) in self.pilot_options.iter().enumerate() {
            writeln!(
                f,
                "  {}. {} ({}) - {} - Cost: ₹{} - Issues: {}",
                i + 1,
                c.name,
                c.pilot_id,
                c.fit,
                c.total_cost,
                issue_text(&c.issues)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "DRONE OPTIONS:")?;
        if self.drone_options.is_empty() {
            write!(f, "  {}", NO_DRONES_MESSAGE)?;
        }
        for (i, c) in self.drone_options.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "  {}. {} ({}) - {} - Issues: {}",
                i + 1,
                c.model,
                c.drone_id,
                c.fit,
                issue_text(&c.issues)
            )?;
        }
        Ok(())
    }
}

fn issue_text(issues: &[String]) -> String {
    if issues.is_empty() {
        "None".to_string()
    } else {
        issues.join(", ")
    }
}

// ==========================================
// ReassignmentPlanner
// ==========================================
pub struct ReassignmentPlanner {
    config: Arc<EngineConfig>,
    matcher: MatchEngine,
}

impl ReassignmentPlanner {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            matcher: MatchEngine::new(config.clone()),
            config,
        }
    }

    /// 生成改派方案
    ///
    /// # 返回
    /// - Err(NotFound): 仅在任务编号不存在时
    pub fn plan(
        &self,
        pilots: &[Pilot],
        drones: &[Drone],
        missions: &[Mission],
        mission_id: &str,
    ) -> EngineResult<ReassignmentPlan> {
        let mission = find_mission(missions, mission_id)?;
        let top_n = self.config.reassignment_top_n;

        let pilot_options: Vec<PilotCandidate> = self
            .matcher
            .match_pilots(pilots, missions, &mission.project_id)?
            .into_iter()
            .filter(|c| c.fit >= Fit::Partial)
            .take(top_n)
            .collect();

        let drone_options: Vec<DroneCandidate> = self
            .matcher
            .match_drones(drones, missions, &mission.project_id)?
            .into_iter()
            .filter(|c| c.fit >= Fit::Partial)
            .take(top_n)
            .collect();

        info!(
            mission_id = %mission.project_id,
            pilot_options = pilot_options.len(),
            drone_options = drone_options.len(),
            "改派方案已生成"
        );

        Ok(ReassignmentPlan {
            mission: mission.clone(),
            pilot_options,
            drone_options,
        })
    }
}
