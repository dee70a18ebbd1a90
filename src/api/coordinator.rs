// ==========================================
// 无人机作业协调系统 - 协调器
// ==========================================
// 职责: 持有三张表,对外提供全部查询/评分/检测/写入操作
// 红线: 写入先校验后一次性生效;每次成功写入追加操作日志
// 并发: 单写者,调用方通过 &mut 借用串行化写入
// ==========================================

use crate::api::error::ApiResult;
use crate::config::EngineConfig;
use crate::domain::{
    ActionLog, ActionType, Drone, Mission, Pilot, RosterTables,
};
use crate::engine::{
    AssignmentRow, BudgetCheck, ConflictDetector, ConflictReport, CostCalculator, CostQuote,
    DashboardSummary, DroneCandidate, DroneQuery, MaintenanceAlert, MaintenanceMonitor,
    MatchEngine, MutationOutcome, PilotCandidate, PilotQuery, ReassignmentPlan,
    ReassignmentPlanner, RosterMutator, RosterReports,
};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

pub struct Coordinator {
    config: Arc<EngineConfig>,
    tables: RosterTables,
    action_log: Vec<ActionLog>,
    matcher: MatchEngine,
    detector: ConflictDetector,
    planner: ReassignmentPlanner,
    maintenance: MaintenanceMonitor,
}

impl Coordinator {
    /// 创建协调器
    ///
    /// # 参数
    /// - tables: 已加载（并规范化）的名册
    /// - config: 引擎配置
    pub fn new(tables: RosterTables, config: Arc<EngineConfig>) -> Self {
        Self {
            matcher: MatchEngine::new(config.clone()),
            detector: ConflictDetector::new(config.clone()),
            planner: ReassignmentPlanner::new(config.clone()),
            maintenance: MaintenanceMonitor::new(config.maintenance_warning_days),
            config,
            tables,
            action_log: Vec::new(),
        }
    }

    // ==========================================
    // 数据访问
    // ==========================================

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tables(&self) -> &RosterTables {
        &self.tables
    }

    pub fn pilots(&self) -> &[Pilot] {
        &self.tables.pilots
    }

    pub fn drones(&self) -> &[Drone] {
        &self.tables.drones
    }

    pub fn missions(&self) -> &[Mission] {
        &self.tables.missions
    }

    pub fn action_log(&self) -> &[ActionLog] {
        &self.action_log
    }

    /// 整体替换名册（重置 / 从表格拉取）
    pub fn replace_tables(&mut self, tables: RosterTables, action_type: ActionType, actor: &str) {
        let detail = format!(
            "Loaded {} pilots, {} drones, {} missions.",
            tables.pilots.len(),
            tables.drones.len(),
            tables.missions.len()
        );
        self.tables = tables;
        info!(action = action_type.as_str(), actor, "名册已替换");
        self.action_log
            .push(ActionLog::new(action_type, actor, None, detail));
    }

    // ==========================================
    // 查询与计费
    // ==========================================

    pub fn query_pilots(&self, query: &PilotQuery) -> Vec<&Pilot> {
        query.filter(&self.tables.pilots)
    }

    pub fn query_drones(&self, query: &DroneQuery) -> Vec<&Drone> {
        query.filter(&self.tables.drones, &self.config.rain_capable_marker)
    }

    pub fn calculate_pilot_cost(
        &self,
        pilot_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> ApiResult<CostQuote> {
        Ok(CostCalculator::calculate_pilot_cost(
            &self.tables.pilots,
            pilot_id,
            start_date,
            end_date,
        )?)
    }

    pub fn check_pilot_budget(&self, pilot_id: &str, mission_id: &str) -> ApiResult<BudgetCheck> {
        Ok(CostCalculator::check_against_mission(
            &self.tables.pilots,
            &self.tables.missions,
            pilot_id,
            mission_id,
        )?)
    }

    // ==========================================
    // 匹配 / 冲突 / 改派
    // ==========================================

    pub fn match_pilots(&self, mission_id: &str) -> ApiResult<Vec<PilotCandidate>> {
        Ok(self
            .matcher
            .match_pilots(&self.tables.pilots, &self.tables.missions, mission_id)?)
    }

    pub fn match_drones(&self, mission_id: &str) -> ApiResult<Vec<DroneCandidate>> {
        Ok(self
            .matcher
            .match_drones(&self.tables.drones, &self.tables.missions, mission_id)?)
    }

    pub fn detect_conflicts(&self) -> ConflictReport {
        self.detector.detect(
            &self.tables.pilots,
            &self.tables.drones,
            &self.tables.missions,
        )
    }

    pub fn plan_reassignment(&self, mission_id: &str) -> ApiResult<ReassignmentPlan> {
        Ok(self.planner.plan(
            &self.tables.pilots,
            &self.tables.drones,
            &self.tables.missions,
            mission_id,
        )?)
    }

    pub fn maintenance_alerts(&self, today: NaiveDate) -> Vec<MaintenanceAlert> {
        self.maintenance.scan(&self.tables.drones, today)
    }

    // ==========================================
    // 报表
    // ==========================================

    pub fn current_assignments(&self) -> Vec<AssignmentRow> {
        RosterReports::current_assignments(&self.tables.pilots)
    }

    pub fn render_current_assignments(&self) -> String {
        RosterReports::render_current_assignments(&self.tables.pilots)
    }

    pub fn dashboard_summary(&self) -> DashboardSummary {
        RosterReports::dashboard_summary(
            &self.tables.pilots,
            &self.tables.drones,
            &self.tables.missions,
            &self.detect_conflicts(),
        )
    }

    pub fn data_snapshot(&self) -> String {
        RosterReports::data_snapshot(
            &self.tables.pilots,
            &self.tables.drones,
            &self.tables.missions,
        )
    }

    // ==========================================
    // 写入
    // ==========================================

    pub fn update_pilot_status(
        &mut self,
        pilot_id: &str,
        new_status: &str,
        actor: &str,
    ) -> ApiResult<MutationOutcome> {
        let outcome = RosterMutator::update_pilot_status(&mut self.tables.pilots, pilot_id, new_status)?;
        self.record(ActionType::StatusUpdate, actor, &outcome);
        Ok(outcome)
    }

    pub fn update_drone_status(
        &mut self,
        drone_id: &str,
        new_status: &str,
        actor: &str,
    ) -> ApiResult<MutationOutcome> {
        let outcome = RosterMutator::update_drone_status(&mut self.tables.drones, drone_id, new_status)?;
        self.record(ActionType::StatusUpdate, actor, &outcome);
        Ok(outcome)
    }

    pub fn assign_pilot(
        &mut self,
        pilot_id: &str,
        mission_id: &str,
        actor: &str,
    ) -> ApiResult<MutationOutcome> {
        let outcome = RosterMutator::assign_pilot(
            &mut self.tables.pilots,
            &self.tables.missions,
            pilot_id,
            mission_id,
        )?;
        self.record(ActionType::Assign, actor, &outcome);
        Ok(outcome)
    }

    pub fn assign_drone(
        &mut self,
        drone_id: &str,
        mission_id: &str,
        actor: &str,
    ) -> ApiResult<MutationOutcome> {
        let outcome = RosterMutator::assign_drone(
            &mut self.tables.drones,
            &self.tables.missions,
            drone_id,
            mission_id,
        )?;
        self.record(ActionType::Assign, actor, &outcome);
        Ok(outcome)
    }

    /// 追加外部同步等非写表操作的日志
    pub fn log_action(&mut self, action_type: ActionType, actor: &str, detail: impl Into<String>) {
        self.action_log
            .push(ActionLog::new(action_type, actor, None, detail));
    }

    fn record(&mut self, action_type: ActionType, actor: &str, outcome: &MutationOutcome) {
        self.action_log.push(ActionLog::new(
            action_type,
            actor,
            Some((outcome.resource_kind, outcome.resource_id.as_str())),
            outcome.message.clone(),
        ));
    }
}
