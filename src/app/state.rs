// ==========================================
// 无人机作业协调系统 - 应用状态
// ==========================================
// 职责: 一次会话的全部状态
// - 协调器（当前名册）
// - 加载时的原始名册（用于重置）
// - 表格同步服务
// - 对话会话（未配置 API Key 时为空）
// ==========================================

use crate::agent::{AgentReply, ChatCompletionsClient, ChatSession, LanguageModel};
use crate::api::{ApiError, ApiResult, Coordinator};
use crate::config::{AgentConfig, ConfigManager, EngineConfig};
use crate::db::open_sqlite_connection;
use crate::domain::{ActionType, RosterTables, PILOT_TABLE};
use crate::engine::MutationOutcome;
use crate::importer::RosterImporter;
use crate::sync::{SheetSync, SqliteSheetStore, SyncNotice, SyncService};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// 写入结果 + 表格同步结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationReport {
    pub outcome: MutationOutcome,
    pub sync: SyncNotice,
}

impl MutationReport {
    /// 展示文本: 确认消息,同步告警另起一行
    pub fn render(&self) -> String {
        match &self.sync {
            SyncNotice::Warning(w) => format!("{}\n{}", self.outcome.message, w),
            _ => self.outcome.message.clone(),
        }
    }
}

/// 对话回复 + 表格同步结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReport {
    pub reply: AgentReply,
    pub sync: Option<SyncNotice>,
}

pub struct AppState {
    pub coordinator: Coordinator,
    pub sync: SyncService,
    pub importer: RosterImporter,
    original: RosterTables,
    chat: Option<ChatSession>,
}

impl AppState {
    /// 由已加载的名册创建会话
    pub fn new(tables: RosterTables, config: EngineConfig, sync: SyncService) -> Self {
        let importer = RosterImporter::new(config.mission_id_codec.clone());
        let mut coordinator = Coordinator::new(tables.clone(), Arc::new(config));
        coordinator.log_action(
            ActionType::Load,
            "system",
            format!(
                "Loaded {} pilots, {} drones, {} missions.",
                tables.pilots.len(),
                tables.drones.len(),
                tables.missions.len()
            ),
        );
        Self {
            coordinator,
            sync,
            importer,
            original: tables,
            chat: None,
        }
    }

    /// 按环境变量装配完整会话
    ///
    /// 加载顺序: 数据目录下的 CSV → 表格存储 → 报错
    pub fn from_environment() -> ApiResult<Self> {
        let db_path = get_default_sheet_db_path();
        info!(db_path = %db_path.display(), "打开表格存储");
        let conn = Arc::new(Mutex::new(open_sqlite_connection(
            &db_path.to_string_lossy(),
        )?));

        let config = ConfigManager::from_connection(conn.clone())?.load_engine_config()?;
        let store: Arc<dyn SheetSync> = Arc::new(SqliteSheetStore::new(conn));
        let sync = SyncService::new(Some(store));
        let importer = RosterImporter::new(config.mission_id_codec.clone());

        let data_dir = get_default_data_dir();
        let tables = if data_dir.join(format!("{}.csv", PILOT_TABLE)).exists() {
            importer.load_csv_dir(&data_dir)?
        } else {
            warn!(data_dir = %data_dir.display(), "数据目录无 CSV,改从表格存储加载");
            sync.pull_all(&importer)?
        };

        let mut state = Self::new(tables, config, sync);
        let agent_config = AgentConfig::from_env();
        if agent_config.is_configured() {
            match ChatCompletionsClient::new(&agent_config) {
                Ok(client) => state.attach_model(Arc::new(client))?,
                Err(e) => warn!(error = %e, "语言模型客户端初始化失败,对话功能不可用"),
            }
        }
        Ok(state)
    }

    /// 接入语言模型（测试时注入脚本化模型）
    pub fn attach_model(&mut self, model: Arc<dyn LanguageModel>) -> ApiResult<()> {
        self.chat = Some(ChatSession::new(model)?);
        Ok(())
    }

    pub fn chat_enabled(&self) -> bool {
        self.chat.is_some()
    }

    pub fn original_tables(&self) -> &RosterTables {
        &self.original
    }

    // ==========================================
    // 会话控制
    // ==========================================

    /// 恢复到加载时的名册
    pub fn reset(&mut self) {
        self.coordinator
            .replace_tables(self.original.clone(), ActionType::Reset, "dashboard");
        if let Some(chat) = self.chat.as_mut() {
            chat.clear_history();
        }
    }

    /// 以表格存储内容替换当前名册
    pub fn pull_from_sheet(&mut self) -> ApiResult<()> {
        let tables = self.sync.pull_all(&self.importer)?;
        self.coordinator
            .replace_tables(tables, ActionType::SheetPull, "dashboard");
        Ok(())
    }

    /// 当前名册全量写回表格存储
    pub fn push_to_sheet(&mut self) -> Vec<SyncNotice> {
        let notices = self.sync.push_all(&self.importer, self.coordinator.tables());
        let warnings = notices.iter().filter(|n| n.is_warning()).count();
        self.coordinator.log_action(
            ActionType::SheetPush,
            "dashboard",
            format!("Pushed 3 tables ({} warnings).", warnings),
        );
        notices
    }

    // ==========================================
    // 写入 + 镜像
    // ==========================================

    pub fn set_pilot_status(&mut self, pilot_id: &str, status: &str, actor: &str) -> ApiResult<MutationReport> {
        let outcome = self.coordinator.update_pilot_status(pilot_id, status, actor)?;
        Ok(self.mirror(outcome))
    }

    pub fn set_drone_status(&mut self, drone_id: &str, status: &str, actor: &str) -> ApiResult<MutationReport> {
        let outcome = self.coordinator.update_drone_status(drone_id, status, actor)?;
        Ok(self.mirror(outcome))
    }

    pub fn assign_pilot(&mut self, pilot_id: &str, mission_id: &str, actor: &str) -> ApiResult<MutationReport> {
        let outcome = self.coordinator.assign_pilot(pilot_id, mission_id, actor)?;
        Ok(self.mirror(outcome))
    }

    pub fn assign_drone(&mut self, drone_id: &str, mission_id: &str, actor: &str) -> ApiResult<MutationReport> {
        let outcome = self.coordinator.assign_drone(drone_id, mission_id, actor)?;
        Ok(self.mirror(outcome))
    }

    fn mirror(&self, outcome: MutationOutcome) -> MutationReport {
        let sync = self.sync.sync_mutation(&outcome);
        MutationReport { outcome, sync }
    }

    // ==========================================
    // 对话
    // ==========================================

    pub async fn chat(&mut self, message: &str) -> ApiResult<ChatReport> {
        let chat = self.chat.as_mut().ok_or_else(|| {
            ApiError::ExternalService(
                "Chat is unavailable: set SKYOPS_LLM_API_KEY to enable the assistant.".to_string(),
            )
        })?;
        let reply = chat.respond(&mut self.coordinator, message).await;
        let sync = reply.mutation().map(|m| self.sync.sync_mutation(m));
        Ok(ChatReport { reply, sync })
    }
}

// ==========================================
// 路径解析
// ==========================================

/// 默认数据目录（存放 pilot_roster.csv / drone_fleet.csv / missions.csv）
///
/// # 返回
/// - SKYOPS_DATA_DIR 环境变量（若设置）
/// - 否则: ./data（存在时）
/// - 否则: 用户数据目录/skyops/data
pub fn get_default_data_dir() -> PathBuf {
    if let Some(dir) = env_path("SKYOPS_DATA_DIR") {
        return dir;
    }
    let local = PathBuf::from("./data");
    if local.exists() {
        return local;
    }
    app_data_root().join("data")
}

/// 默认表格存储路径
///
/// # 返回
/// - SKYOPS_SHEET_DB 环境变量（若设置）
/// - 否则: 用户数据目录/skyops/skyops_sheets.db
pub fn get_default_sheet_db_path() -> PathBuf {
    if let Some(path) = env_path("SKYOPS_SHEET_DB") {
        return path;
    }
    let root = app_data_root();
    if let Err(e) = std::fs::create_dir_all(&root) {
        warn!(dir = %root.display(), error = %e, "创建数据目录失败");
    }
    root.join("skyops_sheets.db")
}

fn app_data_root() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("skyops"))
        .unwrap_or_else(|| Path::new(".").join(".skyops"))
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
