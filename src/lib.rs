// ==========================================
// 无人机作业协调系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite（表格镜像）+ OpenAI 兼容对话接口
// 系统定位: 协调辅助（确定性引擎 + 可选自然语言代理）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 表格同步层
pub mod sync;

// API 层 - 协调器
pub mod api;

// 对话代理层
pub mod agent;

// 应用层 - 会话状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    DroneStatus, Fit, MissionPriority, PilotStatus, ResourceKind, Severity, WeatherForecast,
};

// 领域实体
pub use domain::{ActionLog, ActionType, Drone, Mission, MissionIdCodec, Pilot, RosterTables};

// 引擎
pub use engine::{
    ConflictDetector, CostCalculator, MaintenanceMonitor, MatchEngine, ReassignmentPlanner,
    RosterMutator, RosterReports,
};

// API
pub use api::{ApiError, ApiResult, Coordinator};

// 应用
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "SkyOps Drone Operations Coordinator";
