// ==========================================
// 无人机作业协调系统 - 配置层
// ==========================================
// 职责: 引擎阈值配置（config_kv 覆写）+ 语言模型接入配置（环境变量）
// ==========================================

pub mod agent_config;
pub mod config_manager;
pub mod engine_config;

// 重导出
pub use agent_config::AgentConfig;
pub use config_manager::{config_keys, ConfigError, ConfigManager};
pub use engine_config::EngineConfig;
