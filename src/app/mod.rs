// ==========================================
// 无人机作业协调系统 - 应用层
// ==========================================
// 职责: 会话状态装配,连接展示层（CLI）与协调器
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_data_dir, get_default_sheet_db_path, AppState, ChatReport, MutationReport};
