// ==========================================
// 无人机作业协调系统 - API层
// ==========================================
// 职责: 对外暴露协调器与统一错误类型
// ==========================================

pub mod coordinator;
pub mod error;

pub use coordinator::Coordinator;
pub use error::{ApiError, ApiResult};
