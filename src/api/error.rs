// ==========================================
// 无人机作业协调系统 - API层错误类型
// ==========================================
// 职责: 汇总各层错误,转换为面向调度员的消息
// 说明: 引擎错误文本原样透出,不再加前缀
// ==========================================

use crate::agent::AgentError;
use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::importer::ImportError;
use crate::sync::{PullError, SyncError};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    ParseError(String),

    // ==========================================
    // 外部协作方错误
    // ==========================================
    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("Sheet sync failed: {0}")]
    Sync(#[from] SyncError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("Internal error: {0}")]
    InternalError(String),
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            EngineError::InvalidArgument(msg) => ApiError::InvalidArgument(msg),
            EngineError::Parse { .. } => ApiError::ParseError(err.to_string()),
        }
    }
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::MalformedAction(msg) => ApiError::ParseError(msg),
            other => ApiError::ExternalService(other.to_string()),
        }
    }
}

impl From<PullError> for ApiError {
    fn from(err: PullError) -> Self {
        match err {
            PullError::Sync(e) => ApiError::Sync(e),
            PullError::Import(e) => ApiError::Import(e),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_messages_pass_through() {
        let err: ApiError = EngineError::not_found("Pilot", "P999").into();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.to_string(), "Pilot P999 not found.");

        let err: ApiError = EngineError::Parse {
            value: "tomorrow".to_string(),
            expected: "a date".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::ParseError(_)));
    }
}
