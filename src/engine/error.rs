// ==========================================
// 无人机作业协调系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 错误文本直接展示给调度员,必须自带原因
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 编号在对应表中不存在
    #[error("{entity} {id} not found.")]
    NotFound { entity: String, id: String },

    /// 参数越界（如状态值不在封闭枚举内）
    #[error("{0}")]
    InvalidArgument(String),

    /// 输入值无法解析
    #[error("Cannot parse '{value}' (expected {expected})")]
    Parse { value: String, expected: String },
}

impl EngineError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        EngineError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
