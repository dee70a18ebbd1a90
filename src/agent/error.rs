// ==========================================
// 无人机作业协调系统 - 对话代理错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("No language model API key configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Language model returned status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Language model returned an empty response")]
    EmptyResponse,

    #[error("Malformed action: {0}")]
    MalformedAction(String),

    #[error("Action pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;
