// ==========================================
// 无人机作业协调系统 - 语言模型接入配置
// ==========================================
// 来源: 环境变量
// - SKYOPS_LLM_API_KEY   : API Key（缺失时对话功能不可用）
// - SKYOPS_LLM_BASE_URL  : OpenAI 兼容接口地址
// - SKYOPS_LLM_MODEL     : 模型名称
// - SKYOPS_LLM_TIMEOUT_SECS
// ==========================================

use serde::{Deserialize, Serialize};

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_LLM_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

impl AgentConfig {
    /// 从环境变量读取,缺省项使用默认值
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(key) = non_empty_env("SKYOPS_LLM_API_KEY") {
            config.api_key = Some(key);
        }
        if let Some(url) = non_empty_env("SKYOPS_LLM_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = non_empty_env("SKYOPS_LLM_MODEL") {
            config.model = model;
        }
        if let Some(secs) = non_empty_env("SKYOPS_LLM_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(v) => config.timeout_secs = v,
                Err(e) => tracing::warn!("SKYOPS_LLM_TIMEOUT_SECS 无效（{}），使用默认值", e),
            }
        }
        config
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
