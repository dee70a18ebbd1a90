// ==========================================
// 无人机作业协调系统 - 语言模型客户端
// ==========================================
// LanguageModel: 会话层依赖的抽象
// ChatCompletionsClient: OpenAI 兼容 /chat/completions 接口实现
// ==========================================

use crate::agent::error::{AgentError, AgentResult};
use crate::config::AgentConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

// ==========================================
// LanguageModel Trait
// ==========================================
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// 生成回复
    ///
    /// # 参数
    /// - system: 系统提示词
    /// - history: 既往对话（不含本轮）
    /// - prompt: 本轮用户消息（已拼接数据快照）
    async fn complete(
        &self,
        system: &str,
        history: &[ChatMessage],
        prompt: &str,
    ) -> AgentResult<String>;
}

// ==========================================
// ChatCompletionsClient
// ==========================================
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionsClient {
    pub fn new(config: &AgentConfig) -> AgentResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(AgentError::MissingApiKey)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl LanguageModel for ChatCompletionsClient {
    async fn complete(
        &self,
        system: &str,
        history: &[ChatMessage],
        prompt: &str,
    ) -> AgentResult<String> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::new(ChatRole::System, system));
        messages.extend(history.iter().cloned());
        messages.push(ChatMessage::new(ChatRole::User, prompt));

        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: 0.3,
        };

        debug!(model = %self.model, turns = history.len(), "调用语言模型");
        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AgentError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = resp.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(AgentError::EmptyResponse)
    }
}
