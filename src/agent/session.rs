// ==========================================
// 无人机作业协调系统 - 对话会话
// ==========================================
// 流程: 数据快照 + 用户消息 → 语言模型 → 提取动作块 → 执行一次 → 回复
// 红线: 模型调用失败时不执行任何写入
// ==========================================

use crate::agent::command::{AgentCommand, ParsedAction};
use crate::agent::error::AgentResult;
use crate::agent::llm_client::{ChatMessage, ChatRole, LanguageModel};
use crate::agent::parser::ActionParser;
use crate::agent::prompt::{build_user_prompt, SYSTEM_PROMPT};
use crate::api::{ApiResult, Coordinator};
use crate::engine::MutationOutcome;
use std::sync::Arc;
use tracing::{info, warn};

pub const AGENT_ACTOR: &str = "agent";
pub const UNKNOWN_ACTION: &str = "Unknown action.";
const DEFAULT_MAX_HISTORY: usize = 20;

/// 已执行的动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedAction {
    pub command: Option<AgentCommand>,
    pub result: String,
    /// 成功写入时的结果（供表格同步）
    pub mutation: Option<MutationOutcome>,
}

/// 会话回复
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReply {
    pub text: String,
    pub action: Option<ExecutedAction>,
}

impl AgentReply {
    pub fn mutation(&self) -> Option<&MutationOutcome> {
        self.action.as_ref().and_then(|a| a.mutation.as_ref())
    }
}

pub struct ChatSession {
    model: Arc<dyn LanguageModel>,
    parser: ActionParser,
    history: Vec<ChatMessage>,
    max_history: usize,
}

impl ChatSession {
    pub fn new(model: Arc<dyn LanguageModel>) -> AgentResult<Self> {
        Ok(Self {
            model,
            parser: ActionParser::new()?,
            history: Vec::new(),
            max_history: DEFAULT_MAX_HISTORY,
        })
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// 处理一轮用户消息
    pub async fn respond(&mut self, coordinator: &mut Coordinator, user_message: &str) -> AgentReply {
        let prompt = build_user_prompt(&coordinator.data_snapshot(), user_message);

        let reply_text = match self.model.complete(SYSTEM_PROMPT, &self.history, &prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "语言模型调用失败");
                return AgentReply {
                    text: format!("AI Error: {}. Please check your API key.", e),
                    action: None,
                };
            }
        };

        let action = match self.parser.parse(&reply_text) {
            Ok(Some(ParsedAction::Command(command))) => Some(execute(coordinator, command)),
            Ok(Some(ParsedAction::Unknown(function))) => {
                warn!(function = %function, "未知代理动作");
                Some(ExecutedAction {
                    command: None,
                    result: UNKNOWN_ACTION.to_string(),
                    mutation: None,
                })
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "代理动作解析失败");
                Some(ExecutedAction {
                    command: None,
                    result: e.to_string(),
                    mutation: None,
                })
            }
        };

        let text = match &action {
            Some(executed) => format!("{}\n\nAction Executed: {}", reply_text, executed.result),
            None => reply_text,
        };

        self.push_history(user_message, &text);
        AgentReply { text, action }
    }

    fn push_history(&mut self, user_message: &str, reply: &str) {
        self.history.push(ChatMessage::new(ChatRole::User, user_message));
        self.history.push(ChatMessage::new(ChatRole::Assistant, reply));
        if self.history.len() > self.max_history {
            let excess = self.history.len() - self.max_history;
            self.history.drain(..excess);
        }
    }
}

/// 执行一次动作;引擎错误转为结果文本
fn execute(coordinator: &mut Coordinator, command: AgentCommand) -> ExecutedAction {
    let outcome: ApiResult<(String, Option<MutationOutcome>)> = match &command {
        AgentCommand::UpdatePilotStatus {
            pilot_id,
            new_status,
        } => coordinator
            .update_pilot_status(pilot_id, new_status, AGENT_ACTOR)
            .map(|m| (m.message.clone(), Some(m))),
        AgentCommand::UpdateDroneStatus {
            drone_id,
            new_status,
        } => coordinator
            .update_drone_status(drone_id, new_status, AGENT_ACTOR)
            .map(|m| (m.message.clone(), Some(m))),
        AgentCommand::AssignPilotToMission {
            pilot_id,
            project_id,
        } => coordinator
            .assign_pilot(pilot_id, project_id, AGENT_ACTOR)
            .map(|m| (m.message.clone(), Some(m))),
        AgentCommand::AssignDroneToMission {
            drone_id,
            project_id,
        } => coordinator
            .assign_drone(drone_id, project_id, AGENT_ACTOR)
            .map(|m| (m.message.clone(), Some(m))),
        AgentCommand::RunConflictCheck => Ok((coordinator.detect_conflicts().render(), None)),
        AgentCommand::FindReassignment { project_id } => coordinator
            .plan_reassignment(project_id)
            .map(|plan| (plan.render(), None)),
    };

    match outcome {
        Ok((result, mutation)) => {
            info!(command = ?command, mutation = command.is_mutation(), "代理动作已执行");
            ExecutedAction {
                command: Some(command),
                result,
                mutation,
            }
        }
        Err(e) => ExecutedAction {
            command: Some(command),
            result: e.to_string(),
            mutation: None,
        },
    }
}
