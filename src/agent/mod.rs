// ==========================================
// 无人机作业协调系统 - 对话代理层
// ==========================================
// 职责: 语言模型只负责理解自然语言;引擎只执行结构化动作
// ==========================================

pub mod command;
pub mod error;
pub mod llm_client;
pub mod parser;
pub mod prompt;
pub mod session;

pub use command::{AgentCommand, ParsedAction};
pub use error::{AgentError, AgentResult};
pub use llm_client::{ChatCompletionsClient, ChatMessage, ChatRole, LanguageModel};
pub use parser::ActionParser;
pub use session::{AgentReply, ChatSession, ExecutedAction};
