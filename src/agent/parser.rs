// ==========================================
// 无人机作业协调系统 - 动作块提取
// ==========================================
// 模型回复中以 ```action ... ``` 围起的 JSON 为动作;只取第一块
// ==========================================

use crate::agent::command::{AgentCommand, ParsedAction};
use crate::agent::error::AgentResult;
use regex::Regex;

const ACTION_BLOCK_PATTERN: &str = r"(?s)```action\s*\n(.*?)\n\s*```";

pub struct ActionParser {
    block: Regex,
}

impl ActionParser {
    pub fn new() -> AgentResult<Self> {
        Ok(Self {
            block: Regex::new(ACTION_BLOCK_PATTERN)?,
        })
    }

    /// 提取动作块正文
    pub fn extract_block<'a>(&self, reply: &'a str) -> Option<&'a str> {
        self.block
            .captures(reply)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    }

    /// 提取并解析动作
    ///
    /// # 返回
    /// - Ok(None): 回复中没有动作块
    /// - Ok(Some(..)): 已解析的动作（可能为未知动作）
    /// - Err: 动作块内容非法
    pub fn parse(&self, reply: &str) -> AgentResult<Option<ParsedAction>> {
        match self.extract_block(reply) {
            Some(body) => AgentCommand::parse(body).map(Some),
            None => Ok(None),
        }
    }
}
