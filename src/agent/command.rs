// ==========================================
// 无人机作业协调系统 - 代理动作
// ==========================================
// 动作是封闭的标签联合: function 决定变体,args 严格按变体校验
// 未知 function 不报错,交由会话回复 "Unknown action."
// ==========================================

use crate::agent::error::{AgentError, AgentResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentCommand {
    UpdatePilotStatus { pilot_id: String, new_status: String },
    UpdateDroneStatus { drone_id: String, new_status: String },
    AssignPilotToMission { pilot_id: String, project_id: String },
    AssignDroneToMission { drone_id: String, project_id: String },
    RunConflictCheck,
    FindReassignment { project_id: String },
}

/// 解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAction {
    Command(AgentCommand),
    Unknown(String),
}

// ===== 线上格式 =====

#[derive(Debug, Deserialize)]
struct RawAction {
    function: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PilotStatusArgs {
    pilot_id: String,
    new_status: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DroneStatusArgs {
    drone_id: String,
    new_status: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AssignPilotArgs {
    pilot_id: String,
    project_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AssignDroneArgs {
    drone_id: String,
    project_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectArgs {
    project_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NoArgs {}

impl AgentCommand {
    /// 从动作 JSON 解析
    ///
    /// # 返回
    /// - Ok(Command): function 已知且 args 完整
    /// - Ok(Unknown): function 不在动作集合内
    /// - Err(MalformedAction): JSON 非法,或 args 缺失/多余字段
    pub fn parse(json: &str) -> AgentResult<ParsedAction> {
        let raw: RawAction = serde_json::from_str(json)
            .map_err(|e| AgentError::MalformedAction(e.to_string()))?;

        let command = match raw.function.as_str() {
            "update_pilot_status" => {
                let a: PilotStatusArgs = args(raw.args)?;
                AgentCommand::UpdatePilotStatus {
                    pilot_id: a.pilot_id,
                    new_status: a.new_status,
                }
            }
            "update_drone_status" => {
                let a: DroneStatusArgs = args(raw.args)?;
                AgentCommand::UpdateDroneStatus {
                    drone_id: a.drone_id,
                    new_status: a.new_status,
                }
            }
            "assign_pilot_to_mission" => {
                let a: AssignPilotArgs = args(raw.args)?;
                AgentCommand::AssignPilotToMission {
                    pilot_id: a.pilot_id,
                    project_id: a.project_id,
                }
            }
            "assign_drone_to_mission" => {
                let a: AssignDroneArgs = args(raw.args)?;
                AgentCommand::AssignDroneToMission {
                    drone_id: a.drone_id,
                    project_id: a.project_id,
                }
            }
            "run_conflict_check" => {
                // args 可省略;给出时必须为空对象
                if !raw.args.is_null() {
                    let _: NoArgs = args(raw.args)?;
                }
                AgentCommand::RunConflictCheck
            }
            "find_reassignment" => {
                let a: ProjectArgs = args(raw.args)?;
                AgentCommand::FindReassignment {
                    project_id: a.project_id,
                }
            }
            other => return Ok(ParsedAction::Unknown(other.to_string())),
        };
        Ok(ParsedAction::Command(command))
    }

    /// 是否修改名册
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            AgentCommand::RunConflictCheck | AgentCommand::FindReassignment { .. }
        )
    }
}

fn args<T: DeserializeOwned>(value: Value) -> AgentResult<T> {
    serde_json::from_value(value).map_err(|e| AgentError::MalformedAction(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_action() {
        let parsed = AgentCommand::parse(
            r#"{"function": "update_pilot_status", "args": {"pilot_id": "P001", "new_status": "On Leave"}}"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            ParsedAction::Command(AgentCommand::UpdatePilotStatus {
                pilot_id: "P001".to_string(),
                new_status: "On Leave".to_string(),
            })
        );
    }

    #[test]
    fn test_conflict_check_needs_no_args() {
        assert_eq!(
            AgentCommand::parse(r#"{"function": "run_conflict_check"}"#).unwrap(),
            ParsedAction::Command(AgentCommand::RunConflictCheck)
        );
        assert_eq!(
            AgentCommand::parse(r#"{"function": "run_conflict_check", "args": {}}"#).unwrap(),
            ParsedAction::Command(AgentCommand::RunConflictCheck)
        );
    }

    #[test]
    fn test_conflict_check_rejects_stray_args() {
        let stray = AgentCommand::parse(
            r#"{"function": "run_conflict_check", "args": {"project_id": "PRJ001"}}"#,
        );
        assert!(matches!(stray, Err(AgentError::MalformedAction(_))));

        let not_object = AgentCommand::parse(r#"{"function": "run_conflict_check", "args": 3}"#);
        assert!(matches!(not_object, Err(AgentError::MalformedAction(_))));
    }

    #[test]
    fn test_mutation_classification() {
        assert!(AgentCommand::AssignPilotToMission {
            pilot_id: "P001".to_string(),
            project_id: "PRJ001".to_string(),
        }
        .is_mutation());
        assert!(!AgentCommand::RunConflictCheck.is_mutation());
        assert!(!AgentCommand::FindReassignment {
            project_id: "PRJ001".to_string(),
        }
        .is_mutation());
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            AgentCommand::parse(r#"{"function": "launch_drone", "args": {}}"#).unwrap(),
            ParsedAction::Unknown("launch_drone".to_string())
        );
    }

    #[test]
    fn test_malformed_args_rejected() {
        let missing = AgentCommand::parse(r#"{"function": "find_reassignment", "args": {}}"#);
        assert!(matches!(missing, Err(AgentError::MalformedAction(_))));

        let extra = AgentCommand::parse(
            r#"{"function": "assign_drone_to_mission", "args": {"drone_id": "D001", "project_id": "PRJ001", "force": true}}"#,
        );
        assert!(matches!(extra, Err(AgentError::MalformedAction(_))));
    }
}
