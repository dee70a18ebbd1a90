// ==========================================
// 无人机作业协调系统 - 引擎配置
// ==========================================
// 职责: 评分阈值、改派候选数、防雨标记、技能→载荷映射、任务编号双格式、维护预警窗口
// 默认值即业务基线;config_kv 可逐项覆写（见 ConfigManager）
// ==========================================

use crate::domain::assignment::MissionIdCodec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// EngineConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    // ===== 飞手评分分档 =====
    pub pilot_perfect_threshold: u32, // 默认 10
    pub pilot_partial_threshold: u32, // 默认 6

    // ===== 无人机评分分档 =====
    pub drone_perfect_threshold: u32, // 默认 8
    pub drone_partial_threshold: u32, // 默认 5

    // ===== 改派 =====
    pub reassignment_top_n: usize, // 默认 3

    // ===== 天气 =====
    pub rain_capable_marker: String, // 默认 "IP43"

    // ===== 维护 =====
    pub maintenance_warning_days: i64, // 默认 7

    // ===== 任务编号双格式 =====
    pub mission_id_codec: MissionIdCodec,

    // ===== 技能 → 载荷能力 =====
    // 键为小写技能名;未登记的技能不产生载荷需求
    pub skill_capability_map: BTreeMap<String, Vec<String>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pilot_perfect_threshold: 10,
            pilot_partial_threshold: 6,
            drone_perfect_threshold: 8,
            drone_partial_threshold: 5,
            reassignment_top_n: 3,
            rain_capable_marker: "IP43".to_string(),
            maintenance_warning_days: 7,
            mission_id_codec: MissionIdCodec::default(),
            skill_capability_map: default_skill_capability_map(),
        }
    }
}

impl EngineConfig {
    /// 根据任务所需技能推导需要的载荷能力
    ///
    /// 去重（忽略大小写）并保持首次出现顺序
    pub fn needed_capabilities(&self, required_skills: &[String]) -> Vec<String> {
        let mut needed: Vec<String> = Vec::new();
        for skill in required_skills {
            let key = skill.trim().to_lowercase();
            if let Some(caps) = self.skill_capability_map.get(&key) {
                for cap in caps {
                    if !needed.iter().any(|n| n.eq_ignore_ascii_case(cap)) {
                        needed.push(cap.clone());
                    }
                }
            }
        }
        needed
    }
}

pub fn default_skill_capability_map() -> BTreeMap<String, Vec<String>> {
    let mut map = BTreeMap::new();
    map.insert(
        "mapping".to_string(),
        vec!["LiDAR".to_string(), "RGB".to_string()],
    );
    map.insert(
        "survey".to_string(),
        vec!["LiDAR".to_string(), "RGB".to_string()],
    );
    map.insert("inspection".to_string(), vec!["RGB".to_string()]);
    map.insert("thermal".to_string(), vec!["Thermal".to_string()]);
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needed_capabilities_dedup_and_unknown() {
        let config = EngineConfig::default();
        let skills = vec![
            "Mapping".to_string(),
            "Survey".to_string(),
            "Photography".to_string(),
        ];
        assert_eq!(config.needed_capabilities(&skills), vec!["LiDAR", "RGB"]);

        let none = vec!["Photography".to_string()];
        assert!(config.needed_capabilities(&none).is_empty());
    }
}
