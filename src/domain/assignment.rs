// ==========================================
// 无人机作业协调系统 - 任务分派字段
// ==========================================
// current_assignment 的两个历史包袱:
// 1. 同一任务存在两种编号写法: 规范形式 "PRJ001" 与旧形式 "Project-001"
// 2. 单元格可能为逗号拼接的多个任务号（即重复派工）
// 本模块是两条匹配规则的唯一出处;加载时另有规范化步骤把旧形式改写为规范形式
// ==========================================

use serde::{Deserialize, Serialize};

/// 表示"无分派"的占位值
const EMPTY_MARKERS: [&str; 3] = ["", "-", "–"];

/// 解码分派单元格为任务号列表
///
/// 空值与占位符返回空列表;多个任务号以逗号分隔
pub fn decode_assignment(raw: Option<&str>) -> Vec<String> {
    let raw = match raw {
        Some(r) => r.trim(),
        None => return Vec::new(),
    };
    if EMPTY_MARKERS.contains(&raw) {
        return Vec::new();
    }
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !EMPTY_MARKERS.contains(s))
        .map(|s| s.to_string())
        .collect()
}

/// 规范化单元格: 占位符 → None,其余去除首尾空白
pub fn normalize_assignment_cell(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if EMPTY_MARKERS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

// ==========================================
// MissionIdCodec - 任务编号双格式编解码
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionIdCodec {
    /// 规范前缀（如 "PRJ"）
    pub canonical_prefix: String,
    /// 旧前缀（如 "Project-"）
    pub legacy_prefix: String,
}

impl Default for MissionIdCodec {
    fn default() -> Self {
        Self {
            canonical_prefix: "PRJ".to_string(),
            legacy_prefix: "Project-".to_string(),
        }
    }
}

impl MissionIdCodec {
    pub fn new(canonical_prefix: &str, legacy_prefix: &str) -> Self {
        Self {
            canonical_prefix: canonical_prefix.to_string(),
            legacy_prefix: legacy_prefix.to_string(),
        }
    }

    /// 规范编号的旧写法（PRJ001 → Project-001）
    pub fn legacy_form(&self, mission_id: &str) -> String {
        mission_id.replace(&self.canonical_prefix, &self.legacy_prefix)
    }

    /// 旧写法改写为规范编号（Project-001 → PRJ001）；非旧写法原样返回
    pub fn canonicalize(&self, raw_id: &str) -> String {
        let raw_id = raw_id.trim();
        match raw_id.strip_prefix(&self.legacy_prefix) {
            Some(rest) if !self.legacy_prefix.is_empty() => {
                format!("{}{}", self.canonical_prefix, rest)
            }
            _ => raw_id.to_string(),
        }
    }

    /// 单个已分派编号是否指向该任务（两种写法都接受）
    pub fn refers_to(&self, assigned_id: &str, mission_id: &str) -> bool {
        let assigned_id = assigned_id.trim();
        assigned_id == mission_id || assigned_id == self.legacy_form(mission_id)
    }

    /// 分派单元格是否引用该任务（多任务单元格逐个比较）
    pub fn assignment_references(&self, raw: Option<&str>, mission_id: &str) -> bool {
        decode_assignment(raw)
            .iter()
            .any(|assigned| self.refers_to(assigned, mission_id))
    }

    /// 把整格分派值改写为规范编号
    ///
    /// # 返回
    /// - Some(new_value): 发生了改写
    /// - None: 无需改写
    pub fn canonicalize_cell(&self, raw: Option<&str>) -> Option<String> {
        let ids = decode_assignment(raw);
        if ids.is_empty() {
            return None;
        }
        let canonical: Vec<String> = ids.iter().map(|id| self.canonicalize(id)).collect();
        if canonical == ids {
            None
        } else {
            Some(canonical.join(", "))
        }
    }
}
