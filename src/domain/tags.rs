// ==========================================
// 无人机作业协调系统 - 标签工具
// ==========================================
// 技能/证书/能力 均为字符串标签集合,比较一律忽略大小写
// ==========================================

/// 拆分逗号分隔的标签单元格（去空白,丢弃空项）
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// 标签精确匹配（忽略大小写）
pub fn contains_tag(tags: &[String], tag: &str) -> bool {
    let needle = tag.trim().to_lowercase();
    tags.iter().any(|t| t.trim().to_lowercase() == needle)
}

/// 返回 required 中 tags 缺失的项（保持 required 的顺序）
pub fn missing_tags(tags: &[String], required: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|r| !contains_tag(tags, r))
        .cloned()
        .collect()
}

/// 子串匹配（忽略大小写）；空值永不匹配
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let haystack = haystack.trim();
    if haystack.is_empty() {
        return false;
    }
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

/// 任一标签包含子串（忽略大小写）；空标签集永不匹配
pub fn any_tag_contains(tags: &[String], needle: &str) -> bool {
    tags.iter().any(|t| contains_ci(t, needle))
}

/// 两个字符串在忽略大小写与首尾空白后相等
pub fn eq_ci(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// 以 "['a', 'b']" 形式展示标签列表
pub fn format_tag_list(tags: &[String]) -> String {
    let quoted: Vec<String> = tags.iter().map(|t| format!("'{}'", t)).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags(" Mapping, Survey ,,"), tags(&["Mapping", "Survey"]));
        assert!(split_tags("").is_empty());
    }

    #[test]
    fn test_missing_tags_case_insensitive() {
        let have = tags(&["mapping", "Survey"]);
        let required = tags(&["Mapping", "Thermal", "SURVEY"]);
        assert_eq!(missing_tags(&have, &required), tags(&["Thermal"]));
    }

    #[test]
    fn test_contains_ci_empty_never_matches() {
        assert!(!contains_ci("", "a"));
        assert!(contains_ci("Bangalore", "bang"));
    }

    #[test]
    fn test_format_tag_list() {
        assert_eq!(format_tag_list(&tags(&["LiDAR", "RGB"])), "['LiDAR', 'RGB']");
    }
}
