// ==========================================
// 无人机作业协调系统 - 日期解析
// ==========================================
// 表格来源多样,日期写法不统一;按固定顺序尝试下列格式
// ==========================================

use chrono::NaiveDate;

/// 支持的日期格式（按优先级）
pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// 解析日期字符串,全部格式失败返回 None
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    // 兼容 "2026-02-06 00:00:00" 之类带时间的单元格
    let date_part = raw.split_whitespace().next().unwrap_or(raw);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}
