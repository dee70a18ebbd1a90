// ==========================================
// 无人机作业协调系统 - 费用计算
// ==========================================
// 规则: 总费用 = 闭区间天数 × 日费率
// 红线: 纯函数;日期解析失败向上传播,不吞错
// ==========================================

use crate::domain::{inclusive_day_count, parse_flexible_date, Mission, Pilot};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::lookup::{find_mission, find_pilot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 费用报价
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostQuote {
    pub pilot_id: String,
    pub pilot_name: String,
    pub daily_rate_inr: u64,
    pub days: i64,
    pub total_inr: u64,
    /// 可读算式: "<name> @ ₹<rate>/day × <days> days = ₹<total>"
    pub breakdown: String,
}

/// 报价与任务预算对比
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCheck {
    pub quote: CostQuote,
    pub mission_id: String,
    pub budget_inr: u64,
    /// 超出金额（None 表示预算内）
    pub over_budget_by: Option<u64>,
}

impl BudgetCheck {
    pub fn summary(&self) -> String {
        match self.over_budget_by {
            Some(excess) => format!(
                "{}\nOVER BUDGET by ₹{} (budget: ₹{})",
                self.quote.breakdown, excess, self.budget_inr
            ),
            None => format!(
                "{}\nWithin budget (₹{})",
                self.quote.breakdown, self.budget_inr
            ),
        }
    }
}

pub struct CostCalculator;

impl CostCalculator {
    /// 计算飞手在日期区间内的总费用
    ///
    /// # 错误
    /// - NotFound: 飞手编号不存在
    /// - Parse: 日期无法解析
    /// - InvalidArgument: 结束日期早于开始日期
    pub fn calculate_pilot_cost(
        pilots: &[Pilot],
        pilot_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> EngineResult<CostQuote> {
        let pilot = find_pilot(pilots, pilot_id)?;
        let start = parse_date_arg(start_date)?;
        let end = parse_date_arg(end_date)?;
        Self::quote(pilot, start, end)
    }

    /// 已解析日期的报价
    pub fn quote(pilot: &Pilot, start: NaiveDate, end: NaiveDate) -> EngineResult<CostQuote> {
        if end < start {
            return Err(EngineError::InvalidArgument(format!(
                "End date {} is before start date {}",
                end, start
            )));
        }
        let days = inclusive_day_count(start, end);
        let total = pilot.cost_for_days(days);
        Ok(CostQuote {
            pilot_id: pilot.pilot_id.clone(),
            pilot_name: pilot.name.clone(),
            daily_rate_inr: pilot.daily_rate_inr,
            days,
            total_inr: total,
            breakdown: format!(
                "{} @ ₹{}/day × {} days = ₹{}",
                pilot.name, pilot.daily_rate_inr, days, total
            ),
        })
    }

    /// 以任务日期计算报价并与预算比较
    pub fn check_against_mission(
        pilots: &[Pilot],
        missions: &[Mission],
        pilot_id: &str,
        mission_id: &str,
    ) -> EngineResult<BudgetCheck> {
        let pilot = find_pilot(pilots, pilot_id)?;
        let mission = find_mission(missions, mission_id)?;
        let quote = Self::quote(pilot, mission.start_date, mission.end_date)?;
        let over_budget_by = quote
            .total_inr
            .checked_sub(mission.budget_inr)
            .filter(|excess| *excess > 0);
        Ok(BudgetCheck {
            quote,
            mission_id: mission.project_id.clone(),
            budget_inr: mission.budget_inr,
            over_budget_by,
        })
    }
}

fn parse_date_arg(raw: &str) -> EngineResult<NaiveDate> {
    parse_flexible_date(raw).ok_or_else(|| EngineError::Parse {
        value: raw.to_string(),
        expected: "a date such as YYYY-MM-DD".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PilotStatus;

    fn roster() -> Vec<Pilot> {
        vec![Pilot {
            pilot_id: "P001".to_string(),
            name: "Arjun".to_string(),
            skills: vec!["Mapping".to_string()],
            certifications: vec![],
            location: "Bangalore".to_string(),
            status: PilotStatus::Available,
            current_assignment: None,
            available_from: None,
            daily_rate_inr: 5000,
        }]
    }

    #[test]
    fn test_single_day_cost() {
        let quote =
            CostCalculator::calculate_pilot_cost(&roster(), "P001", "2026-02-06", "2026-02-06")
                .unwrap();
        assert_eq!(quote.days, 1);
        assert_eq!(quote.total_inr, 5000);
    }

    #[test]
    fn test_cost_is_pure() {
        let pilots = roster();
        let a = CostCalculator::calculate_pilot_cost(&pilots, "P001", "2026-02-06", "2026-02-08");
        let b = CostCalculator::calculate_pilot_cost(&pilots, "P001", "2026-02-06", "2026-02-08");
        assert_eq!(a, b);
        let quote = a.unwrap();
        assert_eq!(quote.total_inr, 15000);
        assert_eq!(quote.breakdown, "Arjun @ ₹5000/day × 3 days = ₹15000");
    }

    #[test]
    fn test_errors() {
        let pilots = roster();
        assert_eq!(
            CostCalculator::calculate_pilot_cost(&pilots, "P999", "2026-02-06", "2026-02-08"),
            Err(EngineError::not_found("Pilot", "P999"))
        );
        assert!(matches!(
            CostCalculator::calculate_pilot_cost(&pilots, "P001", "soon", "2026-02-08"),
            Err(EngineError::Parse { .. })
        ));
        assert!(matches!(
            CostCalculator::calculate_pilot_cost(&pilots, "P001", "2026-02-08", "2026-02-06"),
            Err(EngineError::InvalidArgument(_))
        ));
    }
}
