//! Savings-target progress.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::percent_of;
use crate::domain::{Month, Saving, SavingKind, SavingsTarget};

const MILESTONES: [u32; 4] = [25, 50, 75, 100];
const ALMOST_THERE_PERCENT: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    Active,
    Achieved,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Milestone {
    pub percentage: u32,
    pub reached: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TargetProgress {
    pub target: SavingsTarget,
    /// Balance of the linked savings account
    pub current_amount: Decimal,
    pub progress: f64,
    pub remaining: Decimal,
    pub milestones: Vec<Milestone>,
    pub months_remaining: u32,
    pub monthly_required: Decimal,
    pub is_on_track: bool,
    pub status: TargetStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InsightLevel {
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TargetInsightCode {
    Achieved,
    AlmostThere,
    DeadlinePassed,
    MonthlyRequired,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TargetInsight {
    pub target_id: Uuid,
    pub target_name: String,
    pub code: TargetInsightCode,
    pub level: InsightLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TargetsReport {
    /// Balance per savings account name
    pub account_balances: HashMap<String, Decimal>,
    pub targets: Vec<TargetProgress>,
    pub insights: Vec<TargetInsight>,
}

/// Balances of `savings`-kind accounts; investments are not counted
pub fn account_balances(savings: &[Saving]) -> HashMap<String, Decimal> {
    let mut balances: HashMap<String, Decimal> = HashMap::new();
    for saving in savings.iter().filter(|s| s.kind == SavingKind::Savings) {
        *balances.entry(saving.account_name.clone()).or_default() += saving.net();
    }
    balances
}

pub fn target_progress(
    targets: &[SavingsTarget],
    savings: &[Saving],
    today: NaiveDate,
) -> TargetsReport {
    let balances = account_balances(savings);

    let progress: Vec<TargetProgress> = targets
        .iter()
        .map(|target| {
            let current_amount = balances
                .get(&target.account_name)
                .copied()
                .unwrap_or(Decimal::ZERO);
            evaluate(target, current_amount, today)
        })
        .collect();

    let insights = progress.iter().filter_map(insight_for).collect();

    TargetsReport {
        account_balances: balances,
        targets: progress,
        insights,
    }
}

fn evaluate(target: &SavingsTarget, current_amount: Decimal, today: NaiveDate) -> TargetProgress {
    let progress = percent_of(current_amount, target.target_amount).min(100.0);
    let remaining = (target.target_amount - current_amount).max(Decimal::ZERO);
    let months_remaining = whole_months_between(today, target.target_date).max(0) as u32;
    let monthly_required = if months_remaining > 0 {
        remaining / Decimal::from(months_remaining)
    } else {
        remaining
    };

    TargetProgress {
        target: target.clone(),
        current_amount,
        progress,
        remaining,
        milestones: MILESTONES
            .iter()
            .map(|&percentage| Milestone {
                percentage,
                reached: progress >= f64::from(percentage),
            })
            .collect(),
        months_remaining,
        monthly_required,
        is_on_track: months_remaining > 0 || progress >= 100.0,
        status: if progress >= 100.0 {
            TargetStatus::Achieved
        } else {
            TargetStatus::Active
        },
    }
}

fn insight_for(progress: &TargetProgress) -> Option<TargetInsight> {
    let (code, level) = if progress.progress >= 100.0 {
        (TargetInsightCode::Achieved, InsightLevel::Success)
    } else if progress.progress >= ALMOST_THERE_PERCENT {
        (TargetInsightCode::AlmostThere, InsightLevel::Success)
    } else if !progress.is_on_track {
        (TargetInsightCode::DeadlinePassed, InsightLevel::Warning)
    } else if progress.monthly_required > Decimal::ZERO {
        (TargetInsightCode::MonthlyRequired, InsightLevel::Info)
    } else {
        return None;
    };

    Some(TargetInsight {
        target_id: progress.target.id,
        target_name: progress.target.name.clone(),
        code,
        level,
    })
}

/// Complete months from `from` to `to`; a partial last month does not count
fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let months = Month::of(from).months_until(Month::of(to));
    if months > 0 && to.day() < from.day() {
        months - 1
    } else if months < 0 && to.day() > from.day() {
        months + 1
    } else {
        months
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::{date, saving};

    fn target(amount: i64, until: &str, account: &str) -> SavingsTarget {
        SavingsTarget {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: "Laptop".to_string(),
            target_amount: Decimal::from(amount),
            start_date: date("2024-01-01"),
            target_date: date(until),
            account_name: account.to_string(),
        }
    }

    #[test]
    fn test_balances_ignore_investments() {
        let mut invest = saving("2024-01-01", "Stocks", 900, 0);
        invest.kind = SavingKind::Investment;
        let savings = vec![
            saving("2024-01-01", "Fund", 1_000, 0),
            saving("2024-02-01", "Fund", 0, 250),
            invest,
        ];
        let balances = account_balances(&savings);
        assert_eq!(balances.get("Fund"), Some(&Decimal::from(750)));
        assert!(!balances.contains_key("Stocks"));
    }

    #[test]
    fn test_progress_and_monthly_requirement() {
        let savings = vec![saving("2024-01-01", "Fund", 4_000, 0)];
        let report = target_progress(
            &[target(10_000, "2024-09-01", "Fund")],
            &savings,
            date("2024-03-01"),
        );

        let progress = &report.targets[0];
        assert_eq!(progress.progress, 40.0);
        assert_eq!(progress.remaining, Decimal::from(6_000));
        assert_eq!(progress.months_remaining, 6);
        assert_eq!(progress.monthly_required, Decimal::from(1_000));
        assert!(progress.is_on_track);
        assert_eq!(progress.status, TargetStatus::Active);
        let reached: Vec<bool> = progress.milestones.iter().map(|m| m.reached).collect();
        assert_eq!(reached, [true, false, false, false]);

        assert_eq!(report.insights[0].code, TargetInsightCode::MonthlyRequired);
        assert_eq!(report.insights[0].level, InsightLevel::Info);
    }

    #[test]
    fn test_deadline_passed_and_achieved() {
        let savings = vec![saving("2024-01-01", "Fund", 1_000, 0)];
        let report = target_progress(
            &[
                target(10_000, "2024-02-01", "Fund"),
                target(500, "2024-02-01", "Fund"),
                target(10_000, "2025-01-01", "Unknown"),
            ],
            &savings,
            date("2024-03-15"),
        );

        assert!(!report.targets[0].is_on_track);
        assert_eq!(report.targets[0].months_remaining, 0);
        assert_eq!(report.targets[0].monthly_required, Decimal::from(9_000));
        assert_eq!(report.insights[0].code, TargetInsightCode::DeadlinePassed);

        assert_eq!(report.targets[1].status, TargetStatus::Achieved);
        assert_eq!(report.targets[1].remaining, Decimal::ZERO);
        assert_eq!(report.insights[1].code, TargetInsightCode::Achieved);

        assert_eq!(report.targets[2].current_amount, Decimal::ZERO);
    }

    #[test]
    fn test_zero_target_has_zero_progress() {
        let report = target_progress(&[target(0, "2025-01-01", "Fund")], &[], date("2024-01-01"));
        assert_eq!(report.targets[0].progress, 0.0);
        assert!(report.insights.is_empty());
    }

    #[test]
    fn test_whole_months_between() {
        assert_eq!(whole_months_between(date("2024-03-15"), date("2024-09-14")), 5);
        assert_eq!(whole_months_between(date("2024-03-15"), date("2024-09-15")), 6);
        assert_eq!(whole_months_between(date("2024-03-15"), date("2024-02-20")), 0);
    }
}
