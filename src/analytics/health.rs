//! Financial health score (0-100).
//!
//! | Component          | Points | Basis                                        |
//! |--------------------|--------|----------------------------------------------|
//! | saving ratio       | 40     | net savings of the month / month income      |
//! | budget discipline  | 30     | budgets not overspent / budgets of the month |
//! | spending stability | 20     | expense change against the previous month    |
//! | consistency        | 10     | distinct days with a recorded transaction    |

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::budgets::realize_budgets;
use super::percent_of;
use crate::domain::{Budget, Expense, Income, Month, Saving};

const SAVING_RATIO_POINTS: f64 = 40.0;
/// Saving ratio (percent) that earns full points
const SAVING_RATIO_TARGET: f64 = 20.0;
const BUDGET_POINTS: f64 = 30.0;
const BUDGET_POINTS_WITHOUT_BUDGETS: f64 = 15.0;
const STABILITY_POINTS_WITHOUT_HISTORY: f64 = 10.0;
const CONSISTENCY_POINTS: f64 = 10.0;
/// Active days that earn full consistency points
const CONSISTENCY_TARGET_DAYS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Moderate,
    NeedsAttention,
}

impl HealthStatus {
    fn from_score(score: u32) -> Self {
        if score >= 80 {
            HealthStatus::Healthy
        } else if score >= 60 {
            HealthStatus::Moderate
        } else {
            HealthStatus::NeedsAttention
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Recommendation {
    IncreaseSavings,
    OverBudget { categories: Vec<String> },
    ReduceSpending,
    TrackRegularly,
    GoodJob,
}

/// Points per component, rounded
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HealthBreakdown {
    pub saving_ratio: u32,
    pub budget_discipline: u32,
    pub spending_stability: u32,
    pub consistency: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HealthReport {
    #[schema(value_type = String, example = "2024-05")]
    pub month: Month,
    pub score: u32,
    pub status: HealthStatus,
    pub breakdown: HealthBreakdown,
    pub saving_ratio_percent: f64,
    pub over_budget_categories: Vec<String>,
    /// Expense change against the previous month, in percent
    pub spending_change: f64,
    pub active_days_percent: f64,
    pub recommendations: Vec<Recommendation>,
}

pub fn health_score(
    month: Month,
    incomes: &[Income],
    expenses: &[Expense],
    savings: &[Saving],
    budgets: &[Budget],
) -> HealthReport {
    let month_income: Decimal = incomes
        .iter()
        .filter(|i| i.month == month)
        .map(|i| i.amount)
        .sum();
    let month_expense: Decimal = expenses
        .iter()
        .filter(|e| e.month == month)
        .map(|e| e.amount)
        .sum();
    let previous = month.previous();
    let previous_expense: Decimal = expenses
        .iter()
        .filter(|e| e.month == previous)
        .map(|e| e.amount)
        .sum();

    // Saving ratio
    let (saving_points, saving_ratio_percent) = if month_income.is_zero() {
        (0.0, 0.0)
    } else {
        let net_saved: Decimal = savings
            .iter()
            .filter(|s| month.contains(s.date))
            .map(Saving::net)
            .sum();
        let ratio = percent_of(net_saved, month_income);
        let points =
            (ratio / SAVING_RATIO_TARGET * SAVING_RATIO_POINTS).clamp(0.0, SAVING_RATIO_POINTS);
        (points, ratio)
    };

    // Budget discipline
    let budget_report = realize_budgets(month, budgets, expenses);
    let over_budget_categories = budget_report.over_budget_categories();
    let budget_points = if budget_report.lines.is_empty() {
        BUDGET_POINTS_WITHOUT_BUDGETS
    } else {
        let kept = (budget_report.lines.len() - over_budget_categories.len()) as f64;
        kept / budget_report.lines.len() as f64 * BUDGET_POINTS
    };

    // Spending stability
    let (stability_points, spending_change) = if previous_expense.is_zero() {
        (STABILITY_POINTS_WITHOUT_HISTORY, 0.0)
    } else {
        let change = percent_of(month_expense - previous_expense, previous_expense);
        (stability_points(change), change)
    };

    // Consistency
    let active_days: HashSet<_> = incomes
        .iter()
        .filter(|i| i.month == month)
        .map(|i| i.date)
        .chain(expenses.iter().filter(|e| e.month == month).map(|e| e.date))
        .collect();
    let consistency_points = (active_days.len() as f64 / CONSISTENCY_TARGET_DAYS
        * CONSISTENCY_POINTS)
        .min(CONSISTENCY_POINTS);
    let active_days_percent = active_days.len() as f64 / f64::from(month.days_in_month()) * 100.0;

    let score =
        (saving_points + budget_points + stability_points + consistency_points).round() as u32;

    let mut recommendations = Vec::new();
    if saving_ratio_percent < 10.0 {
        recommendations.push(Recommendation::IncreaseSavings);
    }
    if !over_budget_categories.is_empty() {
        recommendations.push(Recommendation::OverBudget {
            categories: over_budget_categories.clone(),
        });
    }
    if spending_change > 25.0 {
        recommendations.push(Recommendation::ReduceSpending);
    }
    if consistency_points < 5.0 {
        recommendations.push(Recommendation::TrackRegularly);
    }
    if score >= 80 && recommendations.is_empty() {
        recommendations.push(Recommendation::GoodJob);
    }

    HealthReport {
        month,
        score,
        status: HealthStatus::from_score(score),
        breakdown: HealthBreakdown {
            saving_ratio: saving_points.round() as u32,
            budget_discipline: budget_points.round() as u32,
            spending_stability: stability_points.round() as u32,
            consistency: consistency_points.round() as u32,
        },
        saving_ratio_percent,
        over_budget_categories,
        spending_change,
        active_days_percent,
        recommendations,
    }
}

fn stability_points(change_percent: f64) -> f64 {
    if change_percent <= 0.0 {
        20.0
    } else if change_percent <= 10.0 {
        18.0
    } else if change_percent <= 25.0 {
        12.0
    } else if change_percent <= 50.0 {
        6.0
    } else {
        2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::{budget, expense, income, month, saving};

    #[test]
    fn test_empty_month_uses_neutral_defaults() {
        let report = health_score(month("2024-05"), &[], &[], &[], &[]);
        assert_eq!(report.breakdown.saving_ratio, 0);
        assert_eq!(report.breakdown.budget_discipline, 15);
        assert_eq!(report.breakdown.spending_stability, 10);
        assert_eq!(report.breakdown.consistency, 0);
        assert_eq!(report.score, 25);
        assert_eq!(report.status, HealthStatus::NeedsAttention);
        assert_eq!(
            report.recommendations,
            vec![Recommendation::IncreaseSavings, Recommendation::TrackRegularly]
        );
    }

    #[test]
    fn test_healthy_month() {
        let incomes = vec![income("2024-05-01", 10_000)];
        // Ten distinct active days, flat against April
        let mut expenses: Vec<Expense> = (2..=10)
            .map(|d| expense(&format!("2024-05-{:02}", d), "Food", 100))
            .collect();
        expenses.push(expense("2024-04-15", "Food", 2_000));
        let savings = vec![saving("2024-05-01", "Fund", 2_500, 0)];
        let budgets = vec![budget("2024-05", "Food", 1_000)];

        let report = health_score(month("2024-05"), &incomes, &expenses, &savings, &budgets);
        assert_eq!(report.saving_ratio_percent, 25.0);
        assert_eq!(report.breakdown.saving_ratio, 40);
        assert_eq!(report.breakdown.budget_discipline, 30);
        assert_eq!(report.breakdown.spending_stability, 20);
        assert_eq!(report.breakdown.consistency, 10);
        assert_eq!(report.score, 100);
        assert_eq!(report.status, HealthStatus::Healthy);
        assert_eq!(report.recommendations, vec![Recommendation::GoodJob]);
    }

    #[test]
    fn test_overspending_and_spending_jump() {
        let incomes = vec![income("2024-05-01", 1_000)];
        let expenses = vec![
            expense("2024-04-10", "Food", 100),
            expense("2024-05-10", "Food", 200),
        ];
        let budgets = vec![budget("2024-05", "Food", 150), budget("2024-05", "Bills", 500)];

        let report = health_score(month("2024-05"), &incomes, &expenses, &[], &budgets);
        assert_eq!(report.spending_change, 100.0);
        assert_eq!(report.breakdown.spending_stability, 2);
        assert_eq!(report.breakdown.budget_discipline, 15);
        assert_eq!(report.over_budget_categories, vec!["Food".to_string()]);
        assert!(report.recommendations.contains(&Recommendation::ReduceSpending));
        assert!(report.recommendations.contains(&Recommendation::OverBudget {
            categories: vec!["Food".to_string()]
        }));
    }

    #[test]
    fn test_stability_bands() {
        assert_eq!(stability_points(-5.0), 20.0);
        assert_eq!(stability_points(10.0), 18.0);
        assert_eq!(stability_points(25.0), 12.0);
        assert_eq!(stability_points(50.0), 6.0);
        assert_eq!(stability_points(50.1), 2.0);
    }
}
