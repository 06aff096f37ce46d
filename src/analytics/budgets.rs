//! Budget realization: planned versus actual spending per category.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::percent_of;
use crate::domain::{Budget, Expense, Month};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BudgetState {
    Safe,
    Over,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BudgetLine {
    pub budget_id: Uuid,
    pub category: String,
    pub amount: Decimal,
    pub spent: Decimal,
    /// Negative when overspent
    pub remaining: Decimal,
    /// Share of the budget used, capped at 100
    pub percentage: f64,
    pub status: BudgetState,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BudgetReport {
    #[schema(value_type = String, example = "2024-05")]
    pub month: Month,
    pub lines: Vec<BudgetLine>,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub total_remaining: Decimal,
}

impl BudgetReport {
    pub fn over_budget_categories(&self) -> Vec<String> {
        self.lines
            .iter()
            .filter(|line| line.status == BudgetState::Over)
            .map(|line| line.category.clone())
            .collect()
    }
}

/// Compare each budget of `month` with the expenses recorded in its category
pub fn realize_budgets(month: Month, budgets: &[Budget], expenses: &[Expense]) -> BudgetReport {
    let lines: Vec<BudgetLine> = budgets
        .iter()
        .filter(|b| b.month == month)
        .map(|budget| {
            let spent: Decimal = expenses
                .iter()
                .filter(|e| e.month == month && e.category == budget.category)
                .map(|e| e.amount)
                .sum();
            BudgetLine {
                budget_id: budget.id,
                category: budget.category.clone(),
                amount: budget.amount,
                spent,
                remaining: budget.amount - spent,
                percentage: percent_of(spent, budget.amount).min(100.0),
                status: if spent > budget.amount {
                    BudgetState::Over
                } else {
                    BudgetState::Safe
                },
            }
        })
        .collect();

    let total_budget: Decimal = lines.iter().map(|l| l.amount).sum();
    let total_spent: Decimal = lines.iter().map(|l| l.spent).sum();

    BudgetReport {
        month,
        lines,
        total_budget,
        total_spent,
        total_remaining: total_budget - total_spent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::{budget, expense, month};

    #[test]
    fn test_realization_per_category() {
        let budgets = vec![
            budget("2024-05", "Food", 1_000),
            budget("2024-05", "Bills", 500),
            budget("2024-04", "Food", 9_999),
        ];
        let expenses = vec![
            expense("2024-05-02", "Food", 400),
            expense("2024-05-09", "Food", 350),
            expense("2024-05-10", "Bills", 800),
            expense("2024-04-10", "Food", 100),
        ];

        let report = realize_budgets(month("2024-05"), &budgets, &expenses);
        assert_eq!(report.lines.len(), 2);

        let food = &report.lines[0];
        assert_eq!(food.spent, Decimal::from(750));
        assert_eq!(food.remaining, Decimal::from(250));
        assert_eq!(food.percentage, 75.0);
        assert_eq!(food.status, BudgetState::Safe);

        let bills = &report.lines[1];
        assert_eq!(bills.percentage, 100.0);
        assert_eq!(bills.remaining, Decimal::from(-300));
        assert_eq!(bills.status, BudgetState::Over);

        assert_eq!(report.total_budget, Decimal::from(1_500));
        assert_eq!(report.total_spent, Decimal::from(1_550));
        assert_eq!(report.over_budget_categories(), vec!["Bills".to_string()]);
    }

    #[test]
    fn test_zero_budget_has_zero_percentage() {
        let budgets = vec![budget("2024-05", "Gift", 0)];
        let expenses = vec![expense("2024-05-02", "Gift", 10)];
        let report = realize_budgets(month("2024-05"), &budgets, &expenses);
        assert_eq!(report.lines[0].percentage, 0.0);
        assert_eq!(report.lines[0].status, BudgetState::Over);
    }
}
