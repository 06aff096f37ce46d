//! Spending breakdown by category with generated insights.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::percent_of;
use crate::domain::{Expense, Period};

/// Share at or above which the top category is flagged as highest spending
const HIGHEST_SPENDING_PERCENT: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryShare {
    pub category: String,
    pub total: Decimal,
    pub percentage: f64,
    pub count: usize,
}

/// Insight codes; clients render their own wording
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Insight {
    LargestCategory { category: String, percentage: f64 },
    HighestSpending { category: String },
    TopThree { categories: Vec<String> },
    CategoryCount { count: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ExpenseInsights {
    pub period: String,
    pub total_expense: Decimal,
    /// Largest first
    pub categories: Vec<CategoryShare>,
    pub top_category: Option<CategoryShare>,
    pub top_three: Vec<CategoryShare>,
    pub insights: Vec<Insight>,
}

pub fn expense_insights(period: Period, expenses: &[Expense]) -> ExpenseInsights {
    let in_period: Vec<&Expense> = expenses.iter().filter(|e| period.includes(e.month)).collect();
    let total_expense: Decimal = in_period.iter().map(|e| e.amount).sum();

    let mut grouped: HashMap<&str, (Decimal, usize)> = HashMap::new();
    for expense in &in_period {
        let entry = grouped.entry(expense.category.as_str()).or_default();
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let mut categories: Vec<CategoryShare> = grouped
        .into_iter()
        .map(|(category, (total, count))| CategoryShare {
            category: category.to_string(),
            total,
            percentage: percent_of(total, total_expense),
            count,
        })
        .collect();
    categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

    let top_category = categories.first().cloned();
    let top_three: Vec<CategoryShare> = categories.iter().take(3).cloned().collect();

    let mut insights = Vec::new();
    if let Some(top) = &top_category {
        insights.push(Insight::LargestCategory {
            category: top.category.clone(),
            percentage: top.percentage.round(),
        });
        if top.percentage >= HIGHEST_SPENDING_PERCENT {
            insights.push(Insight::HighestSpending {
                category: top.category.clone(),
            });
        }
    }
    if top_three.len() >= 3 {
        insights.push(Insight::TopThree {
            categories: top_three.iter().map(|c| c.category.clone()).collect(),
        });
    }
    if !categories.is_empty() {
        insights.push(Insight::CategoryCount {
            count: categories.len(),
        });
    }

    ExpenseInsights {
        period: period.to_string(),
        total_expense,
        categories,
        top_category,
        top_three,
        insights,
    }
}
