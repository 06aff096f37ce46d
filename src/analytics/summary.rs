//! Dashboard summary.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{DASHBOARD_RECENT_PER_KIND, DASHBOARD_TREND_MONTHS};
use crate::domain::{Expense, Income, Month, Period, Saving};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyTotals {
    #[schema(value_type = String, example = "2024-05")]
    pub month: Month,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecentTransaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    /// Income source or expense name
    pub title: String,
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Summary {
    /// `YYYY-MM` or `all`
    pub period: String,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// Income minus expense up to and including the period
    pub balance: Decimal,
    /// Net amount held in savings and investments
    pub total_savings: Decimal,
    /// Latest months with data, oldest first
    pub monthly: Vec<MonthlyTotals>,
    /// Expense totals of the period, largest first
    pub expenses_by_category: Vec<CategoryTotal>,
    /// Latest incomes and expenses of the period, newest first
    pub recent: Vec<RecentTransaction>,
}

pub fn summarize(
    period: Period,
    incomes: &[Income],
    expenses: &[Expense],
    savings: &[Saving],
) -> Summary {
    let up_to = |month: Month| match period {
        Period::All => true,
        Period::Month(selected) => month <= selected,
    };

    let total_income: Decimal = incomes
        .iter()
        .filter(|i| period.includes(i.month))
        .map(|i| i.amount)
        .sum();
    let total_expense: Decimal = expenses
        .iter()
        .filter(|e| period.includes(e.month))
        .map(|e| e.amount)
        .sum();

    let income_to_date: Decimal = incomes
        .iter()
        .filter(|i| up_to(i.month))
        .map(|i| i.amount)
        .sum();
    let expense_to_date: Decimal = expenses
        .iter()
        .filter(|e| up_to(e.month))
        .map(|e| e.amount)
        .sum();

    Summary {
        period: period.to_string(),
        total_income,
        total_expense,
        balance: income_to_date - expense_to_date,
        total_savings: savings.iter().map(Saving::net).sum(),
        monthly: monthly_series(incomes, expenses),
        expenses_by_category: expenses_by_category(period, expenses),
        recent: recent_transactions(period, incomes, expenses),
    }
}

fn monthly_series(incomes: &[Income], expenses: &[Expense]) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<Month, (Decimal, Decimal)> = BTreeMap::new();
    for income in incomes {
        months.entry(income.month).or_default().0 += income.amount;
    }
    for expense in expenses {
        months.entry(expense.month).or_default().1 += expense.amount;
    }

    let skip = months.len().saturating_sub(DASHBOARD_TREND_MONTHS);
    months
        .into_iter()
        .skip(skip)
        .map(|(month, (income, expense))| MonthlyTotals {
            month,
            income,
            expense,
        })
        .collect()
}

fn expenses_by_category(period: Period, expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for expense in expenses.iter().filter(|e| period.includes(e.month)) {
        *totals.entry(expense.category.as_str()).or_default() += expense.amount;
    }

    let mut categories: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    categories.sort_by(|a, b| b.total.cmp(&a.total));
    categories
}

fn recent_transactions(
    period: Period,
    incomes: &[Income],
    expenses: &[Expense],
) -> Vec<RecentTransaction> {
    let mut latest_incomes: Vec<&Income> =
        incomes.iter().filter(|i| period.includes(i.month)).collect();
    latest_incomes.sort_by(|a, b| b.date.cmp(&a.date));

    let mut latest_expenses: Vec<&Expense> =
        expenses.iter().filter(|e| period.includes(e.month)).collect();
    latest_expenses.sort_by(|a, b| b.date.cmp(&a.date));

    let mut recent: Vec<RecentTransaction> = latest_incomes
        .into_iter()
        .take(DASHBOARD_RECENT_PER_KIND)
        .map(|i| RecentTransaction {
            id: i.id,
            kind: TransactionKind::Income,
            date: i.date,
            title: i.source.clone(),
            category: i.category.clone(),
            amount: i.amount,
        })
        .chain(
            latest_expenses
                .into_iter()
                .take(DASHBOARD_RECENT_PER_KIND)
                .map(|e| RecentTransaction {
                    id: e.id,
                    kind: TransactionKind::Expense,
                    date: e.date,
                    title: e.name.clone(),
                    category: e.category.clone(),
                    amount: e.amount,
                }),
        )
        .collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent
}
