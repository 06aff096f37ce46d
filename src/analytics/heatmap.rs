//! Daily expense heatmap for one month.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Expense, Month};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    None,
    Low,
    Medium,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DayCell {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub day: u32,
    pub total: Decimal,
    pub count: usize,
    pub intensity: Intensity,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ExpensiveDay {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HeatmapInsights {
    pub most_expensive_day: Option<ExpensiveDay>,
    pub zero_expense_days: usize,
    /// Total divided by the days in the month
    pub average_daily: Decimal,
    pub total_expense: Decimal,
    pub active_days: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ExpenseHeatmap {
    #[schema(value_type = String, example = "2024-05")]
    pub month: Month,
    /// Weekday of the first day, 0 = Sunday
    pub first_weekday: u32,
    pub days_in_month: u32,
    pub days: Vec<DayCell>,
    pub insights: HeatmapInsights,
}

struct Quartiles {
    q1: Decimal,
    q2: Decimal,
    q3: Decimal,
}

impl Quartiles {
    /// Quartiles of the positive day totals, picked at floor(n * p)
    fn of(mut totals: Vec<Decimal>) -> Self {
        totals.retain(|t| *t > Decimal::ZERO);
        totals.sort();
        let at = |fraction: f64| -> Decimal {
            let index = (totals.len() as f64 * fraction).floor() as usize;
            totals.get(index).copied().unwrap_or(Decimal::ZERO)
        };
        Self {
            q1: at(0.25),
            q2: at(0.5),
            q3: at(0.75),
        }
    }

    fn classify(&self, total: Decimal) -> Intensity {
        if total <= Decimal::ZERO {
            Intensity::None
        } else if total <= self.q1 {
            Intensity::Low
        } else if total <= self.q2 {
            Intensity::Medium
        } else if total <= self.q3 {
            Intensity::High
        } else {
            Intensity::VeryHigh
        }
    }
}

pub fn expense_heatmap(month: Month, expenses: &[Expense]) -> ExpenseHeatmap {
    let mut by_date: BTreeMap<NaiveDate, (Decimal, usize)> = BTreeMap::new();
    for expense in expenses.iter().filter(|e| e.month == month) {
        let entry = by_date.entry(expense.date).or_default();
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let days_in_month = month.days_in_month();
    let quartiles = Quartiles::of(by_date.values().map(|(total, _)| *total).collect());

    let days: Vec<DayCell> = (1..=days_in_month)
        .filter_map(|day| month.day(day))
        .map(|date| {
            let (total, count) = by_date.get(&date).copied().unwrap_or_default();
            DayCell {
                date,
                day: date.day(),
                total,
                count,
                intensity: quartiles.classify(total),
            }
        })
        .collect();

    let active: Vec<&DayCell> = days.iter().filter(|d| d.total > Decimal::ZERO).collect();
    let total_expense: Decimal = active.iter().map(|d| d.total).sum();
    let most_expensive_day = active
        .iter()
        .fold(None::<&DayCell>, |best, day| match best {
            Some(best) if best.total >= day.total => Some(best),
            _ => Some(day),
        })
        .map(|day| ExpensiveDay {
            date: day.date,
            total: day.total,
        });

    let insights = HeatmapInsights {
        most_expensive_day,
        zero_expense_days: days.iter().filter(|d| d.total.is_zero()).count(),
        average_daily: if days_in_month > 0 {
            total_expense / Decimal::from(days_in_month)
        } else {
            Decimal::ZERO
        },
        total_expense,
        active_days: active.len(),
    };

    ExpenseHeatmap {
        month,
        first_weekday: month.first_day().weekday().num_days_from_sunday(),
        days_in_month,
        days,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::{expense, month};

    #[test]
    fn test_days_cover_whole_month() {
        let heatmap = expense_heatmap(month("2024-02"), &[]);
        assert_eq!(heatmap.days_in_month, 29);
        assert_eq!(heatmap.days.len(), 29);
        // 2024-02-01 was a Thursday
        assert_eq!(heatmap.first_weekday, 4);
        assert_eq!(heatmap.insights.zero_expense_days, 29);
        assert!(heatmap.insights.most_expensive_day.is_none());
    }

    #[test]
    fn test_intensity_from_quartiles() {
        let expenses = vec![
            expense("2024-06-01", "Food", 10),
            expense("2024-06-02", "Food", 20),
            expense("2024-06-03", "Food", 30),
            expense("2024-06-04", "Food", 25),
            expense("2024-06-04", "Food", 15),
        ];
        let heatmap = expense_heatmap(month("2024-06"), &expenses);

        // Sorted totals [10, 20, 30, 40]: q1 = 20, q2 = 30, q3 = 40
        assert_eq!(heatmap.days[0].intensity, Intensity::Low);
        assert_eq!(heatmap.days[1].intensity, Intensity::Low);
        assert_eq!(heatmap.days[2].intensity, Intensity::Medium);
        assert_eq!(heatmap.days[3].intensity, Intensity::High);
        assert_eq!(heatmap.days[3].count, 2);
        assert_eq!(heatmap.days[4].intensity, Intensity::None);

        let insights = &heatmap.insights;
        assert_eq!(insights.total_expense, Decimal::from(100));
        assert_eq!(insights.active_days, 4);
        assert_eq!(insights.zero_expense_days, 26);
        assert_eq!(
            insights.most_expensive_day.as_ref().unwrap().date.to_string(),
            "2024-06-04"
        );
        assert_eq!(insights.average_daily, Decimal::from(100) / Decimal::from(30));
    }

    #[test]
    fn test_single_day_is_low() {
        let heatmap = expense_heatmap(month("2024-06"), &[expense("2024-06-15", "Food", 99)]);
        assert_eq!(heatmap.days[14].intensity, Intensity::Low);
    }
}
