//! Bill status for one month.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Bill, BillPayment, Month};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BillStatus {
    pub bill_id: Uuid,
    pub name: String,
    pub category: String,
    pub amount: Decimal,
    pub due_day: i32,
    pub is_paid: bool,
    pub is_overdue: bool,
    pub payment_id: Option<Uuid>,
    pub amount_paid: Option<Decimal>,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct BillStats {
    pub total: usize,
    pub paid: usize,
    pub unpaid: usize,
    pub overdue: usize,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BillSchedule {
    #[schema(value_type = String, example = "2024-05")]
    pub month: Month,
    /// Unpaid first, then by due day
    pub bills: Vec<BillStatus>,
    pub stats: BillStats,
}

pub fn bill_schedule(
    month: Month,
    bills: &[Bill],
    payments: &[BillPayment],
    today: NaiveDate,
) -> BillSchedule {
    let current = Month::of(today);

    let mut statuses: Vec<BillStatus> = bills
        .iter()
        .filter(|bill| bill.applies_to(month))
        .map(|bill| {
            let payment = payments
                .iter()
                .find(|p| p.bill_id == bill.id && p.month == month);
            let is_paid = payment.is_some();
            let is_overdue = !is_paid
                && (month < current
                    || (month == current && i64::from(today.day()) > i64::from(bill.due_day)));

            BillStatus {
                bill_id: bill.id,
                name: bill.name.clone(),
                category: bill.category.clone(),
                amount: bill.amount,
                due_day: bill.due_day,
                is_paid,
                is_overdue,
                payment_id: payment.map(|p| p.id),
                amount_paid: payment.map(|p| p.amount_paid),
                paid_at: payment.map(|p| p.paid_at),
            }
        })
        .collect();
    statuses.sort_by(|a, b| {
        a.is_paid
            .cmp(&b.is_paid)
            .then_with(|| a.due_day.cmp(&b.due_day))
    });

    let paid: Vec<&BillStatus> = statuses.iter().filter(|s| s.is_paid).collect();
    let stats = BillStats {
        total: statuses.len(),
        paid: paid.len(),
        unpaid: statuses.len() - paid.len(),
        overdue: statuses.iter().filter(|s| s.is_overdue).count(),
        total_amount: statuses.iter().map(|s| s.amount).sum(),
        paid_amount: paid
            .iter()
            .map(|s| s.amount_paid.unwrap_or(s.amount))
            .sum(),
    };

    BillSchedule {
        month,
        bills: statuses,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::{bill, date, month, payment};

    #[test]
    fn test_current_month_status_and_ordering() {
        let internet = bill("Internet", 10, 300, "2024-01", None);
        let rent = bill("Rent", 1, 2_000, "2024-01", None);
        let water = bill("Water", 25, 100, "2024-01", Some("2024-12"));
        let ended = bill("Gym", 5, 50, "2023-01", Some("2023-12"));
        let payments = vec![payment(&rent, "2024-05", 1_950)];

        let schedule = bill_schedule(
            month("2024-05"),
            &[internet, rent, water, ended],
            &payments,
            date("2024-05-15"),
        );

        let names: Vec<&str> = schedule.bills.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Internet", "Water", "Rent"]);

        assert!(schedule.bills[0].is_overdue);
        assert!(!schedule.bills[1].is_overdue);
        assert!(schedule.bills[2].is_paid);
        assert!(!schedule.bills[2].is_overdue);

        assert_eq!(schedule.stats.total, 3);
        assert_eq!(schedule.stats.paid, 1);
        assert_eq!(schedule.stats.unpaid, 2);
        assert_eq!(schedule.stats.overdue, 1);
        assert_eq!(schedule.stats.total_amount, Decimal::from(2_400));
        assert_eq!(schedule.stats.paid_amount, Decimal::from(1_950));
    }

    #[test]
    fn test_past_and_future_months() {
        let internet = bill("Internet", 28, 300, "2024-01", None);

        let past = bill_schedule(month("2024-03"), &[internet.clone()], &[], date("2024-05-01"));
        assert!(past.bills[0].is_overdue);

        let future = bill_schedule(month("2024-06"), &[internet], &[], date("2024-05-30"));
        assert!(!future.bills[0].is_overdue);
    }

    #[test]
    fn test_inactive_bills_are_hidden() {
        let mut internet = bill("Internet", 10, 300, "2024-01", None);
        internet.is_active = false;
        let schedule = bill_schedule(month("2024-05"), &[internet], &[], date("2024-05-01"));
        assert!(schedule.bills.is_empty());
        assert_eq!(schedule.stats, BillStats::default());
    }
}
