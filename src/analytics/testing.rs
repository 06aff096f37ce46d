//! Row builders shared by the report tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{Bill, BillPayment, Budget, Expense, Income, Month, Saving, SavingKind};

pub fn date(raw: &str) -> NaiveDate {
    raw.parse().unwrap()
}

pub fn month(raw: &str) -> Month {
    raw.parse().unwrap()
}

pub fn income(on: &str, amount: i64) -> Income {
    let date = date(on);
    Income {
        id: Uuid::new_v4(),
        user_id: Uuid::nil(),
        date,
        month: Month::of(date),
        source: "Salary".to_string(),
        category: "Salary".to_string(),
        method: "Transfer".to_string(),
        amount: Decimal::from(amount),
        note: None,
        saving_id: None,
    }
}

pub fn expense(on: &str, category: &str, amount: i64) -> Expense {
    let date = date(on);
    Expense {
        id: Uuid::new_v4(),
        user_id: Uuid::nil(),
        date,
        month: Month::of(date),
        name: format!("{} purchase", category),
        category: category.to_string(),
        method: "Cash".to_string(),
        amount: Decimal::from(amount),
        note: None,
        bill_payment_id: None,
        saving_id: None,
    }
}

pub fn saving(on: &str, account: &str, deposit: i64, withdrawal: i64) -> Saving {
    Saving {
        id: Uuid::new_v4(),
        user_id: Uuid::nil(),
        date: date(on),
        kind: SavingKind::Savings,
        account_name: account.to_string(),
        deposit: Decimal::from(deposit),
        withdrawal: Decimal::from(withdrawal),
        note: None,
    }
}

pub fn budget(in_month: &str, category: &str, amount: i64) -> Budget {
    Budget {
        id: Uuid::new_v4(),
        user_id: Uuid::nil(),
        month: month(in_month),
        category: category.to_string(),
        amount: Decimal::from(amount),
    }
}

pub fn bill(name: &str, due_day: i32, amount: i64, start: &str, end: Option<&str>) -> Bill {
    Bill {
        id: Uuid::new_v4(),
        user_id: Uuid::nil(),
        name: name.to_string(),
        category: "Bills".to_string(),
        amount: Decimal::from(amount),
        due_day,
        start_month: month(start),
        end_month: end.map(month),
        note: None,
        is_active: true,
    }
}

pub fn payment(bill: &Bill, for_month: &str, amount: i64) -> BillPayment {
    BillPayment {
        id: Uuid::new_v4(),
        user_id: Uuid::nil(),
        bill_id: bill.id,
        month: month(for_month),
        paid_at: month(for_month)
            .first_day()
            .and_hms_opt(9, 0, 0)
            .unwrap()
            .and_utc(),
        amount_paid: Decimal::from(amount),
    }
}
