//! Recurring bills and their monthly payments.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::record::{
    check_amount, ensure_amount, ensure_label, normalize_note, Changeset, LinkedEntry, Record,
};
use super::Month;
use crate::config::MIRROR_PAYMENT_METHOD;
use crate::errors::{AppError, AppResult};

/// A bill due every month between `start_month` and `end_month`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Bill {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "Internet")]
    pub name: String,
    #[schema(example = "Bills")]
    pub category: String,
    #[schema(example = 350000)]
    pub amount: Decimal,
    /// Day of month the bill is due (1-31)
    #[schema(example = 10)]
    pub due_day: i32,
    #[schema(value_type = String, example = "2024-01")]
    pub start_month: Month,
    /// Last month the bill applies to; absent means ongoing
    #[schema(value_type = Option<String>, example = "2024-12")]
    pub end_month: Option<Month>,
    pub note: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_bill"))]
pub struct CreateBill {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: String,
    pub amount: Decimal,
    #[validate(range(min = 1, max = 31, message = "Due day must be between 1 and 31"))]
    pub due_day: i32,
    #[schema(value_type = String, example = "2024-01")]
    pub start_month: Month,
    #[schema(value_type = Option<String>)]
    pub end_month: Option<Month>,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
    pub is_active: Option<bool>,
}

fn validate_create_bill(input: &CreateBill) -> Result<(), ValidationError> {
    check_amount("Bill amount", Some(input.amount))
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_bill"))]
pub struct UpdateBill {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    #[validate(range(min = 1, max = 31, message = "Due day must be between 1 and 31"))]
    pub due_day: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub start_month: Option<Month>,
    /// `null` makes the bill ongoing
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    pub end_month: Option<Option<Month>>,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
    pub is_active: Option<bool>,
}

fn validate_update_bill(input: &UpdateBill) -> Result<(), ValidationError> {
    check_amount("Bill amount", input.amount)
}

/// Distinguish an explicit `null` from an absent field
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Changeset for UpdateBill {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.due_day.is_none()
            && self.start_month.is_none()
            && self.end_month.is_none()
            && self.note.is_none()
            && self.is_active.is_none()
    }
}

impl Bill {
    /// Whether the bill is due in `month`
    pub fn applies_to(&self, month: Month) -> bool {
        self.is_active
            && self.start_month <= month
            && self.end_month.map_or(true, |end| month <= end)
    }

    /// Expense generated for a payment of this bill
    pub fn payment_entry(&self, payment: &BillPayment) -> LinkedEntry {
        LinkedEntry {
            date: payment.paid_at.date_naive(),
            month: payment.month,
            title: format!("Bill: {}", self.name),
            category: self.category.clone(),
            method: MIRROR_PAYMENT_METHOD.to_string(),
            amount: payment.amount_paid,
            note: Some(format!("Payment for bill {}", self.name)),
        }
    }

    fn ensure_range(&self) -> AppResult<()> {
        match self.end_month {
            Some(end) if end < self.start_month => Err(AppError::validation(
                "End month must not be before start month",
            )),
            _ => Ok(()),
        }
    }
}

impl Record for Bill {
    const NAME: &'static str = "Bill";

    type Create = CreateBill;
    type Update = UpdateBill;

    fn id(&self) -> Uuid {
        self.id
    }

    fn ensure_valid(&self) -> AppResult<()> {
        ensure_label("Name", &self.name)?;
        ensure_label("Category", &self.category)?;
        ensure_amount("Bill amount", self.amount)?;
        if !(1..=31).contains(&self.due_day) {
            return Err(AppError::validation("Due day must be between 1 and 31"));
        }
        self.ensure_range()
    }

    fn create(user_id: Uuid, input: CreateBill) -> AppResult<Self> {
        let bill = Self {
            id: Uuid::new_v4(),
            user_id,
            name: input.name.trim().to_string(),
            category: input.category,
            amount: input.amount,
            due_day: input.due_day,
            start_month: input.start_month,
            end_month: input.end_month,
            note: normalize_note(input.note),
            is_active: input.is_active.unwrap_or(true),
        };
        bill.ensure_range()?;
        Ok(bill)
    }

    fn apply(&mut self, changes: UpdateBill) -> AppResult<()> {
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(amount) = changes.amount {
            self.amount = amount;
        }
        if let Some(due_day) = changes.due_day {
            self.due_day = due_day;
        }
        if let Some(start_month) = changes.start_month {
            self.start_month = start_month;
        }
        if let Some(end_month) = changes.end_month {
            self.end_month = end_month;
        }
        if changes.note.is_some() {
            self.note = normalize_note(changes.note);
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.ensure_range()
    }
}

/// Payment of a bill for one month. At most one exists per (bill, month).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BillPayment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bill_id: Uuid,
    #[schema(value_type = String, example = "2024-05")]
    pub month: Month,
    pub paid_at: DateTime<Utc>,
    #[schema(example = 350000)]
    pub amount_paid: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_payment"))]
pub struct CreateBillPayment {
    pub bill_id: Uuid,
    #[schema(value_type = String, example = "2024-05")]
    pub month: Month,
    /// Defaults to now
    pub paid_at: Option<DateTime<Utc>>,
    /// Defaults to the bill amount
    pub amount_paid: Option<Decimal>,
}

fn validate_create_payment(input: &CreateBillPayment) -> Result<(), ValidationError> {
    check_amount("Amount paid", input.amount_paid)
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_payment"))]
pub struct UpdateBillPayment {
    #[schema(value_type = Option<String>)]
    pub month: Option<Month>,
    pub paid_at: Option<DateTime<Utc>>,
    pub amount_paid: Option<Decimal>,
}

fn validate_update_payment(input: &UpdateBillPayment) -> Result<(), ValidationError> {
    check_amount("Amount paid", input.amount_paid)
}

impl Changeset for UpdateBillPayment {
    fn is_empty(&self) -> bool {
        self.month.is_none() && self.paid_at.is_none() && self.amount_paid.is_none()
    }
}

impl Record for BillPayment {
    const NAME: &'static str = "Bill payment";

    type Create = CreateBillPayment;
    type Update = UpdateBillPayment;

    fn id(&self) -> Uuid {
        self.id
    }

    fn ensure_valid(&self) -> AppResult<()> {
        ensure_amount("Amount paid", self.amount_paid)
    }

    fn create(user_id: Uuid, input: CreateBillPayment) -> AppResult<Self> {
        let amount_paid = input
            .amount_paid
            .ok_or_else(|| AppError::validation("Amount paid is required"))?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            bill_id: input.bill_id,
            month: input.month,
            paid_at: input.paid_at.unwrap_or_else(Utc::now),
            amount_paid,
        })
    }

    fn apply(&mut self, changes: UpdateBillPayment) -> AppResult<()> {
        if let Some(month) = changes.month {
            self.month = month;
        }
        if let Some(paid_at) = changes.paid_at {
            self.paid_at = paid_at;
        }
        if let Some(amount_paid) = changes.amount_paid {
            self.amount_paid = amount_paid;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn month(s: &str) -> Month {
        s.parse().unwrap()
    }

    fn bill() -> Bill {
        Bill::create(
            Uuid::new_v4(),
            CreateBill {
                name: "Internet".to_string(),
                category: "Bills".to_string(),
                amount: Decimal::from(350_000),
                due_day: 10,
                start_month: month("2024-01"),
                end_month: Some(month("2024-06")),
                note: None,
                is_active: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_applies_within_range_only() {
        let bill = bill();
        assert!(bill.is_active);
        assert!(!bill.applies_to(month("2023-12")));
        assert!(bill.applies_to(month("2024-01")));
        assert!(bill.applies_to(month("2024-06")));
        assert!(!bill.applies_to(month("2024-07")));
    }

    #[test]
    fn test_ongoing_and_inactive_bills() {
        let mut bill = bill();
        bill.apply(UpdateBill {
            end_month: Some(None),
            ..Default::default()
        })
        .unwrap();
        assert!(bill.applies_to(month("2030-01")));

        bill.is_active = false;
        assert!(!bill.applies_to(month("2024-02")));
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let mut bill = bill();
        let result = bill.apply(UpdateBill {
            end_month: Some(Some(month("2023-01"))),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let absent: UpdateBill = serde_json::from_str(r#"{"name":"Water"}"#).unwrap();
        assert_eq!(absent.end_month, None);
        let null: UpdateBill = serde_json::from_str(r#"{"end_month":null}"#).unwrap();
        assert_eq!(null.end_month, Some(None));
        assert!(!null.is_empty());
    }

    #[test]
    fn test_payment_entry() {
        let bill = bill();
        let payment = BillPayment::create(
            bill.user_id,
            CreateBillPayment {
                bill_id: bill.id,
                month: month("2024-03"),
                paid_at: Some(Utc.with_ymd_and_hms(2024, 2, 28, 9, 30, 0).unwrap()),
                amount_paid: Some(Decimal::from(340_000)),
            },
        )
        .unwrap();

        let entry = bill.payment_entry(&payment);
        assert_eq!(entry.title, "Bill: Internet");
        assert_eq!(entry.note.as_deref(), Some("Payment for bill Internet"));
        assert_eq!(entry.date.to_string(), "2024-02-28");
        assert_eq!(entry.month, month("2024-03"));
        assert_eq!(entry.amount, Decimal::from(340_000));
        assert_eq!(entry.category, "Bills");
    }

    #[test]
    fn test_payment_requires_amount() {
        let result = BillPayment::create(
            Uuid::new_v4(),
            CreateBillPayment {
                bill_id: Uuid::new_v4(),
                month: month("2024-03"),
                paid_at: None,
                amount_paid: None,
            },
        );
        assert!(result.is_err());
    }
}
