//! Income and expense transactions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::record::{
    check_amount, ensure_amount, ensure_label, normalize_note, resolve_month, Changeset,
    LinkedEntry, Record,
};
use super::Month;
use crate::errors::AppResult;

/// Money received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Income {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(value_type = String, format = Date, example = "2024-05-25")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "2024-05")]
    pub month: Month,
    #[schema(example = "Monthly salary")]
    pub source: String,
    #[schema(example = "Salary")]
    pub category: String,
    #[schema(example = "Transfer")]
    pub method: String,
    #[schema(example = 8500000)]
    pub amount: Decimal,
    pub note: Option<String>,
    /// Saving whose withdrawal generated this row
    pub saving_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_income"))]
pub struct CreateIncome {
    #[schema(value_type = String, format = Date, example = "2024-05-25")]
    pub date: NaiveDate,
    /// Defaults to the month of `date`
    #[schema(value_type = Option<String>, example = "2024-05")]
    pub month: Option<Month>,
    #[validate(length(min = 1, max = 100, message = "Source must be 1-100 characters"))]
    pub source: String,
    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: String,
    #[validate(length(min = 1, max = 100, message = "Method must be 1-100 characters"))]
    pub method: String,
    pub amount: Decimal,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

fn validate_create_income(input: &CreateIncome) -> Result<(), ValidationError> {
    check_amount("Amount", Some(input.amount))
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_income"))]
pub struct UpdateIncome {
    #[schema(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub month: Option<Month>,
    #[validate(length(min = 1, max = 100, message = "Source must be 1-100 characters"))]
    pub source: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Method must be 1-100 characters"))]
    pub method: Option<String>,
    pub amount: Option<Decimal>,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

fn validate_update_income(input: &UpdateIncome) -> Result<(), ValidationError> {
    check_amount("Amount", input.amount)
}

impl Changeset for UpdateIncome {
    fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.month.is_none()
            && self.source.is_none()
            && self.category.is_none()
            && self.method.is_none()
            && self.amount.is_none()
            && self.note.is_none()
    }
}

impl Income {
    /// Income row mirroring a linked record
    pub fn linked(user_id: Uuid, entry: LinkedEntry, saving_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            date: entry.date,
            month: entry.month,
            source: entry.title,
            category: entry.category,
            method: entry.method,
            amount: entry.amount,
            note: entry.note,
            saving_id: Some(saving_id),
        }
    }
}

impl Record for Income {
    const NAME: &'static str = "Income";

    type Create = CreateIncome;
    type Update = UpdateIncome;

    fn id(&self) -> Uuid {
        self.id
    }

    fn ensure_valid(&self) -> AppResult<()> {
        ensure_label("Source", &self.source)?;
        ensure_label("Category", &self.category)?;
        ensure_label("Method", &self.method)?;
        ensure_amount("Amount", self.amount)
    }

    fn create(user_id: Uuid, input: CreateIncome) -> AppResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            date: input.date,
            month: resolve_month(input.date, input.month),
            source: input.source.trim().to_string(),
            category: input.category,
            method: input.method,
            amount: input.amount,
            note: normalize_note(input.note),
            saving_id: None,
        })
    }

    fn apply(&mut self, changes: UpdateIncome) -> AppResult<()> {
        if let Some(date) = changes.date {
            self.date = date;
            self.month = resolve_month(date, changes.month);
        } else if let Some(month) = changes.month {
            self.month = month;
        }
        if let Some(source) = changes.source {
            self.source = source.trim().to_string();
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(method) = changes.method {
            self.method = method;
        }
        if let Some(amount) = changes.amount {
            self.amount = amount;
        }
        if changes.note.is_some() {
            self.note = normalize_note(changes.note);
        }
        Ok(())
    }

    fn managed_by(&self) -> Option<&'static str> {
        self.saving_id.map(|_| "saving")
    }
}

/// Money spent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(value_type = String, format = Date, example = "2024-05-03")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "2024-05")]
    pub month: Month,
    #[schema(example = "Groceries")]
    pub name: String,
    #[schema(example = "Food")]
    pub category: String,
    #[schema(example = "Debit")]
    pub method: String,
    #[schema(example = 250000)]
    pub amount: Decimal,
    pub note: Option<String>,
    /// Bill payment that generated this row
    pub bill_payment_id: Option<Uuid>,
    /// Saving whose deposit generated this row
    pub saving_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_expense"))]
pub struct CreateExpense {
    #[schema(value_type = String, format = Date, example = "2024-05-03")]
    pub date: NaiveDate,
    /// Defaults to the month of `date`
    #[schema(value_type = Option<String>, example = "2024-05")]
    pub month: Option<Month>,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: String,
    #[validate(length(min = 1, max = 100, message = "Method must be 1-100 characters"))]
    pub method: String,
    pub amount: Decimal,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

fn validate_create_expense(input: &CreateExpense) -> Result<(), ValidationError> {
    check_amount("Amount", Some(input.amount))
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_expense"))]
pub struct UpdateExpense {
    #[schema(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub month: Option<Month>,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Method must be 1-100 characters"))]
    pub method: Option<String>,
    pub amount: Option<Decimal>,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

fn validate_update_expense(input: &UpdateExpense) -> Result<(), ValidationError> {
    check_amount("Amount", input.amount)
}

impl Changeset for UpdateExpense {
    fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.month.is_none()
            && self.name.is_none()
            && self.category.is_none()
            && self.method.is_none()
            && self.amount.is_none()
            && self.note.is_none()
    }
}

impl Expense {
    /// Expense row mirroring a savings deposit
    pub fn for_saving(user_id: Uuid, entry: LinkedEntry, saving_id: Uuid) -> Self {
        let mut expense = Self::from_entry(user_id, entry);
        expense.saving_id = Some(saving_id);
        expense
    }

    /// Expense row mirroring a bill payment
    pub fn for_bill_payment(user_id: Uuid, entry: LinkedEntry, bill_payment_id: Uuid) -> Self {
        let mut expense = Self::from_entry(user_id, entry);
        expense.bill_payment_id = Some(bill_payment_id);
        expense
    }

    fn from_entry(user_id: Uuid, entry: LinkedEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            date: entry.date,
            month: entry.month,
            name: entry.title,
            category: entry.category,
            method: entry.method,
            amount: entry.amount,
            note: entry.note,
            bill_payment_id: None,
            saving_id: None,
        }
    }

    pub fn is_mirrored(&self) -> bool {
        self.bill_payment_id.is_some() || self.saving_id.is_some()
    }
}

impl Record for Expense {
    const NAME: &'static str = "Expense";

    type Create = CreateExpense;
    type Update = UpdateExpense;

    fn id(&self) -> Uuid {
        self.id
    }

    fn ensure_valid(&self) -> AppResult<()> {
        ensure_label("Name", &self.name)?;
        ensure_label("Category", &self.category)?;
        ensure_label("Method", &self.method)?;
        ensure_amount("Amount", self.amount)
    }

    fn create(user_id: Uuid, input: CreateExpense) -> AppResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            date: input.date,
            month: resolve_month(input.date, input.month),
            name: input.name.trim().to_string(),
            category: input.category,
            method: input.method,
            amount: input.amount,
            note: normalize_note(input.note),
            bill_payment_id: None,
            saving_id: None,
        })
    }

    fn apply(&mut self, changes: UpdateExpense) -> AppResult<()> {
        if let Some(date) = changes.date {
            self.date = date;
            self.month = resolve_month(date, changes.month);
        } else if let Some(month) = changes.month {
            self.month = month;
        }
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(method) = changes.method {
            self.method = method;
        }
        if let Some(amount) = changes.amount {
            self.amount = amount;
        }
        if changes.note.is_some() {
            self.note = normalize_note(changes.note);
        }
        Ok(())
    }

    fn managed_by(&self) -> Option<&'static str> {
        if self.saving_id.is_some() {
            Some("saving")
        } else if self.bill_payment_id.is_some() {
            Some("bill payment")
        } else {
            None
        }
    }
}
