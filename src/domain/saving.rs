//! Savings and investment account movements.
//!
//! A deposit moves money out of the spendable balance, so it is mirrored as
//! an expense; a withdrawal brings money back and is mirrored as an income.
//! The mirrored rows carry the saving's id and are regenerated whenever the
//! saving changes.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::record::{
    check_amount, ensure_amount, ensure_label, normalize_note, Changeset, LinkedEntry, Record,
};
use super::Month;
use crate::config::MIRROR_PAYMENT_METHOD;
use crate::errors::{AppError, AppResult};

/// Kind of account a movement belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SavingKind {
    Savings,
    Investment,
}

impl SavingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SavingKind::Savings => "savings",
            SavingKind::Investment => "investment",
        }
    }

    /// Label used in generated rows and as their category
    pub fn label(&self) -> &'static str {
        match self {
            SavingKind::Savings => "Savings",
            SavingKind::Investment => "Investment",
        }
    }
}

impl fmt::Display for SavingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SavingKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "savings" => Ok(SavingKind::Savings),
            "investment" => Ok(SavingKind::Investment),
            other => Err(AppError::validation(format!("Unknown saving kind '{}'", other))),
        }
    }
}

/// One deposit and/or withdrawal on a named account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Saving {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(value_type = String, format = Date, example = "2024-05-01")]
    pub date: NaiveDate,
    pub kind: SavingKind,
    #[schema(example = "Emergency fund")]
    pub account_name: String,
    #[schema(example = 1000000)]
    pub deposit: Decimal,
    #[schema(example = 0)]
    pub withdrawal: Decimal,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_saving"))]
pub struct CreateSaving {
    #[schema(value_type = String, format = Date, example = "2024-05-01")]
    pub date: NaiveDate,
    pub kind: SavingKind,
    #[validate(length(min = 1, max = 100, message = "Account name must be 1-100 characters"))]
    pub account_name: String,
    #[serde(default)]
    pub deposit: Decimal,
    #[serde(default)]
    pub withdrawal: Decimal,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

fn validate_create_saving(input: &CreateSaving) -> Result<(), ValidationError> {
    check_amount("Deposit", Some(input.deposit))?;
    check_amount("Withdrawal", Some(input.withdrawal))
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_saving"))]
pub struct UpdateSaving {
    #[schema(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,
    pub kind: Option<SavingKind>,
    #[validate(length(min = 1, max = 100, message = "Account name must be 1-100 characters"))]
    pub account_name: Option<String>,
    pub deposit: Option<Decimal>,
    pub withdrawal: Option<Decimal>,
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

fn validate_update_saving(input: &UpdateSaving) -> Result<(), ValidationError> {
    check_amount("Deposit", input.deposit)?;
    check_amount("Withdrawal", input.withdrawal)
}

impl Changeset for UpdateSaving {
    fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.kind.is_none()
            && self.account_name.is_none()
            && self.deposit.is_none()
            && self.withdrawal.is_none()
            && self.note.is_none()
    }
}

impl Saving {
    /// Net change of the account balance
    pub fn net(&self) -> Decimal {
        self.deposit - self.withdrawal
    }

    /// Expense mirroring the deposit, if any
    pub fn deposit_entry(&self) -> Option<LinkedEntry> {
        (self.deposit > Decimal::ZERO).then(|| self.entry("Deposit", self.deposit))
    }

    /// Income mirroring the withdrawal, if any
    pub fn withdrawal_entry(&self) -> Option<LinkedEntry> {
        (self.withdrawal > Decimal::ZERO).then(|| self.entry("Withdrawal", self.withdrawal))
    }

    fn entry(&self, movement: &str, amount: Decimal) -> LinkedEntry {
        LinkedEntry {
            date: self.date,
            month: Month::of(self.date),
            title: format!("{} {} - {}", movement, self.kind.label(), self.account_name),
            category: self.kind.label().to_string(),
            method: MIRROR_PAYMENT_METHOD.to_string(),
            amount,
            note: self.note.clone(),
        }
    }

    fn ensure_movement(&self) -> AppResult<()> {
        if self.deposit.is_zero() && self.withdrawal.is_zero() {
            return Err(AppError::validation(
                "A saving needs a deposit or a withdrawal",
            ));
        }
        Ok(())
    }
}

impl Record for Saving {
    const NAME: &'static str = "Saving";

    type Create = CreateSaving;
    type Update = UpdateSaving;

    fn id(&self) -> Uuid {
        self.id
    }

    fn ensure_valid(&self) -> AppResult<()> {
        ensure_label("Account name", &self.account_name)?;
        ensure_amount("Deposit", self.deposit)?;
        ensure_amount("Withdrawal", self.withdrawal)?;
        self.ensure_movement()
    }

    fn create(user_id: Uuid, input: CreateSaving) -> AppResult<Self> {
        let saving = Self {
            id: Uuid::new_v4(),
            user_id,
            date: input.date,
            kind: input.kind,
            account_name: input.account_name.trim().to_string(),
            deposit: input.deposit,
            withdrawal: input.withdrawal,
            note: normalize_note(input.note),
        };
        saving.ensure_movement()?;
        Ok(saving)
    }

    fn apply(&mut self, changes: UpdateSaving) -> AppResult<()> {
        if let Some(date) = changes.date {
            self.date = date;
        }
        if let Some(kind) = changes.kind {
            self.kind = kind;
        }
        if let Some(account_name) = changes.account_name {
            self.account_name = account_name.trim().to_string();
        }
        if let Some(deposit) = changes.deposit {
            self.deposit = deposit;
        }
        if let Some(withdrawal) = changes.withdrawal {
            self.withdrawal = withdrawal;
        }
        if changes.note.is_some() {
            self.note = normalize_note(changes.note);
        }
        self.ensure_movement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(deposit: i64, withdrawal: i64) -> CreateSaving {
        CreateSaving {
            date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            kind: SavingKind::Savings,
            account_name: "Emergency".to_string(),
            deposit: Decimal::from(deposit),
            withdrawal: Decimal::from(withdrawal),
            note: Some("payday".to_string()),
        }
    }

    #[test]
    fn test_deposit_mirrors_as_expense_entry() {
        let saving = Saving::create(Uuid::new_v4(), input(500_000, 0)).unwrap();
        let entry = saving.deposit_entry().unwrap();
        assert_eq!(entry.title, "Deposit Savings - Emergency");
        assert_eq!(entry.category, "Savings");
        assert_eq!(entry.method, "Transfer");
        assert_eq!(entry.amount, Decimal::from(500_000));
        assert_eq!(entry.month.to_string(), "2024-05");
        assert_eq!(entry.note.as_deref(), Some("payday"));
        assert!(saving.withdrawal_entry().is_none());
    }

    #[test]
    fn test_withdrawal_mirrors_as_income_entry() {
        let mut saving = Saving::create(Uuid::new_v4(), input(0, 200_000)).unwrap();
        saving.kind = SavingKind::Investment;
        let entry = saving.withdrawal_entry().unwrap();
        assert_eq!(entry.title, "Withdrawal Investment - Emergency");
        assert_eq!(entry.category, "Investment");
        assert!(saving.deposit_entry().is_none());
    }

    #[test]
    fn test_both_movements_produce_two_entries() {
        let saving = Saving::create(Uuid::new_v4(), input(300, 100)).unwrap();
        assert!(saving.deposit_entry().is_some());
        assert!(saving.withdrawal_entry().is_some());
        assert_eq!(saving.net(), Decimal::from(200));
    }

    #[test]
    fn test_saving_without_movement_is_rejected() {
        assert!(Saving::create(Uuid::new_v4(), input(0, 0)).is_err());

        let mut saving = Saving::create(Uuid::new_v4(), input(100, 0)).unwrap();
        let result = saving.apply(UpdateSaving {
            deposit: Some(Decimal::ZERO),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SavingKind::Investment).unwrap(),
            "\"investment\""
        );
        assert_eq!("savings".parse::<SavingKind>().unwrap(), SavingKind::Savings);
    }
}
