//! Full export of a user's data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Bill, BillPayment, Budget, Expense, Income, MasterData, Saving, SavingsTarget};
use crate::config::BACKUP_VERSION;
use crate::errors::{AppError, AppResult};

/// Backup document. Row ids are only used to relink rows on import.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Backup {
    #[schema(example = 2)]
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub savings: Vec<Saving>,
    #[serde(default)]
    pub master_data: Vec<MasterData>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub bill_payments: Vec<BillPayment>,
    #[serde(default)]
    pub savings_targets: Vec<SavingsTarget>,
}

impl Backup {
    pub fn empty() -> Self {
        Self {
            version: BACKUP_VERSION,
            exported_at: Utc::now(),
            incomes: Vec::new(),
            expenses: Vec::new(),
            budgets: Vec::new(),
            savings: Vec::new(),
            master_data: Vec::new(),
            bills: Vec::new(),
            bill_payments: Vec::new(),
            savings_targets: Vec::new(),
        }
    }

    pub fn ensure_supported(&self) -> AppResult<()> {
        if self.version != BACKUP_VERSION {
            return Err(AppError::bad_request(format!(
                "Unsupported backup version {} (expected {})",
                self.version, BACKUP_VERSION
            )));
        }
        Ok(())
    }
}

/// Rows written by an import, per table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    pub incomes: usize,
    pub expenses: usize,
    pub budgets: usize,
    pub savings: usize,
    pub master_data: usize,
    pub bills: usize,
    pub bill_payments: usize,
    pub savings_targets: usize,
}
