//! Domain layer - Core business entities and logic
//!
//! This module contains the ledger records, value objects (months,
//! currencies, passwords) and the rules for mirrored rows, independent
//! of infrastructure concerns.

pub mod backup;
pub mod bill;
pub mod budget;
pub mod currency;
pub mod ledger;
pub mod master_data;
pub mod month;
pub mod password;
pub mod record;
pub mod saving;
pub mod savings_target;
pub mod user;

pub use backup::{Backup, ImportSummary};
pub use bill::{Bill, BillPayment, CreateBill, CreateBillPayment, UpdateBill, UpdateBillPayment};
pub use budget::{Budget, CreateBudget, UpdateBudget};
pub use currency::{
    convert_between, convert_from_base, convert_to_base, parse_amount_input, Currency,
    CurrencyRates, Money,
};
pub use ledger::{CreateExpense, CreateIncome, Expense, Income, UpdateExpense, UpdateIncome};
pub use master_data::{CreateMasterData, MasterData, MasterDataKind, UpdateMasterData};
pub use month::{Month, Period};
pub use password::Password;
pub use record::{Changeset, LinkedEntry, Record};
pub use saving::{CreateSaving, Saving, SavingKind, UpdateSaving};
pub use savings_target::{CreateSavingsTarget, SavingsTarget, UpdateSavingsTarget};
pub use user::{User, UserResponse};
