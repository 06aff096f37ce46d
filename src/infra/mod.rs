//! Infrastructure layer - External systems integration
//!
//! - Database connections, migrations and repositories
//! - Redis for rate limiting
//! - Unit of Work for transaction management

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::{Cache, RateLimitDecision};
pub use db::{Database, MigrationState, Migrator};
pub use repositories::{
    LedgerRepository, LedgerStore, RecordRepository, RecordStore, Resource, UserRepository,
    UserStore,
};
pub use unit_of_work::{Persistence, TransactionContext, TxRecords, TxUserRepository, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockLedgerRepository, MockRecordRepository, MockUserRepository};
