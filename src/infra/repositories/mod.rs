//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod ledger_repository;
mod record_repository;
pub(crate) mod resource;
mod user_repository;

pub use ledger_repository::{LedgerRepository, LedgerStore};
pub use record_repository::{RecordRepository, RecordStore};
pub use resource::Resource;
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use ledger_repository::MockLedgerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use record_repository::MockRecordRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
