//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! Services whose writes span several tables (savings, bill payments,
//! registration, backup import) go through the Unit of Work so the
//! mirrored rows commit or roll back together with their owner.

mod auth_service;
mod backup_service;
mod bill_payment_service;
pub mod container;
mod record_service;
mod report_service;
mod savings_service;
mod user_service;

#[cfg(test)]
mod testing;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use backup_service::{BackupManager, BackupService};
pub use bill_payment_service::BillPaymentManager;
pub use record_service::{RecordManager, RecordService};
pub use report_service::{ReportAnalyst, ReportService};
pub use savings_service::SavingsManager;
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
