//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Connect without auto-running migrations for manual control
    let db = Database::connect_without_migrations(&config).await?;

    match args.action {
        MigrateAction::Up => {
            let pending = db.migration_status().await?.iter().filter(|m| !m.applied).count();
            tracing::info!(pending, "Applying pending migrations");
            db.run_migrations().await?;
            tracing::info!("Database is up to date");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            tracing::info!("Rolled back the last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for migration in &status {
                let mark = if migration.applied { "applied" } else { "pending" };
                println!("{:<8} {}", mark, migration.name);
            }
            let applied = status.iter().filter(|m| m.applied).count();
            println!("{} of {} applied", applied, status.len());
        }
        MigrateAction::Fresh { force } => {
            if !force {
                return Err(AppError::bad_request(
                    "`migrate fresh` drops every table; pass --force to continue",
                ));
            }
            tracing::warn!("Dropping all tables and re-running migrations");
            db.fresh_migrations().await?;
            tracing::info!("Fresh migrations completed");
        }
    }

    Ok(())
}
