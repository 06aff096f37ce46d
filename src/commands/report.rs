//! Report command - Prints a monthly report for one user.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::analytics::{BudgetReport, HealthReport, Summary};
use crate::cli::args::ReportArgs;
use crate::config::Config;
use crate::domain::{convert_from_base, Currency, Month, Period};
use crate::errors::{AppResult, OptionExt};
use crate::infra::{Database, Persistence, UnitOfWork};
use crate::services::{ReportAnalyst, ReportService};

/// Execute the report command
pub async fn execute(args: ReportArgs, config: Config) -> AppResult<()> {
    let period = Period::parse(args.month.as_deref())?;
    let month = period.month_or(Month::current());
    let currency = match args.currency.as_deref() {
        Some(code) => code.parse::<Currency>()?,
        None => config.base_currency,
    };

    let db = Database::connect_without_migrations(&config).await?;
    let uow = Arc::new(Persistence::new(db.get_connection()));

    let user = uow
        .users()
        .find_by_username(&args.username)
        .await?
        .ok_or_not_found()?;
    tracing::debug!(user_id = %user.id, %period, "Building report");

    let analyst = ReportAnalyst::new(uow);
    let (summary, budgets, health) = futures::try_join!(
        analyst.summary(user.id, period),
        analyst.budgets(user.id, month),
        analyst.health(user.id, month),
    )?;

    let printer = Printer {
        currency,
        config: &config,
    };
    println!("Report for {} ({})", user.username, period);
    printer.summary(&summary);
    printer.budgets(&budgets);
    printer.health(&health);

    Ok(())
}

struct Printer<'a> {
    currency: Currency,
    config: &'a Config,
}

impl Printer<'_> {
    fn money(&self, amount: Decimal) -> String {
        convert_from_base(
            amount,
            self.config.base_currency,
            self.currency,
            &self.config.currency_rates,
        )
        .format()
    }

    fn summary(&self, summary: &Summary) {
        println!();
        println!("Income:   {}", self.money(summary.total_income));
        println!("Expense:  {}", self.money(summary.total_expense));
        println!("Balance:  {}", self.money(summary.balance));
        println!("Savings:  {}", self.money(summary.total_savings));
        if !summary.expenses_by_category.is_empty() {
            println!();
            println!("Expenses by category:");
            for line in &summary.expenses_by_category {
                println!("  {:<20} {}", line.category, self.money(line.total));
            }
        }
    }

    fn budgets(&self, report: &BudgetReport) {
        println!();
        println!("Budgets for {}:", report.month);
        if report.lines.is_empty() {
            println!("  (none)");
            return;
        }
        for line in &report.lines {
            println!(
                "  {:<20} {} of {} ({:.0}%, {:?})",
                line.category,
                self.money(line.spent),
                self.money(line.amount),
                line.percentage,
                line.status,
            );
        }
        println!("  Remaining: {}", self.money(report.total_remaining));
    }

    fn health(&self, report: &HealthReport) {
        println!();
        println!("Health score: {}/100 ({:?})", report.score, report.status);
        println!(
            "  saving ratio {}  budget discipline {}  stability {}  consistency {}",
            report.breakdown.saving_ratio,
            report.breakdown.budget_discipline,
            report.breakdown.spending_stability,
            report.breakdown.consistency,
        );
        for recommendation in &report.recommendations {
            println!("  - {:?}", recommendation);
        }
    }
}

