//! Mock database helpers for the transactional service tests.

use sea_orm::{
    DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Statement, TryIntoModel,
    Value,
};

use crate::infra::Resource;

pub fn postgres() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

/// Row the mock database hands back for `record`
pub fn row<R>(record: &R) -> R::Row
where
    R: Resource,
    R::Active: TryIntoModel<R::Row>,
{
    record.to_active().try_into_model().unwrap()
}

pub fn affected(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

/// Every statement the connection ran, in order
pub fn statements(db: DatabaseConnection) -> Vec<Statement> {
    db.into_transaction_log()
        .iter()
        .flat_map(|txn| txn.statements().to_vec())
        .collect()
}

/// SQL of every statement, cut after the table name
pub fn outline(statements: &[Statement]) -> Vec<String> {
    statements
        .iter()
        .map(|stmt| {
            let mut words = stmt.sql.split_whitespace();
            let head: Vec<&str> = match words.next() {
                Some("SELECT") => {
                    let table = words.by_ref().skip_while(|w| *w != "FROM").nth(1);
                    vec!["SELECT", table.unwrap_or("")]
                }
                Some(verb @ ("INSERT" | "DELETE")) => {
                    vec![verb, words.next().unwrap_or(""), words.next().unwrap_or("")]
                }
                Some("UPDATE") => vec!["UPDATE", words.next().unwrap_or("")],
                Some(other) => vec![other],
                None => vec![],
            };
            head.join(" ").replace('"', "")
        })
        .collect()
}

/// Bound values of the first statement whose SQL starts with `prefix`
pub fn values_of(statements: &[Statement], prefix: &str) -> Vec<Value> {
    statements
        .iter()
        .find(|stmt| stmt.sql.starts_with(prefix))
        .and_then(|stmt| stmt.values.clone())
        .map(|values| values.0)
        .unwrap_or_default()
}
