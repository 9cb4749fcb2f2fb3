// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Expense queries.

use diesel::prelude::*;
use time::Date;
use tracing::debug;

use medfleet_domain::{Expense, ExpenseStatus, format_service_date};

use crate::data_models::ExpenseRow;
use crate::diesel_schema::expenses;
use crate::error::PersistenceError;

/// Fetches an expense by ID.
///
/// # Errors
///
/// Returns `NotFound` if the expense does not exist.
pub fn get_expense(
    conn: &mut SqliteConnection,
    expense_id: i64,
) -> Result<Expense, PersistenceError> {
    let row: ExpenseRow = expenses::table
        .filter(expenses::expense_id.eq(expense_id))
        .first(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("Expense {expense_id}"))
            }
            other => other.into(),
        })?;

    Expense::try_from(row)
}

/// Lists expenses with optional filters, newest expense date first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be mapped.
pub fn list_expenses(
    conn: &mut SqliteConnection,
    status: Option<ExpenseStatus>,
    category: Option<&str>,
    from: Option<Date>,
    to: Option<Date>,
) -> Result<Vec<Expense>, PersistenceError> {
    debug!(?status, ?category, "Listing expenses");

    let mut query = expenses::table.into_boxed();
    if let Some(status) = status {
        query = query.filter(expenses::status.eq(status.as_str()));
    }
    if let Some(category) = category {
        query = query.filter(expenses::category.eq(category.to_string()));
    }
    if let Some(from) = from {
        query = query.filter(expenses::expense_date.ge(format_service_date(from)?));
    }
    if let Some(to) = to {
        query = query.filter(expenses::expense_date.le(format_service_date(to)?));
    }

    let rows: Vec<ExpenseRow> = query
        .order((expenses::expense_date.desc(), expenses::expense_id.desc()))
        .load(conn)?;

    rows.into_iter().map(Expense::try_from).collect()
}
