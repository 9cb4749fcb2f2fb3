// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Expense mutations.

use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::info;

use medfleet_domain::{Expense, ExpenseStatus};

use crate::data_models::{ExpenseChanges, ExpenseRow, NewExpense};
use crate::diesel_schema::expenses;
use crate::error::PersistenceError;
use crate::iso;

/// Creates a new expense in `pending` status.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_expense(
    conn: &mut SqliteConnection,
    new: &NewExpense,
) -> Result<Expense, PersistenceError> {
    info!(title = %new.title, amount = new.amount, "Creating expense");

    let row: ExpenseRow = diesel::insert_into(expenses::table)
        .values(new)
        .get_result(conn)?;

    Expense::try_from(row)
}

/// Applies a partial update to an expense.
///
/// A status change to `approved` or `rejected` stamps `approved_by` and
/// `approved_at`; any other change leaves the approval columns alone.
///
/// # Errors
///
/// Returns `NotFound` if the expense does not exist.
pub fn update_expense(
    conn: &mut SqliteConnection,
    expense_id: i64,
    mut changes: ExpenseChanges,
    acting_admin_id: i64,
    now: OffsetDateTime,
) -> Result<Expense, PersistenceError> {
    info!(expense_id, "Updating expense");

    let decided = matches!(
        changes.status.as_deref(),
        Some(s) if s == ExpenseStatus::Approved.as_str() || s == ExpenseStatus::Rejected.as_str()
    );
    if decided {
        changes.approved_by = Some(acting_admin_id);
        changes.approved_at = Some(iso(now)?);
    }

    let row: ExpenseRow =
        diesel::update(expenses::table.filter(expenses::expense_id.eq(expense_id)))
            .set(&changes)
            .get_result(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    PersistenceError::NotFound(format!("Expense {expense_id}"))
                }
                other => other.into(),
            })?;

    Expense::try_from(row)
}

/// Hard-deletes an expense.
///
/// # Errors
///
/// Returns `NotFound` if the expense does not exist.
pub fn delete_expense(
    conn: &mut SqliteConnection,
    expense_id: i64,
) -> Result<(), PersistenceError> {
    info!(expense_id, "Deleting expense");

    let deleted: usize =
        diesel::delete(expenses::table.filter(expenses::expense_id.eq(expense_id)))
            .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("Expense {expense_id}")));
    }
    Ok(())
}
