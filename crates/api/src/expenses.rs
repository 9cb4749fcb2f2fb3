// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operational expense tracking with a single-step approval flow.

use std::collections::BTreeMap;
use time::OffsetDateTime;

use medfleet_domain::{Expense, ExpenseStatus};
use medfleet_persistence::{ExpenseChanges, NewExpense, Persistence};

use crate::convert::{parse_date, parse_expense_status, require_non_empty, stamp};
use crate::error::ApiError;
use crate::request_response::{
    CategoryTotal, CreateExpenseRequest, ExpenseListFilter, ExpenseSummaryResponse,
    UpdateExpenseRequest,
};

const DEFAULT_CURRENCY: &str = "INR";

/// Records an expense, attributed to the acting admin and starting in
/// `pending`.
///
/// # Errors
///
/// Returns `validation_error` for missing fields, a non-positive amount, or
/// an unparseable date.
pub fn create_expense(
    persistence: &mut Persistence,
    request: &CreateExpenseRequest,
    acting_admin_id: i64,
) -> Result<Expense, ApiError> {
    require_non_empty("title", &request.title)?;
    require_non_empty("category", &request.category)?;
    parse_date("expense_date", &request.expense_date)?;

    if request.amount <= 0.0 {
        return Err(ApiError::InvalidInput {
            field: String::from("amount"),
            message: String::from("must be positive"),
        });
    }

    let currency = request
        .currency
        .clone()
        .unwrap_or_else(|| String::from(DEFAULT_CURRENCY));

    Ok(persistence.create_expense(&NewExpense {
        title: request.title.clone(),
        description: request.description.clone(),
        category: request.category.clone(),
        amount: request.amount,
        currency,
        expense_date: request.expense_date.clone(),
        vendor: request.vendor.clone(),
        receipt_url: request.receipt_url.clone(),
        status: String::from("pending"),
        created_by: acting_admin_id,
        created_at: stamp(OffsetDateTime::now_utc())?,
    })?)
}

/// Applies a partial update to an expense.
///
/// When the update moves the status to `approved` or `rejected`, the acting
/// admin and the decision time are stamped onto the record.
///
/// # Errors
///
/// Returns `not_found` for an unknown expense and `validation_error` for a
/// bad status, date, or amount.
pub fn update_expense(
    persistence: &mut Persistence,
    expense_id: i64,
    request: &UpdateExpenseRequest,
    acting_admin_id: i64,
) -> Result<Expense, ApiError> {
    let status = request
        .status
        .as_deref()
        .map(parse_expense_status)
        .transpose()?;
    if let Some(expense_date) = request.expense_date.as_deref() {
        parse_date("expense_date", expense_date)?;
    }
    if let Some(amount) = request.amount {
        if amount <= 0.0 {
            return Err(ApiError::InvalidInput {
                field: String::from("amount"),
                message: String::from("must be positive"),
            });
        }
    }

    let changes = ExpenseChanges {
        title: request.title.clone(),
        description: request.description.clone(),
        category: request.category.clone(),
        amount: request.amount,
        currency: request.currency.clone(),
        expense_date: request.expense_date.clone(),
        vendor: request.vendor.clone(),
        receipt_url: request.receipt_url.clone(),
        status: status.map(|s| s.as_str().to_string()),
        approved_by: None,
        approved_at: None,
    };

    Ok(persistence.update_expense(
        expense_id,
        changes,
        acting_admin_id,
        OffsetDateTime::now_utc(),
    )?)
}

/// Deletes an expense.
///
/// # Errors
///
/// Returns `not_found` if the expense does not exist.
pub fn delete_expense(persistence: &mut Persistence, expense_id: i64) -> Result<(), ApiError> {
    persistence.delete_expense(expense_id)?;
    Ok(())
}

/// Fetches an expense by ID.
///
/// # Errors
///
/// Returns `not_found` if the expense does not exist.
pub fn get_expense(persistence: &mut Persistence, expense_id: i64) -> Result<Expense, ApiError> {
    Ok(persistence.get_expense(expense_id)?)
}

/// Lists expenses newest first with optional status, category, and date
/// filters.
///
/// # Errors
///
/// Returns `validation_error` for an unrecognized status or unparseable
/// date.
pub fn list_expenses(
    persistence: &mut Persistence,
    filter: &ExpenseListFilter,
) -> Result<Vec<Expense>, ApiError> {
    let status = filter
        .status
        .as_deref()
        .map(parse_expense_status)
        .transpose()?;
    let from = filter
        .from
        .as_deref()
        .map(|s| parse_date("from", s))
        .transpose()?;
    let to = filter
        .to
        .as_deref()
        .map(|s| parse_date("to", s))
        .transpose()?;

    Ok(persistence.list_expenses(status, filter.category.as_deref(), from, to)?)
}

/// Computes aggregate totals over the expenses matching `filter`.
///
/// Rejected expenses count toward `total_count` but not toward any amount
/// bucket.
///
/// # Errors
///
/// See [`list_expenses`].
pub fn expense_summary(
    persistence: &mut Persistence,
    filter: &ExpenseListFilter,
) -> Result<ExpenseSummaryResponse, ApiError> {
    let expenses = list_expenses(persistence, filter)?;

    let mut summary = ExpenseSummaryResponse {
        total_amount: 0.0,
        pending_amount: 0.0,
        approved_amount: 0.0,
        total_count: expenses.len(),
        pending_count: 0,
        approved_count: 0,
        by_category: Vec::new(),
    };

    // BTreeMap keeps category order stable for the response.
    let mut categories: BTreeMap<String, CategoryTotal> = BTreeMap::new();

    for expense in &expenses {
        match expense.status {
            ExpenseStatus::Pending => {
                summary.total_amount += expense.amount;
                summary.pending_amount += expense.amount;
                summary.pending_count += 1;
            }
            ExpenseStatus::Approved => {
                summary.total_amount += expense.amount;
                summary.approved_amount += expense.amount;
                summary.approved_count += 1;
            }
            ExpenseStatus::Rejected => {}
        }

        let entry = categories
            .entry(expense.category.clone())
            .or_insert_with(|| CategoryTotal {
                category: expense.category.clone(),
                amount: 0.0,
                count: 0,
            });
        entry.amount += expense.amount;
        entry.count += 1;
    }

    summary.by_category = categories.into_values().collect();
    Ok(summary)
}
