// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use medfleet_domain::ExpenseStatus;
use medfleet_persistence::Persistence;

use crate::expenses;
use crate::request_response::{
    CreateExpenseRequest, ExpenseListFilter, UpdateExpenseRequest,
};

use super::store;

const ADMIN_ID: i64 = 1;
const APPROVER_ID: i64 = 2;

fn expense_request(title: &str, category: &str, amount: f64) -> CreateExpenseRequest {
    CreateExpenseRequest {
        title: title.to_string(),
        description: None,
        category: category.to_string(),
        amount,
        currency: None,
        expense_date: String::from("2026-03-08"),
        vendor: Some(String::from("Bharat Fuels")),
        receipt_url: None,
    }
}

fn approve(store: &mut Persistence, expense_id: i64) {
    expenses::update_expense(
        store,
        expense_id,
        &UpdateExpenseRequest {
            status: Some(String::from("approved")),
            ..UpdateExpenseRequest::default()
        },
        APPROVER_ID,
    )
    .expect("Failed to approve expense");
}

#[test]
fn test_expense_starts_pending_with_default_currency() {
    let mut store = store();
    let expense =
        expenses::create_expense(&mut store, &expense_request("Diesel", "fuel", 3200.0), ADMIN_ID)
            .expect("Failed to create expense");

    assert_eq!(expense.status, ExpenseStatus::Pending);
    assert_eq!(expense.currency, "INR");
    assert_eq!(expense.created_by, ADMIN_ID);
    assert!(expense.approved_by.is_none());
}

#[test]
fn test_non_positive_amount_is_rejected() {
    let mut store = store();
    let err =
        expenses::create_expense(&mut store, &expense_request("Diesel", "fuel", 0.0), ADMIN_ID)
            .expect_err("A zero amount must be rejected");
    assert_eq!(err.kind(), "validation_error");
}

#[test]
fn test_approval_stamps_the_decider() {
    let mut store = store();
    let expense =
        expenses::create_expense(&mut store, &expense_request("Diesel", "fuel", 3200.0), ADMIN_ID)
            .expect("Failed to create expense");

    approve(&mut store, expense.expense_id);

    let approved =
        expenses::get_expense(&mut store, expense.expense_id).expect("Failed to fetch expense");
    assert_eq!(approved.status, ExpenseStatus::Approved);
    assert_eq!(approved.approved_by, Some(APPROVER_ID));
    assert!(approved.approved_at.is_some());
}

#[test]
fn test_plain_edit_leaves_approval_untouched() {
    let mut store = store();
    let expense =
        expenses::create_expense(&mut store, &expense_request("Diesel", "fuel", 3200.0), ADMIN_ID)
            .expect("Failed to create expense");

    let edited = expenses::update_expense(
        &mut store,
        expense.expense_id,
        &UpdateExpenseRequest {
            title: Some(String::from("Diesel top-up")),
            ..UpdateExpenseRequest::default()
        },
        APPROVER_ID,
    )
    .expect("Failed to edit expense");

    assert_eq!(edited.title, "Diesel top-up");
    assert_eq!(edited.status, ExpenseStatus::Pending);
    assert!(edited.approved_by.is_none());
}

#[test]
fn test_list_filters_by_status_and_category() {
    let mut store = store();
    let fuel =
        expenses::create_expense(&mut store, &expense_request("Diesel", "fuel", 3200.0), ADMIN_ID)
            .expect("Failed to create expense");
    expenses::create_expense(
        &mut store,
        &expense_request("Tyre change", "maintenance", 8500.0),
        ADMIN_ID,
    )
    .expect("Failed to create expense");
    approve(&mut store, fuel.expense_id);

    let approved = expenses::list_expenses(
        &mut store,
        &ExpenseListFilter {
            status: Some(String::from("approved")),
            ..ExpenseListFilter::default()
        },
    )
    .expect("Failed to list expenses");
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].expense_id, fuel.expense_id);

    let maintenance = expenses::list_expenses(
        &mut store,
        &ExpenseListFilter {
            category: Some(String::from("maintenance")),
            ..ExpenseListFilter::default()
        },
    )
    .expect("Failed to list expenses");
    assert_eq!(maintenance.len(), 1);
}

#[test]
fn test_summary_buckets_amounts_by_status_and_category() {
    let mut store = store();
    let fuel =
        expenses::create_expense(&mut store, &expense_request("Diesel", "fuel", 3000.0), ADMIN_ID)
            .expect("Failed to create expense");
    expenses::create_expense(&mut store, &expense_request("Petrol", "fuel", 1000.0), ADMIN_ID)
        .expect("Failed to create expense");
    let rejected = expenses::create_expense(
        &mut store,
        &expense_request("Snacks", "misc", 500.0),
        ADMIN_ID,
    )
    .expect("Failed to create expense");

    approve(&mut store, fuel.expense_id);
    expenses::update_expense(
        &mut store,
        rejected.expense_id,
        &UpdateExpenseRequest {
            status: Some(String::from("rejected")),
            ..UpdateExpenseRequest::default()
        },
        APPROVER_ID,
    )
    .expect("Failed to reject expense");

    let summary = expenses::expense_summary(&mut store, &ExpenseListFilter::default())
        .expect("Failed to compute summary");

    assert_eq!(summary.total_count, 3);
    assert_eq!(summary.pending_count, 1);
    assert_eq!(summary.approved_count, 1);
    assert!((summary.total_amount - 4000.0).abs() < f64::EPSILON);
    assert!((summary.approved_amount - 3000.0).abs() < f64::EPSILON);
    assert!((summary.pending_amount - 1000.0).abs() < f64::EPSILON);

    // Categories are reported in stable order with per-category totals.
    assert_eq!(summary.by_category.len(), 2);
    assert_eq!(summary.by_category[0].category, "fuel");
    assert!((summary.by_category[0].amount - 4000.0).abs() < f64::EPSILON);
    assert_eq!(summary.by_category[0].count, 2);
}

#[test]
fn test_delete_expense() {
    let mut store = store();
    let expense =
        expenses::create_expense(&mut store, &expense_request("Diesel", "fuel", 3200.0), ADMIN_ID)
            .expect("Failed to create expense");

    expenses::delete_expense(&mut store, expense.expense_id).expect("Failed to delete expense");
    assert_eq!(
        expenses::get_expense(&mut store, expense.expense_id)
            .expect_err("Deleted expense must be gone")
            .kind(),
        "not_found"
    );
}
