// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;

use spendwise::cli;
use spendwise::commands::transactions;
use spendwise::models::{Transaction, TransactionKind};

fn tx(id: u64, date: &str, category: &str, desc: &str, kind: TransactionKind) -> Transaction {
    Transaction {
        id,
        amount: "10".parse().unwrap(),
        category: category.to_string(),
        description: desc.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        kind,
        tags: Vec::new(),
        recurring: false,
        recurring_period: None,
        ai_category: None,
        confidence: None,
    }
}

fn history() -> Vec<Transaction> {
    vec![
        tx(4, "2025-02-10", "Dining", "Pizza night", TransactionKind::Expense),
        tx(3, "2025-02-01", "Salary", "February pay", TransactionKind::Income),
        tx(2, "2025-01-20", "Dining", "Coffee with Ana", TransactionKind::Expense),
        tx(1, "2025-01-05", "Transport", "Bus pass", TransactionKind::Expense),
    ]
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut full = vec!["spendwise", "tx", "list"];
    full.extend_from_slice(args);
    let m = cli::build_cli().get_matches_from(full);
    let Some(("tx", tx_m)) = m.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_without_filters_returns_everything_in_order() {
    let rows = transactions::filter_rows(&history(), &list_matches(&[])).unwrap();
    let ids: Vec<u64> = rows.iter().map(|t| t.id).collect();
    assert_eq!(ids, [4, 3, 2, 1]);
}

#[test]
fn month_filter_uses_calendar_month() {
    let rows =
        transactions::filter_rows(&history(), &list_matches(&["--month", "2025-01"])).unwrap();
    let ids: Vec<u64> = rows.iter().map(|t| t.id).collect();
    assert_eq!(ids, [2, 1]);
}

#[test]
fn category_and_kind_filters_compose() {
    let rows = transactions::filter_rows(
        &history(),
        &list_matches(&["--category", "Dining", "--kind", "expense"]),
    )
    .unwrap();
    let ids: Vec<u64> = rows.iter().map(|t| t.id).collect();
    assert_eq!(ids, [4, 2]);
}

#[test]
fn search_is_case_insensitive_over_description_and_category() {
    let rows =
        transactions::filter_rows(&history(), &list_matches(&["--search", "pizza"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 4);

    let rows =
        transactions::filter_rows(&history(), &list_matches(&["--search", "transport"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 1);
}

#[test]
fn invalid_search_pattern_is_an_error() {
    assert!(transactions::filter_rows(&history(), &list_matches(&["--search", "("])).is_err());
}

#[test]
fn limit_truncates_after_filtering() {
    let rows = transactions::filter_rows(
        &history(),
        &list_matches(&["--kind", "expense", "--limit", "2"]),
    )
    .unwrap();
    let ids: Vec<u64> = rows.iter().map(|t| t.id).collect();
    assert_eq!(ids, [4, 2]);
}

#[test]
fn invalid_month_filter_is_an_error() {
    assert!(transactions::filter_rows(&history(), &list_matches(&["--month", "2025-13"])).is_err());
}
