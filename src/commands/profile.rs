// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rust_decimal::Decimal;

use crate::models::{RiskTolerance, User};
use crate::store::Store;
use crate::utils::{parse_amount, pretty_table};

/// Creates or replaces the local profile. There is no real authentication;
/// this is a single-tenant local session.
pub fn login(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    let name = m.get_one::<String>("name").cloned().unwrap_or_default();
    let email = m.get_one::<String>("email").cloned().unwrap_or_default();
    let currency = m
        .get_one::<String>("currency")
        .cloned()
        .unwrap_or_else(|| "USD".to_string());
    let monthly_income = parse_amount(m.get_one::<String>("income").map(String::as_str).unwrap_or("0"))?;
    let savings_goal = parse_amount(
        m.get_one::<String>("savings-goal")
            .map(String::as_str)
            .unwrap_or("0"),
    )?;
    let risk_tolerance =
        RiskTolerance::parse(m.get_one::<String>("risk").map(String::as_str).unwrap_or("moderate"))?;

    store.set_user(Some(User {
        id: email.clone(),
        name: name.clone(),
        email,
        currency,
        monthly_income,
        savings_goal,
        risk_tolerance,
    }));
    println!("Logged in as {}", name);
    Ok(())
}

/// Clears the current profile. Transactions, budgets and goals stay put.
pub fn logout(store: &mut Store) -> Result<()> {
    store.set_user(None);
    println!("Logged out (your data is kept locally)");
    Ok(())
}

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(store),
        Some(("set", sub)) => set(store, sub),
        _ => Ok(()),
    }
}

fn show(store: &Store) -> Result<()> {
    let Some(user) = &store.user else {
        bail!("Not logged in");
    };
    let rows = vec![
        vec!["Name".to_string(), user.name.clone()],
        vec!["Email".to_string(), user.email.clone()],
        vec!["Currency".to_string(), user.currency.clone()],
        vec![
            "Monthly income".to_string(),
            format!("{:.2}", user.monthly_income),
        ],
        vec![
            "Savings goal".to_string(),
            format!("{:.2}", user.savings_goal),
        ],
        vec![
            "Risk tolerance".to_string(),
            user.risk_tolerance.as_str().to_string(),
        ],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}

fn set(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let Some(mut user) = store.user.clone() else {
        bail!("Not logged in");
    };
    if let Some(v) = sub.get_one::<String>("name") {
        user.name = v.clone();
    }
    if let Some(v) = sub.get_one::<String>("email") {
        user.email = v.clone();
    }
    if let Some(v) = sub.get_one::<String>("currency") {
        user.currency = v.to_uppercase();
    }
    if let Some(v) = sub.get_one::<String>("income") {
        user.monthly_income = parse_amount(v)?;
    }
    if let Some(v) = sub.get_one::<String>("savings-goal") {
        user.savings_goal = parse_amount(v)?;
    }
    if let Some(v) = sub.get_one::<String>("risk") {
        user.risk_tolerance = RiskTolerance::parse(v)?;
    }
    if user.monthly_income < Decimal::ZERO || user.savings_goal < Decimal::ZERO {
        bail!("Income and savings goal must not be negative");
    }
    store.set_user(Some(user));
    println!("Profile updated");
    Ok(())
}
