// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialYear {
    pub id: i64,
    pub label: String, // YYYY-YY
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub group_id: Option<i64>,
    pub group_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningBalance {
    pub account_id: i64,
    pub account_name: String,
    pub financial_year_id: i64,
    pub amount: Decimal,
}

/// Joined row as the engine and all exporters consume it: account names are
/// resolved for display, ids kept as the only join keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: NaiveDate,
    pub from_account_id: i64,
    pub from_account: String,
    pub to_account_id: i64,
    pub to_account: String,
    pub amount: Decimal,
    pub note: Option<String>,
}

/// Fields the caller supplies when adding or editing a transaction.
/// `created_by`/`created_at` are stamped on add and preserved on edit.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: Decimal,
    pub note: Option<String>,
    pub financial_year_id: i64,
    pub created_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: Decimal,
    pub note: Option<String>,
    pub financial_year_id: i64,
    pub created_by: String,
    pub created_at: NaiveDateTime,
}
