// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Balance & statement engine. Pure computation over already-loaded rows:
//! no Connection, no caching, re-derived on every call. The dashboard, the
//! statement view, the CSV export, and the share-text builders all consume
//! this module so the math exists in exactly one place.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::TransactionRow;
use crate::utils::{display_date, fmt_inr};

/// Well-known account names seeded for every shop ledger. Sales entries can
/// only ever be recorded with "Sales Income" as the source and expense
/// entries with "Personal Expense" as the destination, so the dashboard sums
/// follow those sides.
pub const CASH_ACCOUNT: &str = "Cash";
pub const BANK_ACCOUNT: &str = "Bank";
pub const SALES_ACCOUNT: &str = "Sales Income";
pub const EXPENSE_ACCOUNT: &str = "Personal Expense";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementState {
    OwesYou,
    YouOwe,
    Settled,
}

impl SettlementState {
    pub fn label(&self) -> &'static str {
        match self {
            SettlementState::OwesYou => "Owes You",
            SettlementState::YouOwe => "You Owe",
            SettlementState::Settled => "Settled",
        }
    }
}

/// Narrative templates as data. `{start}`, `{end}` and `{amount}` are the
/// only placeholders; rendering is plain substitution with no locale logic.
#[derive(Debug, Clone, Copy)]
pub struct MessageCatalog {
    pub owes_you: &'static str,
    pub you_owe: &'static str,
    pub settled: &'static str,
}

pub const ENGLISH: MessageCatalog = MessageCatalog {
    owes_you: "For {start} to {end} the balance on your side is {amount}, which you will pay me.",
    you_owe: "For {start} to {end} the balance on my side is {amount}, which I will pay you.",
    settled: "The account for {start} to {end} is settled.",
};

pub const HINDI: MessageCatalog = MessageCatalog {
    owes_you: "आपकी तरफ मेरा हिसाब ({start} से {end}) {amount} है जो आप मुझे देंगे।",
    you_owe: "मेरी तरफ आपका हिसाब ({start} से {end}) {amount} है जो मैं आपको दूंगा।",
    settled: "{start} से {end} का हिसाब बराबर है।",
};

impl MessageCatalog {
    pub fn render(
        &self,
        state: SettlementState,
        start: NaiveDate,
        end: NaiveDate,
        magnitude: Decimal,
    ) -> String {
        let template = match state {
            SettlementState::OwesYou => self.owes_you,
            SettlementState::YouOwe => self.you_owe,
            SettlementState::Settled => self.settled,
        };
        template
            .replace("{start}", &display_date(start))
            .replace("{end}", &display_date(end))
            .replace("{amount}", &fmt_inr(magnitude))
    }
}

/// Derived money-in/money-out/net report for one account over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    pub subject_account: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub money_in: Decimal,
    pub money_out: Decimal,
    pub net_balance: Decimal,
    pub state: SettlementState,
    pub message: String,
    pub message_localized: String,
}

pub fn classify(net: Decimal) -> SettlementState {
    if net > Decimal::ZERO {
        SettlementState::OwesYou
    } else if net < Decimal::ZERO {
        SettlementState::YouOwe
    } else {
        SettlementState::Settled
    }
}

fn in_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    date >= start && date <= end
}

/// Compute a statement for `subject_id` over `[start, end]`, both bounds
/// inclusive. `opening` is the carried starting balance for the financial
/// year; pass `None` for a plain in-period view.
///
/// An account appearing as source in one row and destination in another
/// contributes to both sums. Self-transfers are rejected at entry time and
/// never reach here.
pub fn statement(
    subject_id: i64,
    subject_name: &str,
    rows: &[TransactionRow],
    start: NaiveDate,
    end: NaiveDate,
    opening: Option<Decimal>,
) -> Statement {
    let mut money_in = Decimal::ZERO;
    let mut money_out = Decimal::ZERO;
    for row in rows {
        if !in_range(row.date, start, end) {
            continue;
        }
        if row.to_account_id == subject_id {
            money_in += row.amount;
        }
        if row.from_account_id == subject_id {
            money_out += row.amount;
        }
    }
    let net_balance = opening.unwrap_or(Decimal::ZERO) + money_in - money_out;
    let state = classify(net_balance);
    let magnitude = net_balance.abs();
    Statement {
        subject_account: subject_name.to_string(),
        start_date: start,
        end_date: end,
        money_in,
        money_out,
        net_balance,
        state,
        message: ENGLISH.render(state, start, end, magnitude),
        message_localized: HINDI.render(state, start, end, magnitude),
    }
}

/// Whole-ledger aggregate for the dashboard cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub cash: Decimal,
    pub bank: Decimal,
    pub total_sales: Decimal,
    pub total_expenses: Decimal,
    pub profit: Decimal,
    pub margin_pct: Decimal,
}

fn balance_of(name: &str, rows: &[TransactionRow], openings: &HashMap<String, Decimal>) -> Decimal {
    let opening = openings.get(name).copied().unwrap_or(Decimal::ZERO);
    let mut bal = opening;
    for row in rows {
        if row.to_account == name {
            bal += row.amount;
        }
        if row.from_account == name {
            bal -= row.amount;
        }
    }
    bal
}

/// Aggregate over the full transaction set. `openings` maps account names to
/// their carried opening balances for the year under view.
///
/// Sales sum the `Sales Income` source side, expenses the `Personal Expense`
/// destination side; margin is zero when there are no sales, never an error.
pub fn dashboard(rows: &[TransactionRow], openings: &HashMap<String, Decimal>) -> DashboardSummary {
    let mut total_sales = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    for row in rows {
        if row.from_account == SALES_ACCOUNT {
            total_sales += row.amount;
        }
        if row.to_account == EXPENSE_ACCOUNT {
            total_expenses += row.amount;
        }
    }
    let profit = total_sales - total_expenses;
    let margin_pct = if total_sales > Decimal::ZERO {
        profit / total_sales * Decimal::from(100)
    } else {
        Decimal::ZERO
    };
    DashboardSummary {
        cash: balance_of(CASH_ACCOUNT, rows, openings),
        bank: balance_of(BANK_ACCOUNT, rows, openings),
        total_sales,
        total_expenses,
        profit,
        margin_pct,
    }
}

/// WhatsApp share body for a statement, bilingual line included.
pub fn statement_share_text(s: &Statement) -> String {
    format!(
        "*Statement for: {}*\n📅 Period: {} to {}\n---------------------------\n✅ {}\n---------------------------\nGenerated via Bahikhata.",
        s.subject_account,
        display_date(s.start_date),
        display_date(s.end_date),
        s.message_localized,
    )
}

/// WhatsApp share body for the business summary.
pub fn summary_share_text(d: &DashboardSummary, generated_on: NaiveDate) -> String {
    let status = if d.profit >= Decimal::ZERO {
        "मुनाफा (Profit)"
    } else {
        "नुकसान (Loss)"
    };
    format!(
        "*Bahikhata Summary*\n---------------------------\n📈 Total Sales: {}\n📉 Expenses: {}\n💰 Net {}: {}\n🎯 Margin: {:.1}%\n---------------------------\nGenerated on: {}",
        fmt_inr(d.total_sales),
        fmt_inr(d.total_expenses),
        status,
        fmt_inr(d.profit.abs()),
        d.margin_pct,
        display_date(generated_on),
    )
}
