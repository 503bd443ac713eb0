// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Display format used everywhere user-facing: DD-MM-YYYY. Storage stays ISO.
pub fn display_date(d: NaiveDate) -> String {
    d.format("%d-%m-%Y").to_string()
}

/// INR with Indian digit grouping: 1234567.5 -> "₹12,34,567.50".
pub fn fmt_inr(d: Decimal) -> String {
    let v = d.round_dp(2);
    let neg = v.is_sign_negative();
    let s = v.abs().to_string();
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{:0<2}", f)),
        None => (s, "00".to_string()),
    };
    let grouped = if int_part.len() <= 3 {
        int_part
    } else {
        // last three digits, then groups of two
        let (head, tail) = int_part.split_at(int_part.len() - 3);
        let mut parts = Vec::new();
        let mut i = head.len();
        while i > 2 {
            parts.push(&head[i - 2..i]);
            i -= 2;
        }
        parts.push(&head[..i]);
        parts.reverse();
        format!("{},{}", parts.join(","), tail)
    };
    let sign = if neg { "-" } else { "" };
    format!("{}₹{}.{}", sign, grouped, frac_part)
}

/// Percent-encode for wa.me share links, matching the RFC 3986 unreserved set.
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

pub fn whatsapp_url(message: &str) -> String {
    format!("https://wa.me/?text={}", percent_encode(message))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
