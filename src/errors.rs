// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Domain error taxonomy. Every mutation either fully succeeds or fails
/// with one of these; nothing is partially applied.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("invalid financial year '{0}': use YYYY-YY (e.g. 2026-27)")]
    InvalidYearFormat(String),

    #[error("invalid financial year sequence '{0}': end year must follow start year (e.g. 2026-27)")]
    InvalidYearSequence(String),

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("source and destination cannot both be '{0}'")]
    SameAccount(String),

    #[error("{kind} '{name}' already exists")]
    Duplicate { kind: &'static str, name: String },

    #[error("cannot delete {kind} '{name}': existing records reference it")]
    HasDependents { kind: &'static str, name: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: i64 },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
