//! Approval overlay
//!
//! Local record of approval edits, layered over fetched transactions at
//! read time. The fetched records themselves are never mutated; the overlay
//! grows for the session lifetime and is not persisted anywhere; the
//! authoritative value lives server-side and arrives with the next fetch.

use payview_remote::Transaction;
use serde::Serialize;
use std::collections::HashMap;

/// Sparse map of transaction id → locally edited approval flag
#[derive(Debug, Clone, Default)]
pub struct ApprovalOverlay {
    entries: HashMap<String, bool>,
}

impl ApprovalOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edit; setting the same value again changes nothing
    pub fn set(&mut self, transaction_id: &str, approved: bool) {
        self.entries.insert(transaction_id.to_string(), approved);
    }

    /// The local edit for a transaction, if one was made this session
    pub fn get(&self, transaction_id: &str) -> Option<bool> {
        self.entries.get(transaction_id).copied()
    }

    /// The approval flag to display: the local edit if present, else the
    /// value the server sent with the record
    pub fn effective(&self, transaction: &Transaction) -> bool {
        self.get(&transaction.id).unwrap_or(transaction.approved)
    }

    /// Number of edits recorded this session
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A transaction as presented, with the overlay already applied
///
/// `approved` is the effective flag; `transaction.approved` keeps the
/// server value untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub transaction: Transaction,
    pub approved: bool,
}

// ==================== Tests ====================
