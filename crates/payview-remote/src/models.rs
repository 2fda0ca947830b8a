//! Wire models for the remote endpoint
//!
//! Field names follow the endpoint's camelCase JSON contract.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reserved id of the "no filter selected" employee
pub const EMPTY_EMPLOYEE_ID: &str = "";

/// Employee information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique employee identifier
    pub id: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

impl Employee {
    /// The sentinel employee representing "all employees"
    ///
    /// Must sort first in any employee list presented for selection.
    pub fn empty() -> Self {
        Self {
            id: EMPTY_EMPLOYEE_ID.to_string(),
            first_name: "All".to_string(),
            last_name: "Employees".to_string(),
        }
    }

    /// Whether this is the sentinel employee
    pub fn is_empty(&self) -> bool {
        self.id == EMPTY_EMPLOYEE_ID
    }

    /// Display name, e.g. "Jane Doe"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A financial transaction as returned by the endpoint
///
/// Server-authoritative; the `approved` field holds the last value the
/// server acknowledged, local edits are layered on top by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Transaction amount
    pub amount: Decimal,
    /// Employee the transaction belongs to
    pub employee: Employee,
    /// Merchant name
    pub merchant: String,
    /// Transaction date
    pub date: NaiveDate,
    /// Approval flag as last persisted server-side
    pub approved: bool,
}

/// One page of a paginated feed
///
/// `next_page == None` is the terminal marker: no further pages exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// Items on this page
    pub data: Vec<T>,
    /// Cursor for the next page, if any
    pub next_page: Option<u32>,
}

// ==================== Request Parameters ====================

/// Parameters for the paginated all-transactions feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedRequestParams {
    /// Zero-based page to fetch
    pub page: u32,
}

/// Parameters for the single-employee feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsByEmployeeParams {
    pub employee_id: String,
}

/// Parameters for the approval write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTransactionApprovalParams {
    pub transaction_id: String,
    pub value: bool,
}

// ==================== Tests ====================
