//! Remote data endpoint contract and transports
//!
//! The rest of the application talks to the remote endpoint exclusively
//! through the [`Transport`] trait: logical operation names, JSON-shaped
//! parameters and results, arbitrary latency, errors as `Err`. Two bindings
//! are provided: [`HttpTransport`] for a real endpoint and
//! [`MemoryTransport`] for tests and the demo dataset.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub mod error;
pub mod http;
pub mod memory;
pub mod models;

pub use error::TransportError;
pub use http::HttpTransport;
pub use memory::MemoryTransport;

// Re-export commonly used types
pub use models::{
    Employee, Paginated, PaginatedRequestParams, SetTransactionApprovalParams, Transaction,
    TransactionsByEmployeeParams, EMPTY_EMPLOYEE_ID,
};

/// Transport reference type
pub type TransportRef = Arc<dyn Transport>;

// ==================== Endpoint Names ====================

/// Logical operation names understood by the remote endpoint
pub mod endpoints {
    /// Full employee directory, no parameters
    pub const GET_EMPLOYEES: &str = "getEmployees";
    /// One page of the all-transactions feed, params `{page}`
    pub const GET_TRANSACTIONS_PAGINATED: &str = "getTransactionsPaginated";
    /// All transactions for one employee, params `{employeeId}`
    pub const GET_TRANSACTIONS_BY_EMPLOYEE: &str = "getTransactionsByEmployee";
    /// Persist an approval flag, params `{transactionId, value}`
    pub const SET_TRANSACTION_APPROVAL: &str = "setTransactionApproval";
}

// ==================== Transport Trait ====================

/// Trait for remote data endpoints
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a logical operation against the endpoint
    async fn call(&self, endpoint: &str, params: Value) -> Result<Value, TransportError>;
}
