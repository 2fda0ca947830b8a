//! In-memory binding for the remote endpoint
//!
//! Serves the four operations from an owned dataset: page slicing for the
//! all-transactions feed, filtering for the single-employee feed, and
//! write-through for approvals. Used by tests and by the demo mode of the
//! CLI, where it stands in for the real endpoint.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::sync::RwLock;

use crate::error::TransportError;
use crate::models::{
    Employee, Paginated, PaginatedRequestParams, SetTransactionApprovalParams, Transaction,
    TransactionsByEmployeeParams,
};
use crate::{endpoints, Transport};

const DEFAULT_PAGE_SIZE: usize = 5;

/// Dataset served by a [`MemoryTransport`]
#[derive(Debug, Default)]
struct Dataset {
    employees: Vec<Employee>,
    transactions: Vec<Transaction>,
}

/// Remote endpoint backed by an in-memory dataset
pub struct MemoryTransport {
    data: RwLock<Dataset>,
    page_size: usize,
}

impl MemoryTransport {
    /// Create a transport serving the given dataset
    pub fn new(employees: Vec<Employee>, transactions: Vec<Transaction>) -> Self {
        Self {
            data: RwLock::new(Dataset {
                employees,
                transactions,
            }),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the page size of the all-transactions feed
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// A small realistic dataset for the demo mode
    pub fn sample() -> Self {
        let employees = vec![
            employee("emp-1", "Amara", "Okafor"),
            employee("emp-2", "Lucas", "Meier"),
            employee("emp-3", "Priya", "Raman"),
        ];
        let transactions = vec![
            transaction("txn-1", 12550, &employees[0], "Northwind Catering", 2026, 6, 2, false),
            transaction("txn-2", 4899, &employees[1], "Cloud Hosting Co", 2026, 6, 5, true),
            transaction("txn-3", 76000, &employees[2], "Apex Travel", 2026, 6, 9, false),
            transaction("txn-4", 1575, &employees[0], "Corner Espresso", 2026, 6, 11, false),
            transaction("txn-5", 23040, &employees[1], "Office Supply Hub", 2026, 6, 16, true),
            transaction("txn-6", 9900, &employees[2], "Metro Transit", 2026, 6, 21, false),
            transaction("txn-7", 31200, &employees[0], "Harbor Hotel", 2026, 6, 27, false),
        ];
        Self::new(employees, transactions)
    }

    fn get_employees(&self) -> Result<Value, TransportError> {
        let data = self.data.read().unwrap();
        respond(&data.employees)
    }

    fn get_transactions_paginated(&self, params: Value) -> Result<Value, TransportError> {
        let params: PaginatedRequestParams =
            decode_params(endpoints::GET_TRANSACTIONS_PAGINATED, params)?;
        let data = self.data.read().unwrap();

        let start = params.page as usize * self.page_size;
        let page: Vec<Transaction> = data
            .transactions
            .iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();
        let next_page = if start + page.len() < data.transactions.len() {
            Some(params.page + 1)
        } else {
            None
        };

        respond(&Paginated {
            data: page,
            next_page,
        })
    }

    fn get_transactions_by_employee(&self, params: Value) -> Result<Value, TransportError> {
        let params: TransactionsByEmployeeParams =
            decode_params(endpoints::GET_TRANSACTIONS_BY_EMPLOYEE, params)?;
        let data = self.data.read().unwrap();

        if !data.employees.iter().any(|e| e.id == params.employee_id) {
            return Err(TransportError::EmployeeNotFound {
                id: params.employee_id,
            });
        }

        let transactions: Vec<Transaction> = data
            .transactions
            .iter()
            .filter(|t| t.employee.id == params.employee_id)
            .cloned()
            .collect();
        respond(&transactions)
    }

    fn set_transaction_approval(&self, params: Value) -> Result<Value, TransportError> {
        let params: SetTransactionApprovalParams =
            decode_params(endpoints::SET_TRANSACTION_APPROVAL, params)?;
        let mut data = self.data.write().unwrap();

        match data
            .transactions
            .iter_mut()
            .find(|t| t.id == params.transaction_id)
        {
            Some(transaction) => {
                transaction.approved = params.value;
                Ok(Value::Null)
            }
            None => Err(TransportError::TransactionNotFound {
                id: params.transaction_id,
            }),
        }
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn call(&self, endpoint: &str, params: Value) -> Result<Value, TransportError> {
        match endpoint {
            endpoints::GET_EMPLOYEES => self.get_employees(),
            endpoints::GET_TRANSACTIONS_PAGINATED => self.get_transactions_paginated(params),
            endpoints::GET_TRANSACTIONS_BY_EMPLOYEE => self.get_transactions_by_employee(params),
            endpoints::SET_TRANSACTION_APPROVAL => self.set_transaction_approval(params),
            other => Err(TransportError::UnknownEndpoint {
                endpoint: other.to_string(),
            }),
        }
    }
}

fn decode_params<T: serde::de::DeserializeOwned>(
    endpoint: &str,
    params: Value,
) -> Result<T, TransportError> {
    serde_json::from_value(params).map_err(|e| TransportError::InvalidParams {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

fn respond<T: Serialize>(value: &T) -> Result<Value, TransportError> {
    serde_json::to_value(value).map_err(|e| TransportError::Internal {
        message: e.to_string(),
    })
}

fn employee(id: &str, first_name: &str, last_name: &str) -> Employee {
    Employee {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn transaction(
    id: &str,
    cents: i64,
    employee: &Employee,
    merchant: &str,
    year: i32,
    month: u32,
    day: u32,
    approved: bool,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount: Decimal::new(cents, 2),
        employee: employee.clone(),
        merchant: merchant.to_string(),
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        approved,
    }
}

// ==================== Tests ====================
