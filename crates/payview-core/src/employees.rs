//! Employee directory store
//!
//! Fetched once with the cached policy and read-only for the rest of the
//! session.

use payview_remote::{endpoints, Employee};
use serde_json::Value;

use crate::error::CoreResult;
use crate::fetch::{CachePolicy, FetchClient};

/// Holds the full employee list
pub struct EmployeeDirectory {
    client: FetchClient,
    data: Option<Vec<Employee>>,
}

impl EmployeeDirectory {
    pub fn new(client: FetchClient) -> Self {
        Self { client, data: None }
    }

    /// Whether the directory fetch is in flight
    pub fn loading(&self) -> bool {
        self.client.loading()
    }

    /// Whether the directory has been populated
    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// The fetched employees, in server order
    pub fn employees(&self) -> Option<&[Employee]> {
        self.data.as_deref()
    }

    /// Employees for a selection list: the sentinel first, then the directory
    pub fn options(&self) -> Vec<Employee> {
        match &self.data {
            None => Vec::new(),
            Some(list) => {
                let mut options = Vec::with_capacity(list.len() + 1);
                options.push(Employee::empty());
                options.extend(list.iter().cloned());
                options
            }
        }
    }

    /// Fetch the directory; a repeat call is served from the cache
    pub async fn fetch_all(&mut self) -> CoreResult<()> {
        let employees: Vec<Employee> = self
            .client
            .request(endpoints::GET_EMPLOYEES, &Value::Null, CachePolicy::Cache)
            .await?;
        self.data = Some(employees);
        Ok(())
    }
}

// ==================== Tests ====================
