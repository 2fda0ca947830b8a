//! Transaction feed store
//!
//! The view is backed by exactly one feed at a time: the paginated
//! all-transactions feed or the single-employee feed. The store owns that
//! choice as a tagged [`TransactionSource`], so the two feeds cannot both
//! hold data and no state exists in which a stale mixture of sources could
//! be displayed.

use payview_remote::{
    endpoints, Paginated, PaginatedRequestParams, Transaction, TransactionsByEmployeeParams,
};

use crate::error::CoreResult;
use crate::fetch::{CachePolicy, FetchClient};

/// The transaction feed currently backing the view
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionSource {
    /// No feed loaded
    Empty,
    /// Accumulated pages of the all-transactions feed
    All(Paginated<Transaction>),
    /// Every transaction of one employee
    ByEmployee {
        employee_id: String,
        transactions: Vec<Transaction>,
    },
}

impl TransactionSource {
    /// The transactions of the active feed, if any
    pub fn transactions(&self) -> Option<&[Transaction]> {
        match self {
            TransactionSource::Empty => None,
            TransactionSource::All(page) => Some(&page.data),
            TransactionSource::ByEmployee { transactions, .. } => Some(transactions),
        }
    }

    /// Cursor for the next page of the all-transactions feed
    ///
    /// `None` for the terminal page and for every other source.
    pub fn next_page(&self) -> Option<u32> {
        match self {
            TransactionSource::All(page) => page.next_page,
            _ => None,
        }
    }

    /// The employee filter in effect, if any
    pub fn employee_id(&self) -> Option<&str> {
        match self {
            TransactionSource::ByEmployee { employee_id, .. } => Some(employee_id),
            _ => None,
        }
    }
}

/// Coordinates fetching and replacement of the active feed
pub struct TransactionStore {
    client: FetchClient,
    source: TransactionSource,
}

impl TransactionStore {
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            source: TransactionSource::Empty,
        }
    }

    /// Whether a feed fetch is in flight
    pub fn loading(&self) -> bool {
        self.client.loading()
    }

    pub fn source(&self) -> &TransactionSource {
        &self.source
    }

    /// The transactions of the active feed, if any
    pub fn transactions(&self) -> Option<&[Transaction]> {
        self.source.transactions()
    }

    /// Whether the all-transactions feed has further pages
    pub fn has_more(&self) -> bool {
        self.source.next_page().is_some()
    }

    /// Replace the active feed with the first page of all transactions
    ///
    /// The previous feed is dropped before the request is issued, so no
    /// state with two live feeds ever exists. Always bypasses the cache:
    /// the set of all transactions changes server-side and must reflect
    /// approval writes. After this resolves the feed holds exactly one
    /// page; accumulation only happens through [`fetch_more`].
    ///
    /// [`fetch_more`]: TransactionStore::fetch_more
    pub async fn fetch_all(&mut self) -> CoreResult<()> {
        self.source = TransactionSource::Empty;
        let page: Paginated<Transaction> = self
            .client
            .request(
                endpoints::GET_TRANSACTIONS_PAGINATED,
                &PaginatedRequestParams { page: 0 },
                CachePolicy::NoCache,
            )
            .await?;
        self.source = TransactionSource::All(page);
        Ok(())
    }

    /// Append the next page of the all-transactions feed
    ///
    /// A no-op when no feed is loaded, when the employee feed is active, or
    /// when the cursor is exhausted; these are reachable states from normal
    /// interaction, not errors. Earlier pages are kept; replacing them here
    /// would silently shrink the list.
    pub async fn fetch_more(&mut self) -> CoreResult<()> {
        let next = match self.source.next_page() {
            Some(next) => next,
            None => return Ok(()),
        };

        let fresh: Paginated<Transaction> = self
            .client
            .request(
                endpoints::GET_TRANSACTIONS_PAGINATED,
                &PaginatedRequestParams { page: next },
                CachePolicy::NoCache,
            )
            .await?;

        if let TransactionSource::All(page) = &mut self.source {
            page.data.extend(fresh.data);
            page.next_page = fresh.next_page;
        }
        Ok(())
    }

    /// Replace the active feed with one employee's transactions
    ///
    /// Not paginated; the list is replaced wholesale. Always bypasses the
    /// cache so approvals reflect the latest writes.
    pub async fn fetch_by_employee(&mut self, employee_id: &str) -> CoreResult<()> {
        self.source = TransactionSource::Empty;
        let transactions: Vec<Transaction> = self
            .client
            .request(
                endpoints::GET_TRANSACTIONS_BY_EMPLOYEE,
                &TransactionsByEmployeeParams {
                    employee_id: employee_id.to_string(),
                },
                CachePolicy::NoCache,
            )
            .await?;
        self.source = TransactionSource::ByEmployee {
            employee_id: employee_id.to_string(),
            transactions,
        };
        Ok(())
    }

    /// Drop the active feed without issuing a request
    pub fn invalidate(&mut self) {
        self.source = TransactionSource::Empty;
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchCache;
    use chrono::NaiveDate;
    use payview_remote::{Employee, Transport, TransportError};
    use rust_decimal::Decimal;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn transaction(id: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount: Decimal::new(1000, 2),
            employee: Employee {
                id: "emp-1".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
            },
            merchant: "Merchant".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            approved: false,
        }
    }

    /// Serves preset pages and counts requests
    struct PagesTransport {
        pages: Vec<Paginated<Transaction>>,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Transport for PagesTransport {
        async fn call(&self, endpoint: &str, params: Value) -> Result<Value, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(endpoint, endpoints::GET_TRANSACTIONS_PAGINATED);
            let page = params["page"].as_u64().unwrap() as usize;
            serde_json::to_value(&self.pages[page]).map_err(|e| TransportError::Internal {
                message: e.to_string(),
            })
        }
    }

    fn store_with_pages(pages: Vec<Paginated<Transaction>>) -> (TransactionStore, Arc<PagesTransport>) {
        let transport = Arc::new(PagesTransport {
            pages,
            calls: AtomicUsize::new(0),
        });
        let client = FetchClient::new(transport.clone(), Arc::new(FetchCache::new()));
        (TransactionStore::new(client), transport)
    }

    fn two_pages() -> Vec<Paginated<Transaction>> {
        vec![
            Paginated {
                data: vec![transaction("txn-1"), transaction("txn-2")],
                next_page: Some(1),
            },
            Paginated {
                data: vec![
                    transaction("txn-3"),
                    transaction("txn-4"),
                    transaction("txn-5"),
                ],
                next_page: None,
            },
        ]
    }

    #[tokio::test]
    async fn test_fetch_all_holds_one_page() {
        let (mut store, _) = store_with_pages(two_pages());
        store.fetch_all().await.unwrap();

        assert_eq!(store.transactions().unwrap().len(), 2);
        assert!(store.has_more());
    }

    #[tokio::test]
    async fn test_fetch_more_accumulates_pages() {
        let (mut store, transport) = store_with_pages(two_pages());
        store.fetch_all().await.unwrap();
        store.fetch_more().await.unwrap();

        let transactions = store.transactions().unwrap();
        assert_eq!(transactions.len(), 5);
        // earlier pages kept, in order
        let ids: Vec<&str> = transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["txn-1", "txn-2", "txn-3", "txn-4", "txn-5"]);
        assert!(!store.has_more());

        // the cursor is exhausted: no request, state unchanged
        store.fetch_more().await.unwrap();
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.transactions().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_fetch_more_without_feed_is_noop() {
        let (mut store, transport) = store_with_pages(two_pages());

        store.fetch_more().await.unwrap();
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.source(), &TransactionSource::Empty);
    }

    #[tokio::test]
    async fn test_fetch_all_resets_accumulation() {
        let (mut store, _) = store_with_pages(two_pages());
        store.fetch_all().await.unwrap();
        store.fetch_more().await.unwrap();
        assert_eq!(store.transactions().unwrap().len(), 5);

        store.fetch_all().await.unwrap();
        assert_eq!(store.transactions().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_drops_feed_without_request() {
        let (mut store, transport) = store_with_pages(two_pages());
        store.fetch_all().await.unwrap();

        store.invalidate();
        assert_eq!(store.source(), &TransactionSource::Empty);
        assert!(store.transactions().is_none());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_switching_feeds_never_mixes_sources() {
        let transport = Arc::new(payview_remote::MemoryTransport::sample());
        let client = FetchClient::new(transport, Arc::new(FetchCache::new()));
        let mut store = TransactionStore::new(client);

        store.fetch_all().await.unwrap();
        assert!(store.source().employee_id().is_none());

        store.fetch_by_employee("emp-1").await.unwrap();
        assert_eq!(store.source().employee_id(), Some("emp-1"));
        assert!(store
            .transactions()
            .unwrap()
            .iter()
            .all(|t| t.employee.id == "emp-1"));
        assert!(!store.has_more());

        store.fetch_all().await.unwrap();
        assert!(store.source().employee_id().is_none());
        assert!(store.transactions().is_some());
    }
}
