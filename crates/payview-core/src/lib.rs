//! Core data layer: cached fetching, feed coordination, approval overlay
//!
//! The [`Dashboard`] is the composition root. It owns the session-scoped
//! response cache, one fetch client per data source, the employee
//! directory, the active transaction feed, and the approval overlay, and
//! exposes the merged transaction list plus independent loading flags to
//! whatever presentation layer sits on top.

pub mod employees;
pub mod error;
pub mod fetch;
pub mod overlay;
pub mod transactions;

use std::sync::Arc;

use payview_remote::{
    endpoints, Employee, SetTransactionApprovalParams, TransportRef, EMPTY_EMPLOYEE_ID,
};

pub use employees::EmployeeDirectory;
pub use error::{CoreError, CoreResult, ErrorCode, ErrorSeverity};
pub use fetch::{CachePolicy, FetchCache, FetchClient};
pub use overlay::{ApprovalOverlay, TransactionView};
pub use transactions::{TransactionSource, TransactionStore};

/// Single source of truth for what the view shows
///
/// Decides which transaction feed is active and how local approval edits
/// merge over the fetched records, and reports per-source loading state.
pub struct Dashboard {
    cache: Arc<FetchCache>,
    employees: EmployeeDirectory,
    transactions: TransactionStore,
    approvals: FetchClient,
    overlay: ApprovalOverlay,
}

impl Dashboard {
    /// Build a dashboard over the given endpoint
    ///
    /// Creates the session cache and hands a reference to every client, so
    /// cached responses are shared while each source keeps its own loading
    /// flag.
    pub fn new(transport: TransportRef) -> Self {
        let cache = Arc::new(FetchCache::new());
        Self {
            employees: EmployeeDirectory::new(FetchClient::new(
                transport.clone(),
                cache.clone(),
            )),
            transactions: TransactionStore::new(FetchClient::new(
                transport.clone(),
                cache.clone(),
            )),
            approvals: FetchClient::new(transport, cache.clone()),
            overlay: ApprovalOverlay::new(),
            cache,
        }
    }

    // ==================== Loading Flags ====================

    /// Whether the employee directory fetch is in flight
    pub fn employees_loading(&self) -> bool {
        self.employees.loading()
    }

    /// Whether a transaction feed fetch is in flight
    pub fn transactions_loading(&self) -> bool {
        self.transactions.loading()
    }

    /// Whether an approval write is in flight
    pub fn approval_loading(&self) -> bool {
        self.approvals.loading()
    }

    // ==================== Queries ====================

    /// The fetched employee directory, in server order
    pub fn employees(&self) -> Option<&[Employee]> {
        self.employees.employees()
    }

    /// Employees for a selection list: the sentinel first, then the directory
    pub fn employee_options(&self) -> Vec<Employee> {
        self.employees.options()
    }

    /// The feed currently backing the view
    pub fn transaction_source(&self) -> &TransactionSource {
        self.transactions.source()
    }

    /// The active transaction list with the overlay applied
    ///
    /// `None` when no feed is loaded (the "no transactions" state).
    pub fn transactions(&self) -> Option<Vec<TransactionView>> {
        self.transactions.transactions().map(|list| {
            list.iter()
                .map(|transaction| TransactionView {
                    approved: self.overlay.effective(transaction),
                    transaction: transaction.clone(),
                })
                .collect()
        })
    }

    /// Whether the all-transactions feed has further pages
    ///
    /// Always false under an employee filter; drives the "view more"
    /// affordance.
    pub fn has_more_transactions(&self) -> bool {
        self.transactions.has_more()
    }

    /// Local approval edits made this session
    pub fn overlay(&self) -> &ApprovalOverlay {
        &self.overlay
    }

    /// The session response cache
    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    // ==================== Commands ====================

    /// One-time startup load
    ///
    /// Fetches the employee directory and the first transaction page
    /// concurrently. A no-op once the directory is populated or while its
    /// fetch is in flight, so repeated invocations from a re-rendering
    /// caller cannot trigger duplicate loads.
    pub async fn load_initial(&mut self) -> CoreResult<()> {
        if self.employees.is_loaded() || self.employees.loading() {
            return Ok(());
        }
        log::info!("initial load: employees + first transaction page");
        let (employees, transactions) = tokio::join!(
            self.employees.fetch_all(),
            self.transactions.fetch_all()
        );
        employees?;
        transactions?;
        Ok(())
    }

    /// Show the all-transactions feed
    pub async fn load_all_transactions(&mut self) -> CoreResult<()> {
        self.transactions.fetch_all().await
    }

    /// Append the next page of the all-transactions feed
    ///
    /// Safe to call with no feed or an exhausted cursor; see
    /// [`TransactionStore::fetch_more`].
    pub async fn load_more_transactions(&mut self) -> CoreResult<()> {
        self.transactions.fetch_more().await
    }

    /// Switch the view to the given employee's transactions
    ///
    /// The sentinel id switches back to the all-transactions feed. Either
    /// way the previous feed is dropped before the new fetch suspends, so
    /// the two feeds never coexist.
    pub async fn filter_by_employee(&mut self, employee_id: &str) -> CoreResult<()> {
        if employee_id == EMPTY_EMPLOYEE_ID {
            return self.load_all_transactions().await;
        }
        self.transactions.fetch_by_employee(employee_id).await
    }

    /// Persist an approval change, then record it locally
    ///
    /// The write goes to the endpoint first; the overlay is only updated
    /// after it resolves, so a rejected write leaves nothing unpersisted on
    /// screen. The failure propagates to the caller; no retry here.
    pub async fn set_approval(&mut self, transaction_id: &str, approved: bool) -> CoreResult<()> {
        let params = SetTransactionApprovalParams {
            transaction_id: transaction_id.to_string(),
            value: approved,
        };
        self.approvals
            .request::<(), _>(
                endpoints::SET_TRANSACTION_APPROVAL,
                &params,
                CachePolicy::NoCache,
            )
            .await?;
        self.overlay.set(transaction_id, approved);
        Ok(())
    }
}

// ==================== Tests ====================
