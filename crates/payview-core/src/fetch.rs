//! Cached request execution against the remote endpoint
//!
//! A [`FetchClient`] executes logical operations through the shared
//! [`Transport`] and keeps successful responses in a [`FetchCache`] keyed by
//! endpoint + serialized parameters. The cache is an explicit session-scoped
//! object owned by the composition root and shared by reference between
//! clients; each client tracks its own in-flight calls for its `loading`
//! flag.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use payview_remote::TransportRef;

use crate::error::{CoreError, CoreResult};

/// Whether a request may be served from the response cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Serve a cached response when present, call otherwise
    Cache,
    /// Always call; the fresh response still overwrites the cache entry
    NoCache,
}

// ==================== Response Cache ====================

/// Session-scoped response cache shared by all fetch clients
///
/// At most one entry per key; a new response for a key overwrites the old
/// one. Accumulation across pages happens in the feed store, never here.
#[derive(Debug, Default)]
pub struct FetchCache {
    entries: RwLock<HashMap<String, Value>>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the cached response for a key
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().unwrap().get(key).cloned()
    }

    /// Store a response, replacing any previous entry for the key
    pub fn store(&self, key: String, value: Value) {
        self.entries.write().unwrap().insert(key, value);
    }

    /// Drop every cached response
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    /// Number of cached responses
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cache key: endpoint name plus serialized parameters
///
/// `serde_json::Value` maps are sorted, so the serialization is
/// deterministic for equal parameters. Parameterless calls key on the bare
/// endpoint name.
fn cache_key(endpoint: &str, params: &Value) -> String {
    if params.is_null() {
        endpoint.to_string()
    } else {
        format!("{}@{}", endpoint, params)
    }
}

// ==================== Fetch Client ====================

/// Request executor with response caching and an in-flight counter
#[derive(Clone)]
pub struct FetchClient {
    transport: TransportRef,
    cache: Arc<FetchCache>,
    in_flight: Arc<AtomicUsize>,
}

impl FetchClient {
    pub fn new(transport: TransportRef, cache: Arc<FetchCache>) -> Self {
        Self {
            transport,
            cache,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Whether any call issued through this client is still in flight
    ///
    /// Overlapping calls are counted; the flag only drops once every one of
    /// them has completed. Cache hits never toggle it.
    pub fn loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Execute a logical operation, honoring the cache policy
    pub async fn request<R, P>(
        &self,
        endpoint: &str,
        params: &P,
        policy: CachePolicy,
    ) -> CoreResult<R>
    where
        R: DeserializeOwned,
        P: Serialize,
    {
        let params = serde_json::to_value(params).map_err(|e| CoreError::InvalidParams {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;
        let key = cache_key(endpoint, &params);

        if policy == CachePolicy::Cache {
            if let Some(hit) = self.cache.get(&key) {
                log::debug!("cache hit for {}", key);
                return decode(endpoint, hit);
            }
        }

        let _guard = InFlightGuard::enter(&self.in_flight);
        log::debug!("calling {}", key);
        let value = self.transport.call(endpoint, params).await?;
        self.cache.store(key, value.clone());
        decode(endpoint, value)
    }
}

fn decode<R: DeserializeOwned>(endpoint: &str, value: Value) -> CoreResult<R> {
    serde_json::from_value(value).map_err(|e| CoreError::MalformedResponse {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

/// Increments the in-flight counter for its lifetime
///
/// Decrements on drop, so the counter stays balanced on the error path too.
struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use payview_remote::{Transport, TransportError};
    use serde_json::json;
    use tokio::sync::Semaphore;

    /// Returns its call count as the response body
    struct CountingTransport {
        calls: AtomicUsize,
    }

    impl CountingTransport {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl Transport for CountingTransport {
        async fn call(&self, _endpoint: &str, _params: Value) -> Result<Value, TransportError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(json!({ "call": call }))
        }
    }

    /// Blocks every call until a permit is released
    struct GatedTransport {
        started: AtomicUsize,
        gate: Semaphore,
    }

    impl GatedTransport {
        fn new() -> Self {
            Self {
                started: AtomicUsize::new(0),
                gate: Semaphore::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl Transport for GatedTransport {
        async fn call(&self, _endpoint: &str, _params: Value) -> Result<Value, TransportError> {
            self.started.fetch_add(1, Ordering::SeqCst);
            let _permit = self.gate.acquire().await.map_err(|e| TransportError::Internal {
                message: e.to_string(),
            })?;
            Ok(Value::Null)
        }
    }

    struct FailingTransport;

    #[async_trait::async_trait]
    impl Transport for FailingTransport {
        async fn call(&self, endpoint: &str, _params: Value) -> Result<Value, TransportError> {
            Err(TransportError::UnknownEndpoint {
                endpoint: endpoint.to_string(),
            })
        }
    }

    fn client_with(transport: TransportRef) -> FetchClient {
        FetchClient::new(transport, Arc::new(FetchCache::new()))
    }

    #[tokio::test]
    async fn test_cache_policy_serves_from_cache() {
        let transport = Arc::new(CountingTransport::new());
        let client = client_with(transport.clone());

        let first: Value = client
            .request("op", &json!({ "page": 0 }), CachePolicy::Cache)
            .await
            .unwrap();
        let second: Value = client
            .request("op", &json!({ "page": 0 }), CachePolicy::Cache)
            .await
            .unwrap();

        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);

        // a different key misses
        let _: Value = client
            .request("op", &json!({ "page": 1 }), CachePolicy::Cache)
            .await
            .unwrap();
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_no_cache_always_calls_and_overwrites() {
        let transport = Arc::new(CountingTransport::new());
        let client = client_with(transport.clone());

        let _: Value = client.request("op", &(), CachePolicy::Cache).await.unwrap();
        let fresh: Value = client.request("op", &(), CachePolicy::NoCache).await.unwrap();
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
        assert_eq!(fresh, json!({ "call": 2 }));

        // the overwritten entry is what cached readers now see
        let cached: Value = client.request("op", &(), CachePolicy::Cache).await.unwrap();
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached, json!({ "call": 2 }));
    }

    #[tokio::test]
    async fn test_loading_stays_true_until_every_call_resolves() {
        let transport = Arc::new(GatedTransport::new());
        let client = client_with(transport.clone());
        assert!(!client.loading());

        let first = {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .request::<Value, _>("a", &(), CachePolicy::NoCache)
                    .await
            })
        };
        let second = {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .request::<Value, _>("b", &(), CachePolicy::NoCache)
                    .await
            })
        };

        while transport.started.load(Ordering::SeqCst) < 2 {
            tokio::task::yield_now().await;
        }
        assert!(client.loading());

        // one of the two resolves; the flag must not drop yet
        transport.gate.add_permits(1);
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        assert!(client.loading());

        transport.gate.add_permits(1);
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();
        assert!(!client.loading());
    }

    #[tokio::test]
    async fn test_loading_resets_after_failure() {
        let client = client_with(Arc::new(FailingTransport));

        let result = client.request::<Value, _>("op", &(), CachePolicy::NoCache).await;
        assert!(matches!(result, Err(CoreError::Transport(_))));
        assert!(!client.loading());
    }

    #[tokio::test]
    async fn test_malformed_response_propagates() {
        let transport = Arc::new(CountingTransport::new());
        let client = client_with(transport);

        // the body is an object, not the requested sequence
        let result = client
            .request::<Vec<String>, _>("op", &(), CachePolicy::NoCache)
            .await;
        assert!(matches!(result, Err(CoreError::MalformedResponse { .. })));
    }

    #[test]
    fn test_cache_key_shape() {
        assert_eq!(cache_key("getEmployees", &Value::Null), "getEmployees");
        assert_eq!(
            cache_key("getTransactionsPaginated", &json!({ "page": 0 })),
            "getTransactionsPaginated@{\"page\":0}"
        );
    }
}
