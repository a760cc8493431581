//! Mock RouterApi for unit testing
//!
//! This module provides an in-memory implementation of [`RouterApi`] that
//! follows the backend's rules closely enough for UI-side tests, without a
//! running server.
//!
//! The mock is organized into domain-specific modules:
//! - `routers.rs` - router records, router and port configuration, attach
//! - `connections.rs` - router-to-router connections
//! - `diagnostics.rs` - ping and simulated packets

mod connections;
mod diagnostics;
mod routers;

use crate::error::{Operation, OperationError, TransportError};
use crate::models::*;
use crate::router_trait::RouterApi;
use reqwest::StatusCode;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Connection as the backend stores it: by router id, not IP
#[derive(Debug, Clone)]
pub(crate) struct StoredConnection {
    pub(crate) id: u64,
    pub(crate) from_id: u64,
    pub(crate) to_id: u64,
    pub(crate) status: String,
    pub(crate) created_at: String,
}

/// Mock RouterApi for testing
///
/// Clones share the same store, so a test can keep a handle for setup and
/// assertions while the code under test owns another.
#[derive(Debug, Clone)]
pub struct MockRouterApi {
    pub(crate) base_url: String,
    pub(crate) routers: Arc<Mutex<BTreeMap<u64, Router>>>,
    pub(crate) connections: Arc<Mutex<Vec<StoredConnection>>>,
    pub(crate) failures: Arc<Mutex<HashSet<Operation>>>,
    pub(crate) next_id: Arc<Mutex<u64>>,
}

impl MockRouterApi {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            routers: Arc::new(Mutex::new(BTreeMap::new())),
            connections: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(HashSet::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Add a router to the mock store (for test setup)
    pub fn add_router(&self, router: Router) {
        lock(&self.routers).insert(router.id, router);
    }

    /// Make every later call of `operation` fail with a 500
    pub fn fail_operation(&self, operation: Operation) {
        lock(&self.failures).insert(operation);
    }

    /// Remove all injected failures
    pub fn clear_failures(&self) {
        lock(&self.failures).clear();
    }

    /// Generate next ID
    pub(crate) fn next_id(&self) -> u64 {
        let mut id = lock(&self.next_id);
        let current = *id;
        *id += 1;
        current
    }

    /// Fail early if a failure was injected for `operation`
    pub(crate) fn check_injected(&self, operation: Operation) -> Result<(), OperationError> {
        if lock(&self.failures).contains(&operation) {
            return Err(rejected(operation, StatusCode::INTERNAL_SERVER_ERROR, "injected failure"));
        }
        Ok(())
    }

    /// Find a router by IP address
    pub(crate) fn router_by_ip(&self, ip: &str) -> Option<Router> {
        lock(&self.routers)
            .values()
            .find(|r| r.ip_address == ip)
            .cloned()
    }
}

/// Lock a store, recovering the data if a panicking test poisoned it
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Build the error the backend would answer with (`{"error": "..."}`)
pub(crate) fn rejected(operation: Operation, status: StatusCode, message: &str) -> OperationError {
    OperationError::new(
        operation,
        TransportError::Status {
            status,
            body: serde_json::json!({ "error": message }).to_string(),
        },
    )
}

#[async_trait::async_trait]
impl RouterApi for MockRouterApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    // Routers - delegated to routers module
    async fn list_routers(&self) -> Result<Vec<Router>, OperationError> {
        routers::list_routers(self)
    }

    async fn create_router(&self, request: &RouterCreateRequest) -> Result<Router, OperationError> {
        routers::create_router(self, request)
    }

    async fn configure_router(&self, request: &RouterConfigureRequest) -> Result<ConfigureResponse, OperationError> {
        routers::configure_router(self, request)
    }

    async fn configure_port(&self, request: &PortConfigureRequest) -> Result<ConfigureResponse, OperationError> {
        routers::configure_port(self, request)
    }

    async fn attach_router(&self, request: &AttachRouterRequest) -> Result<AttachRouterResponse, OperationError> {
        routers::attach_router(self, request)
    }

    // Connections - delegated to connections module
    async fn connect_routers(&self, request: &RouterConnectionRequest) -> Result<RouterConnection, OperationError> {
        connections::connect_routers(self, request)
    }

    async fn list_router_connections(&self) -> Result<Vec<RouterConnection>, OperationError> {
        connections::list_router_connections(self)
    }

    async fn router_connections_by_ip(&self, ip: &str) -> Result<Vec<RouterConnection>, OperationError> {
        connections::router_connections_by_ip(self, ip)
    }

    // Diagnostics - delegated to diagnostics module
    async fn ping(&self, request: &PingRequest) -> Result<PingResult, OperationError> {
        diagnostics::ping(self, request)
    }

    async fn send_packet(&self, request: &PacketRequest) -> Result<PacketResponse, OperationError> {
        diagnostics::send_packet(self, request)
    }
}

#[cfg(test)]
mod tests;
