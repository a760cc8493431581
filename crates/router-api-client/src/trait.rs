//! RouterApi trait for mocking
//!
//! This trait abstracts the RouterApiClient so UI-side code can be tested
//! against the in-memory mock instead of a running backend.

use crate::error::OperationError;
use crate::models::*;

/// Trait for router management API operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait RouterApi: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    // Routers
    /// `GET /routers`
    async fn list_routers(&self) -> Result<Vec<Router>, OperationError>;
    /// `POST /routers`; returns the stored router
    async fn create_router(&self, request: &RouterCreateRequest) -> Result<Router, OperationError>;
    /// `PATCH /routers/configure`
    async fn configure_router(&self, request: &RouterConfigureRequest) -> Result<ConfigureResponse, OperationError>;
    /// `PATCH /ports/configure`
    async fn configure_port(&self, request: &PortConfigureRequest) -> Result<ConfigureResponse, OperationError>;
    /// `POST /routers/connect`; marks the router connected
    async fn attach_router(&self, request: &AttachRouterRequest) -> Result<AttachRouterResponse, OperationError>;

    // Connections
    /// `POST /routers/connection`
    async fn connect_routers(&self, request: &RouterConnectionRequest) -> Result<RouterConnection, OperationError>;
    /// `GET /routers/connections`, routers embedded
    async fn list_router_connections(&self) -> Result<Vec<RouterConnection>, OperationError>;
    /// `GET /routers/connections?ip=`, connections touching `ip`
    async fn router_connections_by_ip(&self, ip: &str) -> Result<Vec<RouterConnection>, OperationError>;

    // Diagnostics
    /// `POST /ping`
    async fn ping(&self, request: &PingRequest) -> Result<PingResult, OperationError>;
    /// `POST /packet`
    async fn send_packet(&self, request: &PacketRequest) -> Result<PacketResponse, OperationError>;
}
