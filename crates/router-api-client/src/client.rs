//! Router management API client
//!
//! Each operation issues exactly one request against the backend's `/api/v1`
//! surface. Failures are logged with their cause and returned as an
//! [`OperationError`] tagged with the operation that failed.

use crate::common::HttpClient;
use crate::config::ClientConfig;
use crate::error::{ConfigError, Operation, OperationError, TransportError};
use crate::models::*;
use crate::router_trait::RouterApi;
use reqwest::Client;
use tracing::{debug, error};

/// Router management API client
#[derive(Debug, Clone)]
pub struct RouterApiClient {
    http: HttpClient,
}

impl RouterApiClient {
    /// Create a new client
    ///
    /// The underlying reqwest client keeps its defaults; no timeout is set.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client around an existing reqwest client
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self {
            http: HttpClient::new(client, config.base_url().to_string()),
        }
    }

    /// Create a client from the `API_BASE` environment variable
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Tag a transport failure with its operation and report it.
    fn fail(operation: Operation, cause: TransportError) -> OperationError {
        error!(operation = %operation, error = %cause, "API request failed");
        OperationError::new(operation, cause)
    }

    /// List all routers
    ///
    /// # Returns
    /// * `Ok(Vec<Router>)` - Routers exactly as the backend returned them
    /// * `Err(OperationError)` - "Failed to fetch routers"
    pub async fn list_routers(&self) -> Result<Vec<Router>, OperationError> {
        let routers: Vec<Router> = self
            .http
            .get("/routers")
            .await
            .map_err(|e| Self::fail(Operation::FetchRouters, e))?;
        debug!("Fetched {} routers", routers.len());
        Ok(routers)
    }

    /// Create a router
    ///
    /// # Arguments
    /// * `request` - Name and IP address of the new router
    ///
    /// # Returns
    /// * `Ok(Router)` - The router record the backend created
    /// * `Err(OperationError)` - "Failed to create router"
    pub async fn create_router(&self, request: &RouterCreateRequest) -> Result<Router, OperationError> {
        self.http
            .post("/routers", request)
            .await
            .map_err(|e| Self::fail(Operation::CreateRouter, e))
    }

    /// Connect two routers by IP address
    pub async fn connect_routers(
        &self,
        request: &RouterConnectionRequest,
    ) -> Result<RouterConnection, OperationError> {
        debug!("Connecting {} -> {}", request.router_from_ip, request.router_to_ip);
        self.http
            .post("/routers/connection", request)
            .await
            .map_err(|e| Self::fail(Operation::ConnectRouters, e))
    }

    /// Update a router's name and status
    pub async fn configure_router(
        &self,
        request: &RouterConfigureRequest,
    ) -> Result<ConfigureResponse, OperationError> {
        self.http
            .patch("/routers/configure", request)
            .await
            .map_err(|e| Self::fail(Operation::ConfigureRouter, e))
    }

    /// Configure one port of a router
    ///
    /// The router id is sent as a string. Failures carry
    /// [`Operation::ConfigurePort`] but display the router configuration message.
    pub async fn configure_port(
        &self,
        request: &PortConfigureRequest,
    ) -> Result<ConfigureResponse, OperationError> {
        self.http
            .patch("/ports/configure", request)
            .await
            .map_err(|e| Self::fail(Operation::ConfigurePort, e))
    }

    /// List every router connection
    pub async fn list_router_connections(&self) -> Result<Vec<RouterConnection>, OperationError> {
        self.http
            .get("/routers/connections")
            .await
            .map_err(|e| Self::fail(Operation::FetchRouterConnections, e))
    }

    /// List connections that start or end at the router with this IP
    pub async fn router_connections_by_ip(&self, ip: &str) -> Result<Vec<RouterConnection>, OperationError> {
        let path = format!("/routers/connections?{}", self.http.build_query_string(&[("ip", ip)]));
        self.http
            .get(&path)
            .await
            .map_err(|e| Self::fail(Operation::FetchConnectionsByRouter, e))
    }

    /// Attach this host to the router with the given IP
    pub async fn attach_router(
        &self,
        request: &AttachRouterRequest,
    ) -> Result<AttachRouterResponse, OperationError> {
        self.http
            .post("/routers/connect", request)
            .await
            .map_err(|e| Self::fail(Operation::AttachRouter, e))
    }

    /// Ask the backend to ping an address
    pub async fn ping(&self, request: &PingRequest) -> Result<PingResult, OperationError> {
        self.http
            .post("/ping", request)
            .await
            .map_err(|e| Self::fail(Operation::Ping, e))
    }

    /// Send a simulated packet between two routers
    pub async fn send_packet(&self, request: &PacketRequest) -> Result<PacketResponse, OperationError> {
        self.http
            .post("/packet", request)
            .await
            .map_err(|e| Self::fail(Operation::SendPacket, e))
    }
}

#[async_trait::async_trait]
impl RouterApi for RouterApiClient {
    fn base_url(&self) -> &str {
        self.base_url()
    }

    async fn list_routers(&self) -> Result<Vec<Router>, OperationError> {
        self.list_routers().await
    }

    async fn create_router(&self, request: &RouterCreateRequest) -> Result<Router, OperationError> {
        self.create_router(request).await
    }

    async fn configure_router(&self, request: &RouterConfigureRequest) -> Result<ConfigureResponse, OperationError> {
        self.configure_router(request).await
    }

    async fn configure_port(&self, request: &PortConfigureRequest) -> Result<ConfigureResponse, OperationError> {
        self.configure_port(request).await
    }

    async fn attach_router(&self, request: &AttachRouterRequest) -> Result<AttachRouterResponse, OperationError> {
        self.attach_router(request).await
    }

    async fn connect_routers(&self, request: &RouterConnectionRequest) -> Result<RouterConnection, OperationError> {
        self.connect_routers(request).await
    }

    async fn list_router_connections(&self) -> Result<Vec<RouterConnection>, OperationError> {
        self.list_router_connections().await
    }

    async fn router_connections_by_ip(&self, ip: &str) -> Result<Vec<RouterConnection>, OperationError> {
        self.router_connections_by_ip(ip).await
    }

    async fn ping(&self, request: &PingRequest) -> Result<PingResult, OperationError> {
        self.ping(request).await
    }

    async fn send_packet(&self, request: &PacketRequest) -> Result<PacketResponse, OperationError> {
        self.send_packet(request).await
    }
}
