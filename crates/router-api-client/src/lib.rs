//! Router Management API Client
//!
//! A Rust client library for the router management backend. Provides typed
//! models and one method per backend endpoint: routers, router connections,
//! port configuration and the backend's diagnostics.
//!
//! # Example
//!
//! ```no_run
//! use router_api_client::{ClientConfig, RouterApiClient, RouterCreateRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Base URL comes from the application boundary, e.g. API_BASE
//! let client = RouterApiClient::new(ClientConfig::from_env()?)?;
//!
//! let router = client
//!     .create_router(&RouterCreateRequest {
//!         name: "r1".to_string(),
//!         ip_address: "10.0.0.1".to_string(),
//!     })
//!     .await?;
//!
//! for router in client.list_routers().await? {
//!     println!("{} {}", router.name, router.ip_address);
//! }
//! # let _ = router;
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Every operation fails with an [`OperationError`]. It displays a fixed
//! per-operation message ("Failed to fetch routers", ...) and chains the
//! transport cause: network error, non-2xx status or undecodable body.

pub mod client;
pub mod common;
pub mod config;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod router_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::RouterApiClient;
pub use common::HttpClient;
pub use config::{BASE_URL_ENV, ClientConfig};
pub use error::{ConfigError, Operation, OperationError, TransportError};
pub use models::*;
pub use router_trait::RouterApi;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockRouterApi;
