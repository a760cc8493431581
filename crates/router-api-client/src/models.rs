//! Router API models
//!
//! Request bodies mirror what the backend binds; response models mirror what it
//! returns. Response models keep any field they do not name in `extra`, so a
//! decoded value re-serializes to the same object the backend sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Request body for `POST /routers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterCreateRequest {
    pub name: String,
    pub ip_address: String,
}

/// Request body for `POST /routers/connection`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConnectionRequest {
    pub router_from_ip: String,
    pub router_to_ip: String,
}

/// Request body for `PATCH /routers/configure`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterConfigureRequest {
    pub router_id: u64,
    pub name: String,
    pub status: String,
}

/// Request body for `PATCH /ports/configure`
///
/// `router_id` goes over the wire as a decimal string (`"routerId": "3"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortConfigureRequest {
    #[serde(with = "string_id")]
    pub router_id: u64,
    pub port_number: u32,
    pub protocol: String,
    pub status: String,
    pub speed: String,
    pub duplex_mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for `POST /routers/connect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachRouterRequest {
    pub ip_address: String,
}

/// Request body for `POST /ping`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingRequest {
    pub ip_address: String,
}

/// Request body for `POST /packet`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketRequest {
    pub source_ip: String,
    pub destination_ip: String,
    pub protocol: String,
    pub port: u32,
    #[serde(default)]
    pub data: String,
}

/// A response field that may be absent (`None`), explicitly `null`
/// (`Some(None)`) or set (`Some(Some(_))`).
///
/// Keeping absent and `null` apart lets a decoded body re-encode to the exact
/// object the backend sent.
pub type Nullable<T> = Option<Option<T>>;

fn value_of<T>(field: &Nullable<T>) -> Option<&T> {
    field.as_ref().and_then(Option::as_ref)
}

fn str_of(field: &Nullable<String>) -> Option<&str> {
    value_of(field).map(String::as_str)
}

/// Router record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Router {
    pub id: u64,
    pub name: String,
    pub ip_address: String,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub status: Nullable<String>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub ports: Nullable<Vec<Port>>, // null when the backend skipped preloading
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub connected: Nullable<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Router {
    /// Status, if set
    pub fn status(&self) -> Option<&str> {
        str_of(&self.status)
    }

    /// Ports, or an empty slice when absent or `null`
    pub fn ports(&self) -> &[Port] {
        value_of(&self.ports).map_or(&[], Vec::as_slice)
    }

    /// Whether the backend reports the router connected
    pub fn is_connected(&self) -> bool {
        value_of(&self.connected).copied().unwrap_or(false)
    }

    /// Port list, materialized if absent or `null`
    pub(crate) fn ports_mut(&mut self) -> &mut Vec<Port> {
        self.ports.get_or_insert(None).get_or_insert_with(Vec::new)
    }
}

/// Port configured on a router
///
/// `number` is the service port (80, 443, ...); `port_number` the physical slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub id: Nullable<u64>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub router_id: Nullable<u64>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub number: Nullable<u32>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub protocol: Nullable<String>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub status: Nullable<String>,
    #[serde(rename = "portNumber", default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub port_number: Nullable<u32>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub speed: Nullable<String>,
    #[serde(rename = "duplexMode", default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub duplex_mode: Nullable<String>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub description: Nullable<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Port {
    /// Service port number, if set
    pub fn number(&self) -> Option<u32> {
        value_of(&self.number).copied()
    }

    /// Protocol, if set
    pub fn protocol(&self) -> Option<&str> {
        str_of(&self.protocol)
    }

    /// Status, if set
    pub fn status(&self) -> Option<&str> {
        str_of(&self.status)
    }

    /// Duplex mode, if set
    pub fn duplex_mode(&self) -> Option<&str> {
        str_of(&self.duplex_mode)
    }

    /// Description, if set
    pub fn description(&self) -> Option<&str> {
        str_of(&self.description)
    }
}

/// Link between two routers
///
/// The list endpoints embed both routers; the create endpoint does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterConnection {
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub id: Nullable<u64>,
    pub router_from_ip: String,
    pub router_to_ip: String,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub status: Nullable<String>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub created_at: Nullable<String>, // RFC 3339
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub from_router: Nullable<Router>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub to_router: Nullable<Router>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RouterConnection {
    /// Status, if set
    pub fn status(&self) -> Option<&str> {
        str_of(&self.status)
    }

    /// Creation timestamp, if set
    pub fn created_at(&self) -> Option<&str> {
        str_of(&self.created_at)
    }

    /// Embedded source router, if present
    pub fn from_router(&self) -> Option<&Router> {
        value_of(&self.from_router)
    }

    /// Embedded destination router, if present
    pub fn to_router(&self) -> Option<&Router> {
        value_of(&self.to_router)
    }
}

/// Acknowledgement returned by the configure endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigureResponse {
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub success: Nullable<bool>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub message: Nullable<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigureResponse {
    /// Whether the backend acknowledged the change
    pub fn is_success(&self) -> bool {
        value_of(&self.success).copied().unwrap_or(false)
    }

    /// Acknowledgement message, if set
    pub fn message(&self) -> Option<&str> {
        str_of(&self.message)
    }
}

/// Response of `POST /routers/connect`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachRouterResponse {
    pub router_id: u64,
    pub name: String,
    pub ip_address: String,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub local_ip: Nullable<String>,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub status: Nullable<String>,
    pub connected: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AttachRouterResponse {
    /// Local address the router was attached on, if set
    pub fn local_ip(&self) -> Option<&str> {
        str_of(&self.local_ip)
    }
}

/// Response of `POST /ping`
///
/// `latency` keeps the backend's number as sent (`0` stays `0`, not `0.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingResult {
    pub ip_address: String,
    pub latency: Number, // milliseconds
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PingResult {
    /// Latency in milliseconds as `f64`
    pub fn latency_ms(&self) -> f64 {
        self.latency.as_f64().unwrap_or_default()
    }
}

/// Response of `POST /packet`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketResponse {
    pub source_ip: String,
    pub destination_ip: String,
    pub protocol: String,
    pub port: u32,
    pub status: String,
    pub latency: Number,
    #[serde(default, deserialize_with = "nullable::deserialize", skip_serializing_if = "Option::is_none")]
    pub error: Nullable<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PacketResponse {
    /// Latency in milliseconds as `f64`
    pub fn latency_ms(&self) -> f64 {
        self.latency.as_f64().unwrap_or_default()
    }

    /// Delivery error, if any
    pub fn error(&self) -> Option<&str> {
        str_of(&self.error)
    }
}

/// Integer id carried as a JSON string.
mod string_id {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(id: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Present-but-`null` decodes to `Some(None)`; absence is left to `default`.
mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
