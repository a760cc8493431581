//! Router operations for MockRouterApi

use super::{MockRouterApi, lock, rejected};
use crate::error::{Operation, OperationError};
use crate::models::*;
use reqwest::StatusCode;
use serde_json::Map;

const SPEEDS: &[&str] = &["auto", "10", "100", "1000", "10000"];
const DUPLEX_MODES: &[&str] = &["auto", "full", "half"];

pub fn list_routers(client: &MockRouterApi) -> Result<Vec<Router>, OperationError> {
    client.check_injected(Operation::FetchRouters)?;
    Ok(lock(&client.routers).values().cloned().collect())
}

/// Every new router gets HTTP (up) and HTTPS (down) ports.
fn default_ports(router_id: u64) -> Vec<Port> {
    [(80, "up", 1), (443, "down", 2)]
        .into_iter()
        .map(|(number, status, slot)| Port {
            id: None,
            router_id: Some(Some(router_id)),
            number: Some(Some(number)),
            protocol: Some(Some("tcp".to_string())),
            status: Some(Some(status.to_string())),
            port_number: Some(Some(slot)),
            speed: None,
            duplex_mode: None,
            description: None,
            extra: Map::new(),
        })
        .collect()
}

pub fn create_router(client: &MockRouterApi, request: &RouterCreateRequest) -> Result<Router, OperationError> {
    let op = Operation::CreateRouter;
    client.check_injected(op)?;

    if request.name.is_empty() {
        return Err(rejected(op, StatusCode::BAD_REQUEST, "Invalid request body"));
    }
    if client.router_by_ip(&request.ip_address).is_some() {
        return Err(rejected(op, StatusCode::INTERNAL_SERVER_ERROR, "ip address already in use"));
    }

    let id = client.next_id();
    let router = Router {
        id,
        name: request.name.clone(),
        ip_address: request.ip_address.clone(),
        status: Some(Some("active".to_string())),
        ports: Some(Some(default_ports(id))),
        connected: Some(Some(false)),
        extra: Map::new(),
    };
    client.add_router(router.clone());
    Ok(router)
}

pub fn configure_router(
    client: &MockRouterApi,
    request: &RouterConfigureRequest,
) -> Result<ConfigureResponse, OperationError> {
    let op = Operation::ConfigureRouter;
    client.check_injected(op)?;

    let mut routers = lock(&client.routers);
    let router = routers
        .get_mut(&request.router_id)
        .ok_or_else(|| rejected(op, StatusCode::INTERNAL_SERVER_ERROR, "router not found"))?;

    router.name.clone_from(&request.name);
    router.status = Some(Some(request.status.clone()));

    Ok(acknowledge("Router configuration updated"))
}

/// Mirrors the backend's port validation before touching the store.
fn validate_port(request: &PortConfigureRequest) -> Result<(), String> {
    if !(1..=65535).contains(&request.port_number) {
        return Err(format!(
            "invalid port number: {} (must be 1-65535)",
            request.port_number
        ));
    }
    if !SPEEDS.contains(&request.speed.as_str()) {
        return Err(format!("invalid speed value: {}", request.speed));
    }
    if !DUPLEX_MODES.contains(&request.duplex_mode.as_str()) {
        return Err(format!("invalid duplex mode: {}", request.duplex_mode));
    }
    if request.status != "up" && request.status != "down" {
        return Err(format!("invalid status: {}", request.status));
    }
    if !matches!(request.protocol.as_str(), "" | "tcp" | "udp") {
        return Err(format!("invalid protocol: {}", request.protocol));
    }
    Ok(())
}

pub fn configure_port(
    client: &MockRouterApi,
    request: &PortConfigureRequest,
) -> Result<ConfigureResponse, OperationError> {
    let op = Operation::ConfigurePort;
    client.check_injected(op)?;

    validate_port(request).map_err(|msg| rejected(op, StatusCode::INTERNAL_SERVER_ERROR, &msg))?;

    let port_id = client.next_id();
    let mut routers = lock(&client.routers);
    let router = routers.get_mut(&request.router_id).ok_or_else(|| {
        rejected(op, StatusCode::INTERNAL_SERVER_ERROR, "failed to get router: record not found")
    })?;

    let ports = router.ports_mut();
    match ports.iter_mut().find(|p| p.number() == Some(request.port_number)) {
        Some(port) => {
            port.status = Some(Some(request.status.clone()));
            port.protocol = Some(Some(request.protocol.clone()));
            port.speed = Some(Some(request.speed.clone()));
            port.duplex_mode = Some(Some(request.duplex_mode.clone()));
            port.description = request.description.clone().map(Some);
        }
        None => ports.push(Port {
            id: Some(Some(port_id)),
            router_id: Some(Some(request.router_id)),
            number: Some(Some(request.port_number)),
            protocol: Some(Some(request.protocol.clone())),
            status: Some(Some(request.status.clone())),
            port_number: None,
            speed: Some(Some(request.speed.clone())),
            duplex_mode: Some(Some(request.duplex_mode.clone())),
            description: request.description.clone().map(Some),
            extra: Map::new(),
        }),
    }

    Ok(acknowledge("Port configured successfully"))
}

pub fn attach_router(
    client: &MockRouterApi,
    request: &AttachRouterRequest,
) -> Result<AttachRouterResponse, OperationError> {
    let op = Operation::AttachRouter;
    client.check_injected(op)?;

    let mut routers = lock(&client.routers);
    let router = routers
        .values_mut()
        .find(|r| r.ip_address == request.ip_address)
        .ok_or_else(|| rejected(op, StatusCode::INTERNAL_SERVER_ERROR, "router not found: record not found"))?;

    if router.is_connected() {
        return Err(rejected(op, StatusCode::INTERNAL_SERVER_ERROR, "router is already connected"));
    }
    router.connected = Some(Some(true));

    Ok(AttachRouterResponse {
        router_id: router.id,
        name: router.name.clone(),
        ip_address: router.ip_address.clone(),
        local_ip: Some(Some("127.0.0.1".to_string())),
        status: router.status.clone(),
        connected: true,
        extra: Map::new(),
    })
}

fn acknowledge(message: &str) -> ConfigureResponse {
    ConfigureResponse {
        success: Some(Some(true)),
        message: Some(Some(message.to_string())),
        extra: Map::new(),
    }
}
