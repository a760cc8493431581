//! Connection operations for MockRouterApi

use super::{MockRouterApi, StoredConnection, lock, rejected};
use crate::error::{Operation, OperationError};
use crate::models::*;
use chrono::{SecondsFormat, Utc};
use reqwest::StatusCode;
use serde_json::Map;

pub fn connect_routers(
    client: &MockRouterApi,
    request: &RouterConnectionRequest,
) -> Result<RouterConnection, OperationError> {
    let op = Operation::ConnectRouters;
    client.check_injected(op)?;

    let from = client
        .router_by_ip(&request.router_from_ip)
        .ok_or_else(|| rejected(op, StatusCode::INTERNAL_SERVER_ERROR, "source router not found"))?;
    let to = client
        .router_by_ip(&request.router_to_ip)
        .ok_or_else(|| rejected(op, StatusCode::INTERNAL_SERVER_ERROR, "destination router not found"))?;

    let id = client.next_id();
    let mut connections = lock(&client.connections);
    if connections.iter().any(|c| c.from_id == from.id && c.to_id == to.id) {
        return Err(rejected(
            op,
            StatusCode::INTERNAL_SERVER_ERROR,
            "connection between these routers already exists",
        ));
    }

    let stored = StoredConnection {
        id,
        from_id: from.id,
        to_id: to.id,
        status: "active".to_string(),
        created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    };
    connections.push(stored.clone());

    Ok(RouterConnection {
        id: Some(Some(stored.id)),
        router_from_ip: from.ip_address,
        router_to_ip: to.ip_address,
        status: Some(Some(stored.status)),
        created_at: Some(Some(stored.created_at)),
        from_router: None,
        to_router: None,
        extra: Map::new(),
    })
}

pub fn list_router_connections(client: &MockRouterApi) -> Result<Vec<RouterConnection>, OperationError> {
    let op = Operation::FetchRouterConnections;
    client.check_injected(op)?;
    expand(client, op, |_| true)
}

pub fn router_connections_by_ip(client: &MockRouterApi, ip: &str) -> Result<Vec<RouterConnection>, OperationError> {
    let op = Operation::FetchConnectionsByRouter;
    client.check_injected(op)?;
    if ip.is_empty() {
        return Err(rejected(op, StatusCode::BAD_REQUEST, "IP address is required"));
    }
    expand(client, op, |c| c.router_from_ip == ip || c.router_to_ip == ip)
}

/// Resolve stored connections into full records with both routers embedded
fn expand<F>(client: &MockRouterApi, op: Operation, keep: F) -> Result<Vec<RouterConnection>, OperationError>
where
    F: Fn(&RouterConnection) -> bool,
{
    let routers = lock(&client.routers);
    let connections = lock(&client.connections);

    let mut out = Vec::with_capacity(connections.len());
    for stored in connections.iter() {
        let from = routers
            .get(&stored.from_id)
            .ok_or_else(|| rejected(op, StatusCode::INTERNAL_SERVER_ERROR, "failed to get source router"))?;
        let to = routers
            .get(&stored.to_id)
            .ok_or_else(|| rejected(op, StatusCode::INTERNAL_SERVER_ERROR, "failed to get destination router"))?;

        let connection = RouterConnection {
            id: Some(Some(stored.id)),
            router_from_ip: from.ip_address.clone(),
            router_to_ip: to.ip_address.clone(),
            status: Some(Some(stored.status.clone())),
            created_at: Some(Some(stored.created_at.clone())),
            from_router: Some(Some(from.clone())),
            to_router: Some(Some(to.clone())),
            extra: Map::new(),
        };
        if keep(&connection) {
            out.push(connection);
        }
    }
    Ok(out)
}
