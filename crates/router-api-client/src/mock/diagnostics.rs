//! Ping and packet simulation for MockRouterApi
//!
//! Latencies are fixed so assertions stay deterministic.

use super::{MockRouterApi, rejected};
use crate::error::{Operation, OperationError};
use crate::models::*;
use reqwest::StatusCode;
use serde_json::{Map, Number};

const PING_LATENCY_MS: u64 = 1;
const PACKET_LATENCY_MS: u64 = 12;

pub fn ping(client: &MockRouterApi, request: &PingRequest) -> Result<PingResult, OperationError> {
    let op = Operation::Ping;
    client.check_injected(op)?;

    if request.ip_address.is_empty() {
        return Err(rejected(op, StatusCode::BAD_REQUEST, "IP address is required"));
    }

    let reachable = client.router_by_ip(&request.ip_address).is_some();
    Ok(PingResult {
        ip_address: request.ip_address.clone(),
        latency: Number::from(if reachable { PING_LATENCY_MS } else { 0 }),
        status: if reachable { "success" } else { "failed" }.to_string(),
        extra: Map::new(),
    })
}

pub fn send_packet(client: &MockRouterApi, request: &PacketRequest) -> Result<PacketResponse, OperationError> {
    let op = Operation::SendPacket;
    client.check_injected(op)?;

    if request.source_ip.is_empty() || request.destination_ip.is_empty() {
        return Err(rejected(
            op,
            StatusCode::BAD_REQUEST,
            "Source and destination IP addresses are required",
        ));
    }
    if !(1..=65535).contains(&request.port) {
        return Err(rejected(op, StatusCode::BAD_REQUEST, "Invalid port number"));
    }

    let source = client.router_by_ip(&request.source_ip).ok_or_else(|| {
        let msg = format!("source router with IP {} not found", request.source_ip);
        rejected(op, StatusCode::INTERNAL_SERVER_ERROR, &msg)
    })?;
    if !source.is_connected() {
        return Err(rejected(op, StatusCode::INTERNAL_SERVER_ERROR, "source router is not connected"));
    }
    let destination = client.router_by_ip(&request.destination_ip).ok_or_else(|| {
        let msg = format!("destination router with IP {} not found", request.destination_ip);
        rejected(op, StatusCode::INTERNAL_SERVER_ERROR, &msg)
    })?;

    let mut response = PacketResponse {
        source_ip: request.source_ip.clone(),
        destination_ip: request.destination_ip.clone(),
        protocol: request.protocol.clone(),
        port: request.port,
        status: "failed".to_string(),
        latency: Number::from(0u64),
        error: None,
        extra: Map::new(),
    };

    let port = destination
        .ports()
        .iter()
        .find(|p| p.number() == Some(request.port) && p.protocol() == Some(request.protocol.as_str()));

    match port {
        None => {
            response.error = Some(Some(format!("port {} not found", request.port)));
        }
        Some(port) => match port.status() {
            Some("up" | "open") => {
                response.status = "success".to_string();
                response.latency = Number::from(PACKET_LATENCY_MS);
            }
            other => {
                let state = other.unwrap_or("closed");
                response.error = Some(Some(format!("port {} is {state}", request.port)));
            }
        },
    }

    Ok(response)
}
