use super::*;

fn router_request(name: &str, ip: &str) -> RouterCreateRequest {
    RouterCreateRequest {
        name: name.to_string(),
        ip_address: ip.to_string(),
    }
}

fn port_request(router_id: u64, port_number: u32, status: &str) -> PortConfigureRequest {
    PortConfigureRequest {
        router_id,
        port_number,
        protocol: "tcp".to_string(),
        status: status.to_string(),
        speed: "1000".to_string(),
        duplex_mode: "full".to_string(),
        description: Some("uplink".to_string()),
    }
}

async fn mock_with_two_routers() -> (MockRouterApi, Router, Router) {
    let mock = MockRouterApi::new("http://mock/api/v1");
    let r1 = mock.create_router(&router_request("r1", "10.0.0.1")).await.unwrap();
    let r2 = mock.create_router(&router_request("r2", "10.0.0.2")).await.unwrap();
    (mock, r1, r2)
}

#[tokio::test]
async fn created_router_gets_default_ports() {
    let (mock, r1, _) = mock_with_two_routers().await;

    assert_eq!(r1.status(), Some("active"));
    assert!(!r1.is_connected());
    let numbers: Vec<_> = r1.ports().iter().map(|p| (p.number(), p.status())).collect();
    assert_eq!(numbers, vec![(Some(80), Some("up")), (Some(443), Some("down"))]);

    let listed = mock.list_routers().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0], r1);
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let mock = MockRouterApi::new("http://mock/api/v1");
    assert!(mock.list_routers().await.unwrap().is_empty());
    assert!(mock.list_router_connections().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_connection_is_rejected() {
    let (mock, _, _) = mock_with_two_routers().await;
    let request = RouterConnectionRequest {
        router_from_ip: "10.0.0.1".to_string(),
        router_to_ip: "10.0.0.2".to_string(),
    };

    let connection = mock.connect_routers(&request).await.unwrap();
    assert_eq!(connection.status(), Some("active"));
    assert!(connection.created_at().is_some());
    assert!(connection.from_router.is_none());

    let err = mock.connect_routers(&request).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to connect router");
    assert!(err.cause().to_string().contains("already exists"));
}

#[tokio::test]
async fn connecting_unknown_router_fails() {
    let (mock, _, _) = mock_with_two_routers().await;
    let err = mock
        .connect_routers(&RouterConnectionRequest {
            router_from_ip: "10.0.0.1".to_string(),
            router_to_ip: "10.9.9.9".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.operation(), Operation::ConnectRouters);
}

#[tokio::test]
async fn connections_embed_routers_and_filter_by_ip() {
    let (mock, r1, r2) = mock_with_two_routers().await;
    mock.create_router(&router_request("r3", "10.0.0.3")).await.unwrap();
    for (from, to) in [("10.0.0.1", "10.0.0.2"), ("10.0.0.2", "10.0.0.3")] {
        mock.connect_routers(&RouterConnectionRequest {
            router_from_ip: from.to_string(),
            router_to_ip: to.to_string(),
        })
        .await
        .unwrap();
    }

    let all = mock.list_router_connections().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].from_router(), Some(&r1));
    assert_eq!(all[0].to_router(), Some(&r2));

    assert_eq!(mock.router_connections_by_ip("10.0.0.2").await.unwrap().len(), 2);
    assert_eq!(mock.router_connections_by_ip("10.0.0.3").await.unwrap().len(), 1);
    assert!(mock.router_connections_by_ip("10.0.0.9").await.unwrap().is_empty());
}

#[tokio::test]
async fn configure_router_updates_name_and_status() {
    let (mock, r1, _) = mock_with_two_routers().await;
    let ack = mock
        .configure_router(&RouterConfigureRequest {
            router_id: r1.id,
            name: "core".to_string(),
            status: "maintenance".to_string(),
        })
        .await
        .unwrap();
    assert!(ack.is_success());

    let routers = mock.list_routers().await.unwrap();
    assert_eq!(routers[0].name, "core");
    assert_eq!(routers[0].status(), Some("maintenance"));
}

#[tokio::test]
async fn configure_port_updates_existing_or_appends() {
    let (mock, r1, _) = mock_with_two_routers().await;

    mock.configure_port(&port_request(r1.id, 443, "up")).await.unwrap();
    mock.configure_port(&port_request(r1.id, 8080, "down")).await.unwrap();

    let routers = mock.list_routers().await.unwrap();
    let ports = routers[0].ports();
    assert_eq!(ports.len(), 3);
    let https = ports.iter().find(|p| p.number() == Some(443)).unwrap();
    assert_eq!(https.status(), Some("up"));
    assert_eq!(https.duplex_mode(), Some("full"));
    assert_eq!(https.description(), Some("uplink"));
    assert!(ports.iter().any(|p| p.number() == Some(8080)));
}

#[tokio::test]
async fn configure_port_validates_like_backend() {
    let (mock, r1, _) = mock_with_two_routers().await;
    let mut request = port_request(r1.id, 22, "up");
    request.speed = "1G".to_string();

    let err = mock.configure_port(&request).await.unwrap_err();
    assert_eq!(err.operation(), Operation::ConfigurePort);
    assert_eq!(err.to_string(), "Failed to configure router");
    assert!(err.cause().to_string().contains("invalid speed value: 1G"));

    let err = mock.configure_port(&port_request(99, 22, "up")).await.unwrap_err();
    assert_eq!(err.cause().status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn attach_router_only_once() {
    let (mock, r1, _) = mock_with_two_routers().await;
    let request = AttachRouterRequest {
        ip_address: r1.ip_address.clone(),
    };

    let attached = mock.attach_router(&request).await.unwrap();
    assert!(attached.connected);
    assert_eq!(attached.router_id, r1.id);

    let err = mock.attach_router(&request).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to attach router");
}

#[tokio::test]
async fn ping_reports_known_addresses() {
    let (mock, _, _) = mock_with_two_routers().await;
    let known = mock
        .ping(&PingRequest { ip_address: "10.0.0.1".to_string() })
        .await
        .unwrap();
    assert_eq!(known.status, "success");

    let unknown = mock
        .ping(&PingRequest { ip_address: "10.1.1.1".to_string() })
        .await
        .unwrap();
    assert_eq!(unknown.status, "failed");
    assert_eq!(unknown.latency, serde_json::Number::from(0u64));
    assert_eq!(serde_json::to_value(&unknown).unwrap()["latency"], serde_json::json!(0));
}

#[tokio::test]
async fn packets_need_connected_source_and_open_port() {
    let (mock, r1, _) = mock_with_two_routers().await;
    let mut packet = PacketRequest {
        source_ip: "10.0.0.1".to_string(),
        destination_ip: "10.0.0.2".to_string(),
        protocol: "tcp".to_string(),
        port: 80,
        data: "hello".to_string(),
    };

    let err = mock.send_packet(&packet).await.unwrap_err();
    assert!(err.cause().to_string().contains("not connected"));

    mock.attach_router(&AttachRouterRequest { ip_address: r1.ip_address }).await.unwrap();
    let delivered = mock.send_packet(&packet).await.unwrap();
    assert_eq!(delivered.status, "success");
    assert!(delivered.error().is_none());
    assert!(delivered.latency_ms() > 0.0);

    packet.port = 443;
    let closed = mock.send_packet(&packet).await.unwrap();
    assert_eq!(closed.status, "failed");
    assert_eq!(closed.error(), Some("port 443 is down"));

    packet.port = 25;
    let missing = mock.send_packet(&packet).await.unwrap();
    assert_eq!(missing.error(), Some("port 25 not found"));
}

#[tokio::test]
async fn injected_failures_use_operation_messages() {
    let (mock, _, _) = mock_with_two_routers().await;
    mock.fail_operation(Operation::FetchRouters);

    let err = mock.list_routers().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch routers");
    assert!(mock.list_router_connections().await.is_ok());

    mock.clear_failures();
    assert_eq!(mock.list_routers().await.unwrap().len(), 2);
}

#[tokio::test]
async fn trait_object_shares_store_with_clones() {
    let mock = MockRouterApi::new("http://mock/api/v1");
    let api: Box<dyn RouterApi> = Box::new(mock.clone());

    api.create_router(&router_request("r1", "10.0.0.1")).await.unwrap();
    assert_eq!(api.base_url(), "http://mock/api/v1");
    assert_eq!(mock.list_routers().await.unwrap().len(), 1);
}
