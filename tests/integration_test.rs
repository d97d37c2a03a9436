/// Integration tests for the application layer
mod test_utilities;

use std::time::Duration;
use test_utilities::fake_api_server::{FakeApiServer, VIRTUAL_MACHINES_JSON, VOLUME_SNAPSHOTS_JSON};
use test_utilities::mocks::*;
use vm_snapshot_monitor::prelude::*;

fn vm(name: &str, data_volumes: &[&str]) -> VirtualMachineView {
    VirtualMachineView {
        name: name.to_string(),
        data_volumes: data_volumes
            .iter()
            .map(|dv| DataVolumeView {
                name: dv.to_string(),
                snapshots: vec![],
            })
            .collect(),
    }
}

fn connection(endpoint: &str, token: &str) -> ClusterConnection {
    ClusterConnection::new(endpoint, "default", BearerToken::new(token))
}

fn manual_options() -> ControllerOptions {
    ControllerOptions {
        auto_refresh_enabled: false,
        interval: RefreshInterval::OneSecond,
    }
}

#[tokio::test]
async fn test_registry_refreshes_every_cluster_independently() {
    let healthy = MockResourceClient::with_vms(vec![vm("vm-a", &["dv-a"])]);

    let mut registry = SessionRegistry::new();
    registry
        .register(RefreshController::new(
            "Cluster A (Source)",
            healthy.clone(),
            connection("https://a.example.com", "token-a"),
            manual_options(),
        ))
        .unwrap();
    registry
        .register(RefreshController::new(
            "Cluster B (Destination)",
            healthy.clone(),
            connection("", "token-b"),
            manual_options(),
        ))
        .unwrap();

    let outcomes = registry.refresh_all(RefreshMode::Manual).await;
    assert_eq!(
        outcomes,
        vec![
            ("Cluster A (Source)".to_string(), RefreshOutcome::Applied),
            ("Cluster B (Destination)".to_string(), RefreshOutcome::Applied),
        ]
    );

    let a = registry.get("Cluster A (Source)").unwrap().snapshot();
    assert_eq!(a.virtual_machines().len(), 1);
    assert_eq!(a.virtual_machines()[0].name, "vm-a");

    let b = registry.get("Cluster B (Destination)").unwrap().snapshot();
    assert_eq!(
        b.status.error_message(),
        Some("API Endpoint and Namespace are required.")
    );

    // Only the complete cluster reached the client
    assert_eq!(healthy.request_count(), 1);
    assert_eq!(healthy.requests()[0].api_endpoint, "https://a.example.com");
}

#[tokio::test]
async fn test_failure_disables_auto_refresh_and_keeps_message() {
    let client = MockResourceClient::with_failure(MonitorError::Fetch {
        resource: ResourceKind::VirtualMachines,
        status: "Forbidden".to_string(),
    });
    let controller = RefreshController::new(
        "Cluster A (Source)",
        client,
        connection("https://a.example.com", "token"),
        ControllerOptions::default(),
    );
    assert!(controller.is_timer_active());

    let outcome = controller.refresh(RefreshMode::Manual).await;
    assert_eq!(outcome, RefreshOutcome::Applied);

    let snapshot = controller.snapshot();
    assert_eq!(
        snapshot.status,
        RefreshStatus::Error("Failed to fetch VMs: Forbidden".to_string())
    );
    assert!(!snapshot.auto_refresh_enabled);
}

#[tokio::test]
async fn test_recovers_after_failure_on_next_manual_refresh() {
    let client = MockResourceClient::with_failure(MonitorError::Transport {
        resource: ResourceKind::VolumeSnapshots,
        details: "connection refused".to_string(),
    });
    let controller = RefreshController::new(
        "Cluster A (Source)",
        client.clone(),
        connection("https://a.example.com", "token"),
        manual_options(),
    );

    controller.refresh(RefreshMode::Manual).await;
    assert!(controller.snapshot().status.is_error());

    client.respond_with(vec![vm("vm-a", &[])]);
    controller.refresh(RefreshMode::Manual).await;
    assert_eq!(controller.snapshot().status.label(), "success");
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_connecting_then_result() {
    let presenter = MockStatePresenter::new();
    let controller = RefreshController::new(
        "Cluster A (Source)",
        MockResourceClient::with_vms(vec![]).with_delay(Duration::from_millis(200)),
        connection("https://a.example.com", "token"),
        manual_options(),
    );

    let mut updates = controller.subscribe();
    let refresh = controller.refresh(RefreshMode::Manual);
    tokio::pin!(refresh);

    // First publication of a manual cycle is Connecting
    tokio::select! {
        biased;
        changed = updates.changed() => {
            changed.unwrap();
            let snapshot = updates.borrow_and_update().clone();
            presenter.present(controller.name(), &snapshot).unwrap();
        }
        _ = &mut refresh => panic!("refresh finished before publishing Connecting"),
    }
    refresh.await;
    presenter
        .present(controller.name(), &controller.snapshot())
        .unwrap();

    assert_eq!(
        presenter.labels_for("Cluster A (Source)"),
        vec!["connecting", "success"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_timer_performs_silent_refreshes() {
    let client = MockResourceClient::with_vms(vec![vm("vm-a", &["dv-a"])]);
    let controller = RefreshController::new(
        "Cluster A (Source)",
        client.clone(),
        connection("https://a.example.com", "token"),
        ControllerOptions::default(),
    );
    assert!(controller.is_timer_active());

    tokio::time::sleep(Duration::from_millis(3_500)).await;

    assert!(client.request_count() >= 3);
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.status.label(), "success");
    assert!(!snapshot.is_refreshing);

    controller.set_auto_refresh(false);
    assert!(!controller.is_timer_active());
    let calls = client.request_count();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(client.request_count(), calls);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_all_stops_every_timer() {
    let client = MockResourceClient::new();
    let settings = vec![
        ClusterSettings::new("a", connection("https://a.example.com", "t")),
        ClusterSettings::new("b", connection("https://b.example.com", "t")),
    ];
    let registry = SessionRegistry::from_settings(settings, client.clone()).unwrap();
    assert!(registry.iter().all(|c| c.is_timer_active()));

    registry.shutdown_all();
    assert!(registry.iter().all(|c| !c.is_timer_active()));

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn test_kube_api_client_correlates_live_responses() {
    let server = FakeApiServer::start("sha256~secret", VIRTUAL_MACHINES_JSON, VOLUME_SNAPSHOTS_JSON);
    let client = KubeApiClient::new().unwrap();

    let vms = client
        .fetch_cluster_data(&connection(&server.base_url, "sha256~secret"))
        .await
        .unwrap();

    let names: Vec<_> = vms.iter().map(|vm| vm.name.as_str()).collect();
    assert_eq!(names, vec!["vm-web", "vm-db"]);

    let web = &vms[0];
    assert_eq!(web.data_volumes.len(), 1);
    assert_eq!(web.data_volumes[0].name, "dv-web-root");

    let snapshots = &web.data_volumes[0].snapshots;
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].name, "snap-new");
    assert!(!snapshots[0].is_ready);
    assert_eq!(snapshots[0].status_message, "quota exceeded");
    assert_eq!(snapshots[1].name, "snap-old");
    assert_eq!(snapshots[1].status_message, "Ready to use");

    assert!(vms[1].data_volumes.is_empty());
}

#[tokio::test]
async fn test_kube_api_client_reports_unauthorized() {
    let server = FakeApiServer::start("sha256~secret", VIRTUAL_MACHINES_JSON, VOLUME_SNAPSHOTS_JSON);
    let client = KubeApiClient::new().unwrap();

    let err = client
        .fetch_cluster_data(&connection(&server.base_url, "wrong"))
        .await
        .unwrap_err();

    // Both lists are rejected; whichever fails first is reported
    assert!(matches!(
        &err,
        MonitorError::Fetch { status, .. } if status == "Unauthorized"
    ));
    assert!(err.to_string().starts_with("Failed to fetch "));
}

#[tokio::test]
async fn test_kube_api_client_fails_whole_cycle_when_snapshots_rejected() {
    let server = FakeApiServer::start_with_snapshot_status(
        "sha256~secret",
        VIRTUAL_MACHINES_JSON,
        VOLUME_SNAPSHOTS_JSON,
        "403 Forbidden",
    );
    let client = KubeApiClient::new().unwrap();

    let err = client
        .fetch_cluster_data(&connection(&server.base_url, "sha256~secret"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        MonitorError::Fetch {
            resource: ResourceKind::VolumeSnapshots,
            status: "Forbidden".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Failed to fetch Snapshots: Forbidden");
}

#[tokio::test]
async fn test_controller_shows_snapshot_rejection_without_partial_tree() {
    let server = FakeApiServer::start_with_snapshot_status(
        "sha256~secret",
        VIRTUAL_MACHINES_JSON,
        VOLUME_SNAPSHOTS_JSON,
        "403 Forbidden",
    );
    let controller = RefreshController::new(
        "Cluster A (Source)",
        KubeApiClient::new().unwrap(),
        connection(&server.base_url, "sha256~secret"),
        manual_options(),
    );

    controller.refresh(RefreshMode::Manual).await;

    let snapshot = controller.snapshot();
    assert_eq!(
        snapshot.status,
        RefreshStatus::Error("Failed to fetch Snapshots: Forbidden".to_string())
    );
    assert!(snapshot.virtual_machines().is_empty());
}

#[test]
fn test_fake_server_rejects_requests_without_json_accept() {
    use std::io::{Read, Write};

    let server = FakeApiServer::start("sha256~secret", VIRTUAL_MACHINES_JSON, VOLUME_SNAPSHOTS_JSON);
    let address = server.base_url.trim_start_matches("http://");
    let mut stream = std::net::TcpStream::connect(address).unwrap();
    write!(
        stream,
        "GET /apis/kubevirt.io/v1/namespaces/default/virtualmachines HTTP/1.1\r\n\
         Host: {}\r\nAuthorization: Bearer sha256~secret\r\n\r\n",
        address
    )
    .unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    assert!(response.starts_with("HTTP/1.1 406"));
}

#[tokio::test]
async fn test_kube_api_client_reports_transport_failure() {
    // Bind and drop to get a port nobody listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = KubeApiClient::with_timeout(Duration::from_secs(2)).unwrap();

    let err = client
        .fetch_cluster_data(&connection(&format!("http://127.0.0.1:{}", port), "t"))
        .await
        .unwrap_err();

    assert!(matches!(err, MonitorError::Transport { .. }));
}
