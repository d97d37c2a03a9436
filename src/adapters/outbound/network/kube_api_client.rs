use crate::monitoring::domain::{
    ClusterConnection, RawVirtualMachine, RawVolumeSnapshot, ResourceList, VirtualMachineView,
};
use crate::monitoring::services::Correlator;
use crate::ports::outbound::ResourceClient;
use crate::shared::error::{MonitorError, ResourceKind};
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// KubeApiClient adapter for reading KubeVirt and snapshot resources
///
/// This adapter implements the ResourceClient port over the cluster's REST API.
/// Both list requests of a cycle are issued concurrently and joined before
/// anything is correlated; a failure of either fails the whole cycle.
#[derive(Clone)]
pub struct KubeApiClient {
    client: reqwest::Client,
}

impl KubeApiClient {
    const TIMEOUT_SECONDS: u64 = 10;

    /// Creates a new client with the default request timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("vm-snapshot-monitor/{}", version);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Fetches one namespaced list; a missing `items` field yields an empty list
    async fn fetch_list<T: DeserializeOwned>(
        &self,
        url: &str,
        connection: &ClusterConnection,
        resource: ResourceKind,
    ) -> std::result::Result<Vec<T>, MonitorError> {
        debug!(%url, %resource, "listing resources");

        let transport = |e: reqwest::Error| MonitorError::Transport {
            resource,
            details: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, connection.token.authorization_header())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MonitorError::Fetch {
                resource,
                status: status_text(status),
            });
        }

        let list: ResourceList<T> = response.json().await.map_err(transport)?;
        Ok(list.into_items())
    }
}

/// Reason phrase for a status, falling back to the numeric code
fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

#[async_trait]
impl ResourceClient for KubeApiClient {
    async fn fetch_cluster_data(
        &self,
        connection: &ClusterConnection,
    ) -> std::result::Result<Vec<VirtualMachineView>, MonitorError> {
        let vm_url = connection.virtual_machines_url();
        let snapshot_url = connection.volume_snapshots_url();

        // Fails fast: the first request to fail decides the error
        let (vms, snapshots) = tokio::try_join!(
            self.fetch_list::<RawVirtualMachine>(
                &vm_url,
                connection,
                ResourceKind::VirtualMachines
            ),
            self.fetch_list::<RawVolumeSnapshot>(
                &snapshot_url,
                connection,
                ResourceKind::VolumeSnapshots
            ),
        )?;

        debug!(
            vms = vms.len(),
            snapshots = snapshots.len(),
            "correlating cluster resources"
        );

        Ok(Correlator::correlate(&vms, &snapshots))
    }
}
