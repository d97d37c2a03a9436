use crate::monitoring::domain::{ClusterConnection, VirtualMachineView};
use crate::shared::error::MonitorError;
use async_trait::async_trait;

/// ResourceClient port for reading one cluster's VMs and snapshots
///
/// This port abstracts the Kubernetes-style API server. Implementations hold
/// no state across calls.
///
/// # Async Support
/// Implementations must be `Send + Sync` because refresh cycles run on
/// spawned tasks.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Fetches VirtualMachines and VolumeSnapshots and correlates them
    ///
    /// # Arguments
    /// * `connection` - Endpoint, namespace and bearer token of the cluster
    ///
    /// # Errors
    /// Returns `MonitorError::Fetch` when either list request answers with a
    /// non-success status, or `MonitorError::Transport` when a request fails
    /// outright. Nothing is correlated unless both requests succeed.
    async fn fetch_cluster_data(
        &self,
        connection: &ClusterConnection,
    ) -> Result<Vec<VirtualMachineView>, MonitorError>;
}
