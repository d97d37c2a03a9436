use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vm_snapshot_monitor::prelude::*;

/// Mock ResourceClient for testing that returns a scripted response
#[derive(Clone)]
pub struct MockResourceClient {
    response: Arc<Mutex<std::result::Result<Vec<VirtualMachineView>, MonitorError>>>,
    requests: Arc<Mutex<Vec<ClusterConnection>>>,
    delay: Option<Duration>,
}

impl MockResourceClient {
    pub fn new() -> Self {
        Self::with_vms(Vec::new())
    }

    pub fn with_vms(vms: Vec<VirtualMachineView>) -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok(vms))),
            requests: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Every response arrives after `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_failure(error: MonitorError) -> Self {
        let client = Self::new();
        client.fail_with(error);
        client
    }

    pub fn fail_with(&self, error: MonitorError) {
        *self.response.lock().unwrap() = Err(error);
    }

    pub fn respond_with(&self, vms: Vec<VirtualMachineView>) {
        *self.response.lock().unwrap() = Ok(vms);
    }

    pub fn requests(&self) -> Vec<ClusterConnection> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockResourceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceClient for MockResourceClient {
    async fn fetch_cluster_data(
        &self,
        connection: &ClusterConnection,
    ) -> std::result::Result<Vec<VirtualMachineView>, MonitorError> {
        self.requests.lock().unwrap().push(connection.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.lock().unwrap().clone()
    }
}
