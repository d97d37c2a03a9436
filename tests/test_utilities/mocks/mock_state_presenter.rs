use std::sync::{Arc, Mutex};
use vm_snapshot_monitor::prelude::*;

/// Mock StatePresenter for testing that captures every presented snapshot
#[derive(Default, Clone)]
pub struct MockStatePresenter {
    pub presented: Arc<Mutex<Vec<(String, RefreshSnapshot)>>>,
}

impl MockStatePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented(&self) -> Vec<(String, RefreshSnapshot)> {
        self.presented.lock().unwrap().clone()
    }

    pub fn labels_for(&self, cluster: &str) -> Vec<&'static str> {
        self.presented
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == cluster)
            .map(|(_, snapshot)| snapshot.status.label())
            .collect()
    }
}

impl StatePresenter for MockStatePresenter {
    fn present(&self, cluster: &str, snapshot: &RefreshSnapshot) -> Result<()> {
        self.presented
            .lock()
            .unwrap()
            .push((cluster.to_string(), snapshot.clone()));
        Ok(())
    }
}
