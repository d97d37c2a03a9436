use chrono::{DateTime, Utc};

/// Status message shown for a snapshot that is ready to use
pub const READY_MESSAGE: &str = "Ready to use";

/// Status message shown for a snapshot that is not ready and reports no error
pub const PENDING_MESSAGE: &str = "Pending creation";

/// Derived view of one VolumeSnapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotView {
    pub name: String,
    /// `None` when the server omitted or mangled the timestamp
    pub creation_timestamp: Option<DateTime<Utc>>,
    pub is_ready: bool,
    pub status_message: String,
}

/// A DataVolume and its snapshots, newest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataVolumeView {
    pub name: String,
    pub snapshots: Vec<SnapshotView>,
}

/// One VirtualMachine and the DataVolumes backing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualMachineView {
    pub name: String,
    pub data_volumes: Vec<DataVolumeView>,
}

impl VirtualMachineView {
    pub fn snapshot_count(&self) -> usize {
        self.data_volumes.iter().map(|dv| dv.snapshots.len()).sum()
    }
}
