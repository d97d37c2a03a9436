pub mod cluster_connection;
pub mod refresh_interval;
pub mod refresh_status;
pub mod resources;
pub mod views;

pub use cluster_connection::{BearerToken, ClusterConnection};
pub use refresh_interval::RefreshInterval;
pub use refresh_status::RefreshStatus;
pub use resources::{RawVirtualMachine, RawVolumeSnapshot, ResourceList};
pub use views::{DataVolumeView, SnapshotView, VirtualMachineView};
