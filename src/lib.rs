//! vm-snapshot-monitor - live backup health for KubeVirt VirtualMachines
//!
//! This library polls one or more clusters for VirtualMachines and the
//! VolumeSnapshots taken of their DataVolumes, correlates the two into a
//! per-VM tree, and publishes the result per cluster, following hexagonal
//! architecture.
//!
//! # Architecture
//!
//! - **Domain Layer** (`monitoring`): resource shapes, views, the correlator
//!   and the timer transition table
//! - **Application Layer** (`application`): refresh controllers and the session registry
//! - **Ports** (`ports`): interfaces to the cluster API and the presentation layer
//! - **Adapters** (`adapters`): reqwest client and console presenter
//! - **Shared** (`shared`): error types, result alias and logging
//!
//! # Example
//!
//! ```no_run
//! use vm_snapshot_monitor::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let client = KubeApiClient::new()?;
//! let connection = ClusterConnection::new(
//!     "https://api.my-cluster.com:6443",
//!     "default",
//!     BearerToken::new("sha256~..."),
//! );
//! let controller = RefreshController::new(
//!     "Cluster A (Source)",
//!     client,
//!     connection,
//!     ControllerOptions::default(),
//! );
//!
//! controller.refresh(RefreshMode::Manual).await;
//! let presenter = ConsolePresenter::new(true);
//! presenter.present(controller.name(), &controller.snapshot())?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod monitoring;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::ConsolePresenter;
    pub use crate::adapters::outbound::network::KubeApiClient;
    pub use crate::application::controllers::{RefreshController, RefreshMode, RefreshOutcome};
    pub use crate::application::dto::{ClusterSettings, ControllerOptions};
    pub use crate::application::read_models::RefreshSnapshot;
    pub use crate::application::registry::SessionRegistry;
    pub use crate::monitoring::domain::{
        BearerToken, ClusterConnection, DataVolumeView, RawVirtualMachine, RawVolumeSnapshot,
        RefreshInterval, RefreshStatus, SnapshotView, VirtualMachineView,
    };
    pub use crate::monitoring::services::{Correlator, TimerAction, TimerPolicy};
    pub use crate::ports::outbound::{ResourceClient, StatePresenter};
    pub use crate::shared::error::{ExitCode, MonitorError, ResourceKind};
    pub use crate::shared::Result;
}
