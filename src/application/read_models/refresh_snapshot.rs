//! Read-only state published by a refresh controller after every transition.

use crate::monitoring::domain::{RefreshInterval, RefreshStatus, VirtualMachineView};

/// Point-in-time copy of one controller's refresh state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshSnapshot {
    /// Status tag with either the correlated data or the error message
    pub status: RefreshStatus,
    /// True only while a silent (timer-driven) cycle is in flight
    pub is_refreshing: bool,
    pub auto_refresh_enabled: bool,
    pub interval: RefreshInterval,
    /// Namespace the data was requested for, used in empty-result messages
    pub namespace: String,
}

impl RefreshSnapshot {
    pub fn virtual_machines(&self) -> &[VirtualMachineView] {
        self.status.virtual_machines().unwrap_or_default()
    }
}
