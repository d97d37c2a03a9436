use crate::monitoring::domain::{ClusterConnection, RefreshInterval};

/// Auto-refresh options applied when a controller is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub auto_refresh_enabled: bool,
    pub interval: RefreshInterval,
}

impl Default for ControllerOptions {
    /// Auto-refresh on, every second
    fn default() -> Self {
        Self {
            auto_refresh_enabled: true,
            interval: RefreshInterval::OneSecond,
        }
    }
}

/// ClusterSettings - everything needed to construct one refresh controller
///
/// Produced by configuration loading, consumed by the session registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSettings {
    /// Display name, unique within a registry
    pub name: String,
    pub connection: ClusterConnection,
    pub options: ControllerOptions,
}

impl ClusterSettings {
    pub fn new(name: impl Into<String>, connection: ClusterConnection) -> Self {
        Self {
            name: name.into(),
            connection,
            options: ControllerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ControllerOptions) -> Self {
        self.options = options;
        self
    }
}
