/// Data Transfer Objects for application layer
///
/// DTOs carry configuration from the binary surface into the
/// registry without exposing the config file schema.
mod cluster_settings;

pub use cluster_settings::{ClusterSettings, ControllerOptions};
