/// Result alias used by configuration loading and the binary glue.
/// Refresh cycles use the typed `MonitorError` instead.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
