/// Monitoring domain - connection parameters, resource shapes, views and
/// the pure services that operate on them
pub mod domain;
pub mod services;
