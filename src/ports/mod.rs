/// Ports module defining interfaces for hexagonal architecture
///
/// Only driven ports exist: the command API of a refresh controller is its
/// public inherent methods.
pub mod outbound;
