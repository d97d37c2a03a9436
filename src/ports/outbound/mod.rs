/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the refresh controllers use
/// to reach the cluster API and the presentation layer.
pub mod resource_client;
pub mod state_presenter;

pub use resource_client::ResourceClient;
pub use state_presenter::StatePresenter;
