/// Mock implementations for testing
mod mock_resource_client;
mod mock_state_presenter;

pub use mock_resource_client::MockResourceClient;
pub use mock_state_presenter::MockStatePresenter;
