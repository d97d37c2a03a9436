use crate::application::read_models::RefreshSnapshot;
use crate::shared::Result;

/// StatePresenter port for rendering refresh state
///
/// Presenters only read snapshots; they never mutate controller state.
pub trait StatePresenter: Send + Sync {
    /// Presents the latest state of one cluster
    ///
    /// # Arguments
    /// * `cluster` - Display name of the cluster
    /// * `snapshot` - State emitted after the most recent transition
    fn present(&self, cluster: &str, snapshot: &RefreshSnapshot) -> Result<()>;
}
