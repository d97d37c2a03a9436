use crate::application::controllers::{RefreshController, RefreshMode, RefreshOutcome};
use crate::application::dto::ClusterSettings;
use crate::ports::outbound::ResourceClient;
use crate::shared::Result;
use futures::future::join_all;
use tracing::info;

/// SessionRegistry - the set of monitored clusters
///
/// Each entry is an independently constructed refresh controller with its own
/// connection and timer; nothing is shared between entries. Registration
/// order is preserved.
pub struct SessionRegistry<C: ResourceClient + 'static> {
    sessions: Vec<RefreshController<C>>,
}

impl<C: ResourceClient + 'static> SessionRegistry<C> {
    pub fn new() -> Self {
        Self {
            sessions: Vec::new(),
        }
    }

    /// Builds one controller per settings entry, each with its own client
    ///
    /// # Errors
    /// Returns an error if two entries share a name
    pub fn from_settings(settings: Vec<ClusterSettings>, client: C) -> Result<Self>
    where
        C: Clone,
    {
        let mut registry = Self::new();
        for cluster in settings {
            let controller = RefreshController::new(
                cluster.name,
                client.clone(),
                cluster.connection,
                cluster.options,
            );
            registry.register(controller)?;
        }
        Ok(registry)
    }

    /// Adds a controller
    ///
    /// # Errors
    /// Returns an error if a controller with the same name is registered
    pub fn register(&mut self, controller: RefreshController<C>) -> Result<()> {
        if self.get(controller.name()).is_some() {
            anyhow::bail!(
                "Duplicate cluster name: '{}'. Every monitored cluster needs a unique name.",
                controller.name()
            );
        }
        info!(cluster = %controller.name(), "cluster registered");
        self.sessions.push(controller);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RefreshController<C>> {
        self.sessions.iter().find(|session| session.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RefreshController<C>> {
        self.sessions.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.sessions.iter().map(|session| session.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Runs one cycle on every cluster concurrently
    ///
    /// # Returns
    /// Outcomes in registration order
    pub async fn refresh_all(&self, mode: RefreshMode) -> Vec<(String, RefreshOutcome)> {
        let outcomes = join_all(self.sessions.iter().map(|session| session.refresh(mode))).await;

        self.sessions
            .iter()
            .map(|session| session.name().to_string())
            .zip(outcomes)
            .collect()
    }

    /// Tears every controller down; later responses are discarded
    pub fn shutdown_all(&self) {
        for session in &self.sessions {
            session.shutdown();
        }
    }
}

impl<C: ResourceClient + 'static> Default for SessionRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
