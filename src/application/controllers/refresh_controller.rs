use crate::application::dto::ControllerOptions;
use crate::application::read_models::RefreshSnapshot;
use crate::monitoring::domain::{
    BearerToken, ClusterConnection, RefreshInterval, RefreshStatus, VirtualMachineView,
};
use crate::monitoring::services::{TimerAction, TimerPolicy};
use crate::ports::outbound::ResourceClient;
use crate::shared::error::MonitorError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// How a refresh cycle presents itself while in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Clears previous results and shows `Connecting`
    Manual,
    /// Keeps the last state visible and raises `is_refreshing`
    Silent,
}

/// What happened to a requested refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The cycle's result (or validation error) became the visible state
    Applied,
    /// The response arrived after a newer cycle started, the connection
    /// changed, or the controller was torn down
    Discarded,
    /// The cycle never started: a silent cycle was already in flight
    Skipped,
}

#[derive(Debug)]
struct ControllerState {
    connection: ClusterConnection,
    status: RefreshStatus,
    auto_refresh_enabled: bool,
    is_refreshing: bool,
    interval: RefreshInterval,
    /// Bumped on every connection edit and on teardown
    epoch: u64,
    /// Id of the most recently started cycle
    latest_cycle: u64,
    silent_in_flight: Option<u64>,
    torn_down: bool,
}

impl ControllerState {
    fn snapshot(&self) -> RefreshSnapshot {
        RefreshSnapshot {
            status: self.status.clone(),
            is_refreshing: self.is_refreshing,
            auto_refresh_enabled: self.auto_refresh_enabled,
            interval: self.interval,
            namespace: self.connection.namespace.clone(),
        }
    }
}

/// State reachable from the timer task and from spawned silent cycles.
struct Shared<C> {
    name: String,
    client: C,
    state: Mutex<ControllerState>,
    updates: watch::Sender<RefreshSnapshot>,
}

impl<C: ResourceClient> Shared<C> {
    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &ControllerState) {
        self.updates.send_replace(state.snapshot());
    }

    fn timer_may_fire(&self) -> bool {
        let state = self.lock();
        !state.torn_down && TimerPolicy::should_run(state.auto_refresh_enabled, &state.connection)
    }

    async fn run_cycle(&self, mode: RefreshMode) -> RefreshOutcome {
        let (connection, cycle, epoch) = {
            let mut state = self.lock();
            if state.torn_down {
                return RefreshOutcome::Discarded;
            }

            if !state.connection.is_refreshable() {
                state.status = RefreshStatus::Error(MonitorError::missing_connection_fields().to_string());
                self.publish(&state);
                return RefreshOutcome::Applied;
            }

            if mode == RefreshMode::Silent && state.silent_in_flight.is_some() {
                debug!(cluster = %self.name, "skipping tick, previous silent refresh still in flight");
                return RefreshOutcome::Skipped;
            }

            state.latest_cycle += 1;
            let cycle = state.latest_cycle;
            match mode {
                RefreshMode::Manual => state.status = RefreshStatus::Connecting,
                RefreshMode::Silent => {
                    state.is_refreshing = true;
                    state.silent_in_flight = Some(cycle);
                }
            }
            self.publish(&state);

            (state.connection.clone(), cycle, state.epoch)
        };

        debug!(cluster = %self.name, cycle, ?mode, "refresh cycle started");
        let result = self.client.fetch_cluster_data(&connection).await;

        let mut state = self.lock();
        let mut visible_change = false;
        if state.silent_in_flight == Some(cycle) {
            state.silent_in_flight = None;
            state.is_refreshing = false;
            visible_change = true;
        }

        if state.torn_down || state.epoch != epoch || state.latest_cycle != cycle {
            debug!(cluster = %self.name, cycle, "discarding stale refresh result");
            if visible_change && !state.torn_down {
                self.publish(&state);
            }
            return RefreshOutcome::Discarded;
        }

        match result {
            Ok(vms) => {
                let snapshots: usize = vms.iter().map(VirtualMachineView::snapshot_count).sum();
                info!(cluster = %self.name, vms = vms.len(), snapshots, ?mode, "cluster refreshed");
                state.status = RefreshStatus::Success(vms);
            }
            Err(e) => {
                warn!(cluster = %self.name, error = %e, ?mode, "refresh failed, disabling auto-refresh");
                state.status = RefreshStatus::Error(e.to_string());
                state.auto_refresh_enabled = false;
            }
        }
        self.publish(&state);

        RefreshOutcome::Applied
    }
}

/// RefreshController - per-cluster refresh state machine
///
/// Owns one cluster's connection parameters and visible state, drives the
/// ResourceClient, and keeps at most one auto-refresh timer alive. Every
/// transition is published as a [`RefreshSnapshot`] to subscribers.
///
/// # Overlap policy
/// Timer ticks are single-flight: a tick is skipped while the previous silent
/// cycle is still in flight. Between a manual and a silent cycle the most
/// recently started one wins; older completions are discarded. Completions
/// after a connection edit or teardown are discarded too.
///
/// Commands that may arm the timer must run inside a Tokio runtime.
pub struct RefreshController<C: ResourceClient + 'static> {
    shared: Arc<Shared<C>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<C: ResourceClient + 'static> RefreshController<C> {
    pub fn new(
        name: impl Into<String>,
        client: C,
        connection: ClusterConnection,
        options: ControllerOptions,
    ) -> Self {
        let state = ControllerState {
            connection,
            status: RefreshStatus::Idle,
            auto_refresh_enabled: options.auto_refresh_enabled,
            is_refreshing: false,
            interval: options.interval,
            epoch: 0,
            latest_cycle: 0,
            silent_in_flight: None,
            torn_down: false,
        };
        let (updates, _) = watch::channel(state.snapshot());

        let controller = Self {
            shared: Arc::new(Shared {
                name: name.into(),
                client,
                state: Mutex::new(state),
                updates,
            }),
            timer: Mutex::new(None),
        };
        controller.reconcile_timer();
        controller
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn connection(&self) -> ClusterConnection {
        self.shared.lock().connection.clone()
    }

    /// Current state, identical to the last value sent to subscribers
    pub fn snapshot(&self) -> RefreshSnapshot {
        self.shared.lock().snapshot()
    }

    /// Subscribes to the snapshots published after every transition
    pub fn subscribe(&self) -> watch::Receiver<RefreshSnapshot> {
        self.shared.updates.subscribe()
    }

    pub fn is_timer_active(&self) -> bool {
        self.lock_timer()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Runs one refresh cycle
    ///
    /// Errors never escape: they become the `Error` state and switch
    /// auto-refresh off.
    pub async fn refresh(&self, mode: RefreshMode) -> RefreshOutcome {
        self.shared.run_cycle(mode).await
    }

    pub fn set_endpoint(&self, endpoint: impl Into<String>) {
        let endpoint = endpoint.into();
        self.update_connection(|connection| {
            replace_if_changed(&mut connection.api_endpoint, endpoint)
        });
    }

    pub fn set_namespace(&self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        self.update_connection(|connection| {
            replace_if_changed(&mut connection.namespace, namespace)
        });
    }

    pub fn set_token(&self, token: BearerToken) {
        self.update_connection(|connection| replace_if_changed(&mut connection.token, token));
    }

    pub fn set_auto_refresh(&self, enabled: bool) {
        let changed = {
            let mut state = self.shared.lock();
            let changed = replace_if_changed(&mut state.auto_refresh_enabled, enabled);
            if changed {
                self.shared.publish(&state);
            }
            changed
        };
        if changed {
            self.reconcile_timer();
        }
    }

    pub fn set_interval(&self, interval: RefreshInterval) {
        let changed = {
            let mut state = self.shared.lock();
            let changed = replace_if_changed(&mut state.interval, interval);
            if changed {
                self.shared.publish(&state);
            }
            changed
        };
        if changed {
            self.reconcile_timer();
        }
    }

    /// Cancels the timer and discards any response still in flight.
    ///
    /// Idempotent; also runs on drop.
    pub fn shutdown(&self) {
        {
            let mut state = self.shared.lock();
            if state.torn_down {
                return;
            }
            state.torn_down = true;
            state.epoch += 1;
        }
        if let Some(handle) = self.lock_timer().take() {
            handle.abort();
        }
        debug!(cluster = %self.shared.name, "refresh controller torn down");
    }

    fn update_connection(&self, edit: impl FnOnce(&mut ClusterConnection) -> bool) {
        let changed = {
            let mut state = self.shared.lock();
            let changed = edit(&mut state.connection);
            if changed {
                state.epoch += 1;
                // An in-flight manual cycle will be discarded; don't leave it spinning.
                if state.status == RefreshStatus::Connecting {
                    state.status = RefreshStatus::Idle;
                }
                self.shared.publish(&state);
            }
            changed
        };
        if changed {
            self.reconcile_timer();
        }
    }

    fn lock_timer(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancel-then-possibly-reschedule: at most one timer exists afterwards.
    fn reconcile_timer(&self) {
        let mut timer = self.lock_timer();
        let running = timer.as_ref().is_some_and(|handle| !handle.is_finished());

        let action = {
            let state = self.shared.lock();
            if state.torn_down {
                TimerAction::Cancel
            } else {
                TimerPolicy::on_input_change(
                    running,
                    state.auto_refresh_enabled,
                    &state.connection,
                    state.interval,
                )
            }
        };

        if action.cancels_existing() {
            if let Some(previous) = timer.take() {
                previous.abort();
            }
        }

        let Some(interval) = action.interval() else {
            debug!(cluster = %self.shared.name, ?action, "auto-refresh timer off");
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                debug!(cluster = %self.shared.name, ?action, "auto-refresh timer armed");
                *timer = Some(runtime.spawn(run_timer(Arc::clone(&self.shared), interval)));
            }
            Err(_) => {
                warn!(cluster = %self.shared.name, "no async runtime, auto-refresh timer not armed");
            }
        }
    }
}

impl<C: ResourceClient + 'static> Drop for RefreshController<C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Fires a silent cycle every `interval` until auto-refresh is switched off.
///
/// Cycles run on their own tasks so that cancelling the timer never aborts a
/// request already in flight.
async fn run_timer<C: ResourceClient + 'static>(shared: Arc<Shared<C>>, interval: RefreshInterval) {
    let period = interval.as_duration();
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        if !shared.timer_may_fire() {
            debug!(cluster = %shared.name, "auto-refresh disabled, timer stopping");
            break;
        }
        let cycle_shared = Arc::clone(&shared);
        tokio::spawn(async move {
            cycle_shared.run_cycle(RefreshMode::Silent).await;
        });
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
