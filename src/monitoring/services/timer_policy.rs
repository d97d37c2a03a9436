use crate::monitoring::domain::{ClusterConnection, RefreshInterval};

/// What the controller must do with its recurring timer after an input changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// No timer is running and none should be
    Stay,
    /// Start a timer; none was running
    Arm(RefreshInterval),
    /// Cancel the running timer and start a new one
    Rearm(RefreshInterval),
    /// Cancel the running timer and leave it off
    Cancel,
}

impl TimerAction {
    pub fn interval(self) -> Option<RefreshInterval> {
        match self {
            TimerAction::Arm(interval) | TimerAction::Rearm(interval) => Some(interval),
            TimerAction::Stay | TimerAction::Cancel => None,
        }
    }

    pub fn cancels_existing(self) -> bool {
        matches!(self, TimerAction::Rearm(_) | TimerAction::Cancel)
    }
}

/// Transition table for the auto-refresh timer
///
/// Called whenever any of {enabled, interval, endpoint, token, namespace}
/// changes: a running timer is always cancelled, and a new one is armed only
/// when auto-refresh is enabled and every connection parameter is set. The
/// table never depends on the timer primitive itself.
pub struct TimerPolicy;

impl TimerPolicy {
    pub fn should_run(auto_refresh_enabled: bool, connection: &ClusterConnection) -> bool {
        auto_refresh_enabled && connection.is_complete()
    }

    pub fn on_input_change(
        timer_running: bool,
        auto_refresh_enabled: bool,
        connection: &ClusterConnection,
        interval: RefreshInterval,
    ) -> TimerAction {
        match (
            timer_running,
            Self::should_run(auto_refresh_enabled, connection),
        ) {
            (false, false) => TimerAction::Stay,
            (false, true) => TimerAction::Arm(interval),
            (true, true) => TimerAction::Rearm(interval),
            (true, false) => TimerAction::Cancel,
        }
    }
}
