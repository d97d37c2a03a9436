/// Per-cluster refresh controllers
mod refresh_controller;

pub use refresh_controller::{RefreshController, RefreshMode, RefreshOutcome};
