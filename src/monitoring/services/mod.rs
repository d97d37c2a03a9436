pub mod correlator;
pub mod timer_policy;

pub use correlator::Correlator;
pub use timer_policy::{TimerAction, TimerPolicy};
