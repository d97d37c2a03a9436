/// Shared kernel - error types, result alias and logging setup
pub mod error;
pub mod logging;
pub mod result;

pub use result::Result;
