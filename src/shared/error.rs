use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to tell a failed cluster refresh apart from
/// a broken invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every cluster refreshed successfully
    Success = 0,
    /// At least one cluster ended in the error state (one-shot mode)
    RefreshFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, runtime setup, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::RefreshFailed => write!(f, "Refresh Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// The two collections fetched from a cluster on every refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    VirtualMachines,
    VolumeSnapshots,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::VirtualMachines => write!(f, "VMs"),
            ResourceKind::VolumeSnapshots => write!(f, "Snapshots"),
        }
    }
}

/// Errors raised while refreshing one cluster.
///
/// The refresh controller reduces every variant to the message text of its
/// `Error` state, so the Display output is what the operator sees.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MonitorError {
    /// Required connection fields are missing; the network is never contacted
    #[error("{message}")]
    Validation { message: String },

    /// The API server answered with a non-success status
    #[error("Failed to fetch {resource}: {status}")]
    Fetch {
        resource: ResourceKind,
        status: String,
    },

    /// The request never produced a usable response (DNS, TLS, timeout, body decoding)
    #[error("Failed to fetch {resource}: {details}")]
    Transport {
        resource: ResourceKind,
        details: String,
    },
}

impl MonitorError {
    pub fn missing_connection_fields() -> Self {
        MonitorError::Validation {
            message: "API Endpoint and Namespace are required.".to_string(),
        }
    }
}
