use super::views::VirtualMachineView;

/// Visible state of one cluster's refresh cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RefreshStatus {
    /// Nothing has been fetched yet
    #[default]
    Idle,
    /// A manual refresh is in flight; previous results have been cleared
    Connecting,
    /// The last completed cycle succeeded
    Success(Vec<VirtualMachineView>),
    /// The last completed cycle failed
    Error(String),
}

impl RefreshStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RefreshStatus::Idle => "idle",
            RefreshStatus::Connecting => "connecting",
            RefreshStatus::Success(_) => "success",
            RefreshStatus::Error(_) => "error",
        }
    }

    pub fn virtual_machines(&self) -> Option<&[VirtualMachineView]> {
        match self {
            RefreshStatus::Success(vms) => Some(vms),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RefreshStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RefreshStatus::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(RefreshStatus::default(), RefreshStatus::Idle);
        assert_eq!(RefreshStatus::default().label(), "idle");
    }

    #[test]
    fn test_accessors() {
        let success = RefreshStatus::Success(vec![]);
        assert_eq!(success.virtual_machines(), Some(&[][..]));
        assert!(success.error_message().is_none());

        let error = RefreshStatus::Error("boom".to_string());
        assert_eq!(error.error_message(), Some("boom"));
        assert!(error.is_error());
        assert!(error.virtual_machines().is_none());
    }
}
