use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Verbosity selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Quiet,
    Normal,
    Verbose,
}

impl LogLevel {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => LogLevel::Quiet,
            (false, true) => LogLevel::Verbose,
            (false, false) => LogLevel::Normal,
        }
    }

    fn directive(self) -> &'static str {
        match self {
            LogLevel::Quiet => "vm_snapshot_monitor=error",
            LogLevel::Normal => "vm_snapshot_monitor=info",
            LogLevel::Verbose => "vm_snapshot_monitor=debug",
        }
    }
}

/// Installs a JSON subscriber on stderr so stdout stays free for rendered state.
///
/// `RUST_LOG` directives are honoured on top of the level chosen here.
pub fn init_logging(level: LogLevel) {
    let filter = match level.directive().parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };

    // A second initialisation (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .try_init();
}
