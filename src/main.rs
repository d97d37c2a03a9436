mod cli;

use cli::Args;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use vm_snapshot_monitor::config::{self, ConfigFile};
use vm_snapshot_monitor::prelude::*;
use vm_snapshot_monitor::shared::logging::{init_logging, LogLevel};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse_args();
    init_logging(LogLevel::from_flags(args.quiet, args.verbose));

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let settings = load_settings(&args)?;

    // Create adapters (Dependency Injection)
    let client = KubeApiClient::new()?;
    let presenter: Arc<dyn StatePresenter> = Arc::new(ConsolePresenter::new(!args.no_color));

    let registry = SessionRegistry::from_settings(settings, client)?;

    if args.once {
        return Ok(refresh_once(&registry, presenter.as_ref()).await);
    }

    let renderers: Vec<JoinHandle<()>> = registry
        .iter()
        .map(|controller| {
            spawn_renderer(
                controller.name().to_string(),
                controller.subscribe(),
                Arc::clone(&presenter),
            )
        })
        .collect();

    info!(clusters = registry.len(), "watching clusters, press Ctrl-C to stop");
    registry.refresh_all(RefreshMode::Manual).await;

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    registry.shutdown_all();
    for renderer in renderers {
        renderer.abort();
    }

    Ok(ExitCode::Success)
}

/// Resolves config file, defaults and command-line overrides into cluster settings
fn load_settings(args: &Args) -> Result<Vec<ClusterSettings>> {
    let mut config = match args.config.as_deref() {
        Some(path) => config::load_config_from_path(Path::new(path))?,
        None => config::discover_config(&std::env::current_dir()?)?.unwrap_or_default(),
    };

    if let Some(interval) = args.interval {
        config.interval_ms = Some(interval.as_millis());
    }
    // One-shot runs never need the timer.
    if args.no_auto_refresh || args.once {
        config.auto_refresh = Some(false);
    }

    let mut settings = ConfigFile::into_cluster_settings(config)?;

    if args.has_connection_overrides() {
        if let Some(first) = settings.first_mut() {
            if let Some(endpoint) = &args.endpoint {
                first.connection.api_endpoint = endpoint.clone();
            }
            if let Some(namespace) = &args.namespace {
                first.connection.namespace = namespace.clone();
            }
            if let Some(token) = &args.token {
                first.connection.token = BearerToken::new(token.clone());
            }
        }
    }

    Ok(settings)
}

/// One manual refresh per cluster, rendered once; fails if any cluster errored
async fn refresh_once<C: ResourceClient + 'static>(
    registry: &SessionRegistry<C>,
    presenter: &dyn StatePresenter,
) -> ExitCode {
    registry.refresh_all(RefreshMode::Manual).await;

    let mut code = ExitCode::Success;
    for controller in registry.iter() {
        let snapshot = controller.snapshot();
        if snapshot.status.is_error() {
            code = ExitCode::RefreshFailed;
        }
        if let Err(e) = presenter.present(controller.name(), &snapshot) {
            warn!(cluster = %controller.name(), error = %e, "failed to render state");
        }
    }
    code
}

/// Renders every published snapshot of one cluster until its controller is gone
fn spawn_renderer(
    cluster: String,
    mut updates: watch::Receiver<RefreshSnapshot>,
    presenter: Arc<dyn StatePresenter>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last_rendered: Option<RefreshSnapshot> = None;
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            if !worth_rendering(last_rendered.as_ref(), &snapshot) {
                continue;
            }
            if let Err(e) = presenter.present(&cluster, &snapshot) {
                warn!(cluster = %cluster, error = %e, "failed to render state");
            }
            last_rendered = Some(snapshot);
        }
    })
}

/// Silent cycles that change nothing but the refreshing flag are not reprinted
fn worth_rendering(previous: Option<&RefreshSnapshot>, next: &RefreshSnapshot) -> bool {
    match previous {
        None => true,
        Some(previous) => {
            previous.status != next.status
                || previous.auto_refresh_enabled != next.auto_refresh_enabled
                || previous.interval != next.interval
                || previous.namespace != next.namespace
        }
    }
}
