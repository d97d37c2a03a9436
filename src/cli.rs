use clap::Parser;

use vm_snapshot_monitor::monitoring::domain::RefreshInterval;

/// Watch KubeVirt VirtualMachines and the VolumeSnapshots of their DataVolumes
#[derive(Parser, Debug)]
#[command(name = "vm-snapshot-monitor")]
#[command(version)]
#[command(
    about = "Watch VirtualMachines and the VolumeSnapshots of their DataVolumes across clusters",
    long_about = None
)]
pub struct Args {
    /// Path to a YAML config file (defaults to ./vm-snapshot-monitor.config.yml if present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// API endpoint of the first cluster (e.g. https://api.my-cluster.com:6443)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Bearer token of the first cluster
    #[arg(long, env = "VM_SNAPSHOT_MONITOR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Namespace of the first cluster
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Auto-refresh interval: 1000, 3000, 5000 (ms) or 1s, 3s, 5s
    #[arg(short, long)]
    pub interval: Option<RefreshInterval>,

    /// Disable automatic refresh
    #[arg(long)]
    pub no_auto_refresh: bool,

    /// Refresh every cluster once, print the result and exit
    #[arg(long)]
    pub once: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether any flag overrides the first cluster's connection
    pub fn has_connection_overrides(&self) -> bool {
        self.endpoint.is_some() || self.token.is_some() || self.namespace.is_some()
    }
}
