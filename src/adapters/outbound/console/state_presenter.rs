use crate::application::read_models::RefreshSnapshot;
use crate::monitoring::domain::{DataVolumeView, RefreshStatus, SnapshotView, VirtualMachineView};
use crate::ports::outbound::StatePresenter;
use crate::shared::Result;
use owo_colors::{OwoColorize, Style};
use std::fmt::Write as _;
use std::io::{self, Write};

/// ConsolePresenter adapter for rendering cluster state to stdout
///
/// This adapter implements the StatePresenter port. Each call prints the full
/// tree for one cluster; logs go to stderr so the two never interleave.
pub struct ConsolePresenter {
    use_color: bool,
}

impl ConsolePresenter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Renders one cluster's snapshot as text
    pub fn render(&self, cluster: &str, snapshot: &RefreshSnapshot) -> String {
        let mut out = String::new();

        let auto_refresh = if snapshot.auto_refresh_enabled {
            format!("auto-refresh {}", snapshot.interval)
        } else {
            "auto-refresh off".to_string()
        };
        let refreshing = if snapshot.is_refreshing {
            " (refreshing…)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "━━ {} ━━ [{}] {}{}",
            self.paint(cluster, Style::new().bold()),
            snapshot.status.label(),
            auto_refresh,
            refreshing
        );

        match &snapshot.status {
            RefreshStatus::Idle => {
                let _ = writeln!(out, "  Not connected. Refresh to discover VMs.");
            }
            RefreshStatus::Connecting => {
                let _ = writeln!(out, "  Connecting and fetching data...");
            }
            RefreshStatus::Error(message) => {
                let _ = writeln!(
                    out,
                    "  {} {}",
                    self.paint("Connection Error:", Style::new().red().bold()),
                    message
                );
            }
            RefreshStatus::Success(vms) if vms.is_empty() => {
                let _ = writeln!(
                    out,
                    "  No virtual machines found in namespace '{}'.",
                    snapshot.namespace
                );
            }
            RefreshStatus::Success(vms) => {
                for vm in vms {
                    self.render_vm(&mut out, vm);
                }
            }
        }

        out
    }

    fn render_vm(&self, out: &mut String, vm: &VirtualMachineView) {
        let _ = writeln!(out, "  {}", self.paint(&vm.name, Style::new().cyan().bold()));
        if vm.data_volumes.is_empty() {
            let _ = writeln!(out, "    No DataVolumes found for this VM.");
            return;
        }
        for dv in &vm.data_volumes {
            self.render_data_volume(out, dv);
        }
    }

    fn render_data_volume(&self, out: &mut String, dv: &DataVolumeView) {
        let _ = writeln!(out, "    DataVolume: {}", dv.name);
        if dv.snapshots.is_empty() {
            let _ = writeln!(out, "      No snapshots found for this DataVolume.");
            return;
        }
        for snapshot in &dv.snapshots {
            self.render_snapshot(out, snapshot);
        }
    }

    fn render_snapshot(&self, out: &mut String, snapshot: &SnapshotView) {
        let marker = if snapshot.is_ready {
            self.paint("✔", Style::new().green())
        } else {
            self.paint("⚠", Style::new().yellow())
        };
        let created = snapshot
            .creation_timestamp
            .map(|timestamp| timestamp.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown date".to_string());

        let _ = writeln!(
            out,
            "      {} {}  {}  {}",
            marker,
            snapshot.name,
            self.paint(&created, Style::new().dimmed()),
            snapshot.status_message
        );
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.use_color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

impl StatePresenter for ConsolePresenter {
    fn present(&self, cluster: &str, snapshot: &RefreshSnapshot) -> Result<()> {
        let rendered = self.render(cluster, snapshot);
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(rendered.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}
