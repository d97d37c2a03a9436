use crate::monitoring::domain::views::{PENDING_MESSAGE, READY_MESSAGE};
use crate::monitoring::domain::{
    DataVolumeView, RawVirtualMachine, RawVolumeSnapshot, SnapshotView, VirtualMachineView,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Correlator service for building the VM → DataVolume → snapshot tree
///
/// This service contains pure business logic: no I/O, and identical inputs
/// always produce identical output.
pub struct Correlator;

impl Correlator {
    /// Correlates VirtualMachines with the VolumeSnapshots taken of their DataVolumes
    ///
    /// # Arguments
    /// * `vms` - VirtualMachines in server order
    /// * `snapshots` - VolumeSnapshots in server order
    ///
    /// # Returns
    /// One view per input VM, in input order. Each DataVolume carries exactly the
    /// snapshots whose source claim name equals the DataVolume name, newest first.
    /// Snapshots matching no DataVolume are dropped.
    pub fn correlate(
        vms: &[RawVirtualMachine],
        snapshots: &[RawVolumeSnapshot],
    ) -> Vec<VirtualMachineView> {
        let snapshots_by_pvc = Self::group_by_source(snapshots);

        vms.iter()
            .map(|vm| VirtualMachineView {
                name: vm.metadata.name.clone(),
                data_volumes: vm
                    .data_volume_names()
                    .map(|dv_name| DataVolumeView {
                        name: dv_name.to_string(),
                        snapshots: snapshots_by_pvc.get(dv_name).cloned().unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Groups snapshot views by source claim name, each group sorted newest first
    fn group_by_source(snapshots: &[RawVolumeSnapshot]) -> HashMap<&str, Vec<SnapshotView>> {
        let mut groups: HashMap<&str, Vec<SnapshotView>> = HashMap::new();

        for snapshot in snapshots {
            let Some(source) = snapshot.source_pvc() else {
                continue;
            };
            groups
                .entry(source)
                .or_default()
                .push(Self::snapshot_view(snapshot));
        }

        for group in groups.values_mut() {
            // Stable: equal timestamps keep discovery order. Undated sorts last.
            group.sort_by(|a, b| b.creation_timestamp.cmp(&a.creation_timestamp));
        }

        groups
    }

    fn snapshot_view(snapshot: &RawVolumeSnapshot) -> SnapshotView {
        let status = snapshot.status.as_ref();
        let is_ready = status.and_then(|s| s.ready_to_use).unwrap_or(false);

        let status_message = if is_ready {
            READY_MESSAGE.to_string()
        } else {
            status
                .and_then(|s| s.error.as_ref())
                .and_then(|e| e.message.as_deref())
                .filter(|message| !message.is_empty())
                .unwrap_or(PENDING_MESSAGE)
                .to_string()
        };

        SnapshotView {
            name: snapshot.metadata.name.clone(),
            creation_timestamp: snapshot
                .metadata
                .creation_timestamp
                .as_deref()
                .and_then(parse_timestamp),
            is_ready,
            status_message,
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}
