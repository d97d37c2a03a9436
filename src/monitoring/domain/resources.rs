//! Raw resource shapes as returned by the cluster's list endpoints.
//!
//! Every field is optional or defaulted: a partially populated object
//! deserializes instead of failing the whole list.

use serde::Deserialize;

/// A namespaced list response. `items` may be absent or null.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ResourceList<T> {
    #[serde(default)]
    items: Option<Vec<T>>,
}

impl<T> ResourceList<T> {
    pub fn into_items(self) -> Vec<T> {
        self.items.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    pub creation_timestamp: Option<String>,
}

/// `kubevirt.io/v1` VirtualMachine, reduced to what correlation reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawVirtualMachine {
    pub metadata: ObjectMeta,
    pub spec: VirtualMachineSpec,
}

impl RawVirtualMachine {
    /// Names of the DataVolumes referenced by the VM template, in declaration order
    pub fn data_volume_names(&self) -> impl Iterator<Item = &str> {
        self.spec
            .template
            .spec
            .volumes
            .iter()
            .filter_map(|volume| volume.data_volume.as_ref())
            .map(|data_volume| data_volume.name.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VirtualMachineSpec {
    pub template: VirtualMachineTemplate,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VirtualMachineTemplate {
    pub spec: VirtualMachineInstanceSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VirtualMachineInstanceSpec {
    #[serde(deserialize_with = "null_as_default")]
    pub volumes: Vec<Volume>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Volume {
    pub name: String,
    pub data_volume: Option<DataVolumeSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataVolumeSource {
    pub name: String,
}

/// `snapshot.storage.k8s.io/v1` VolumeSnapshot
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawVolumeSnapshot {
    pub metadata: ObjectMeta,
    pub spec: VolumeSnapshotSpec,
    pub status: Option<VolumeSnapshotStatus>,
}

impl RawVolumeSnapshot {
    pub fn source_pvc(&self) -> Option<&str> {
        self.spec.source.persistent_volume_claim_name.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VolumeSnapshotSpec {
    pub source: VolumeSnapshotSource,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolumeSnapshotSource {
    pub persistent_volume_claim_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolumeSnapshotStatus {
    pub ready_to_use: Option<bool>,
    pub error: Option<VolumeSnapshotError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VolumeSnapshotError {
    pub message: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
