// Compatibility resolution engine
// Lens-to-camera mount reasoning and accessory-to-camera rule lookup.
// Every query is a pure function of (item, camera, rule tables).

pub mod accessory;
pub mod mount;


use serde::{Deserialize, Serialize};

use crate::catalog::{Accessory, Camera, CatalogSnapshot, Lens};

pub use accessory::resolve_accessory_compatibility;
pub use mount::resolve_lens_compatibility;

/// Verdict category of a compatibility query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatStatus {
    Native,
    Adapter,
    Incompatible,
    Compatible,
    Universal,
    Unknown,
}

impl CompatStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompatStatus::Native => "native",
            CompatStatus::Adapter => "adapter",
            CompatStatus::Incompatible => "incompatible",
            CompatStatus::Compatible => "compatible",
            CompatStatus::Universal => "universal",
            CompatStatus::Unknown => "unknown",
        }
    }
}

/// Outcome of one compatibility query.
/// `compatible` is `None` when nothing is known, which is not the same as incompatible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub compatible: Option<bool>,
    pub status: CompatStatus,
    pub message: String,
    /// "{lens mount}→{camera mount}" for lenses used through an adapter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapter: Option<String>,
    /// Why an accessory verdict was reached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CompatibilityResult {
    pub fn is_compatible(&self) -> bool {
        self.compatible == Some(true)
    }

    pub fn is_incompatible(&self) -> bool {
        self.compatible == Some(false)
    }
}

/// A catalog record paired with its verdict against one camera
#[derive(Debug, Clone, Serialize)]
pub struct Tagged<'a, T> {
    #[serde(flatten)]
    pub item: &'a T,
    pub compatibility: CompatibilityResult,
}

/// Every lens in the catalog that works on the camera, in catalog order
pub fn compatible_lenses<'a>(snapshot: &'a CatalogSnapshot, camera: &Camera) -> Vec<Tagged<'a, Lens>> {
    snapshot
        .lenses
        .iter()
        .filter_map(|lens| {
            let compatibility =
                resolve_lens_compatibility(Some(lens), Some(camera), &snapshot.adapter_rules)?;
            compatibility.is_compatible().then_some(Tagged { item: lens, compatibility })
        })
        .collect()
}

/// Every accessory confirmed to work with the camera, in catalog order.
/// Unknown verdicts are left out.
pub fn compatible_accessories<'a>(
    snapshot: &'a CatalogSnapshot,
    camera: &Camera,
) -> Vec<Tagged<'a, Accessory>> {
    snapshot
        .accessories
        .iter()
        .filter_map(|acc| {
            let compatibility = resolve_accessory_compatibility(
                Some(acc),
                Some(camera),
                &snapshot.compatibility_matrix,
            )?;
            compatibility.is_compatible().then_some(Tagged { item: acc, compatibility })
        })
        .collect()
}
