// Accessory resolver
// Priority order (first match wins):
// 1. Compatibility matrix row for (camera id, accessory id), first in table order
// 2. Universal categories: cable, rigging
// 3. Monitor: camera has an SDI output and the monitor takes SDI
// 4. Power: camera power mount contains the accessory mount
// 5. Unknown (compatible = None)
// Category names are case-sensitive; "Power" is capitalised in the catalog.

use crate::catalog::{Accessory, Camera, CompatibilityRule};
use crate::constants::{CATEGORY_CABLE, CATEGORY_MONITOR, CATEGORY_POWER, CATEGORY_RIGGING, SDI_MARKER};
use super::{CompatStatus, CompatibilityResult};

/// Decide whether an accessory works with a camera.
/// Returns `None` when either side is missing.
pub fn resolve_accessory_compatibility(
    accessory: Option<&Accessory>,
    camera: Option<&Camera>,
    matrix: &[CompatibilityRule],
) -> Option<CompatibilityResult> {
    let (accessory, camera) = (accessory?, camera?);

    if let Some(rule) = find_rule(matrix, &camera.id, &accessory.id) {
        return Some(matrix_result(rule));
    }

    let category = accessory.category.as_str();

    if category == CATEGORY_CABLE || category == CATEGORY_RIGGING {
        return Some(compatible(
            CompatStatus::Universal,
            "✓ Universal accessory",
            "Universal compatibility".to_string(),
        ));
    }

    if category == CATEGORY_MONITOR && camera_has_sdi(camera) && monitor_has_sdi(accessory) {
        return Some(compatible(
            CompatStatus::Compatible,
            "✓ SDI compatible",
            "SDI video output supported".to_string(),
        ));
    }

    if category == CATEGORY_POWER {
        let camera_power = camera.power_mount();
        let accessory_mount = accessory.spec("mount");

        if !camera_power.is_empty() && !accessory_mount.is_empty() && camera_power.contains(accessory_mount) {
            return Some(compatible(
                CompatStatus::Compatible,
                "✓ Power mount compatible",
                format!("{} power compatible", accessory_mount),
            ));
        }
    }

    Some(CompatibilityResult {
        compatible: None,
        status: CompatStatus::Unknown,
        message: "? Compatibility unknown".to_string(),
        adapter: None,
        reason: Some("Not in compatibility database".to_string()),
    })
}

/// First authored row for the pair, in table order
pub fn find_rule<'a>(
    matrix: &'a [CompatibilityRule],
    camera_id: &str,
    accessory_id: &str,
) -> Option<&'a CompatibilityRule> {
    matrix
        .iter()
        .find(|r| r.camera_id == camera_id && r.accessory_id == accessory_id)
}

fn matrix_result(rule: &CompatibilityRule) -> CompatibilityResult {
    let (status, marker) = if rule.compatible {
        (CompatStatus::Compatible, "✓")
    } else {
        (CompatStatus::Incompatible, "✗")
    };

    CompatibilityResult {
        compatible: Some(rule.compatible),
        status,
        message: format!("{} {}", marker, rule.reason),
        adapter: None,
        reason: Some(rule.reason.clone()),
    }
}

fn compatible(status: CompatStatus, message: &str, reason: String) -> CompatibilityResult {
    CompatibilityResult {
        compatible: Some(true),
        status,
        message: message.to_string(),
        adapter: None,
        reason: Some(reason),
    }
}

fn camera_has_sdi(camera: &Camera) -> bool {
    camera.video_io.iter().any(|io| io.contains(SDI_MARKER))
}

fn monitor_has_sdi(accessory: &Accessory) -> bool {
    accessory.spec("inputs").contains(SDI_MARKER)
}
