// Lens mount resolver
// Priority order (first match wins):
// 1. Native mount (exact, case-sensitive)
// 2. Mount the camera accepts without the rule table (adapter)
// 3. Adapter rule for (camera native mount, lens mount)
// 4. Incompatible
// Total: any present lens/camera pair gets native, adapter or incompatible.

use crate::catalog::{AdapterRule, Camera, Lens};
use super::{CompatStatus, CompatibilityResult};

/// Decide whether a lens can be used on a camera.
/// Returns `None` when either side is missing: "cannot evaluate", not "incompatible".
pub fn resolve_lens_compatibility(
    lens: Option<&Lens>,
    camera: Option<&Camera>,
    adapter_rules: &[AdapterRule],
) -> Option<CompatibilityResult> {
    let (lens, camera) = (lens?, camera?);

    let lens_mount = lens.mount.as_str();
    let camera_mount = camera.native_mount.as_str();

    if lens_mount == camera_mount {
        return Some(CompatibilityResult {
            compatible: Some(true),
            status: CompatStatus::Native,
            message: format!("✓ Native {} mount - direct compatibility", lens_mount),
            adapter: None,
            reason: None,
        });
    }

    if camera.accepted_lens_mounts.iter().any(|m| m == lens_mount) {
        return Some(CompatibilityResult {
            compatible: Some(true),
            status: CompatStatus::Adapter,
            message: format!("⚠ Requires {} adapter", adapter_descriptor(lens_mount, camera_mount)),
            adapter: Some(adapter_descriptor(lens_mount, camera_mount)),
            reason: None,
        });
    }

    let rule = adapter_rules
        .iter()
        .find(|r| r.camera_mount == camera_mount && r.lens_mount == lens_mount);

    if let Some(rule) = rule {
        log::debug!(
            "Adapter rule {}→{}: allowed={}",
            rule.lens_mount,
            rule.camera_mount,
            rule.allowed
        );
        return Some(if rule.allowed {
            CompatibilityResult {
                compatible: Some(true),
                status: CompatStatus::Adapter,
                message: format!("⚠ {}", notes_or(rule, "Adapter required")),
                adapter: Some(adapter_descriptor(lens_mount, camera_mount)),
                reason: None,
            }
        } else {
            CompatibilityResult {
                compatible: Some(false),
                status: CompatStatus::Incompatible,
                message: format!("✗ Incompatible: {}", notes_or(rule, "No adapter available")),
                adapter: None,
                reason: None,
            }
        });
    }

    Some(CompatibilityResult {
        compatible: Some(false),
        status: CompatStatus::Incompatible,
        message: format!("✗ {} lens incompatible with {} camera", lens_mount, camera_mount),
        adapter: None,
        reason: None,
    })
}

fn adapter_descriptor(lens_mount: &str, camera_mount: &str) -> String {
    format!("{}→{}", lens_mount, camera_mount)
}

fn notes_or<'a>(rule: &'a AdapterRule, fallback: &'a str) -> &'a str {
    if rule.notes.is_empty() {
        fallback
    } else {
        &rule.notes
    }
}
