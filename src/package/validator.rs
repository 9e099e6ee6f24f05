// Package validation
// Runs the lens and accessory resolvers against the first camera in the
// package. Other cameras are not checked against each other.
// Never fails: items the resolvers cannot evaluate are skipped.

use serde::{Deserialize, Serialize};

use crate::catalog::{Accessory, CatalogSnapshot, Lens};
use crate::compat::{resolve_accessory_compatibility, resolve_lens_compatibility, CompatStatus};
use crate::constants::NO_CAMERA_WARNING;
use super::PackageItem;

/// Errors and warnings in package order (lens entries first, then accessories)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Validate a package against the rule tables in the snapshot
pub fn validate_package(items: &[PackageItem], snapshot: &CatalogSnapshot) -> ValidationReport {
    let mut cameras = Vec::new();
    let mut lenses: Vec<(&Lens, String)> = Vec::new();
    let mut accessories: Vec<(&Accessory, String)> = Vec::new();

    for item in items {
        match item {
            PackageItem::Camera(c) => cameras.push(c),
            PackageItem::Lens(l) => lenses.push((l, item.label())),
            PackageItem::Accessory(a) => accessories.push((a, item.label())),
            PackageItem::Custom(_) => {}
        }
    }

    let Some(camera) = cameras.first().copied() else {
        return ValidationReport {
            errors: Vec::new(),
            warnings: vec![NO_CAMERA_WARNING.to_string()],
        };
    };

    if cameras.len() > 1 {
        log::debug!(
            "{} cameras in package, validating against {}",
            cameras.len(),
            camera.display_name()
        );
    }

    let mut report = ValidationReport::default();

    for (lens, label) in lenses {
        let Some(compat) = resolve_lens_compatibility(Some(lens), Some(camera), &snapshot.adapter_rules) else {
            continue;
        };
        if compat.is_incompatible() {
            report.errors.push(format!("{}: {}", label, compat.message));
        } else if compat.status == CompatStatus::Adapter {
            report.warnings.push(format!("{}: {}", label, compat.message));
        }
    }

    for (accessory, label) in accessories {
        let Some(compat) = resolve_accessory_compatibility(
            Some(accessory),
            Some(camera),
            &snapshot.compatibility_matrix,
        ) else {
            continue;
        };
        if compat.is_incompatible() {
            report.errors.push(format!("{}: {}", label, compat.message));
        } else if compat.status == CompatStatus::Unknown {
            report.warnings.push(format!("{}: {}", label, compat.message));
        }
    }

    report
}
