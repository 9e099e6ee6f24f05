// Plain-text package list for sharing with rental houses

use std::path::Path;

use crate::constants::{EXPORT_TITLE, NOT_AVAILABLE};
use crate::error::{Result, SetkitError};
use super::{Package, PackageItem};

/// Render the package as a numbered list
pub fn export_text(package: &Package) -> Result<String> {
    if package.is_empty() {
        return Err(SetkitError::EmptyPackage);
    }

    let entries: Vec<String> = package
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| export_entry(i + 1, item))
        .collect();

    Ok(format!("{}\n\n{}", EXPORT_TITLE, entries.join("\n")))
}

/// Write the export to a file
pub fn write_export(package: &Package, path: &Path) -> Result<()> {
    let text = export_text(package)?;
    std::fs::write(path, text)?;
    log::info!("Exported {} items to {}", package.len(), path.display());
    Ok(())
}

fn export_entry(number: usize, item: &PackageItem) -> String {
    match item {
        PackageItem::Lens(lens) => format!(
            "{}. {}\n   Category: {}\n   Mount: {}\n   Aperture: T{}\n",
            number,
            lens.display_name(),
            lens.category,
            or_na(&lens.mount),
            or_na(&lens.max_aperture),
        ),
        PackageItem::Camera(camera) => format!(
            "{}. {}\n   Category: Camera\n   Mount: {}\n   Sensor: {}\n",
            number,
            camera.display_name(),
            or_na(&camera.native_mount),
            camera.primary_sensor().unwrap_or(NOT_AVAILABLE),
        ),
        PackageItem::Accessory(acc) => format!(
            "{}. {}\n   Category: {}\n   Subtype: {}\n",
            number,
            acc.display_name(),
            or_na(&acc.category),
            or_na(acc.subtype.as_deref().unwrap_or("")),
        ),
        PackageItem::Custom(custom) => format!(
            "{}. {}\n   Notes: {}\n",
            number,
            item.label(),
            or_na(custom.notes.as_deref().unwrap_or("")),
        ),
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}
