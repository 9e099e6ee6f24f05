// Catalog loader
// Reads lens sheets, the camera payload, both accessory files and the
// compatibility matrix into one CatalogSnapshot.
// A lens sheet that cannot be read contributes no lenses; every other file is required.

use std::path::Path;

use crate::config::{LensSource, SetkitConfig};
use crate::error::{Result, SetkitError};
use super::csv::{parse_compatibility_csv, parse_csv, CsvRow};
use super::{
    is_focal_range, Accessory, CameraPayload, CatalogSnapshot, CompatibilityRule, Lens, LensType,
};

/// Build a snapshot from the files named in the config
pub fn load_snapshot(config: &SetkitConfig) -> Result<CatalogSnapshot> {
    let mut lenses = Vec::new();
    for source in &config.lens_sources {
        lenses.extend(load_lens_source(&config.data_path(&source.file), source));
    }
    log::info!("Loaded {} lenses from {} sheets", lenses.len(), config.lens_sources.len());

    let payload = load_camera_payload(&config.data_path(&config.camera_file))?;
    log::info!("Loaded {} cameras", payload.cameras.len());

    let mut accessories = Vec::new();
    for file in &config.accessory_files {
        accessories.extend(load_accessories(&config.data_path(file))?);
    }
    log::info!("Loaded {} accessories", accessories.len());

    let compatibility_matrix = load_compatibility_matrix(&config.data_path(&config.matrix_file))?;
    log::info!("Loaded {} compatibility rules", compatibility_matrix.len());

    Ok(CatalogSnapshot {
        lenses,
        cameras: payload.cameras,
        accessories,
        adapter_rules: payload.adapter_rules,
        compatibility_matrix,
    })
}

/// Read one lens sheet. Errors are logged and yield an empty list.
pub fn load_lens_source(path: &Path, source: &LensSource) -> Vec<Lens> {
    match std::fs::read_to_string(path) {
        Ok(text) => lenses_from_rows(&parse_csv(&text), source),
        Err(e) => {
            log::warn!("Error loading {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Map parsed sheet rows to lenses, dropping rows without manufacturer or name
pub fn lenses_from_rows(rows: &[CsvRow], source: &LensSource) -> Vec<Lens> {
    rows.iter()
        .filter_map(|row| lens_from_row(row, source))
        .collect()
}

fn lens_from_row(row: &CsvRow, source: &LensSource) -> Option<Lens> {
    let manufacturer = cell(row, "manufacturer")?;
    let name = cell(row, "name")?;
    let focal_length = cell(row, "focal length").unwrap_or_default();

    let lens_type = if is_focal_range(&focal_length) {
        LensType::Zoom
    } else {
        source.lens_type
    };

    Some(Lens {
        id: Lens::identity(&manufacturer, &name, &focal_length),
        max_aperture: cell(row, "max aperture (T)").unwrap_or_default(),
        mount: cell(row, "mount")
            .or_else(|| cell(row, "original mount"))
            .unwrap_or_default(),
        category: source.category.clone(),
        lens_type,
        close_focus: cell(row, "close focus"),
        image_circle: cell(row, "image circle"),
        weight: cell(row, "weight"),
        front_diameter: cell(row, "front diameter"),
        length: cell(row, "length"),
        notes: cell(row, "notes / comments").or_else(|| cell(row, "notes")),
        manufacturer,
        name,
        focal_length,
    })
}

/// Non-empty cell value
fn cell(row: &CsvRow, key: &str) -> Option<String> {
    row.get(key).filter(|v| !v.is_empty()).cloned()
}

/// Read the camera payload: `{ "cameras": [...], "adapter_rules": [...] }`
pub fn load_camera_payload(path: &Path) -> Result<CameraPayload> {
    let content = read_required(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read one accessory file (a JSON array)
pub fn load_accessories(path: &Path) -> Result<Vec<Accessory>> {
    let content = read_required(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn load_compatibility_matrix(path: &Path) -> Result<Vec<CompatibilityRule>> {
    let content = read_required(path)?;
    Ok(parse_compatibility_csv(&content))
}

fn read_required(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(SetkitError::Config(format!("catalog file not found: {}", path.display())));
    }
    Ok(std::fs::read_to_string(path)?)
}
