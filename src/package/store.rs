// Saved package templates
// Each template is one JSON file in the templates directory. The contents are
// opaque to everything except this module.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::constants::{TEMPLATE_EXTENSION, TEMPLATE_VERSION};
use crate::error::{Result, SetkitError};
use super::Package;

/// On-disk template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageTemplate {
    pub version: u32,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub items: Package,
}

/// Listing entry for a saved template
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub name: String,
    pub path: PathBuf,
    pub saved_at: DateTime<Utc>,
    pub item_count: usize,
}

/// File name for a template: name with path separators and spaces replaced
pub fn template_file_name(name: &str) -> String {
    let slug: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    format!("{}.{}", slug, TEMPLATE_EXTENSION)
}

/// Save a package under a name, replacing any template with the same name.
/// A different template that maps to the same file is left alone.
pub fn save_template(dir: &Path, name: &str, package: &Package) -> Result<PathBuf> {
    if name.trim().is_empty() {
        return Err(SetkitError::Other("Template name must not be empty".to_string()));
    }
    std::fs::create_dir_all(dir)?;

    let template = PackageTemplate {
        version: TEMPLATE_VERSION,
        name: name.trim().to_string(),
        saved_at: Utc::now(),
        items: package.clone(),
    };

    let path = dir.join(template_file_name(name));
    if path.exists() {
        // Distinct names can share a file name ("A/B" and "A-B")
        match read_template(&path) {
            Ok(existing) if existing.name != template.name => {
                return Err(SetkitError::Other(format!(
                    "Template '{}' would overwrite '{}' ({})",
                    template.name,
                    existing.name,
                    path.display()
                )));
            }
            Ok(_) => {}
            Err(e) => log::warn!("Replacing unreadable template {}: {}", path.display(), e),
        }
    }
    std::fs::write(&path, serde_json::to_string_pretty(&template)?)?;
    log::info!("Saved template '{}' ({} items) to {}", template.name, package.len(), path.display());
    Ok(path)
}

/// Load a template by name
pub fn load_template(dir: &Path, name: &str) -> Result<PackageTemplate> {
    let path = dir.join(template_file_name(name));
    if !path.exists() {
        return Err(SetkitError::TemplateNotFound(name.to_string()));
    }
    read_template(&path)
}

/// Read a template file. Duplicate items in hand-edited files are dropped.
pub fn read_template(path: &Path) -> Result<PackageTemplate> {
    let content = std::fs::read_to_string(path)?;
    let mut template: PackageTemplate = serde_json::from_str(&content)?;
    template.items = Package::from_items(template.items.items().to_vec());
    Ok(template)
}

/// Delete a template; returns whether a file was removed
pub fn delete_template(dir: &Path, name: &str) -> Result<bool> {
    let path = dir.join(template_file_name(name));
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(&path)?;
    Ok(true)
}

/// List saved templates, newest first. Unreadable files are skipped.
pub fn list_templates(dir: &Path) -> Vec<TemplateSummary> {
    if !dir.exists() {
        return Vec::new();
    }

    let mut summaries: Vec<TemplateSummary> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map_or(false, |ext| ext == TEMPLATE_EXTENSION))
        .filter_map(|entry| match read_template(entry.path()) {
            Ok(template) => Some(TemplateSummary {
                name: template.name,
                path: entry.path().to_path_buf(),
                saved_at: template.saved_at,
                item_count: template.items.len(),
            }),
            Err(e) => {
                log::warn!("Skipping template {}: {}", entry.path().display(), e);
                None
            }
        })
        .collect();

    summaries.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
    summaries
}
