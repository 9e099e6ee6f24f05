// Side-by-side lens comparison
// Up to three lenses, one row per field in fixed order. Empty values read "N/A".

use serde::Serialize;

use crate::catalog::{CatalogSnapshot, Lens};
use crate::constants::{MAX_COMPARED_LENSES, NOT_AVAILABLE};
use crate::error::{Result, SetkitError};

type FieldFn = fn(&Lens) -> Option<&str>;

/// Compared fields, in display order
pub const COMPARED_FIELDS: [(&str, FieldFn); 11] = [
    ("Manufacturer", |l| Some(l.manufacturer.as_str())),
    ("Name", |l| Some(l.name.as_str())),
    ("Focal Length", |l| Some(l.focal_length.as_str())),
    ("Max Aperture", |l| Some(l.max_aperture.as_str())),
    ("Close Focus", |l| l.close_focus.as_deref()),
    ("Image Circle", |l| l.image_circle.as_deref()),
    ("Mount", |l| Some(l.mount.as_str())),
    ("Front Diameter", |l| l.front_diameter.as_deref()),
    ("Weight", |l| l.weight.as_deref()),
    ("Length", |l| l.length.as_deref()),
    ("Category", |l| Some(l.category.as_str())),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    /// One value per compared lens, in selection order
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Comparison {
    /// Display names of the compared lenses
    pub lenses: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    pub fn is_empty(&self) -> bool {
        self.lenses.is_empty()
    }
}

/// Build comparison rows for already-selected lenses.
/// No lenses gives no rows.
pub fn compare_lenses(lenses: &[&Lens]) -> Comparison {
    if lenses.is_empty() {
        return Comparison::default();
    }

    let rows = COMPARED_FIELDS
        .iter()
        .map(|&(label, field)| ComparisonRow {
            label,
            values: lenses
                .iter()
                .map(|lens| field(lens).filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE).to_string())
                .collect(),
        })
        .collect();

    Comparison {
        lenses: lenses.iter().map(|l| l.display_name()).collect(),
        rows,
    }
}

/// Look up lenses by id and compare them
pub fn compare(snapshot: &CatalogSnapshot, ids: &[String]) -> Result<Comparison> {
    if ids.len() > MAX_COMPARED_LENSES {
        return Err(SetkitError::Other(format!(
            "At most {} lenses can be compared (got {})",
            MAX_COMPARED_LENSES,
            ids.len()
        )));
    }

    let lenses = ids
        .iter()
        .map(|id| snapshot.lens(id).ok_or_else(|| SetkitError::LensNotFound(id.clone())))
        .collect::<Result<Vec<_>>>()?;

    Ok(compare_lenses(&lenses))
}
