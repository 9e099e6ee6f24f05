// Equipment catalog: lens, camera and accessory records plus rule tables

pub mod csv;
pub mod loader;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// Lens classification. Zoom is derived from a focal range; otherwise the
/// source file decides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LensType {
    #[default]
    Prime,
    Zoom,
    Special,
}

impl LensType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LensType::Prime => "prime",
            LensType::Zoom => "zoom",
            LensType::Special => "special",
        }
    }
}

impl std::str::FromStr for LensType {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "prime" => Ok(LensType::Prime),
            "zoom" => Ok(LensType::Zoom),
            "special" => Ok(LensType::Special),
            other => Err(format!("unknown lens type '{}' (expected prime, zoom or special)", other)),
        }
    }
}

/// A motion picture lens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lens {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub manufacturer: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub focal_length: String,
    #[serde(deserialize_with = "lenient_string")]
    pub max_aperture: String,
    #[serde(deserialize_with = "lenient_string")]
    pub mount: String,
    #[serde(deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub lens_type: LensType,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub close_focus: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub image_circle: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub weight: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub front_diameter: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub length: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub notes: Option<String>,
}

impl Lens {
    /// Composite identity key used across the catalog
    pub fn identity(manufacturer: &str, name: &str, focal_length: &str) -> String {
        format!("{}-{}-{}", manufacturer, name, focal_length)
    }

    /// "Manufacturer Name Focal" for listings
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.manufacturer, self.name, self.focal_length)
            .trim_end()
            .to_string()
    }

    /// Leading numeric T-stop, if the aperture string starts with one
    pub fn aperture_value(&self) -> Option<f64> {
        leading_float(&self.max_aperture)
    }

    /// Leading integer of the focal length ("24-70mm" -> 24)
    pub fn focal_value(&self) -> Option<i64> {
        leading_int(&self.focal_length)
    }
}

/// A focal length string describing a range ("24-290mm") denotes a zoom.
pub fn is_focal_range(focal_length: &str) -> bool {
    focal_length.contains('-')
}

/// Camera power connection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerSpec {
    #[serde(deserialize_with = "lenient_string")]
    pub mount: String,
    #[serde(deserialize_with = "lenient_string")]
    pub voltage: String,
}

/// One recording mode of a camera sensor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorMode {
    #[serde(deserialize_with = "lenient_string")]
    pub crop_class: String,
    #[serde(deserialize_with = "lenient_string")]
    pub resolution: String,
}

/// A cinema camera body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub brand: String,
    #[serde(deserialize_with = "lenient_string")]
    pub model: String,
    #[serde(deserialize_with = "lenient_string")]
    pub native_mount: String,
    #[serde(deserialize_with = "lenient_strings")]
    pub accepted_lens_mounts: Vec<String>,
    #[serde(deserialize_with = "lenient_strings")]
    pub video_io: Vec<String>,
    pub power: Option<PowerSpec>,
    #[serde(deserialize_with = "null_default")]
    pub sensor_modes: Vec<SensorMode>,
    #[serde(deserialize_with = "lenient_strings")]
    pub media_slots: Vec<String>,
    #[serde(deserialize_with = "lenient_strings")]
    pub flags: Vec<String>,
}

impl Camera {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Power mount, empty when the camera has no power spec
    pub fn power_mount(&self) -> &str {
        self.power.as_ref().map(|p| p.mount.as_str()).unwrap_or("")
    }

    /// Crop class of the primary sensor mode
    pub fn primary_sensor(&self) -> Option<&str> {
        self.sensor_modes
            .first()
            .map(|m| m.crop_class.as_str())
            .filter(|c| !c.is_empty())
    }
}

/// Camera-mount x lens-mount adapter statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterRule {
    #[serde(deserialize_with = "lenient_string")]
    pub camera_mount: String,
    #[serde(deserialize_with = "lenient_string")]
    pub lens_mount: String,
    #[serde(deserialize_with = "null_default")]
    pub allowed: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub notes: String,
}

/// Camera payload as published: cameras plus the adapter table for this load
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraPayload {
    #[serde(deserialize_with = "null_default")]
    pub cameras: Vec<Camera>,
    #[serde(deserialize_with = "null_default")]
    pub adapter_rules: Vec<AdapterRule>,
}

/// Support, power, media or monitoring accessory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Accessory {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub brand: String,
    #[serde(deserialize_with = "lenient_string")]
    pub model: String,
    #[serde(deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub subtype: Option<String>,
    #[serde(deserialize_with = "deserialize_specs")]
    pub specs: BTreeMap<String, String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub compatible_with: Option<String>,
}

impl Accessory {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Spec value by key, empty when absent
    pub fn spec(&self, key: &str) -> &str {
        self.specs.get(key).map(String::as_str).unwrap_or("")
    }
}

// --- Lenient field parsing ---
// Catalog JSON is hand-maintained: null stands in for "absent" and numbers
// show up where text is expected. Neither may fail the whole load.

/// Accept free-form spec values: strings pass through, other scalars are
/// stringified, arrays are joined with ", ", null is dropped.
fn deserialize_specs<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    let mut specs = BTreeMap::new();
    for (key, value) in raw.unwrap_or_default() {
        if let Some(text) = json_text(&value) {
            specs.insert(key, text);
        }
    }
    Ok(specs)
}

/// Text field: null becomes "", scalars are stringified
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(json_text(&value).unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(json_text(&value))
}

/// List field: null becomes empty, a lone scalar becomes a one-item list
fn lenient_strings<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items.iter().filter_map(json_text).collect(),
        other => json_text(&other).into_iter().collect(),
    })
}

fn null_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn json_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => Some(
            items
                .iter()
                .filter_map(json_text)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

/// One authored camera/accessory compatibility statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityRule {
    pub camera_id: String,
    pub accessory_id: String,
    pub compatible: bool,
    pub reason: String,
}

/// Immutable view of everything loaded for a session.
/// Built once, passed by reference into resolvers and the validator.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub lenses: Vec<Lens>,
    pub cameras: Vec<Camera>,
    pub accessories: Vec<Accessory>,
    pub adapter_rules: Vec<AdapterRule>,
    pub compatibility_matrix: Vec<CompatibilityRule>,
}

impl CatalogSnapshot {
    pub fn camera(&self, id: &str) -> Option<&Camera> {
        self.cameras.iter().find(|c| c.id == id)
    }

    pub fn accessory(&self, id: &str) -> Option<&Accessory> {
        self.accessories.iter().find(|a| a.id == id)
    }

    pub fn lens(&self, id: &str) -> Option<&Lens> {
        self.lenses.iter().find(|l| l.id == id)
    }

    /// Sorted unique lens manufacturers
    pub fn manufacturers(&self) -> Vec<String> {
        self.lenses
            .iter()
            .filter(|l| !l.manufacturer.is_empty())
            .map(|l| l.manufacturer.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted unique camera brands
    pub fn camera_brands(&self) -> Vec<String> {
        self.cameras
            .iter()
            .filter(|c| !c.brand.is_empty())
            .map(|c| c.brand.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

static LEADING_FLOAT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+))").ok());
static LEADING_INT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").ok());

/// Leading decimal number of a string, ignoring leading whitespace ("1.5 (T)" -> 1.5)
pub fn leading_float(value: &str) -> Option<f64> {
    let re = LEADING_FLOAT.as_ref()?;
    re.captures(value)?.get(1)?.as_str().parse().ok()
}

/// Leading integer of a string, ignoring leading whitespace ("85mm" -> 85)
pub fn leading_int(value: &str) -> Option<i64> {
    let re = LEADING_INT.as_ref()?;
    re.captures(value)?.get(1)?.as_str().parse().ok()
}
