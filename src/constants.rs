// SetKit Constants

// Default data file names (as published with the catalog)
pub const CAMERA_FILE: &str = "setkit-cameras-data-clean.json";
pub const ACCESSORY_FILES: [&str; 2] = [
    "setkit-accessories-video-monitoring-clean.json",
    "setkit-accessories-support-power-media-clean.json",
];
pub const MATRIX_FILE: &str = "setkit-compatibility-matrix.csv";
pub const LENS_FILE_PREFIX: &str = "Full Motion Picture Lens Database - ";

// Matrix CSV: header row + metadata row precede the data
pub const MATRIX_SKIP_LINES: usize = 2;

// App folders
pub const SETKIT_FOLDER: &str = ".setkit";
pub const CONFIG_FILENAME: &str = "config.json";
pub const TEMPLATES_FOLDER: &str = "packages";
pub const TEMPLATE_EXTENSION: &str = "json";
pub const TEMPLATE_VERSION: u32 = 1;

// Export
pub const EXPORT_TITLE: &str = "Camera Package List";
pub const NOT_AVAILABLE: &str = "N/A";

// Lens comparison
pub const MAX_COMPARED_LENSES: usize = 3;

// Validation
pub const NO_CAMERA_WARNING: &str = "Add a camera to validate compatibility";

// Accessory categories with fixed semantics (case-sensitive)
pub const CATEGORY_CABLE: &str = "cable";
pub const CATEGORY_RIGGING: &str = "rigging";
pub const CATEGORY_MONITOR: &str = "monitor";
pub const CATEGORY_POWER: &str = "Power";
pub const SDI_MARKER: &str = "SDI";

// Recommendations
pub const MAX_RECOMMENDATIONS: usize = 15;
pub const WIDE_MAX_MM: i64 = 28;
pub const STANDARD_MAX_MM: i64 = 50;
pub const PORTRAIT_MAX_MM: i64 = 100;
pub const CLEAN_MODERN_MAKERS: [&str; 3] = ["Arri", "Zeiss", "Leica"];
pub const VINTAGE_MAKER: &str = "Cooke";
