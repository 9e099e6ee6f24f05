// SetKit configuration
// Where the catalog files live and how lens sheets map to categories.
// Stored as JSON at ~/.setkit/config.json; every field is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::LensType;
use crate::constants::{
    ACCESSORY_FILES, CAMERA_FILE, CONFIG_FILENAME, LENS_FILE_PREFIX, MATRIX_FILE, SETKIT_FOLDER,
    TEMPLATES_FOLDER,
};
use crate::error::{Result, SetkitError};

/// One lens sheet and the category/type every lens in it inherits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LensSource {
    pub file: String,
    pub category: String,
    #[serde(rename = "type")]
    pub lens_type: LensType,
}

impl LensSource {
    fn sheet(name: &str, category: &str, lens_type: LensType) -> Self {
        Self {
            file: format!("{}{}.csv", LENS_FILE_PREFIX, name),
            category: category.to_string(),
            lens_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetkitConfig {
    pub data_dir: PathBuf,
    pub lens_sources: Vec<LensSource>,
    pub camera_file: String,
    pub accessory_files: Vec<String>,
    pub matrix_file: String,
    /// Saved package templates; defaults to ~/.setkit/packages
    pub templates_dir: Option<PathBuf>,
}

impl Default for SetkitConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            lens_sources: default_lens_sources(),
            camera_file: CAMERA_FILE.to_string(),
            accessory_files: ACCESSORY_FILES.iter().map(|f| f.to_string()).collect(),
            matrix_file: MATRIX_FILE.to_string(),
            templates_dir: None,
        }
    }
}

impl SetkitConfig {
    pub fn data_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Templates directory, falling back to ~/.setkit/packages, then ./packages
    pub fn templates_path(&self) -> PathBuf {
        if let Some(dir) = &self.templates_dir {
            return dir.clone();
        }
        setkit_home()
            .map(|home| home.join(TEMPLATES_FOLDER))
            .unwrap_or_else(|| PathBuf::from(TEMPLATES_FOLDER))
    }
}

/// The published motion picture lens sheets
pub fn default_lens_sources() -> Vec<LensSource> {
    use LensType::*;

    vec![
        LensSource::sheet("16mm primes", "16mm primes", Prime),
        LensSource::sheet("16mm zooms", "16mm zooms", Zoom),
        LensSource::sheet("Arri _ Zeiss 35mm primes", "35mm primes", Prime),
        LensSource::sheet("Cooke 35mm primes", "35mm primes", Prime),
        LensSource::sheet("Panavision 35mm primes", "35mm primes", Prime),
        LensSource::sheet("Modern 35mm primes", "35mm primes", Prime),
        LensSource::sheet("Vintage 35mm primes", "35mm primes", Prime),
        LensSource::sheet("35mm zooms", "35mm zooms", Zoom),
        LensSource::sheet("Panavision anamorphic", "anamorphic", Prime),
        LensSource::sheet("Hawk anamorphic", "anamorphic", Prime),
        LensSource::sheet("Other anamorphic", "anamorphic", Prime),
        LensSource::sheet("FF Anamorphic", "anamorphic", Prime),
        LensSource::sheet("Zeiss FF primes", "full frame primes", Prime),
        LensSource::sheet("Panavision FF Lenses", "full frame primes", Prime),
        LensSource::sheet("Other FF Primes", "full frame primes", Prime),
        LensSource::sheet("Converted 35mm stills", "full frame primes", Prime),
        LensSource::sheet("FF Zooms", "full frame zooms", Zoom),
        LensSource::sheet("65mm lenses", "65mm", Prime),
        LensSource::sheet("Secondary lenses", "special", Special),
        LensSource::sheet("PC _ Tilt lenses", "special", Special),
        LensSource::sheet("Relay lenses", "special", Special),
        LensSource::sheet("Effects lenses", "special", Special),
    ]
}

/// ~/.setkit
pub fn setkit_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(SETKIT_FOLDER))
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    setkit_home().map(|home| home.join(CONFIG_FILENAME))
}

/// Load configuration.
/// An explicit path must exist; without one, ~/.setkit/config.json is used
/// when present and built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<SetkitConfig> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SetkitError::Config(format!("config file not found: {}", p.display())));
            }
            p.to_path_buf()
        }
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => {
                log::debug!("No config file found, using defaults");
                return Ok(SetkitConfig::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path)?;
    let config: SetkitConfig = serde_json::from_str(&content)
        .map_err(|e| SetkitError::Config(format!("{}: {}", path.display(), e)))?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}
