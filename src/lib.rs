// SetKit - Library Entry Point
// Equipment catalog, compatibility engine and package builder.

pub mod constants;
pub mod error;
pub mod config;
pub mod catalog;
pub mod compat;
pub mod package;
pub mod search;
pub mod compare;
pub mod recommend;

pub use catalog::CatalogSnapshot;
pub use compat::{
    compatible_accessories, compatible_lenses, resolve_accessory_compatibility,
    resolve_lens_compatibility, CompatStatus, CompatibilityResult,
};
pub use error::{Result, SetkitError};
pub use package::{validate_package, Package, PackageItem, ValidationReport};
