// Package tests: de-duplication, validation, export and templates

use super::export::export_text;
use super::store::{delete_template, list_templates, load_template, save_template, template_file_name};
use super::*;
use crate::catalog::{AdapterRule, CatalogSnapshot, CompatibilityRule, SensorMode};
use crate::error::SetkitError;
use tempfile::TempDir;

fn camera(id: &str, native_mount: &str, accepted: &[&str]) -> PackageItem {
    PackageItem::Camera(Camera {
        id: id.to_string(),
        brand: "ARRI".to_string(),
        model: format!("Body {}", id),
        native_mount: native_mount.to_string(),
        accepted_lens_mounts: accepted.iter().map(|m| m.to_string()).collect(),
        ..Default::default()
    })
}

fn lens(manufacturer: &str, name: &str, mount: &str) -> PackageItem {
    PackageItem::Lens(Lens {
        id: Lens::identity(manufacturer, name, "35mm"),
        manufacturer: manufacturer.to_string(),
        name: name.to_string(),
        focal_length: "35mm".to_string(),
        max_aperture: "1.5".to_string(),
        mount: mount.to_string(),
        category: "35mm primes".to_string(),
        ..Default::default()
    })
}

fn accessory(id: &str, brand: &str, model: &str, category: &str) -> PackageItem {
    PackageItem::Accessory(Accessory {
        id: id.to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        category: category.to_string(),
        ..Default::default()
    })
}

fn custom(name: &str) -> PackageItem {
    PackageItem::Custom(CustomItem {
        name: name.to_string(),
        brand: "Grip".to_string(),
        ..Default::default()
    })
}

fn rules() -> CatalogSnapshot {
    CatalogSnapshot {
        adapter_rules: vec![AdapterRule {
            camera_mount: "PL".to_string(),
            lens_mount: "EF".to_string(),
            allowed: false,
            notes: "Flange depth too short".to_string(),
        }],
        compatibility_matrix: vec![CompatibilityRule {
            camera_id: "C1".to_string(),
            accessory_id: "A2".to_string(),
            compatible: false,
            reason: "Power draw exceeds rating".to_string(),
        }],
        ..Default::default()
    }
}

// ---------------------------------------------------------------
// Package list
// ---------------------------------------------------------------

#[test]
fn test_add_rejects_duplicate_keys() {
    let mut package = Package::new();
    assert!(package.add(lens("Cooke", "S4/i", "PL")));
    assert!(!package.add(lens("Cooke", "S4/i", "PL")));
    assert!(package.add(camera("C1", "PL", &[])));
    assert_eq!(package.len(), 2);
}

#[test]
fn test_key_falls_back_to_brand_and_model() {
    let item = accessory("", "Tilta", "Nucleus-M", "follow focus");
    assert_eq!(item.key(), "Tilta-Nucleus-M");
    assert_eq!(accessory("A9", "Tilta", "Nucleus-M", "x").key(), "A9");
    assert_eq!(custom("Apple box").key(), "Grip-Apple box");
}

#[test]
fn test_remove_and_clear() {
    let mut package = Package::from_items(vec![
        camera("C1", "PL", &[]),
        lens("Cooke", "S4/i", "PL"),
        camera("C1", "PL", &[]),
    ]);
    assert_eq!(package.len(), 2, "from_items drops duplicates");

    assert!(package.remove("Cooke-S4/i-35mm"));
    assert!(!package.remove("Cooke-S4/i-35mm"));
    assert_eq!(package.len(), 1);

    package.clear();
    assert!(package.is_empty());
}

#[test]
fn test_items_round_trip_with_item_type_tag() {
    let package = Package::from_items(vec![camera("C1", "PL", &[]), custom("Apple box")]);
    let json = serde_json::to_value(&package).unwrap();
    assert_eq!(json[0]["itemType"], "camera");
    assert_eq!(json[1]["itemType"], "custom");

    let back: Package = serde_json::from_value(json).unwrap();
    assert_eq!(back, package);
}

#[test]
fn test_lens_item_from_hand_written_json() {
    let item: PackageItem = serde_json::from_str(
        r#"{"itemType": "lens", "manufacturer": "Zeiss", "name": "Supreme", "mount": "LPL", "type": "prime"}"#,
    )
    .unwrap();
    assert_eq!(item.item_type(), "lens");
    assert_eq!(item.key(), "Zeiss-Supreme");
    assert_eq!(item.label(), "Zeiss Supreme");
}

// ---------------------------------------------------------------
// Validation
// ---------------------------------------------------------------

#[test]
fn test_no_camera_returns_single_warning() {
    let items = vec![lens("Cooke", "S4/i", "PL"), accessory("A1", "Brand", "Cage", "rigging")];
    let report = validate_package(&items, &rules());
    assert_eq!(report.errors, Vec::<String>::new());
    assert_eq!(report.warnings, vec!["Add a camera to validate compatibility".to_string()]);

    let report = validate_package(&[], &rules());
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn test_native_lens_is_silent() {
    let items = vec![camera("C1", "PL", &[]), lens("Cooke", "S4/i", "PL")];
    let report = validate_package(&items, &rules());
    assert!(report.is_clean());
}

#[test]
fn test_adapter_lens_warns_and_incompatible_lens_errors() {
    let items = vec![
        camera("C1", "PL", &["LPL"]),
        lens("Zeiss", "Supreme", "LPL"),
        lens("Canon", "CN-E", "EF"),
        lens("Sony", "G Master", "E"),
    ];
    let report = validate_package(&items, &rules());

    assert_eq!(report.warnings, vec!["Zeiss Supreme: ⚠ Requires LPL→PL adapter".to_string()]);
    assert_eq!(
        report.errors,
        vec![
            "Canon CN-E: ✗ Incompatible: Flange depth too short".to_string(),
            "Sony G Master: ✗ E lens incompatible with PL camera".to_string(),
        ]
    );
}

#[test]
fn test_accessory_errors_and_unknown_warnings() {
    let items = vec![
        camera("C1", "PL", &[]),
        accessory("A1", "Wooden Camera", "Cage", "rigging"),
        accessory("A2", "Anton Bauer", "Titon 150", "Power"),
        accessory("A3", "Angelbird", "CFexpress B", "media"),
    ];
    let report = validate_package(&items, &rules());

    assert_eq!(report.errors, vec!["Anton Bauer Titon 150: ✗ Power draw exceeds rating".to_string()]);
    assert_eq!(report.warnings, vec!["Angelbird CFexpress B: ? Compatibility unknown".to_string()]);
}

#[test]
fn test_first_camera_is_reference() {
    let items = vec![
        lens("Cooke", "S4/i", "PL"),
        camera("C2", "LPL", &[]),
        camera("C1", "PL", &[]),
        accessory("A2", "Anton Bauer", "Titon 150", "Power"),
    ];
    let report = validate_package(&items, &rules());

    assert_eq!(report.errors, vec!["Cooke S4/i: ✗ PL lens incompatible with LPL camera".to_string()]);
    assert_eq!(
        report.warnings,
        vec!["Anton Bauer Titon 150: ? Compatibility unknown".to_string()],
        "matrix row for C1 does not apply when C2 is the reference"
    );
}

#[test]
fn test_lens_entries_precede_accessory_entries() {
    let items = vec![
        camera("C1", "PL", &[]),
        accessory("A3", "Angelbird", "Card", "media"),
        lens("Zeiss", "Supreme", "LPL"),
    ];
    let report = validate_package(&items, &rules());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.errors[0].starts_with("Zeiss Supreme"));
}

#[test]
fn test_custom_items_are_ignored() {
    let items = vec![camera("C1", "PL", &[]), custom("Apple box")];
    assert!(validate_package(&items, &rules()).is_clean());
}

// ---------------------------------------------------------------
// Export
// ---------------------------------------------------------------

#[test]
fn test_export_empty_package_fails() {
    assert!(matches!(export_text(&Package::new()), Err(SetkitError::EmptyPackage)));
}

#[test]
fn test_export_text_layout() {
    let mut cam = Camera {
        id: "C1".to_string(),
        brand: "ARRI".to_string(),
        model: "ALEXA 35".to_string(),
        native_mount: "LPL".to_string(),
        ..Default::default()
    };
    cam.sensor_modes.push(SensorMode { crop_class: "S35".to_string(), resolution: "4.6K".to_string() });

    let package = Package::from_items(vec![
        PackageItem::Camera(cam),
        lens("Cooke", "S4/i", "PL"),
        accessory("A1", "Tilta", "Nucleus-M", "follow focus"),
    ]);

    let text = export_text(&package).unwrap();
    let expected = "Camera Package List\n\n\
        1. ARRI ALEXA 35\n   Category: Camera\n   Mount: LPL\n   Sensor: S35\n\n\
        2. Cooke S4/i 35mm\n   Category: 35mm primes\n   Mount: PL\n   Aperture: T1.5\n\n\
        3. Tilta Nucleus-M\n   Category: follow focus\n   Subtype: N/A\n";
    assert_eq!(text, expected);
}

// ---------------------------------------------------------------
// Templates
// ---------------------------------------------------------------

#[test]
fn test_template_save_load_delete() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("packages");
    let package = Package::from_items(vec![camera("C1", "PL", &[]), lens("Cooke", "S4/i", "PL")]);

    let path = save_template(&dir, "Feature A-cam", &package).unwrap();
    assert_eq!(path.file_name().unwrap().to_string_lossy(), "Feature-A-cam.json");

    let loaded = load_template(&dir, "Feature A-cam").unwrap();
    assert_eq!(loaded.name, "Feature A-cam");
    assert_eq!(loaded.items, package);

    let listed = list_templates(&dir);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].item_count, 2);

    assert!(delete_template(&dir, "Feature A-cam").unwrap());
    assert!(!delete_template(&dir, "Feature A-cam").unwrap());
    assert!(matches!(load_template(&dir, "Feature A-cam"), Err(SetkitError::TemplateNotFound(_))));
}

#[test]
fn test_list_templates_skips_garbage_and_missing_dir() {
    let tmp = TempDir::new().unwrap();
    assert!(list_templates(&tmp.path().join("nope")).is_empty());

    std::fs::write(tmp.path().join("broken.json"), "{").unwrap();
    std::fs::write(tmp.path().join("notes.txt"), "not a template").unwrap();
    save_template(tmp.path(), "ok", &Package::from_items(vec![custom("Sandbag")])).unwrap();

    let listed = list_templates(tmp.path());
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "ok");
}

#[test]
fn test_template_name_rules() {
    assert_eq!(template_file_name("  a/b c "), "a-b-c.json");
    let tmp = TempDir::new().unwrap();
    assert!(save_template(tmp.path(), "   ", &Package::new()).is_err());
}

#[test]
fn test_save_refuses_to_overwrite_a_different_name() {
    let tmp = TempDir::new().unwrap();
    let first = Package::from_items(vec![custom("Sandbag")]);
    save_template(tmp.path(), "A/B", &first).unwrap();

    let second = Package::from_items(vec![custom("Apple box")]);
    assert!(matches!(save_template(tmp.path(), "A-B", &second), Err(SetkitError::Other(_))));
    assert_eq!(load_template(tmp.path(), "A/B").unwrap().items, first);

    // Same name replaces
    save_template(tmp.path(), "A/B", &second).unwrap();
    assert_eq!(load_template(tmp.path(), "A/B").unwrap().items, second);
}
