// Catalog search filters for lenses, cameras and accessories
// Empty/None fields do not filter.

use crate::catalog::{Accessory, Camera, Lens, LensType};

#[derive(Debug, Clone, Default)]
pub struct LensQuery {
    pub text: Option<String>,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub mount: Option<String>,
    pub lens_type: Option<LensType>,
    /// Widest acceptable T-stop number (lenses slower than this are excluded)
    pub max_aperture: Option<f64>,
}

impl LensQuery {
    pub fn matches(&self, lens: &Lens) -> bool {
        if let Some(text) = present(&self.text) {
            let haystack = format!("{} {} {}", lens.manufacturer, lens.name, lens.focal_length).to_lowercase();
            if !haystack.contains(&text.to_lowercase()) {
                return false;
            }
        }

        if let Some(category) = present(&self.category) {
            if lens.category != category {
                return false;
            }
        }

        if let Some(manufacturer) = present(&self.manufacturer) {
            if lens.manufacturer != manufacturer {
                return false;
            }
        }

        // Same mount field the resolver reads; lenses without one are not excluded
        if let Some(mount) = present(&self.mount) {
            if !lens.mount.is_empty() && !lens.mount.contains(mount) {
                return false;
            }
        }

        if let Some(lens_type) = self.lens_type {
            if lens.lens_type != lens_type {
                return false;
            }
        }

        if let Some(limit) = self.max_aperture.filter(|l| *l > 0.0) {
            match lens.aperture_value() {
                Some(aperture) if aperture <= limit => {}
                _ => return false,
            }
        }

        true
    }
}

pub fn search_lenses<'a>(lenses: &'a [Lens], query: &LensQuery) -> Vec<&'a Lens> {
    lenses.iter().filter(|l| query.matches(l)).collect()
}

#[derive(Debug, Clone, Default)]
pub struct CameraQuery {
    pub text: Option<String>,
    pub brand: Option<String>,
    pub mount: Option<String>,
    /// Crop class fragment, e.g. "S35" or "FF"
    pub sensor: Option<String>,
}

impl CameraQuery {
    pub fn matches(&self, camera: &Camera) -> bool {
        if let Some(text) = present(&self.text) {
            if !camera.display_name().to_lowercase().contains(&text.to_lowercase()) {
                return false;
            }
        }

        if let Some(brand) = present(&self.brand) {
            if camera.brand != brand {
                return false;
            }
        }

        if let Some(mount) = present(&self.mount) {
            if camera.native_mount != mount {
                return false;
            }
        }

        if let Some(sensor) = present(&self.sensor) {
            let has_mode = camera
                .sensor_modes
                .iter()
                .any(|m| !m.crop_class.is_empty() && m.crop_class.contains(sensor));
            if !has_mode {
                return false;
            }
        }

        true
    }
}

pub fn search_cameras<'a>(cameras: &'a [Camera], query: &CameraQuery) -> Vec<&'a Camera> {
    cameras.iter().filter(|c| query.matches(c)).collect()
}

#[derive(Debug, Clone, Default)]
pub struct AccessoryQuery {
    /// Exact category; None means all
    pub category: Option<String>,
    pub text: Option<String>,
}

impl AccessoryQuery {
    pub fn matches(&self, accessory: &Accessory) -> bool {
        if let Some(category) = present(&self.category) {
            if accessory.category != category {
                return false;
            }
        }

        if let Some(text) = present(&self.text) {
            let needle = text.to_lowercase();
            let subtype = accessory.subtype.as_deref().unwrap_or("");
            let fields = [
                accessory.brand.as_str(),
                accessory.model.as_str(),
                accessory.category.as_str(),
                subtype,
            ];
            if !fields.iter().any(|f| f.to_lowercase().contains(&needle)) {
                return false;
            }
        }

        true
    }
}

pub fn search_accessories<'a>(accessories: &'a [Accessory], query: &AccessoryQuery) -> Vec<&'a Accessory> {
    accessories.iter().filter(|a| query.matches(a)).collect()
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SensorMode;

    fn lens(manufacturer: &str, name: &str, focal: &str, aperture: &str, mount: &str, category: &str) -> Lens {
        Lens {
            id: Lens::identity(manufacturer, name, focal),
            manufacturer: manufacturer.to_string(),
            name: name.to_string(),
            focal_length: focal.to_string(),
            max_aperture: aperture.to_string(),
            mount: mount.to_string(),
            category: category.to_string(),
            lens_type: if focal.contains('-') { LensType::Zoom } else { LensType::Prime },
            ..Default::default()
        }
    }

    fn lenses() -> Vec<Lens> {
        vec![
            lens("Cooke", "S4/i", "32mm", "2", "PL", "35mm primes"),
            lens("Angenieux", "Optimo", "24-290mm", "2.8", "PL", "35mm zooms"),
            lens("Canon", "K35", "55mm", "1.3", "", "35mm primes"),
            lens("Zeiss", "Supreme", "50mm", "n/a", "LPL", "full frame primes"),
        ]
    }

    #[test]
    fn test_lens_text_is_case_insensitive() {
        let all = lenses();
        let query = LensQuery { text: Some("optimo 24".to_string()), ..Default::default() };
        let found = search_lenses(&all, &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].manufacturer, "Angenieux");
    }

    #[test]
    fn test_lens_mount_filter_keeps_unknown_mounts() {
        let all = lenses();
        let query = LensQuery { mount: Some("PL".to_string()), ..Default::default() };
        let names: Vec<&str> = search_lenses(&all, &query).iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["S4/i", "Optimo", "K35", "Supreme"], "\"LPL\" contains \"PL\"");

        let query = LensQuery { mount: Some("LPL".to_string()), ..Default::default() };
        let names: Vec<&str> = search_lenses(&all, &query).iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["K35", "Supreme"]);
    }

    #[test]
    fn test_lens_aperture_limit_excludes_unparseable() {
        let all = lenses();
        let query = LensQuery { max_aperture: Some(2.0), ..Default::default() };
        let names: Vec<&str> = search_lenses(&all, &query).iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["S4/i", "K35"]);
    }

    #[test]
    fn test_lens_type_category_manufacturer() {
        let all = lenses();
        let query = LensQuery {
            category: Some("35mm primes".to_string()),
            manufacturer: Some("Canon".to_string()),
            lens_type: Some(LensType::Prime),
            ..Default::default()
        };
        assert_eq!(search_lenses(&all, &query).len(), 1);

        let zooms = LensQuery { lens_type: Some(LensType::Zoom), ..Default::default() };
        assert_eq!(search_lenses(&all, &zooms).len(), 1);
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let all = lenses();
        let query = LensQuery { text: Some(String::new()), ..Default::default() };
        assert_eq!(search_lenses(&all, &query).len(), all.len());
    }

    #[test]
    fn test_camera_filters() {
        let cameras = vec![
            Camera {
                id: "C1".into(),
                brand: "ARRI".into(),
                model: "ALEXA Mini LF".into(),
                native_mount: "LPL".into(),
                sensor_modes: vec![SensorMode { crop_class: "FF".into(), resolution: "4.5K".into() }],
                ..Default::default()
            },
            Camera {
                id: "C2".into(),
                brand: "RED".into(),
                model: "Komodo".into(),
                native_mount: "RF".into(),
                sensor_modes: vec![SensorMode { crop_class: "S35".into(), resolution: "6K".into() }],
                ..Default::default()
            },
        ];

        let by_text = CameraQuery { text: Some("mini".into()), ..Default::default() };
        assert_eq!(search_cameras(&cameras, &by_text)[0].id, "C1");

        let by_sensor = CameraQuery { sensor: Some("S35".into()), ..Default::default() };
        assert_eq!(search_cameras(&cameras, &by_sensor)[0].id, "C2");

        let by_mount = CameraQuery { mount: Some("LPL".into()), brand: Some("RED".into()), ..Default::default() };
        assert!(search_cameras(&cameras, &by_mount).is_empty());
    }

    #[test]
    fn test_accessory_filters() {
        let accessories = vec![
            Accessory {
                id: "A1".into(),
                brand: "SmallHD".into(),
                model: "Cine 7".into(),
                category: "monitor".into(),
                subtype: Some("on-board".into()),
                ..Default::default()
            },
            Accessory {
                id: "A2".into(),
                brand: "Core SWX".into(),
                model: "Helix".into(),
                category: "Power".into(),
                ..Default::default()
            },
        ];

        let by_subtype = AccessoryQuery { text: Some("ON-BOARD".into()), ..Default::default() };
        assert_eq!(search_accessories(&accessories, &by_subtype)[0].id, "A1");

        let by_category = AccessoryQuery { category: Some("Power".into()), ..Default::default() };
        assert_eq!(search_accessories(&accessories, &by_category)[0].id, "A2");

        let all = AccessoryQuery::default();
        assert_eq!(search_accessories(&accessories, &all).len(), 2);
    }
}
