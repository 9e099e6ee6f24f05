// Equipment package: the user's assembled list of cameras, lenses and accessories

pub mod export;
pub mod store;
pub mod validator;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::catalog::{Accessory, Camera, Lens};

pub use validator::{validate_package, ValidationReport};

/// Free-form line item (crew gear, expendables, anything not in the catalog)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomItem {
    pub id: String,
    pub brand: String,
    pub name: String,
    pub notes: Option<String>,
}

/// One package entry, tagged by item type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "itemType", rename_all = "lowercase")]
pub enum PackageItem {
    Camera(Camera),
    Lens(Lens),
    Accessory(Accessory),
    Custom(CustomItem),
}

impl PackageItem {
    pub fn item_type(&self) -> &'static str {
        match self {
            PackageItem::Camera(_) => "camera",
            PackageItem::Lens(_) => "lens",
            PackageItem::Accessory(_) => "accessory",
            PackageItem::Custom(_) => "custom",
        }
    }

    /// Identity used for de-duplication: explicit id, else "brand-model"
    pub fn key(&self) -> String {
        let (id, brand, model) = match self {
            PackageItem::Camera(c) => (&c.id, &c.brand, &c.model),
            PackageItem::Lens(l) => (&l.id, &l.manufacturer, &l.name),
            PackageItem::Accessory(a) => (&a.id, &a.brand, &a.model),
            PackageItem::Custom(c) => (&c.id, &c.brand, &c.name),
        };
        if id.is_empty() {
            format!("{}-{}", brand, model)
        } else {
            id.clone()
        }
    }

    /// "Brand Model" as shown in validation messages
    pub fn label(&self) -> String {
        match self {
            PackageItem::Camera(c) => c.display_name(),
            PackageItem::Lens(l) => format!("{} {}", l.manufacturer, l.name),
            PackageItem::Accessory(a) => a.display_name(),
            PackageItem::Custom(c) => format!("{} {}", c.brand, c.name).trim().to_string(),
        }
    }
}

/// Ordered package with identity-based de-duplication
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Package {
    items: Vec<PackageItem>,
}

impl Package {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a package from items, dropping later duplicates
    pub fn from_items(items: impl IntoIterator<Item = PackageItem>) -> Self {
        let mut package = Self::new();
        for item in items {
            package.add(item);
        }
        package
    }

    /// Append an item. Returns false (and leaves the package unchanged) when
    /// an item with the same key is already present.
    pub fn add(&mut self, item: PackageItem) -> bool {
        let key = item.key();
        if self.contains(&key) {
            log::debug!("Already in package: {}", key);
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the item with this key; returns whether anything was removed
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.key() != key);
        self.items.len() != before
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.iter().any(|item| item.key() == key)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[PackageItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
