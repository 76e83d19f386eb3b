//! Photo library catalog
//!
//! Maps photo categories to the subdirectories that hold them. The layout
//! mirrors the library on disk: `<root>/<category>/<subcategory>/*.{jpg,png}`.

use serde::{Deserialize, Serialize};

/// Category map for the photo library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoCatalog {
    /// Root directory of the library
    pub root: String,
    /// Category name -> subcategory directory names
    pub categories: Vec<(String, Vec<String>)>,
}

impl PhotoCatalog {
    /// Catalog rooted at the given directory with the standard categories
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            categories: vec![
                ("rooms".to_string(), vec!["rooms".to_string()]),
                ("mess".to_string(), vec!["dining".to_string()]),
                ("facilities".to_string(), vec!["sports".to_string()]),
                (
                    "exterior".to_string(),
                    vec![
                        "building".to_string(),
                        "entrance".to_string(),
                        "garden".to_string(),
                    ],
                ),
            ],
        }
    }

    /// All category names
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Subcategories of a category, if it exists
    pub fn subcategories(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, subs)| subs.as_slice())
    }

    /// Whether a subcategory belongs to a category
    pub fn is_valid_subcategory(&self, category: &str, subcategory: &str) -> bool {
        self.subcategories(category)
            .map(|subs| subs.iter().any(|s| s == subcategory))
            .unwrap_or(false)
    }
}

impl Default for PhotoCatalog {
    fn default() -> Self {
        Self::new("hostel_photos")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_categories() {
        let catalog = PhotoCatalog::default();
        assert_eq!(
            catalog.category_names(),
            vec!["rooms", "mess", "facilities", "exterior"]
        );
        assert_eq!(
            catalog.subcategories("exterior").unwrap(),
            &["building", "entrance", "garden"]
        );
        assert!(catalog.subcategories("library").is_none());
    }

    #[test]
    fn test_subcategory_validation() {
        let catalog = PhotoCatalog::default();
        assert!(catalog.is_valid_subcategory("mess", "dining"));
        assert!(!catalog.is_valid_subcategory("mess", "sports"));
        assert!(!catalog.is_valid_subcategory("unknown", "dining"));
    }
}
