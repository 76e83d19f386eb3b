//! Hostel photo lookup tool
//!
//! Lists photos from the on-disk library by category/subcategory. Unknown
//! categories produce an explanatory message rather than an error so the
//! reply can go straight back to the user.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use hostel_agent_config::PhotoCatalog;

use crate::mcp::{ContentBlock, Tool, ToolError, ToolOutput, ToolSchema};

const PHOTO_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// Photo library lookup
pub struct HostelPhotosTool {
    catalog: PhotoCatalog,
}

#[derive(Debug, Default, Deserialize)]
struct PhotoArgs {
    /// Absent means the whole library
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    subcategory: Option<String>,
}

impl HostelPhotosTool {
    pub fn new(catalog: PhotoCatalog) -> Self {
        Self { catalog }
    }

    /// Photos in one subcategory directory
    fn scan_dir(&self, category: &str, subcategory: &str) -> Vec<PathBuf> {
        let dir = Path::new(&self.catalog.root).join(category).join(subcategory);
        let Ok(entries) = std::fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| PHOTO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();
        paths
    }

    /// Photos for a category, optionally narrowed to a subcategory
    pub fn photos(&self, category: &str, subcategory: Option<&str>) -> Vec<PathBuf> {
        match subcategory {
            Some(sub) => self.scan_dir(category, sub),
            None => self
                .catalog
                .subcategories(category)
                .map(|subs| {
                    subs.iter()
                        .flat_map(|sub| self.scan_dir(category, sub))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Every photo in the library
    pub fn all_photos(&self) -> Vec<PathBuf> {
        self.catalog
            .category_names()
            .into_iter()
            .flat_map(|category| self.photos(category, None))
            .collect()
    }
}

#[async_trait]
impl Tool for HostelPhotosTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "hostel_photos".to_string(),
            description: "Get paths to hostel photos by category".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "enum": ["rooms", "mess", "facilities", "exterior"],
                        "description": "Photo category; omit for the whole library"
                    },
                    "subcategory": {
                        "type": "string",
                        "description": "Optional subcategory within the category"
                    }
                }
            }),
        }
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let args: PhotoArgs = if args.is_null() {
            PhotoArgs::default()
        } else {
            serde_json::from_value(args).map_err(|e| ToolError::InvalidInput(e.to_string()))?
        };

        let Some(category) = args.category else {
            let paths = self.all_photos();
            if paths.is_empty() {
                return Ok(ToolOutput::text("No photos available yet."));
            }
            let mut content = vec![ContentBlock::Text {
                text: format!("Found {} hostel photos.", paths.len()),
            }];
            content.extend(paths.into_iter().map(|path| ContentBlock::Image {
                path: path.to_string_lossy().into_owned(),
            }));
            return Ok(ToolOutput {
                content,
                is_error: false,
            });
        };

        if self.catalog.subcategories(&category).is_none() {
            return Ok(ToolOutput::error(format!(
                "Invalid category '{}'. Valid categories are: {:?}",
                category,
                self.catalog.category_names()
            )));
        }

        if let Some(ref sub) = args.subcategory {
            if !self.catalog.is_valid_subcategory(&category, sub) {
                return Ok(ToolOutput::error(format!(
                    "Invalid subcategory '{}' for category '{}'. Valid subcategories are: {:?}",
                    sub,
                    category,
                    self.catalog.subcategories(&category).unwrap_or(&[])
                )));
            }
        }

        let paths = self.photos(&category, args.subcategory.as_deref());
        if paths.is_empty() {
            return Ok(ToolOutput::text(format!(
                "No photos available for '{}' yet.",
                category
            )));
        }

        let mut content = vec![ContentBlock::Text {
            text: format!("Found {} photos of {}.", paths.len(), category),
        }];
        content.extend(paths.into_iter().map(|path| ContentBlock::Image {
            path: path.to_string_lossy().into_owned(),
        }));

        Ok(ToolOutput {
            content,
            is_error: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library_with_photos() -> (tempfile::TempDir, HostelPhotosTool) {
        let dir = tempfile::tempdir().unwrap();
        let rooms = dir.path().join("rooms").join("rooms");
        std::fs::create_dir_all(&rooms).unwrap();
        std::fs::write(rooms.join("single.jpg"), b"jpg").unwrap();
        std::fs::write(rooms.join("double.png"), b"png").unwrap();
        std::fs::write(rooms.join("notes.txt"), b"txt").unwrap();

        let catalog = PhotoCatalog::new(dir.path().to_string_lossy().into_owned());
        (dir, HostelPhotosTool::new(catalog))
    }

    #[test]
    fn test_scan_filters_extensions() {
        let (_dir, tool) = library_with_photos();
        let photos = tool.photos("rooms", None);
        assert_eq!(photos.len(), 2);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let (_dir, tool) = library_with_photos();
        assert!(tool.photos("mess", None).is_empty());
    }

    #[tokio::test]
    async fn test_execute_returns_image_blocks() {
        let (_dir, tool) = library_with_photos();
        let output = tool
            .execute(serde_json::json!({"category": "rooms"}))
            .await
            .unwrap();
        assert!(!output.is_error);
        assert_eq!(output.image_paths().len(), 2);
    }

    #[tokio::test]
    async fn test_execute_without_category_returns_everything() {
        let (_dir, tool) = library_with_photos();
        let output = tool.execute(serde_json::json!({})).await.unwrap();
        assert!(!output.is_error);
        assert_eq!(output.image_paths().len(), 2);
    }

    #[tokio::test]
    async fn test_execute_invalid_category() {
        let (_dir, tool) = library_with_photos();
        let output = tool
            .execute(serde_json::json!({"category": "library"}))
            .await
            .unwrap();
        assert!(output.is_error);
        assert!(output.text_content().contains("Invalid category"));
    }

    #[tokio::test]
    async fn test_execute_invalid_subcategory() {
        let (_dir, tool) = library_with_photos();
        let output = tool
            .execute(serde_json::json!({"category": "rooms", "subcategory": "dining"}))
            .await
            .unwrap();
        assert!(output.is_error);
    }
}
