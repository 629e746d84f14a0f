//! Product template catalogue
//!
//! Templates live on disk, one directory each, with a `metadata.json`
//! describing the mockup and the supplier print area in canonical units.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::{CanonicalRect, PlacementType, PrintArea, TemplateSummary};

/// Template-related errors
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),
    #[error("Failed to load metadata: {0}")]
    MetadataLoad(String),
    #[error("Invalid print area for template {0}: {1:?}")]
    InvalidPrintArea(String, CanonicalRect),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Template metadata loaded from metadata.json
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TemplateMetadata {
    pub id: String,
    pub name: String,
    pub product_type: String,
    #[serde(default)]
    pub placement: PlacementType,
    pub mockup_url: String,
    /// Printable region in canonical units
    pub print_area: PrintArea,
}

impl TemplateMetadata {
    /// Print area must have a positive size and sit inside the canonical canvas
    pub fn validate(&self) -> Result<(), TemplateError> {
        let area = &self.print_area;
        if !area.is_finite() || area.width <= 0.0 || area.height <= 0.0 || !area.is_within_canvas() {
            return Err(TemplateError::InvalidPrintArea(self.id.clone(), *area));
        }
        Ok(())
    }
}

/// A loaded template
#[derive(Debug, Clone)]
pub struct Template {
    pub metadata: TemplateMetadata,
}

impl Template {
    /// Load a template from a directory
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let metadata_path = path.join("metadata.json");
        let metadata_str = std::fs::read_to_string(&metadata_path)?;
        let metadata: TemplateMetadata = serde_json::from_str(&metadata_str)?;
        metadata.validate()?;

        info!(
            id = %metadata.id,
            print_area = ?metadata.print_area,
            "Loaded template"
        );

        Ok(Template { metadata })
    }

    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            id: self.metadata.id.clone(),
            name: self.metadata.name.clone(),
            product_type: self.metadata.product_type.clone(),
            placement: self.metadata.placement.clone(),
            mockup_url: self.metadata.mockup_url.clone(),
        }
    }

    pub fn print_area(&self) -> PrintArea {
        self.metadata.print_area
    }
}

/// Manages all templates in memory
pub struct TemplateManager {
    templates: RwLock<HashMap<String, Arc<Template>>>,
    base_path: PathBuf,
}

impl TemplateManager {
    /// Create a new template manager
    pub fn new(base_path: &Path) -> Self {
        TemplateManager {
            templates: RwLock::new(HashMap::new()),
            base_path: base_path.to_path_buf(),
        }
    }

    /// Load all templates from the base directory
    pub async fn load_all(&self) -> Result<(), TemplateError> {
        let base_path = self.base_path.clone();

        // Spawn blocking task for file I/O
        let templates = tokio::task::spawn_blocking(move || {
            let mut loaded = HashMap::new();

            if !base_path.exists() {
                warn!("Templates directory does not exist: {}", base_path.display());
                return Ok(loaded);
            }

            for entry in std::fs::read_dir(&base_path)? {
                let path = entry?.path();
                if !path.is_dir() || !path.join("metadata.json").exists() {
                    continue;
                }

                match Template::load(&path) {
                    Ok(template) => {
                        let id = template.metadata.id.clone();
                        loaded.insert(id, Arc::new(template));
                    }
                    Err(e) => {
                        warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to load template"
                        );
                    }
                }
            }

            Ok::<_, TemplateError>(loaded)
        })
        .await
        .map_err(|e| TemplateError::MetadataLoad(format!("Task join error: {}", e)))??;

        *self.templates.write() = templates;

        Ok(())
    }

    /// Get a template by ID
    pub fn get(&self, id: &str) -> Option<Arc<Template>> {
        self.templates.read().get(id).cloned()
    }

    /// Get a template by ID or fail with `NotFound`
    pub fn require(&self, id: &str) -> Result<Arc<Template>, TemplateError> {
        self.get(id).ok_or_else(|| TemplateError::NotFound(id.to_string()))
    }

    /// Get the number of loaded templates
    pub fn template_count(&self) -> usize {
        self.templates.read().len()
    }

    /// All template metadata, sorted by ID
    pub fn list(&self) -> Vec<TemplateMetadata> {
        let mut all: Vec<TemplateMetadata> = self
            .templates
            .read()
            .values()
            .map(|t| t.metadata.clone())
            .collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_template(root: &Path, dir: &str, body: &str) {
        let path = root.join(dir);
        std::fs::create_dir_all(&path).unwrap();
        std::fs::write(path.join("metadata.json"), body).unwrap();
    }

    fn sample_metadata(id: &str) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "name": "Heavyweight Tee",
                "product_type": "tshirt",
                "placement": "front",
                "mockup_url": "https://cdn.example.com/{id}.png",
                "print_area": {{ "x": 1000, "y": 800, "width": 1000, "height": 1300 }}
            }}"#
        )
    }

    #[test]
    fn test_load_all_skips_invalid_templates() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "white_tee_front", &sample_metadata("white_tee_front"));
        write_template(dir.path(), "black_tee_front", &sample_metadata("black_tee_front"));
        write_template(dir.path(), "broken", "{ not json");
        write_template(
            dir.path(),
            "off_canvas",
            r#"{
                "id": "off_canvas",
                "name": "Off Canvas",
                "product_type": "tshirt",
                "mockup_url": "https://cdn.example.com/off.png",
                "print_area": { "x": 2500, "y": 0, "width": 1000, "height": 1000 }
            }"#,
        );
        std::fs::write(dir.path().join("README.txt"), "not a template").unwrap();

        let manager = TemplateManager::new(dir.path());
        tokio_test::block_on(manager.load_all()).unwrap();

        assert_eq!(manager.template_count(), 2);
        let ids: Vec<String> = manager.list().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["black_tee_front", "white_tee_front"]);

        let template = manager.require("white_tee_front").unwrap();
        assert_eq!(template.print_area(), CanonicalRect::new(1000.0, 800.0, 1000.0, 1300.0));
        assert_eq!(template.summary().placement, PlacementType::Front);
        assert!(matches!(manager.require("off_canvas"), Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_missing_directory_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let manager = TemplateManager::new(&dir.path().join("does-not-exist"));
        tokio_test::block_on(manager.load_all()).unwrap();
        assert_eq!(manager.template_count(), 0);
    }

    #[test]
    fn test_validate_rejects_empty_area() {
        let metadata = TemplateMetadata {
            id: "flat".to_string(),
            name: "Flat".to_string(),
            product_type: "poster".to_string(),
            placement: PlacementType::Front,
            mockup_url: "https://cdn.example.com/flat.png".to_string(),
            print_area: CanonicalRect::new(0.0, 0.0, 0.0, 100.0),
        };
        assert!(matches!(metadata.validate(), Err(TemplateError::InvalidPrintArea(..))));
    }
}
