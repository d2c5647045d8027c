//! Generator options. Every field has a default, so an empty `{}` config is
//! the stock VEGL program shape.
use std::path::Path;

use serde::Deserialize;

use crate::codegen::Layout;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratorOptions {
    pub bbox_class: String,
    pub params_class: String,
    /// name of the module-level parameter instance
    pub params_global: String,
    /// SRS code passed by `getSelectedBounds()`
    pub selection_srs: String,
    pub layout: Layout,
    /// reject class/field names that are not Python identifiers
    pub validate_identifiers: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            bbox_class: "VEGLBBox".to_string(),
            params_class: "VEGLParameters".to_string(),
            params_global: "VEGLParams".to_string(),
            selection_srs: "EPSG:4326".to_string(),
            layout: Layout::default(),
            validate_identifiers: false,
        }
    }
}

impl GeneratorOptions {
    pub fn from_json_str(src: &str) -> Result<Self> {
        crate::path_de::from_str_with_path(src)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|error| Error::Config {
            path: path.display().to_string(),
            message: error.to_string(),
        })?;
        Self::from_json_str(&src)
    }

    pub fn strict(mut self, on: bool) -> Self {
        self.validate_identifiers = on;
        self
    }
}
