//! JSON module files: blueprints plus optional manual placements

use crate::connector::ConnectorCatalog;
use crate::io::error::{AlgorithmError, Result};
use crate::io::prefill::{ManualPlacement, PrefillData};
use crate::module::{ModuleBlueprint, ModuleCompiler, ModuleLibrary};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of a module file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleFile {
    /// Module blueprints in library order
    pub modules: Vec<ModuleBlueprint>,
    /// Placements forced before solving
    #[serde(default)]
    pub overrides: Vec<ManualPlacement>,
}

impl ModuleFile {
    /// Read and parse a module file
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be read or `Json` if it is malformed
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read module file",
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| AlgorithmError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Compile the blueprints into a library against `catalog`
    ///
    /// # Errors
    ///
    /// Returns the first blueprint compilation error
    pub fn compile(&self, catalog: &mut ConnectorCatalog) -> Result<ModuleLibrary> {
        let library = ModuleCompiler::new(catalog).compile_all(&self.modules)?;
        info!(
            "compiled {} modules ({} horizontal, {} vertical shapes in catalog)",
            library.len(),
            catalog.horizontal_shape_count(),
            catalog.vertical_shape_count()
        );
        Ok(library)
    }

    /// Queue of the listed manual placements
    pub fn prefill(&self) -> PrefillData {
        PrefillData::new(self.overrides.iter().cloned())
    }
}
