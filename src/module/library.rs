//! Ordered, name-indexed collection of module definitions

use crate::io::error::{AlgorithmError, Result, invalid_module};
use crate::module::definition::ModuleDefinition;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Index of a definition inside its library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleId(usize);

impl ModuleId {
    /// Position in library order
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Module definitions in insertion order with unique names
#[derive(Debug, Clone, Default)]
pub struct ModuleLibrary {
    modules: Vec<ModuleDefinition>,
    by_name: HashMap<String, ModuleId>,
}

impl ModuleLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from definitions, keeping their order
    ///
    /// # Errors
    ///
    /// Returns an error if two definitions share a name
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ModuleDefinition>,
    ) -> Result<Self> {
        let mut library = Self::new();
        for definition in definitions {
            library.push(definition)?;
        }
        Ok(library)
    }

    /// Append a definition
    ///
    /// # Errors
    ///
    /// Returns an error if a definition with the same name is present
    pub fn push(&mut self, definition: ModuleDefinition) -> Result<ModuleId> {
        if self.by_name.contains_key(definition.name()) {
            return Err(invalid_module(
                definition.name(),
                &"a module with this name is already in the library",
            ));
        }
        let id = ModuleId(self.modules.len());
        self.by_name.insert(definition.name().to_string(), id);
        self.modules.push(definition);
        Ok(id)
    }

    /// Definition for an id
    pub fn get(&self, id: ModuleId) -> Option<&ModuleDefinition> {
        self.modules.get(id.0)
    }

    /// Id for a name
    pub fn find(&self, name: &str) -> Option<ModuleId> {
        self.by_name.get(name).copied()
    }

    /// Id for a name that must be present
    ///
    /// # Errors
    ///
    /// Returns `UnknownModule` if no definition has this name
    pub fn resolve(&self, name: &str) -> Result<ModuleId> {
        self.find(name).ok_or_else(|| AlgorithmError::UnknownModule {
            name: name.to_string(),
        })
    }

    /// Definitions with their ids in library order
    pub fn iter(&self) -> impl Iterator<Item = (ModuleId, &ModuleDefinition)> {
        self.modules
            .iter()
            .enumerate()
            .map(|(index, definition)| (ModuleId(index), definition))
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the library holds no definitions
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
