/// Blueprint compilation against the connector catalog
pub mod compiler;
/// Immutable module definitions and their builder
pub mod definition;
/// Name-indexed module collections
pub mod library;
/// Rotated and mirrored module instances
pub mod oriented;

pub use compiler::{ModuleBlueprint, ModuleCompiler};
pub use definition::{FaceTable, ModuleDefinition, Spawnable, uniform_faces};
pub use library::{ModuleId, ModuleLibrary};
pub use oriented::OrientedModule;
