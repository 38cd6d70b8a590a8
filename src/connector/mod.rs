/// Cross-section catalog assigning stable connector ids
pub mod catalog;
/// Face cross-sections and canonical keys
pub mod cross_section;
/// Connector identifiers and compatibility
pub mod id;

pub use catalog::ConnectorCatalog;
pub use cross_section::CrossSection;
pub use id::{BaseId, Connector, FlipClass, HorizontalForm, VerticalClass};
