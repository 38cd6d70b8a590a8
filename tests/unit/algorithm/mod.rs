pub mod extraction;
pub mod selection;
