//! Fragment builders: compute the text substituted into a stub's body token.

pub mod factory;
pub mod resource;

pub use factory::FactoryDefinitionBuilder;
pub use resource::ResourceBodyBuilder;

/// Indentation of entries inside a generated PHP array literal
pub const INDENT: &str = "            ";
