pub mod entity;
pub mod ordered;
pub mod statement;
pub mod tree;

pub use entity::*;
pub use statement::*;
pub use tree::*;
