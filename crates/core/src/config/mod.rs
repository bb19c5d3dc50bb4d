pub mod generator_config;
pub mod sources;
pub mod validation;

pub use generator_config::*;
pub use sources::*;
pub use validation::*;
