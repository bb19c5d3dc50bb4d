pub mod config;
pub mod errors;
pub mod naming;
pub mod specs;

pub use config::{ConfigError, ConfigSource, ConfigTrait, GeneratorConfig};
pub use errors::{CoreError, CoreResult};
pub use specs::{
    ControllerSpec, DataType, Entity, Field, RelationshipKind, RelationshipRef, ResourceStatement,
    SchemaTree, Statement, DEFAULT_EXCLUSIONS,
};

