use super::{GenerationRun, Generator};
use crate::builders::FactoryDefinitionBuilder;
use crate::templates::{render_stub, tokens, ArtifactKind};
use blueprint_core::{CoreResult, Entity, GeneratorConfig, SchemaTree};
use std::path::PathBuf;

pub const FACTORY_NAMESPACE: &str = "Database\\Factories";

/// One model factory per entity in the tree
pub struct FactoryGenerator<'a> {
    config: &'a GeneratorConfig,
    definitions: FactoryDefinitionBuilder,
}

impl<'a> FactoryGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            definitions: FactoryDefinitionBuilder::new(),
        }
    }

    pub fn path(&self, entity: &Entity) -> PathBuf {
        self.config
            .factory_path
            .join(format!("{}Factory.php", entity.class_name()))
    }

    pub fn populate_stub(&self, stub: &str, entity: &Entity) -> String {
        let model = entity.class_name();

        render_stub(
            stub,
            &[
                (tokens::NAMESPACE, FACTORY_NAMESPACE.to_string()),
                (
                    tokens::MODEL_NAMESPACE,
                    format!("{}\\{}", self.config.model_namespace(), model),
                ),
                (tokens::MODEL, model),
                (tokens::DEFINITION, self.definitions.build(entity)),
            ],
        )
    }
}

impl Generator for FactoryGenerator<'_> {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Factory
    }

    fn output(&self, tree: &SchemaTree, stub: &str, run: &mut GenerationRun<'_>) -> CoreResult<()> {
        for entity in tree.entities() {
            let subject = format!("factory {}Factory", entity.class_name());
            run.emit(&subject, self.path(entity), || Ok(self.populate_stub(stub, entity)))?;
        }

        Ok(())
    }
}
