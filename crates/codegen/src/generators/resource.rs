use super::{GenerationRun, Generator};
use crate::builders::ResourceBodyBuilder;
use crate::templates::{render_stub, tokens, ArtifactKind};
use blueprint_core::{ControllerSpec, CoreResult, GeneratorConfig, ResourceStatement, SchemaTree};
use std::path::PathBuf;

/// API resource classes for the `resource` statements of every controller
pub struct ResourceGenerator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ResourceGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// `{app}/Http/Resources/{Controller namespace}/{Name}.php`
    pub fn path(&self, controller: &ControllerSpec, statement: &ResourceStatement) -> PathBuf {
        let mut path = self.config.app_path.join("Http").join("Resources");
        if let Some(namespace) = controller.namespace() {
            for segment in namespace.split(['\\', '/']).filter(|s| !s.is_empty()) {
                path.push(segment);
            }
        }
        path.join(format!("{}.php", statement.name()))
    }

    pub fn populate_stub(
        &self,
        tree: &SchemaTree,
        stub: &str,
        controller: &ControllerSpec,
        statement: &ResourceStatement,
    ) -> CoreResult<String> {
        let body = ResourceBodyBuilder::new(tree, self.config).build(statement)?;

        let mut namespace = format!("{}\\Http\\Resources", self.config.namespace);
        if let Some(sub) = controller.namespace() {
            namespace.push('\\');
            namespace.push_str(&sub.replace('/', "\\"));
        }

        let parent_class = if statement.extends_collection() {
            "ResourceCollection"
        } else {
            "JsonResource"
        };
        let imports = format!(
            "use Illuminate\\Http\\Request;\nuse Illuminate\\Http\\Resources\\Json\\{};",
            parent_class
        );

        let (collection_wrap, resource) = if statement.collection {
            ("public static $wrap = null;", "resource collection")
        } else {
            ("", "resource")
        };

        Ok(render_stub(
            stub,
            &[
                (tokens::NAMESPACE, namespace),
                (tokens::IMPORTS, imports),
                (tokens::PARENT_CLASS, parent_class.to_string()),
                (tokens::CLASS, statement.name()),
                (tokens::COLLECTION_WRAP, collection_wrap.to_string()),
                (tokens::RESOURCE, resource.to_string()),
                (tokens::BODY, body),
            ],
        ))
    }
}

impl Generator for ResourceGenerator<'_> {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Resource
    }

    fn output(&self, tree: &SchemaTree, stub: &str, run: &mut GenerationRun<'_>) -> CoreResult<()> {
        for controller in tree.controllers() {
            for (method, statement) in controller.resource_statements() {
                let path = self.path(controller, statement);
                let subject = format!("resource {} ({}@{})", statement.name(), controller.name, method);

                run.emit(&subject, path, || {
                    self.populate_stub(tree, stub, controller, statement)
                })?;
            }
        }

        Ok(())
    }
}
