use super::INDENT;
use blueprint_core::naming;
use blueprint_core::{
    CoreError, Entity, GeneratorConfig, RelationshipKind, RelationshipRef, ResourceStatement,
    SchemaTree, DEFAULT_EXCLUSIONS,
};

/// Columns appended after fields and relationships, in this order
const TIMESTAMPS: [&str; 2] = ["updated_at", "created_at"];
const SOFT_DELETE_COLUMN: &str = "deleted_at";
/// Implicit on every entity, never enumerated
const ID_COLUMN: &str = "id";

/// Builds the `toArray` body of an API resource class.
///
/// Single resources enumerate the visible fields of their entity, then every
/// resolvable relationship, then the timestamp columns. Collection resources
/// pass the wrapped collection through untouched.
pub struct ResourceBodyBuilder<'a> {
    tree: &'a SchemaTree,
    config: &'a GeneratorConfig,
}

impl<'a> ResourceBodyBuilder<'a> {
    pub fn new(tree: &'a SchemaTree, config: &'a GeneratorConfig) -> Self {
        Self { tree, config }
    }

    /// Fails with a resolution error when a single resource's reference names
    /// no entity in the tree.
    pub fn build(&self, statement: &ResourceStatement) -> Result<String, CoreError> {
        if statement.collection {
            return Ok(self.collection_body(statement));
        }

        let context = naming::singularize(&statement.reference);
        let entity = self
            .tree
            .require_entity(&context, &format!("resource {}", statement.name()))?;

        let mut lines = vec!["return [".to_string()];

        for field in self.tree.fields_excluding(entity, DEFAULT_EXCLUSIONS) {
            if field.name == ID_COLUMN {
                continue;
            }
            lines.push(self.column_line(&field.name));
        }

        lines.extend(self.relationship_lines(entity));

        for column in TIMESTAMPS {
            lines.push(self.column_line(column));
        }
        if entity.uses_soft_deletes() {
            lines.push(self.column_line(SOFT_DELETE_COLUMN));
        }

        lines.push("        ];".to_string());

        Ok(lines.join("\n"))
    }

    fn collection_body(&self, statement: &ResourceStatement) -> String {
        [
            "return $this->collection->toArray();".to_string(),
            "//      return [".to_string(),
            format!("//{}'{}' => $this->collection,", INDENT, statement.reference),
            "//      ];".to_string(),
        ]
        .join("\n")
    }

    fn column_line(&self, column: &str) -> String {
        let accessor = if self.config.when_not_null {
            format!("$this->whenNotNull($this->{})", column)
        } else {
            format!("$this->{}", column)
        };

        format!("{}'{}' => {},", INDENT, column, accessor)
    }

    fn relationship_lines(&self, entity: &Entity) -> Vec<String> {
        let mut lines = Vec::new();

        for (kind, references) in self.tree.relationships_by_kind(entity) {
            for reference in references {
                if let Some(line) = self.relationship_line(entity, kind, reference) {
                    lines.push(line);
                }
            }
        }

        lines
    }

    fn relationship_line(
        &self,
        entity: &Entity,
        kind: &RelationshipKind,
        reference: &RelationshipRef,
    ) -> Option<String> {
        let method = reference.method_name();

        let Some(related) = self.tree.entity_for_context(&method, false) else {
            tracing::debug!(
                entity = %entity.name,
                kind = %kind,
                reference = %reference,
                "Dropping relationship to unknown model"
            );
            return None;
        };

        let (key, resource) = if kind.is_collection() {
            (naming::pluralize(&method), format!("{}Collection", related.class_name()))
        } else {
            (method, format!("{}Resource", related.class_name()))
        };
        let key = reference.alias.clone().unwrap_or(key);

        Some(format!(
            "{}'{}' => {}::make($this->whenLoaded('{}')),",
            INDENT, key, resource, key
        ))
    }
}
