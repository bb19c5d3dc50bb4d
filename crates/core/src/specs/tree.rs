use crate::errors::CoreError;
use crate::naming;
use crate::specs::{ControllerSpec, Entity, Field, RelationshipGroup};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Fields never surfaced in read-facing fragments
pub const DEFAULT_EXCLUSIONS: &[&str] = &["password", "remember_token"];

/// Read-only view over the entities and controllers of one generation run.
///
/// Entities are indexed once at construction by a normalised key (last
/// namespace segment, StudlyCase, singular, lower-cased) so that `posts`,
/// `Post` and `App\Models\Post` all resolve to the same entity.
#[derive(Debug, Clone, Default)]
pub struct SchemaTree {
    entities: Vec<Entity>,
    controllers: Vec<ControllerSpec>,
    index: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct RawTree {
    #[serde(default, alias = "entities")]
    models: Vec<Entity>,
    #[serde(default)]
    controllers: Vec<ControllerSpec>,
}

fn entity_key(name: &str) -> String {
    let segment = naming::last_segment(name.trim());
    naming::singularize(&naming::to_studly_case(segment)).to_lowercase()
}

/// Lower-cased namespace segments of a reference, class name excluded
fn namespace_segments(name: &str) -> Vec<String> {
    let mut segments: Vec<String> = name
        .split(['\\', '/', '.'])
        .filter(|segment| !segment.is_empty())
        .map(str::to_lowercase)
        .collect();
    segments.pop();
    segments
}

/// Two namespaces agree when either is unqualified or one ends with the other
fn namespaces_agree(left: &[String], right: &[String]) -> bool {
    left.is_empty() || right.is_empty() || left.ends_with(right) || right.ends_with(left)
}

impl SchemaTree {
    /// Build and validate a tree: entity keys and field names must be unique
    pub fn new(entities: Vec<Entity>, controllers: Vec<ControllerSpec>) -> Result<Self, CoreError> {
        let mut index = HashMap::with_capacity(entities.len());

        for (position, entity) in entities.iter().enumerate() {
            let key = entity_key(&entity.name);
            if key.is_empty() {
                return Err(CoreError::validation("Entity names must not be empty"));
            }

            if let Some(previous) = index.insert(key, position) {
                return Err(CoreError::validation(format!(
                    "Entities '{}' and '{}' resolve to the same model name",
                    entities[previous].name, entity.name
                )));
            }

            let mut seen = HashSet::new();
            for field in &entity.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(CoreError::validation(format!(
                        "Field '{}' is declared twice on entity '{}'",
                        field.name, entity.name
                    )));
                }
            }
        }

        tracing::debug!(
            entities = entities.len(),
            controllers = controllers.len(),
            "Schema tree indexed"
        );

        Ok(Self {
            entities,
            controllers,
            index,
        })
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, CoreError> {
        let raw: RawTree = serde_yaml::from_str(yaml)?;
        Self::new(raw.models, raw.controllers)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn controllers(&self) -> &[ControllerSpec] {
        &self.controllers
    }

    /// Look up an entity by a contextual name (`comments`, `Comment`,
    /// `App\Models\Comment`, `blogPost`), case-insensitively.
    ///
    /// Only the class name has to match. With `strict`, a namespace-qualified
    /// name must also agree with the namespace the entity was declared under
    /// (`Blog\Post` does not resolve to `Shop\Post`). A missing entity is
    /// `None`; a class name is never guessed from a partial match.
    pub fn entity_for_context(&self, name: &str, strict: bool) -> Option<&Entity> {
        let key = entity_key(name);
        if key.is_empty() {
            return None;
        }

        let entity = self.index.get(&key).and_then(|&position| self.entities.get(position))?;

        if strict && !namespaces_agree(&namespace_segments(&entity.name), &namespace_segments(name)) {
            return None;
        }

        Some(entity)
    }

    /// Strict lookup for a statement's primary subject
    pub fn require_entity(&self, name: &str, context: &str) -> Result<&Entity, CoreError> {
        self.entity_for_context(name, true)
            .ok_or_else(|| CoreError::resolution(naming::class_name_from_reference(name), context))
    }

    /// Fields in declaration order minus `excluded` names
    pub fn fields_excluding<'a>(&self, entity: &'a Entity, excluded: &[&str]) -> Vec<&'a Field> {
        entity
            .fields
            .iter()
            .filter(|field| !excluded.contains(&field.name.as_str()))
            .collect()
    }

    /// Relationship groups in declaration order
    pub fn relationships_by_kind<'a>(&self, entity: &'a Entity) -> &'a [RelationshipGroup] {
        &entity.relationships
    }
}
