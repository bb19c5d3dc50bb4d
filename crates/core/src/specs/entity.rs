use crate::naming;
use crate::specs::ordered;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Column type of an entity field.
///
/// Parsing is forgiving: names are case-insensitive, `_` is ignored, column
/// arguments (`string:400`) and trailing modifiers (`nullable`) are dropped,
/// and anything unrecognised is kept verbatim as [`DataType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Id,
    String,
    Text,
    Date,
    Time,
    DateTime,
    DateTimeTz,
    Timestamp,
    Integer,
    BigInteger,
    SmallInteger,
    Decimal,
    Float,
    Boolean,
    Guid,
    Uuid,
    Json,
    Other(String),
}

impl DataType {
    /// Canonical lower-case name, used as the key of type-based lookups
    pub fn as_str(&self) -> &str {
        match self {
            DataType::Id => "id",
            DataType::String => "string",
            DataType::Text => "text",
            DataType::Date => "date",
            DataType::Time => "time",
            DataType::DateTime => "datetime",
            DataType::DateTimeTz => "datetimetz",
            DataType::Timestamp => "timestamp",
            DataType::Integer => "integer",
            DataType::BigInteger => "bigint",
            DataType::SmallInteger => "smallint",
            DataType::Decimal => "decimal",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
            DataType::Guid => "guid",
            DataType::Uuid => "uuid",
            DataType::Json => "json",
            DataType::Other(name) => name,
        }
    }
}

impl FromStr for DataType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.split_whitespace().next().unwrap_or_default();
        let token = token.split(':').next().unwrap_or_default();
        let normalized = token.replace('_', "").to_lowercase();

        Ok(match normalized.as_str() {
            "id" | "foreignid" => DataType::Id,
            "string" | "char" | "varchar" => DataType::String,
            "text" | "mediumtext" | "longtext" => DataType::Text,
            "date" => DataType::Date,
            "time" | "timetz" => DataType::Time,
            "datetime" => DataType::DateTime,
            "datetimetz" => DataType::DateTimeTz,
            "timestamp" | "timestamptz" => DataType::Timestamp,
            "integer" | "int" | "unsignedinteger" | "mediuminteger" => DataType::Integer,
            "bigint" | "biginteger" | "unsignedbiginteger" => DataType::BigInteger,
            "smallint" | "smallinteger" | "tinyinteger" | "unsignedsmallinteger" => {
                DataType::SmallInteger
            }
            "decimal" | "unsigneddecimal" => DataType::Decimal,
            "float" | "double" => DataType::Float,
            "boolean" | "bool" => DataType::Boolean,
            "guid" => DataType::Guid,
            "uuid" | "foreignuuid" => DataType::Uuid,
            "json" | "jsonb" => DataType::Json,
            _ => DataType::Other(normalized),
        })
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(DataType::Other(raw)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Kind of an Eloquent-style association.
///
/// Kinds outside the known set are kept as [`RelationshipKind::Other`] and
/// render as singular references.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    HasOne,
    HasMany,
    HasManyThrough,
    BelongsTo,
    BelongsToMany,
    MorphOne,
    MorphMany,
    MorphTo,
    MorphToMany,
    MorphedByMany,
    Other(String),
}

impl RelationshipKind {
    /// Whether the related side is represented as a collection
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            RelationshipKind::HasMany
                | RelationshipKind::HasManyThrough
                | RelationshipKind::BelongsToMany
                | RelationshipKind::MorphMany
                | RelationshipKind::MorphToMany
                | RelationshipKind::MorphedByMany
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            RelationshipKind::HasOne => "hasOne",
            RelationshipKind::HasMany => "hasMany",
            RelationshipKind::HasManyThrough => "hasManyThrough",
            RelationshipKind::BelongsTo => "belongsTo",
            RelationshipKind::BelongsToMany => "belongsToMany",
            RelationshipKind::MorphOne => "morphOne",
            RelationshipKind::MorphMany => "morphMany",
            RelationshipKind::MorphTo => "morphTo",
            RelationshipKind::MorphToMany => "morphToMany",
            RelationshipKind::MorphedByMany => "morphedByMany",
            RelationshipKind::Other(name) => name,
        }
    }
}

impl FromStr for RelationshipKind {
    type Err = std::convert::Infallible;

    /// Accepts camelCase and snake_case spellings (`belongsToMany`, `belongs_to_many`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.replace('_', "").to_lowercase().as_str() {
            "hasone" => RelationshipKind::HasOne,
            "hasmany" => RelationshipKind::HasMany,
            "hasmanythrough" => RelationshipKind::HasManyThrough,
            "belongsto" => RelationshipKind::BelongsTo,
            "belongstomany" => RelationshipKind::BelongsToMany,
            "morphone" => RelationshipKind::MorphOne,
            "morphmany" => RelationshipKind::MorphMany,
            "morphto" => RelationshipKind::MorphTo,
            "morphtomany" => RelationshipKind::MorphToMany,
            "morphedbymany" => RelationshipKind::MorphedByMany,
            _ => RelationshipKind::Other(s.to_string()),
        })
    }
}

impl<'de> Deserialize<'de> for RelationshipKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(RelationshipKind::Other(raw)))
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a related entity, written `Target` or `Target:alias`.
///
/// `target` may be namespaced (`App\Models\Comment`); it is resolved lazily
/// against the tree and may dangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipRef {
    pub target: String,
    pub alias: Option<String>,
}

impl RelationshipRef {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Accessor name derived from the target (`App\Models\Comment` -> `comment`)
    pub fn method_name(&self) -> String {
        naming::method_name_from_relationship(&self.target)
    }
}

impl FromStr for RelationshipRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.split_once(':') {
            Some((target, alias)) if !alias.trim().is_empty() => {
                RelationshipRef::new(target.trim()).with_alias(alias.trim())
            }
            Some((target, _)) => RelationshipRef::new(target.trim()),
            None => RelationshipRef::new(s),
        })
    }
}

impl fmt::Display for RelationshipRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{}:{}", self.target, alias),
            None => f.write_str(&self.target),
        }
    }
}

/// Relationship refs of one kind, in declaration order
pub type RelationshipGroup = (RelationshipKind, Vec<RelationshipRef>);

/// A model: its fields and associations
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_fields")]
    pub fields: Vec<Field>,
    #[serde(default, deserialize_with = "deserialize_relationships")]
    pub relationships: Vec<RelationshipGroup>,
    #[serde(default, alias = "softDeletes", alias = "uses_soft_deletes")]
    pub soft_deletes: bool,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            relationships: Vec::new(),
            soft_deletes: false,
        }
    }

    pub fn with_field(mut self, name: &str, data_type: DataType) -> Self {
        self.fields.push(Field::new(name, data_type));
        self
    }

    /// Add a relationship, appending to an existing group of the same kind
    pub fn with_relationship(mut self, kind: RelationshipKind, reference: RelationshipRef) -> Self {
        match self.relationships.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, refs)) => refs.push(reference),
            None => self.relationships.push((kind, vec![reference])),
        }
        self
    }

    pub fn with_soft_deletes(mut self) -> Self {
        self.soft_deletes = true;
        self
    }

    /// Class name without namespace, e.g. `Post` for `Blog\Post`
    pub fn class_name(&self) -> String {
        naming::class_name_from_reference(&self.name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn uses_soft_deletes(&self) -> bool {
        self.soft_deletes
    }
}

fn deserialize_fields<'de, D>(deserializer: D) -> Result<Vec<Field>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<(String, DataType)> = ordered::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|(name, data_type)| Field { name, data_type })
        .collect())
}

#[derive(Deserialize)]
struct RefList(#[serde(deserialize_with = "ordered::deserialize_list")] Vec<String>);

fn deserialize_relationships<'de, D>(deserializer: D) -> Result<Vec<RelationshipGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<(RelationshipKind, RefList)> = ordered::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|(kind, RefList(refs))| {
            let refs = refs
                .iter()
                .map(|r| r.parse().unwrap_or_else(|_| RelationshipRef::new(r.as_str())))
                .collect();
            (kind, refs)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_parsing() {
        assert_eq!("string".parse::<DataType>().unwrap(), DataType::String);
        assert_eq!("string:400 nullable".parse::<DataType>().unwrap(), DataType::String);
        assert_eq!("bigInteger".parse::<DataType>().unwrap(), DataType::BigInteger);
        assert_eq!("unsigned_big_integer".parse::<DataType>().unwrap(), DataType::BigInteger);
        assert_eq!("dateTimeTz".parse::<DataType>().unwrap(), DataType::DateTimeTz);
        assert_eq!(
            "geometry".parse::<DataType>().unwrap(),
            DataType::Other("geometry".to_string())
        );
        assert_eq!(DataType::BigInteger.as_str(), "bigint");
    }

    #[test]
    fn test_relationship_ref_parsing() {
        let plain: RelationshipRef = "App\\Models\\Comment".parse().unwrap();
        assert_eq!(plain.target, "App\\Models\\Comment");
        assert_eq!(plain.alias, None);
        assert_eq!(plain.method_name(), "comment");

        let aliased: RelationshipRef = "User:lead".parse().unwrap();
        assert_eq!(aliased.target, "User");
        assert_eq!(aliased.alias.as_deref(), Some("lead"));
        assert_eq!(aliased.to_string(), "User:lead");
    }

    #[test]
    fn test_collection_kinds() {
        assert!(RelationshipKind::HasMany.is_collection());
        assert!(RelationshipKind::BelongsToMany.is_collection());
        assert!(RelationshipKind::MorphMany.is_collection());
        assert!(!RelationshipKind::HasOne.is_collection());
        assert!(!RelationshipKind::BelongsTo.is_collection());
        assert!(!RelationshipKind::MorphTo.is_collection());
        assert!(RelationshipKind::MorphToMany.is_collection());
        assert!(RelationshipKind::MorphedByMany.is_collection());
    }

    #[test]
    fn test_unknown_relationship_kind_is_kept() {
        let yaml = r#"
name: Post
relationships:
  morph_to_many: Tag
  hasOneThrough: Owner
"#;
        let entity: Entity = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(entity.relationships[0].0, RelationshipKind::MorphToMany);
        let other = &entity.relationships[1].0;
        assert_eq!(other, &RelationshipKind::Other("hasOneThrough".to_string()));
        assert_eq!(other.to_string(), "hasOneThrough");
        assert!(!other.is_collection());
    }

    #[test]
    fn test_entity_from_yaml_keeps_declaration_order() {
        let yaml = r#"
name: Post
soft_deletes: true
fields:
  title: string:400
  body: longtext
  published_at: timestamp nullable
relationships:
  hasMany: Comment, Tag
  belongsTo: [User:author]
"#;
        let entity: Entity = serde_yaml::from_str(yaml).unwrap();

        let names: Vec<_> = entity.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title", "body", "published_at"]);
        assert_eq!(entity.fields[1].data_type, DataType::Text);
        assert!(entity.uses_soft_deletes());

        assert_eq!(entity.relationships.len(), 2);
        assert_eq!(entity.relationships[0].0, RelationshipKind::HasMany);
        assert_eq!(
            entity.relationships[0].1,
            vec![RelationshipRef::new("Comment"), RelationshipRef::new("Tag")]
        );
        assert_eq!(entity.relationships[1].0, RelationshipKind::BelongsTo);
        assert_eq!(entity.relationships[1].1[0].alias.as_deref(), Some("author"));
    }

    #[test]
    fn test_duplicate_field_is_rejected() {
        let yaml = "name: Post\nfields:\n  title: string\n  title: text\n";
        let result: Result<Entity, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_groups_relationships_by_kind() {
        let entity = Entity::new("Post")
            .with_relationship(RelationshipKind::HasMany, RelationshipRef::new("Comment"))
            .with_relationship(RelationshipKind::BelongsTo, RelationshipRef::new("User"))
            .with_relationship(RelationshipKind::HasMany, RelationshipRef::new("Tag"));

        assert_eq!(entity.relationships.len(), 2);
        assert_eq!(entity.relationships[0].1.len(), 2);
    }
}
