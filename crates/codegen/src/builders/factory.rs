use super::INDENT;
use blueprint_core::naming;
use blueprint_core::{DataType, Entity, Field};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Faker formatter by field name; keys are snake_case
static FAKEABLE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("address1", "streetAddress"),
        ("address2", "secondaryAddress"),
        ("city", "city"),
        ("company", "company"),
        ("country", "country"),
        ("description", "text"),
        ("email", "safeEmail"),
        ("first_name", "firstName"),
        ("firstname", "firstName"),
        ("guid", "uuid"),
        ("last_name", "lastName"),
        ("lastname", "lastName"),
        ("lat", "latitude"),
        ("latitude", "latitude"),
        ("lng", "longitude"),
        ("longitude", "longitude"),
        ("name", "name"),
        ("password", "password"),
        ("phone", "phoneNumber"),
        ("phone_number", "phoneNumber"),
        ("postal_code", "postcode"),
        ("postcode", "postcode"),
        ("slug", "slug"),
        ("street", "streetName"),
        ("summary", "text"),
        ("title", "sentence(4)"),
        ("url", "url"),
        ("user_name", "userName"),
        ("username", "userName"),
        ("uuid", "uuid"),
        ("zip", "postcode"),
    ])
});

/// Faker formatter by column type, keyed by [`DataType::as_str`]
static FAKEABLE_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("string", "word"),
        ("text", "text"),
        ("date", "date()"),
        ("time", "time()"),
        ("guid", "word"),
        ("uuid", "uuid"),
        ("datetimetz", "dateTime()"),
        ("datetime", "dateTime()"),
        ("timestamp", "dateTime()"),
        ("integer", "randomNumber()"),
        ("bigint", "randomNumber()"),
        ("smallint", "randomNumber()"),
        ("decimal", "randomFloat()"),
        ("float", "randomFloat()"),
        ("boolean", "boolean"),
    ])
});

pub fn faker_for_name(name: &str) -> Option<&'static str> {
    FAKEABLE_NAMES.get(naming::to_snake_case(name).as_str()).copied()
}

pub fn faker_for_type(data_type: &DataType) -> Option<&'static str> {
    FAKEABLE_TYPES.get(data_type.as_str()).copied()
}

/// Builds the attribute array of a model factory's `definition()`
#[derive(Debug, Default)]
pub struct FactoryDefinitionBuilder;

impl FactoryDefinitionBuilder {
    pub fn new() -> Self {
        Self
    }

    /// One `'field' => $faker->formatter,` entry per fakeable field, `id`
    /// excluded. Fields with no formatter for either their name or their type
    /// are left out.
    pub fn build(&self, entity: &Entity) -> String {
        let entries: Vec<String> = entity
            .fields
            .iter()
            .filter(|field| field.name != "id")
            .filter_map(|field| self.entry(entity, field))
            .collect();

        entries.join(&format!("\n{}", INDENT))
    }

    fn entry(&self, entity: &Entity, field: &Field) -> Option<String> {
        let faker = faker_for_name(&field.name).or_else(|| faker_for_type(&field.data_type));

        match faker {
            Some(faker) => Some(format!("'{}' => $faker->{},", field.name, faker)),
            None => {
                tracing::debug!(
                    entity = %entity.name,
                    field = %field.name,
                    data_type = %field.data_type,
                    "No faker formatter for field"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_table_wins_over_type_table() {
        let entity = Entity::new("User")
            .with_field("id", DataType::Id)
            .with_field("email", DataType::String)
            .with_field("nickname", DataType::String)
            .with_field("age", DataType::Integer);

        let definition = FactoryDefinitionBuilder::new().build(&entity);
        assert_eq!(
            definition,
            "'email' => $faker->safeEmail,\n            'nickname' => $faker->word,\n            'age' => $faker->randomNumber(),"
        );
    }

    #[test]
    fn test_name_lookup_is_normalised() {
        assert_eq!(faker_for_name("firstName"), Some("firstName"));
        assert_eq!(faker_for_name("PhoneNumber"), Some("phoneNumber"));
        assert_eq!(faker_for_name("title"), Some("sentence(4)"));
        assert_eq!(faker_for_name("nickname"), None);
    }

    #[test]
    fn test_unknown_fields_are_omitted() {
        let entity = Entity::new("Place")
            .with_field("area", DataType::Other("geometry".to_string()))
            .with_field("user_id", DataType::Id)
            .with_field("published_at", DataType::Timestamp);

        let definition = FactoryDefinitionBuilder::new().build(&entity);
        assert_eq!(definition, "'published_at' => $faker->dateTime(),");
    }

    #[test]
    fn test_empty_entity_has_empty_definition() {
        assert_eq!(FactoryDefinitionBuilder::new().build(&Entity::new("Tag")), "");
    }
}
