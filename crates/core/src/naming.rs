//! Noun inflection and identifier case conversion.
//!
//! Everything here is pure and total: malformed input (an empty string) comes
//! back unchanged instead of failing.

use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that separate namespace segments in a class reference
const NAMESPACE_SEPARATORS: &[char] = &['\\', '/', '.'];

static UNCOUNTABLE: &[&str] = &[
    "audio",
    "data",
    "equipment",
    "feedback",
    "fish",
    "information",
    "jeans",
    "metadata",
    "money",
    "news",
    "police",
    "rice",
    "series",
    "sheep",
    "species",
];

/// (singular, plural)
static IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("move", "moves"),
    ("person", "people"),
    ("sex", "sexes"),
    ("tooth", "teeth"),
    ("woman", "women"),
    ("zombie", "zombies"),
];

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn rules(table: &[(&str, &'static str)]) -> Vec<Rule> {
    table
        .iter()
        .map(|(pattern, replacement)| Rule {
            pattern: Regex::new(&format!("(?i){}", pattern)).expect("inflection rule is a valid regex"),
            replacement,
        })
        .collect()
}

// First match wins.
static PLURAL_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    rules(&[
        (r"(quiz)$", "${1}zes"),
        (r"^(oxen)$", "${1}"),
        (r"^(ox)$", "${1}en"),
        (r"^(m|l)ice$", "${1}ice"),
        (r"^(m|l)ouse$", "${1}ice"),
        (r"(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
        (r"(x|ch|ss|sh)$", "${1}es"),
        (r"([^aeiouy]|qu)y$", "${1}ies"),
        (r"(hive)$", "${1}s"),
        (r"(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        (r"sis$", "ses"),
        (r"([ti])a$", "${1}a"),
        (r"([ti])um$", "${1}a"),
        (r"(buffal|tomat)o$", "${1}oes"),
        (r"(bu)s$", "${1}ses"),
        (r"(alias|status)$", "${1}es"),
        (r"(octop|vir)i$", "${1}i"),
        (r"(octop|vir)us$", "${1}i"),
        (r"^(ax|test)is$", "${1}es"),
        (r"s$", "s"),
        (r"$", "s"),
    ])
});

static SINGULAR_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    rules(&[
        (r"(database)s$", "${1}"),
        (r"(quiz)zes$", "${1}"),
        (r"(matr)ices$", "${1}ix"),
        (r"(vert|ind)ices$", "${1}ex"),
        (r"^(ox)en$", "${1}"),
        (r"(alias|status)(es)?$", "${1}"),
        (r"(octop|vir)uses$", "${1}us"),
        (r"(octop|vir)(us|i)$", "${1}us"),
        (r"^(a)x[ie]s$", "${1}xis"),
        (r"(cris|test)(is|es)$", "${1}is"),
        (r"(shoe)s$", "${1}"),
        (r"(o)es$", "${1}"),
        (r"(bus)(es)?$", "${1}"),
        (r"^(m|l)ice$", "${1}ouse"),
        (r"(cache|niche)s$", "${1}"),
        (r"(x|ch|ss|sh)es$", "${1}"),
        (r"(m)ovies$", "${1}ovie"),
        (r"([^aeiouy]|qu)ies$", "${1}y"),
        (r"([lr])ves$", "${1}f"),
        (r"(tive)s$", "${1}"),
        (r"(hive)s$", "${1}"),
        (r"([^f])ves$", "${1}fe"),
        (r"(^analy)(sis|ses)$", "${1}sis"),
        (r"((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$", "${1}sis"),
        (r"([ti])a$", "${1}um"),
        (r"(ss)$", "${1}"),
        (r"(us)$", "${1}"),
        (r"s$", ""),
    ])
});

/// Byte offset where the last word of `word` starts: after the last `_`,
/// space or `-`, or at the last upper-case letter of a StudlyCased compound.
fn last_word_start(word: &str) -> usize {
    let after_separator = word
        .rfind(|c: char| c == '_' || c == ' ' || c == '-')
        .map(|i| i + 1)
        .unwrap_or(0);

    word[after_separator..]
        .char_indices()
        .filter(|(i, c)| *i > 0 && c.is_uppercase())
        .map(|(i, _)| after_separator + i)
        .last()
        .unwrap_or(after_separator)
}

/// Copy the case of `template`'s first letter onto `word`
fn match_case(word: &str, template: &str) -> String {
    if template.chars().all(|c| !c.is_lowercase()) && template.chars().count() > 1 {
        return word.to_uppercase();
    }

    let mut chars = word.chars();
    match (template.chars().next(), chars.next()) {
        (Some(t), Some(first)) if t.is_uppercase() => {
            first.to_uppercase().collect::<String>() + chars.as_str()
        }
        _ => word.to_string(),
    }
}

fn inflect(word: &str, to_plural: bool) -> String {
    if word.is_empty() {
        return word.to_string();
    }

    let split = last_word_start(word);
    let (head, tail) = word.split_at(split);
    let lower = tail.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    for (singular, plural) in IRREGULAR {
        let (from, to) = if to_plural {
            (singular, plural)
        } else {
            (plural, singular)
        };
        if lower == *to {
            return word.to_string();
        }
        if lower == *from {
            return format!("{}{}", head, match_case(to, tail));
        }
    }

    let table = if to_plural { &PLURAL_RULES } else { &SINGULAR_RULES };
    for rule in table.iter() {
        if rule.pattern.is_match(tail) {
            let inflected = rule.pattern.replace(tail, rule.replacement);
            return format!("{}{}", head, inflected);
        }
    }

    word.to_string()
}

/// Singular form of an English noun phrase; singular input is returned as is.
pub fn singularize(word: &str) -> String {
    inflect(word, false)
}

/// Plural form of an English noun phrase; plural input is returned as is.
pub fn pluralize(word: &str) -> String {
    inflect(word, true)
}

pub fn to_snake_case(s: &str) -> String {
    s.to_snake_case()
}

pub fn to_studly_case(s: &str) -> String {
    s.to_upper_camel_case()
}

pub fn to_camel_case(s: &str) -> String {
    s.to_lower_camel_case()
}

/// Last segment of a namespaced reference such as `App\Models\Comment`
pub fn last_segment(reference: &str) -> &str {
    reference
        .rsplit(NAMESPACE_SEPARATORS)
        .find(|segment| !segment.is_empty())
        .unwrap_or(reference)
}

/// `App\Models\blog_post` -> `BlogPost`
pub fn class_name_from_reference(reference: &str) -> String {
    let segment = last_segment(reference);
    if segment.is_empty() {
        return reference.to_string();
    }
    to_studly_case(segment)
}

/// `App\Models\BlogPost` -> `blogPost`
pub fn method_name_from_relationship(reference: &str) -> String {
    let segment = last_segment(reference);
    if segment.is_empty() {
        return reference.to_string();
    }
    to_camel_case(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("comment"), "comments");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("class"), "classes");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("knife"), "knives");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("news"), "news");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("comments"), "comment");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("statuses"), "status");
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("analyses"), "analysis");
        assert_eq!(singularize("series"), "series");
        assert_eq!(singularize("caches"), "cache");
        assert_eq!(singularize("niches"), "niche");
        assert_eq!(singularize("viruses"), "virus");
        assert_eq!(singularize("octopi"), "octopus");
        assert_eq!(singularize("cache"), "cache");
    }

    #[test]
    fn test_inflection_is_idempotent() {
        for word in [
            "comment", "comments", "post", "status", "address", "category", "categories",
            "person", "people", "child", "box", "mouse", "analysis", "bus", "axis", "user",
        ] {
            let singular = singularize(word);
            assert_eq!(singularize(&singular), singular, "singularize({word})");
            let plural = pluralize(word);
            assert_eq!(pluralize(&plural), plural, "pluralize({word})");
        }
    }

    #[test]
    fn test_inflection_preserves_case_and_compounds() {
        assert_eq!(pluralize("Comment"), "Comments");
        assert_eq!(pluralize("BlogPost"), "BlogPosts");
        assert_eq!(pluralize("SalesPerson"), "SalesPeople");
        assert_eq!(singularize("BlogCategories"), "BlogCategory");
        assert_eq!(singularize("blog_posts"), "blog_post");
        assert_eq!(pluralize("Human"), "Humans");
    }

    #[test]
    fn test_empty_input_is_unchanged() {
        assert_eq!(singularize(""), "");
        assert_eq!(pluralize(""), "");
        assert_eq!(class_name_from_reference(""), "");
        assert_eq!(method_name_from_relationship(""), "");
    }

    #[test]
    fn test_case_conversion() {
        assert_eq!(to_snake_case("UserProfile"), "user_profile");
        assert_eq!(to_snake_case("firstName"), "first_name");
        assert_eq!(to_studly_case("user_profile"), "UserProfile");
        assert_eq!(to_camel_case("user_profile"), "userProfile");
    }

    #[test]
    fn test_reference_names() {
        assert_eq!(class_name_from_reference("App\\Models\\blog_post"), "BlogPost");
        assert_eq!(class_name_from_reference("Comment"), "Comment");
        assert_eq!(method_name_from_relationship("App\\Models\\ManyModel"), "manyModel");
        assert_eq!(method_name_from_relationship("Author"), "author");
    }
}
