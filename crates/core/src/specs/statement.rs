use crate::naming;
use crate::specs::ordered;
use serde::Deserialize;

fn default_true() -> bool {
    true
}

/// Directive requesting an API resource class
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceStatement {
    /// Explicit class name; derived from `reference` when absent
    #[serde(default)]
    pub name: Option<String>,
    /// Entity the resource exposes, usually its plural name (`posts`)
    pub reference: String,
    #[serde(default)]
    pub collection: bool,
    #[serde(default = "default_true")]
    pub generate_collection_class: bool,
}

impl ResourceStatement {
    pub fn new(reference: impl Into<String>, collection: bool) -> Self {
        Self {
            name: None,
            reference: reference.into(),
            collection,
            generate_collection_class: true,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn without_collection_class(mut self) -> Self {
        self.generate_collection_class = false;
        self
    }

    /// Class name of the generated resource: `PostResource`, `PostCollection`
    pub fn name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }

        let model = naming::class_name_from_reference(&naming::singularize(&self.reference));
        if self.collection {
            format!("{}Collection", model)
        } else {
            format!("{}Resource", model)
        }
    }

    /// Whether the class should extend the collection base class
    pub fn extends_collection(&self) -> bool {
        self.collection && self.generate_collection_class
    }
}

/// One directive inside a controller method.
///
/// Only resource statements produce artifacts here; the remaining kinds
/// (`render`, `redirect`, `query`, ...) are carried by the tree for other
/// generators and parsed as [`Statement::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Resource(ResourceStatement),
    #[serde(other)]
    Other,
}

impl Statement {
    pub fn as_resource(&self) -> Option<&ResourceStatement> {
        match self {
            Statement::Resource(resource) => Some(resource),
            Statement::Other => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ControllerSpec {
    pub name: String,
    /// Sub-namespace, e.g. `Api` or `Admin\Api`
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default, deserialize_with = "ordered::deserialize")]
    pub methods: Vec<(String, Vec<Statement>)>,
}

impl ControllerSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            methods: Vec::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>, statements: Vec<Statement>) -> Self {
        self.methods.push((method.into(), statements));
        self
    }

    /// Namespace with surrounding separators removed; `None` when blank
    pub fn namespace(&self) -> Option<&str> {
        self.namespace
            .as_deref()
            .map(|ns| ns.trim_matches(|c| c == '\\' || c == '/'))
            .filter(|ns| !ns.is_empty())
    }

    /// Resource statements across all methods, in declaration order
    pub fn resource_statements(&self) -> impl Iterator<Item = (&str, &ResourceStatement)> {
        self.methods.iter().flat_map(|(method, statements)| {
            statements
                .iter()
                .filter_map(Statement::as_resource)
                .map(move |resource| (method.as_str(), resource))
        })
    }
}
