use crate::writer::Filesystem;
use blueprint_core::CoreError;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Replace every occurrence of each token, one substitution at a time and in
/// the given order. A value containing a later token is substituted again by
/// that later pass.
pub fn render_stub<S: AsRef<str>>(template: &str, tokens: &[(&str, S)]) -> String {
    let mut result = template.to_string();

    for (token, value) in tokens {
        result = result.replace(token, value.as_ref());
    }

    result
}

pub mod tokens {
    pub const NAMESPACE: &str = "{{ namespace }}";
    pub const IMPORTS: &str = "{{ imports }}";
    pub const PARENT_CLASS: &str = "{{ parentClass }}";
    pub const CLASS: &str = "{{ class }}";
    pub const COLLECTION_WRAP: &str = "{{ collectionWrap }}";
    pub const RESOURCE: &str = "{{ resource }}";
    pub const BODY: &str = "{{ body }}";
    pub const MODEL_NAMESPACE: &str = "{{ modelNamespace }}";
    pub const MODEL: &str = "{{ model }}";
    pub const DEFINITION: &str = "{{ definition }}";
}

/// Kind of artifact a generator produces; each has its own stub
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactKind {
    Resource,
    Factory,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 2] = [ArtifactKind::Resource, ArtifactKind::Factory];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Resource => "resource",
            ArtifactKind::Factory => "factory",
        }
    }

    /// File name of the stub override for this kind
    pub fn stub_file(&self) -> String {
        format!("{}.stub", self.as_str())
    }

    pub fn default_stub(&self) -> &'static str {
        match self {
            ArtifactKind::Resource => RESOURCE_STUB,
            ArtifactKind::Factory => FACTORY_STUB,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "resource" | "resources" => Ok(ArtifactKind::Resource),
            "factory" | "factories" => Ok(ArtifactKind::Factory),
            other => Err(CoreError::validation(format!(
                "Unknown artifact kind '{}', expected one of: resource, factory",
                other
            ))),
        }
    }
}

/// Stub text per artifact kind
#[derive(Debug, Clone)]
pub struct StubSet {
    stubs: BTreeMap<ArtifactKind, String>,
}

impl StubSet {
    /// Built-in stubs for every kind
    pub fn defaults() -> Self {
        let stubs = ArtifactKind::ALL
            .iter()
            .map(|kind| (*kind, kind.default_stub().to_string()))
            .collect();
        Self { stubs }
    }

    /// Defaults, overridden by `<dir>/<kind>.stub` where such a file exists
    pub fn load(fs: &dyn Filesystem, dir: &Path) -> Result<Self, CoreError> {
        let mut set = Self::defaults();

        for kind in ArtifactKind::ALL {
            let path = dir.join(kind.stub_file());
            if fs.exists(&path) {
                tracing::debug!(kind = %kind, path = %path.display(), "Using stub override");
                set.stubs.insert(kind, fs.read(&path)?);
            }
        }

        Ok(set)
    }

    pub fn with_stub(mut self, kind: ArtifactKind, stub: impl Into<String>) -> Self {
        self.stubs.insert(kind, stub.into());
        self
    }

    pub fn get(&self, kind: ArtifactKind) -> &str {
        self.stubs
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_stub())
    }
}

impl Default for StubSet {
    fn default() -> Self {
        Self::defaults()
    }
}

pub static RESOURCE_STUB: &str = r#"<?php

namespace {{ namespace }};

{{ imports }}

class {{ class }} extends {{ parentClass }}
{
    {{ collectionWrap }}

    /**
     * Transform the {{ resource }} into an array.
     */
    public function toArray(Request $request): array
    {
        {{ body }}
    }
}
"#;

pub static FACTORY_STUB: &str = r#"<?php

namespace {{ namespace }};

use Illuminate\Database\Eloquent\Factories\Factory;
use {{ modelNamespace }};

class {{ model }}Factory extends Factory
{
    /**
     * The name of the factory's corresponding model.
     *
     * @var string
     */
    protected $model = {{ model }}::class;

    /**
     * Define the model's default state.
     */
    public function definition(): array
    {
        $faker = $this->faker;

        return [
            {{ definition }}
        ];
    }
}
"#;
