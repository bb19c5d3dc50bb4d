use crate::config::{ConfigError, ConfigSource, ConfigValidator, NamespaceValidator, PathValidator};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

pub const ENV_NAMESPACE: &str = "BLUEPRINT_NAMESPACE";
pub const ENV_MODELS_NAMESPACE: &str = "BLUEPRINT_MODELS_NAMESPACE";
pub const ENV_WHEN_NOT_NULL: &str = "BLUEPRINT_WHEN_NOT_NULL";
pub const ENV_APP_PATH: &str = "BLUEPRINT_APP_PATH";
pub const ENV_FACTORY_PATH: &str = "BLUEPRINT_FACTORY_PATH";
pub const ENV_STUBS_PATH: &str = "BLUEPRINT_STUBS_PATH";

/// File looked up in the project root when no explicit config file is given
pub const DEFAULT_CONFIG_FILE: &str = "blueprint.yaml";

/// Configuration trait for generator configuration
pub trait ConfigTrait: Sized {
    /// Load configuration from defaults and environment variables
    fn from_env() -> Result<Self, ConfigError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError>;

    /// Get configuration source information for debugging
    fn config_sources(&self) -> BTreeMap<String, ConfigSource>;
}

/// Options threaded explicitly through the generators.
///
/// Built once per run: defaults, then an optional `blueprint.yaml`, then
/// `BLUEPRINT_*` environment variables, then command line overrides.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Root namespace prefix for generated classes
    pub namespace: String,
    /// Namespace segment below `namespace` that holds model classes
    pub models_namespace: String,
    /// Wrap every field access in a null-guarding accessor
    pub when_not_null: bool,
    /// Application source root, relative to the project root
    pub app_path: PathBuf,
    /// Output directory for factories, relative to the project root
    pub factory_path: PathBuf,
    /// Directory holding stub overrides
    pub stubs_path: Option<PathBuf>,
    sources: BTreeMap<String, ConfigSource>,
}

/// Shape of `blueprint.yaml`; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub namespace: Option<String>,
    pub models_namespace: Option<String>,
    pub when_not_null: Option<bool>,
    pub app_path: Option<PathBuf>,
    pub factory_path: Option<PathBuf>,
    pub stubs_path: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Create a configuration holding only default values
    pub fn new() -> Self {
        let mut sources = BTreeMap::new();
        for (field, value) in [
            ("namespace", "App"),
            ("models_namespace", "Models"),
            ("when_not_null", "false"),
            ("app_path", "app"),
            ("factory_path", "database/factories"),
            ("stubs_path", "built-in stubs"),
        ] {
            sources.insert(field.to_string(), ConfigSource::Default(value.to_string()));
        }

        Self {
            namespace: "App".to_string(),
            models_namespace: "Models".to_string(),
            when_not_null: false,
            app_path: PathBuf::from("app"),
            factory_path: PathBuf::from("database/factories"),
            stubs_path: None,
            sources,
        }
    }

    /// Layer defaults, the config file (explicit, or `blueprint.yaml` under
    /// `project_root` when present) and the environment, then validate.
    pub fn load(project_root: &Path, config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::new();

        let file = match config_file {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let candidate = project_root.join(DEFAULT_CONFIG_FILE);
                candidate.exists().then_some(candidate)
            }
        };

        if let Some(path) = file {
            let content = std::fs::read_to_string(&path)?;
            config.merge_yaml(&content, &path.display().to_string())?;
        }

        config.apply_env_with(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Merge a YAML configuration document, recording `origin` as the source
    pub fn merge_yaml(&mut self, yaml: &str, origin: &str) -> Result<(), ConfigError> {
        let file: ConfigFile = if yaml.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        let source = || ConfigSource::File(origin.to_string());

        if let Some(namespace) = file.namespace {
            self.namespace = namespace;
            self.sources.insert("namespace".into(), source());
        }
        if let Some(models_namespace) = file.models_namespace {
            self.models_namespace = models_namespace;
            self.sources.insert("models_namespace".into(), source());
        }
        if let Some(when_not_null) = file.when_not_null {
            self.when_not_null = when_not_null;
            self.sources.insert("when_not_null".into(), source());
        }
        if let Some(app_path) = file.app_path {
            self.app_path = app_path;
            self.sources.insert("app_path".into(), source());
        }
        if let Some(factory_path) = file.factory_path {
            self.factory_path = factory_path;
            self.sources.insert("factory_path".into(), source());
        }
        if let Some(stubs_path) = file.stubs_path {
            self.stubs_path = Some(stubs_path);
            self.sources.insert("stubs_path".into(), source());
        }

        Ok(())
    }

    /// Apply `BLUEPRINT_*` variables resolved through `lookup`
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(namespace) = lookup(ENV_NAMESPACE) {
            self.namespace = namespace;
            self.sources.insert("namespace".into(), ConfigSource::EnvVar(ENV_NAMESPACE.into()));
        }

        if let Some(models_namespace) = lookup(ENV_MODELS_NAMESPACE) {
            self.models_namespace = models_namespace;
            self.sources.insert(
                "models_namespace".into(),
                ConfigSource::EnvVar(ENV_MODELS_NAMESPACE.into()),
            );
        }

        if let Some(raw) = lookup(ENV_WHEN_NOT_NULL) {
            self.when_not_null = parse_bool("when_not_null", &raw)?;
            self.sources.insert(
                "when_not_null".into(),
                ConfigSource::EnvVar(ENV_WHEN_NOT_NULL.into()),
            );
        }

        if let Some(app_path) = lookup(ENV_APP_PATH) {
            self.app_path = PathBuf::from(app_path);
            self.sources.insert("app_path".into(), ConfigSource::EnvVar(ENV_APP_PATH.into()));
        }

        if let Some(factory_path) = lookup(ENV_FACTORY_PATH) {
            self.factory_path = PathBuf::from(factory_path);
            self.sources.insert(
                "factory_path".into(),
                ConfigSource::EnvVar(ENV_FACTORY_PATH.into()),
            );
        }

        if let Some(stubs_path) = lookup(ENV_STUBS_PATH) {
            self.stubs_path = Some(PathBuf::from(stubs_path));
            self.sources.insert("stubs_path".into(), ConfigSource::EnvVar(ENV_STUBS_PATH.into()));
        }

        Ok(())
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self.sources.insert("namespace".into(), ConfigSource::Programmatic);
        self
    }

    pub fn with_when_not_null(mut self, when_not_null: bool) -> Self {
        self.when_not_null = when_not_null;
        self.sources.insert("when_not_null".into(), ConfigSource::Programmatic);
        self
    }

    pub fn with_stubs_path(mut self, stubs_path: impl Into<PathBuf>) -> Self {
        self.stubs_path = Some(stubs_path.into());
        self.sources.insert("stubs_path".into(), ConfigSource::Programmatic);
        self
    }

    /// Fully qualified namespace of the model classes, e.g. `App\Models`
    pub fn model_namespace(&self) -> String {
        if self.models_namespace.is_empty() {
            self.namespace.clone()
        } else {
            format!("{}\\{}", self.namespace, self.models_namespace)
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigTrait for GeneratorConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();
        config.apply_env_with(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        NamespaceValidator { field: "namespace" }.validate(self.namespace.as_str())?;

        if !self.models_namespace.is_empty() {
            NamespaceValidator {
                field: "models_namespace",
            }
            .validate(self.models_namespace.as_str())?;
        }

        PathValidator { field: "app_path" }.validate(&self.app_path)?;
        PathValidator {
            field: "factory_path",
        }
        .validate(&self.factory_path)?;

        Ok(())
    }

    fn config_sources(&self) -> BTreeMap<String, ConfigSource> {
        self.sources.clone()
    }
}

fn parse_bool(field: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::invalid_value(field, raw, "true or false")),
    }
}
