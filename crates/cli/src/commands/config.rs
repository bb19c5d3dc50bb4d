use blueprint_core::{ConfigSource, ConfigTrait, CoreError, GeneratorConfig};
use clap::Args;
use console::style;
use std::path::PathBuf;

/// Configuration display arguments
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Configuration file (defaults to blueprint.yaml in the current directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: ConfigArgs) -> Result<(), CoreError> {
    let root = std::env::current_dir()?;
    let config = GeneratorConfig::load(&root, args.config.as_deref())?;

    println!("{}", style("Resolved configuration:").bold());
    for (name, value, source) in rows(&config) {
        println!(
            "  {:<18} {:<28} {}",
            style(name).cyan(),
            value,
            style(format!("({})", source)).dim()
        );
    }

    Ok(())
}

/// `(option, value, source)` for every recognised option
pub fn rows(config: &GeneratorConfig) -> Vec<(&'static str, String, String)> {
    let sources = config.config_sources();
    let source = |name: &str| {
        sources
            .get(name)
            .map(ConfigSource::description)
            .unwrap_or_else(|| "unknown".to_string())
    };

    vec![
        ("namespace", config.namespace.clone(), source("namespace")),
        (
            "models_namespace",
            config.model_namespace(),
            source("models_namespace"),
        ),
        (
            "when_not_null",
            config.when_not_null.to_string(),
            source("when_not_null"),
        ),
        (
            "app_path",
            config.app_path.display().to_string(),
            source("app_path"),
        ),
        (
            "factory_path",
            config.factory_path.display().to_string(),
            source("factory_path"),
        ),
        (
            "stubs_path",
            config
                .stubs_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
            source("stubs_path"),
        ),
    ]
}
