use std::path::Path;

use anyhow::Context;
use config::{Environment, File, FileFormat};
use folio_models::{contact::ContactLink, Sensitive};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variables starting with `FOLIO__` override file values, e.g.
/// `FOLIO__CONTACT__ACCESS_KEY` sets `contact.access_key`.
pub const ENV_PREFIX: &str = "FOLIO";
const ENV_SEPARATOR: &str = "__";

pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_environment(
        paths,
        Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR),
    )
}

fn load_with_environment(
    paths: &[impl AsRef<Path>],
    environment: Environment,
) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(environment)
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub access_key: Option<Sensitive<String>>,
    pub subject: String,
    pub from_name: Option<String>,
    pub relay_endpoint_override: Option<Url>,
    #[serde(default)]
    pub links: Vec<ContactLink>,
}
