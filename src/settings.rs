use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::parser::records::{ExtractOptions, DEFAULT_SEPARATOR, DEFAULT_TITLE, PLACEHOLDER_IMAGE};

const DEFAULT_CONFIG_FILE: &str = "mdsite";
const ENV_PREFIX: &str = "MDSITE";

/// Runtime settings. Sources, lowest priority first: built-in defaults,
/// `mdsite.toml` (or `--config`), `MDSITE_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory or http(s) base URL documents are fetched from.
    pub root: String,
    pub about: String,
    pub projects: String,
    pub placeholder_image: String,
    pub default_title: String,
    pub record_separator: String,
    /// Substituted for a region whose document could not be fetched.
    pub not_found_fragment: String,
    pub timeout_secs: u64,
    pub concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: ".".into(),
            about: "content/about.md".into(),
            projects: "content/projects.md".into(),
            placeholder_image: PLACEHOLDER_IMAGE.into(),
            default_title: DEFAULT_TITLE.into(),
            record_separator: DEFAULT_SEPARATOR.into(),
            not_found_fragment: "<p>Content not found.</p>".into(),
            timeout_secs: 30,
            concurrency: 10,
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            separator: self.record_separator.clone(),
            default_title: self.default_title.clone(),
            placeholder_image: self.placeholder_image.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
