use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::pr::{self, client::DEFAULT_API_URL, RepoRef};

/// Config file looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = ".modelix-notifier.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),

    #[error("Invalid modelix-url '{0}'")]
    InvalidModelixUrl(String),

    #[error("Invalid repository '{0}', expected owner/name")]
    InvalidRepository(String),
}

/// Configuration as read from `.modelix-notifier.toml`.
///
/// Every field is optional here; required inputs are checked by [`Config::resolve`]
/// once the environment and command line have been layered on top.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub modelix: ModelixConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    /// Token used for the GitHub API (the `repo-token` input)
    pub token: Option<String>,
    /// `owner/name` of the repository the pull request lives in
    pub repository: Option<String>,
    /// REST API root, for GitHub Enterprise
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelixConfig {
    /// Base URL of the Modelix instance (the `modelix-url` input)
    pub url: Option<String>,
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub repo_token: Option<String>,
    pub modelix_url: Option<String>,
    pub repository: Option<String>,
}

/// Fully resolved inputs for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub token: String,
    pub modelix_url: String,
    pub api_url: String,
    pub repository: Option<RepoRef>,
}

/// GitHub Actions keeps the hyphen of an input name in its variable.
const INPUT_REPO_TOKEN: &str = "INPUT_REPO-TOKEN";
const INPUT_MODELIX_URL: &str = "INPUT_MODELIX-URL";

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load `path` if given, otherwise `.modelix-notifier.toml` from the
    /// current directory. A missing default file yields an empty config;
    /// a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let default = Path::new(CONFIG_FILE);
                if default.exists() {
                    Self::load_from(default)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn apply_env(self) -> Config {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Layer environment variables over the file values.
    ///
    /// Action inputs (`INPUT_*`) take precedence over the file; the generic
    /// `GITHUB_*` variables only fill what is still unset.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| non_empty(lookup(name));

        self.github.token = env(INPUT_REPO_TOKEN)
            .or(non_empty(self.github.token))
            .or_else(|| env("GITHUB_TOKEN"));
        self.modelix.url = env(INPUT_MODELIX_URL).or(non_empty(self.modelix.url));
        self.github.repository =
            non_empty(self.github.repository).or_else(|| env("GITHUB_REPOSITORY"));
        self.github.api_url = non_empty(self.github.api_url).or_else(|| env("GITHUB_API_URL"));
        self
    }

    pub fn apply_overrides(mut self, overrides: &Overrides) -> Config {
        if let Some(token) = non_empty(overrides.repo_token.clone()) {
            self.github.token = Some(token);
        }
        if let Some(url) = non_empty(overrides.modelix_url.clone()) {
            self.modelix.url = Some(url);
        }
        if let Some(repository) = non_empty(overrides.repository.clone()) {
            self.github.repository = Some(repository);
        }
        self
    }

    /// Check required inputs and produce the settings for a run.
    pub fn resolve(&self) -> Result<Settings, ConfigError> {
        let token = non_empty(self.github.token.clone()).ok_or(ConfigError::MissingInput("repo-token"))?;
        let modelix_url =
            non_empty(self.modelix.url.clone()).ok_or(ConfigError::MissingInput("modelix-url"))?;

        reqwest::Url::parse(&modelix_url)
            .map_err(|_| ConfigError::InvalidModelixUrl(modelix_url.clone()))?;

        let repository = self
            .github
            .repository
            .as_deref()
            .map(|value| {
                pr::parse_repository(value).map_err(|_| ConfigError::InvalidRepository(value.to_string()))
            })
            .transpose()?;

        let api_url = self
            .github
            .api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Settings {
            token,
            modelix_url,
            api_url,
            repository,
        })
    }
}
