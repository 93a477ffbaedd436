use anyhow::{Context, Result};
use pokedex_core::config::{Config, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
use pokedex_core::Language;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::cli::CliArgs;

/// CLI preferences loaded from TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Label language for types and stats ("es" or "en")
    #[serde(default)]
    pub language: Language,

    /// Rows per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// PokeAPI base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Cap on the number of records loaded
    #[serde(default)]
    pub index_limit: Option<u32>,

    /// Detail requests in flight during a bulk load
    #[serde(default = "default_concurrency")]
    pub fetch_concurrency: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_concurrency() -> usize {
    16
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            page_size: default_page_size(),
            base_url: default_base_url(),
            index_limit: None,
            fetch_concurrency: default_concurrency(),
        }
    }
}

/// Fully resolved settings the app runs with.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    pub language: Language,
}

impl CliConfig {
    /// Return the default config directory path: ~/.config/pokedex/
    pub fn default_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("pokedex");
        Ok(config_dir)
    }

    /// Return the default config file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns default config if the file does not exist.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            debug!(?config_path, "Loading config");
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config: {}", config_path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
            Ok(config)
        } else {
            debug!(?config_path, "Config file not found, using defaults");
            let config = Self::default();
            // Create directory and write default config
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent).ok();
            }
            let toml_str = toml::to_string_pretty(&config)
                .context("failed to serialize default config")?;
            std::fs::write(&config_path, toml_str).ok();
            Ok(config)
        }
    }

    /// Merge flags, environment and this file into final settings.
    /// Priority: CLI flag > env var > config file.
    pub fn resolve(&self, args: &CliArgs, mut env: Config) -> Settings {
        if let Some(url) = &args.base_url {
            env.api.base_url = url.clone();
        } else if !env.has_env("POKEAPI_BASE_URL") {
            env.api.base_url = self.base_url.clone();
        }

        if args.limit.is_some() {
            env.api.index_limit = args.limit;
        } else if !env.has_env("POKEDEX_INDEX_LIMIT") {
            env.api.index_limit = self.index_limit;
        }

        if let Some(n) = args.concurrency {
            env.api.fetch_concurrency = n.max(1);
        } else if !env.has_env("POKEDEX_FETCH_CONCURRENCY") {
            env.api.fetch_concurrency = self.fetch_concurrency.max(1);
        }

        if let Some(size) = args.page_size {
            env.view.page_size = size.max(1);
        } else if !env.has_env("POKEDEX_PAGE_SIZE") {
            env.view.page_size = self.page_size.max(1);
        }

        Settings {
            config: env,
            language: args.language.unwrap_or(self.language),
        }
    }
}
