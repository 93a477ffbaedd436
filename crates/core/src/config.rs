use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_parse<T: std::str::FromStr>(profile: &str, key: &str, default: T) -> T {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub api: ApiConfig,
    pub view: ViewConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `POKEDEX_PROFILE`. When set (e.g. `DEV`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("POKEDEX_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            api: ApiConfig::from_env_profiled(p),
            view: ViewConfig::from_env_profiled(p),
        }
    }

    /// Whether `key` is set in the environment for this profile.
    pub fn has_env(&self, key: &str) -> bool {
        profiled_env_opt(&self.profile, key).is_some()
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  api:   base_url={}, index_limit={}, concurrency={}, timeout={}s",
            self.api.base_url,
            self.api
                .index_limit
                .map(|l| l.to_string())
                .unwrap_or_else(|| "(count)".to_string()),
            self.api.fetch_concurrency,
            self.api.request_timeout_secs
        );
        tracing::info!(
            "  view:  page_size={}, debounce={}ms",
            self.view.page_size,
            self.view.debounce_ms
        );
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: String::new(),
            api: ApiConfig::default(),
            view: ViewConfig::default(),
        }
    }
}

// ── Remote API ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Upper bound on index size; `None` means "whatever the API reports".
    pub index_limit: Option<u32>,
    /// Maximum number of detail requests in flight at once.
    pub fetch_concurrency: usize,
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            base_url: profiled_env_or(p, "POKEAPI_BASE_URL", DEFAULT_BASE_URL),
            index_limit: profiled_env_opt(p, "POKEDEX_INDEX_LIMIT").and_then(|v| v.parse().ok()),
            fetch_concurrency: profiled_env_parse(p, "POKEDEX_FETCH_CONCURRENCY", 16usize).max(1),
            request_timeout_secs: profiled_env_parse(p, "POKEDEX_REQUEST_TIMEOUT_SECS", 30),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            index_limit: None,
            fetch_concurrency: 16,
            request_timeout_secs: 30,
        }
    }
}

// ── View ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    pub page_size: usize,
    /// Quiet window before a typed search is applied.
    pub debounce_ms: u64,
}

impl ViewConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            page_size: profiled_env_parse(p, "POKEDEX_PAGE_SIZE", DEFAULT_PAGE_SIZE).max(1),
            debounce_ms: profiled_env_parse(p, "POKEDEX_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.profile_label(), "default");
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.view.page_size, 20);
        assert_eq!(config.view.debounce_ms, 500);
        assert!(config.api.index_limit.is_none());
    }

    #[test]
    fn profile_prefixed_key_wins() {
        env::set_var("CFGTESTA_POKEAPI_BASE_URL", "http://localhost:9000/api/v2");
        env::set_var("CFGTESTA_POKEDEX_INDEX_LIMIT", "151");
        let config = Config::for_profile("cfgtesta");
        assert_eq!(config.profile, "CFGTESTA");
        assert_eq!(config.api.base_url, "http://localhost:9000/api/v2");
        assert_eq!(config.api.index_limit, Some(151));
        assert!(config.has_env("POKEDEX_INDEX_LIMIT"));
        assert!(!config.has_env("POKEDEX_NOT_A_REAL_KEY"));
        env::remove_var("CFGTESTA_POKEAPI_BASE_URL");
        env::remove_var("CFGTESTA_POKEDEX_INDEX_LIMIT");
    }

    #[test]
    fn invalid_numbers_fall_back() {
        env::set_var("CFGTESTB_POKEDEX_PAGE_SIZE", "lots");
        env::set_var("CFGTESTB_POKEDEX_FETCH_CONCURRENCY", "0");
        let config = Config::for_profile("CFGTESTB");
        assert_eq!(config.view.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.api.fetch_concurrency, 1);
        env::remove_var("CFGTESTB_POKEDEX_PAGE_SIZE");
        env::remove_var("CFGTESTB_POKEDEX_FETCH_CONCURRENCY");
    }
}
