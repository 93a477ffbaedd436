//! reqwest-backed client for the public PokeAPI.

use std::time::Duration;

use async_trait::async_trait;
use pokedex_core::config::ApiConfig;
use pokedex_core::{IndexEntry, Pokemon, PokemonType, Stat};
use serde::Deserialize;
use tracing::debug;

use crate::error::NetworkError;
use crate::source::CatalogSource;

/// Client for `GET {base}/pokemon?limit=N` and per-record URLs.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    base_url: String,
    index_limit: Option<u32>,
    http: reqwest::Client,
}

impl PokeApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            index_limit: None,
            http: reqwest::Client::new(),
        }
    }

    /// Build a client with the configured timeout and index cap.
    pub fn from_config(api: &ApiConfig) -> Result<Self, NetworkError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.request_timeout_secs))
            .build()?;
        Ok(Self {
            base_url: api.base_url.trim_end_matches('/').to_string(),
            index_limit: api.index_limit,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn index_url(&self, limit: u32) -> String {
        format!("{}/pokemon?limit={}", self.base_url, limit)
    }

    async fn get_text(&self, url: &str) -> Result<String, NetworkError> {
        debug!(url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl CatalogSource for PokeApiClient {
    /// Two requests: one to learn `count`, one sized to fetch everything.
    async fn load_index(&self) -> Result<Vec<IndexEntry>, NetworkError> {
        let probe_url = self.index_url(1);
        let probe = parse_index(&probe_url, &self.get_text(&probe_url).await?)?;

        let limit = match self.index_limit {
            Some(cap) => cap.min(probe.count),
            None => probe.count,
        };
        if limit == 0 {
            return Ok(Vec::new());
        }
        debug!(count = probe.count, limit, "Fetching full index");

        let url = self.index_url(limit);
        let page = parse_index(&url, &self.get_text(&url).await?)?;
        Ok(page.results)
    }

    async fn fetch_detail(&self, entry: &IndexEntry) -> Result<Pokemon, NetworkError> {
        let body = self.get_text(&entry.url).await?;
        parse_detail(&entry.url, &body)
    }

    fn detail_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name.trim().to_lowercase())
    }
}

// ── Wire format ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct IndexPage {
    pub count: u32,
    #[serde(default)]
    pub results: Vec<IndexEntry>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiTypeSlot {
    #[serde(default)]
    slot: u8,
    #[serde(rename = "type")]
    ty: NamedRef,
}

#[derive(Debug, Default, Deserialize)]
struct ApiArtwork {
    front_default: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiOtherSprites {
    #[serde(rename = "official-artwork", default)]
    official_artwork: ApiArtwork,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSprites {
    front_default: Option<String>,
    #[serde(default)]
    other: Option<ApiOtherSprites>,
}

#[derive(Debug, Deserialize)]
struct ApiStat {
    base_stat: u32,
    stat: NamedRef,
}

#[derive(Debug, Deserialize)]
struct ApiPokemon {
    id: u32,
    name: String,
    types: Vec<ApiTypeSlot>,
    weight: u32,
    height: u32,
    #[serde(default)]
    sprites: ApiSprites,
    base_experience: Option<u32>,
    #[serde(default)]
    stats: Vec<ApiStat>,
}

impl TryFrom<ApiPokemon> for Pokemon {
    type Error = String;

    fn try_from(mut api: ApiPokemon) -> Result<Self, Self::Error> {
        if api.types.is_empty() {
            return Err(format!("{} has no types", api.name));
        }
        api.types.sort_by_key(|t| t.slot);
        let types = api
            .types
            .iter()
            .map(|t| t.ty.name.parse::<PokemonType>().map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        let artwork = api
            .sprites
            .other
            .and_then(|o| o.official_artwork.front_default);

        Ok(Pokemon {
            id: api.id,
            name: api.name,
            types,
            weight: api.weight,
            height: api.height,
            sprite_url: artwork.or(api.sprites.front_default),
            base_experience: api.base_experience,
            stats: api
                .stats
                .into_iter()
                .map(|s| Stat {
                    name: s.stat.name,
                    base: s.base_stat,
                })
                .collect(),
        })
    }
}

pub(crate) fn parse_index(url: &str, body: &str) -> Result<IndexPage, NetworkError> {
    serde_json::from_str(body).map_err(|e| NetworkError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

pub(crate) fn parse_detail(url: &str, body: &str) -> Result<Pokemon, NetworkError> {
    let decode_err = |message: String| NetworkError::Decode {
        url: url.to_string(),
        message,
    };
    let api: ApiPokemon = serde_json::from_str(body).map_err(|e| decode_err(e.to_string()))?;
    Pokemon::try_from(api).map_err(decode_err)
}
