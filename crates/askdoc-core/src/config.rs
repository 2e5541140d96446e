//! Lightweight configuration loader and typed settings.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env
//! vars. Typed sections carry the pipeline defaults; `Settings::validate`
//! rejects combinations the chunker and the cache cannot work with.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::RankMethod;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after
/// expansion. Absolute paths are returned as-is.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    pub chunk_size: usize,
    pub overlap: usize,
    pub min_chunk_size: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self { chunk_size: 1500, overlap: 200, min_chunk_size: 50 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    pub max_pages: usize,
    pub max_text_bytes: usize,
    pub min_document_chars: usize,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self { max_pages: 1000, max_text_bytes: 10 * 1024 * 1024, min_document_chars: 100 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub max_results: usize,
    pub method: RankMethod,
    pub cache_capacity: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { max_results: 5, method: RankMethod::Tfidf, cache_capacity: 100 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnswerSettings {
    pub max_blocks: usize,
    pub relevance_floor: f32,
}

impl Default for AnswerSettings {
    fn default() -> Self {
        Self { max_blocks: 3, relevance_floor: 0.005 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub chunking: ChunkingSettings,
    pub extraction: ExtractionSettings,
    pub search: SearchSettings,
    pub answer: AnswerSettings,
}

impl Settings {
    /// Pull the typed sections out of a loaded config, falling back to the
    /// defaults for anything absent.
    pub fn from_config(config: &Config) -> Self {
        Self {
            chunking: config.get("chunking").unwrap_or_default(),
            extraction: config.get("extraction").unwrap_or_default(),
            search: config.get("search").unwrap_or_default(),
            answer: config.get("answer").unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk_size must be positive".into()));
        }
        if self.chunking.overlap >= self.chunking.chunk_size {
            return Err(Error::InvalidConfig(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.chunking.overlap, self.chunking.chunk_size
            )));
        }
        if self.search.max_results == 0 {
            return Err(Error::InvalidConfig("max_results must be at least 1".into()));
        }
        if self.search.cache_capacity < 4 {
            return Err(Error::InvalidConfig("cache_capacity must be at least 4".into()));
        }
        Ok(())
    }
}
