use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Fixed embedding dimensionality shared between the embedder and the
/// store's collection schema. A mismatch fails loudly at write/search time.
pub const EMBEDDING_DIM: usize = 768;

/// Fixed number of candidates requested per vector search.
pub const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub db_uri: String,
    pub table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { db_uri: "./dev_data/recipedb".to_string(), table: "recipes".to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub dimension: usize,
    pub model: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self { dimension: EMBEDDING_DIM, model: "hash-xx64".to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub top_k: usize,
    pub use_agent: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { top_k: DEFAULT_TOP_K, use_agent: false }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub store: StoreConfig,
    pub embedding: EmbeddingConfig,
    pub search: SearchConfig,
}

impl Settings {
    /// Merge defaults, `config.toml`, `config.<env>.toml` selected by
    /// `RUST_ENV`, then `APP_*` environment variables.
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let settings: Settings = figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.embedding.dimension != EMBEDDING_DIM {
            return Err(Error::InvalidConfig(format!(
                "embedding.dimension must be {} (collection schema), got {}",
                EMBEDDING_DIM, self.embedding.dimension
            )));
        }
        if self.search.top_k == 0 {
            return Err(Error::InvalidConfig("search.top_k must be positive".to_string()));
        }
        Ok(())
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
/// expansion. If `p` is absolute, it's returned as-is.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() {
        p
    } else {
        base.join(p)
    }
}
