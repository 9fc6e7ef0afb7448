//! Service configuration parsed from environment variables.
//!
//! A `.env` file in the working directory is loaded first (see `main`), so
//! every value here can come from either source. Only `DATABASE_URL` is
//! required; malformed optional values fall back to their defaults.

use canvas::consts::{MAX_PRODUCTS_PER_PAGE, THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_PRODUCTS_PER_PAGE: usize = 4;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub thumbnail_width: f64,
    pub thumbnail_height: f64,
    /// Used when a campaign request omits `productsPerPage`. Always `1..=8`.
    pub default_products_per_page: usize,
}

impl Config {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `THUMBNAIL_WIDTH` / `THUMBNAIL_HEIGHT`: default 200 / 160
    /// - `DEFAULT_PRODUCTS_PER_PAGE`: default 4, clamped to 1–8
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `DATABASE_URL` is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => return Err(ConfigError::Missing("DATABASE_URL")),
        };

        Ok(Self {
            database_url,
            port: env_parse("PORT", DEFAULT_PORT),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS).max(1),
            thumbnail_width: positive(env_parse("THUMBNAIL_WIDTH", THUMBNAIL_WIDTH), THUMBNAIL_WIDTH),
            thumbnail_height: positive(env_parse("THUMBNAIL_HEIGHT", THUMBNAIL_HEIGHT), THUMBNAIL_HEIGHT),
            default_products_per_page: env_parse("DEFAULT_PRODUCTS_PER_PAGE", DEFAULT_PRODUCTS_PER_PAGE)
                .clamp(1, MAX_PRODUCTS_PER_PAGE),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            port: DEFAULT_PORT,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            thumbnail_width: THUMBNAIL_WIDTH,
            thumbnail_height: THUMBNAIL_HEIGHT,
            default_products_per_page: DEFAULT_PRODUCTS_PER_PAGE,
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn positive(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { default }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
