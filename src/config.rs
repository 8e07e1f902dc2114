//! Runtime configuration.
//!
//! Defaults describe the stock card; each field can be overridden through a
//! `PROFILE_CARD_*` environment variable so the binary needs no flags.

use std::path::PathBuf;

use url::Url;

/// Snowflake of the profile the card shows.
pub const DEFAULT_USER_ID: &str = "765929697976516610";
/// Public lookup service. The user id is appended as the last path segment.
pub const DEFAULT_LOOKUP_BASE: &str = "https://discordlookup.mesalytic.moe/v1/user/";
pub const DEFAULT_PARTICLE_COUNT: usize = 100;
pub const DEFAULT_PARTICLE_COLOR: &str = "#5865F2";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub user_id: String,
    pub lookup_base: String,
    pub particle_count: usize,
    pub particle_color: String,
    /// Whether the window hosts a background layer for the particle field.
    pub background: bool,
    /// Where the theme preference is persisted.
    pub storage_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_id: DEFAULT_USER_ID.to_string(),
            lookup_base: DEFAULT_LOOKUP_BASE.to_string(),
            particle_count: DEFAULT_PARTICLE_COUNT,
            particle_color: DEFAULT_PARTICLE_COLOR.to_string(),
            background: true,
            storage_path: default_storage_path(),
        }
    }
}

impl Config {
    /// Defaults overlaid with whatever `PROFILE_CARD_*` variables are set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(id) = get("PROFILE_CARD_USER_ID").filter(|v| !v.trim().is_empty()) {
            config.user_id = id.trim().to_string();
        }
        if let Some(base) = get("PROFILE_CARD_LOOKUP_URL").filter(|v| !v.trim().is_empty()) {
            config.lookup_base = base.trim().to_string();
        }
        if let Some(flag) = get("PROFILE_CARD_BACKGROUND") {
            config.background = !matches!(flag.trim(), "0" | "false" | "off" | "no");
        }
        if let Some(path) = get("PROFILE_CARD_STORAGE").filter(|v| !v.trim().is_empty()) {
            config.storage_path = PathBuf::from(path);
        }

        config
    }

    /// Full lookup URL for the configured user.
    pub fn lookup_url(&self) -> Result<Url, url::ParseError> {
        let base = if self.lookup_base.ends_with('/') {
            self.lookup_base.clone()
        } else {
            format!("{}/", self.lookup_base)
        };
        Url::parse(&base)?.join(&self.user_id)
    }
}

fn default_storage_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("profile-card")
        .join("storage.json")
}
