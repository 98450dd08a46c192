use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::home::ensure_hisob_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// IANA timezone used for budget months and daily summaries.
    pub timezone: String,
    /// Language for users who never picked one (uz, ru, en).
    pub default_lang: String,
    #[serde(default)]
    pub notify: NotifySection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifySection {
    /// When set, budget alerts POST here instead of printing locally.
    pub webhook_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: "Asia/Tashkent".to_string(),
            default_lang: "uz".to_string(),
            notify: NotifySection::default(),
        }
    }
}

impl Config {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown timezone {:?} in config", self.timezone))
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_hisob_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}
