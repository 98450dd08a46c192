use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn hisob_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".hisob"))
}

pub fn ensure_hisob_home() -> Result<PathBuf> {
    let dir = hisob_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
