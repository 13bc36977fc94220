use crate::config::GitFindConfig;
use anyhow::{anyhow, Result};

pub fn config_command(init: bool, path: bool) -> Result<()> {
    if path {
        let config_path = GitFindConfig::config_path().ok_or_else(|| anyhow!("HOME is not set"))?;
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if let Some(existing) = GitFindConfig::config_path().filter(|p| p.exists()) {
            return Err(anyhow!("{} already exists", existing.display()));
        }
        let written = GitFindConfig::default().save()?;
        println!("✓ Wrote default settings to {}", written.display());
        return Ok(());
    }

    let config = GitFindConfig::load();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
