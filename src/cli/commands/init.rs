//! Init command handler

use std::path::Path;

use crate::config::Config;

pub fn cmd_init(path: Option<&Path>) -> anyhow::Result<()> {
    let created = match path {
        Some(path) if path.exists() => false,
        Some(path) => {
            Config::default().save_to_path(path)?;
            true
        }
        None => Config::create_default_if_missing()?,
    };

    let shown = path.map_or_else(|| "config.toml".to_string(), |p| p.display().to_string());

    if created {
        println!("✓ Config file created at {shown}. Edit it and run `betpool serve`.");
    } else {
        println!("Config file already exists at {shown}, leaving it untouched.");
    }

    Ok(())
}
