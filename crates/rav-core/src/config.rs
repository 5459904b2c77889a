use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/rav/config.toml`.
///
/// Carries the two conventional defaults; both can be overridden per run
/// with the `--meta` / `--dir` flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RavConfig {
    /// Release metadata file listing artifacts and expected digests.
    pub manifest_path: PathBuf,
    /// Directory the manifest's artifact paths are resolved against.
    pub artifact_dir: PathBuf,
}

impl Default for RavConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from("release-files/release-metadata.json"),
            artifact_dir: PathBuf::from("release-files"),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rav")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RavConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RavConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: RavConfig = toml::from_str(&data)?;
    Ok(cfg)
}
