//! Data directory layout for Solace.

use std::path::{Path, PathBuf};

/// Resolve the Solace data directory.
///
/// Priority: `SOLACE_DATA_DIR`, then `~/.solace`, then `./.solace`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SOLACE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".solace");
    }

    PathBuf::from(".solace")
}

/// `{data_dir}/config.toml`
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// `{data_dir}/secrets.toml`
pub fn secrets_path(data_dir: &Path) -> PathBuf {
    data_dir.join("secrets.toml")
}
