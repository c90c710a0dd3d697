//! `secrets.toml` provider.
//!
//! A flat table of `KEY = "value"` pairs in the data directory, e.g.
//!
//! ```toml
//! OPENAI_API_KEY = "sk-..."
//! GEMINI_API_KEY = "..."
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use solace_core::secret::provider::SecretProvider;
use solace_types::error::SecretError;

/// Secret provider reading a TOML file on every lookup.
///
/// A missing file means "no secrets here"; an unreadable or malformed one
/// is a storage error.
pub struct FileSecretProvider {
    path: PathBuf,
}

impl FileSecretProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<HashMap<String, String>, SecretError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(err) => {
                return Err(SecretError::Storage(format!(
                    "failed to read {}: {err}",
                    self.path.display()
                )));
            }
        };

        toml::from_str(&content).map_err(|err| {
            SecretError::Storage(format!("failed to parse {}: {err}", self.path.display()))
        })
    }
}

impl SecretProvider for FileSecretProvider {
    fn name(&self) -> &str {
        "secrets-file"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        let mut secrets = self.load().await?;
        Ok(secrets.remove(key).filter(|v| !v.trim().is_empty()))
    }
}
