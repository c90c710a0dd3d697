//! Secret chain builder -- wires concrete providers in priority order.
//!
//! Lives in `solace-infra` because it assembles concrete providers. The
//! result is handed to `SecretService` in `solace-core`.

use std::path::Path;
use std::sync::Arc;

use solace_core::secret::provider::DynSecretProvider;

use crate::filesystem::secrets_path;
use crate::secret::env::EnvSecretProvider;
use crate::secret::file::FileSecretProvider;

/// Build the default secret resolution chain (first match wins):
/// 1. Environment variables
/// 2. `{data_dir}/secrets.toml`
pub fn build_secret_chain(data_dir: &Path) -> Vec<DynSecretProvider> {
    vec![
        Arc::new(EnvSecretProvider::new()),
        Arc::new(FileSecretProvider::new(secrets_path(data_dir))),
    ]
}
