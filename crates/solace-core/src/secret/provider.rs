//! Secret provider trait definition.

use std::sync::Arc;

use futures_util::future::BoxFuture;

use solace_types::error::SecretError;

/// Trait for read-only secret backends (environment, secrets file).
///
/// Implementations live in solace-infra.
pub trait SecretProvider: Send + Sync {
    /// Backend name used in logs (e.g., "environment").
    fn name(&self) -> &str;

    /// Retrieve a secret value by key.
    /// Returns None if the secret does not exist in this provider.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, SecretError>> + Send;
}

/// Object-safe version of [`SecretProvider`] with boxed futures.
pub trait SecretProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn get_boxed<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, SecretError>>;
}

impl<T: SecretProvider> SecretProviderDyn for T {
    fn name(&self) -> &str {
        SecretProvider::name(self)
    }

    fn get_boxed<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, SecretError>> {
        Box::pin(self.get(key))
    }
}

/// Shared handle to any secret provider, as stored in a resolution chain.
pub type DynSecretProvider = Arc<dyn SecretProviderDyn>;
