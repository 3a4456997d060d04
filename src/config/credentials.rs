//! Catalog API key resolution.

use super::types::CatalogConfig;

/// Environment variable that overrides `catalog.api_key`.
pub const API_KEY_ENV: &str = "MOVIESHELF_API_KEY";

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when building requests.
#[derive(Clone)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

impl CatalogConfig {
    /// Resolves the API key, preferring the environment over the file.
    pub fn resolve_api_key(&self) -> Option<SecureString> {
        let from_env = std::env::var(API_KEY_ENV).ok();
        pick_key(from_env, self.api_key.clone())
    }
}

fn pick_key(from_env: Option<String>, from_file: Option<String>) -> Option<SecureString> {
    from_env
        .filter(|key| !key.trim().is_empty())
        .or(from_file.filter(|key| !key.trim().is_empty()))
        .map(SecureString::new)
}
