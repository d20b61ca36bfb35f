//! Settings loading and access-key resolution for the provider plugins.
//!
//! Access keys follow a fixed precedence order: a key present in
//! [`ProviderSettings`] wins, otherwise the hosting service's recognized
//! environment variables are checked in order and the first non-empty
//! value is used. The environment lookup is injectable so tests never
//! mutate the process environment.

use provider_types::{ApiKey, ProviderSettings};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("parse error: {0}")]
	Parse(String),

	#[error("io error: {0}")]
	Io(#[from] std::io::Error),
}

/// Loads provider settings from a TOML file.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<ProviderSettings, ConfigError> {
	let contents = std::fs::read_to_string(path.as_ref())?;
	toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Resolves the access key for a hosting service.
///
/// Precedence: the explicit setting first, then `env_keys` in order; the
/// first non-empty value wins. Returns `None` when no key is configured,
/// which resolves to a keyless endpoint.
pub fn resolve_api_key(settings: &ProviderSettings, env_keys: &[&str]) -> Option<ApiKey> {
	resolve_api_key_with(settings, env_keys, |name| env::var(name).ok())
}

/// Same as [`resolve_api_key`], with the environment lookup injected.
pub fn resolve_api_key_with(
	settings: &ProviderSettings,
	env_keys: &[&str],
	lookup: impl Fn(&str) -> Option<String>,
) -> Option<ApiKey> {
	if let Some(key) = settings.api_key.as_deref() {
		if !key.is_empty() {
			debug!("using access key from explicit settings");
			return Some(ApiKey::new(key));
		}
	}

	for name in env_keys {
		match lookup(name) {
			Some(value) if !value.is_empty() => {
				debug!(variable = *name, "using access key from environment");
				return Some(ApiKey::new(value));
			}
			_ => {}
		}
	}

	None
}
