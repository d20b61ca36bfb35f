//! Settings a host passes when instantiating a provider.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default HTTP request timeout, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Per-provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
	/// Access key appended to the endpoint path. Takes precedence over the
	/// hosting service's environment variables.
	#[serde(default)]
	pub api_key: Option<String>,

	/// HTTP request timeout in seconds.
	#[serde(default = "default_request_timeout")]
	pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
	DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ProviderSettings {
	fn default() -> Self {
		Self {
			api_key: None,
			request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
		}
	}
}

/// An opaque access key.
///
/// The key ends up as a path segment of the resolved endpoint; the type
/// itself redacts its value so it never leaks through logs or debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
	pub fn new(key: impl Into<String>) -> Self {
		Self(key.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for ApiKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("ApiKey(<redacted>)")
	}
}

impl fmt::Display for ApiKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("<redacted>")
	}
}

impl From<String> for ApiKey {
	fn from(key: String) -> Self {
		Self(key)
	}
}
