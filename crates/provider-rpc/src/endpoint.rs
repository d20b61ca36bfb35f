//! Endpoint resolution for hosted RPC services.
//!
//! A hosting service is described by a static [`HostProfile`]; resolution
//! itself is a pure function over (profile, key, network). Resolution is
//! total: a pair missing from the subdomain table degrades to the standard
//! naming rule with a logged warning rather than an error.

use provider_types::{ApiKey, NetworkIdent};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::warn;

/// Static description of a hosting service.
#[derive(Debug, Clone, Copy)]
pub struct HostProfile {
	/// Short service name, used in logs.
	pub name: &'static str,
	/// Apex domain endpoints live under, e.g. `"llamarpc.com"`.
	pub domain: &'static str,
	/// Environment variables that may carry an access key, in priority order.
	pub env_keys: &'static [&'static str],
	/// Known (ecosystem, network) → subdomain assignments.
	pub subdomains: &'static [((&'static str, &'static str), &'static str)],
}

impl HostProfile {
	/// The table entry for `network`, when one exists.
	pub fn subdomain_for(&self, network: &NetworkIdent) -> Option<&'static str> {
		self.subdomains
			.iter()
			.find(|((ecosystem, name), _)| {
				*ecosystem == network.ecosystem && *name == network.network
			})
			.map(|(_, subdomain)| *subdomain)
	}
}

/// Naming rule applied when a pair has no table entry: mainnet uses the
/// bare ecosystem name, everything else `ecosystem-network`.
pub fn standard_subdomain(network: &NetworkIdent) -> String {
	if network.is_mainnet() {
		network.ecosystem.clone()
	} else {
		format!("{}-{}", network.ecosystem, network.network)
	}
}

/// Resolves the endpoint URL for one pair.
pub fn resolve_endpoint(
	profile: &HostProfile,
	key: Option<&ApiKey>,
	network: &NetworkIdent,
) -> String {
	let subdomain = match profile.subdomain_for(network) {
		Some(subdomain) => subdomain.to_string(),
		None => {
			let guessed = standard_subdomain(network);
			warn!(
				host = profile.name,
				ecosystem = %network.ecosystem,
				subdomain = %guessed,
				"unsupported ecosystem, trying the standard subdomain"
			);
			guessed
		}
	};

	let mut endpoint = format!("https://{}.{}", subdomain, profile.domain);
	if let Some(key) = key {
		endpoint.push_str("/rpc/");
		endpoint.push_str(key.as_str());
	}
	endpoint
}

/// Caching resolver owned by a provider instance.
///
/// Each pair is resolved once and memoized for the resolver's lifetime;
/// a racing first use resolves twice to the same value, so last write
/// wins harmlessly.
pub struct EndpointResolver {
	profile: HostProfile,
	api_key: Option<ApiKey>,
	resolved: RwLock<HashMap<NetworkIdent, String>>,
}

impl EndpointResolver {
	pub fn new(profile: HostProfile, api_key: Option<ApiKey>) -> Self {
		Self {
			profile,
			api_key,
			resolved: RwLock::new(HashMap::new()),
		}
	}

	pub fn profile(&self) -> &HostProfile {
		&self.profile
	}

	/// The memoized endpoint for `network`, resolved on first use.
	pub fn resolve(&self, network: &NetworkIdent) -> String {
		if let Some(endpoint) = self.cached(network) {
			return endpoint;
		}

		let endpoint = resolve_endpoint(&self.profile, self.api_key.as_ref(), network);
		if let Ok(mut resolved) = self.resolved.write() {
			resolved.insert(network.clone(), endpoint.clone());
		}
		endpoint
	}

	/// The cached endpoint for `network`, if it was resolved before.
	pub fn cached(&self, network: &NetworkIdent) -> Option<String> {
		self.resolved
			.read()
			.ok()
			.and_then(|resolved| resolved.get(network).cloned())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const PROFILE: HostProfile = HostProfile {
		name: "testhost",
		domain: "testhost.com",
		env_keys: &["WEB3_TESTHOST_API_KEY"],
		subdomains: &[
			(("ethereum", "mainnet"), "ethereum"),
			(("bsc", "mainnet"), "binance"),
		],
	};

	#[test]
	fn test_known_pair_uses_table_entry() {
		let url = resolve_endpoint(&PROFILE, None, &NetworkIdent::new("bsc", "mainnet"));
		assert_eq!(url, "https://binance.testhost.com");
	}

	#[test]
	fn test_key_is_appended_as_path_segment() {
		let key = ApiKey::new("sekrit");
		let url = resolve_endpoint(
			&PROFILE,
			Some(&key),
			&NetworkIdent::new("ethereum", "mainnet"),
		);
		assert_eq!(url, "https://ethereum.testhost.com/rpc/sekrit");
	}

	#[test]
	fn test_unmapped_mainnet_falls_back_to_ecosystem_name() {
		let url = resolve_endpoint(&PROFILE, None, &NetworkIdent::new("base", "mainnet"));
		assert_eq!(url, "https://base.testhost.com");
	}

	#[test]
	fn test_unmapped_testnet_falls_back_to_hyphenated_name() {
		let url = resolve_endpoint(&PROFILE, None, &NetworkIdent::new("base", "goerli"));
		assert_eq!(url, "https://base-goerli.testhost.com");
	}

	#[test]
	fn test_resolver_memoizes_per_pair() {
		let resolver = EndpointResolver::new(PROFILE, None);
		let network = NetworkIdent::new("ethereum", "mainnet");

		assert_eq!(resolver.cached(&network), None);
		let url = resolver.resolve(&network);
		assert_eq!(resolver.cached(&network).as_deref(), Some(url.as_str()));
		assert_eq!(resolver.resolve(&network), url);

		// Other pairs resolve independently.
		assert_eq!(resolver.cached(&NetworkIdent::new("bsc", "mainnet")), None);
	}
}
