//! LlamaRPC provider plugin.
//!
//! Near-identical sibling of the LlamaNodes plugin: resolves
//! `https://<subdomain>.llamarpc.com` endpoints for the networks LlamaRPC
//! serves, with the access key appended as a `/rpc/<key>` path segment.

mod provider;

pub use provider::LlamaRpc;

use provider_rpc::HostProfile;
use provider_types::{
	NetworkIdent, PluginResult, ProviderFactory, ProviderSettings, UpstreamProvider,
};

/// Name this plugin registers under.
pub const PROVIDER_NAME: &str = "llamarpc";

/// Apex domain LlamaRPC endpoints live under.
pub const DOMAIN: &str = "llamarpc.com";

/// Environment variables that may carry a LlamaRPC access key.
// Kept verbatim from the service's published docs, spelling included.
pub const ENV_KEYS: &[&str] = &["WEB3_LAMMARPC_PROJECT_ID", "WEB3_LAMMARPC_API_KEY"];

/// Networks this plugin registers providers for.
pub const NETWORKS: &[(&str, &[&str])] = &[
	("ethereum", &["mainnet"]),
	("bsc", &["mainnet"]),
	("polygon", &["mainnet"]),
];

/// Known subdomain assignments; the table covers more pairs than the
/// registered networks on purpose, matching the hosting service's side.
const SUBDOMAINS: &[((&str, &str), &str)] = &[
	(("arbitrum", "mainnet"), "arbitrum"),
	(("bsc", "mainnet"), "binance"),
	(("ethereum", "mainnet"), "ethereum"),
	(("ethereum", "goerli"), "ethereum-goerli"),
	(("optimism", "mainnet"), "optimism"),
	(("polygon", "mainnet"), "polygon"),
];

/// The LlamaRPC host profile.
pub fn profile() -> HostProfile {
	HostProfile {
		name: PROVIDER_NAME,
		domain: DOMAIN,
		env_keys: ENV_KEYS,
		subdomains: SUBDOMAINS,
	}
}

/// Every (ecosystem, network) pair this plugin serves.
pub fn supported_networks() -> Vec<NetworkIdent> {
	NETWORKS
		.iter()
		.flat_map(|(ecosystem, networks)| {
			networks
				.iter()
				.map(|network| NetworkIdent::new(*ecosystem, *network))
		})
		.collect()
}

/// Factory the host registry instantiates providers through.
#[derive(Debug, Default, Clone, Copy)]
pub struct LlamaRpcFactory;

impl ProviderFactory for LlamaRpcFactory {
	fn provider_name(&self) -> &'static str {
		PROVIDER_NAME
	}

	fn supported_networks(&self) -> Vec<NetworkIdent> {
		supported_networks()
	}

	fn create(
		&self,
		network: NetworkIdent,
		settings: ProviderSettings,
	) -> PluginResult<Box<dyn UpstreamProvider>> {
		Ok(Box::new(LlamaRpc::new(network, &settings)))
	}
}
