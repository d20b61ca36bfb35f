//! LlamaNodes provider plugin.
//!
//! Registers a hosted-RPC provider for the networks LlamaNodes serves and
//! resolves `https://<subdomain>.llamanodes.com` endpoints, appending an
//! access key as a `/rpc/<key>` path segment when one is configured.

mod provider;

pub use provider::LlamaNodes;

use provider_rpc::HostProfile;
use provider_types::{
	NetworkIdent, PluginResult, ProviderFactory, ProviderSettings, UpstreamProvider,
};

/// Name this plugin registers under.
pub const PROVIDER_NAME: &str = "llamanodes";

/// Apex domain LlamaNodes endpoints live under.
pub const DOMAIN: &str = "llamanodes.com";

/// Environment variables that may carry a LlamaNodes access key.
pub const ENV_KEYS: &[&str] = &["WEB3_LLAMANODES_PROJECT_ID", "WEB3_LLAMANODES_API_KEY"];

/// Networks this plugin registers providers for.
pub const NETWORKS: &[(&str, &[&str])] = &[
	("arbitrum", &["mainnet"]),
	("bsc", &["mainnet"]),
	("ethereum", &["mainnet", "goerli"]),
	("optimism", &["mainnet"]),
	("polygon", &["mainnet"]),
];

/// Known subdomain assignments. Pairs outside this table fall back to the
/// standard naming rule.
const SUBDOMAINS: &[((&str, &str), &str)] = &[
	(("arbitrum", "mainnet"), "arbitrum"),
	(("bsc", "mainnet"), "binance"),
	(("ethereum", "mainnet"), "ethereum"),
	(("ethereum", "goerli"), "ethereum-goerli"),
	(("optimism", "mainnet"), "optimism"),
	(("polygon", "mainnet"), "polygon"),
];

/// The LlamaNodes host profile.
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
pub struct LlamaNodesFactory;

impl ProviderFactory for LlamaNodesFactory {
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
		Ok(Box::new(LlamaNodes::new(network, &settings)))
	}
}
