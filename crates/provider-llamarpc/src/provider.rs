//! The LlamaRPC connection adapter.

use crate::{profile, PROVIDER_NAME};
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use provider_config::resolve_api_key;
use provider_rpc::{
	requires_header_compat, Block, BlockTag, EndpointResolver, GasPriceStrategy, HeaderCompat,
	RpcClient,
};
use provider_types::{ChainId, NetworkIdent, ProviderError, ProviderSettings, UpstreamProvider};
use std::time::Duration;
use tracing::{debug, info};

/// Provider for networks hosted by LlamaRPC.
pub struct LlamaRpc {
	network: NetworkIdent,
	resolver: EndpointResolver,
	request_timeout: Duration,
	client: Option<RpcClient>,
}

impl LlamaRpc {
	/// Creates an unconnected provider for `network`. An explicit key in
	/// `settings` wins over the `WEB3_LAMMARPC_*` environment variables.
	pub fn new(network: NetworkIdent, settings: &ProviderSettings) -> Self {
		let profile = profile();
		let api_key = resolve_api_key(settings, profile.env_keys);
		Self {
			network,
			resolver: EndpointResolver::new(profile, api_key),
			request_timeout: Duration::from_secs(settings.request_timeout_secs),
			client: None,
		}
	}

	fn client(&self) -> Result<&RpcClient, ProviderError> {
		self.client.as_ref().ok_or(ProviderError::NotConnected)
	}

	/// Chain id reported by the node.
	pub async fn chain_id(&self) -> Result<ChainId, ProviderError> {
		Ok(self.client()?.chain_id().await?)
	}

	/// Balance of `address` at the latest block.
	pub async fn get_balance(&self, address: Address) -> Result<U256, ProviderError> {
		Ok(self.client()?.get_balance(address).await?)
	}

	/// Block selected by `tag`, transactions as hashes.
	pub async fn get_block(&self, tag: BlockTag) -> Result<Block, ProviderError> {
		Ok(self.client()?.get_block_by_number(tag).await?)
	}

	/// Gas price under the installed strategy.
	pub async fn gas_price(&self) -> Result<U256, ProviderError> {
		Ok(self.client()?.gas_price().await?)
	}
}

#[async_trait]
impl UpstreamProvider for LlamaRpc {
	fn name(&self) -> &'static str {
		PROVIDER_NAME
	}

	fn network(&self) -> &NetworkIdent {
		&self.network
	}

	fn connection_str(&self) -> String {
		self.resolver.resolve(&self.network)
	}

	async fn connect(&mut self) -> Result<(), ProviderError> {
		let endpoint = self.resolver.resolve(&self.network);
		let mut client = RpcClient::new(&endpoint, self.request_timeout)?;

		// Formerly proof-of-authority chains need the extended header mode
		// for their sealed history; switch before any block is fetched.
		let chain_id = client.chain_id().await?;
		if requires_header_compat(chain_id) {
			debug!(%chain_id, "enabling extended header decoding");
			client.set_header_compat(HeaderCompat::PoaExtended);
		}

		client.set_gas_price_strategy(GasPriceStrategy::NodeQuoted);

		info!(network = %self.network, %chain_id, "connected");
		self.client = Some(client);
		Ok(())
	}

	async fn disconnect(&mut self) {
		self.client = None;
	}

	fn is_connected(&self) -> bool {
		self.client.is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use provider_types::{VmError, MAINNET};
	use serde_json::json;

	#[test]
	fn test_connection_str_for_known_pairs() {
		for (network, expected) in [
			(("ethereum", "mainnet"), "https://ethereum.llamarpc.com"),
			(("bsc", "mainnet"), "https://binance.llamarpc.com"),
			(("polygon", "mainnet"), "https://polygon.llamarpc.com"),
			(("ethereum", "goerli"), "https://ethereum-goerli.llamarpc.com"),
		] {
			let provider = LlamaRpc::new(
				NetworkIdent::new(network.0, network.1),
				&ProviderSettings::default(),
			);
			assert_eq!(provider.connection_str(), expected);
		}
	}

	#[test]
	fn test_connection_str_appends_configured_key() {
		let settings = ProviderSettings {
			api_key: Some("01HGW2N4ZG".to_string()),
			..Default::default()
		};
		let provider = LlamaRpc::new(NetworkIdent::new("polygon", MAINNET), &settings);
		assert_eq!(
			provider.connection_str(),
			"https://polygon.llamarpc.com/rpc/01HGW2N4ZG"
		);
	}

	#[test]
	fn test_unmapped_pair_degrades_to_guessed_url() {
		let provider = LlamaRpc::new(
			NetworkIdent::new("base", "mainnet"),
			&ProviderSettings::default(),
		);
		assert_eq!(provider.connection_str(), "https://base.llamarpc.com");
	}

	#[test]
	fn test_connection_str_is_memoized() {
		let provider = LlamaRpc::new(
			NetworkIdent::new("ethereum", MAINNET),
			&ProviderSettings::default(),
		);
		let first = provider.connection_str();
		assert_eq!(provider.connection_str(), first);
	}

	#[tokio::test]
	async fn test_operations_require_connect() {
		let provider = LlamaRpc::new(
			NetworkIdent::new("ethereum", MAINNET),
			&ProviderSettings::default(),
		);
		assert!(!provider.is_connected());
		assert!(matches!(
			provider.gas_price().await,
			Err(ProviderError::NotConnected)
		));
		assert!(matches!(
			provider.get_balance(Address::ZERO).await,
			Err(ProviderError::NotConnected)
		));
	}

	#[test]
	fn test_vm_error_translation_via_trait() {
		let provider = LlamaRpc::new(
			NetworkIdent::new("ethereum", MAINNET),
			&ProviderSettings::default(),
		);

		let bare = provider.virtual_machine_error(&json!("execution reverted"), None);
		assert!(matches!(
			bare,
			VmError::ContractLogic { reason: None, .. }
		));

		let nested = provider.virtual_machine_error(
			&json!({"code": -32000, "message": "gas required exceeds allowance"}),
			None,
		);
		assert!(matches!(
			nested,
			VmError::VirtualMachine { ref message, .. } if message == "gas required exceeds allowance"
		));
	}
}
