//! The LlamaNodes connection adapter.

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

/// Provider for networks hosted by LlamaNodes.
///
/// Unconnected until [`connect`](UpstreamProvider::connect); every RPC
/// operation before that fails with [`ProviderError::NotConnected`].
pub struct LlamaNodes {
	network: NetworkIdent,
	resolver: EndpointResolver,
	request_timeout: Duration,
	client: Option<RpcClient>,
}

impl LlamaNodes {
	/// Creates an unconnected provider for `network`.
	///
	/// The access key is fixed here: an explicit setting wins over the
	/// `WEB3_LLAMANODES_*` environment variables.
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
impl UpstreamProvider for LlamaNodes {
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

		// Chains that began as proof-of-authority keep sealed headers in
		// their history; the mode must switch before anything fetches one.
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
