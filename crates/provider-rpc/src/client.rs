//! Minimal HTTP JSON-RPC client.

use crate::block::{parse_quantity, Block, BlockTag};
use crate::error::{NodeError, RpcError};
use crate::gas::{FeeHistory, GasPriceStrategy, FEE_HISTORY_BLOCKS};
use crate::poa::HeaderCompat;
use alloy_primitives::{Address, U256};
use provider_types::ChainId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::trace;
use url::Url;

#[derive(Serialize)]
struct RpcRequest {
	jsonrpc: &'static str,
	id: u64,
	method: &'static str,
	params: Value,
}

impl RpcRequest {
	fn build(method: &'static str, params: Value) -> Self {
		RpcRequest {
			jsonrpc: "2.0",
			id: 1,
			method,
			params,
		}
	}
}

#[derive(Deserialize)]
struct RpcResponse {
	result: Option<Value>,
	error: Option<Value>,
}

/// HTTP JSON-RPC client bound to one resolved endpoint.
///
/// Carries no retry or failover logic; transport failures propagate
/// unchanged and node error objects surface with their raw payload.
pub struct RpcClient {
	http: reqwest::Client,
	url: Url,
	header_compat: HeaderCompat,
	gas_strategy: GasPriceStrategy,
}

impl RpcClient {
	/// Builds a client against `endpoint`.
	pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, RpcError> {
		let url = Url::parse(endpoint)?;
		let http = reqwest::Client::builder().timeout(timeout).build()?;
		Ok(Self {
			http,
			url,
			header_compat: HeaderCompat::Standard,
			gas_strategy: GasPriceStrategy::default(),
		})
	}

	/// Endpoint the client talks to.
	pub fn url(&self) -> &Url {
		&self.url
	}

	pub fn header_compat(&self) -> HeaderCompat {
		self.header_compat
	}

	/// Switches header decoding; must happen before any block is fetched.
	pub fn set_header_compat(&mut self, compat: HeaderCompat) {
		self.header_compat = compat;
	}

	pub fn gas_price_strategy(&self) -> GasPriceStrategy {
		self.gas_strategy
	}

	pub fn set_gas_price_strategy(&mut self, strategy: GasPriceStrategy) {
		self.gas_strategy = strategy;
	}

	/// Performs one JSON-RPC call.
	pub async fn call(&self, method: &'static str, params: Value) -> Result<Value, RpcError> {
		trace!(method, "rpc call");
		let request = RpcRequest::build(method, params);
		let response: RpcResponse = self
			.http
			.post(self.url.clone())
			.json(&request)
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		if let Some(error) = response.error {
			return Err(NodeError::from_raw(error).into());
		}
		response
			.result
			.ok_or_else(|| RpcError::InvalidResponse(format!("{method}: missing result")))
	}

	/// Chain id reported by the node.
	pub async fn chain_id(&self) -> Result<ChainId, RpcError> {
		let value = self.call("eth_chainId", json!([])).await?;
		Ok(ChainId(quantity_u64(&value)?))
	}

	/// Balance of `address` at the latest block.
	pub async fn get_balance(&self, address: Address) -> Result<U256, RpcError> {
		let value = self.call("eth_getBalance", json!([address, "latest"])).await?;
		quantity_u256(&value)
	}

	/// Block selected by `tag`, transactions as hashes, decoded under the
	/// installed header mode.
	pub async fn get_block_by_number(&self, tag: BlockTag) -> Result<Block, RpcError> {
		let value = self
			.call("eth_getBlockByNumber", json!([tag, false]))
			.await?;
		Block::decode(value, self.header_compat)
	}

	/// Gas price under the installed strategy.
	pub async fn gas_price(&self) -> Result<U256, RpcError> {
		match self.gas_strategy {
			GasPriceStrategy::NodeQuoted => {
				let value = self.call("eth_gasPrice", json!([])).await?;
				quantity_u256(&value)
			}
			GasPriceStrategy::FeeHistory { reward_percentile } => {
				let history = self
					.fee_history(FEE_HISTORY_BLOCKS, reward_percentile)
					.await?;
				Ok(history.suggested_price())
			}
		}
	}

	/// Raw `eth_feeHistory` query.
	pub async fn fee_history(
		&self,
		block_count: u64,
		reward_percentile: f64,
	) -> Result<FeeHistory, RpcError> {
		let value = self
			.call(
				"eth_feeHistory",
				json!([format!("{block_count:#x}"), "latest", [reward_percentile]]),
			)
			.await?;
		serde_json::from_value(value)
			.map_err(|e| RpcError::InvalidResponse(format!("fee history: {e}")))
	}
}

fn quantity_u64(value: &Value) -> Result<u64, RpcError> {
	let text = value
		.as_str()
		.ok_or_else(|| RpcError::InvalidResponse(format!("quantity is not a string: {value}")))?;
	parse_quantity(text).map_err(RpcError::InvalidResponse)
}

fn quantity_u256(value: &Value) -> Result<U256, RpcError> {
	let text = value
		.as_str()
		.ok_or_else(|| RpcError::InvalidResponse(format!("quantity is not a string: {value}")))?;
	U256::from_str_radix(text.trim_start_matches("0x"), 16)
		.map_err(|e| RpcError::InvalidResponse(format!("invalid quantity {text:?}: {e}")))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_client_starts_with_defaults() {
		let client =
			RpcClient::new("https://ethereum.llamarpc.com", Duration::from_secs(30)).expect("client");
		assert_eq!(client.url().as_str(), "https://ethereum.llamarpc.com/");
		assert_eq!(client.header_compat(), HeaderCompat::Standard);
		assert!(matches!(
			client.gas_price_strategy(),
			GasPriceStrategy::FeeHistory { .. }
		));
	}

	#[test]
	fn test_client_rejects_garbage_endpoint() {
		assert!(RpcClient::new("not a url", Duration::from_secs(1)).is_err());
	}

	#[test]
	fn test_request_serialization() {
		let request = RpcRequest::build("eth_chainId", json!([]));
		let encoded = serde_json::to_value(&request).expect("encode");
		assert_eq!(
			encoded,
			json!({"jsonrpc": "2.0", "id": 1, "method": "eth_chainId", "params": []})
		);
	}

	#[test]
	fn test_quantity_helpers() {
		assert_eq!(quantity_u64(&json!("0x89")).unwrap(), 137);
		assert_eq!(
			quantity_u256(&json!("0xde0b6b3a7640000")).unwrap(),
			U256::from(1_000_000_000_000_000_000u64)
		);
		assert!(quantity_u64(&json!(137)).is_err());
	}
}
