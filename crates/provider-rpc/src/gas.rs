//! Gas-price estimation strategies.
//!
//! The client's default derives a price locally from recent fee history.
//! Providers for hosted endpoints install [`GasPriceStrategy::NodeQuoted`]
//! on connect, deferring to the node's own `eth_gasPrice` answer instead
//! of computing one.

use alloy_primitives::U256;
use serde::Deserialize;

/// Reward percentile the fee-history strategy samples.
pub const DEFAULT_REWARD_PERCENTILE: f64 = 50.0;

/// Blocks of history the fee-history strategy looks back over.
pub const FEE_HISTORY_BLOCKS: u64 = 10;

/// How the client answers gas-price queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GasPriceStrategy {
	/// Derive a price locally from `eth_feeHistory`.
	FeeHistory { reward_percentile: f64 },
	/// Ask the node directly via `eth_gasPrice`.
	NodeQuoted,
}

impl Default for GasPriceStrategy {
	fn default() -> Self {
		Self::FeeHistory {
			reward_percentile: DEFAULT_REWARD_PERCENTILE,
		}
	}
}

/// The slice of an `eth_feeHistory` response the strategies need.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeHistory {
	#[serde(default)]
	pub base_fee_per_gas: Vec<U256>,
	#[serde(default)]
	pub reward: Option<Vec<Vec<U256>>>,
}

impl FeeHistory {
	/// Latest base fee plus the averaged priority reward.
	pub fn suggested_price(&self) -> U256 {
		let base_fee = self.base_fee_per_gas.last().copied().unwrap_or(U256::ZERO);

		let rewards: Vec<U256> = self
			.reward
			.iter()
			.flatten()
			.filter_map(|per_block| per_block.first().copied())
			.collect();
		if rewards.is_empty() {
			return base_fee;
		}

		let total: U256 = rewards.iter().copied().fold(U256::ZERO, |acc, r| acc + r);
		base_fee + total / U256::from(rewards.len())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_default_strategy_is_local_fee_history() {
		assert_eq!(
			GasPriceStrategy::default(),
			GasPriceStrategy::FeeHistory {
				reward_percentile: DEFAULT_REWARD_PERCENTILE
			}
		);
	}

	#[test]
	fn test_suggested_price_sums_base_fee_and_average_reward() {
		let history: FeeHistory = serde_json::from_value(json!({
			"baseFeePerGas": ["0x64", "0xc8"],
			"reward": [["0xa"], ["0x1e"]],
		}))
		.expect("fee history");

		// base fee 200, rewards 10 and 30 average to 20.
		assert_eq!(history.suggested_price(), U256::from(220));
	}

	#[test]
	fn test_suggested_price_without_rewards() {
		let history: FeeHistory = serde_json::from_value(json!({
			"baseFeePerGas": ["0x64"],
		}))
		.expect("fee history");
		assert_eq!(history.suggested_price(), U256::from(100));
	}

	#[test]
	fn test_suggested_price_of_empty_history() {
		let history: FeeHistory =
			serde_json::from_value(json!({})).expect("fee history");
		assert_eq!(history.suggested_price(), U256::ZERO);
	}
}
