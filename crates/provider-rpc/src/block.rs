//! Typed block decoding.

use crate::error::RpcError;
use crate::poa::HeaderCompat;
use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Consensus bound on header extra data, in bytes.
pub const MAX_EXTRA_DATA_BYTES: usize = 32;

/// Block selector for `eth_getBlockByNumber`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
	Number(u64),
	Earliest,
	Latest,
	Pending,
}

impl Serialize for BlockTag {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			BlockTag::Number(number) => serializer.serialize_str(&format!("{number:#x}")),
			BlockTag::Earliest => serializer.serialize_str("earliest"),
			BlockTag::Latest => serializer.serialize_str("latest"),
			BlockTag::Pending => serializer.serialize_str("pending"),
		}
	}
}

impl From<u64> for BlockTag {
	fn from(number: u64) -> Self {
		BlockTag::Number(number)
	}
}

/// An execution-layer block, transactions as hashes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
	/// Block number; absent for pending blocks.
	#[serde(default, with = "quantity_opt")]
	pub number: Option<u64>,
	/// Block hash; absent for pending blocks.
	#[serde(default)]
	pub hash: Option<B256>,
	pub parent_hash: B256,
	pub miner: Address,
	#[serde(with = "quantity")]
	pub gas_limit: u64,
	#[serde(with = "quantity")]
	pub gas_used: u64,
	#[serde(with = "quantity")]
	pub timestamp: u64,
	#[serde(default, with = "quantity_opt")]
	pub base_fee_per_gas: Option<u64>,
	pub extra_data: Bytes,
	#[serde(default)]
	pub transactions: Vec<B256>,
}

impl Block {
	/// Decodes a raw block object under the given header mode.
	///
	/// Standard mode rejects headers whose extra data exceeds the
	/// consensus bound; chains that ran permissioned consensus keep
	/// signer seals there and need [`HeaderCompat::PoaExtended`].
	pub fn decode(value: Value, compat: HeaderCompat) -> Result<Self, RpcError> {
		let block: Block = serde_json::from_value(value)
			.map_err(|e| RpcError::InvalidResponse(format!("block: {e}")))?;

		if compat == HeaderCompat::Standard && block.extra_data.len() > MAX_EXTRA_DATA_BYTES {
			return Err(RpcError::NonStandardHeader {
				len: block.extra_data.len(),
			});
		}

		Ok(block)
	}
}

mod quantity {
	use serde::{Deserialize, Deserializer};

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
		let text = String::deserialize(deserializer)?;
		super::parse_quantity(&text).map_err(serde::de::Error::custom)
	}
}

mod quantity_opt {
	use serde::{Deserialize, Deserializer};

	pub fn deserialize<'de, D: Deserializer<'de>>(
		deserializer: D,
	) -> Result<Option<u64>, D::Error> {
		match Option::<String>::deserialize(deserializer)? {
			Some(text) => super::parse_quantity(&text)
				.map(Some)
				.map_err(serde::de::Error::custom),
			None => Ok(None),
		}
	}
}

pub(crate) fn parse_quantity(text: &str) -> Result<u64, String> {
	u64::from_str_radix(text.trim_start_matches("0x"), 16)
		.map_err(|e| format!("invalid quantity {text:?}: {e}"))
}
