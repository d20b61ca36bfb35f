//! Network identity types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the canonical production network within an ecosystem.
pub const MAINNET: &str = "mainnet";

/// A (blockchain ecosystem, network) pair, e.g. `ethereum:goerli`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkIdent {
	/// Blockchain family sharing JSON-RPC semantics, e.g. `ethereum`.
	pub ecosystem: String,
	/// Chain instance within the ecosystem, e.g. `mainnet` or `goerli`.
	pub network: String,
}

impl NetworkIdent {
	pub fn new(ecosystem: impl Into<String>, network: impl Into<String>) -> Self {
		Self {
			ecosystem: ecosystem.into(),
			network: network.into(),
		}
	}

	pub fn is_mainnet(&self) -> bool {
		self.network == MAINNET
	}
}

impl fmt::Display for NetworkIdent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.ecosystem, self.network)
	}
}

/// Chain identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl ChainId {
	pub const ETHEREUM: Self = Self(1);
	pub const GOERLI: Self = Self(5);
	pub const OPTIMISM: Self = Self(10);
	pub const OPTIMISM_GOERLI: Self = Self(420);
	pub const BSC: Self = Self(56);
	pub const BSC_TESTNET: Self = Self(97);
	pub const POLYGON: Self = Self(137);
	pub const POLYGON_MUMBAI: Self = Self(80001);
	pub const ARBITRUM: Self = Self(42161);
	pub const BASE: Self = Self(8453);
}

impl fmt::Display for ChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for ChainId {
	type Err = std::num::ParseIntError;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		Ok(ChainId(s.parse()?))
	}
}
