//! Compatibility with formerly proof-of-authority chains.
//!
//! Chains that began under clique consensus pack signer seals into the
//! header extra-data field, blowing past the 32-byte consensus bound on
//! their historical blocks. Strict decoding rejects such headers;
//! providers switch to the extended mode right after learning the chain
//! id, before anything else touches the client.

use crate::block::MAX_EXTRA_DATA_BYTES;
use provider_types::ChainId;

/// Length of a clique signer seal (a secp256k1 signature).
pub const CLIQUE_SEAL_BYTES: usize = 65;

/// Chains that began as proof-of-authority networks.
pub const POA_CHAIN_IDS: &[ChainId] = &[
	ChainId::GOERLI,
	ChainId::OPTIMISM,
	ChainId::OPTIMISM_GOERLI,
	ChainId::BSC,
	ChainId::BSC_TESTNET,
	ChainId::POLYGON,
	ChainId::POLYGON_MUMBAI,
];

/// Whether `chain_id` needs [`HeaderCompat::PoaExtended`].
pub fn requires_header_compat(chain_id: ChainId) -> bool {
	POA_CHAIN_IDS.contains(&chain_id)
}

/// Header decoding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderCompat {
	/// Enforce the consensus extra-data bound.
	#[default]
	Standard,
	/// Accept clique-era headers (vanity prefix plus signer seals).
	PoaExtended,
}

/// Splits clique extra data into its 32-byte vanity prefix and the seal
/// bytes. Returns `None` for data within the standard bound.
pub fn split_clique_extra(extra: &[u8]) -> Option<(&[u8], &[u8])> {
	if extra.len() <= MAX_EXTRA_DATA_BYTES {
		return None;
	}
	Some(extra.split_at(MAX_EXTRA_DATA_BYTES))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_poa_set_membership() {
		for id in [5, 10, 420, 56, 97, 137, 80001] {
			assert!(requires_header_compat(ChainId(id)), "chain {id}");
		}
		for id in [1, 42161, 8453] {
			assert!(!requires_header_compat(ChainId(id)), "chain {id}");
		}
	}

	#[test]
	fn test_split_clique_extra() {
		// 32 bytes of vanity plus one seal, the smallest sealed layout.
		let extra = vec![0u8; MAX_EXTRA_DATA_BYTES + CLIQUE_SEAL_BYTES];
		let (vanity, seal) = split_clique_extra(&extra).expect("sealed header");
		assert_eq!(vanity.len(), 32);
		assert_eq!(seal.len(), 65);

		assert!(split_clique_extra(&[0u8; 32]).is_none());
		assert!(split_clique_extra(&[]).is_none());
	}
}
