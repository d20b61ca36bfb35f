//! JSON-RPC plumbing shared by the hosted-provider plugins.
//!
//! This crate supplies the pieces every hosting-service plugin needs:
//! endpoint resolution (subdomain tables, fallback naming rule, the
//! per-instance URL cache), a thin HTTP JSON-RPC client, typed block
//! decoding with the proof-of-authority compatibility mode, and the
//! gas-price estimation strategies.

pub mod block;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod gas;
pub mod poa;

pub use block::{Block, BlockTag, MAX_EXTRA_DATA_BYTES};
pub use client::RpcClient;
pub use endpoint::{resolve_endpoint, standard_subdomain, EndpointResolver, HostProfile};
pub use error::{NodeError, RpcError};
pub use gas::{FeeHistory, GasPriceStrategy};
pub use poa::{requires_header_compat, HeaderCompat, POA_CHAIN_IDS};
