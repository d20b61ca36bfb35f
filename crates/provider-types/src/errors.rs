//! Error types surfaced to the host framework.

use crate::vm::VmError;
use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors a provider raises across the host contract.
///
/// Transport failures propagate unchanged from the underlying client; node
/// error objects keep their raw payload so the host can run the VM-fault
/// translator over it.
#[derive(Error, Debug)]
pub enum ProviderError {
	#[error("provider is not connected")]
	NotConnected,

	#[error("transport error: {0}")]
	Transport(String),

	#[error("node returned error {code}: {message}")]
	Node {
		code: i64,
		message: String,
		/// The error object exactly as the node sent it.
		payload: Value,
	},

	#[error("configuration error: {0}")]
	Config(String),

	#[error(transparent)]
	VirtualMachine(#[from] VmError),
}
