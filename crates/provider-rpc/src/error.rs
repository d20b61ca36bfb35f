//! Error types for the JSON-RPC client.

use provider_types::{ProviderError, VmFault};
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by [`RpcClient`](crate::RpcClient).
#[derive(Error, Debug)]
pub enum RpcError {
	#[error("invalid endpoint url: {0}")]
	InvalidUrl(#[from] url::ParseError),

	#[error(transparent)]
	Transport(#[from] reqwest::Error),

	#[error(transparent)]
	Node(#[from] NodeError),

	#[error("invalid response: {0}")]
	InvalidResponse(String),

	#[error("non-standard block header: extra data is {len} bytes")]
	NonStandardHeader { len: usize },
}

/// Error object returned by the node.
///
/// The payload is kept exactly as the node sent it so the VM-fault
/// classifier runs over the original shape, not a re-rendering.
#[derive(Error, Debug, Clone)]
#[error("node returned error {code}: {message}")]
pub struct NodeError {
	pub code: i64,
	pub message: String,
	pub data: Option<Value>,
	raw: Value,
}

impl NodeError {
	pub(crate) fn from_raw(raw: Value) -> Self {
		let code = raw.get("code").and_then(Value::as_i64).unwrap_or(0);
		let message = raw
			.get("message")
			.and_then(Value::as_str)
			.unwrap_or_default()
			.to_string();
		let data = raw.get("data").cloned();
		Self {
			code,
			message,
			data,
			raw,
		}
	}

	/// The payload exactly as the node sent it.
	pub fn raw(&self) -> &Value {
		&self.raw
	}

	/// Decodes the payload into a structured VM fault.
	pub fn fault(&self) -> VmFault {
		VmFault::decode(&self.raw)
	}
}

impl From<RpcError> for ProviderError {
	fn from(error: RpcError) -> Self {
		match error {
			RpcError::Node(node) => ProviderError::Node {
				code: node.code,
				message: node.message,
				payload: node.raw,
			},
			other => ProviderError::Transport(other.to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use provider_types::VmFaultKind;
	use serde_json::json;

	#[test]
	fn test_node_error_keeps_raw_payload() {
		let raw = json!({"code": 3, "message": "execution reverted: Paused", "data": "0x"});
		let node = NodeError::from_raw(raw.clone());
		assert_eq!(node.code, 3);
		assert_eq!(node.message, "execution reverted: Paused");
		assert_eq!(node.raw(), &raw);
	}

	#[test]
	fn test_node_error_classifies_through_fault() {
		let node = NodeError::from_raw(json!({"code": 3, "message": "execution reverted: Paused"}));
		let fault = node.fault();
		assert_eq!(fault.kind, VmFaultKind::ContractLogic);
		assert_eq!(fault.revert_reason.as_deref(), Some("Paused"));
	}

	#[test]
	fn test_provider_error_conversion_preserves_payload() {
		let raw = json!({"code": -32000, "message": "out of gas"});
		let error: ProviderError = RpcError::Node(NodeError::from_raw(raw.clone())).into();
		match error {
			ProviderError::Node {
				code,
				message,
				payload,
			} => {
				assert_eq!(code, -32000);
				assert_eq!(message, "out of gas");
				assert_eq!(payload, raw);
			}
			other => panic!("expected node error, got {other:?}"),
		}
	}
}
