//! Classification of node-reported virtual-machine failures.
//!
//! JSON-RPC nodes report execution failures as loosely shaped payloads: a
//! bare string, or an object carrying a nested `message` field. Everything
//! downstream works with one structured record instead, decoded here
//! exactly once at the client boundary.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Marker every contract-logic revert message starts with.
pub const REVERT_MARKER: &str = "execution reverted";

/// Context of the transaction a VM failure belongs to, when known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionContext {
	pub hash: Option<B256>,
	pub sender: Option<Address>,
	pub to: Option<Address>,
}

/// Structured form of a node-reported VM failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmFault {
	pub kind: VmFaultKind,
	/// The underlying message, or the raw payload rendered as text.
	pub message: String,
	/// Human-readable revert reason, when the node supplied one.
	pub revert_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmFaultKind {
	/// The contract's own logic reverted.
	ContractLogic,
	/// Any other VM failure, out-of-gas included.
	VirtualMachine,
}

impl VmFault {
	/// Decodes a raw JSON-RPC error payload.
	///
	/// Total over all payload shapes: a payload without a usable message
	/// becomes a generic VM fault carrying the payload rendered as text.
	pub fn decode(raw: &Value) -> Self {
		let candidate = match raw {
			Value::String(message) => Some(message.as_str()),
			Value::Object(fields) => fields.get("message").and_then(Value::as_str),
			_ => None,
		};

		let Some(message) = candidate else {
			return Self {
				kind: VmFaultKind::VirtualMachine,
				message: raw.to_string(),
				revert_reason: None,
			};
		};

		match message.strip_prefix(REVERT_MARKER) {
			Some(rest) => Self {
				kind: VmFaultKind::ContractLogic,
				message: message.to_string(),
				revert_reason: revert_reason(rest),
			},
			None => Self {
				kind: VmFaultKind::VirtualMachine,
				message: message.to_string(),
				revert_reason: None,
			},
		}
	}

	/// Lifts the fault into the user-visible error, attaching `txn`.
	pub fn into_error(self, txn: Option<TransactionContext>) -> VmError {
		match self.kind {
			VmFaultKind::ContractLogic => VmError::ContractLogic {
				reason: self.revert_reason,
				txn,
			},
			VmFaultKind::VirtualMachine => VmError::VirtualMachine {
				message: self.message,
				txn,
			},
		}
	}
}

/// Extracts the reason from whatever follows the revert marker.
///
/// Nodes append reasons colon-separated (`execution reverted: Foo`); when
/// several segments are present the last one is the reason.
fn revert_reason(rest: &str) -> Option<String> {
	if !rest.contains(':') {
		return None;
	}
	rest.rsplit(':').next().map(|reason| reason.trim().to_string())
}

/// A virtual-machine failure surfaced to the host framework.
///
/// Exactly two kinds exist: a revert of the contract's own logic,
/// optionally carrying a human-readable reason, and everything else.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VmError {
	ContractLogic {
		reason: Option<String>,
		txn: Option<TransactionContext>,
	},

	VirtualMachine {
		message: String,
		txn: Option<TransactionContext>,
	},
}

impl std::fmt::Display for VmError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			VmError::ContractLogic { reason, .. } => match reason {
				Some(reason) => write!(f, "transaction reverted: {reason}"),
				None => f.write_str("transaction reverted"),
			},
			VmError::VirtualMachine { message, .. } => {
				write!(f, "virtual machine error: {message}")
			}
		}
	}
}

impl VmError {
	/// Decodes `raw` and attaches `txn` in one step.
	pub fn classify(raw: &Value, txn: Option<TransactionContext>) -> Self {
		VmFault::decode(raw).into_error(txn)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::b256;
	use serde_json::json;

	#[test]
	fn test_revert_with_reason() {
		let fault = VmFault::decode(&json!("execution reverted: Insufficient balance"));
		assert_eq!(fault.kind, VmFaultKind::ContractLogic);
		assert_eq!(fault.revert_reason.as_deref(), Some("Insufficient balance"));
	}

	#[test]
	fn test_revert_without_reason() {
		let fault = VmFault::decode(&json!("execution reverted"));
		assert_eq!(fault.kind, VmFaultKind::ContractLogic);
		assert_eq!(fault.revert_reason, None);
	}

	#[test]
	fn test_nested_message_is_generic_vm_fault() {
		let fault = VmFault::decode(&json!({"message": "out of gas"}));
		assert_eq!(fault.kind, VmFaultKind::VirtualMachine);
		assert_eq!(fault.message, "out of gas");
		assert_eq!(fault.revert_reason, None);
	}

	#[test]
	fn test_nested_revert_message_is_contract_logic() {
		let payload = json!({"code": 3, "message": "execution reverted: Not owner"});
		let fault = VmFault::decode(&payload);
		assert_eq!(fault.kind, VmFaultKind::ContractLogic);
		assert_eq!(fault.revert_reason.as_deref(), Some("Not owner"));
	}

	#[test]
	fn test_reason_uses_last_colon_segment() {
		let fault = VmFault::decode(&json!("execution reverted: Multicall3: call failed"));
		assert_eq!(fault.revert_reason.as_deref(), Some("call failed"));
	}

	#[test]
	fn test_trailing_colon_yields_empty_reason() {
		let fault = VmFault::decode(&json!("execution reverted:"));
		assert_eq!(fault.kind, VmFaultKind::ContractLogic);
		assert_eq!(fault.revert_reason.as_deref(), Some(""));
	}

	#[test]
	fn test_unusable_payloads_fall_through() {
		for payload in [json!(null), json!(42), json!(["execution reverted"]), json!({})] {
			let fault = VmFault::decode(&payload);
			assert_eq!(fault.kind, VmFaultKind::VirtualMachine);
			assert_eq!(fault.message, payload.to_string());
		}
	}

	#[test]
	fn test_plain_string_is_generic_vm_fault() {
		let fault = VmFault::decode(&json!("stack limit reached"));
		assert_eq!(fault.kind, VmFaultKind::VirtualMachine);
		assert_eq!(fault.message, "stack limit reached");
	}

	#[test]
	fn test_classify_attaches_transaction_context() {
		let txn = TransactionContext {
			hash: Some(b256!(
				"00000000000000000000000000000000000000000000000000000000000000aa"
			)),
			sender: None,
			to: None,
		};
		let error = VmError::classify(
			&json!("execution reverted: Insufficient balance"),
			Some(txn.clone()),
		);
		match error {
			VmError::ContractLogic { reason, txn: ctx } => {
				assert_eq!(reason.as_deref(), Some("Insufficient balance"));
				assert_eq!(ctx, Some(txn));
			}
			other => panic!("expected contract logic error, got {other:?}"),
		}
	}

	#[test]
	fn test_display_mentions_reason() {
		let error = VmError::classify(&json!("execution reverted: Not owner"), None);
		assert_eq!(error.to_string(), "transaction reverted: Not owner");

		let bare = VmError::classify(&json!("execution reverted"), None);
		assert_eq!(bare.to_string(), "transaction reverted");
	}
}
