//! Provider lifecycle contract and plugin registration.

use crate::config::ProviderSettings;
use crate::errors::ProviderError;
use crate::networks::NetworkIdent;
use crate::vm::{TransactionContext, VmError, VmFault};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while registering or instantiating plugins.
#[derive(Error, Debug)]
pub enum PluginError {
	#[error("no provider registered for {0}")]
	UnsupportedNetwork(NetworkIdent),

	#[error("provider construction failed: {0}")]
	Construction(String),
}

pub type PluginResult<T> = std::result::Result<T, PluginError>;

/// Lifecycle contract a hosted-RPC provider exposes to the host framework.
///
/// The host drives a provider through `connect`/`disconnect`, reads the
/// resolved endpoint via `connection_str`, and routes node error payloads
/// through `virtual_machine_error` when a transaction fails.
#[async_trait]
pub trait UpstreamProvider: Send + Sync {
	/// Short name of the hosting service, e.g. `"llamanodes"`.
	fn name(&self) -> &'static str;

	/// The network this provider instance serves.
	fn network(&self) -> &NetworkIdent;

	/// The resolved endpoint URL, access key included when configured.
	///
	/// Resolution is total: unknown pairs degrade to a guessed URL.
	fn connection_str(&self) -> String;

	/// Opens the JSON-RPC client against the resolved endpoint.
	async fn connect(&mut self) -> std::result::Result<(), ProviderError>;

	/// Drops the client. Idempotent.
	async fn disconnect(&mut self);

	fn is_connected(&self) -> bool;

	/// Translates a raw node error payload into the user-visible kind.
	fn virtual_machine_error(
		&self,
		raw: &Value,
		txn: Option<TransactionContext>,
	) -> VmError {
		VmFault::decode(raw).into_error(txn)
	}
}

/// Builds providers for the networks a plugin supports.
pub trait ProviderFactory: Send + Sync {
	/// Name the plugin registers under.
	fn provider_name(&self) -> &'static str;

	/// The static list of networks this plugin serves.
	fn supported_networks(&self) -> Vec<NetworkIdent>;

	/// Creates an unconnected provider for one of the supported networks.
	fn create(
		&self,
		network: NetworkIdent,
		settings: ProviderSettings,
	) -> PluginResult<Box<dyn UpstreamProvider>>;
}

/// Registry associating each supported network with its provider factory.
///
/// Populated once at plugin load time; the host enumerates a plugin's
/// networks and registers its factory against every pair.
#[derive(Default)]
pub struct ProviderRegistry {
	factories: HashMap<NetworkIdent, Arc<dyn ProviderFactory>>,
}

impl ProviderRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `factory` for every network it supports.
	pub fn register(&mut self, factory: Arc<dyn ProviderFactory>) {
		for network in factory.supported_networks() {
			self.factories.insert(network, Arc::clone(&factory));
		}
	}

	/// Networks with a registered provider.
	pub fn networks(&self) -> Vec<NetworkIdent> {
		self.factories.keys().cloned().collect()
	}

	pub fn contains(&self, network: &NetworkIdent) -> bool {
		self.factories.contains_key(network)
	}

	/// Instantiates an unconnected provider for `network`.
	pub fn create(
		&self,
		network: &NetworkIdent,
		settings: ProviderSettings,
	) -> PluginResult<Box<dyn UpstreamProvider>> {
		let factory = self
			.factories
			.get(network)
			.ok_or_else(|| PluginError::UnsupportedNetwork(network.clone()))?;
		factory.create(network.clone(), settings)
	}
}
