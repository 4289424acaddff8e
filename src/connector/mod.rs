//! The dapp connector seam.
//!
//! Everything chain-facing (extension detection, signing, broadcast, RPC and
//! ABI encoding) sits behind [`Connector`]. The page only consumes it.

pub mod events;
pub mod simulated;
pub mod units;

use async_trait::async_trait;
use bscdapp_types::{
    Account, ContractCallParams, ContractRef, ExtensionInfo, HistoryEntry, NetworkDescriptor,
    TransactionRequest, TypedField, Wei,
};

use crate::error::DappResult;

pub use events::{Listener, ListenerSet, Subscription};
pub use simulated::SimulatedConnector;

/// Wallet/dapp capability consumed by the page.
#[async_trait]
pub trait Connector: Send + Sync {
    fn is_browser_extension_installed(&self) -> bool;

    fn is_browser_extension_enabled(&self) -> bool;

    fn current_account(&self) -> Option<Account>;

    /// Network the extension is currently pointed at, if known.
    fn network(&self) -> Option<NetworkDescriptor>;

    /// The extension this connector is bound to.
    fn browser_extension(&self) -> Option<ExtensionInfo>;

    fn on_enabled(&self, listener: Listener<Account>) -> Subscription;

    fn on_network_changed(&self, listener: Listener<NetworkDescriptor>) -> Subscription;

    fn on_account_changed(&self, listener: Listener<Account>) -> Subscription;

    /// Ask the extension for authorization. Success is reported through
    /// the `enabled` event, not the return value.
    async fn enable_browser_extension(&self) -> DappResult<()>;

    async fn sign_message(&self, message: &str) -> DappResult<String>;

    async fn sign_typed_data(&self, fields: &[TypedField]) -> DappResult<String>;

    /// Convert a decimal native-currency amount to base units.
    async fn parse_ether(&self, amount: &str) -> DappResult<Wei>;

    /// Broadcast a transaction, returning its hash.
    async fn send_transaction(&self, tx: TransactionRequest) -> DappResult<String>;

    async fn execute_contract(
        &self,
        contract: &ContractRef,
        method: &str,
        args: &[String],
    ) -> DappResult<ContractCallParams>;

    async fn get_balance(&self, address: &str) -> DappResult<Wei>;

    async fn get_history(&self, address: &str) -> DappResult<Vec<HistoryEntry>>;
}
