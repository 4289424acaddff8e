//! In-memory connector standing in for a browser wallet extension.
//!
//! Signatures and hashes are blake3 digests: deterministic, opaque and
//! clearly not real chain artifacts.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use alloy_primitives::U256;
use async_trait::async_trait;
use bscdapp_types::{
    Account, ContractCallParams, ContractRef, ExtensionInfo, HistoryEntry, NetworkDescriptor,
    TransactionRequest, TypedField, Wei, BSC_MAINNET_CHAIN_ID, BSC_TESTNET_CHAIN_ID,
};
use tracing::{debug, info};

use super::events::{Listener, ListenerSet, Subscription};
use super::units;
use super::Connector;
use crate::abi;
use crate::config::{ConnectorConfig, SimulatorConfig};
use crate::error::{DappError, DappResult};

/// Networks visited by [`SimulatedConnector::cycle_network`]: mainnet, testnet, Ethereum.
const NETWORK_CYCLE: [u64; 3] = [BSC_MAINNET_CHAIN_ID, BSC_TESTNET_CHAIN_ID, 1];

const SIGNATURE_LEN: usize = 65;
const TX_HASH_LEN: usize = 32;
const SELECTOR_LEN: usize = 4;

struct SimState {
    extension: Option<ExtensionInfo>,
    enabled: bool,
    network: NetworkDescriptor,
    accounts: Vec<String>,
    active: usize,
    balances: HashMap<String, U256>,
    history: Vec<HistoryEntry>,
    nonce: u64,
    reject_requests: bool,
}

impl SimState {
    fn active_address(&self) -> Option<&str> {
        self.accounts.get(self.active).map(String::as_str)
    }

    fn require_enabled(&self) -> DappResult<&str> {
        if self.extension.is_none() {
            return Err(DappError::ExtensionNotInstalled);
        }
        if !self.enabled {
            return Err(DappError::NotEnabled);
        }
        self.active_address().ok_or(DappError::NoAccount)
    }

    fn require_approval(&self) -> DappResult<()> {
        if self.reject_requests {
            return Err(DappError::rejected("User denied the request"));
        }
        Ok(())
    }
}

pub struct SimulatedConnector {
    state: Mutex<SimState>,
    latency: Option<Duration>,
    enabled_listeners: ListenerSet<Account>,
    network_listeners: ListenerSet<NetworkDescriptor>,
    account_listeners: ListenerSet<Account>,
}

impl SimulatedConnector {
    /// Build from config. A named extension that is not in the simulator's
    /// installed list yields a connector with no extension installed.
    pub fn new(connector: &ConnectorConfig, sim: &SimulatorConfig) -> DappResult<Self> {
        let extension = match &connector.extension {
            Some(name) => sim.extensions.iter().find(|e| &e.name == name).cloned(),
            None => sim.extensions.first().cloned(),
        };

        let balance = units::parse_ether(&sim.balance)?;
        let balances = sim
            .accounts
            .iter()
            .map(|a| (a.to_lowercase(), balance))
            .collect();

        info!(
            extension = extension.as_ref().map(|e| e.name.as_str()).unwrap_or("none"),
            chain_id = sim.chain_id,
            accounts = sim.accounts.len(),
            "Simulated connector ready"
        );

        Ok(Self {
            state: Mutex::new(SimState {
                enabled: sim.enabled && extension.is_some(),
                extension,
                network: NetworkDescriptor::from_chain_id(sim.chain_id),
                accounts: sim.accounts.clone(),
                active: 0,
                balances,
                history: Vec::new(),
                nonce: 0,
                reject_requests: false,
            }),
            latency: None,
            enabled_listeners: ListenerSet::new(),
            network_listeners: ListenerSet::new(),
            account_listeners: ListenerSet::new(),
        })
    }

    /// Delay every async operation, to make pending states observable.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make subsequent signing and broadcast requests fail as if the user
    /// clicked "reject" in the extension.
    pub fn set_reject_requests(&self, reject: bool) {
        self.state().reject_requests = reject;
    }

    /// Point the wallet at another chain and emit `network_changed`.
    pub fn switch_network(&self, chain_id: u64) {
        let network = NetworkDescriptor::from_chain_id(chain_id);
        self.state().network = network.clone();
        debug!(chain_id, "Simulated network switch");
        self.network_listeners.emit(network);
    }

    pub fn cycle_network(&self) {
        let current = self.state().network.chain_id;
        let pos = NETWORK_CYCLE.iter().position(|&c| c == current);
        let next = NETWORK_CYCLE[pos.map_or(0, |p| (p + 1) % NETWORK_CYCLE.len())];
        self.switch_network(next);
    }

    /// Select the next configured account and emit `account_changed`.
    /// Nothing is emitted while the extension is not enabled.
    pub fn cycle_account(&self) {
        let account = {
            let mut state = self.state();
            if !state.enabled || state.accounts.is_empty() {
                return;
            }
            state.active = (state.active + 1) % state.accounts.len();
            state.active_address().map(Account::new)
        };
        if let Some(account) = account {
            debug!(address = %account.address, "Simulated account switch");
            self.account_listeners.emit(account);
        }
    }

    fn state(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

fn digest_hex(parts: &[&[u8]], len: usize) -> String {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(&(part.len() as u64).to_le_bytes());
        hasher.update(part);
    }
    let mut out = vec![0u8; len];
    hasher.finalize_xof().fill(&mut out);
    format!("0x{}", hex::encode(out))
}

fn same_address(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[async_trait]
impl Connector for SimulatedConnector {
    fn is_browser_extension_installed(&self) -> bool {
        self.state().extension.is_some()
    }

    fn is_browser_extension_enabled(&self) -> bool {
        self.state().enabled
    }

    fn current_account(&self) -> Option<Account> {
        let state = self.state();
        if !state.enabled {
            return None;
        }
        state.active_address().map(Account::new)
    }

    fn network(&self) -> Option<NetworkDescriptor> {
        Some(self.state().network.clone())
    }

    fn browser_extension(&self) -> Option<ExtensionInfo> {
        self.state().extension.clone()
    }

    fn on_enabled(&self, listener: Listener<Account>) -> Subscription {
        self.enabled_listeners.subscribe(listener)
    }

    fn on_network_changed(&self, listener: Listener<NetworkDescriptor>) -> Subscription {
        self.network_listeners.subscribe(listener)
    }

    fn on_account_changed(&self, listener: Listener<Account>) -> Subscription {
        self.account_listeners.subscribe(listener)
    }

    async fn enable_browser_extension(&self) -> DappResult<()> {
        self.simulate_latency().await;
        let account = {
            let mut state = self.state();
            if state.extension.is_none() {
                return Err(DappError::ExtensionNotInstalled);
            }
            state.require_approval()?;
            state.enabled = true;
            state.active_address().map(Account::new).ok_or(DappError::NoAccount)?
        };
        info!(address = %account.address, "Extension enabled");
        self.enabled_listeners.emit(account);
        Ok(())
    }

    async fn sign_message(&self, message: &str) -> DappResult<String> {
        self.simulate_latency().await;
        let state = self.state();
        let address = state.require_enabled()?;
        state.require_approval()?;
        Ok(digest_hex(
            &[b"personal_sign", address.as_bytes(), message.as_bytes()],
            SIGNATURE_LEN,
        ))
    }

    async fn sign_typed_data(&self, fields: &[TypedField]) -> DappResult<String> {
        self.simulate_latency().await;
        let payload = serde_json::to_vec(fields)?;
        let state = self.state();
        let address = state.require_enabled()?;
        if !state
            .extension
            .as_ref()
            .is_some_and(|e| e.supports_structured_signing)
        {
            return Err(DappError::connector("extension does not support typed data signing"));
        }
        state.require_approval()?;
        Ok(digest_hex(
            &[b"eth_signTypedData", address.as_bytes(), &payload],
            SIGNATURE_LEN,
        ))
    }

    async fn parse_ether(&self, amount: &str) -> DappResult<Wei> {
        units::parse_ether(amount).map(Wei)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> DappResult<String> {
        self.simulate_latency().await;
        let mut state = self.state();
        let from = state.require_enabled()?.to_lowercase();
        if !same_address(&tx.from, &from) {
            return Err(DappError::rejected(format!(
                "sender {} is not the active account",
                tx.from
            )));
        }
        state.require_approval()?;

        let value = U256::from_str_radix(&tx.value, 10)
            .map_err(|_| DappError::InvalidAmount(tx.value.clone()))?;
        let available = state.balances.get(&from).copied().unwrap_or_default();
        let remaining = available
            .checked_sub(value)
            .ok_or(DappError::InsufficientFunds)?;
        let mut updated = vec![(from.clone(), remaining)];
        if let Some(to) = tx.to.as_deref().map(str::to_lowercase) {
            let current = if to == from {
                Some(remaining)
            } else {
                state.balances.get(&to).copied()
            };
            if let Some(balance) = current {
                let credited = balance.checked_add(value).ok_or_else(|| {
                    DappError::connector(format!("balance of {} would overflow", to))
                })?;
                updated.push((to, credited));
            }
        }

        let nonce = state.nonce;
        state.nonce += 1;
        let hash = digest_hex(
            &[
                from.as_bytes(),
                tx.to.as_deref().unwrap_or("").as_bytes(),
                tx.value.as_bytes(),
                tx.data.as_deref().unwrap_or("").as_bytes(),
                &nonce.to_le_bytes(),
            ],
            TX_HASH_LEN,
        );

        state.balances.extend(updated);
        state.history.push(HistoryEntry {
            hash: hash.clone(),
            from,
            to: tx.to,
            value: tx.value,
            timestamp: chrono::Utc::now().timestamp(),
        });

        info!(hash = %hash, nonce, "Simulated transaction broadcast");
        Ok(hash)
    }

    async fn execute_contract(
        &self,
        contract: &ContractRef,
        method: &str,
        args: &[String],
    ) -> DappResult<ContractCallParams> {
        if !abi::has_function(&contract.abi, method) {
            return Err(DappError::UnknownMethod(method.to_string()));
        }
        let selector = digest_hex(&[method.as_bytes()], SELECTOR_LEN);
        let encoded_args = hex::encode(serde_json::to_vec(args)?);
        Ok(ContractCallParams {
            to: contract.address.clone(),
            data: format!("{}{}", selector, encoded_args),
        })
    }

    async fn get_balance(&self, address: &str) -> DappResult<Wei> {
        self.simulate_latency().await;
        let state = self.state();
        Ok(Wei(state
            .balances
            .get(&address.to_lowercase())
            .copied()
            .unwrap_or_default()))
    }

    async fn get_history(&self, address: &str) -> DappResult<Vec<HistoryEntry>> {
        self.simulate_latency().await;
        let state = self.state();
        Ok(state
            .history
            .iter()
            .filter(|entry| {
                same_address(&entry.from, address)
                    || entry.to.as_deref().is_some_and(|to| same_address(to, address))
            })
            .cloned()
            .collect())
    }
}
