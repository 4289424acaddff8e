//! The demo page: view state, connector subscriptions and the gate.
//!
//! A [`Page`] is mounted once per connector. Connector events and action
//! results arrive as [`PageEvent`]s on one channel and are applied in order
//! by [`Page::apply`]; nothing else mutates the view state.

mod actions;
pub mod gate;
pub mod state;
pub mod view;

use std::sync::Arc;

use bscdapp_types::{Account, NetworkDescriptor};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, NetworksConfig, PageConfig};
use crate::connector::{Connector, Subscription};

pub use actions::SigningMethod;
pub use gate::GateState;
pub use state::{
    Action, ContractField, ContractFormState, NetworkStatus, SignatureState, TransferField,
    TransferFormState, ViewState,
};
pub use view::{render, PageView};

/// Everything that changes the page after mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The extension authorized the page. Account and network arrive together.
    Enabled {
        account: Account,
        network: Option<NetworkDescriptor>,
    },
    NetworkChanged(NetworkDescriptor),
    AccountChanged(Account),
    Signed { signature: String },
    Transferred { tx_hash: String },
    Executed { tx_hash: String },
    /// An action without a stored result finished
    Completed(Action),
    Failed { action: Action, message: String },
}

pub struct Page {
    connector: Arc<dyn Connector>,
    state: ViewState,
    networks: NetworksConfig,
    settings: PageConfig,
    abi: Value,
    tx: mpsc::UnboundedSender<PageEvent>,
    _subscriptions: Vec<Subscription>,
}

impl Page {
    /// Derive the initial state from the connector and subscribe to its events.
    ///
    /// Subscriptions live as long as the page.
    pub fn mount(
        connector: Arc<dyn Connector>,
        config: &AppConfig,
        abi: Value,
        tx: mpsc::UnboundedSender<PageEvent>,
    ) -> Self {
        let mut state = ViewState::new(&config.page);
        let installed = connector.is_browser_extension_installed();
        state.extension = if installed {
            connector.browser_extension()
        } else {
            None
        };
        state.enabled = state.extension.is_some() && connector.is_browser_extension_enabled();
        if state.enabled {
            state.account = connector.current_account();
            state.network = NetworkStatus::from_descriptor(connector.network().as_ref());
        }

        let subscriptions = subscribe(&connector, &tx);

        info!(
            installed = state.is_installed(),
            enabled = state.enabled,
            network = ?state.network,
            "Page mounted"
        );

        Self {
            connector,
            state,
            networks: config.networks.clone(),
            settings: config.page.clone(),
            abi,
            tx,
            _subscriptions: subscriptions,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn gate(&self) -> GateState {
        GateState::of(&self.state)
    }

    /// Whether sign, transfer and contract actions are currently allowed.
    pub fn actions_open(&self) -> bool {
        self.gate().actions_open(&self.networks)
    }

    pub fn view(&self) -> PageView {
        render(&self.state, &self.networks, &self.settings.message)
    }

    pub fn transfer_field_mut(&mut self, field: TransferField) -> &mut String {
        self.state.transfer.field_mut(field)
    }

    pub fn contract_field_mut(&mut self, field: ContractField) -> &mut String {
        self.state.contract.field_mut(field)
    }

    /// Apply one event to the view state.
    pub fn apply(&mut self, event: PageEvent) {
        match event {
            PageEvent::Enabled { account, network } => {
                let network = NetworkStatus::from_descriptor(network.as_ref());
                info!(address = %account.address, ?network, "Extension enabled");
                self.state.enabled = true;
                self.state.account = Some(account);
                self.state.network = network;
            }
            PageEvent::NetworkChanged(network) => {
                if !self.state.enabled {
                    debug!(chain_id = network.chain_id, "Network change before enablement ignored");
                    return;
                }
                self.state.network = NetworkStatus::from_descriptor(Some(&network));
                info!(chain_id = network.chain_id, status = ?self.state.network, "Network changed");
            }
            PageEvent::AccountChanged(account) => {
                info!(address = %account.address, "Account changed");
                self.state.account = Some(account);
            }
            PageEvent::Signed { signature } => {
                self.succeed(Action::Sign);
                self.state.signature.set(signature);
            }
            PageEvent::Transferred { tx_hash } => {
                self.succeed(Action::Transfer);
                self.state.transfer.record_tx_hash(tx_hash);
            }
            PageEvent::Executed { tx_hash } => {
                self.succeed(Action::Execute);
                self.state.contract.record_tx_hash(tx_hash);
            }
            PageEvent::Completed(action) => self.succeed(action),
            PageEvent::Failed { action, message } => {
                warn!(%action, error = %message, "Action failed");
                self.state.finish(action);
                self.state.last_error = Some(format!("{} failed: {}", action, message));
            }
        }
    }

    fn succeed(&mut self, action: Action) {
        debug!(%action, "Action completed");
        self.state.finish(action);
        self.state.last_error = None;
    }
}

/// Register the three connector listeners, each forwarding into `tx`.
fn subscribe(
    connector: &Arc<dyn Connector>,
    tx: &mpsc::UnboundedSender<PageEvent>,
) -> Vec<Subscription> {
    // Weak: the connector owns these listeners
    let weak = Arc::downgrade(connector);
    let on_enabled = tx.clone();
    let enabled = connector.on_enabled(Arc::new(move |account: Account| {
        let network = weak.upgrade().and_then(|c| c.network());
        let _ = on_enabled.send(PageEvent::Enabled { account, network });
    }));

    let on_network = tx.clone();
    let network = connector.on_network_changed(Arc::new(move |network: NetworkDescriptor| {
        let _ = on_network.send(PageEvent::NetworkChanged(network));
    }));

    let on_account = tx.clone();
    let account = connector.on_account_changed(Arc::new(move |account: Account| {
        let _ = on_account.send(PageEvent::AccountChanged(account));
    }));

    vec![enabled, network, account]
}
