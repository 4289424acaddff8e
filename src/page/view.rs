//! Pure rendering of [`ViewState`] into the panels that are visible.
//!
//! The TUI draws a [`PageView`]; the snapshot command prints [`PageView::lines`].

use bscdapp_types::NetworkKind;

use super::gate::GateState;
use super::state::{Action, NetworkStatus, ViewState};
use crate::config::NetworksConfig;

pub const NO_EXTENSION_TEXT: &str = "No Browser Extension detected";

/// A clickable control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: String,
    /// The action is in flight; the control is disabled
    pub pending: bool,
}

impl Control {
    fn new(label: impl Into<String>, state: &ViewState, action: Action) -> Self {
        Self {
            label: label.into(),
            pending: state.is_pending(action),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPanel {
    pub address: String,
    pub balance_action: Control,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkPanel {
    Recognized { label: String },
    Mismatch { message: String, help_url: String },
}

impl NetworkPanel {
    pub fn text(&self) -> String {
        match self {
            Self::Recognized { label } => format!("Network: {}", label),
            Self::Mismatch { message, help_url } => {
                format!("{} (Use BSC with Metamask: {})", message, help_url)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignPanel {
    pub message: String,
    /// Empty until signed
    pub signature: String,
    /// Only offered while unsigned
    pub action: Option<Control>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPanel {
    pub to: String,
    pub amount: String,
    pub tx_hash: Option<String>,
    pub action: Control,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractPanel {
    pub address: String,
    pub receiver: String,
    pub amount: String,
    pub tx_hash: Option<String>,
    pub action: Control,
}

/// The visible page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub status: String,
    pub enable_button: Option<Control>,
    pub account: Option<AccountPanel>,
    pub network: Option<NetworkPanel>,
    pub sign: Option<SignPanel>,
    pub transfer: Option<TransferPanel>,
    pub contract: Option<ContractPanel>,
    pub error: Option<String>,
}

pub fn render(state: &ViewState, networks: &NetworksConfig, message: &str) -> PageView {
    let gate = GateState::of(state);

    let (status, enable_button) = match &gate {
        GateState::Disconnected => (NO_EXTENSION_TEXT.to_string(), None),
        GateState::ExtensionDetected { extension } => (
            format!("{} Detected. Not enabled", extension.name),
            Some(Control::new(format!("Enable {}", extension.name), state, Action::Enable)),
        ),
        GateState::Enabled { extension, .. } => {
            (format!("{} Detected. Enabled.", extension.name), None)
        }
    };

    let enabled = matches!(gate, GateState::Enabled { .. });

    let account = match (&state.account, enabled) {
        (Some(account), true) => Some(AccountPanel {
            address: account.address.clone(),
            balance_action: Control::new(
                "Get Balance and History",
                state,
                Action::BalanceAndHistory,
            ),
        }),
        _ => None,
    };

    let network = enabled.then(|| network_panel(state.network, networks));

    let mut view = PageView {
        status,
        enable_button,
        account,
        network,
        sign: None,
        transfer: None,
        contract: None,
        error: state.last_error.clone(),
    };

    if gate.actions_open(networks) {
        view.sign = Some(SignPanel {
            message: message.to_string(),
            signature: state.signature.get().unwrap_or_default().to_string(),
            action: (!state.signature.is_signed())
                .then(|| Control::new("Sign Message", state, Action::Sign)),
        });
        view.transfer = Some(TransferPanel {
            to: state.transfer.to.clone(),
            amount: state.transfer.amount.clone(),
            tx_hash: state.transfer.tx_hash().map(str::to_string),
            action: Control::new("Transfer", state, Action::Transfer),
        });
        view.contract = Some(ContractPanel {
            address: state.contract.address.clone(),
            receiver: state.contract.receiver.clone(),
            amount: state.contract.amount.clone(),
            tx_hash: state.contract.tx_hash().map(str::to_string),
            action: Control::new("Execute", state, Action::Execute),
        });
    }

    view
}

fn network_panel(status: NetworkStatus, networks: &NetworksConfig) -> NetworkPanel {
    match status.kind() {
        Some(kind) if networks.recognizes(kind) => NetworkPanel::Recognized {
            label: kind.label().to_string(),
        },
        _ => NetworkPanel::Mismatch {
            message: mismatch_message(networks),
            help_url: networks.help_url.clone(),
        },
    }
}

/// "Not connected to BSC Mainnet", or "... BSC Mainnet or Testnet" when both are recognized.
fn mismatch_message(networks: &NetworksConfig) -> String {
    let mut kinds: Vec<NetworkKind> = networks
        .recognized
        .iter()
        .copied()
        .filter(|kind| *kind != NetworkKind::Other)
        .collect();
    kinds.sort();
    kinds.dedup();
    let names: Vec<&str> = kinds
        .iter()
        .map(|kind| kind.label().trim_start_matches("BSC "))
        .collect();
    format!("Not connected to BSC {}", names.join(" or "))
}

impl PageView {
    /// Panels that carry user actions besides enable.
    pub fn has_action_panels(&self) -> bool {
        self.sign.is_some() || self.transfer.is_some() || self.contract.is_some()
    }

    /// Plain-text rendering, one line per row.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.status.clone()];

        if let Some(button) = &self.enable_button {
            lines.push(button_line(button));
        }
        if let Some(account) = &self.account {
            lines.push(format!("Current account: {}", account.address));
            lines.push(button_line(&account.balance_action));
        }
        if let Some(network) = &self.network {
            lines.push(network.text());
        }
        if let Some(sign) = &self.sign {
            lines.push(format!("message: {}", sign.message));
            lines.push(format!("signature: {}", sign.signature));
            if let Some(action) = &sign.action {
                lines.push(button_line(action));
            }
        }
        if let Some(transfer) = &self.transfer {
            lines.push(format!("transfer to: {}", transfer.to));
            lines.push(format!("amount: {}", transfer.amount));
            lines.push(button_line(&transfer.action));
            if let Some(hash) = &transfer.tx_hash {
                lines.push(format!("tx: {}", hash));
            }
        }
        if let Some(contract) = &self.contract {
            lines.push(format!("contract: {}", contract.address));
            lines.push(format!("receiver: {}", contract.receiver));
            lines.push(format!("amount: {}", contract.amount));
            lines.push(button_line(&contract.action));
            if let Some(hash) = &contract.tx_hash {
                lines.push(format!("tx: {}", hash));
            }
        }
        if let Some(error) = &self.error {
            lines.push(format!("error: {}", error));
        }
        lines
    }
}

fn button_line(control: &Control) -> String {
    if control.pending {
        format!("[{} ...]", control.label)
    } else {
        format!("[{}]", control.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use bscdapp_types::{Account, ExtensionInfo};

    const MESSAGE: &str = "Hello Binance Smart Chain";

    fn state(installed: bool, enabled: bool, network: NetworkStatus) -> ViewState {
        let mut s = ViewState::new(&PageConfig::default());
        if installed {
            s.extension = Some(ExtensionInfo {
                name: "MetaMask".to_string(),
                supports_structured_signing: true,
            });
        }
        s.enabled = enabled;
        if enabled {
            s.account = Some(Account::new("0xa11ce00000000000000000000000000000000001"));
        }
        s.network = network;
        s
    }

    #[test]
    fn not_installed_shows_only_status() {
        let view = render(
            &state(false, false, NetworkStatus::Unknown),
            &NetworksConfig::default(),
            MESSAGE,
        );
        assert_eq!(view.status, "No Browser Extension detected");
        assert!(view.enable_button.is_none());
        assert!(view.account.is_none());
        assert!(view.network.is_none());
        assert!(!view.has_action_panels());
        assert_eq!(view.lines(), vec!["No Browser Extension detected".to_string()]);
    }

    #[test]
    fn installed_not_enabled_offers_enable() {
        let view = render(
            &state(true, false, NetworkStatus::Unknown),
            &NetworksConfig::default(),
            MESSAGE,
        );
        assert_eq!(view.status, "MetaMask Detected. Not enabled");
        assert_eq!(view.enable_button.as_ref().unwrap().label, "Enable MetaMask");
        assert!(view.network.is_none());
        assert!(!view.has_action_panels());
    }

    #[test]
    fn enabled_on_wrong_network_shows_mismatch_only() {
        let view = render(
            &state(true, true, NetworkStatus::Unrecognized),
            &NetworksConfig::default(),
            MESSAGE,
        );
        assert_eq!(view.status, "MetaMask Detected. Enabled.");
        assert!(view.enable_button.is_none());
        match view.network.as_ref().unwrap() {
            NetworkPanel::Mismatch { message, help_url } => {
                assert_eq!(message, "Not connected to BSC Mainnet");
                assert!(help_url.contains("metamask"));
            }
            other => panic!("unexpected network panel: {:?}", other),
        }
        assert!(!view.has_action_panels());
    }

    #[test]
    fn enabled_on_mainnet_shows_all_panels_with_defaults() {
        let view = render(
            &state(true, true, NetworkStatus::Mainnet),
            &NetworksConfig::default(),
            MESSAGE,
        );
        assert_eq!(view.network.as_ref().unwrap().text(), "Network: BSC Mainnet");

        let sign = view.sign.unwrap();
        assert_eq!(sign.message, MESSAGE);
        assert_eq!(sign.signature, "");
        assert!(sign.action.is_some());

        let transfer = view.transfer.unwrap();
        assert!(transfer.to.starts_with("0x987"));
        assert_eq!(transfer.amount, "0.01");
        assert!(transfer.tx_hash.is_none());
        assert!(view.contract.is_some());
    }

    #[test]
    fn testnet_mismatch_names_both_networks() {
        let networks = NetworksConfig {
            recognized: vec![NetworkKind::BscMainnet, NetworkKind::BscTestnet],
            ..NetworksConfig::default()
        };
        let view = render(&state(true, true, NetworkStatus::Unrecognized), &networks, MESSAGE);
        match view.network.unwrap() {
            NetworkPanel::Mismatch { message, .. } => {
                assert_eq!(message, "Not connected to BSC Mainnet or Testnet")
            }
            other => panic!("unexpected network panel: {:?}", other),
        }

        let view = render(&state(true, true, NetworkStatus::Testnet), &networks, MESSAGE);
        assert_eq!(view.network.as_ref().unwrap().text(), "Network: BSC Testnet");
        assert!(view.has_action_panels());
    }

    #[test]
    fn mismatch_lists_networks_once_in_fixed_order() {
        for recognized in [
            vec![NetworkKind::BscTestnet, NetworkKind::BscMainnet],
            vec![
                NetworkKind::BscMainnet,
                NetworkKind::BscTestnet,
                NetworkKind::BscMainnet,
            ],
        ] {
            let networks = NetworksConfig {
                recognized,
                ..NetworksConfig::default()
            };
            assert_eq!(
                mismatch_message(&networks),
                "Not connected to BSC Mainnet or Testnet"
            );
        }

        let networks = NetworksConfig {
            recognized: vec![NetworkKind::BscMainnet, NetworkKind::BscMainnet],
            ..NetworksConfig::default()
        };
        assert_eq!(mismatch_message(&networks), "Not connected to BSC Mainnet");
    }

    #[test]
    fn sign_action_hidden_once_signed() {
        let mut s = state(true, true, NetworkStatus::Mainnet);
        s.signature.set("0xsig".to_string());
        let sign = render(&s, &NetworksConfig::default(), MESSAGE).sign.unwrap();
        assert_eq!(sign.signature, "0xsig");
        assert!(sign.action.is_none());
    }

    #[test]
    fn pending_controls_are_marked() {
        let mut s = state(true, false, NetworkStatus::Unknown);
        s.begin(Action::Enable);
        let view = render(&s, &NetworksConfig::default(), MESSAGE);
        assert!(view.enable_button.as_ref().unwrap().pending);
        assert!(view.lines().contains(&"[Enable MetaMask ...]".to_string()));
    }
}
