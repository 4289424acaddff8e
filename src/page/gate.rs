//! Enablement and network gate.
//!
//! `Disconnected -> ExtensionDetected -> Enabled { network }`. There is no
//! way back; network and account changes are self-transitions on `Enabled`.

use bscdapp_types::ExtensionInfo;

use super::state::{NetworkStatus, ViewState};
use crate::config::NetworksConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Disconnected,
    ExtensionDetected { extension: ExtensionInfo },
    Enabled {
        extension: ExtensionInfo,
        network: NetworkStatus,
    },
}

impl GateState {
    pub fn of(state: &ViewState) -> Self {
        match (&state.extension, state.enabled) {
            (None, _) => Self::Disconnected,
            (Some(extension), false) => Self::ExtensionDetected {
                extension: extension.clone(),
            },
            (Some(extension), true) => Self::Enabled {
                extension: extension.clone(),
                network: state.network,
            },
        }
    }

    /// Whether the sign, transfer and contract panels may be shown.
    pub fn actions_open(&self, networks: &NetworksConfig) -> bool {
        match self {
            Self::Enabled { network, .. } => network
                .kind()
                .is_some_and(|kind| networks.recognizes(kind)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use bscdapp_types::NetworkKind;

    fn metamask() -> ExtensionInfo {
        ExtensionInfo {
            name: "MetaMask".to_string(),
            supports_structured_signing: true,
        }
    }

    fn state(extension: Option<ExtensionInfo>, enabled: bool, network: NetworkStatus) -> ViewState {
        let mut s = ViewState::new(&PageConfig::default());
        s.extension = extension;
        s.enabled = enabled;
        s.network = network;
        s
    }

    #[test]
    fn no_extension_is_disconnected_even_if_flagged_enabled() {
        let gate = GateState::of(&state(None, true, NetworkStatus::Mainnet));
        assert_eq!(gate, GateState::Disconnected);
        assert!(!gate.actions_open(&NetworksConfig::default()));
    }

    #[test]
    fn detected_but_not_enabled() {
        let gate = GateState::of(&state(Some(metamask()), false, NetworkStatus::Mainnet));
        assert!(matches!(gate, GateState::ExtensionDetected { .. }));
        assert!(!gate.actions_open(&NetworksConfig::default()));
    }

    #[test]
    fn mainnet_only_variant() {
        let networks = NetworksConfig::default();
        let open = |n| GateState::of(&state(Some(metamask()), true, n)).actions_open(&networks);
        assert!(open(NetworkStatus::Mainnet));
        assert!(!open(NetworkStatus::Testnet));
        assert!(!open(NetworkStatus::Unrecognized));
        assert!(!open(NetworkStatus::Unknown));
    }

    #[test]
    fn mainnet_or_testnet_variant() {
        let networks = NetworksConfig {
            recognized: vec![NetworkKind::BscMainnet, NetworkKind::BscTestnet],
            ..NetworksConfig::default()
        };
        let open = |n| GateState::of(&state(Some(metamask()), true, n)).actions_open(&networks);
        assert!(open(NetworkStatus::Mainnet));
        assert!(open(NetworkStatus::Testnet));
        assert!(!open(NetworkStatus::Unrecognized));
    }
}
