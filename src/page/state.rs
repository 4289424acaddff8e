use std::collections::HashSet;
use std::fmt;

use bscdapp_types::{Account, ExtensionInfo, NetworkDescriptor, NetworkKind};

use crate::config::PageConfig;

/// Network classification held by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    /// Not yet reported (before enablement)
    Unknown,
    Mainnet,
    Testnet,
    /// Reported, but not a BSC network
    Unrecognized,
}

impl NetworkStatus {
    pub fn from_descriptor(network: Option<&NetworkDescriptor>) -> Self {
        match network.map(NetworkDescriptor::kind) {
            None => Self::Unknown,
            Some(NetworkKind::BscMainnet) => Self::Mainnet,
            Some(NetworkKind::BscTestnet) => Self::Testnet,
            Some(NetworkKind::Other) => Self::Unrecognized,
        }
    }

    pub fn kind(&self) -> Option<NetworkKind> {
        match self {
            Self::Mainnet => Some(NetworkKind::BscMainnet),
            Self::Testnet => Some(NetworkKind::BscTestnet),
            Self::Unknown | Self::Unrecognized => None,
        }
    }
}

/// User-triggered operations that go through the connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Enable,
    Sign,
    Transfer,
    Execute,
    BalanceAndHistory,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Enable => "Enable",
            Self::Sign => "Sign message",
            Self::Transfer => "Transfer",
            Self::Execute => "Execute",
            Self::BalanceAndHistory => "Balance and history",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferField {
    To,
    Amount,
}

impl TransferField {
    pub const ALL: [TransferField; 2] = [TransferField::To, TransferField::Amount];
}

/// Native-currency transfer form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferFormState {
    pub to: String,
    pub amount: String,
    tx_hash: Option<String>,
}

impl TransferFormState {
    pub fn new(to: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            amount: amount.into(),
            tx_hash: None,
        }
    }

    pub fn field(&self, field: TransferField) -> &str {
        match field {
            TransferField::To => &self.to,
            TransferField::Amount => &self.amount,
        }
    }

    pub fn field_mut(&mut self, field: TransferField) -> &mut String {
        match field {
            TransferField::To => &mut self.to,
            TransferField::Amount => &mut self.amount,
        }
    }

    pub fn tx_hash(&self) -> Option<&str> {
        self.tx_hash.as_deref()
    }

    pub(crate) fn record_tx_hash(&mut self, hash: String) {
        self.tx_hash = Some(hash);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractField {
    Address,
    Receiver,
    Amount,
}

impl ContractField {
    pub const ALL: [ContractField; 3] = [
        ContractField::Address,
        ContractField::Receiver,
        ContractField::Amount,
    ];
}

/// Contract-call form. Same lifecycle as [`TransferFormState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractFormState {
    pub address: String,
    pub receiver: String,
    pub amount: String,
    tx_hash: Option<String>,
}

impl ContractFormState {
    pub fn new(
        address: impl Into<String>,
        receiver: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            receiver: receiver.into(),
            amount: amount.into(),
            tx_hash: None,
        }
    }

    pub fn field(&self, field: ContractField) -> &str {
        match field {
            ContractField::Address => &self.address,
            ContractField::Receiver => &self.receiver,
            ContractField::Amount => &self.amount,
        }
    }

    pub fn field_mut(&mut self, field: ContractField) -> &mut String {
        match field {
            ContractField::Address => &mut self.address,
            ContractField::Receiver => &mut self.receiver,
            ContractField::Amount => &mut self.amount,
        }
    }

    pub fn tx_hash(&self) -> Option<&str> {
        self.tx_hash.as_deref()
    }

    pub(crate) fn record_tx_hash(&mut self, hash: String) {
        self.tx_hash = Some(hash);
    }
}

/// Signature of the demo message. Set once, never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureState(Option<String>);

impl SignatureState {
    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_signed(&self) -> bool {
        self.0.is_some()
    }

    pub(crate) fn set(&mut self, signature: String) {
        self.0 = Some(signature);
    }
}

/// Everything the renderer needs.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Extension the connector is bound to; `None` when nothing is installed.
    pub extension: Option<ExtensionInfo>,
    pub enabled: bool,
    pub account: Option<Account>,
    pub network: NetworkStatus,
    pub signature: SignatureState,
    pub transfer: TransferFormState,
    pub contract: ContractFormState,
    /// Last surfaced action failure; cleared by the next success.
    pub last_error: Option<String>,
    in_flight: HashSet<Action>,
}

impl ViewState {
    pub fn new(page: &PageConfig) -> Self {
        Self {
            extension: None,
            enabled: false,
            account: None,
            network: NetworkStatus::Unknown,
            signature: SignatureState::default(),
            transfer: TransferFormState::new(&page.transfer_to, &page.transfer_amount),
            contract: ContractFormState::new(
                &page.contract_address,
                &page.contract_receiver,
                &page.contract_amount,
            ),
            last_error: None,
            in_flight: HashSet::new(),
        }
    }

    pub fn is_installed(&self) -> bool {
        self.extension.is_some()
    }

    pub fn is_pending(&self, action: Action) -> bool {
        self.in_flight.contains(&action)
    }

    pub fn any_pending(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Mark `action` in flight. Returns false if it already was.
    pub(crate) fn begin(&mut self, action: Action) -> bool {
        self.in_flight.insert(action)
    }

    pub(crate) fn finish(&mut self, action: Action) {
        self.in_flight.remove(&action);
    }
}
