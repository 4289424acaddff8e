//! Data types exchanged between a dapp connector and the page.
//!
//! These are plain serde structs. The connector owns the values; the page
//! only keeps copies handed to it through events and action results.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chain id of BNB Smart Chain mainnet.
pub const BSC_MAINNET_CHAIN_ID: u64 = 56;
/// Chain id of BNB Smart Chain testnet.
pub const BSC_TESTNET_CHAIN_ID: u64 = 97;

/// An account exposed by the wallet extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: String,
}

impl Account {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// Network classification derived from a chain id.
///
/// Ordered mainnet first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkKind {
    BscMainnet,
    BscTestnet,
    Other,
}

impl NetworkKind {
    pub fn from_chain_id(chain_id: u64) -> Self {
        match chain_id {
            BSC_MAINNET_CHAIN_ID => Self::BscMainnet,
            BSC_TESTNET_CHAIN_ID => Self::BscTestnet,
            _ => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BscMainnet => "BSC Mainnet",
            Self::BscTestnet => "BSC Testnet",
            Self::Other => "Unknown network",
        }
    }
}

/// Network descriptor as reported by the connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    pub chain_id: u64,
    pub name: String,
}

impl NetworkDescriptor {
    pub fn from_chain_id(chain_id: u64) -> Self {
        let name = match NetworkKind::from_chain_id(chain_id) {
            NetworkKind::Other => format!("chain-{}", chain_id),
            kind => kind.label().to_string(),
        };
        Self { chain_id, name }
    }

    pub fn kind(&self) -> NetworkKind {
        NetworkKind::from_chain_id(self.chain_id)
    }
}

/// The browser extension the connector is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionInfo {
    pub name: String,
    /// Whether the extension can sign structured (EIP-712 style) payloads.
    #[serde(default)]
    pub supports_structured_signing: bool,
}

/// One entry of a structured signing payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedField {
    #[serde(rename = "type")]
    pub field_type: String,
    pub name: String,
    pub value: String,
}

impl TypedField {
    pub fn string(name: &str, value: &str) -> Self {
        Self {
            field_type: "string".to_string(),
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// A transaction handed to the connector for broadcast.
///
/// `value` is in base units (wei) as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    pub value: String,
    #[serde(default)]
    pub data: Option<String>,
}

/// A deployed contract and its ABI, passed through to the connector as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRef {
    pub address: String,
    pub abi: serde_json::Value,
}

/// Call parameters built by the connector for a contract method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCallParams {
    pub to: String,
    pub data: String,
}

/// One transaction in an account's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    pub value: String,
    pub timestamp: i64,
}

/// Balance in base units (wei).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Wei(pub U256);

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_ids_classify() {
        assert_eq!(NetworkKind::from_chain_id(56), NetworkKind::BscMainnet);
        assert_eq!(NetworkKind::from_chain_id(97), NetworkKind::BscTestnet);
        assert_eq!(NetworkKind::from_chain_id(1), NetworkKind::Other);
    }

    #[test]
    fn descriptor_names_unknown_chains() {
        let desc = NetworkDescriptor::from_chain_id(1);
        assert_eq!(desc.name, "chain-1");
        assert_eq!(desc.kind(), NetworkKind::Other);
        assert_eq!(NetworkDescriptor::from_chain_id(56).name, "BSC Mainnet");
    }

    #[test]
    fn wei_displays_decimal_base_units() {
        let wei = Wei(U256::from(10u64).pow(U256::from(30u64)));
        assert_eq!(wei.to_string(), format!("1{}", "0".repeat(30)));
    }

    #[test]
    fn network_kind_uses_snake_case() {
        let kind: NetworkKind = serde_json::from_str("\"bsc_testnet\"").unwrap();
        assert_eq!(kind, NetworkKind::BscTestnet);
    }

    #[test]
    fn typed_field_serializes_type_key() {
        let json = serde_json::to_value(TypedField::string("Message", "hi")).unwrap();
        assert_eq!(json["type"], "string");
        assert_eq!(json["name"], "Message");
    }
}
