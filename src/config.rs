use bscdapp_types::{ExtensionInfo, NetworkKind, BSC_MAINNET_CHAIN_ID};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Default base name of the primary config file (extension resolved by `config`).
pub const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Connector construction options
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConnectorConfig {
    /// Browser extension to bind to by name (e.g. "MetaMask").
    /// Unset means auto-detect the first installed extension.
    #[serde(default)]
    pub extension: Option<String>,
}

/// Which networks open the action panels
#[derive(Debug, Deserialize, Clone)]
pub struct NetworksConfig {
    #[serde(default = "default_recognized")]
    pub recognized: Vec<NetworkKind>,
    /// Shown next to the network mismatch message
    #[serde(default = "default_help_url")]
    pub help_url: String,
}

fn default_recognized() -> Vec<NetworkKind> {
    vec![NetworkKind::BscMainnet]
}

fn default_help_url() -> String {
    "https://docs.binance.org/smart-chain/wallet/metamask.html".to_string()
}

impl Default for NetworksConfig {
    fn default() -> Self {
        Self {
            recognized: default_recognized(),
            help_url: default_help_url(),
        }
    }
}

impl NetworksConfig {
    pub fn recognizes(&self, kind: NetworkKind) -> bool {
        kind != NetworkKind::Other && self.recognized.contains(&kind)
    }
}

/// Page content and form defaults
#[derive(Debug, Deserialize, Clone)]
pub struct PageConfig {
    #[serde(default = "default_message")]
    pub message: String,
    #[serde(default = "default_transfer_to")]
    pub transfer_to: String,
    #[serde(default = "default_amount")]
    pub transfer_amount: String,
    #[serde(default = "default_contract_address")]
    pub contract_address: String,
    #[serde(default = "default_transfer_to")]
    pub contract_receiver: String,
    #[serde(default = "default_amount")]
    pub contract_amount: String,
    #[serde(default = "default_contract_method")]
    pub contract_method: String,
    #[serde(default = "default_abi_path")]
    pub abi_path: PathBuf,
}

fn default_message() -> String {
    "Hello Binance Smart Chain".to_string()
}

fn default_transfer_to() -> String {
    "0x9876543210abcdef9876543210abcdef98765432".to_string()
}

fn default_amount() -> String {
    "0.01".to_string()
}

fn default_contract_address() -> String {
    "0x1234567890abcdef1234567890abcdef12345678".to_string()
}

fn default_contract_method() -> String {
    "mint".to_string()
}

fn default_abi_path() -> PathBuf {
    PathBuf::from("config/abi.json")
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            message: default_message(),
            transfer_to: default_transfer_to(),
            transfer_amount: default_amount(),
            contract_address: default_contract_address(),
            contract_receiver: default_transfer_to(),
            contract_amount: default_amount(),
            contract_method: default_contract_method(),
            abi_path: default_abi_path(),
        }
    }
}

/// Logging settings
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by RUST_LOG
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Log file for the interactive TUI. Unset means the platform data dir.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_filter() -> String {
    "bscdapp=debug,bscdapp_cli=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            file: None,
        }
    }
}

/// In-memory wallet used when no real extension bridge is available
#[derive(Debug, Deserialize, Clone)]
pub struct SimulatorConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<ExtensionInfo>,
    /// Start with the extension already authorized
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    #[serde(default = "default_accounts")]
    pub accounts: Vec<String>,
    /// Starting balance per account, in BNB
    #[serde(default = "default_balance")]
    pub balance: String,
}

fn default_extensions() -> Vec<ExtensionInfo> {
    vec![
        ExtensionInfo {
            name: "MetaMask".to_string(),
            supports_structured_signing: true,
        },
        ExtensionInfo {
            name: "BinanceChainWallet".to_string(),
            supports_structured_signing: false,
        },
    ]
}

fn default_chain_id() -> u64 {
    BSC_MAINNET_CHAIN_ID
}

fn default_accounts() -> Vec<String> {
    vec![
        "0xa11ce00000000000000000000000000000000001".to_string(),
        "0xb0b0000000000000000000000000000000000002".to_string(),
    ]
}

fn default_balance() -> String {
    "10".to_string()
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            enabled: false,
            chain_id: default_chain_id(),
            accounts: default_accounts(),
            balance: default_balance(),
        }
    }
}

/// Root application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub connector: ConnectorConfig,
    #[serde(default)]
    pub networks: NetworksConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables.
    ///
    /// `base` replaces `config/default` when given.
    pub fn load(base: Option<&str>) -> Result<Self, ConfigError> {
        let primary = File::with_name(base.unwrap_or(DEFAULT_CONFIG_FILE)).required(base.is_some());
        let config = Config::builder()
            .add_source(primary)
            // Override with local config if present
            .add_source(File::with_name("config/local").required(false))
            // e.g., BSCDAPP_CONNECTOR__EXTENSION, BSCDAPP_SIMULATOR__CHAIN_ID
            .add_source(
                Environment::with_prefix("BSCDAPP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("networks.recognized")
                    .with_list_parse_key("simulator.accounts")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.networks.recognized.is_empty() {
            return Err(ConfigError::Message(
                "networks.recognized must name at least one network".to_string(),
            ));
        }
        if self.simulator.accounts.is_empty() {
            return Err(ConfigError::Message(
                "simulator.accounts must contain at least one address".to_string(),
            ));
        }
        Ok(())
    }
}
