//! End-to-end page flows against the simulated connector.
//!
//! Each test mounts a page, triggers actions the way the TUI does, and
//! pumps the page channel so events are applied in arrival order.

use std::sync::Arc;
use std::time::Duration;

use bscdapp::config::{AppConfig, ConnectorConfig, SimulatorConfig};
use bscdapp::connector::{units, Connector, SimulatedConnector};
use bscdapp::page::{Action, Page, PageEvent, TransferField};
use serde_json::{json, Value};
use tokio::sync::mpsc;

struct Harness {
    page: Page,
    rx: mpsc::UnboundedReceiver<PageEvent>,
    sim: Arc<SimulatedConnector>,
}

impl Harness {
    fn new(extension: Option<&str>, sim_config: SimulatorConfig) -> Self {
        Self::with_connector(extension, sim_config, mint_abi(), |c| c)
    }

    fn with_connector(
        extension: Option<&str>,
        sim_config: SimulatorConfig,
        abi: Value,
        customize: impl FnOnce(SimulatedConnector) -> SimulatedConnector,
    ) -> Self {
        let config = AppConfig {
            connector: ConnectorConfig {
                extension: extension.map(str::to_string),
            },
            simulator: sim_config,
            ..AppConfig::default()
        };
        let sim = Arc::new(customize(
            SimulatedConnector::new(&config.connector, &config.simulator).unwrap(),
        ));
        let connector: Arc<dyn Connector> = sim.clone();
        let (tx, rx) = mpsc::unbounded_channel();
        let page = Page::mount(connector, &config, abi, tx);
        Self { page, rx, sim }
    }

    /// Apply the next `n` events.
    async fn pump(&mut self, n: usize) {
        for _ in 0..n {
            let event = tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
                .await
                .expect("timed out waiting for page event")
                .expect("page channel closed");
            self.page.apply(event);
        }
    }

    async fn enabled(extension: Option<&str>) -> Self {
        let mut h = Self::new(extension, SimulatorConfig::default());
        assert!(h.page.enable());
        // enabled event + completion
        h.pump(2).await;
        h
    }
}

fn mint_abi() -> Value {
    json!([{
        "type": "function",
        "name": "mint",
        "inputs": [
            {"name": "to", "type": "address"},
            {"name": "amount", "type": "uint256"}
        ]
    }])
}

#[tokio::test]
async fn no_extension_scenario() {
    let mut h = Harness::new(
        None,
        SimulatorConfig {
            extensions: vec![],
            ..SimulatorConfig::default()
        },
    );
    let view = h.page.view();
    assert_eq!(view.status, "No Browser Extension detected");
    assert!(view.enable_button.is_none());
    assert!(!h.page.enable());
}

#[tokio::test]
async fn enable_flow_opens_mainnet_panels() {
    let mut h = Harness::new(Some("MetaMask"), SimulatorConfig::default());
    let view = h.page.view();
    assert_eq!(view.status, "MetaMask Detected. Not enabled");
    assert_eq!(view.enable_button.unwrap().label, "Enable MetaMask");

    assert!(h.page.enable());
    assert!(h.page.view().enable_button.unwrap().pending);
    h.pump(2).await;

    let view = h.page.view();
    assert_eq!(view.status, "MetaMask Detected. Enabled.");
    assert_eq!(view.network.unwrap().text(), "Network: BSC Mainnet");
    let transfer = view.transfer.unwrap();
    assert!(transfer.to.starts_with("0x987"));
    assert_eq!(transfer.amount, "0.01");
    assert!(view.contract.is_some());
    assert!(!h.page.state().any_pending());
}

#[tokio::test]
async fn structured_signing_for_capable_extension() {
    let mut h = Harness::enabled(Some("MetaMask")).await;
    assert!(h.page.sign_message());
    h.pump(1).await;

    let sig = h.page.state().signature.get().unwrap().to_string();
    assert!(sig.starts_with("0x"));
    // structured and plain signatures differ, so this proves the typed path
    let plain = h.sim.sign_message("Hello Binance Smart Chain").await.unwrap();
    assert_ne!(sig, plain);

    let sign = h.page.view().sign.unwrap();
    assert_eq!(sign.signature, sig);
    assert!(sign.action.is_none());
    assert!(!h.page.sign_message());
}

#[tokio::test]
async fn plain_signing_for_other_extension() {
    let mut h = Harness::enabled(Some("BinanceChainWallet")).await;
    assert!(h.page.sign_message());
    h.pump(1).await;

    let expected = h.sim.sign_message("Hello Binance Smart Chain").await.unwrap();
    assert_eq!(h.page.state().signature.get(), Some(expected.as_str()));
}

#[tokio::test]
async fn transfer_records_hash_and_keeps_fields() {
    let mut h = Harness::enabled(None).await;
    let to = h.page.state().transfer.to.clone();

    assert!(h.page.transfer());
    h.pump(1).await;

    let state = h.page.state();
    let hash = state.transfer.tx_hash().unwrap().to_string();
    assert_eq!(state.transfer.to, to);
    assert_eq!(state.transfer.amount, "0.01");
    assert!(state.last_error.is_none());

    let from = state.account.clone().unwrap().address;
    let history = h.sim.get_history(&from).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].hash, hash);
    assert_eq!(history[0].value, "10000000000000000");
}

#[tokio::test]
async fn editing_after_transfer_keeps_hash() {
    let mut h = Harness::enabled(None).await;
    assert!(h.page.transfer());
    h.pump(1).await;
    let hash = h.page.state().transfer.tx_hash().map(str::to_string);

    h.page.transfer_field_mut(TransferField::Amount).push('5');
    assert_eq!(h.page.state().transfer.amount, "0.015");
    assert_eq!(h.page.state().transfer.tx_hash().map(str::to_string), hash);
}

#[tokio::test]
async fn failed_transfer_is_surfaced() {
    let mut h = Harness::enabled(None).await;
    *h.page.transfer_field_mut(TransferField::Amount) = "1000".to_string();

    assert!(h.page.transfer());
    h.pump(1).await;

    let state = h.page.state();
    assert!(state.transfer.tx_hash().is_none());
    assert_eq!(state.last_error.as_deref(), Some("Transfer failed: Insufficient funds"));
    assert!(!state.is_pending(Action::Transfer));
}

async fn enabled_with_balance(balance: String) -> Harness {
    let mut h = Harness::new(
        None,
        SimulatorConfig {
            balance,
            ..SimulatorConfig::default()
        },
    );
    assert!(h.page.enable());
    h.pump(2).await;
    h
}

#[tokio::test]
async fn transfer_beyond_u128_range_completes() {
    let mut h = enabled_with_balance("200000000000000000000".to_string()).await;
    let recipient = SimulatorConfig::default().accounts[1].clone();
    *h.page.transfer_field_mut(TransferField::To) = recipient.clone();
    *h.page.transfer_field_mut(TransferField::Amount) = "150000000000000000000".to_string();

    assert!(h.page.transfer());
    h.pump(1).await;

    let state = h.page.state();
    assert!(state.transfer.tx_hash().is_some());
    assert!(state.last_error.is_none());
    assert!(!state.is_pending(Action::Transfer));
    let credited = h.sim.get_balance(&recipient).await.unwrap();
    assert_eq!(credited.0, units::parse_ether("350000000000000000000").unwrap());
}

#[tokio::test]
async fn recipient_overflow_is_surfaced_and_frees_transfer() {
    let mut h = enabled_with_balance(format!("1{}", "0".repeat(59))).await;
    let recipient = SimulatorConfig::default().accounts[1].clone();
    *h.page.transfer_field_mut(TransferField::To) = recipient;
    *h.page.transfer_field_mut(TransferField::Amount) = format!("5{}", "0".repeat(58));

    assert!(h.page.transfer());
    h.pump(1).await;

    let state = h.page.state();
    assert!(state.transfer.tx_hash().is_none());
    assert!(state
        .last_error
        .as_deref()
        .unwrap()
        .contains("would overflow"));
    assert!(!state.is_pending(Action::Transfer));
    assert!(h.page.transfer());
}

#[tokio::test]
async fn invalid_amount_is_surfaced() {
    let mut h = Harness::enabled(None).await;
    *h.page.transfer_field_mut(TransferField::Amount) = "ten".to_string();
    assert!(h.page.transfer());
    h.pump(1).await;
    assert!(h
        .page
        .state()
        .last_error
        .as_deref()
        .unwrap()
        .starts_with("Transfer failed: Invalid amount"));
}

#[tokio::test]
async fn in_flight_action_is_not_reinvoked() {
    let mut h = Harness::with_connector(None, SimulatorConfig::default(), mint_abi(), |c| {
        c.with_latency(Duration::from_millis(50))
    });
    assert!(h.page.enable());
    assert!(!h.page.enable());
    h.pump(2).await;

    assert!(h.page.transfer());
    assert!(!h.page.transfer());
    assert!(h.page.view().transfer.unwrap().action.pending);
    h.pump(1).await;

    assert!(h.page.state().transfer.tx_hash().is_some());
    assert!(!h.page.view().transfer.unwrap().action.pending);
    // exactly one broadcast happened
    let from = h.page.state().account.clone().unwrap().address;
    assert_eq!(h.sim.get_history(&from).await.unwrap().len(), 1);
}

#[tokio::test]
async fn contract_call_records_hash() {
    let mut h = Harness::enabled(None).await;
    assert!(h.page.execute());
    h.pump(1).await;

    let hash = h.page.state().contract.tx_hash().unwrap().to_string();
    let from = h.page.state().account.clone().unwrap().address;
    let history = h.sim.get_history(&from).await.unwrap();
    assert_eq!(history[0].hash, hash);
    assert_eq!(history[0].value, "0");
    assert_eq!(history[0].to.as_deref(), Some(h.page.state().contract.address.as_str()));
}

#[tokio::test]
async fn contract_call_without_method_fails() {
    let mut h = Harness::with_connector(None, SimulatorConfig::default(), json!([]), |c| c);
    assert!(h.page.enable());
    h.pump(2).await;

    assert!(h.page.execute());
    h.pump(1).await;
    assert_eq!(
        h.page.state().last_error.as_deref(),
        Some("Execute failed: Unknown contract method: mint")
    );
}

#[tokio::test]
async fn wrong_network_closes_gate_and_keeps_signature() {
    let mut h = Harness::enabled(None).await;
    assert!(h.page.sign_message());
    h.pump(1).await;

    h.sim.switch_network(1);
    h.pump(1).await;

    let view = h.page.view();
    assert_eq!(
        view.network.as_ref().map(|n| n.text()),
        Some(
            "Not connected to BSC Mainnet (Use BSC with Metamask: \
             https://docs.binance.org/smart-chain/wallet/metamask.html)"
                .to_string()
        )
    );
    assert!(!view.has_action_panels());
    assert!(!h.page.transfer());

    h.sim.switch_network(56);
    h.pump(1).await;
    assert!(h.page.state().signature.is_signed());
    assert!(h.page.view().sign.unwrap().action.is_none());
}

#[tokio::test]
async fn account_change_replaces_account_only() {
    let mut h = Harness::enabled(None).await;
    assert!(h.page.sign_message());
    h.pump(1).await;

    h.sim.cycle_account();
    h.pump(1).await;

    let state = h.page.state();
    assert_eq!(
        state.account.as_ref().unwrap().address,
        SimulatorConfig::default().accounts[1]
    );
    assert!(state.signature.is_signed());
    assert!(state.enabled);
}

#[tokio::test]
async fn rejected_enable_leaves_page_detected() {
    let mut h = Harness::new(None, SimulatorConfig::default());
    h.sim.set_reject_requests(true);
    assert!(h.page.enable());
    h.pump(1).await;

    let view = h.page.view();
    assert_eq!(view.status, "MetaMask Detected. Not enabled");
    assert_eq!(
        view.error.as_deref(),
        Some("Enable failed: Request rejected: User denied the request")
    );
    assert!(!view.enable_button.unwrap().pending);
}

#[tokio::test]
async fn balance_and_history_completes_without_rendering() {
    let mut h = Harness::enabled(None).await;
    let before = h.page.view();
    assert!(h.page.get_balance_and_history());
    h.pump(1).await;
    assert_eq!(h.page.view(), before);
}
