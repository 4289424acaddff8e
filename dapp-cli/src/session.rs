use std::sync::Arc;

use anyhow::Context;
use bscdapp::abi;
use bscdapp::config::AppConfig;
use bscdapp::connector::{Connector, SimulatedConnector};
use bscdapp::page::{Page, PageEvent};
use tokio::sync::mpsc;

/// A mounted page together with its event stream and the simulated
/// wallet behind it.
pub struct Session {
    pub page: Page,
    pub events: mpsc::UnboundedReceiver<PageEvent>,
    pub simulator: Arc<SimulatedConnector>,
}

impl Session {
    pub fn open(config: &AppConfig) -> anyhow::Result<Self> {
        let abi_path = &config.page.abi_path;
        let contract_abi = abi::load_abi(abi_path)
            .with_context(|| format!("Failed to load contract ABI from {}", abi_path.display()))?;
        let simulator = Arc::new(
            SimulatedConnector::new(&config.connector, &config.simulator)
                .context("Failed to set up the simulated wallet")?,
        );
        Ok(Self::with_connector(config, simulator, contract_abi))
    }

    pub fn with_connector(
        config: &AppConfig,
        simulator: Arc<SimulatedConnector>,
        contract_abi: serde_json::Value,
    ) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let connector: Arc<dyn Connector> = simulator.clone();
        let page = Page::mount(connector, config, contract_abi, tx);
        Self {
            page,
            events,
            simulator,
        }
    }
}
