//! Headless rendering of the page.

use std::time::Duration;

use bscdapp::config::AppConfig;
use bscdapp::page::{Page, PageEvent};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::session::Session;

/// Upper bound on waiting for an in-flight action to report back.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn run(config: &AppConfig, enable: bool, json: bool) -> anyhow::Result<()> {
    let Session {
        mut page,
        mut events,
        simulator: _simulator,
    } = Session::open(config)?;

    let lines = capture(&mut page, &mut events, enable).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        for line in lines {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Optionally enable, wait for the page to settle, then render it.
pub async fn capture(
    page: &mut Page,
    events: &mut mpsc::UnboundedReceiver<PageEvent>,
    enable: bool,
) -> Vec<String> {
    if enable && !page.enable() {
        warn!("Nothing to enable");
    }
    settle(page, events).await;
    info!(gate = ?page.gate(), "Page settled");
    page.view().lines()
}

/// Apply queued events until no action is in flight.
async fn settle(page: &mut Page, events: &mut mpsc::UnboundedReceiver<PageEvent>) {
    loop {
        while let Ok(event) = events.try_recv() {
            page.apply(event);
        }
        if !page.state().any_pending() {
            break;
        }
        match tokio::time::timeout(SETTLE_TIMEOUT, events.recv()).await {
            Ok(Some(event)) => page.apply(event),
            _ => {
                warn!("Gave up waiting for pending actions");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bscdapp::config::SimulatorConfig;
    use bscdapp::connector::SimulatedConnector;
    use serde_json::json;
    use std::sync::Arc;

    fn session(sim: SimulatorConfig) -> Session {
        let config = AppConfig {
            simulator: sim,
            ..AppConfig::default()
        };
        let simulator =
            Arc::new(SimulatedConnector::new(&config.connector, &config.simulator).unwrap());
        Session::with_connector(&config, simulator, json!([{"type": "function", "name": "mint"}]))
    }

    #[tokio::test]
    async fn detected_snapshot() {
        let mut s = session(SimulatorConfig::default());
        let lines = capture(&mut s.page, &mut s.events, false).await;
        assert_eq!(
            lines,
            vec![
                "MetaMask Detected. Not enabled".to_string(),
                "[Enable MetaMask]".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn enabled_snapshot_shows_defaults() {
        let mut s = session(SimulatorConfig::default());
        let lines = capture(&mut s.page, &mut s.events, true).await;
        assert_eq!(lines[0], "MetaMask Detected. Enabled.");
        assert!(lines.contains(&"Network: BSC Mainnet".to_string()));
        assert!(lines.contains(&"message: Hello Binance Smart Chain".to_string()));
        let transfer_to = "transfer to: 0x9876543210abcdef9876543210abcdef98765432";
        assert!(lines.contains(&transfer_to.to_string()));
        assert!(lines.contains(&"amount: 0.01".to_string()));
    }

    #[tokio::test]
    async fn no_extension_snapshot() {
        let mut s = session(SimulatorConfig {
            extensions: vec![],
            ..SimulatorConfig::default()
        });
        let lines = capture(&mut s.page, &mut s.events, true).await;
        assert_eq!(lines, vec!["No Browser Extension detected".to_string()]);
    }
}
