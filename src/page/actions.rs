//! Action handlers: thin async forwarders to the connector.
//!
//! Each handler checks its precondition, marks the action in flight, and
//! spawns a task that awaits the connector and reports back through the
//! page channel. Handlers return whether anything was dispatched.

use std::sync::Arc;

use bscdapp_types::{ContractRef, ExtensionInfo, TransactionRequest, TypedField};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{Action, Page, PageEvent};
use crate::connector::units::format_ether;
use crate::connector::Connector;
use crate::error::DappResult;

/// How the demo message gets signed, chosen by extension capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningMethod {
    /// Structured (EIP-712 style) signing
    Structured,
    /// Plain personal-message signing
    Plain,
}

impl SigningMethod {
    pub fn for_extension(extension: Option<&ExtensionInfo>) -> Self {
        if extension.is_some_and(|e| e.supports_structured_signing) {
            Self::Structured
        } else {
            Self::Plain
        }
    }
}

impl Page {
    /// Ask the extension for authorization. The state change itself
    /// arrives later through the `enabled` subscription.
    pub fn enable(&mut self) -> bool {
        if !self.state.is_installed() || self.state.enabled {
            debug!("Enable ignored: extension missing or already enabled");
            return false;
        }
        self.dispatch(Action::Enable, |connector| async move {
            connector.enable_browser_extension().await?;
            Ok(PageEvent::Completed(Action::Enable))
        })
    }

    pub fn sign_message(&mut self) -> bool {
        if !self.actions_open() || self.state.signature.is_signed() {
            debug!("Sign ignored: gate closed or already signed");
            return false;
        }
        let method = SigningMethod::for_extension(self.state.extension.as_ref());
        let message = self.settings.message.clone();
        self.dispatch(Action::Sign, move |connector| async move {
            debug!(?method, "Signing message");
            let signature = match method {
                SigningMethod::Structured => {
                    connector
                        .sign_typed_data(&[TypedField::string("Message", &message)])
                        .await?
                }
                SigningMethod::Plain => connector.sign_message(&message).await?,
            };
            Ok(PageEvent::Signed { signature })
        })
    }

    /// Send `transfer.amount` BNB from the current account to `transfer.to`.
    pub fn transfer(&mut self) -> bool {
        let Some(from) = self.gated_account() else {
            return false;
        };
        let to = self.state.transfer.to.clone();
        let amount = self.state.transfer.amount.clone();
        self.dispatch(Action::Transfer, move |connector| async move {
            let value = connector.parse_ether(&amount).await?;
            let tx = TransactionRequest {
                from,
                to: Some(to),
                value: value.to_string(),
                data: None,
            };
            info!(to = ?tx.to, value = %tx.value, "Sending transfer");
            let tx_hash = connector.send_transaction(tx).await?;
            Ok(PageEvent::Transferred { tx_hash })
        })
    }

    /// Call the configured contract method with `[receiver, amount]`.
    pub fn execute(&mut self) -> bool {
        let Some(from) = self.gated_account() else {
            return false;
        };
        let contract = ContractRef {
            address: self.state.contract.address.clone(),
            abi: self.abi.clone(),
        };
        let method = self.settings.contract_method.clone();
        let args = vec![
            self.state.contract.receiver.clone(),
            self.state.contract.amount.clone(),
        ];
        self.dispatch(Action::Execute, move |connector| async move {
            let params = connector.execute_contract(&contract, &method, &args).await?;
            let tx = TransactionRequest {
                from,
                to: Some(params.to),
                value: "0".to_string(),
                data: Some(params.data),
            };
            info!(contract = %contract.address, %method, "Executing contract call");
            let tx_hash = connector.send_transaction(tx).await?;
            Ok(PageEvent::Executed { tx_hash })
        })
    }

    /// Diagnostic: fetch balance and history for the current account and log them.
    pub fn get_balance_and_history(&mut self) -> bool {
        let address = match (&self.state.account, self.state.enabled) {
            (Some(account), true) => account.address.clone(),
            _ => {
                debug!("Balance query ignored: no enabled account");
                return false;
            }
        };
        self.dispatch(Action::BalanceAndHistory, move |connector| async move {
            let balance = connector.get_balance(&address).await?;
            info!(%address, balance = %format_ether(balance.0), "Balance");

            let txs = connector.get_history(&address).await?;
            info!(%address, count = txs.len(), "TX history");
            for entry in &txs {
                debug!(
                    hash = %entry.hash,
                    from = %entry.from,
                    to = ?entry.to,
                    value = %entry.value,
                    "TX"
                );
            }
            Ok(PageEvent::Completed(Action::BalanceAndHistory))
        })
    }

    fn gated_account(&self) -> Option<String> {
        if !self.actions_open() {
            debug!("Action ignored: gate closed");
            return None;
        }
        self.state.account.as_ref().map(|a| a.address.clone())
    }

    /// Run `op` on a spawned task unless `action` is already in flight.
    ///
    /// Exactly one event comes back per dispatch, even if the task panics.
    fn dispatch<F, Fut>(&mut self, action: Action, op: F) -> bool
    where
        F: FnOnce(Arc<dyn Connector>) -> Fut,
        Fut: std::future::Future<Output = DappResult<PageEvent>> + Send + 'static,
    {
        if !self.state.begin(action) {
            debug!(%action, "Already in flight");
            return false;
        }
        let fut = op(self.connector.clone());
        let tx: mpsc::UnboundedSender<PageEvent> = self.tx.clone();
        tokio::spawn(async move {
            let event = match tokio::spawn(fut).await {
                Ok(Ok(event)) => event,
                Ok(Err(e)) => PageEvent::Failed {
                    action,
                    message: e.to_string(),
                },
                Err(e) => {
                    warn!(%action, error = %e, "Action task died");
                    let message = if e.is_panic() {
                        "connector task panicked".to_string()
                    } else {
                        e.to_string()
                    };
                    PageEvent::Failed { action, message }
                }
            };
            let _ = tx.send(event);
        });
        true
    }
}
