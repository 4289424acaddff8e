use std::sync::Arc;

use bscdapp::connector::SimulatedConnector;
use bscdapp::page::{Action, ContractField, Page, PageEvent, TransferField};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::tui::event::AppEvent;
use crate::tui::input::InputMode;
use crate::tui::widgets::{Popup, PopupType, Spinner};

/// Which form receives field navigation and edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Transfer,
    Contract,
}

impl FormFocus {
    fn toggle(self) -> Self {
        match self {
            FormFocus::Transfer => FormFocus::Contract,
            FormFocus::Contract => FormFocus::Transfer,
        }
    }

    pub fn field_count(self) -> usize {
        match self {
            FormFocus::Transfer => TransferField::ALL.len(),
            FormFocus::Contract => ContractField::ALL.len(),
        }
    }
}

/// Main application state
pub struct App {
    pub page: Page,
    simulator: Arc<SimulatedConnector>,
    pub input_mode: InputMode,
    pub focus: FormFocus,
    pub selected_field: usize,
    pub should_quit: bool,

    pub popup: Option<Popup>,
    pub spinner: Spinner,
    pub status_message: Option<(String, bool)>, // (message, is_error)
    /// Latest signature or transaction hash, for the clipboard
    pub last_result: Option<String>,
}

impl App {
    pub fn new(page: Page, simulator: Arc<SimulatedConnector>) -> Self {
        Self {
            page,
            simulator,
            input_mode: InputMode::Normal,
            focus: FormFocus::Transfer,
            selected_field: 0,
            should_quit: false,
            popup: None,
            spinner: Spinner::default(),
            status_message: None,
            last_result: None,
        }
    }

    /// Handle application events. Returns false once the app should exit.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Quit => {
                self.should_quit = true;
                false
            }
            AppEvent::Key(key) => {
                // Ctrl-C always quits
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    self.should_quit = true;
                    return false;
                }
                if self.popup.is_some() {
                    self.popup = None;
                    return true;
                }
                match self.input_mode {
                    InputMode::Normal => self.handle_normal_key(key),
                    InputMode::Insert => self.handle_insert_key(key),
                }
                !self.should_quit
            }
            AppEvent::Tick => {
                self.spinner.tick();
                true
            }
            AppEvent::Page(event) => {
                self.handle_page_event(event);
                true
            }
        }
    }

    fn handle_page_event(&mut self, event: PageEvent) {
        match &event {
            PageEvent::Enabled { account, .. } => {
                self.status_message = Some((format!("Connected as {}", account.address), false));
            }
            PageEvent::NetworkChanged(network) => {
                self.status_message = Some((format!("Network changed to {}", network.name), false));
            }
            PageEvent::AccountChanged(account) => {
                self.status_message =
                    Some((format!("Account changed to {}", account.address), false));
            }
            PageEvent::Signed { signature } => {
                self.last_result = Some(signature.clone());
                self.status_message = Some(("Message signed".to_string(), false));
            }
            PageEvent::Transferred { tx_hash } => {
                self.last_result = Some(tx_hash.clone());
                self.status_message = Some((format!("Transfer sent: {}", tx_hash), false));
            }
            PageEvent::Executed { tx_hash } => {
                self.last_result = Some(tx_hash.clone());
                self.status_message = Some((format!("Contract call sent: {}", tx_hash), false));
            }
            PageEvent::Completed(Action::BalanceAndHistory) => {
                self.popup = Some(Popup::new(
                    PopupType::Info,
                    "Balance and history",
                    "Written to the log file",
                ));
            }
            PageEvent::Completed(_) => {}
            PageEvent::Failed { action, message } => {
                self.status_message = None;
                self.popup = Some(Popup::error(format!("{} failed", action), message.clone()));
            }
        }

        self.page.apply(event);

        if !self.page.state().any_pending() {
            self.spinner.stop();
        }
        // forms disappear when the gate closes
        if self.input_mode == InputMode::Insert && !self.page.actions_open() {
            self.input_mode = InputMode::Normal;
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('e') => {
                let dispatched = self.page.enable();
                self.after_trigger(Action::Enable, dispatched);
            }
            KeyCode::Char('s') => {
                let dispatched = self.page.sign_message();
                self.after_trigger(Action::Sign, dispatched);
            }
            KeyCode::Char('b') => {
                let dispatched = self.page.get_balance_and_history();
                self.after_trigger(Action::BalanceAndHistory, dispatched);
            }
            KeyCode::Char('t') => {
                let dispatched = self.page.transfer();
                self.after_trigger(Action::Transfer, dispatched);
            }
            KeyCode::Char('x') => {
                let dispatched = self.page.execute();
                self.after_trigger(Action::Execute, dispatched);
            }
            KeyCode::Char('c') => self.copy_last_result(),
            // Simulated wallet controls
            KeyCode::Char('n') => self.simulator.cycle_network(),
            KeyCode::Char('a') => self.simulator.cycle_account(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
                self.selected_field = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => self.next_field(),
            KeyCode::Char('k') | KeyCode::Up => self.prev_field(),
            KeyCode::Char('i') | KeyCode::Enter => {
                if self.page.actions_open() {
                    self.input_mode = InputMode::Insert;
                } else {
                    self.status_message = Some((
                        "Forms need an enabled wallet on a recognized network".to_string(),
                        true,
                    ));
                }
            }
            _ => {}
        }
    }

    fn handle_insert_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                debug!(form = ?self.focus, field = self.selected_field, "Field edited");
            }
            KeyCode::Tab => self.next_field(),
            KeyCode::BackTab => self.prev_field(),
            KeyCode::Char(c) => self.active_field_mut().push(c),
            KeyCode::Backspace => {
                self.active_field_mut().pop();
            }
            _ => {}
        }
    }

    fn after_trigger(&mut self, action: Action, dispatched: bool) {
        if dispatched {
            self.status_message = None;
            self.spinner.start(format!("{}...", action));
        } else {
            self.status_message = Some((format!("{} not available right now", action), true));
        }
    }

    fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.focus.field_count();
    }

    fn prev_field(&mut self) {
        let count = self.focus.field_count();
        self.selected_field = (self.selected_field + count - 1) % count;
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            FormFocus::Transfer => {
                let field = TransferField::ALL[self.selected_field % TransferField::ALL.len()];
                self.page.transfer_field_mut(field)
            }
            FormFocus::Contract => {
                let field = ContractField::ALL[self.selected_field % ContractField::ALL.len()];
                self.page.contract_field_mut(field)
            }
        }
    }

    fn copy_last_result(&mut self) {
        let Some(value) = self.last_result.clone() else {
            self.status_message =
                Some(("Nothing to copy yet: sign or send first".to_string(), true));
            return;
        };
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => match clipboard.set_text(value) {
                Ok(_) => {
                    self.status_message = Some(("Copied to clipboard".to_string(), false));
                }
                Err(e) => {
                    self.status_message = Some((format!("Clipboard write failed: {}", e), true));
                }
            },
            Err(e) => {
                self.status_message = Some((format!("Clipboard unavailable: {}", e), true));
            }
        }
    }
}
