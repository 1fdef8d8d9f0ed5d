//! Application state and core logic
//!
//! Key events become field changes or submissions. Validation, validity
//! checks and submissions run as spawned tasks and report back through an
//! mpsc channel that the event loop drains every tick.

use crate::api::{ApiError, RegistrationApi};
use crate::state::schema::{is_valid, validate_field};
use crate::state::{
    cycle_option, AppState, EnabledTicket, FieldKind, FieldName, FieldValue, Form,
    SubmissionEffect, ValidationMessage, ValidationTicket,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Results of background work, delivered back to the event loop
#[derive(Debug)]
pub enum AppEvent {
    FieldValidated {
        field: FieldName,
        seq: u64,
        result: Option<ValidationMessage>,
    },
    ValidityChecked {
        generation: u64,
        enabled: bool,
    },
    SubmissionResolved {
        attempt: u64,
        result: Result<String, String>,
    },
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Registration endpoint client
    api: Arc<dyn RegistrationApi>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(api: Arc<dyn RegistrationApi>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            api,
            events_tx,
            events_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // AltGr arrives as Ctrl+Alt on Windows and still types a character
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('s') if ctrl => self.try_submit(),
            KeyCode::Tab | KeyCode::Down => self.state.focus.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.focus.prev_field(),
            KeyCode::Enter if self.state.focus.is_submit_active() => self.try_submit(),
            KeyCode::Enter => self.state.focus.next_field(),
            _ if ctrl => {}
            _ => {
                if let Some(field) = self.state.focus.field() {
                    self.handle_field_key(field, key.code);
                }
            }
        }
    }

    /// Translate a key on the focused field into a new raw value
    fn handle_field_key(&mut self, field: FieldName, code: KeyCode) {
        let values = Arc::clone(self.state.values());
        let current = values.text(field);

        let next = match (field.kind(), code) {
            (FieldKind::Text, KeyCode::Char(c)) => {
                let mut s = current.to_string();
                s.push(c);
                Some(FieldValue::Text(s))
            }
            (FieldKind::Text, KeyCode::Backspace) => {
                let mut s = current.to_string();
                s.pop();
                Some(FieldValue::Text(s))
            }
            (FieldKind::Radio | FieldKind::Select, KeyCode::Right | KeyCode::Char(' ')) => {
                cycle_option(field.options(), current, true)
                    .map(|v| FieldValue::Text(v.to_string()))
            }
            (FieldKind::Radio | FieldKind::Select, KeyCode::Left) => {
                cycle_option(field.options(), current, false)
                    .map(|v| FieldValue::Text(v.to_string()))
            }
            (FieldKind::Checkbox, KeyCode::Char(' ')) => Some(FieldValue::Flag(!values.agreement)),
            _ => None,
        };

        if let Some(value) = next {
            self.on_change(field, value);
        }
    }

    /// Change handler: write the value, then revalidate that field and the form
    pub fn on_change(&mut self, field: FieldName, value: FieldValue) {
        let tickets = self.state.change_field(field, value);
        self.spawn_validation(tickets.validation);
        if let Some(ticket) = tickets.enabled {
            self.spawn_validity_check(ticket);
        }
    }

    /// Submit only when the form is valid and no submission is in flight
    fn try_submit(&mut self) {
        if self.state.is_submitting() {
            tracing::debug!("Submit ignored: a submission is already in flight");
        } else if self.state.enabled {
            self.on_submit();
        } else {
            tracing::debug!("Submit ignored: form is not valid");
        }
    }

    /// Submit handler: send the current values to the registration endpoint
    pub fn on_submit(&mut self) {
        let ticket = self.state.begin_submit();
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tracing::debug!(
            "Submitting registration #{} for {}",
            ticket.attempt,
            ticket.values.username
        );

        tokio::spawn(async move {
            let result = api
                .submit_registration(&ticket.values)
                .await
                .map_err(|e| {
                    match &e {
                        ApiError::Rejected { status, message } => tracing::debug!(
                            "Registration #{} rejected ({status}): {message}",
                            ticket.attempt
                        ),
                        other => {
                            tracing::debug!("Registration #{} failed: {other}", ticket.attempt)
                        }
                    }
                    e.user_message()
                });
            let event = AppEvent::SubmissionResolved {
                attempt: ticket.attempt,
                result,
            };
            if tx.send(event).is_err() {
                tracing::debug!("Event loop gone; dropping submission result");
            }
        });
    }

    fn spawn_validation(&self, ticket: ValidationTicket) {
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = validate_field(ticket.field, Some(&ticket.value));
            let event = AppEvent::FieldValidated {
                field: ticket.field,
                seq: ticket.seq,
                result,
            };
            if tx.send(event).is_err() {
                tracing::debug!("Event loop gone; dropping validation result");
            }
        });
    }

    fn spawn_validity_check(&self, ticket: EnabledTicket) {
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let enabled = is_valid(&ticket.values);
            let event = AppEvent::ValidityChecked {
                generation: ticket.generation,
                enabled,
            };
            if tx.send(event).is_err() {
                tracing::debug!("Event loop gone; dropping validity result");
            }
        });
    }

    /// Apply every result that has arrived since the last tick
    pub fn drain_events(&mut self) {
        loop {
            match self.events_rx.try_recv() {
                Ok(event) => self.handle_event(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Apply one background result to the state
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::FieldValidated { field, seq, result } => {
                if self.state.apply_validation(field, seq, result) {
                    tracing::debug!(
                        "{field} validated: {}",
                        result.map(|m| m.key()).unwrap_or("ok")
                    );
                }
            }
            AppEvent::ValidityChecked {
                generation,
                enabled,
            } => {
                self.state.apply_enabled(generation, enabled);
            }
            AppEvent::SubmissionResolved { attempt, result } => {
                let succeeded = result.is_ok();
                match self.state.apply_submission(attempt, result) {
                    SubmissionEffect::Applied { recheck } => {
                        tracing::debug!(
                            "Registration #{attempt} resolved ({})",
                            if succeeded { "success" } else { "failure" }
                        );
                        if let Some(ticket) = recheck {
                            self.spawn_validity_check(ticket);
                        }
                    }
                    SubmissionEffect::Stale => {}
                }
            }
        }
    }
}
