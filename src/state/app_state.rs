//! Application state definitions
//!
//! `AppState` owns everything the registration form renders. Asynchronous
//! work is described by tickets handed out here and resolved back into the
//! state through the `apply_*` methods, which drop superseded results.

use super::forms::{
    FieldName, FieldSequencers, FieldValue, FormErrors, FormValues, RegistrationFocus, Sequencer,
    ValidationMessage,
};
use std::sync::Arc;

/// Result of the most recent submission attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitOutcome {
    #[default]
    None,
    Success(String),
    Failure(String),
}

impl SubmitOutcome {
    pub fn success(&self) -> Option<&str> {
        match self {
            Self::Success(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failure(msg) => Some(msg),
            _ => None,
        }
    }
}

/// A pending single-field validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationTicket {
    pub field: FieldName,
    pub seq: u64,
    pub value: FieldValue,
}

/// A pending whole-form validity check for one values snapshot
#[derive(Debug, Clone)]
pub struct EnabledTicket {
    pub generation: u64,
    pub values: Arc<FormValues>,
}

/// A pending submission of one values snapshot
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub attempt: u64,
    pub values: Arc<FormValues>,
}

/// Work started by a field change
#[derive(Debug, Clone)]
pub struct ChangeTickets {
    pub validation: ValidationTicket,
    pub enabled: Option<EnabledTicket>,
}

/// What applying a submission result did
#[derive(Debug, Clone)]
pub enum SubmissionEffect {
    /// A newer attempt already resolved; nothing changed
    Stale,
    /// Outcome recorded. Carries a validity recheck when values were reset.
    Applied { recheck: Option<EnabledTicket> },
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    values: Arc<FormValues>,
    pub errors: FormErrors,
    pub outcome: SubmitOutcome,
    pub enabled: bool,
    pub focus: RegistrationFocus,
    validations: FieldSequencers,
    enabled_checks: Sequencer,
    submissions: Sequencer,
}

impl AppState {
    /// Current values snapshot
    pub fn values(&self) -> &Arc<FormValues> {
        &self.values
    }

    /// Install a new values snapshot.
    ///
    /// Returns a validity check ticket when the snapshot differs by identity
    /// from the current one. Submit stays disabled until that check resolves.
    pub fn set_values(&mut self, values: Arc<FormValues>) -> Option<EnabledTicket> {
        if Arc::ptr_eq(&self.values, &values) {
            return None;
        }
        self.values = values;
        self.enabled = false;
        Some(EnabledTicket {
            generation: self.enabled_checks.start(),
            values: Arc::clone(&self.values),
        })
    }

    /// Write one field and start its validation plus a whole-form recheck
    pub fn change_field(&mut self, field: FieldName, value: FieldValue) -> ChangeTickets {
        let next = Arc::new(self.values.with(field, value.clone()));
        let enabled = self.set_values(next);
        let validation = ValidationTicket {
            field,
            seq: self.validations.start(field),
            value,
        };
        ChangeTickets {
            validation,
            enabled,
        }
    }

    /// Apply a resolved field validation. Returns false if it was superseded.
    pub fn apply_validation(
        &mut self,
        field: FieldName,
        seq: u64,
        result: Option<ValidationMessage>,
    ) -> bool {
        if !self.validations.try_apply(field, seq) {
            tracing::debug!("Dropping stale validation #{seq} for {field}");
            return false;
        }
        self.errors.set(field, result);
        true
    }

    /// Apply a resolved validity check. Returns false if it was superseded.
    pub fn apply_enabled(&mut self, generation: u64, enabled: bool) -> bool {
        if !self.enabled_checks.try_apply(generation) {
            tracing::debug!("Dropping stale validity check #{generation}");
            return false;
        }
        self.enabled = enabled;
        true
    }

    /// Clear the previous outcome and snapshot the values to send
    pub fn begin_submit(&mut self) -> SubmissionTicket {
        self.outcome = SubmitOutcome::None;
        SubmissionTicket {
            attempt: self.submissions.start(),
            values: Arc::clone(&self.values),
        }
    }

    /// Apply a resolved submission.
    ///
    /// On success the values reset to defaults; on failure they are kept.
    /// Field errors are never touched.
    pub fn apply_submission(
        &mut self,
        attempt: u64,
        result: Result<String, String>,
    ) -> SubmissionEffect {
        if !self.submissions.try_apply(attempt) {
            tracing::debug!("Dropping stale submission #{attempt}");
            return SubmissionEffect::Stale;
        }
        let recheck = match result {
            Ok(message) => {
                self.outcome = SubmitOutcome::Success(message);
                self.set_values(Arc::new(FormValues::default()))
            }
            Err(message) => {
                self.outcome = SubmitOutcome::Failure(message);
                None
            }
        };
        SubmissionEffect::Applied { recheck }
    }

    pub fn is_submitting(&self) -> bool {
        self.submissions.is_pending()
    }

    pub fn is_validating(&self, field: FieldName) -> bool {
        self.validations.is_pending(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::schema::{is_valid, validate_field};
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    /// Resolve every ticket synchronously, in start order
    fn change_and_settle(state: &mut AppState, field: FieldName, value: FieldValue) {
        let tickets = state.change_field(field, value);
        let v = tickets.validation;
        state.apply_validation(v.field, v.seq, validate_field(v.field, Some(&v.value)));
        if let Some(e) = tickets.enabled {
            state.apply_enabled(e.generation, is_valid(&e.values));
        }
    }

    fn fill_valid(state: &mut AppState) {
        change_and_settle(state, FieldName::Username, text("abc"));
        change_and_settle(state, FieldName::FavLanguage, text("rust"));
        change_and_settle(state, FieldName::FavFood, text("pizza"));
        change_and_settle(state, FieldName::Agreement, FieldValue::Flag(true));
    }

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(**state.values(), FormValues::default());
        assert!(state.errors.is_empty());
        assert_eq!(state.outcome, SubmitOutcome::None);
        assert!(!state.enabled);
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_change_produces_new_snapshot() {
        let mut state = AppState::default();
        let before = Arc::clone(state.values());
        let tickets = state.change_field(FieldName::Username, text("a"));
        assert!(!Arc::ptr_eq(&before, state.values()));
        assert_eq!(before.username, "");
        assert_eq!(state.values().username, "a");
        assert!(tickets.enabled.is_some());
        assert!(state.is_validating(FieldName::Username));
    }

    #[test]
    fn test_new_snapshot_disables_until_checked() {
        let mut state = AppState::default();
        fill_valid(&mut state);
        assert!(state.enabled);

        let ticket = state
            .change_field(FieldName::FavFood, text("spaghetti"))
            .enabled
            .unwrap();
        assert!(!state.enabled);

        state.apply_enabled(ticket.generation, is_valid(&ticket.values));
        assert!(state.enabled);
    }

    #[test]
    fn test_reset_after_success_disables_immediately() {
        let mut state = AppState::default();
        fill_valid(&mut state);

        let ticket = state.begin_submit();
        state.apply_submission(ticket.attempt, Ok("Welcome, abc!".into()));

        assert_eq!(**state.values(), FormValues::default());
        assert!(!state.enabled);
    }

    #[test]
    fn test_same_snapshot_does_not_recheck() {
        let mut state = AppState::default();
        let same = Arc::clone(state.values());
        assert!(state.set_values(same).is_none());
    }

    #[test]
    fn test_valid_values_enable_submit() {
        let mut state = AppState::default();
        fill_valid(&mut state);
        assert!(state.enabled);
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_invalid_values_report_each_field() {
        let mut state = AppState::default();
        change_and_settle(&mut state, FieldName::Username, text("ab"));
        change_and_settle(&mut state, FieldName::FavLanguage, text(""));
        change_and_settle(&mut state, FieldName::FavFood, text(""));
        // agreement never supplied
        let seq = state.validations.start(FieldName::Agreement);
        state.apply_validation(
            FieldName::Agreement,
            seq,
            validate_field(FieldName::Agreement, None),
        );

        assert_eq!(
            state.errors.message(FieldName::Username),
            Some(ValidationMessage::UsernameMin)
        );
        assert_eq!(
            state.errors.message(FieldName::FavLanguage),
            Some(ValidationMessage::FavLanguageRequired)
        );
        assert_eq!(
            state.errors.message(FieldName::FavFood),
            Some(ValidationMessage::FavFoodRequired)
        );
        assert_eq!(
            state.errors.message(FieldName::Agreement),
            Some(ValidationMessage::AgreementRequired)
        );
        assert!(!state.enabled);
    }

    #[test]
    fn test_fixing_last_invalid_field_enables() {
        let mut state = AppState::default();
        change_and_settle(&mut state, FieldName::Username, text("ab"));
        change_and_settle(&mut state, FieldName::FavLanguage, text("rust"));
        change_and_settle(&mut state, FieldName::FavFood, text("pizza"));
        change_and_settle(&mut state, FieldName::Agreement, FieldValue::Flag(true));
        assert!(!state.enabled);

        change_and_settle(&mut state, FieldName::Username, text("abc"));
        assert!(state.enabled);
        assert_eq!(state.errors.get(FieldName::Username), "");
    }

    #[test]
    fn test_validation_only_touches_changed_field() {
        let mut state = AppState::default();
        change_and_settle(&mut state, FieldName::FavFood, text(""));
        change_and_settle(&mut state, FieldName::Username, text("abcd"));
        assert_eq!(state.errors.get(FieldName::FavFood), "favFood is required");
        assert_eq!(state.errors.get(FieldName::Username), "");
    }

    #[test]
    fn test_out_of_order_validation_keeps_newest() {
        let mut state = AppState::default();
        let first = state.change_field(FieldName::Username, text("a")).validation;
        let second = state.change_field(FieldName::Username, text("abc")).validation;

        // newer resolves first
        assert!(state.apply_validation(second.field, second.seq, None));
        assert!(!state.apply_validation(
            first.field,
            first.seq,
            Some(ValidationMessage::UsernameMin)
        ));
        assert_eq!(state.errors.get(FieldName::Username), "");
        assert!(!state.is_validating(FieldName::Username));
    }

    #[test]
    fn test_in_order_validation_applies_both() {
        let mut state = AppState::default();
        let first = state.change_field(FieldName::Username, text("a")).validation;
        let second = state.change_field(FieldName::Username, text("ab")).validation;

        assert!(state.apply_validation(
            first.field,
            first.seq,
            Some(ValidationMessage::UsernameMin)
        ));
        assert!(state.is_validating(FieldName::Username));
        assert!(state.apply_validation(second.field, second.seq, None));
        assert_eq!(state.errors.get(FieldName::Username), "");
    }

    #[test]
    fn test_stale_enabled_check_is_dropped() {
        let mut state = AppState::default();
        fill_valid(&mut state);
        assert!(state.enabled);

        let old = state
            .change_field(FieldName::Username, text("ab"))
            .enabled
            .unwrap();
        let new = state
            .change_field(FieldName::Username, text("abc"))
            .enabled
            .unwrap();

        assert!(state.apply_enabled(new.generation, is_valid(&new.values)));
        assert!(!state.apply_enabled(old.generation, is_valid(&old.values)));
        assert!(state.enabled);
    }

    #[test]
    fn test_successful_submit_resets_values() {
        let mut state = AppState::default();
        fill_valid(&mut state);
        state.outcome = SubmitOutcome::Failure("old failure".into());

        let ticket = state.begin_submit();
        assert_eq!(state.outcome, SubmitOutcome::None);
        assert!(state.is_submitting());
        assert_eq!(ticket.values.username, "abc");

        let effect = state.apply_submission(ticket.attempt, Ok("Welcome, abc!".into()));
        let recheck = match effect {
            SubmissionEffect::Applied { recheck } => recheck.unwrap(),
            SubmissionEffect::Stale => panic!("submission should apply"),
        };
        assert_eq!(**state.values(), FormValues::default());
        assert_eq!(state.outcome.success(), Some("Welcome, abc!"));
        assert_eq!(state.outcome.failure(), None);
        assert!(!state.is_submitting());

        state.apply_enabled(recheck.generation, is_valid(&recheck.values));
        assert!(!state.enabled);
    }

    #[test]
    fn test_failed_submit_keeps_values() {
        let mut state = AppState::default();
        fill_valid(&mut state);
        state.outcome = SubmitOutcome::Success("old success".into());
        let before = Arc::clone(state.values());

        let ticket = state.begin_submit();
        let effect = state.apply_submission(ticket.attempt, Err("username already taken".into()));

        assert!(matches!(effect, SubmissionEffect::Applied { recheck: None }));
        assert!(Arc::ptr_eq(&before, state.values()));
        assert_eq!(state.outcome.failure(), Some("username already taken"));
        assert_eq!(state.outcome.success(), None);
        assert!(state.enabled);
    }

    #[test]
    fn test_submission_leaves_errors_alone() {
        let mut state = AppState::default();
        state
            .errors
            .set(FieldName::FavFood, Some(ValidationMessage::FavFoodOptions));
        let ticket = state.begin_submit();
        state.apply_submission(ticket.attempt, Ok("ok".into()));
        assert_eq!(
            state.errors.message(FieldName::FavFood),
            Some(ValidationMessage::FavFoodOptions)
        );
    }

    #[test]
    fn test_stale_submission_is_dropped() {
        let mut state = AppState::default();
        fill_valid(&mut state);
        let first = state.begin_submit();
        let second = state.begin_submit();

        state.apply_submission(second.attempt, Err("username already taken".into()));
        let effect = state.apply_submission(first.attempt, Ok("Welcome, abc!".into()));

        assert!(matches!(effect, SubmissionEffect::Stale));
        assert_eq!(state.outcome.failure(), Some("username already taken"));
        assert_eq!(state.values().username, "abc");
    }
}
