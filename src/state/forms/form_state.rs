//! Form values, inline errors and focus handling

use super::field::{FieldName, FieldValue};
use super::schema::ValidationMessage;
use serde::Serialize;

/// Trait for common form focus operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Current values of every registration field.
///
/// Serializes to the payload the registration endpoint expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub username: String,
    pub fav_language: String,
    pub fav_food: String,
    pub agreement: bool,
}

impl FormValues {
    /// Read a field as a typed value
    pub fn get(&self, field: FieldName) -> FieldValue {
        match field {
            FieldName::Username => FieldValue::Text(self.username.clone()),
            FieldName::FavLanguage => FieldValue::Text(self.fav_language.clone()),
            FieldName::FavFood => FieldValue::Text(self.fav_food.clone()),
            FieldName::Agreement => FieldValue::Flag(self.agreement),
        }
    }

    /// Text of a text-like field (empty for the checkbox)
    pub fn text(&self, field: FieldName) -> &str {
        match field {
            FieldName::Username => &self.username,
            FieldName::FavLanguage => &self.fav_language,
            FieldName::FavFood => &self.fav_food,
            FieldName::Agreement => "",
        }
    }

    /// Copy of these values with one field replaced.
    ///
    /// A value of the wrong kind for the field leaves that field unchanged.
    pub fn with(&self, field: FieldName, value: FieldValue) -> FormValues {
        let mut next = self.clone();
        match (field, value) {
            (FieldName::Username, FieldValue::Text(s)) => next.username = s,
            (FieldName::FavLanguage, FieldValue::Text(s)) => next.fav_language = s,
            (FieldName::FavFood, FieldValue::Text(s)) => next.fav_food = s,
            (FieldName::Agreement, FieldValue::Flag(b)) => next.agreement = b,
            (field, value) => {
                tracing::debug!("Ignoring {value:?} for field {field}");
            }
        }
        next
    }
}

/// Current inline error for every field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    entries: [Option<ValidationMessage>; 4],
}

impl FormErrors {
    /// Error text for a field; empty when the field has no error
    pub fn get(&self, field: FieldName) -> &'static str {
        self.message(field).map(|m| m.text()).unwrap_or("")
    }

    pub fn message(&self, field: FieldName) -> Option<ValidationMessage> {
        self.entries[field.index()]
    }

    /// Replace one field's error, leaving the others untouched
    pub fn set(&mut self, field: FieldName, message: Option<ValidationMessage>) {
        self.entries[field.index()] = message;
    }

    /// True when no field carries an error
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }
}

/// Focus position on the registration form.
///
/// Rows 0..=3 are the fields in display order, row 4 is the submit button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationFocus {
    pub active_field_index: usize,
}

/// Row index of the submit button
pub const SUBMIT_ROW: usize = 4;

impl RegistrationFocus {
    /// Field under focus, or `None` when the submit button is focused
    pub fn field(&self) -> Option<FieldName> {
        FieldName::from_index(self.active_field_index)
    }

    pub fn is_submit_active(&self) -> bool {
        self.active_field_index == SUBMIT_ROW
    }
}

impl Form for RegistrationFocus {
    fn field_count(&self) -> usize {
        5 // username, favLanguage, favFood, agreement, submit
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(SUBMIT_ROW);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod form_values {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_default_is_empty() {
            let values = FormValues::default();
            assert_eq!(values.username, "");
            assert_eq!(values.fav_language, "");
            assert_eq!(values.fav_food, "");
            assert!(!values.agreement);
        }

        #[test]
        fn test_with_replaces_one_field() {
            let values = FormValues::default();
            let next = values.with(FieldName::Username, FieldValue::Text("abc".into()));
            assert_eq!(next.username, "abc");
            assert_eq!(values.username, "");
            assert_eq!(next.fav_food, values.fav_food);
        }

        #[test]
        fn test_with_ignores_wrong_kind() {
            let values = FormValues::default();
            let next = values.with(FieldName::Agreement, FieldValue::Text("yes".into()));
            assert_eq!(next, values);
        }

        #[test]
        fn test_get_returns_typed_values() {
            let values = FormValues {
                username: "abc".into(),
                agreement: true,
                ..Default::default()
            };
            assert_eq!(
                values.get(FieldName::Username),
                FieldValue::Text("abc".into())
            );
            assert_eq!(values.get(FieldName::Agreement), FieldValue::Flag(true));
            assert_eq!(values.text(FieldName::Agreement), "");
        }

        #[test]
        fn test_serializes_with_wire_names() {
            let values = FormValues {
                username: "abc".into(),
                fav_language: "rust".into(),
                fav_food: "pizza".into(),
                agreement: true,
            };
            let json = serde_json::to_value(&values).unwrap();
            assert_eq!(
                json,
                serde_json::json!({
                    "username": "abc",
                    "favLanguage": "rust",
                    "favFood": "pizza",
                    "agreement": true
                })
            );
        }
    }

    mod form_errors {
        use super::*;

        #[test]
        fn test_default_has_no_errors() {
            let errors = FormErrors::default();
            assert!(errors.is_empty());
            for field in FieldName::ALL {
                assert_eq!(errors.get(field), "");
            }
        }

        #[test]
        fn test_set_only_touches_one_key() {
            let mut errors = FormErrors::default();
            errors.set(FieldName::FavFood, Some(ValidationMessage::FavFoodRequired));
            errors.set(FieldName::Username, Some(ValidationMessage::UsernameMin));
            errors.set(FieldName::Username, None);
            assert_eq!(errors.get(FieldName::Username), "");
            assert_eq!(errors.get(FieldName::FavFood), "favFood is required");
            assert!(!errors.is_empty());
        }
    }

    mod focus {
        use super::*;

        #[test]
        fn test_starts_on_username() {
            let focus = RegistrationFocus::default();
            assert_eq!(focus.field(), Some(FieldName::Username));
            assert!(!focus.is_submit_active());
        }

        #[test]
        fn test_next_field_cycles() {
            let mut focus = RegistrationFocus::default();
            for _ in 0..4 {
                focus.next_field();
            }
            assert!(focus.is_submit_active());
            assert_eq!(focus.field(), None);
            focus.next_field();
            assert_eq!(focus.active_field_index, 0);
        }

        #[test]
        fn test_prev_field_wraps_to_submit() {
            let mut focus = RegistrationFocus::default();
            focus.prev_field();
            assert!(focus.is_submit_active());
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut focus = RegistrationFocus::default();
            focus.set_active_field(100);
            assert_eq!(focus.active_field_index, SUBMIT_ROW);
        }
    }
}
