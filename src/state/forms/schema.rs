//! Registration form validation schema
//!
//! Each field owns an ordered list of rules. Per-field validation reports the
//! first failing rule; whole-form validation passes only when every field
//! passes on its own.

use super::field::{FieldName, FieldValue};
use super::form_state::FormValues;

/// Every message the schema can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMessage {
    UsernameRequired,
    UsernameMin,
    UsernameMax,
    FavLanguageRequired,
    FavLanguageOptions,
    FavFoodRequired,
    FavFoodOptions,
    AgreementRequired,
    AgreementOptions,
}

impl ValidationMessage {
    /// Stable key for the message
    pub fn key(&self) -> &'static str {
        match self {
            Self::UsernameRequired => "usernameRequired",
            Self::UsernameMin => "usernameMin",
            Self::UsernameMax => "usernameMax",
            Self::FavLanguageRequired => "favLanguageRequired",
            Self::FavLanguageOptions => "favLanguageOptions",
            Self::FavFoodRequired => "favFoodRequired",
            Self::FavFoodOptions => "favFoodOptions",
            Self::AgreementRequired => "agreementRequired",
            Self::AgreementOptions => "agreementOptions",
        }
    }

    /// Human-readable text shown under the field
    pub fn text(&self) -> &'static str {
        match self {
            Self::UsernameRequired => "username is required",
            Self::UsernameMin => "username must be at least 3 characters",
            Self::UsernameMax => "username cannot exceed 20 characters",
            Self::FavLanguageRequired => "favLanguage is required",
            Self::FavLanguageOptions => "favLanguage must be either javascript or rust",
            Self::FavFoodRequired => "favFood is required",
            Self::FavFoodOptions => "favFood must be either broccoli, spaghetti or pizza",
            Self::AgreementRequired => "agreement is required",
            Self::AgreementOptions => "agreement must be accepted",
        }
    }
}

/// A single constraint on a field value
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Text must be non-empty; flags must be present
    Required,
    MinLength(usize),
    MaxLength(usize),
    OneOf(&'static [&'static str]),
    MustBeTrue,
}

/// A rule paired with the message reported when it fails
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub rule: Rule,
    pub message: ValidationMessage,
}

const fn rule(rule: Rule, message: ValidationMessage) -> FieldRule {
    FieldRule { rule, message }
}

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 20;
pub const LANGUAGES: &[&str] = &["javascript", "rust"];
pub const FOODS: &[&str] = &["pizza", "spaghetti", "broccoli"];

const USERNAME_RULES: &[FieldRule] = &[
    rule(Rule::Required, ValidationMessage::UsernameRequired),
    rule(Rule::MinLength(USERNAME_MIN), ValidationMessage::UsernameMin),
    rule(Rule::MaxLength(USERNAME_MAX), ValidationMessage::UsernameMax),
];

const FAV_LANGUAGE_RULES: &[FieldRule] = &[
    rule(Rule::Required, ValidationMessage::FavLanguageRequired),
    rule(Rule::OneOf(LANGUAGES), ValidationMessage::FavLanguageOptions),
];

const FAV_FOOD_RULES: &[FieldRule] = &[
    rule(Rule::Required, ValidationMessage::FavFoodRequired),
    rule(Rule::OneOf(FOODS), ValidationMessage::FavFoodOptions),
];

const AGREEMENT_RULES: &[FieldRule] = &[
    rule(Rule::Required, ValidationMessage::AgreementRequired),
    rule(Rule::MustBeTrue, ValidationMessage::AgreementOptions),
];

/// Rules for a field, in evaluation order
pub fn rules_for(field: FieldName) -> &'static [FieldRule] {
    match field {
        FieldName::Username => USERNAME_RULES,
        FieldName::FavLanguage => FAV_LANGUAGE_RULES,
        FieldName::FavFood => FAV_FOOD_RULES,
        FieldName::Agreement => AGREEMENT_RULES,
    }
}

/// Normalize a candidate to the shape the field expects.
///
/// A value of the wrong kind counts as missing.
fn typed_value(field: FieldName, value: Option<&FieldValue>) -> Option<&FieldValue> {
    let value = value?;
    let matches = match field {
        FieldName::Agreement => value.as_flag().is_some(),
        _ => value.as_text().is_some(),
    };
    matches.then_some(value)
}

impl Rule {
    /// Check a candidate. `None` means the value is missing.
    fn passes(&self, value: Option<&FieldValue>) -> bool {
        match (self, value) {
            (Rule::Required, None) => false,
            (Rule::Required, Some(FieldValue::Text(s))) => !s.is_empty(),
            (Rule::Required, Some(FieldValue::Flag(_))) => true,
            // Remaining rules only run once Required has passed.
            (_, None) => false,
            (Rule::MinLength(min), Some(FieldValue::Text(s))) => s.chars().count() >= *min,
            (Rule::MaxLength(max), Some(FieldValue::Text(s))) => s.chars().count() <= *max,
            (Rule::OneOf(allowed), Some(FieldValue::Text(s))) => allowed.contains(&s.as_str()),
            (Rule::MustBeTrue, Some(FieldValue::Flag(b))) => *b,
            _ => false,
        }
    }
}

/// Validate one field, returning the first failing rule's message.
pub fn validate_field(field: FieldName, value: Option<&FieldValue>) -> Option<ValidationMessage> {
    let value = typed_value(field, value);
    rules_for(field)
        .iter()
        .find(|r| !r.rule.passes(value))
        .map(|r| r.message)
}

/// Validate every field of a form snapshot
pub fn is_valid(values: &FormValues) -> bool {
    FieldName::ALL
        .iter()
        .all(|field| validate_field(*field, Some(&values.get(*field))).is_none())
}
