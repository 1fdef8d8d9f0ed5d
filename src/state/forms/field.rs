//! Form field value objects

use std::fmt;

/// The fixed set of fields on the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Username,
    FavLanguage,
    FavFood,
    Agreement,
}

/// How a field is edited and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Radio,
    Select,
    Checkbox,
}

/// A selectable option for radio and select fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOption {
    pub value: &'static str,
    pub label: &'static str,
}

const LANGUAGE_OPTIONS: &[FieldOption] = &[
    FieldOption {
        value: "javascript",
        label: "JavaScript",
    },
    FieldOption {
        value: "rust",
        label: "Rust",
    },
];

// The empty entry is the "-- Select Favorite Food --" placeholder.
const FOOD_OPTIONS: &[FieldOption] = &[
    FieldOption {
        value: "",
        label: "-- Select Favorite Food --",
    },
    FieldOption {
        value: "pizza",
        label: "Pizza",
    },
    FieldOption {
        value: "spaghetti",
        label: "Spaghetti",
    },
    FieldOption {
        value: "broccoli",
        label: "Broccoli",
    },
];

impl FieldName {
    /// All fields in display order
    pub const ALL: [FieldName; 4] = [
        FieldName::Username,
        FieldName::FavLanguage,
        FieldName::FavFood,
        FieldName::Agreement,
    ];

    /// Wire name, as used in the JSON payload
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::FavLanguage => "favLanguage",
            Self::FavFood => "favFood",
            Self::Agreement => "agreement",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::FavLanguage => "Favorite Language",
            Self::FavFood => "Favorite Food",
            Self::Agreement => "Agreement",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Username => FieldKind::Text,
            Self::FavLanguage => FieldKind::Radio,
            Self::FavFood => FieldKind::Select,
            Self::Agreement => FieldKind::Checkbox,
        }
    }

    /// Options offered by radio and select fields (empty for the rest)
    pub fn options(&self) -> &'static [FieldOption] {
        match self {
            Self::FavLanguage => LANGUAGE_OPTIONS,
            Self::FavFood => FOOD_OPTIONS,
            Self::Username | Self::Agreement => &[],
        }
    }

    /// Index into the fixed field order
    pub fn index(&self) -> usize {
        match self {
            Self::Username => 0,
            Self::FavLanguage => 1,
            Self::FavFood => 2,
            Self::Agreement => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Get the text value, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Flag(_) => None,
        }
    }

    /// Get the flag value, if this is a flag value
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }
}

/// Pick the option after (or before) `current`, wrapping around.
///
/// A value that matches no option starts from the first option when moving
/// forward and from the last when moving backward.
pub fn cycle_option(options: &[FieldOption], current: &str, forward: bool) -> Option<&'static str> {
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let next = match options.iter().position(|o| o.value == current) {
        Some(idx) if forward => (idx + 1) % len,
        Some(idx) => (idx + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    options.get(next).map(|o| o.value)
}
