//! Form domain layer
//!
//! Type-safe field values, the validation schema and the bookkeeping that
//! keeps asynchronous validation results in start order.

mod field;
mod form_state;
pub mod schema;
mod sequencer;

pub use field::{cycle_option, FieldKind, FieldName, FieldValue};
pub use form_state::{Form, FormErrors, FormValues, RegistrationFocus};
pub use schema::ValidationMessage;
pub use sequencer::{FieldSequencers, Sequencer};
