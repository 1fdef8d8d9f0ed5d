//! Form rendering module
//!
//! - `field_renderer`: per-kind field boxes with inline errors
//! - `registration_form`: the registration form layout

mod field_renderer;
mod registration_form;

pub use registration_form::draw as draw_registration_form;
