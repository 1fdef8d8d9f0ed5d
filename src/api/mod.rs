//! Client for the remote registration endpoint

mod client;
mod error;
mod traits;

pub use client::{HttpRegistrationClient, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use error::ApiError;
pub use traits::RegistrationApi;

#[cfg(test)]
pub use traits::MockRegistrationApi;
