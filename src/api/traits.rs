//! Trait abstraction for the registration endpoint to enable mocking in tests

use super::error::ApiError;
use crate::state::FormValues;
use async_trait::async_trait;

/// The one operation the form needs from the server
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// Submit a registration.
    ///
    /// Returns the server's welcome message on success. A rejection carries
    /// the server's explanation in `ApiError::Rejected`.
    async fn submit_registration(&self, values: &FormValues) -> Result<String, ApiError>;
}
