use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Registration request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Registration failed with status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Invalid response from server: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Text shown to the user as the failure outcome
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
