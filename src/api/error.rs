use thiserror::Error;

/// Message the backend uses to signal the premium entitlement denial. This is
/// a first-class branch for callers, not a generic failure.
pub(crate) const PREMIUM_REQUIRED_MESSAGE: &str = "Premium access required";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Premium access required")]
    PremiumRequired,

    /// The backend answered with `success: false` and a reason.
    #[error("{message}")]
    Rejected { message: String },

    #[error("Invalid or missing identifier")]
    InvalidId,

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// `success: true` but the expected data payload was absent.
    #[error("Response missing expected data")]
    MalformedResponse,
}

impl ApiError {
    pub fn rejected(message: impl Into<String>) -> Self {
        ApiError::Rejected {
            message: message.into(),
        }
    }
}
