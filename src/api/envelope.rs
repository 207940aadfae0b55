use serde::Deserialize;

use super::error::{ApiError, PREMIUM_REQUIRED_MESSAGE};

/// Every backend response arrives as `{ success, data?, message? }`.
/// `success: false` always carries a user-visible message (or the caller's
/// default) and is never treated as a partial success.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn into_result(self, default_message: &str) -> Result<T, ApiError> {
        if !self.success {
            return Err(match self.message {
                Some(message) if message == PREMIUM_REQUIRED_MESSAGE => ApiError::PremiumRequired,
                Some(message) => ApiError::Rejected { message },
                None => ApiError::rejected(default_message),
            });
        }
        self.data.ok_or(ApiError::MalformedResponse)
    }

    /// For endpoints whose payload is irrelevant (entitlement probes).
    pub fn into_ack(self, default_message: &str) -> Result<(), ApiError> {
        if !self.success {
            return self.into_result(default_message).map(|_| ());
        }
        Ok(())
    }
}
