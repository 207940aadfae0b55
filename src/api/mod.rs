mod client;
mod endpoints;
mod envelope;
mod error;
mod http;

pub use client::{Backend, MockBackend};
pub use envelope::ApiEnvelope;
pub use error::ApiError;
pub use http::HttpBackend;
