//! Error types for the API client.
//!
//! Every failure propagates to the caller as-is; nothing is retried or
//! swallowed inside the crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP round-trip could not complete (connection, DNS, TLS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote service answered with a non-2xx status. The body is
    /// kept verbatim; only the rendered message truncates it.
    #[error("api returned status {status}: {}", truncate(.body))]
    Api { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A response lacked a field an operation needs to extract.
    #[error("unexpected response shape: missing `{0}`")]
    Shape(&'static str),
}

fn truncate(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
