//! Route modules organized by engine.

pub mod health;
pub mod playback;
pub mod queue;
pub mod settings;
pub mod sync;
pub mod voting;

use serde::Serialize;

/// Plain acknowledgement body shared by the mutation endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Outcome message, `"Success"` unless stated otherwise.
    pub message: String,
}

impl MessageResponse {
    /// The standard success acknowledgement.
    #[must_use]
    pub fn success() -> Self {
        Self {
            message: "Success".to_owned(),
        }
    }
}
