//! Result payloads returned by the remote actions and the error taxonomy
//! that collapses into them.

use crate::config::{CONTRACT_FALLBACK_MSG, MISSING_ID_MSG, TRANSPORT_FALLBACK_MSG};
use crate::utils::status_line;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `{success, msg}` as sent by the enrollment and attendance endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(default)]
    pub msg: String,
}

impl ActionResult {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            success: true,
            msg: msg.into(),
        }
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            msg: msg.into(),
        }
    }

    /// Parse a response body, synthesizing a failure on contract violations.
    pub fn from_body(body: &str) -> Self {
        Self::parse(body).unwrap_or_else(|e| {
            warn!("{}", e);
            e.into_result()
        })
    }

    pub fn parse(body: &str) -> Result<Self, ActionError> {
        serde_json::from_str(body).map_err(|e| ActionError::InvalidResponse(e.to_string()))
    }

    /// The line written to the status element once the action completes.
    pub fn status_line(&self) -> String {
        status_line(self.success, &self.msg)
    }
}

/// Everything that can go wrong around one click-triggered action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The trigger element carries no identifier; nothing was sent.
    MissingIdentifier,
    /// The request never completed.
    Transport(String),
    /// A response arrived but is not `{success, msg}`.
    InvalidResponse(String),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::MissingIdentifier => write!(f, "Trigger element has no identifier"),
            ActionError::Transport(detail) => write!(f, "Request failed: {}", detail),
            ActionError::InvalidResponse(detail) => {
                write!(f, "Response is not a valid action result: {}", detail)
            }
        }
    }
}

impl std::error::Error for ActionError {}

impl ActionError {
    /// Fixed user-facing text for this error.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            ActionError::MissingIdentifier => MISSING_ID_MSG,
            ActionError::Transport(_) => TRANSPORT_FALLBACK_MSG,
            ActionError::InvalidResponse(_) => CONTRACT_FALLBACK_MSG,
        }
    }

    /// Synthetic failure fed through the normal rendering path.
    pub fn into_result(self) -> ActionResult {
        ActionResult::failure(self.fallback_message())
    }
}
