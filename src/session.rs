//! Current attendance session (morning / afternoon slot or closed).

use crate::config::{SESSION_ENDPOINT, SESSION_UNAVAILABLE_MSG};
use crate::outcome::ActionError;
use crate::transport::ActionTransport;
use crate::view::TextView;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionKind {
    Am,
    Pm,
    Closed,
}

/// Body of `GET /api/current-session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session: SessionKind,
    #[serde(default)]
    pub start: Option<u8>,
    #[serde(default)]
    pub end: Option<u8>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl SessionInfo {
    pub fn parse(body: &str) -> Result<Self, ActionError> {
        serde_json::from_str(body).map_err(|e| ActionError::InvalidResponse(e.to_string()))
    }

    pub fn is_open(&self) -> bool {
        self.session != SessionKind::Closed
    }

    fn window(&self) -> Option<String> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(format!("{}:00-{}:00", start, end)),
            _ => None,
        }
    }
}

impl fmt::Display for SessionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.session {
            SessionKind::Am => "AM session",
            SessionKind::Pm => "PM session",
            SessionKind::Closed => {
                return write!(f, "{}", self.msg.as_deref().unwrap_or("Attendance is closed."));
            }
        };
        match self.window() {
            Some(window) => write!(f, "{} ({})", name, window),
            None => write!(f, "{}", name),
        }
    }
}

/// Fetch the current session and show it in `view`.
///
/// Returns `None` (and shows a fixed notice) when the lookup fails.
pub async fn refresh_session(
    transport: Rc<dyn ActionTransport>,
    view: Rc<dyn TextView>,
) -> Option<SessionInfo> {
    let info = transport
        .get(SESSION_ENDPOINT)
        .await
        .and_then(|body| SessionInfo::parse(&body));

    match info {
        Ok(info) => {
            debug!("current session: {:?}", info.session);
            view.set_text(&info.to_string());
            Some(info)
        }
        Err(e) => {
            warn!("session lookup failed: {}", e);
            view.set_text(SESSION_UNAVAILABLE_MSG);
            None
        }
    }
}
