//! Inbound skill event types
//!
//! Mirrors the voice platform's request envelope. Only the fields the
//! router reads are modelled; everything else in the payload is ignored.

use serde::Deserialize;
use std::collections::HashMap;

use super::SessionAttributes;

/// One inbound event: the session context plus the typed request
#[derive(Debug, Clone, Deserialize)]
pub struct SkillEvent {
    pub session: Session,
    pub request: SkillRequest,
}

/// Platform-owned conversation context
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub session_id: String,
    /// True on the first request of a session
    #[serde(default, rename = "new")]
    pub is_new: bool,
    pub application: Application,
    /// Attributes carried over from the previous response
    #[serde(default)]
    pub attributes: SessionAttributes,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

/// Request body, discriminated by its `type` field
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum SkillRequest {
    LaunchRequest {
        request_id: String,
    },
    IntentRequest {
        request_id: String,
        intent: Intent,
    },
    SessionEndedRequest {
        request_id: String,
        #[serde(default)]
        reason: Option<String>,
    },
    /// Any request type this skill does not route
    #[serde(other)]
    Unsupported,
}

impl SkillRequest {
    pub fn request_id(&self) -> &str {
        match self {
            Self::LaunchRequest { request_id }
            | Self::IntentRequest { request_id, .. }
            | Self::SessionEndedRequest { request_id, .. } => request_id,
            Self::Unsupported => "",
        }
    }

    /// Wire name of the request type
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::LaunchRequest { .. } => "LaunchRequest",
            Self::IntentRequest { .. } => "IntentRequest",
            Self::SessionEndedRequest { .. } => "SessionEndedRequest",
            Self::Unsupported => "Unsupported",
        }
    }

    pub const fn intent(&self) -> Option<&Intent> {
        match self {
            Self::IntentRequest { intent, .. } => Some(intent),
            _ => None,
        }
    }
}

/// A named user action with its slots
#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    /// Value of a slot, if present and not blank
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .and_then(|slot| slot.value.as_deref())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub value: Option<String>,
}
