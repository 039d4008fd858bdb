//! Voice skill module
//!
//! Turns platform events into speech responses:
//! - `event`: inbound request envelope
//! - `router`: lifecycle dispatch and the application id guard
//! - `registry`: intent names and their handlers
//! - `handlers`: the skill's intents
//! - `response`: speechlet payload builders

mod error;
mod event;
pub mod handlers;
mod registry;
mod response;
mod router;

pub use error::SkillError;
pub use event::SkillEvent;
pub use registry::{HandlerRegistry, IntentName};
pub use router::{Skill, SkillOptions};

/// Opaque per-session key/value state echoed back to the platform
pub type SessionAttributes = serde_json::Map<String, serde_json::Value>;
