//! Platform built-in intents: help, stop and cancel

use async_trait::async_trait;

use crate::skill::event::{Intent, Session};
use crate::skill::registry::{Completion, IntentHandler};
use crate::skill::response::build_speechlet_response;

pub struct HelpHandler;

#[async_trait]
impl IntentHandler for HelpHandler {
    async fn handle(&self, _intent: &Intent, _session: &Session) -> Completion {
        Completion::new(build_speechlet_response(
            "Help",
            "Try asking me a question like \"What do you think about china\"",
            Some("Sorry, try rephrasing your question"),
            false,
        ))
    }
}

/// Ends the session; shared by stop and cancel
pub struct StopHandler;

#[async_trait]
impl IntentHandler for StopHandler {
    async fn handle(&self, _intent: &Intent, _session: &Session) -> Completion {
        Completion::new(build_speechlet_response("Goodbye", "Goodbye", None, true))
    }
}
