//! Skill request router
//!
//! Entry point for one inbound event: verifies the application id, fires
//! the session-started hook, then dispatches on the request type.

use crate::config::SkillConfig;
use crate::logger;

use super::error::SkillError;
use super::event::{Intent, Session, SkillEvent, SkillRequest};
use super::registry::{Completion, HandlerRegistry, IntentName};
use super::response::{build_speechlet_response, ResponseEnvelope};

/// Prefix the platform puts in front of legacy application ids
const APP_ID_PREFIX: &str = "amzn1.echo-sdk-ams.app.";

/// Skill-wide texts and the optional application id guard
#[derive(Debug, Clone)]
pub struct SkillOptions {
    pub app_id: Option<String>,
    pub welcome_text: String,
    pub reprompt_text: String,
}

impl From<&SkillConfig> for SkillOptions {
    fn from(config: &SkillConfig) -> Self {
        Self {
            app_id: config.app_id.clone().filter(|id| !id.is_empty()),
            welcome_text: config.welcome_text.clone(),
            reprompt_text: config.reprompt_text.clone(),
        }
    }
}

/// Routes events to lifecycle hooks and intent handlers
#[derive(Debug)]
pub struct Skill {
    options: SkillOptions,
    registry: HandlerRegistry,
}

impl Skill {
    pub const fn new(options: SkillOptions, registry: HandlerRegistry) -> Self {
        Self { options, registry }
    }

    /// Handle one event.
    ///
    /// `Ok(Some(_))` carries the envelope for launch and intent requests,
    /// `Ok(None)` acknowledges a session-ended request.
    pub async fn handle(&self, event: &SkillEvent) -> Result<Option<ResponseEnvelope>, SkillError> {
        let session = &event.session;
        self.verify_application(session)?;

        if session.is_new {
            Self::on_session_started(event.request.request_id(), session);
        }

        match &event.request {
            SkillRequest::LaunchRequest { request_id } => {
                Ok(Some(self.on_launch(request_id, session).into_envelope()))
            }
            SkillRequest::IntentRequest { request_id, intent } => self
                .on_intent(request_id, intent, session)
                .await
                .map(|completion| Some(completion.into_envelope())),
            SkillRequest::SessionEndedRequest { request_id, reason } => {
                Self::on_session_ended(request_id, reason.as_deref(), session);
                Ok(None)
            }
            SkillRequest::Unsupported => Err(SkillError::UnsupportedRequest),
        }
    }

    pub const fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Response for a launch without a specific intent
    pub fn welcome_response(&self) -> Completion {
        Completion::new(build_speechlet_response(
            "Welcome",
            &self.options.welcome_text,
            Some(&self.options.reprompt_text),
            false,
        ))
    }

    fn verify_application(&self, session: &Session) -> Result<(), SkillError> {
        let Some(expected) = self.options.app_id.as_deref() else {
            return Ok(());
        };

        let actual = session.application.application_id.as_str();
        let bare = actual.strip_prefix(APP_ID_PREFIX).unwrap_or(actual);
        if actual == expected || bare == expected {
            Ok(())
        } else {
            Err(SkillError::InvalidApplicationId {
                actual: actual.to_string(),
            })
        }
    }

    fn on_session_started(request_id: &str, session: &Session) {
        logger::log_session_started(request_id, &session.session_id);
    }

    fn on_launch(&self, request_id: &str, session: &Session) -> Completion {
        logger::log_launch(request_id, &session.session_id);
        self.welcome_response()
    }

    async fn on_intent(
        &self,
        request_id: &str,
        intent: &Intent,
        session: &Session,
    ) -> Result<Completion, SkillError> {
        logger::log_intent(
            request_id,
            &session.session_id,
            &intent.name,
            session.attributes.len(),
        );

        let name = IntentName::from(intent.name.as_str());
        if let Some(handler) = self.registry.get(&name) {
            return Ok(handler.handle(intent, session).await);
        }

        match name {
            IntentName::LegacyHelp => Ok(self.welcome_response()),
            IntentName::AskQuestion
            | IntentName::GetQuote
            | IntentName::Help
            | IntentName::Stop
            | IntentName::Cancel
            | IntentName::Other(_) => Err(SkillError::UnrecognizedIntent(intent.name.clone())),
        }
    }

    fn on_session_ended(request_id: &str, reason: Option<&str>, session: &Session) {
        logger::log_session_ended(request_id, &session.session_id, reason);
    }
}
