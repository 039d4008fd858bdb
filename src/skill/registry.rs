//! Intent names and the handler registry
//!
//! Intent names parse into a closed set of known intents plus an `Other`
//! arm. The registry maps them to handlers; it is assembled once through
//! [`RegistryBuilder`] and is read-only afterwards.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::event::{Intent, Session};
use super::response::{build_response, ResponseEnvelope, SpeechletResponse};
use super::SessionAttributes;

/// Intents this skill knows about
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IntentName {
    AskQuestion,
    GetQuote,
    Help,
    Stop,
    Cancel,
    /// Pre-`AMAZON.` built-in help, answered with the welcome response
    LegacyHelp,
    Other(String),
}

impl IntentName {
    pub fn as_str(&self) -> &str {
        match self {
            Self::AskQuestion => "AskQuestion",
            Self::GetQuote => "GetQuote",
            Self::Help => "AMAZON.HelpIntent",
            Self::Stop => "AMAZON.StopIntent",
            Self::Cancel => "AMAZON.CancelIntent",
            Self::LegacyHelp => "HelpIntent",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for IntentName {
    fn from(name: &str) -> Self {
        match name {
            "AskQuestion" => Self::AskQuestion,
            "GetQuote" => Self::GetQuote,
            "AMAZON.HelpIntent" => Self::Help,
            "AMAZON.StopIntent" => Self::Stop,
            "AMAZON.CancelIntent" => Self::Cancel,
            "HelpIntent" => Self::LegacyHelp,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for IntentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single result of a launch or intent path
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub session_attributes: SessionAttributes,
    pub speechlet: SpeechletResponse,
}

impl Completion {
    /// Completion with empty session attributes
    pub fn new(speechlet: SpeechletResponse) -> Self {
        Self {
            session_attributes: SessionAttributes::new(),
            speechlet,
        }
    }

    pub fn into_envelope(self) -> ResponseEnvelope {
        build_response(self.session_attributes, self.speechlet)
    }
}

/// Business logic for one intent
#[async_trait]
pub trait IntentHandler: Send + Sync {
    async fn handle(&self, intent: &Intent, session: &Session) -> Completion;
}

/// Immutable intent → handler mapping
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<IntentName, Arc<dyn IntentHandler>>,
}

impl HandlerRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn get(&self, name: &IntentName) -> Option<Arc<dyn IntentHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &IntentName) -> bool {
        self.handlers.contains_key(name)
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.handlers.keys().map(IntentName::as_str))
            .finish()
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    handlers: HashMap<IntentName, Arc<dyn IntentHandler>>,
}

impl RegistryBuilder {
    /// Register a handler; a later registration for the same name replaces the earlier one
    #[must_use]
    pub fn register(mut self, name: IntentName, handler: impl IntentHandler + 'static) -> Self {
        self.handlers.insert(name, Arc::new(handler));
        self
    }

    /// Register one shared handler under several names
    #[must_use]
    pub fn register_shared(
        mut self,
        names: &[IntentName],
        handler: Arc<dyn IntentHandler>,
    ) -> Self {
        for name in names {
            self.handlers.insert(name.clone(), Arc::clone(&handler));
        }
        self
    }

    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            handlers: self.handlers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::response::build_speechlet_response;

    struct Fixed(&'static str);

    #[async_trait]
    impl IntentHandler for Fixed {
        async fn handle(&self, _intent: &Intent, _session: &Session) -> Completion {
            Completion::new(build_speechlet_response(self.0, self.0, None, true))
        }
    }

    #[test]
    fn test_intent_name_round_trip_for_known_names() {
        for name in [
            "AskQuestion",
            "GetQuote",
            "AMAZON.HelpIntent",
            "AMAZON.StopIntent",
            "AMAZON.CancelIntent",
            "HelpIntent",
        ] {
            let parsed = IntentName::from(name);
            assert!(!matches!(parsed, IntentName::Other(_)), "{name}");
            assert_eq!(parsed.as_str(), name);
        }
        assert_eq!(
            IntentName::from("Dance"),
            IntentName::Other("Dance".to_string())
        );
    }

    #[test]
    fn test_builder_and_lookup() {
        let shared: Arc<dyn IntentHandler> = Arc::new(Fixed("bye"));
        let registry = HandlerRegistry::builder()
            .register(IntentName::GetQuote, Fixed("quote"))
            .register_shared(&[IntentName::Stop, IntentName::Cancel], shared)
            .build();

        assert!(registry.contains(&IntentName::Stop));
        assert!(registry.contains(&IntentName::Cancel));
        assert!(registry.get(&IntentName::Help).is_none());
        assert!(registry.get(&IntentName::GetQuote).is_some());
        assert!(!HandlerRegistry::default().contains(&IntentName::GetQuote));
    }
}
