//! Intent handlers shipped with the skill

mod ask;
mod builtin;
mod quote;

pub use ask::AskQuestionHandler;
pub use builtin::{HelpHandler, StopHandler};
pub use quote::QuoteHandler;

use std::sync::Arc;

use super::registry::{HandlerRegistry, IntentHandler, IntentName};
use crate::search::SearchIndex;

/// Registry with every handler this skill answers
pub fn default_registry(
    index: Arc<dyn SearchIndex>,
    hits_per_page: u32,
    quotes: Vec<String>,
) -> HandlerRegistry {
    let stop: Arc<dyn IntentHandler> = Arc::new(StopHandler);

    HandlerRegistry::builder()
        .register(
            IntentName::AskQuestion,
            AskQuestionHandler::new(index, hits_per_page),
        )
        .register(IntentName::GetQuote, QuoteHandler::new(quotes))
        .register(IntentName::Help, HelpHandler)
        .register_shared(&[IntentName::Stop, IntentName::Cancel], stop)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchError, SearchParams, SearchResults};
    use crate::skill::{Skill, SkillEvent, SkillOptions};
    use async_trait::async_trait;
    use serde_json::json;

    struct EmptyIndex;

    #[async_trait]
    impl SearchIndex for EmptyIndex {
        async fn search(
            &self,
            _query: &str,
            _params: &SearchParams,
        ) -> Result<SearchResults, SearchError> {
            Ok(SearchResults::default())
        }
    }

    fn skill() -> Skill {
        Skill::new(
            SkillOptions {
                app_id: None,
                welcome_text: "Welcome text".to_string(),
                reprompt_text: "Reprompt text".to_string(),
            },
            default_registry(Arc::new(EmptyIndex), 1, Vec::new()),
        )
    }

    async fn speak(skill: &Skill, intent: &str) -> serde_json::Value {
        let event: SkillEvent = serde_json::from_value(json!({
            "session": { "new": true, "sessionId": "s", "application": { "applicationId": "a" } },
            "request": { "type": "IntentRequest", "requestId": "r", "intent": { "name": intent } }
        }))
        .unwrap();
        let envelope = skill.handle(&event).await.unwrap().unwrap();
        serde_json::to_value(envelope).unwrap()
    }

    #[test]
    fn test_registers_all_intents() {
        let registry = default_registry(Arc::new(EmptyIndex), 1, Vec::new());
        for name in [
            IntentName::AskQuestion,
            IntentName::GetQuote,
            IntentName::Help,
            IntentName::Stop,
            IntentName::Cancel,
        ] {
            assert!(registry.contains(&name), "{name}");
        }
        assert!(!registry.contains(&IntentName::LegacyHelp));
    }

    #[tokio::test]
    async fn test_help_intent() {
        let value = speak(&skill(), "AMAZON.HelpIntent").await;
        assert_eq!(value["response"]["card"]["title"], "Help");
        assert_eq!(
            value["response"]["reprompt"]["outputSpeech"]["text"],
            "Sorry, try rephrasing your question"
        );
        assert_eq!(value["response"]["shouldEndSession"], false);
    }

    #[tokio::test]
    async fn test_stop_and_cancel_say_goodbye() {
        let skill = skill();
        for intent in ["AMAZON.StopIntent", "AMAZON.CancelIntent"] {
            let value = speak(&skill, intent).await;
            assert_eq!(value["response"]["outputSpeech"]["text"], "Goodbye");
            assert!(value["response"]["reprompt"]["outputSpeech"]["text"].is_null());
            assert_eq!(value["response"]["shouldEndSession"], true);
        }
    }

    #[tokio::test]
    async fn test_legacy_help_gets_welcome() {
        let value = speak(&skill(), "HelpIntent").await;
        assert_eq!(value["response"]["card"]["title"], "Welcome");
        assert_eq!(value["response"]["outputSpeech"]["text"], "Welcome text");
    }
}
