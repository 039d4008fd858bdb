//! `AskQuestion`: answer a free-text question from the search index

use async_trait::async_trait;
use std::sync::Arc;

use crate::logger;
use crate::search::{SearchIndex, SearchParams};
use crate::skill::event::{Intent, Session};
use crate::skill::registry::{Completion, IntentHandler};
use crate::skill::response::build_speechlet_response;

/// Slot carrying the user's question
pub const QUESTION_SLOT: &str = "Question";
/// Spoken when nothing matched
pub const FALLBACK_SPEECH: &str = "I will make america great again! Ask me how.";
pub const REPROMPT: &str = "Go on, ask";

pub struct AskQuestionHandler {
    index: Arc<dyn SearchIndex>,
    params: SearchParams,
}

impl AskQuestionHandler {
    pub fn new(index: Arc<dyn SearchIndex>, hits_per_page: u32) -> Self {
        Self {
            index,
            params: SearchParams { hits_per_page },
        }
    }
}

#[async_trait]
impl IntentHandler for AskQuestionHandler {
    async fn handle(&self, intent: &Intent, _session: &Session) -> Completion {
        let question = intent.slot_value(QUESTION_SLOT).unwrap_or_default();
        let fallback = || {
            Completion::new(build_speechlet_response(
                question,
                FALLBACK_SPEECH,
                Some(REPROMPT),
                false,
            ))
        };

        if question.is_empty() {
            return fallback();
        }

        logger::log_search(question);
        match self.index.search(question, &self.params).await {
            Ok(results) => {
                logger::log_search_result(question, results.hits.len());
                match results.hits.first() {
                    Some(hit) => Completion::new(build_speechlet_response(
                        &hit.name,
                        &hit.response,
                        Some(REPROMPT),
                        true,
                    )),
                    None => fallback(),
                }
            }
            Err(e) => {
                logger::log_search_failed(question, &e);
                fallback()
            }
        }
    }
}
