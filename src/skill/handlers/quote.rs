//! `GetQuote`: speak one quote picked uniformly at random

use async_trait::async_trait;
use rand::Rng;

use crate::logger;
use crate::skill::event::{Intent, Session};
use crate::skill::registry::{Completion, IntentHandler};
use crate::skill::response::build_speechlet_response;

pub const QUOTE_TITLE: &str = "Random Quote";

pub const DEFAULT_QUOTES: [&str; 4] = [
    "Lets make America Great Again!",
    "Sometimes your best investments are the ones you don't make.",
    "Sometimes by losing a battle you find a new way to win the war.",
    "I try to learn from the past, but I plan for the future by focusing exclusively on the present. That's were the fun is.",
];

pub struct QuoteHandler {
    quotes: Vec<String>,
}

impl QuoteHandler {
    /// An empty list falls back to [`DEFAULT_QUOTES`]
    pub fn new(quotes: Vec<String>) -> Self {
        if quotes.is_empty() {
            return Self::default();
        }
        Self { quotes }
    }
}

impl Default for QuoteHandler {
    fn default() -> Self {
        Self {
            quotes: DEFAULT_QUOTES.iter().map(ToString::to_string).collect(),
        }
    }
}

#[async_trait]
impl IntentHandler for QuoteHandler {
    async fn handle(&self, _intent: &Intent, _session: &Session) -> Completion {
        let index = rand::thread_rng().gen_range(0..self.quotes.len());
        logger::log_quote(index);
        Completion::new(build_speechlet_response(
            QUOTE_TITLE,
            &self.quotes[index],
            None,
            true,
        ))
    }
}
