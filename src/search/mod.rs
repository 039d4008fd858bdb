//! Hosted search index client
//!
//! The skill only needs one operation: a free-text query capped to a
//! number of hits. [`SearchIndex`] is the seam; [`AlgoliaIndex`] talks to
//! the hosted REST API.

mod algolia;

pub use algolia::AlgoliaIndex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Query parameters sent alongside the text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub hits_per_page: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { hits_per_page: 1 }
    }
}

/// One stored answer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    /// Display name, used as the card title
    #[serde(default)]
    pub name: String,
    /// Spoken answer
    #[serde(default)]
    pub response: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("search returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid search endpoint: {0}")]
    Endpoint(String),
}

#[async_trait]
pub trait SearchIndex: Send + Sync {
    async fn search(&self, query: &str, params: &SearchParams)
        -> Result<SearchResults, SearchError>;
}
