//! Algolia REST query client

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use std::time::Duration;

use super::{SearchError, SearchIndex, SearchParams, SearchResults};
use crate::config::SearchConfig;

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    #[serde(flatten)]
    params: &'a SearchParams,
}

/// One index on a hosted Algolia application
#[derive(Debug, Clone)]
pub struct AlgoliaIndex {
    client: Client,
    base_url: String,
    index: String,
    app_id: String,
    api_key: String,
}

impl AlgoliaIndex {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config
            .host
            .clone()
            .unwrap_or_else(|| format!("https://{}-dsn.algolia.net", config.app_id));

        Ok(Self {
            client,
            base_url,
            index: config.index.clone(),
            app_id: config.app_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// `{base}/1/indexes/{index}/query`, with the index name percent-encoded
    fn query_url(&self) -> Result<Url, SearchError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| SearchError::Endpoint(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| SearchError::Endpoint(format!("cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["1", "indexes", self.index.as_str(), "query"]);
        Ok(url)
    }
}

#[async_trait]
impl SearchIndex for AlgoliaIndex {
    async fn search(
        &self,
        query: &str,
        params: &SearchParams,
    ) -> Result<SearchResults, SearchError> {
        let response = self
            .client
            .post(self.query_url()?)
            .header("X-Algolia-Application-Id", &self.app_id)
            .header("X-Algolia-API-Key", &self.api_key)
            .json(&QueryRequest { query, params })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read search error body".to_string());
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<SearchResults>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchHit;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn config(host: Option<String>) -> SearchConfig {
        SearchConfig {
            app_id: "APPID".to_string(),
            api_key: "secret".to_string(),
            index: "trump".to_string(),
            host,
            hits_per_page: 1,
            timeout_secs: 5,
        }
    }

    /// Serve one canned HTTP response and hand back the raw request text
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0_u8; 4096];
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }

            let reply = format!(
                "{status_line}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(reply.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (format!("http://{addr}"), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    #[test]
    fn test_default_host_and_encoded_index() {
        let mut cfg = config(None);
        cfg.index = "quotes v2".to_string();
        let index = AlgoliaIndex::new(&cfg).unwrap();
        assert_eq!(
            index.query_url().unwrap().as_str(),
            "https://appid-dsn.algolia.net/1/indexes/quotes%20v2/query"
        );
    }

    #[test]
    fn test_invalid_host() {
        let index = AlgoliaIndex::new(&config(Some("not a url".to_string()))).unwrap();
        assert!(matches!(index.query_url(), Err(SearchError::Endpoint(_))));
    }

    #[tokio::test]
    async fn test_search_sends_query_and_decodes_hits() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{
                "hits": [
                    { "name": "China", "response": "China is ripping us off.", "objectID": "1" }
                ],
                "nbHits": 1
            }"#,
        )
        .await;
        let index = AlgoliaIndex::new(&config(Some(base))).unwrap();

        let results = index
            .search("what about china", &SearchParams::default())
            .await
            .unwrap();
        assert_eq!(
            results.hits,
            vec![SearchHit {
                name: "China".to_string(),
                response: "China is ripping us off.".to_string(),
            }]
        );

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /1/indexes/trump/query "));
        let lower = request.to_ascii_lowercase();
        assert!(lower.contains("x-algolia-application-id: appid"));
        assert!(lower.contains("x-algolia-api-key: secret"));
        assert!(request.contains(r#""query":"what about china""#));
        assert!(request.contains(r#""hitsPerPage":1"#));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (base, server) =
            serve_once("HTTP/1.1 403 Forbidden", r#"{"message":"Invalid API key"}"#).await;
        let index = AlgoliaIndex::new(&config(Some(base))).unwrap();

        let err = index
            .search("anything", &SearchParams::default())
            .await
            .unwrap_err();
        let SearchError::Status { status, body } = err else {
            panic!("expected a status error, got {err}");
        };
        assert_eq!(status, 403);
        assert!(body.contains("Invalid API key"));
        server.await.unwrap();
    }
}
