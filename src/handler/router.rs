//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: health checks, method and body
//! validation, then hand-off of the event body to the skill.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::skill::{Skill, SkillError, SkillEvent};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes, Incoming};
use hyper::header::{HeaderValue, SERVER};
use hyper::{Method, Request, Response, StatusCode, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.http_version = version_label(req.version()).to_string();
    entry.user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let mut response = route_request(req, &state, &mut entry).await;
    if let Ok(server_name) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server_name);
    }

    if state.cached_access_log.load(Ordering::Relaxed) {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_default();
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

/// Route request based on path and method
async fn route_request(
    req: Request<Incoming>,
    state: &AppState,
    entry: &mut AccessLogEntry,
) -> Response<Full<Bytes>> {
    let http_config = &state.config.http;
    let path = req.uri().path();

    // 0. Health check endpoints (highest priority, always fast)
    if http_config.health.enabled
        && matches!(*req.method(), Method::GET | Method::HEAD)
        && (path == http_config.health.liveness_path || path == http_config.health.readiness_path)
    {
        return http::build_health_response("ok");
    }

    // 1. Only the skill endpoint exists beyond health checks
    if path != http_config.skill_path {
        return http::build_404_response();
    }

    // 2. Skill events are always POSTed
    if req.method() != Method::POST {
        logger::log_warning(&format!("Method not allowed: {}", req.method()));
        return http::build_405_response("POST");
    }

    // 3. Check declared and actual body size
    if let Some(resp) = check_body_size(&req, http_config.max_body_size) {
        return resp;
    }
    let body = match read_body(req.into_body(), http_config.max_body_size).await {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    // 4. Dispatch to the skill
    process_event(&body, &state.skill, entry).await
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(req: &Request<Incoming>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Collect the body, enforcing the size limit for chunked uploads too
async fn read_body(body: Incoming, max_body_size: u64) -> Result<Bytes, Response<Full<Bytes>>> {
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => {
            logger::log_error(&format!("Request body exceeded {max_body_size} bytes"));
            Err(http::build_413_response())
        }
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            Err(http::build_error_response(
                StatusCode::BAD_REQUEST,
                "Failed to read request body",
            ))
        }
    }
}

/// Parse an event body, run it through the skill and encode the outcome.
///
/// Skill failures are caught here and reported as an error body; they
/// never escape as a connection error.
pub async fn process_event(
    body: &[u8],
    skill: &Skill,
    entry: &mut AccessLogEntry,
) -> Response<Full<Bytes>> {
    let event: SkillEvent = match serde_json::from_slice(body) {
        Ok(event) => event,
        Err(e) => return failure_response(&SkillError::from(e)),
    };

    entry.request_type = Some(event.request.type_name().to_string());
    entry.intent = event.request.intent().map(|intent| intent.name.clone());

    match skill.handle(&event).await {
        Ok(Some(envelope)) => http::build_json_response(StatusCode::OK, &envelope),
        Ok(None) => http::build_no_content_response(),
        Err(err) => failure_response(&err),
    }
}

fn failure_response(err: &SkillError) -> Response<Full<Bytes>> {
    logger::log_skill_failure(&err.to_string());
    let status = match err {
        SkillError::InvalidApplicationId { .. } => StatusCode::FORBIDDEN,
        SkillError::MalformedEvent(_) => StatusCode::BAD_REQUEST,
        SkillError::UnrecognizedIntent(_) | SkillError::UnsupportedRequest => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    http::build_error_response(status, &err.failure_message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::handlers::QuoteHandler;
    use crate::skill::{HandlerRegistry, IntentName, SkillOptions};
    use serde_json::{json, Value};

    fn skill(app_id: Option<&str>) -> Skill {
        Skill::new(
            SkillOptions {
                app_id: app_id.map(ToString::to_string),
                welcome_text: "Ask me anything".to_string(),
                reprompt_text: "Sorry, I didn't catch that".to_string(),
            },
            HandlerRegistry::builder()
                .register(IntentName::GetQuote, QuoteHandler::new(vec!["Quote".to_string()]))
                .build(),
        )
    }

    fn entry() -> AccessLogEntry {
        AccessLogEntry::new("127.0.0.1".into(), "POST".into(), "/".into())
    }

    fn body(app_id: &str, request: &Value) -> Vec<u8> {
        json!({
            "session": {
                "new": true,
                "sessionId": "s-1",
                "application": { "applicationId": app_id }
            },
            "request": request
        })
        .to_string()
        .into_bytes()
    }

    async fn json_body(response: Response<Full<Bytes>>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_launch_returns_envelope() {
        let mut entry = entry();
        let response = process_event(
            &body("a", &json!({ "type": "LaunchRequest", "requestId": "r" })),
            &skill(None),
            &mut entry,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(entry.request_type.as_deref(), Some("LaunchRequest"));
        assert!(entry.intent.is_none());
        let value = json_body(response).await;
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["sessionAttributes"], json!({}));
        assert_eq!(value["response"]["outputSpeech"]["text"], "Ask me anything");
    }

    #[tokio::test]
    async fn test_intent_records_name() {
        let mut entry = entry();
        let request = json!({
            "type": "IntentRequest",
            "requestId": "r",
            "intent": { "name": "GetQuote" }
        });
        let response = process_event(&body("a", &request), &skill(None), &mut entry).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(entry.intent.as_deref(), Some("GetQuote"));
        let value = json_body(response).await;
        assert_eq!(value["response"]["card"]["title"], "Random Quote");
        assert_eq!(value["response"]["shouldEndSession"], true);
    }

    #[tokio::test]
    async fn test_session_ended_has_no_body() {
        let request = json!({ "type": "SessionEndedRequest", "requestId": "r" });
        let response = process_event(&body("a", &request), &skill(None), &mut entry()).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_unknown_intent_is_reported_not_raised() {
        let request = json!({
            "type": "IntentRequest",
            "requestId": "r",
            "intent": { "name": "Dance" }
        });
        let response = process_event(&body("a", &request), &skill(None), &mut entry()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Exception: Invalid Intent: Dance" })
        );
    }

    #[tokio::test]
    async fn test_foreign_application_is_forbidden() {
        let request = json!({ "type": "LaunchRequest", "requestId": "r" });
        let response = process_event(
            &body("amzn1.echo-sdk-ams.app.intruder", &request),
            &skill(Some("mine")),
            &mut entry(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Invalid Application ID" })
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let mut entry = entry();
        let response = process_event(b"{\"session\": 1", &skill(None), &mut entry).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(entry.request_type.is_none());
        let value = json_body(response).await;
        assert!(value["error"]
            .as_str()
            .unwrap()
            .starts_with("Exception: Malformed event"));
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_10), "1.0");
    }
}
