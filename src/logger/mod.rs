//! Logger module
//!
//! Provides logging utilities for the skill server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Skill lifecycle logging (session, launch, intent, search)
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Skill server started successfully");
    write_info(&format!(
        "Listening on: http://{addr}{}",
        config.http.skill_path
    ));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    match config.skill.app_id {
        Some(ref app_id) => write_info(&format!("Application ID: {app_id}")),
        None => write_info("Application ID: (not enforced)"),
    }
    write_info(&format!("Search index: {}", config.search.index));
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_session_started(request_id: &str, session_id: &str) {
    write_info(&format!(
        "[Skill] onSessionStarted requestId={request_id}, sessionId={session_id}"
    ));
}

pub fn log_launch(request_id: &str, session_id: &str) {
    write_info(&format!(
        "[Skill] onLaunch requestId={request_id}, sessionId={session_id}"
    ));
}

pub fn log_intent(request_id: &str, session_id: &str, name: &str, attributes: usize) {
    write_info(&format!(
        "[Skill] onIntent requestId={request_id}, sessionId={session_id}, name={name}, \
         attributes={attributes}"
    ));
}

pub fn log_session_ended(request_id: &str, session_id: &str, reason: Option<&str>) {
    write_info(&format!(
        "[Skill] onSessionEnded requestId={request_id}, sessionId={session_id}, reason={}",
        reason.unwrap_or("-")
    ));
}

pub fn log_skill_failure(message: &str) {
    write_error(&format!("[Skill ERROR] {message}"));
}

pub fn log_search(query: &str) {
    write_info(&format!("[Search] Searching for: {query}"));
}

pub fn log_search_result(query: &str, hits: usize) {
    write_info(&format!("[Search] '{query}' returned {hits} hit(s)"));
}

pub fn log_search_failed(query: &str, err: &impl std::fmt::Display) {
    write_error(&format!("[Search ERROR] '{query}': {err}"));
}

pub fn log_quote(index: usize) {
    write_info(&format!("[Quote] Returning random quote #{index}"));
}

pub fn log_shutdown(signal: &str) {
    write_info(&format!("\n[Shutdown] {signal} received, stopping server"));
}
