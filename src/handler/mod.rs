//! Request handler module
//!
//! Responsible for HTTP request validation and hand-off of skill events.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
