//! Request handler module
//!
//! Routing decision and static file serving for the mounted application.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
