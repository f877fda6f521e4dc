//! HTTP protocol layer module
//!
//! MIME type detection and response builders, decoupled from routing and
//! file-serving logic.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_500_response, build_file_response,
    build_options_response, build_redirect_response,
};
