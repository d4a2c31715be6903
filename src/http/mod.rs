//! HTTP protocol layer module
//!
//! MIME detection and response builders, decoupled from the add-in
//! specific request handling.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{build_404_response, build_file_response};
