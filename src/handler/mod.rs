// Request handling module entry point

pub mod router;
pub mod static_files;

// Re-export the dispatch entry points
pub use router::{handle_request, respond, RequestContext};
