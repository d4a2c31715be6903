//! Static file serving module
//!
//! The "read bytes and content-type for a path under the root"
//! capability: path cleaning, traversal guard, index file fallback, and
//! MIME lookup.

use crate::http::mime;
use crate::logger;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Index files tried when a directory is requested
pub const INDEX_FILES: &[&str] = &["index.html", "index.htm"];

/// Load the file under `root` matching the request path.
///
/// Returns the file's bytes and Content-Type, or `None` when nothing
/// under the root matches (the caller answers 404). `root` must be
/// canonical, which `Config::resolve_root` guarantees.
pub async fn load(root: &Path, request_path: &str) -> Option<(Vec<u8>, &'static str)> {
    let file_path = resolve(root, request_path)?;

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// Resolve a request path to a regular file inside `root`.
fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    // Remove leading slash and drop traversal segments
    let clean_path = request_path.trim_start_matches('/').replace("..", "");

    let mut file_path = root.join(&clean_path);

    // Directory requests fall back to index files
    if file_path.is_dir() || clean_path.is_empty() || clean_path.ends_with('/') {
        for index_file in INDEX_FILES {
            let index_path = file_path.join(index_file);
            if index_path.is_file() {
                file_path = index_path;
                break;
            }
        }
    }

    // File not found is common (404), no need to log at warning level
    let Ok(canonical) = file_path.canonicalize() else {
        return None;
    };

    // The canonical path must stay under the root, whatever the request
    // looked like (symlinks included)
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path escape blocked: {} -> {}",
            request_path,
            canonical.display()
        ));
        return None;
    }

    if !canonical.is_file() {
        return None;
    }

    Some(canonical)
}
