//! Static file responder module
//!
//! Maps a request path to a file under the serving root and builds the
//! response, distinguishing missing files from read failures.

use crate::config::AppState;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// Outcome of a file lookup under the serving root.
#[derive(Debug)]
pub enum FileLookup {
    Found {
        content: Vec<u8>,
        content_type: &'static str,
    },
    NotFound,
    ReadError(io::Error),
}

/// Serve `path` from the serving root.
pub async fn serve(state: &Arc<AppState>, path: &str, is_head: bool) -> Response<Full<Bytes>> {
    let access_log = state.config.logging.access_log;

    match load(&state.serving_root, path).await {
        FileLookup::Found {
            content,
            content_type,
        } => {
            if access_log {
                logger::log_response(200, content.len());
            }
            http::build_file_response(&content, content_type, is_head)
        }
        FileLookup::NotFound => {
            if access_log {
                logger::log_response(404, 0);
            }
            http::build_404_response()
        }
        FileLookup::ReadError(e) => {
            logger::log_error(&format!("Failed to read '{path}': {e}"));
            http::build_500_response()
        }
    }
}

/// Look up a request path relative to the serving root.
///
/// Missing files resolve to `NotFound`; any other I/O failure is surfaced
/// as `ReadError` so the caller can answer 500 for this request only.
pub async fn load(root: &Path, path: &str) -> FileLookup {
    let Some(file_path) = resolve(root, path) else {
        return FileLookup::NotFound;
    };

    match fs::read(&file_path).await {
        Ok(content) => {
            let content_type =
                mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
            FileLookup::Found {
                content,
                content_type,
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => FileLookup::NotFound,
        Err(e) => FileLookup::ReadError(e),
    }
}

/// Join a request path onto the serving root, refusing anything that
/// escapes it.
///
/// The root is canonical (resolved once at startup), so canonicalizing the
/// candidate and checking containment catches `..` segments and symlinks
/// pointing outside the root.
fn resolve(root: &Path, path: &str) -> Option<PathBuf> {
    let relative = path.trim_start_matches('/');
    let candidate = root.join(relative);

    // Canonicalize fails for missing files, which is an ordinary 404
    let canonical = candidate.canonicalize().ok()?;

    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            canonical.display()
        ));
        return None;
    }

    if !canonical.is_file() {
        return None;
    }

    Some(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    fn build_tree(dir: &Path) -> PathBuf {
        let root = dir.join("root");
        std_fs::create_dir_all(root.join("ludus/static/js")).expect("create asset dirs");
        std_fs::write(root.join("ludus/index.html"), b"<!doctype html>entry")
            .expect("write entry document");
        std_fs::write(root.join("ludus/static/js/main.js"), b"console.log(1)")
            .expect("write asset");
        root.canonicalize().expect("canonicalize root")
    }

    #[tokio::test]
    async fn test_entry_document_resolves_under_root() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = build_tree(dir.path());

        match load(&root, "/ludus/index.html").await {
            FileLookup::Found {
                content,
                content_type,
            } => {
                assert_eq!(content, b"<!doctype html>entry");
                assert_eq!(content_type, "text/html; charset=utf-8");
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_literal_asset_is_read_verbatim() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = build_tree(dir.path());

        match load(&root, "/ludus/static/js/main.js").await {
            FileLookup::Found {
                content,
                content_type,
            } => {
                assert_eq!(content, b"console.log(1)");
                assert_eq!(content_type, "application/javascript");
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_dotted_file_is_not_found() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = build_tree(dir.path());

        assert!(matches!(
            load(&root, "/ludus/missing.png").await,
            FileLookup::NotFound
        ));
    }

    #[tokio::test]
    async fn test_directory_path_is_not_found() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = build_tree(dir.path());

        assert!(matches!(
            load(&root, "/ludus/static").await,
            FileLookup::NotFound
        ));
    }

    #[tokio::test]
    async fn test_traversal_outside_root_is_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = build_tree(dir.path());
        std_fs::write(dir.path().join("secret.txt"), b"outside").expect("write outside file");

        assert!(matches!(
            load(&root, "/../secret.txt").await,
            FileLookup::NotFound
        ));
        assert!(matches!(
            load(&root, "/ludus/../../secret.txt").await,
            FileLookup::NotFound
        ));
    }
}
