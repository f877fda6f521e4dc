//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, the
//! path-rewrite decision for client-side routes, and dispatch to the
//! static file responder.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Base path the application is mounted under.
pub const MOUNT_PREFIX: &str = "/ludus";

/// Entry document served for client-side routes.
pub const INDEX_PATH: &str = "/ludus/index.html";

/// Routing decision for an incoming request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// Serve this path from the serving root instead of the one requested.
    Rewrite(&'static str),
    /// Answer 302 to this target without touching the filesystem.
    Redirect(&'static str),
    /// Look the requested path up verbatim under the serving root.
    Passthrough,
}

/// Decide how to route a request path.
///
/// Rules are evaluated in order and exactly one fires:
/// 1. `/` and the bare mount prefix serve the entry document.
/// 2. Paths under the mount prefix whose final segment contains no `.`
///    are client-side routes and serve the entry document.
/// 3. Paths outside the mount prefix redirect to it.
/// 4. Anything left is a literal asset lookup.
///
/// The decision operates on the URI path component only; query strings
/// never take part in the dot check.
pub fn route(path: &str) -> RouteAction {
    if path == "/" || path == MOUNT_PREFIX {
        return RouteAction::Rewrite(INDEX_PATH);
    }

    match path
        .strip_prefix(MOUNT_PREFIX)
        .and_then(|rest| rest.strip_prefix('/'))
    {
        Some(rest) => {
            // Final segment without a dot is assumed to be an application
            // route, not a file.
            let basename = rest.rfind('/').map_or(rest, |i| &rest[i + 1..]);
            if basename.contains('.') {
                RouteAction::Passthrough
            } else {
                RouteAction::Rewrite(INDEX_PATH)
            }
        }
        None => RouteAction::Redirect(MOUNT_PREFIX),
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let path = uri.path();
    let is_head = *method == Method::HEAD;

    let access_log = state.config.logging.access_log;
    if access_log {
        logger::log_request(method, uri, req.version());
    }

    if let Some(resp) = check_http_method(method) {
        return Ok(resp);
    }

    let response = match route(path) {
        RouteAction::Redirect(target) => {
            if access_log {
                logger::log_redirect(path, target);
            }
            http::build_redirect_response(target)
        }
        RouteAction::Rewrite(entry) => static_files::serve(&state, entry, is_head).await,
        RouteAction::Passthrough => static_files::serve(&state, path, is_head).await,
    };

    Ok(response)
}

/// Check HTTP method and return an early response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_and_bare_prefix_serve_entry_document() {
        assert_eq!(route("/"), RouteAction::Rewrite(INDEX_PATH));
        assert_eq!(route("/ludus"), RouteAction::Rewrite(INDEX_PATH));
    }

    #[test]
    fn test_client_side_routes_fall_back_to_entry_document() {
        assert_eq!(route("/ludus/dashboard"), RouteAction::Rewrite(INDEX_PATH));
        assert_eq!(
            route("/ludus/reports/2024"),
            RouteAction::Rewrite(INDEX_PATH)
        );
        // Trailing slash means an empty final segment, which has no dot
        assert_eq!(route("/ludus/"), RouteAction::Rewrite(INDEX_PATH));
    }

    #[test]
    fn test_dotted_final_segment_is_a_literal_asset() {
        assert_eq!(route("/ludus/app.js"), RouteAction::Passthrough);
        assert_eq!(route("/ludus/index.html"), RouteAction::Passthrough);
        assert_eq!(
            route("/ludus/static/js/main.chunk.js"),
            RouteAction::Passthrough
        );
        // Missing dotted files are still a lookup, never the SPA fallback
        assert_eq!(route("/ludus/missing.png"), RouteAction::Passthrough);
    }

    #[test]
    fn test_dot_check_applies_to_final_segment_only() {
        assert_eq!(
            route("/ludus/v1.2/changelog"),
            RouteAction::Rewrite(INDEX_PATH)
        );
    }

    #[test]
    fn test_paths_outside_the_mount_redirect() {
        assert_eq!(route("/other"), RouteAction::Redirect(MOUNT_PREFIX));
        assert_eq!(route("/index.html"), RouteAction::Redirect(MOUNT_PREFIX));
        assert_eq!(route("/favicon.ico"), RouteAction::Redirect(MOUNT_PREFIX));
        // A shared prefix without the separator is not under the mount
        assert_eq!(route("/ludusx/app.js"), RouteAction::Redirect(MOUNT_PREFIX));
    }
}
