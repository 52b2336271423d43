//! Request routing.
//!
//! Routes live in an ordered table and the first entry whose method and
//! predicate match wins. Requests matching nothing get 404.

use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::storage::Storage;

/// Response-producing behaviours a route can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// `GET /`
    Root,
    /// `GET /user-agent`
    UserAgent,
    /// `GET /echo/<text>`
    Echo,
    /// `GET /files/<name>`
    ReadFile,
    /// `POST /files/<name>`
    WriteFile,
}

struct Route {
    method: Method,
    matches: fn(&Request) -> bool,
    handler: Handler,
}

const ROUTES: &[Route] = &[
    Route {
        method: Method::GET,
        matches: is_root,
        handler: Handler::Root,
    },
    Route {
        method: Method::GET,
        matches: is_user_agent,
        handler: Handler::UserAgent,
    },
    Route {
        method: Method::GET,
        matches: is_echo,
        handler: Handler::Echo,
    },
    Route {
        method: Method::GET,
        matches: is_file,
        handler: Handler::ReadFile,
    },
    Route {
        method: Method::POST,
        matches: is_file,
        handler: Handler::WriteFile,
    },
];

fn is_root(req: &Request) -> bool {
    req.target == "/"
}

fn is_user_agent(req: &Request) -> bool {
    req.segment(1) == Some("user-agent")
}

fn is_echo(req: &Request) -> bool {
    has_prefix(req, "echo")
}

fn is_file(req: &Request) -> bool {
    has_prefix(req, "files")
}

/// `/<prefix>/<arg>...`: at least three segments with `prefix` second.
fn has_prefix(req: &Request, prefix: &str) -> bool {
    req.segments.len() > 2 && req.segment(1) == Some(prefix)
}

/// Selects the handler for `req` without running it.
pub fn resolve(req: &Request) -> Option<Handler> {
    ROUTES
        .iter()
        .find(|route| route.method == req.method && (route.matches)(req))
        .map(|route| route.handler)
}

#[derive(Debug, Clone)]
pub struct Router<S> {
    storage: S,
}

impl<S: Storage> Router<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Routes `req` and produces its response.
    pub async fn handle(&self, req: &Request) -> Response {
        let Some(handler) = resolve(req) else {
            tracing::debug!(method = ?req.method, path = %req.target, "No route matched");
            return Response::not_found();
        };

        tracing::debug!(method = ?req.method, path = %req.target, handler = ?handler, "Route matched");

        match handler {
            Handler::Root => Response::empty(StatusCode::Ok),
            Handler::UserAgent => Response::text(req.header("User-Agent").unwrap_or("")),
            Handler::Echo => Response::text(req.segment(2).unwrap_or("")),
            Handler::ReadFile => self.read_file(file_name(req)).await,
            Handler::WriteFile => self.write_file(file_name(req), &req.body).await,
        }
    }

    async fn read_file(&self, name: &str) -> Response {
        if !self.storage.exists(name).await {
            return Response::not_found();
        }

        match self.storage.read(name).await {
            Ok(contents) => Response::octet_stream(contents),
            Err(e) => {
                tracing::warn!(file = name, error = %e, "Failed to read file");
                Response::internal_error()
            }
        }
    }

    async fn write_file(&self, name: &str, contents: &[u8]) -> Response {
        match self.storage.write(name, contents).await {
            Ok(()) => ResponseBuilder::new(StatusCode::Created)
                .header("Location", format!("/files/{}", name))
                .build(),
            Err(e) => {
                tracing::warn!(file = name, error = %e, "Failed to write file");
                Response::internal_error()
            }
        }
    }
}

fn file_name(req: &Request) -> &str {
    req.segment(2).unwrap_or("")
}
