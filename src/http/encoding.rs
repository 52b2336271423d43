//! Content-Encoding negotiation.
//!
//! The client lists the encodings it can decode in `Accept-Encoding`. Only
//! `gzip` is recognised; every other token is ignored.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::http::response::Response;

/// Encodings the server knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
}

impl ContentEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEncoding::Gzip => "gzip",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "gzip" => Some(ContentEncoding::Gzip),
            _ => None,
        }
    }
}

/// Picks the encoding to apply for an `Accept-Encoding` header value.
///
/// Tokens are comma-separated and trimmed; matching is case-sensitive.
pub fn select(accept_encoding: &str) -> Option<ContentEncoding> {
    accept_encoding
        .split(',')
        .map(str::trim)
        .find_map(ContentEncoding::from_token)
}

/// Applies the negotiated encoding to `response`.
///
/// Without a recognised token the response is returned untouched. If
/// compression fails the uncompressed response is returned.
pub fn negotiate(accept_encoding: &str, response: Response) -> Response {
    let Some(encoding) = select(accept_encoding) else {
        return response;
    };

    let compressed = match encoding {
        ContentEncoding::Gzip => gzip(response.body()),
    };

    match compressed {
        Ok(body) => response
            .into_builder()
            .header("Content-Encoding", encoding.as_str())
            .body(body)
            .build(),
        Err(e) => {
            tracing::warn!(
                encoding = encoding.as_str(),
                error = %e,
                "Compression failed, sending identity body"
            );
            response
        }
    }
}

/// gzip-compresses `data` at the default level.
pub fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
