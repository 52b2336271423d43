use std::time::Duration;

use anyhow::Context;
use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::http::encoding;
use crate::http::parser::{find_headers_end, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::router::Router;
use crate::http::writer::ResponseWriter;
use crate::storage::Storage;

/// Default cap on the bytes read for one request.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

/// Per-connection limits.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionSettings {
    /// Bytes beyond this are never read; the request is parsed truncated.
    pub read_buffer_size: usize,
    /// Deadline for the whole read, respond cycle.
    pub timeout: Duration,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            timeout: Duration::from_secs(5),
        }
    }
}

pub struct Connection<T, S> {
    stream: T,
    router: Router<S>,
    buffer: BytesMut,
    settings: ConnectionSettings,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<T, S> Connection<T, S>
where
    T: AsyncRead + AsyncWrite + Unpin,
    S: Storage,
{
    pub fn new(stream: T, router: Router<S>, settings: ConnectionSettings) -> Self {
        Self {
            stream,
            router,
            buffer: BytesMut::with_capacity(settings.read_buffer_size),
            settings,
            state: ConnectionState::Reading,
        }
    }

    /// Serves exactly one request, then drops the stream.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let deadline = self.settings.timeout;
        tokio::time::timeout(deadline, self.drive())
            .await
            .with_context(|| format!("connection timed out after {:?}", deadline))?
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Some(bytes) => match parse_http_request(&bytes) {
                            Ok(req) => ConnectionState::Processing(req),
                            Err(e) => {
                                tracing::debug!(error = ?e, "Malformed request");
                                ConnectionState::Writing(ResponseWriter::new(
                                    &Response::not_found(),
                                ))
                            }
                        },
                        // Client closed without sending anything
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = self.router.handle(req).await;
                    let accept_encoding = req.header("Accept-Encoding").unwrap_or("");
                    let response = encoding::negotiate(accept_encoding, response);

                    tracing::info!(
                        method = ?req.method,
                        path = %req.target,
                        status = response.status().as_u16(),
                        "Request handled"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until the request is complete, the peer stops sending, or the
    /// buffer limit is hit. Returns `None` if nothing was received.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<BytesMut>> {
        let limit = self.settings.read_buffer_size;

        while self.buffer.len() < limit && !request_complete(&self.buffer) {
            let remaining = (limit - self.buffer.len()) as u64;
            let n = (&mut self.stream)
                .take(remaining)
                .read_buf(&mut self.buffer)
                .await
                .context("failed to read request")?;

            if n == 0 {
                break;
            }
        }

        if self.buffer.is_empty() {
            return Ok(None);
        }

        Ok(Some(self.buffer.split()))
    }
}

/// Headers terminated and any declared body fully received.
fn request_complete(buf: &[u8]) -> bool {
    let Some(end) = find_headers_end(buf) else {
        return false;
    };

    let body_start = end + 4;
    buf.len() >= body_start.saturating_add(declared_content_length(&buf[..end]))
}

fn declared_content_length(head: &[u8]) -> usize {
    String::from_utf8_lossy(head)
        .split("\r\n")
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("Content-Length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}
