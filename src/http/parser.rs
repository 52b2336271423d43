use crate::http::request::{split_segments, Headers, Method, Request};

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    InvalidRequestLine,
    InvalidMethod,
}

const CRLF: &str = "\r\n";
const HEADER_SEPARATOR: &str = ": ";

/// Parses one request out of the bytes read from a connection.
///
/// The buffer is taken as-is: no Content-Length validation and no waiting for
/// more data. Header lines are split on `": "`; lines without it are skipped.
/// The body is everything after the first blank line, or the last line when
/// the buffer has no blank line.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    if buf.is_empty() {
        return Err(ParseError::Empty);
    }

    let (head_bytes, body) = match find_headers_end(buf) {
        Some(end) => (&buf[..end], buf[end + 4..].to_vec()),
        None => (buf, last_line(buf).to_vec()),
    };

    let head = String::from_utf8_lossy(head_bytes);
    let mut lines = head.split(CRLF);

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequestLine)?;
    let mut parts = request_line.split(' ');

    let method_str = parts.next().ok_or(ParseError::InvalidRequestLine)?;
    let target = parts.next().ok_or(ParseError::InvalidRequestLine)?;

    let method = Method::from_str(method_str).ok_or(ParseError::InvalidMethod)?;

    // Headers
    let mut headers = Headers::new();
    for line in lines {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(HEADER_SEPARATOR) {
            headers.append(name, value);
        }
    }

    Ok(Request {
        method,
        target: target.to_string(),
        segments: split_segments(target),
        headers,
        body,
    })
}

/// Offset of the `\r\n\r\n` that terminates the header block.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn last_line(buf: &[u8]) -> &[u8] {
    match buf.windows(2).rposition(|w| w == b"\r\n") {
        Some(pos) => &buf[pos + 2..],
        None => &[],
    }
}
