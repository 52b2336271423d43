use courier::http::parser::{ParseError, parse_http_request};
use courier::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET /echo/abc HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.target, "/echo/abc");
    assert_eq!(parsed.segments, vec!["", "echo", "abc"]);
    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert!(parsed.body.is_empty());
}

#[test]
fn test_parse_root_target_has_two_empty_segments() {
    let parsed = parse_http_request(b"GET / HTTP/1.1\r\n\r\n").unwrap();

    assert_eq!(parsed.target, "/");
    assert_eq!(parsed.segments, vec!["", ""]);
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /files/a HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.segments, vec!["", "files", "a"]);
    assert_eq!(parsed.body, b"hello".to_vec());
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert_eq!(parsed.header("User-Agent"), Some("test-client"));
    assert_eq!(parsed.header("Accept"), Some("*/*"));
    assert_eq!(parsed.headers.len(), 3);
}

#[test]
fn test_parse_duplicate_header_first_wins() {
    let req = b"GET / HTTP/1.1\r\nUser-Agent: first\r\nUser-Agent: second\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("User-Agent"), Some("first"));
}

#[test]
fn test_parse_header_names_are_case_sensitive() {
    let req = b"GET / HTTP/1.1\r\nuser-agent: lower\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("User-Agent"), None);
    assert_eq!(parsed.header("user-agent"), Some("lower"));
}

#[test]
fn test_parse_header_without_separator_is_skipped() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\nHost:nospace\r\nAccept: */*\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.len(), 1);
    assert_eq!(parsed.header("Accept"), Some("*/*"));
    assert_eq!(parsed.header("Host"), None);
}

#[test]
fn test_parse_header_value_keeps_inner_separator() {
    let req = b"GET / HTTP/1.1\r\nX-Note: a: b\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.header("X-Note"), Some("a: b"));
}

#[test]
fn test_parse_version_token_is_optional() {
    let parsed = parse_http_request(b"GET /echo/x\r\n\r\n").unwrap();

    assert_eq!(parsed.target, "/echo/x");
}

#[test]
fn test_parse_binary_body_with_crlf() {
    let req = b"POST /files/bin HTTP/1.1\r\nContent-Length: 6\r\n\r\n\x00\r\n\x01\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, vec![0, b'\r', b'\n', 1, b'\r', b'\n']);
}

#[test]
fn test_parse_body_falls_back_to_last_line() {
    let req = b"POST /files/a HTTP/1.1\r\nHost: x\r\npayload";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"payload".to_vec());
    assert_eq!(parsed.header("Host"), Some("x"));
}

#[test]
fn test_parse_empty_buffer() {
    assert_eq!(parse_http_request(b"").unwrap_err(), ParseError::Empty);
}

#[test]
fn test_parse_request_line_with_single_word() {
    let result = parse_http_request(b"GET\r\n\r\n");

    assert_eq!(result.unwrap_err(), ParseError::InvalidRequestLine);
}

#[test]
fn test_parse_invalid_http_method() {
    let result = parse_http_request(b"DELETE /files/a HTTP/1.1\r\n\r\n");

    assert_eq!(result.unwrap_err(), ParseError::InvalidMethod);
}

#[test]
fn test_parse_method_is_case_sensitive() {
    let result = parse_http_request(b"get / HTTP/1.1\r\n\r\n");

    assert_eq!(result.unwrap_err(), ParseError::InvalidMethod);
}
