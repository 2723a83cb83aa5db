use std::collections::HashMap;

use bytes::Bytes;

use crate::network::RequestFrame;
use crate::AppError::MalformedRequest;
use crate::AppResult;

/// fixed client-facing text for framing errors
pub const BAD_REQUEST_TEXT: &str = "Petición inválida";

/// One parsed HTTP/1.1 request.
///
/// Header keys are lowercased at parse time and lookups go through
/// [`HttpRequest::header`], so the map is effectively case-insensitive.
/// The body never exceeds the declared `Content-Length` when one was
/// present and parseable.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpRequest {
    /// Splits a framed buffer into request line, header map and body.
    ///
    /// A frame without a request-line terminator, or with an empty method
    /// or target token, is rejected with the fixed bad-request message.
    pub fn parse(frame: RequestFrame) -> AppResult<HttpRequest> {
        let RequestFrame { buffer, header_end } = frame;

        let line_end =
            find_subslice(&buffer, b"\r\n").ok_or(MalformedRequest(BAD_REQUEST_TEXT))?;
        let request_line = String::from_utf8_lossy(&buffer[..line_end]);
        let mut tokens = request_line.split_whitespace();
        let method = tokens.next().unwrap_or_default().to_string();
        let raw_target = tokens.next().unwrap_or_default().to_string();
        if method.is_empty() || raw_target.is_empty() {
            return Err(MalformedRequest(BAD_REQUEST_TEXT));
        }

        let (path, query) = match raw_target.find('?') {
            Some(pos) => (
                raw_target[..pos].to_string(),
                raw_target[pos + 1..].to_string(),
            ),
            None => (raw_target, String::new()),
        };

        let headers_start = line_end + 2;
        let headers = match header_end {
            Some(end) if end > headers_start => {
                parse_header_block(&buffer[headers_start..end])
            }
            _ => HashMap::new(),
        };

        let raw = buffer.freeze();
        let mut body = match header_end {
            Some(end) if end + 4 < raw.len() => raw.slice(end + 4..),
            _ => Bytes::new(),
        };
        // a peer may push more bytes than it declared; the declaration wins
        if let Some(declared) = headers
            .get("content-length")
            .and_then(|value| value.parse::<usize>().ok())
        {
            if body.len() > declared {
                body.truncate(declared);
            }
        }

        Ok(HttpRequest {
            method,
            path,
            query,
            headers,
            body,
        })
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(&key.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Parses `key: value` lines. Keys are trimmed and lowercased, values
/// trimmed; blank lines and lines without a colon are skipped; the last
/// occurrence of a duplicate key wins.
pub(crate) fn parse_header_block(block: &[u8]) -> HashMap<String, String> {
    let text = String::from_utf8_lossy(block);
    let mut headers = HashMap::new();
    for line in text.split("\r\n") {
        if line.is_empty() {
            continue;
        }
        if let Some(colon) = line.find(':') {
            let key = line[..colon].trim().to_ascii_lowercase();
            let value = line[colon + 1..].trim().to_string();
            headers.insert(key, value);
        }
    }
    headers
}

pub(crate) fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;
    use crate::AppError;

    fn frame_from(raw: &str) -> RequestFrame {
        let buffer = BytesMut::from(raw);
        let header_end = find_subslice(&buffer, b"\r\n\r\n");
        RequestFrame { buffer, header_end }
    }

    #[test]
    fn test_parse_get_request() {
        let request =
            HttpRequest::parse(frame_from("GET /edit?index=3 HTTP/1.1\r\nHost: localhost\r\n\r\n"))
                .unwrap();
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/edit");
        assert_eq!(request.query, "index=3");
        assert_eq!(request.header("host"), Some("localhost"));
        assert!(request.body.is_empty());
    }

    #[test]
    fn test_parse_post_with_body() {
        let request = HttpRequest::parse(frame_from(
            "POST /submit HTTP/1.1\r\nContent-Length: 11\r\n\r\nitemName=ab",
        ))
        .unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(&request.body[..], b"itemName=ab");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let upper = HttpRequest::parse(frame_from(
            "POST /submit HTTP/1.1\r\nContent-Type: text/plain\r\n\r\n",
        ))
        .unwrap();
        let lower = HttpRequest::parse(frame_from(
            "POST /submit HTTP/1.1\r\ncontent-type: text/plain\r\n\r\n",
        ))
        .unwrap();
        assert_eq!(upper.headers, lower.headers);
        assert_eq!(upper.header("CONTENT-TYPE"), Some("text/plain"));
    }

    #[test]
    fn test_missing_request_line_terminator_is_rejected() {
        let result = HttpRequest::parse(frame_from("GET / HTTP/1.1"));
        assert!(matches!(result, Err(AppError::MalformedRequest(_))));
    }

    #[test]
    fn test_blank_request_line_is_rejected() {
        let result = HttpRequest::parse(frame_from("\r\nHost: localhost\r\n\r\n"));
        assert!(matches!(result, Err(AppError::MalformedRequest(_))));
    }

    #[test]
    fn test_tokens_after_target_are_ignored() {
        let request =
            HttpRequest::parse(frame_from("GET / HTTP/1.1 trailing junk\r\n\r\n")).unwrap();
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/");
    }

    #[test]
    fn test_missing_header_terminator_yields_empty_headers_and_body() {
        // peer closed after the request line; downstream still routes it
        let request = HttpRequest::parse(frame_from("GET / HTTP/1.1\r\nHost: local")).unwrap();
        assert!(request.headers.is_empty());
        assert!(request.body.is_empty());
    }

    #[test]
    fn test_body_is_truncated_to_declared_length() {
        let request = HttpRequest::parse(frame_from(
            "POST /submit HTTP/1.1\r\nContent-Length: 4\r\n\r\nabcdEXTRA",
        ))
        .unwrap();
        assert_eq!(&request.body[..], b"abcd");
    }

    #[test]
    fn test_unparseable_content_length_keeps_body() {
        let request = HttpRequest::parse(frame_from(
            "POST /submit HTTP/1.1\r\nContent-Length: abc\r\n\r\nwhatever",
        ))
        .unwrap();
        assert_eq!(&request.body[..], b"whatever");
    }

    #[test]
    fn test_colonless_header_lines_are_skipped() {
        let request = HttpRequest::parse(frame_from(
            "GET / HTTP/1.1\r\ngarbage line\r\nHost: localhost\r\n\r\n",
        ))
        .unwrap();
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header("host"), Some("localhost"));
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let request = HttpRequest::parse(frame_from(
            "GET / HTTP/1.1\r\nX-Tag: one\r\nX-Tag: two\r\n\r\n",
        ))
        .unwrap();
        assert_eq!(request.header("x-tag"), Some("two"));
    }
}
