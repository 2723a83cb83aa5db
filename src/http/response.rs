use bytes::{BufMut, Bytes, BytesMut};

pub const STATUS_OK: &str = "HTTP/1.1 200 OK";
pub const STATUS_SEE_OTHER: &str = "HTTP/1.1 303 See Other";
pub const STATUS_BAD_REQUEST: &str = "HTTP/1.1 400 Bad Request";
pub const STATUS_NOT_FOUND: &str = "HTTP/1.1 404 Not Found";
pub const STATUS_PAYLOAD_TOO_LARGE: &str = "HTTP/1.1 413 Payload Too Large";
pub const STATUS_UNSUPPORTED_MEDIA_TYPE: &str = "HTTP/1.1 415 Unsupported Media Type";
pub const STATUS_INTERNAL_ERROR: &str = "HTTP/1.1 500 Internal Server Error";

pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub const CONTENT_TYPE_PLAIN: &str = "text/plain; charset=utf-8";
pub const CONTENT_TYPE_CSV: &str = "text/csv; charset=utf-8";
pub const CONTENT_TYPE_CSS: &str = "text/css; charset=utf-8";
pub const CONTENT_TYPE_JS: &str = "application/javascript; charset=utf-8";

/// One complete, connection-closing response.
///
/// The status line is emitted verbatim. `Content-Length` is always derived
/// from the actual body size; redirects carry no content type at all.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: &'static str,
    pub content_type: Option<&'static str>,
    pub extra_headers: Vec<(&'static str, String)>,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: &'static str, content_type: &'static str, body: impl Into<Bytes>) -> Self {
        HttpResponse {
            status,
            content_type: Some(content_type),
            extra_headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Plain-text response, used for every 4xx with a fixed message.
    pub fn plain(status: &'static str, message: &str) -> Self {
        HttpResponse::new(status, CONTENT_TYPE_PLAIN, message.to_string())
    }

    pub fn html(status: &'static str, page: impl Into<Bytes>) -> Self {
        HttpResponse::new(status, CONTENT_TYPE_HTML, page)
    }

    /// `303 See Other` with an empty body; a followed redirect re-fetches
    /// the listing so refresh/retry stays idempotent.
    pub fn redirect(location: &str) -> Self {
        HttpResponse {
            status: STATUS_SEE_OTHER,
            content_type: None,
            extra_headers: vec![("Location", location.to_string())],
            body: Bytes::new(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.extra_headers.push((name, value.into()));
        self
    }

    /// Serializes status line, headers and body into wire bytes.
    pub fn encode(&self) -> BytesMut {
        let mut buffer = BytesMut::with_capacity(self.body.len() + 256);
        buffer.put_slice(self.status.as_bytes());
        buffer.put_slice(b"\r\n");
        if let Some(content_type) = self.content_type {
            buffer.put_slice(b"Content-Type: ");
            buffer.put_slice(content_type.as_bytes());
            buffer.put_slice(b"\r\n");
        }
        for (name, value) in &self.extra_headers {
            buffer.put_slice(name.as_bytes());
            buffer.put_slice(b": ");
            buffer.put_slice(value.as_bytes());
            buffer.put_slice(b"\r\n");
        }
        buffer.put_slice(format!("Content-Length: {}\r\n", self.body.len()).as_bytes());
        buffer.put_slice(b"Connection: close\r\n\r\n");
        buffer.put_slice(&self.body);
        buffer
    }
}
