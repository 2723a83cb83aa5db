use bytes::BytesMut;

use crate::http::{find_subslice, parse_header_block};
use crate::AppError::Incomplete;
use crate::{AppError, AppResult};

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// One fully buffered raw request plus the offset of the header terminator,
/// when one was seen. A frame salvaged from a mid-request disconnect may
/// carry no terminator at all; the parser falls back accordingly.
#[derive(Debug)]
pub struct RequestFrame {
    pub buffer: BytesMut,
    pub header_end: Option<usize>,
}

impl RequestFrame {
    /// Decides whether `buffer` holds a complete request.
    ///
    /// Complete means the header terminator has arrived and the bytes after
    /// it cover the declared `Content-Length`. An absent or unparseable
    /// declaration counts as zero. Returns the `Incomplete` marker while
    /// more bytes are needed; a declaration (or headerless buffer) past
    /// `max_request_size` is a hard error.
    pub fn check(buffer: &BytesMut, max_request_size: usize) -> AppResult<()> {
        let header_end = match find_subslice(buffer, HEADER_TERMINATOR) {
            Some(pos) => pos,
            None => {
                if buffer.len() > max_request_size {
                    return Err(AppError::RequestTooLarge(format!(
                        "header block exceeds {} bytes",
                        max_request_size
                    )));
                }
                return Err(Incomplete);
            }
        };
        let declared = declared_content_length(&buffer[..header_end]);
        if declared > max_request_size {
            return Err(AppError::RequestTooLarge(format!(
                "declared body of {} bytes is too large",
                declared
            )));
        }
        if buffer.len() - header_end - HEADER_TERMINATOR.len() < declared {
            return Err(Incomplete);
        }
        Ok(())
    }

    pub(crate) fn parse(
        buffer: &mut BytesMut,
        max_request_size: usize,
    ) -> AppResult<Option<RequestFrame>> {
        // perform a check to ensure we have enough data
        match RequestFrame::check(buffer, max_request_size) {
            Ok(_) => {
                let header_end = find_subslice(buffer, HEADER_TERMINATOR);
                Ok(Some(RequestFrame {
                    buffer: buffer.split(),
                    header_end,
                }))
            }
            Err(AppError::Incomplete) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Salvages whatever arrived when the peer closed before completing a
    /// frame. Later stages handle the short or headerless buffer.
    pub(crate) fn on_peer_close(buffer: &mut BytesMut) -> Option<RequestFrame> {
        if buffer.is_empty() {
            return None;
        }
        let header_end = find_subslice(buffer, HEADER_TERMINATOR);
        Some(RequestFrame {
            buffer: buffer.split(),
            header_end,
        })
    }
}

/// The scan covers everything before the terminator, request line included;
/// lines without a colon are ignored by the header tokenizer anyway.
fn declared_content_length(header_block: &[u8]) -> usize {
    parse_header_block(header_block)
        .get("content-length")
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(0)
}
