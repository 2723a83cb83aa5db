use bytes::BytesMut;
use tokio::io::AsyncReadExt;
use tokio::net::tcp::OwnedReadHalf;

use crate::network::RequestFrame;
use crate::AppResult;

/// Read side of one client connection.
///
/// Wraps the stream's read half together with the accumulation buffer the
/// framing check runs against. The write half stays with the connection
/// handler.
#[derive(Debug)]
pub struct Connection {
    reader: OwnedReadHalf,
    buffer: BytesMut,
    max_request_size: usize,
}

impl Connection {
    pub fn new(reader: OwnedReadHalf, read_buffer_size: usize, max_request_size: usize) -> Connection {
        Connection {
            reader,
            buffer: BytesMut::with_capacity(read_buffer_size),
            max_request_size,
        }
    }

    /// Reads one HTTP request from the connection.
    ///
    /// Data is pulled from the stream in chunks until the framing check
    /// accepts the buffer. If the peer closes without sending anything,
    /// `None` is returned and the caller closes silently. If the peer
    /// closes mid-request, the partial buffer is handed downstream as-is;
    /// the parser's fallbacks take it from there.
    pub async fn read_request(&mut self) -> AppResult<Option<RequestFrame>> {
        loop {
            if let Some(frame) = RequestFrame::parse(&mut self.buffer, self.max_request_size)? {
                return Ok(Some(frame));
            }
            if 0 == self.reader.read_buf(&mut self.buffer).await? {
                return Ok(RequestFrame::on_peer_close(&mut self.buffer));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::AsyncWriteExt;
    use tokio::net::{TcpListener, TcpStream};

    use super::*;

    async fn accept_connection(listener: &TcpListener) -> (Connection, tokio::net::tcp::OwnedWriteHalf) {
        let (socket, _) = listener.accept().await.unwrap();
        let (reader, writer) = socket.into_split();
        (Connection::new(reader, 16, 4096), writer)
    }

    #[tokio::test]
    async fn test_read_request_across_fragmented_writes() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            let chunks: [&[u8]; 4] = [
                b"POST /submit HT",
                b"TP/1.1\r\nContent-Le",
                b"ngth: 10\r\n\r\nitem",
                b"Name=a",
            ];
            for chunk in chunks {
                stream.write_all(chunk).await.unwrap();
                stream.flush().await.unwrap();
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            stream
        });

        let (mut connection, _writer) = accept_connection(&listener).await;
        let frame = connection.read_request().await.unwrap().unwrap();
        assert!(frame.header_end.is_some());
        assert!(frame.buffer.ends_with(b"itemName=a"));
        drop(client.await.unwrap());
    }

    #[tokio::test]
    async fn test_peer_close_mid_body_returns_partial_frame() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream
                .write_all(b"POST /submit HTTP/1.1\r\nContent-Length: 100\r\n\r\nshort")
                .await
                .unwrap();
            // dropping the stream closes the connection with the body unmet
        });

        let (mut connection, _writer) = accept_connection(&listener).await;
        let frame = connection.read_request().await.unwrap().unwrap();
        assert!(frame.buffer.ends_with(b"short"));
        client.await.unwrap();
    }

    #[tokio::test]
    async fn test_peer_close_without_sending_returns_none() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = tokio::spawn(async move {
            let stream = TcpStream::connect(addr).await.unwrap();
            drop(stream);
        });

        let (mut connection, _writer) = accept_connection(&listener).await;
        assert!(connection.read_request().await.unwrap().is_none());
        client.await.unwrap();
    }
}
