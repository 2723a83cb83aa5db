//! Connection handling and request framing.
//!
//! Built on tokio's async I/O primitives: `Connection` pulls bytes off an
//! accepted socket, `RequestFrame` decides when those bytes amount to a
//! complete HTTP request (header terminator seen, declared body length
//! satisfied) and carries the raw buffer to the parser.

pub use connection::Connection;
pub use frame::RequestFrame;
mod connection;
mod frame;
