//! Hand-rolled HTTP/1.1 protocol types.
//!
//! Everything the wire format needs lives here: request parsing, the
//! form/query codec and response serialization. Framing (deciding when a
//! full request has been buffered) lives in `crate::network`.

pub use form::{form_decode, form_encode, parse_form};
pub use request::HttpRequest;
pub use response::HttpResponse;

pub(crate) use request::{find_subslice, parse_header_block};

mod form;
mod request;
pub mod response;
