mod http;
mod network;
mod render;
mod request;
mod service;
mod store;

pub use http::{form_decode, form_encode, parse_form, HttpRequest, HttpResponse};
pub use network::{Connection, RequestFrame};
pub use render::Assets;
pub use request::{RequestContext, RequestProcessor, RouteRequest};
pub use service::{
    global_config, setup_local_tracing, setup_tracing, AppError, AppResult, LogGuard, Server,
    ServerConfig, Shutdown, Tracker, GLOBAL_CONFIG,
};
pub use store::{Item, ItemStore};
