use tracing::debug;

use crate::http::response::STATUS_NOT_FOUND;
use crate::http::HttpResponse;
use crate::request::{RequestContext, UpdateRequest};

use super::ApiHandler;

/// `POST /update`: replaces the item at the given index in place.
pub struct UpdateHandler;

impl ApiHandler for UpdateHandler {
    type Request = UpdateRequest;

    fn handle_request(&self, request: UpdateRequest, context: &RequestContext) -> HttpResponse {
        debug!("replacing item at index {}", request.index);
        if context.store.replace(request.index, request.item) {
            HttpResponse::redirect("/")
        } else {
            HttpResponse::plain(STATUS_NOT_FOUND, "El item solicitado no existe.")
        }
    }
}
