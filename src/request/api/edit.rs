use crate::http::response::{CONTENT_TYPE_HTML, STATUS_NOT_FOUND, STATUS_OK};
use crate::http::HttpResponse;
use crate::render::render_edit_page;
use crate::request::{EditFormRequest, RequestContext};

use super::ApiHandler;

/// `GET /edit?index=N`: the prefilled edit form for one item.
pub struct EditFormHandler;

impl ApiHandler for EditFormHandler {
    type Request = EditFormRequest;

    fn handle_request(&self, request: EditFormRequest, context: &RequestContext) -> HttpResponse {
        match context.store.get(request.index) {
            Some(item) => {
                let page = render_edit_page(&context.assets, request.index, &item);
                HttpResponse::new(STATUS_OK, CONTENT_TYPE_HTML, page)
            }
            None => HttpResponse::plain(STATUS_NOT_FOUND, "El item solicitado no existe"),
        }
    }
}
