use crate::http::response::{CONTENT_TYPE_HTML, STATUS_OK};
use crate::http::HttpResponse;
use crate::render::render_items_page;
use crate::request::RequestContext;

use super::ApiHandler;

/// `GET /` and `GET /index.html`: the item table with totals.
pub struct ListingHandler;

impl ApiHandler for ListingHandler {
    type Request = ();

    fn handle_request(&self, _request: (), context: &RequestContext) -> HttpResponse {
        let items = context.store.snapshot();
        let page = render_items_page(&context.assets, &items);
        HttpResponse::new(STATUS_OK, CONTENT_TYPE_HTML, page)
    }
}
