use crate::http::response::{CONTENT_TYPE_CSV, STATUS_OK};
use crate::http::HttpResponse;
use crate::render::render_items_csv;
use crate::request::RequestContext;

use super::ApiHandler;

/// `GET /export`: the list as a CSV attachment.
pub struct ExportHandler;

impl ApiHandler for ExportHandler {
    type Request = ();

    fn handle_request(&self, _request: (), context: &RequestContext) -> HttpResponse {
        let items = context.store.snapshot();
        let csv = render_items_csv(&items);
        HttpResponse::new(STATUS_OK, CONTENT_TYPE_CSV, csv)
            .with_header("Content-Disposition", "attachment; filename=\"items.csv\"")
    }
}
