use crate::http::response::{
    CONTENT_TYPE_CSS, CONTENT_TYPE_HTML, CONTENT_TYPE_JS, STATUS_NOT_FOUND, STATUS_OK,
};
use crate::http::HttpResponse;
use crate::render::NOT_FOUND_PAGE;
use crate::request::{RequestContext, StaticAssetRequest};

use super::ApiHandler;

/// `GET /static/*`: the two known assets, verbatim; anything else under the
/// prefix is the regular 404 page.
pub struct StaticAssetHandler;

impl ApiHandler for StaticAssetHandler {
    type Request = StaticAssetRequest;

    fn handle_request(&self, request: StaticAssetRequest, context: &RequestContext) -> HttpResponse {
        match request.path.as_str() {
            "/static/styles.css" => {
                HttpResponse::new(STATUS_OK, CONTENT_TYPE_CSS, context.assets.styles.clone())
            }
            "/static/formatter.js" => {
                HttpResponse::new(STATUS_OK, CONTENT_TYPE_JS, context.assets.formatter.clone())
            }
            _ => HttpResponse::new(STATUS_NOT_FOUND, CONTENT_TYPE_HTML, NOT_FOUND_PAGE),
        }
    }
}
