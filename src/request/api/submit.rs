use tracing::debug;

use crate::http::HttpResponse;
use crate::request::{RequestContext, SubmitRequest};

use super::ApiHandler;

/// `POST /submit`: appends the validated item and redirects to the listing.
pub struct SubmitHandler;

impl ApiHandler for SubmitHandler {
    type Request = SubmitRequest;

    fn handle_request(&self, request: SubmitRequest, context: &RequestContext) -> HttpResponse {
        debug!("appending item {:?}", request.item.name);
        context.store.append(request.item);
        HttpResponse::redirect("/")
    }
}
