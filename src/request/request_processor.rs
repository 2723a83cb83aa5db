// Copyright 2025 jonefeewang@gmail.com
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use tracing::trace;

use crate::http::response::STATUS_NOT_FOUND;
use crate::http::HttpResponse;
use crate::render::NOT_FOUND_PAGE;
use crate::request::api::ApiHandler;
use crate::request::api::EditFormHandler;
use crate::request::api::ExportHandler;
use crate::request::api::ListingHandler;
use crate::request::api::StaticAssetHandler;
use crate::request::api::SubmitHandler;
use crate::request::api::UpdateHandler;

use crate::request::RequestContext;
use crate::request::RouteRequest;

/// general handler dispatch
fn execute_handler<H>(handler: H, request: H::Request, context: &RequestContext) -> HttpResponse
where
    H: ApiHandler,
{
    handler.handle_request(request, context)
}

pub struct RequestProcessor;

impl RequestProcessor {
    pub fn process_request(request: RouteRequest, context: &RequestContext) -> HttpResponse {
        trace!("Processing request: {:?}", request);
        match request {
            RouteRequest::Listing => {
                let handler = ListingHandler;
                execute_handler(handler, (), context)
            }
            RouteRequest::Export => {
                let handler = ExportHandler;
                execute_handler(handler, (), context)
            }
            RouteRequest::EditForm(request) => {
                let handler = EditFormHandler;
                execute_handler(handler, request, context)
            }
            RouteRequest::Submit(request) => {
                let handler = SubmitHandler;
                execute_handler(handler, request, context)
            }
            RouteRequest::Update(request) => {
                let handler = UpdateHandler;
                execute_handler(handler, request, context)
            }
            RouteRequest::StaticAsset(request) => {
                let handler = StaticAssetHandler;
                execute_handler(handler, request, context)
            }
            RouteRequest::NotFound => HttpResponse::html(STATUS_NOT_FOUND, NOT_FOUND_PAGE),
        }
    }
}
