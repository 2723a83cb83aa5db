use crate::http::response::{STATUS_BAD_REQUEST, STATUS_UNSUPPORTED_MEDIA_TYPE};
use crate::http::{parse_form, HttpRequest, HttpResponse};

use super::item_form;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A request resolved against the routing surface, with query/form fields
/// already validated. Anything invalid never becomes a `RouteRequest`; it
/// short-circuits into the matching 4xx response instead.
#[derive(Debug)]
pub enum RouteRequest {
    Listing,
    Export,
    EditForm(EditFormRequest),
    Submit(SubmitRequest),
    Update(UpdateRequest),
    StaticAsset(StaticAssetRequest),
    NotFound,
}

#[derive(Debug)]
pub struct EditFormRequest {
    pub index: usize,
}

#[derive(Debug)]
pub struct SubmitRequest {
    pub item: crate::store::Item,
}

#[derive(Debug)]
pub struct UpdateRequest {
    pub index: usize,
    pub item: crate::store::Item,
}

#[derive(Debug)]
pub struct StaticAssetRequest {
    pub path: String,
}

impl RouteRequest {
    pub fn parse_from(request: &HttpRequest) -> Result<RouteRequest, HttpResponse> {
        match (request.method.as_str(), request.path.as_str()) {
            ("GET", "/") | ("GET", "/index.html") => Ok(RouteRequest::Listing),
            ("GET", "/export") => Ok(RouteRequest::Export),
            ("GET", "/edit") => {
                let query_values = parse_form(&request.query);
                let raw_index = query_values.get("index").ok_or_else(|| {
                    HttpResponse::plain(STATUS_BAD_REQUEST, "Índice de item requerido")
                })?;
                let index = raw_index.parse::<usize>().map_err(|_| {
                    HttpResponse::plain(STATUS_BAD_REQUEST, "Índice de item inválido")
                })?;
                Ok(RouteRequest::EditForm(EditFormRequest { index }))
            }
            ("POST", "/submit") => {
                require_form_content_type(request)?;
                let form_values = parse_form(&String::from_utf8_lossy(&request.body));
                let item = item_form::item_from_form(&form_values)
                    .map_err(|err| HttpResponse::plain(STATUS_BAD_REQUEST, &err.to_string()))?;
                Ok(RouteRequest::Submit(SubmitRequest { item }))
            }
            ("POST", "/update") => {
                require_form_content_type(request)?;
                let form_values = parse_form(&String::from_utf8_lossy(&request.body));
                let (index, item) = item_form::update_from_form(&form_values)
                    .map_err(|err| HttpResponse::plain(STATUS_BAD_REQUEST, &err.to_string()))?;
                Ok(RouteRequest::Update(UpdateRequest { index, item }))
            }
            ("GET", path) if path.starts_with("/static/") => {
                Ok(RouteRequest::StaticAsset(StaticAssetRequest {
                    path: path.to_string(),
                }))
            }
            _ => Ok(RouteRequest::NotFound),
        }
    }
}

/// POST routes only accept form bodies; the check is a containment test so
/// a charset suffix still passes.
fn require_form_content_type(request: &HttpRequest) -> Result<(), HttpResponse> {
    match request.header("content-type") {
        Some(content_type) if content_type.contains(FORM_CONTENT_TYPE) => Ok(()),
        _ => Err(HttpResponse::plain(
            STATUS_UNSUPPORTED_MEDIA_TYPE,
            "Contenido no soportado",
        )),
    }
}
