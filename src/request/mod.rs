mod api;
mod item_form;
mod request_context;
mod request_processor;
mod route;

pub use request_context::RequestContext;
pub use request_processor::RequestProcessor;

pub use item_form::ItemFormError;
pub use route::{
    EditFormRequest, RouteRequest, StaticAssetRequest, SubmitRequest, UpdateRequest,
};
