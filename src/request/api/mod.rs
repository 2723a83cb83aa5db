mod assets;
mod edit;
mod export;
mod handler;
mod listing;
mod submit;
mod update;

pub use assets::StaticAssetHandler;
pub use edit::EditFormHandler;
pub use export::ExportHandler;
pub use handler::ApiHandler;
pub use listing::ListingHandler;
pub use submit::SubmitHandler;
pub use update::UpdateHandler;
