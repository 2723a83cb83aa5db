pub use app_error::{AppError, AppResult};
pub use config::{global_config, ServerConfig, GLOBAL_CONFIG};
pub use server::Server;
pub use shutdown::Shutdown;
pub use tracing_config::{setup_local_tracing, setup_tracing, LogGuard};
pub use tracker::Tracker;

mod app_error;
mod config;
mod server;
mod shutdown;
mod tracing_config;
mod tracker;
