extern crate config as _;

use std::path::Path;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::{AppError, AppResult};

pub static GLOBAL_CONFIG: OnceCell<ServerConfig> = OnceCell::new();
pub fn global_config() -> &'static ServerConfig {
    GLOBAL_CONFIG.get().unwrap()
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct GeneralConfig {
    /// directory holding the HTML page templates
    pub template_dir: String,
    /// directory holding the assets served under /static/
    pub static_dir: String,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct NetworkConfig {
    pub ip: String,
    pub port: u16,
    pub max_connection: usize,
    pub conn_read_buffer_size: usize,
    /// upper bound for a buffered request, headers and declared body included
    pub max_request_size: usize,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub general: GeneralConfig,
    pub network: NetworkConfig,
}

impl ServerConfig {
    pub fn set_up_config<P: AsRef<Path>>(path: P) -> AppResult<ServerConfig> {
        let path_str = path
            .as_ref()
            .to_str()
            .ok_or(AppError::InvalidValue(format!(
                "config file path: {}",
                path.as_ref().to_string_lossy()
            )))?;
        let config = config::Config::builder()
            .add_source(config::File::with_name(path_str))
            .build()
            .unwrap_or_else(|err| {
                eprintln!("error in reading config files: {:?}", err);
                std::process::exit(1);
            });

        let server_config: ServerConfig = config.try_deserialize()?;

        Ok(server_config)
    }
}
