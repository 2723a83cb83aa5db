use std::fs;
use std::path::Path;

use crate::{AppError, AppResult};

/// Templates and static files, loaded from disk once at startup.
#[derive(Debug)]
pub struct Assets {
    pub index_template: String,
    pub edit_template: String,
    pub styles: String,
    pub formatter: String,
}

impl Assets {
    pub fn load(template_dir: &str, static_dir: &str) -> AppResult<Assets> {
        Ok(Assets {
            index_template: read_asset(template_dir, "index.html")?,
            edit_template: read_asset(template_dir, "edit.html")?,
            styles: read_asset(static_dir, "styles.css")?,
            formatter: read_asset(static_dir, "formatter.js")?,
        })
    }
}

fn read_asset(dir: &str, name: &str) -> AppResult<String> {
    let path = Path::new(dir).join(name);
    fs::read_to_string(&path).map_err(|err| {
        AppError::DetailedIoError(format!("failed to read {}: {}", path.display(), err))
    })
}
