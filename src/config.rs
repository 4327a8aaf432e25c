use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{self, Context};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEDGER_FILE: &str = "passbook.json";

#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub ledger_file: PathBuf,
}

impl AppConfig {
    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file_content = fs::read_to_string(filepath)
            .with_context(|| "failed to read config file")?;
        let config = toml::from_str(&file_content)
            .with_context(|| "failed to parse config file")?;
        return Ok(config);
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        return AppConfig { ledger_file: PathBuf::from(DEFAULT_LEDGER_FILE) };
    }
}
