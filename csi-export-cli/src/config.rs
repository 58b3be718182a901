//! Batch configuration loading and parsing

use anyhow::{Context, Result};
use csi_export::{ExportConfig, ExtractionConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Batch configuration (loaded from config.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub export: ExportSection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory for the generated files; defaults to each input's directory
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExportSection {
    #[serde(default)]
    pub strict: bool,
}

impl ExportSection {
    pub fn to_export_config(&self) -> ExportConfig {
        ExportConfig::new().with_strict(self.strict)
    }
}

impl OutputConfig {
    /// Destination for `input`: `<output_dir or input dir>/<stem>.csv`
    pub fn destination_for(&self, input: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => {
                let mut name = input.file_stem().unwrap_or_default().to_os_string();
                name.push(".csv");
                dir.join(name)
            }
            None => input.with_extension("csv"),
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if config.input.files.is_empty() {
        log::warn!("Config {:?} lists no input files", path);
    }

    Ok(config)
}
