//! Extraction and export configuration types
//!
//! The library only needs a handful of knobs: which metric to pull out of the
//! raw CSI, and how strictly the exporter should treat the matrix it is given.

use serde::{Deserialize, Serialize};

/// Which quantity the extractor stores in the matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsiMetric {
    /// Raw complex values
    #[default]
    Complex,
    /// Magnitude `|h|`
    Amplitude,
    /// Phase angle in radians
    Phase,
}

impl std::str::FromStr for CsiMetric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "complex" => Ok(CsiMetric::Complex),
            "amplitude" => Ok(CsiMetric::Amplitude),
            "phase" => Ok(CsiMetric::Phase),
            other => Err(format!("unknown CSI metric: {}", other)),
        }
    }
}

/// Configuration for CSI extraction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Quantity written into each matrix cell
    #[serde(default)]
    pub metric: CsiMetric,

    /// Convert amplitudes to dB (`20 * log10(|h|)`); ignored for other metrics
    #[serde(default)]
    pub amplitude_db: bool,
}

impl ExtractionConfig {
    /// Create an extraction configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: select the extracted metric
    pub fn with_metric(mut self, metric: CsiMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Builder method: express amplitudes in dB
    pub fn with_amplitude_db(mut self, enabled: bool) -> Self {
        self.amplitude_db = enabled;
        self
    }
}

/// Configuration for the CSV exporter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Field delimiter (tab by default)
    #[serde(default = "default_delimiter")]
    pub delimiter: u8,

    /// Validate the matrix shape before the destination is touched
    #[serde(default)]
    pub strict: bool,

    /// Expected number of frames per row; only checked in strict mode
    #[serde(default)]
    pub frame_count: Option<usize>,
}

fn default_delimiter() -> u8 {
    b'\t'
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            strict: false,
            frame_count: None,
        }
    }
}

impl ExportConfig {
    /// Create an export configuration with default (permissive) settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: enable or disable strict shape validation
    pub fn with_strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Builder method: set the expected frame count for strict validation
    pub fn with_frame_count(mut self, frame_count: usize) -> Self {
        self.frame_count = Some(frame_count);
        self
    }

    /// Builder method: override the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}
