//! JSON capture dumps
//!
//! A JSON dump holds CSI that was already decoded by capture tooling:
//!
//! ```json
//! {
//!   "source": "nexmon bcm43455c0",
//!   "frames": [
//!     { "timestamp_ns": 0, "rssi": -41, "csi": [[1.0, 2.0], [5.0, 6.0]] }
//!   ]
//! }
//! ```
//!
//! Each `csi` entry is an `[re, im]` pair, one per subcarrier.

use super::{CaptureReader, DecodedCapture};
use crate::types::{ExportError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reader for JSON capture dumps
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCaptureReader;

impl JsonCaptureReader {
    /// Parse a capture from any reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<DecodedCapture> {
        serde_json::from_reader(reader)
            .map_err(|e| ExportError::CaptureParse(format!("Invalid JSON capture: {}", e)))
    }
}

impl CaptureReader for JsonCaptureReader {
    fn read_file(&self, path: &Path) -> Result<DecodedCapture> {
        log::info!("Reading JSON capture: {:?}", path);

        let file = File::open(path).map_err(|e| {
            ExportError::CaptureParse(format!("Failed to open capture {:?}: {}", path, e))
        })?;

        let capture = Self::from_reader(BufReader::new(file))?;

        log::debug!(
            "Capture {:?} holds {} frames (source: {})",
            path,
            capture.frames.len(),
            capture.source.as_deref().unwrap_or("unknown")
        );
        if let Some((start, end)) = capture.time_span() {
            log::debug!("Capture spans {} .. {}", start, end);
        }
        if let Some((weakest, strongest)) = capture.rssi_range() {
            log::debug!("RSSI range: {} .. {} dBm", weakest, strongest);
        }
        Ok(capture)
    }
}
