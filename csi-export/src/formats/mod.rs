//! Capture file readers
//!
//! Binary wireless capture formats are decoded elsewhere; this module only
//! defines the seam a reader plugs into and the readers shipped with the
//! library. Each reader turns a file into a [`DecodedCapture`].

use crate::types::{ExportError, Result};
use chrono::{DateTime, Utc};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod json;

pub use json::JsonCaptureReader;

/// One CSI measurement taken from a single received frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsiFrame {
    /// Timestamp in nanoseconds since epoch
    #[serde(default)]
    pub timestamp_ns: u64,
    /// Received signal strength (dBm), if the capture recorded it
    #[serde(default)]
    pub rssi: Option<i8>,
    /// Channel response, one entry per subcarrier
    pub csi: Vec<Complex64>,
}

impl CsiFrame {
    /// Convert timestamp from nanoseconds to DateTime<Utc>
    pub fn timestamp(&self) -> DateTime<Utc> {
        let secs = (self.timestamp_ns / 1_000_000_000) as i64;
        let nsecs = (self.timestamp_ns % 1_000_000_000) as u32;
        DateTime::from_timestamp(secs, nsecs).unwrap_or_default()
    }

    /// Number of subcarriers carried by this frame
    pub fn subcarriers(&self) -> usize {
        self.csi.len()
    }
}

/// A fully read capture: frames in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodedCapture {
    /// Free-form description of where the capture came from (chipset, tool...)
    #[serde(default)]
    pub source: Option<String>,
    pub frames: Vec<CsiFrame>,
}

impl DecodedCapture {
    /// Timestamps of the first and last frame
    pub fn time_span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.frames.first()?;
        let last = self.frames.last()?;
        Some((first.timestamp(), last.timestamp()))
    }

    /// Weakest and strongest RSSI over frames that recorded one
    pub fn rssi_range(&self) -> Option<(i8, i8)> {
        self.frames
            .iter()
            .filter_map(|f| f.rssi)
            .fold(None, |range, rssi| match range {
                None => Some((rssi, rssi)),
                Some((lo, hi)) => Some((lo.min(rssi), hi.max(rssi))),
            })
    }
}

/// Common trait for capture readers
pub trait CaptureReader {
    /// Read and decode a capture file
    fn read_file(&self, path: &Path) -> Result<DecodedCapture>;
}

/// Select a reader for `path` based on its file extension
pub fn get_reader(path: &Path) -> Result<Box<dyn CaptureReader>> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some("json") => {
            log::debug!("Detected JSON capture format");
            Ok(Box::new(JsonCaptureReader))
        }
        _ => Err(ExportError::UnsupportedFormat(format!(
            "{:?} (extension {:?})",
            path, extension
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_selection() {
        assert!(get_reader(Path::new("capture.json")).is_ok());
        assert!(get_reader(Path::new("CAPTURE.JSON")).is_ok());

        match get_reader(Path::new("capture.pcap")) {
            Err(ExportError::UnsupportedFormat(_)) => {}
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("pcap should not have a reader"),
        }
        assert!(get_reader(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_frame_timestamp() {
        let frame = CsiFrame {
            timestamp_ns: 1_500_000_000,
            rssi: None,
            csi: vec![],
        };
        assert_eq!(frame.timestamp().timestamp(), 1);
        assert_eq!(frame.timestamp().timestamp_subsec_nanos(), 500_000_000);
    }

    #[test]
    fn test_capture_span_and_rssi() {
        let frame = |timestamp_ns, rssi| CsiFrame {
            timestamp_ns,
            rssi,
            csi: vec![],
        };
        let capture = DecodedCapture {
            source: None,
            frames: vec![
                frame(2_000_000_000, Some(-45)),
                frame(2_250_000_000, None),
                frame(3_000_000_000, Some(-38)),
            ],
        };

        let (start, end) = capture.time_span().unwrap();
        assert_eq!(start.timestamp(), 2);
        assert_eq!(end.timestamp(), 3);
        assert_eq!(capture.rssi_range(), Some((-45, -38)));

        let empty = DecodedCapture::default();
        assert!(empty.time_span().is_none());
        assert!(empty.rssi_range().is_none());
    }
}
