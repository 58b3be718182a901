//! File-to-file conversion
//!
//! Chains the pieces together: pick a reader for the input, decode it,
//! extract the CSI matrix and hand it to the exporter.

use crate::config::{ExportConfig, ExtractionConfig};
use crate::exporter::export_csv_with;
use crate::extraction::extract;
use crate::formats::{get_reader, CaptureReader};
use crate::types::Result;
use std::path::Path;

/// What a conversion produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Frames read from the capture
    pub frame_count: usize,
    /// Subcarrier rows written
    pub subcarrier_count: usize,
    /// `(rows, longest row)` of the extracted matrix
    pub shape: (usize, usize),
}

/// Convert a capture file into a tab-separated CSI file
///
/// The reader is chosen from the input's extension.
///
/// # Example
/// ```no_run
/// use csi_export::{convert_file, ExportConfig, ExtractionConfig};
/// use std::path::Path;
///
/// let summary = convert_file(
///     Path::new("capture.json"),
///     Path::new("capture.csv"),
///     &ExtractionConfig::new(),
///     &ExportConfig::new(),
/// ).unwrap();
/// println!("{} frames", summary.frame_count);
/// ```
pub fn convert_file(
    input: &Path,
    dest: &Path,
    extraction: &ExtractionConfig,
    export: &ExportConfig,
) -> Result<ConversionSummary> {
    let reader = get_reader(input)?;
    convert_with_reader(reader.as_ref(), input, dest, extraction, export)
}

/// Same as [`convert_file`] with a caller-supplied reader
pub fn convert_with_reader(
    reader: &dyn CaptureReader,
    input: &Path,
    dest: &Path,
    extraction: &ExtractionConfig,
    export: &ExportConfig,
) -> Result<ConversionSummary> {
    let capture = reader.read_file(input)?;
    let result = extract(&capture, extraction);

    let shape = result.matrix.shape();
    log::info!("CSI matrix shape: {:?}", shape);
    log::info!("Frames: {}", result.frame_count);

    let export = match export.frame_count {
        Some(_) => export.clone(),
        None => export.clone().with_frame_count(result.frame_count),
    };
    export_csv_with(&result.matrix, result.subcarrier_count, dest, &export)?;

    Ok(ConversionSummary {
        frame_count: result.frame_count,
        subcarrier_count: result.subcarrier_count,
        shape,
    })
}
