//! CSI Export Library
//!
//! Reads Channel State Information captures and writes the CSI matrix as a
//! tab-separated text file: one line per subcarrier, one field per frame.
//!
//! # Architecture
//!
//! - [`formats`]: capture readers behind the [`CaptureReader`] trait
//! - [`extraction`]: builds the subcarrier-major [`CsiMatrix`]
//! - [`exporter`]: serialises a matrix to disk
//! - [`pipeline`]: chains the three for file-to-file conversion
//!
//! The library does NOT:
//! - Decode vendor binary capture formats
//! - Run statistics or filtering over CSI values
//! - Print anything to stdout (diagnostics go through `log`)
//!
//! # Example Usage
//!
//! ```no_run
//! use csi_export::{export_csv, CsiMatrix, CsiValue};
//! use num_complex::Complex64;
//!
//! let matrix = CsiMatrix::from_rows(vec![
//!     vec![CsiValue::from(Complex64::new(1.0, 2.0)), CsiValue::from(Complex64::new(3.0, 4.0))],
//!     vec![CsiValue::from(Complex64::new(5.0, 6.0)), CsiValue::from(Complex64::new(7.0, -1.0))],
//! ]);
//!
//! export_csv(&matrix, 2, "csi.csv").unwrap();
//! ```

// Public modules
pub mod config;
pub mod exporter;
pub mod extraction;
pub mod formats;
pub mod pipeline;
pub mod types;

// Re-export main types for convenience
pub use config::{CsiMetric, ExportConfig, ExtractionConfig};
pub use exporter::{export_csv, export_csv_with, to_csv_string, write_csv};
pub use extraction::{extract, Extraction};
pub use formats::{get_reader, CaptureReader, CsiFrame, DecodedCapture, JsonCaptureReader};
pub use pipeline::{convert_file, convert_with_reader, ConversionSummary};
pub use types::{CsiMatrix, CsiValue, ExportError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
