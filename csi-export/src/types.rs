//! Core types for the CSI export library
//!
//! This module defines the matrix the exporter consumes and the scalar values
//! it holds. Matrices are subcarrier-major: row `x` holds every frame's value
//! for subcarrier `x`, in frame order.

use num_complex::Complex64;
use std::fmt;

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur while reading, extracting or exporting CSI
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[source] csv::Error),

    #[error("Subcarrier index {index} out of range for matrix with {rows} rows")]
    SubcarrierOutOfRange { index: usize, rows: usize },

    #[error("Subcarrier {index} has {found} frames, expected {expected}")]
    RaggedRow {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Failed to parse capture file: {0}")]
    CaptureParse(String),

    #[error("Unsupported capture format: {0}")]
    UnsupportedFormat(String),
}

// The csv writer reports sink failures as its own error once a record
// outgrows its buffer; those are still I/O errors.
impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return ExportError::Csv(err);
        }
        match err.into_kind() {
            csv::ErrorKind::Io(e) => ExportError::Io(e),
            other => ExportError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("{:?}", other),
            )),
        }
    }
}

/// A single CSI matrix entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CsiValue {
    /// Raw complex channel response
    Complex(Complex64),
    /// Real-valued metric (amplitude, phase, dB...)
    Real(f64),
}

impl fmt::Display for CsiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsiValue::Real(v) => write!(f, "{}", v),
            CsiValue::Complex(c) => {
                let sign = if c.im.is_sign_negative() { '-' } else { '+' };
                write!(f, "({}{}{}j)", c.re, sign, c.im.abs())
            }
        }
    }
}

impl CsiValue {
    /// View this value as a complex number (real values get a zero imaginary part)
    pub fn as_complex(&self) -> Complex64 {
        match self {
            CsiValue::Complex(c) => *c,
            CsiValue::Real(v) => Complex64::new(*v, 0.0),
        }
    }

    /// Magnitude of the value
    pub fn amplitude(&self) -> f64 {
        self.as_complex().norm()
    }

    /// Phase angle in radians
    pub fn phase(&self) -> f64 {
        self.as_complex().arg()
    }
}

impl From<Complex64> for CsiValue {
    fn from(value: Complex64) -> Self {
        CsiValue::Complex(value)
    }
}

impl From<f64> for CsiValue {
    fn from(value: f64) -> Self {
        CsiValue::Real(value)
    }
}

/// Two-dimensional CSI container indexed `[subcarrier][frame]`
///
/// Rows are not required to have equal length. Whatever the extractor
/// produced is kept as-is so upstream decoding faults stay visible in the
/// exported file.
#[derive(Debug, Clone, PartialEq)]
pub struct CsiMatrix<T> {
    rows: Vec<Vec<T>>,
}

impl<T> CsiMatrix<T> {
    /// Create an empty matrix
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Build a matrix from subcarrier rows
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        Self { rows }
    }

    /// Append a subcarrier row
    pub fn push_row(&mut self, row: Vec<T>) {
        self.rows.push(row);
    }

    /// Number of subcarrier rows actually stored
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Bounds-checked row access
    pub fn row(&self, index: usize) -> Result<&[T]> {
        self.rows
            .get(index)
            .map(Vec::as_slice)
            .ok_or(ExportError::SubcarrierOutOfRange {
                index,
                rows: self.rows.len(),
            })
    }

    /// Mutable row access, used while the extractor fills in frames
    pub(crate) fn row_mut(&mut self, index: usize) -> Option<&mut Vec<T>> {
        self.rows.get_mut(index)
    }

    /// Iterate over rows in subcarrier order
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// `(rows, longest row)`
    pub fn shape(&self) -> (usize, usize) {
        let cols = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        (self.rows.len(), cols)
    }

    /// True when every row holds exactly `frame_count` entries
    pub fn is_rectangular(&self, frame_count: usize) -> bool {
        self.rows.iter().all(|row| row.len() == frame_count)
    }
}

impl<T> Default for CsiMatrix<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<Vec<T>>> for CsiMatrix<T> {
    fn from(rows: Vec<Vec<T>>) -> Self {
        Self::from_rows(rows)
    }
}
