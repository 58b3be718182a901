//! Tab-separated CSI matrix export
//!
//! Writes one line per subcarrier and one field per frame. Fields are the
//! plain `Display` text of each value; anything containing the delimiter, a
//! quote or a line break is quoted with standard CSV rules.
//!
//! Default behaviour mirrors what was decoded: `subcarrier_count` is trusted
//! as the loop bound, ragged rows are written as they are, and an index past
//! the last row fails only when it is reached. Rows written before that point
//! stay in the destination. [`ExportConfig::strict`] turns on validation that
//! runs before the destination is opened.

use crate::config::ExportConfig;
use crate::types::{CsiMatrix, ExportError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fmt::Display;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Export `matrix` to `dest` using the default (permissive, tab-separated) settings
pub fn export_csv<T: Display>(
    matrix: &CsiMatrix<T>,
    subcarrier_count: usize,
    dest: impl AsRef<Path>,
) -> Result<()> {
    export_csv_with(matrix, subcarrier_count, dest, &ExportConfig::default())
}

/// Export `matrix` to `dest`, creating or truncating the file
///
/// The file handle lives only for the duration of this call and is closed on
/// every return path.
pub fn export_csv_with<T: Display>(
    matrix: &CsiMatrix<T>,
    subcarrier_count: usize,
    dest: impl AsRef<Path>,
    config: &ExportConfig,
) -> Result<()> {
    let dest = dest.as_ref();

    if config.strict {
        validate(matrix, subcarrier_count, config.frame_count)?;
    }

    log::debug!("Writing {} subcarrier rows to {:?}", subcarrier_count, dest);
    let file = File::create(dest)?;
    write_csv(matrix, subcarrier_count, file, config)?;

    log::debug!("Export to {:?} complete", dest);
    Ok(())
}

/// Write the first `subcarrier_count` rows of `matrix` to any sink
pub fn write_csv<T: Display, W: Write>(
    matrix: &CsiMatrix<T>,
    subcarrier_count: usize,
    sink: W,
    config: &ExportConfig,
) -> Result<()> {
    let mut writer = writer_builder(config).from_writer(sink);

    for x in 0..subcarrier_count {
        let row = matrix.row(x)?;
        log::trace!("Subcarrier {}: {} frames", x, row.len());

        if row.is_empty() {
            // csv renders a record without fields as `""`; an empty row is a bare line
            let mut inner = writer
                .into_inner()
                .map_err(|e| io::Error::new(e.error().kind(), e.error().to_string()))?;
            inner.write_all(b"\n")?;
            writer = writer_builder(config).from_writer(inner);
            continue;
        }

        writer.write_record(row.iter().map(|value| value.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}

fn writer_builder(config: &ExportConfig) -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .delimiter(config.delimiter)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .has_headers(false)
        .flexible(true);
    builder
}

/// Shape checks applied in strict mode
fn validate<T>(
    matrix: &CsiMatrix<T>,
    subcarrier_count: usize,
    frame_count: Option<usize>,
) -> Result<()> {
    if subcarrier_count > matrix.rows() {
        return Err(ExportError::SubcarrierOutOfRange {
            index: matrix.rows(),
            rows: matrix.rows(),
        });
    }

    if let Some(expected) = frame_count {
        for (index, row) in matrix.iter_rows().take(subcarrier_count).enumerate() {
            if row.len() != expected {
                return Err(ExportError::RaggedRow {
                    index,
                    expected,
                    found: row.len(),
                });
            }
        }
    }

    Ok(())
}

/// Render a matrix into a `String` (handy for previews and tests)
pub fn to_csv_string<T: Display>(
    matrix: &CsiMatrix<T>,
    subcarrier_count: usize,
    config: &ExportConfig,
) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(matrix, subcarrier_count, &mut buf, config)?;
    String::from_utf8(buf)
        .map_err(|e| ExportError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CsiValue;
    use num_complex::Complex64;

    fn c(re: f64, im: f64) -> CsiValue {
        CsiValue::Complex(Complex64::new(re, im))
    }

    #[test]
    fn test_complex_matrix_output() {
        let matrix = CsiMatrix::from_rows(vec![
            vec![c(1.0, 2.0), c(3.0, 4.0)],
            vec![c(5.0, 6.0), c(7.0, -1.0)],
        ]);

        let out = to_csv_string(&matrix, 2, &ExportConfig::default()).unwrap();
        assert_eq!(out, "(1+2j)\t(3+4j)\n(5+6j)\t(7-1j)\n");
    }

    #[test]
    fn test_zero_subcarriers_is_empty() {
        let matrix = CsiMatrix::from_rows(vec![vec![1.0, 2.0]]);
        let out = to_csv_string(&matrix, 0, &ExportConfig::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_subcarrier_count_bounds_iteration() {
        let matrix = CsiMatrix::from_rows(vec![vec![1], vec![2], vec![3]]);
        let out = to_csv_string(&matrix, 2, &ExportConfig::default()).unwrap();
        assert_eq!(out, "1\n2\n");
    }

    #[test]
    fn test_fields_needing_quotes() {
        let matrix = CsiMatrix::from_rows(vec![vec!["a\tb", "say \"hi\"", "plain"]]);
        let out = to_csv_string(&matrix, 1, &ExportConfig::default()).unwrap();
        assert_eq!(out, "\"a\tb\"\t\"say \"\"hi\"\"\"\tplain\n");
    }

    #[test]
    fn test_ragged_rows_written_as_is() {
        let matrix = CsiMatrix::from_rows(vec![vec![1, 2, 3], vec![4]]);
        let out = to_csv_string(&matrix, 2, &ExportConfig::default()).unwrap();
        assert_eq!(out, "1\t2\t3\n4\n");
    }

    #[test]
    fn test_empty_row_is_bare_line() {
        let matrix: CsiMatrix<i32> = CsiMatrix::from_rows(vec![vec![1], vec![], vec![2]]);
        let out = to_csv_string(&matrix, 3, &ExportConfig::default()).unwrap();
        assert_eq!(out, "1\n\n2\n");
    }

    #[test]
    fn test_out_of_range_fails_after_writing_earlier_rows() {
        let matrix = CsiMatrix::from_rows(vec![vec![1, 2]]);
        let mut buf = Vec::new();

        let result = write_csv(&matrix, 3, &mut buf, &ExportConfig::default());
        assert!(matches!(
            result,
            Err(ExportError::SubcarrierOutOfRange { index: 1, rows: 1 })
        ));
        assert_eq!(buf, b"1\t2\n");
    }

    #[test]
    fn test_strict_validation() {
        let matrix = CsiMatrix::from_rows(vec![vec![1, 2], vec![3]]);

        assert!(matches!(
            validate(&matrix, 3, None),
            Err(ExportError::SubcarrierOutOfRange { .. })
        ));
        assert!(matches!(
            validate(&matrix, 2, Some(2)),
            Err(ExportError::RaggedRow { index: 1, expected: 2, found: 1 })
        ));
        assert!(validate(&matrix, 1, Some(2)).is_ok());
        assert!(validate(&matrix, 2, None).is_ok());
    }

    #[test]
    fn test_custom_delimiter() {
        let matrix = CsiMatrix::from_rows(vec![vec![1.5, 2.25]]);
        let config = ExportConfig::new().with_delimiter(b',');
        let out = to_csv_string(&matrix, 1, &config).unwrap();
        assert_eq!(out, "1.5,2.25\n");
    }
}
