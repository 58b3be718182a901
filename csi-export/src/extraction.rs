//! CSI matrix extraction
//!
//! Turns a frame-ordered capture into a subcarrier-major [`CsiMatrix`]:
//! row `s` collects subcarrier `s` from every frame, in file order.

use crate::config::{CsiMetric, ExtractionConfig};
use crate::formats::DecodedCapture;
use crate::types::{CsiMatrix, CsiValue};
use num_complex::Complex64;

/// Output of [`extract`]
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Matrix indexed `[subcarrier][frame]`
    pub matrix: CsiMatrix<CsiValue>,
    /// Number of frames in the capture
    pub frame_count: usize,
    /// Number of subcarriers, taken from the first frame
    pub subcarrier_count: usize,
}

/// Build the CSI matrix for a capture
///
/// Frames carrying fewer subcarriers than the first one leave their missing
/// cells out, so the affected rows come out shorter. Extra subcarriers are
/// dropped. Both cases are logged but never rejected here.
pub fn extract(capture: &DecodedCapture, config: &ExtractionConfig) -> Extraction {
    let frame_count = capture.frames.len();
    let subcarrier_count = capture.frames.first().map(|f| f.subcarriers()).unwrap_or(0);

    log::debug!(
        "Extracting {:?} CSI: {} frames x {} subcarriers",
        config.metric,
        frame_count,
        subcarrier_count
    );

    let mut matrix = CsiMatrix::from_rows(
        (0..subcarrier_count)
            .map(|_| Vec::with_capacity(frame_count))
            .collect(),
    );

    for (frame_index, frame) in capture.frames.iter().enumerate() {
        if frame.subcarriers() != subcarrier_count {
            log::warn!(
                "Frame {} has {} subcarriers, expected {}",
                frame_index,
                frame.subcarriers(),
                subcarrier_count
            );
        }

        for (subcarrier, value) in frame.csi.iter().take(subcarrier_count).enumerate() {
            if let Some(row) = matrix.row_mut(subcarrier) {
                row.push(convert(*value, config));
            }
        }
    }

    Extraction {
        matrix,
        frame_count,
        subcarrier_count,
    }
}

fn convert(value: Complex64, config: &ExtractionConfig) -> CsiValue {
    let value = CsiValue::Complex(value);
    match config.metric {
        CsiMetric::Complex => value,
        CsiMetric::Amplitude if config.amplitude_db => {
            CsiValue::Real(20.0 * value.amplitude().log10())
        }
        CsiMetric::Amplitude => CsiValue::Real(value.amplitude()),
        CsiMetric::Phase => CsiValue::Real(value.phase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::CsiFrame;

    fn frame(csi: &[(f64, f64)]) -> CsiFrame {
        CsiFrame {
            timestamp_ns: 0,
            rssi: None,
            csi: csi.iter().map(|&(re, im)| Complex64::new(re, im)).collect(),
        }
    }

    fn capture(frames: Vec<CsiFrame>) -> DecodedCapture {
        DecodedCapture {
            source: None,
            frames,
        }
    }

    #[test]
    fn test_extract_transposes_frames() {
        let capture = capture(vec![
            frame(&[(1.0, 2.0), (5.0, 6.0)]),
            frame(&[(3.0, 4.0), (7.0, -1.0)]),
        ]);

        let extraction = extract(&capture, &ExtractionConfig::new());
        assert_eq!(extraction.frame_count, 2);
        assert_eq!(extraction.subcarrier_count, 2);
        assert_eq!(
            extraction.matrix.row(0).unwrap(),
            &[
                CsiValue::Complex(Complex64::new(1.0, 2.0)),
                CsiValue::Complex(Complex64::new(3.0, 4.0)),
            ]
        );
        assert_eq!(
            extraction.matrix.row(1).unwrap()[1],
            CsiValue::Complex(Complex64::new(7.0, -1.0))
        );
    }

    #[test]
    fn test_extract_empty_capture() {
        let extraction = extract(&capture(vec![]), &ExtractionConfig::new());
        assert_eq!(extraction.frame_count, 0);
        assert_eq!(extraction.subcarrier_count, 0);
        assert_eq!(extraction.matrix.rows(), 0);
    }

    #[test]
    fn test_amplitude_and_db() {
        let capture = capture(vec![frame(&[(3.0, 4.0), (0.0, 0.0)])]);

        let linear = ExtractionConfig::new().with_metric(CsiMetric::Amplitude);
        let extraction = extract(&capture, &linear);
        assert_eq!(extraction.matrix.row(0).unwrap(), &[CsiValue::Real(5.0)]);

        let db = linear.with_amplitude_db(true);
        let extraction = extract(&capture, &db);
        match extraction.matrix.row(0).unwrap()[0] {
            CsiValue::Real(v) => assert!((v - 20.0 * 5f64.log10()).abs() < 1e-9),
            other => panic!("expected real value, got {:?}", other),
        }
        assert_eq!(
            extraction.matrix.row(1).unwrap(),
            &[CsiValue::Real(f64::NEG_INFINITY)]
        );
    }

    #[test]
    fn test_phase() {
        let capture = capture(vec![frame(&[(0.0, 1.0)])]);
        let config = ExtractionConfig::new().with_metric(CsiMetric::Phase);
        let extraction = extract(&capture, &config);
        match extraction.matrix.row(0).unwrap()[0] {
            CsiValue::Real(v) => assert!((v - std::f64::consts::FRAC_PI_2).abs() < 1e-12),
            other => panic!("expected real value, got {:?}", other),
        }
    }

    #[test]
    fn test_short_frame_gives_ragged_rows() {
        let capture = capture(vec![
            frame(&[(1.0, 0.0), (2.0, 0.0)]),
            frame(&[(3.0, 0.0)]),
            frame(&[(4.0, 0.0), (5.0, 0.0), (6.0, 0.0)]),
        ]);

        let extraction = extract(&capture, &ExtractionConfig::new());
        assert_eq!(extraction.subcarrier_count, 2);
        assert_eq!(extraction.matrix.rows(), 2);
        assert_eq!(extraction.matrix.row(0).unwrap().len(), 3);
        assert_eq!(extraction.matrix.row(1).unwrap().len(), 2);
        assert!(!extraction.matrix.is_rectangular(3));
    }
}
