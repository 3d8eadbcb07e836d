//! Precision-recall point emission and AUC accumulation
//!
//! Records are walked from the most permissive threshold towards the most
//! strict one, so recall never increases along a program's curve. Each
//! step may emit interpolated points and returns the area it adds.
//!
//! Every program's curve is framed by two synthetic points:
//! - a start point at recall 1.0 using the overall positive rate
//! - an end point at recall 0.0 repeating the last observed precision

mod accumulator;

pub use accumulator::ProgramAccumulator;

use crate::config::CurveParams;
use crate::models::{Counts, PrPoint};
use std::io;

/// Interpolated points closer than this fraction of a step to the
/// observed point are dropped.
const STEP_TOLERANCE: f64 = 1e-9;

/// Destination for emitted points, in emission order
pub trait PointSink {
    fn write_point(&mut self, program: &str, point: &PrPoint) -> io::Result<()>;
}

impl PointSink for Vec<(String, PrPoint)> {
    fn write_point(&mut self, program: &str, point: &PrPoint) -> io::Result<()> {
        self.push((program.to_string(), *point));
        Ok(())
    }
}

/// Emit the point(s) for `current` and return the AUC they add.
///
/// `previous` is the last point of the same program, or `None` for the
/// synthetic start point. Three shapes are handled:
/// - `None`: start point at recall 1.0, adds nothing
/// - `current` empty: end point at recall 0.0, closes the curve with a
///   triangle under the previous point
/// - otherwise: observed point, preceded by interpolated points when the
///   previous point had more true positives
pub fn emit_point<S: PointSink + ?Sized>(
    params: &CurveParams,
    program: &str,
    current: Counts,
    previous: Option<Counts>,
    sink: &mut S,
) -> io::Result<f64> {
    let Some(previous) = previous else {
        sink.write_point(program, &PrPoint::synthetic(1.0, current.precision()))?;
        return Ok(0.0);
    };

    if current.is_empty() {
        if previous.tp == 0 {
            return Ok(0.0);
        }
        let last_recall = params.recall(previous.tp as f64);
        let last_precision = previous.precision();
        sink.write_point(program, &PrPoint::synthetic(0.0, last_precision))?;
        return Ok(0.5 * last_recall * last_precision);
    }

    let observed = PrPoint::observed(params.recall(current.tp as f64), current.precision());
    let area = if previous.tp > current.tp {
        interpolate(params, program, current, previous, &observed, sink)?
    } else {
        0.0
    };
    sink.write_point(program, &observed)?;
    Ok(area)
}

/// Walk from `previous` down to `observed` in fixed recall steps.
///
/// False positives are assumed to change linearly with true positives
/// between the two thresholds. Each step offset is computed directly
/// from its index so no error accumulates across steps.
fn interpolate<S: PointSink + ?Sized>(
    params: &CurveParams,
    program: &str,
    current: Counts,
    previous: Counts,
    observed: &PrPoint,
    sink: &mut S,
) -> io::Result<f64> {
    let gap = (previous.tp - current.tp) as f64;
    let rate = (previous.fp as f64 - current.fp as f64) / gap;
    let delta = params.tp_step();
    let tp = current.tp as f64;
    let fp = current.fp as f64;

    let mut last = PrPoint::synthetic(params.recall(previous.tp as f64), previous.precision());
    let mut area = 0.0;

    for k in 1u64.. {
        let x = gap - k as f64 * delta;
        if x <= delta * STEP_TOLERANCE {
            break;
        }
        let precision = (tp + x) / (tp + x + fp + rate * x);
        let point = PrPoint::synthetic(params.recall(tp + x), precision);
        sink.write_point(program, &point)?;
        area += trapezoid(&last, &point);
        last = point;
    }

    Ok(area + trapezoid(&last, observed))
}

/// Area between two points, `upper` having the larger recall
fn trapezoid(upper: &PrPoint, lower: &PrPoint) -> f64 {
    0.5 * (upper.precision + lower.precision) * (upper.recall - lower.recall)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(
        params: &CurveParams,
        current: Counts,
        previous: Option<Counts>,
    ) -> (f64, Vec<PrPoint>) {
        let mut sink: Vec<(String, PrPoint)> = Vec::new();
        let area = emit_point(params, "p", current, previous, &mut sink).expect("emit");
        (area, sink.into_iter().map(|(_, p)| p).collect())
    }

    #[test]
    fn test_start_point() {
        let params = CurveParams::new(2, 4).unwrap();
        let (area, points) = emit(&params, params.accept_all(), None);
        assert_eq!(area, 0.0);
        assert_eq!(points, vec![PrPoint::synthetic(1.0, 0.5)]);
    }

    #[test]
    fn test_end_point_closes_with_triangle() {
        let params = CurveParams::new(4, 10).unwrap();
        let (area, points) = emit(&params, Counts::default(), Some(Counts::new(2, 2)));
        // previous recall 0.5, precision 0.5
        assert_eq!(points, vec![PrPoint::synthetic(0.0, 0.5)]);
        assert!((area - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_end_point_suppressed_at_zero_recall() {
        let params = CurveParams::new(4, 10).unwrap();
        let (area, points) = emit(&params, Counts::default(), Some(Counts::new(0, 3)));
        assert_eq!(area, 0.0);
        assert!(points.is_empty());

        let (area, points) = emit(&params, Counts::default(), Some(Counts::default()));
        assert_eq!(area, 0.0);
        assert!(points.is_empty());
    }

    #[test]
    fn test_no_interpolation_when_recall_grows() {
        let params = CurveParams::new(2, 4).unwrap();
        let (area, points) = emit(&params, Counts::new(2, 0), Some(Counts::new(1, 0)));
        assert_eq!(area, 0.0);
        assert_eq!(points, vec![PrPoint::observed(1.0, 1.0)]);
    }

    #[test]
    fn test_equal_tp_emits_only_observed() {
        let params = CurveParams::new(5, 5).unwrap();
        let (area, points) = emit(&params, Counts::new(5, 0), Some(Counts::new(5, 0)));
        assert_eq!(area, 0.0);
        assert_eq!(points, vec![PrPoint::observed(1.0, 1.0)]);
    }

    #[test]
    fn test_interpolation_steps() {
        // ntruth 100: one step is exactly one true positive
        let params = CurveParams::new(100, 200).unwrap();
        let (area, points) = emit(&params, Counts::new(50, 0), Some(Counts::new(53, 3)));

        assert_eq!(points.len(), 3);
        assert!(points[..2].iter().all(|p| !p.is_final));
        assert!(points[2].is_final);

        assert!((points[0].recall - 0.52).abs() < 1e-12);
        assert!((points[0].precision - 52.0 / 54.0).abs() < 1e-12);
        assert!((points[1].recall - 0.51).abs() < 1e-12);
        assert!((points[1].precision - 51.0 / 52.0).abs() < 1e-12);
        assert_eq!(points[2], PrPoint::observed(0.5, 1.0));

        let expected = 0.5 * (53.0 / 56.0 + 52.0 / 54.0) * 0.01
            + 0.5 * (52.0 / 54.0 + 51.0 / 52.0) * 0.01
            + 0.5 * (51.0 / 52.0 + 1.0) * 0.01;
        assert!((area - expected).abs() < 1e-12);
    }

    #[test]
    fn test_coarse_step() {
        // step 0.25 of ntruth 2 is half a true positive
        let params = CurveParams::with_step(2, 4, 0.25).unwrap();
        let (area, points) = emit(&params, Counts::new(1, 0), Some(Counts::new(2, 2)));

        assert_eq!(points.len(), 2);
        assert!(!points[0].is_final);
        assert!((points[0].recall - 0.75).abs() < 1e-12);
        assert!((points[0].precision - 0.6).abs() < 1e-12);
        assert_eq!(points[1], PrPoint::observed(0.5, 1.0));

        let expected = 0.5 * (0.5 + 0.6) * 0.25 + 0.5 * (0.6 + 1.0) * 0.25;
        assert!((area - expected).abs() < 1e-12);
    }

    #[test]
    fn test_step_spanning_whole_gap_skips_interpolation() {
        // step 0.5 of ntruth 2 lands exactly on the observed point
        let params = CurveParams::with_step(2, 4, 0.5).unwrap();
        let (area, points) = emit(&params, Counts::new(1, 0), Some(Counts::new(2, 2)));

        assert_eq!(points, vec![PrPoint::observed(0.5, 1.0)]);
        assert!((area - 0.5 * (0.5 + 1.0) * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_interpolated_recall_strictly_decreases() {
        let params = CurveParams::new(37, 120).unwrap();
        let previous = Counts::new(30, 40);
        let (_, points) = emit(&params, Counts::new(4, 3), Some(previous));

        let mut last_recall = params.recall(previous.tp as f64);
        for point in &points {
            assert!(point.recall < last_recall);
            assert!((0.0..=1.0).contains(&point.precision));
            last_recall = point.recall;
        }
        // 26 true positives apart in steps of 0.37
        let expected_steps = (26.0_f64 / 0.37).ceil() as usize - 1;
        assert_eq!(points.len(), expected_steps + 1);
    }

    #[test]
    fn test_interpolation_area_positive_with_fp_decrease() {
        let params = CurveParams::new(10, 30).unwrap();
        let (area, points) = emit(&params, Counts::new(5, 1), Some(Counts::new(10, 20)));
        assert!(area > 0.0);
        // ceil(5 / 0.1) - 1 interpolated points + the observed one
        assert_eq!(points.len(), 50);
    }

    #[test]
    fn test_interpolation_with_fp_growth() {
        // fp can be larger at the stricter threshold in malformed but
        // tolerated input; precision must stay within bounds
        let params = CurveParams::new(10, 30).unwrap();
        let (area, points) = emit(&params, Counts::new(2, 6), Some(Counts::new(4, 2)));
        assert!(area > 0.0);
        for point in &points {
            assert!((0.0..=1.0).contains(&point.precision));
        }
    }
}
