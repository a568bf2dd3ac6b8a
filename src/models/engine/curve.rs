//! Slider path evaluation.
//!
//! A slider is evaluated as one Bernstein polynomial over every control point (head included),
//! not as a chain of piecewise Bezier segments.

use crate::beatmap::{HitObject, ObjectParams, Point};

/// Segment count used when a renderer tessellates a slider body.
pub const SLIDER_TESSELLATION: usize = 50;

/// `C(n, k)` via the multiplicative formula, in `f64` so long curves cannot overflow.
/// Exact while the result fits the 53-bit mantissa.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0f64;
    for i in 1..=k {
        result = result * (n - k + i) as f64 / i as f64;
    }
    result
}

/// Point on the Bernstein curve defined by `points` at parameter `t` in `[0, 1]`.
pub fn evaluate(t: f32, points: &[Point]) -> (f32, f32) {
    let Some(n) = points.len().checked_sub(1) else {
        return (0.0, 0.0);
    };

    let t = t as f64;
    let mut x = 0.0f64;
    let mut y = 0.0f64;
    for (i, &(px, py)) in points.iter().enumerate() {
        let weight = binomial(n, i) * (1.0 - t).powi((n - i) as i32) * t.powi(i as i32);
        x += weight * px as f64;
        y += weight * py as f64;
    }
    (x as f32, y as f32)
}

/// Samples `segments + 1` evenly spaced points along the curve.
pub fn tessellate(points: &[Point], segments: usize) -> Vec<(f32, f32)> {
    if segments == 0 {
        return vec![evaluate(0.0, points)];
    }
    (0..=segments)
        .map(|i| evaluate(i as f32 / segments as f32, points))
        .collect()
}

/// Control points as seen by renderers: the object's own position first, then the curve.
/// `None` for objects without a curve.
pub fn render_points(object: &HitObject) -> Option<Vec<Point>> {
    match &object.params {
        ObjectParams::Curve(curve) => {
            let mut points = Vec::with_capacity(curve.control_points.len() + 1);
            points.push(object.position());
            points.extend_from_slice(&curve.control_points);
            Some(points)
        }
        ObjectParams::None => None,
    }
}

/// Current position of an object in beatmap space. Sliders follow their path at `slider_t`.
pub fn object_position(object: &HitObject, slider_t: f32) -> (f32, f32) {
    match render_points(object) {
        Some(points) => evaluate(slider_t, &points),
        None => (object.x as f32, object.y as f32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beatmap::{Curve, CurveType};

    fn pascal(n: usize, k: usize) -> u64 {
        if k == 0 || k == n {
            1
        } else {
            pascal(n - 1, k - 1) + pascal(n - 1, k)
        }
    }

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3
    }

    #[test]
    fn test_binomial_matches_pascal() {
        for n in 0..=18 {
            for k in 0..=n {
                assert_eq!(binomial(n, k), pascal(n, k) as f64, "C({n}, {k})");
            }
        }
        assert_eq!(binomial(3, 5), 0.0);
        let c = binomial(60, 30);
        assert!((c - 118_264_581_564_861_424.0).abs() / c < 1e-12);
    }

    #[test]
    fn test_endpoints() {
        let points = [(0, 0), (50, 100), (100, 0), (200, 40)];
        assert!(close(evaluate(0.0, &points), (0.0, 0.0)));
        assert!(close(evaluate(1.0, &points), (200.0, 40.0)));
    }

    #[test]
    fn test_quadratic_midpoint() {
        // B(0.5) = 0.25*P0 + 0.5*P1 + 0.25*P2
        let points = [(0, 0), (100, 200), (200, 0)];
        assert!(close(evaluate(0.5, &points), (100.0, 100.0)));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(evaluate(0.3, &[]), (0.0, 0.0));
        assert_eq!(evaluate(0.3, &[(7, 9)]), (7.0, 9.0));
    }

    #[test]
    fn test_long_curve_stays_finite() {
        // 150 points along a straight line: the curve stays on it.
        let points: Vec<Point> = (0..150).map(|i| (i * 2, 100)).collect();
        let mid = evaluate(0.5, &points);
        assert!(mid.0.is_finite() && mid.1.is_finite());
        assert!((mid.0 - 149.0).abs() < 1e-2);
        assert!((mid.1 - 100.0).abs() < 1e-3);
        assert!(close(evaluate(1.0, &points), (298.0, 100.0)));

        let many: Vec<Point> = (0..600).map(|i| (i % 640, (i * 7) % 480)).collect();
        for t in [0.0, 0.1, 0.5, 0.9, 1.0] {
            let (x, y) = evaluate(t, &many);
            assert!(x.is_finite() && y.is_finite(), "t = {t}");
        }
    }

    #[test]
    fn test_tessellate() {
        let points = [(0, 0), (100, 0)];
        let samples = tessellate(&points, 4);
        assert_eq!(samples.len(), 5);
        assert!(close(samples[1], (25.0, 0.0)));
        assert!(close(samples[4], (100.0, 0.0)));
        assert_eq!(tessellate(&points, 0).len(), 1);
    }

    #[test]
    fn test_render_points_prepend_head() {
        let slider = HitObject::slider(
            10,
            20,
            0,
            Curve {
                curve_type: CurveType::Linear,
                control_points: vec![(110, 20)],
                slides: 1,
                length: 100.0,
            },
        );
        assert_eq!(render_points(&slider), Some(vec![(10, 20), (110, 20)]));
        assert!(close(object_position(&slider, 0.5), (60.0, 20.0)));

        let circle = HitObject::circle(5, 6, 0);
        assert_eq!(render_points(&circle), None);
        assert_eq!(object_position(&circle, 0.7), (5.0, 6.0));
    }
}
