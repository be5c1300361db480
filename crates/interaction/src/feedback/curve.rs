//! Easing curves for time-based feedback.

use serde::{Deserialize, Serialize};

/// Maps normalized time `t ∈ [0, 1]` to an interpolation factor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EasingCurve {
    /// `f(t) = t`
    #[default]
    Linear,
    /// Quadratic, slow start.
    EaseIn,
    /// Quadratic, slow end.
    EaseOut,
    /// Smoothstep.
    EaseInOut,
    /// Piecewise-linear through `[t, value]` keys sorted by `t`.
    Keyframes {
        /// Curve keys.
        points: Vec<[f32; 2]>,
    },
}

impl EasingCurve {
    /// Evaluate at `t`, clamped to `[0, 1]`.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingCurve::Linear => t,
            EasingCurve::EaseIn => t * t,
            EasingCurve::EaseOut => t * (2.0 - t),
            EasingCurve::EaseInOut => t * t * (3.0 - 2.0 * t),
            EasingCurve::Keyframes { points } => evaluate_keys(points, t),
        }
    }
}

fn evaluate_keys(points: &[[f32; 2]], t: f32) -> f32 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return t;
    };
    if t <= first[0] {
        return first[1];
    }
    if t >= last[0] {
        return last[1];
    }
    for pair in points.windows(2) {
        let ([t0, v0], [t1, v1]) = (pair[0], pair[1]);
        if t >= t0 && t <= t1 {
            let span = t1 - t0;
            if span <= f32::EPSILON {
                return v1;
            }
            return v0 + (v1 - v0) * (t - t0) / span;
        }
    }
    last[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_curves_hit_endpoints() {
        for curve in [
            EasingCurve::Linear,
            EasingCurve::EaseIn,
            EasingCurve::EaseOut,
            EasingCurve::EaseInOut,
        ] {
            assert_eq!(curve.evaluate(0.0), 0.0, "{curve:?}");
            assert_eq!(curve.evaluate(1.0), 1.0, "{curve:?}");
            assert_eq!(curve.evaluate(2.0), 1.0, "{curve:?}");
        }
        assert!(EasingCurve::EaseIn.evaluate(0.5) < 0.5);
        assert!(EasingCurve::EaseOut.evaluate(0.5) > 0.5);
    }

    #[test]
    fn keyframes_interpolate_linearly() {
        let curve = EasingCurve::Keyframes {
            points: vec![[0.0, 0.0], [0.5, 0.8], [1.0, 1.0]],
        };
        assert!((curve.evaluate(0.25) - 0.4).abs() < 1e-6);
        assert!((curve.evaluate(0.75) - 0.9).abs() < 1e-6);
        assert_eq!(curve.evaluate(1.0), 1.0);

        let empty = EasingCurve::Keyframes { points: Vec::new() };
        assert_eq!(empty.evaluate(0.3), 0.3);
    }

    #[test]
    fn curves_deserialize_from_config() {
        #[derive(serde::Deserialize)]
        struct Holder {
            curve: EasingCurve,
        }
        let holder: Holder = serde_json::from_str(r#"{"curve":{"kind":"ease_out"}}"#).unwrap();
        assert_eq!(holder.curve, EasingCurve::EaseOut);
    }
}
