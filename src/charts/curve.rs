//! Line smoothing and axis fitting for the history chart.

/// Samples drawn per segment between two data points.
pub const SEGMENT_STEPS: usize = 8;

/// Smooths a polyline with a cardinal spline of the given tension. Points
/// must have increasing x. The curve passes through every input point; a
/// tension of 0 yields straight segments.
pub fn smooth(points: &[(f64, f64)], tension: f64) -> Vec<(f64, f64)> {
    if points.len() < 3 || tension == 0.0 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    // Outgoing and incoming control points for every data point.
    let controls: Vec<((f64, f64), (f64, f64))> = (0..=last)
        .map(|i| {
            let prev = points[i.saturating_sub(1)];
            let cur = points[i];
            let next = points[(i + 1).min(last)];
            let dx = (next.0 - prev.0) * tension / 2.0;
            let dy = (next.1 - prev.1) * tension / 2.0;
            ((cur.0 - dx, cur.1 - dy), (cur.0 + dx, cur.1 + dy))
        })
        .collect();

    let mut out = Vec::with_capacity(last * SEGMENT_STEPS + 1);
    out.push(points[0]);
    for i in 0..last {
        let p0 = points[i];
        let p1 = controls[i].1;
        let p2 = controls[i + 1].0;
        let p3 = points[i + 1];
        for step in 1..=SEGMENT_STEPS {
            let t = step as f64 / SEGMENT_STEPS as f64;
            out.push(bezier(p0, p1, p2, p3, t));
        }
    }
    out
}

fn bezier(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64), p3: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    (
        a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
        a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
    )
}

/// Y axis range for `values`. Without `begin_at_zero` the range hugs the
/// data with a small margin; it is never empty.
pub fn value_range(values: &[f64], begin_at_zero: bool) -> (f64, f64) {
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })
        .unwrap_or((0.0, 1.0));

    let (min, max) = if begin_at_zero {
        (min.min(0.0), max.max(0.0))
    } else {
        (min, max)
    };

    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.05
    } else if min != 0.0 {
        min.abs() * 0.01
    } else {
        1.0
    };

    let lower = if begin_at_zero && min >= 0.0 {
        min
    } else {
        min - pad
    };
    (lower, max + pad)
}
