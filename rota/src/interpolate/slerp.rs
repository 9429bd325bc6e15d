use crate::core::orientation::Orientation;
use crate::core::tolerance::{SLERP_EPSILON, clamp_unit};

/// Spherical linear interpolation along the shortest arc.
///
/// `t` is clamped into `[0, 1]`. When the endpoints lie in opposite
/// hemispheres `end` is negated first, so the path never takes the long way
/// round. Nearly identical endpoints return `start` unchanged.
pub fn slerp(start: &Orientation, end: &Orientation, t: f64) -> Orientation {
    let t = t.clamp(0.0, 1.0);

    let mut end_q = end.as_quat();
    let mut dot = start.dot(end);
    if dot < 0.0 {
        end_q = -end_q;
        dot = -dot;
    }

    let theta = clamp_unit(dot).acos();
    if theta < SLERP_EPSILON {
        return *start;
    }

    let sin_theta = theta.sin();
    let w_start = ((1.0 - t) * theta).sin() / sin_theta;
    let w_end = (t * theta).sin() / sin_theta;

    Orientation::renormalized(start.as_quat() * w_start + end_q * w_end)
}
