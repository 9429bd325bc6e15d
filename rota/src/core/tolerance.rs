//! Numeric thresholds shared by the rotation engine.

/// Component-wise tolerance used by approximate orientation equality.
pub const APPROX_EPSILON: f64 = 1e-6;

/// Norms below this are treated as zero; such quaternions carry no rotation.
pub const DEGENERATE_NORM: f64 = 1e-12;

/// Allowed drift of `|q|` from one before a renormalization is forced.
pub const NORM_DRIFT: f64 = 1e-9;

/// `cos` of the middle Euler angle below this is treated as gimbal lock.
pub const GIMBAL_EPSILON: f64 = 1e-7;

/// Interpolation angles below this collapse to the start orientation.
pub const SLERP_EPSILON: f64 = 1e-6;

/// Clamps a cosine into `[-1, 1]` before it reaches `acos`/`asin`.
///
/// Floating error can push a dot product of unit quaternions slightly out of
/// range. That is recovered here and never reported as a failure.
pub fn clamp_unit(value: f64) -> f64 {
    if value > 1.0 || value < -1.0 {
        tracing::trace!(target: "codec", value, "clamping out-of-domain cosine");
    }
    value.clamp(-1.0, 1.0)
}
