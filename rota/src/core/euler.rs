use std::f64::consts::{PI, TAU};
use std::ops::Add;

use glam::{DMat3, DQuat};
use serde::{Deserialize, Serialize};

use crate::core::axis::AxisOrder;
use crate::core::error::Result;
use crate::core::orientation::Orientation;
use crate::core::tolerance::{GIMBAL_EPSILON, clamp_unit};

/// Three rotation angles in radians.
///
/// Meaningless on its own: it is always read together with the [`AxisOrder`]
/// of the frame it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerTriple(pub [f64; 3]);

impl EulerTriple {
    pub const ZERO: Self = Self([0.0; 3]);

    pub fn new(first: f64, second: f64, third: f64) -> Self {
        Self([first, second, third])
    }

    pub fn from_degrees(first: f64, second: f64, third: f64) -> Self {
        Self([first.to_radians(), second.to_radians(), third.to_radians()])
    }

    pub fn to_degrees(&self) -> [f64; 3] {
        self.0.map(f64::to_degrees)
    }

    pub fn angles(&self) -> [f64; 3] {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|angle| angle.is_finite())
    }

    /// Wraps every angle into `(-π, π]`.
    pub fn canonical(&self) -> Self {
        Self(self.0.map(wrap_angle))
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

/// Component-wise sum. See [`crate::compose::compose_euler_sum`] for why this
/// is not rotation composition.
impl Add for EulerTriple {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self([self.0[0] + rhs.0[0], self.0[1] + rhs.0[1], self.0[2] + rhs.0[2]])
    }
}

/// Wraps `angle` into `(-π, π]`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid maps +π onto -π; keep the closed end on the positive side.
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Converts between orientations and Euler triples for any Tait–Bryan axis
/// order.
///
/// The triple `(a, b, c)` under order `(i, j, k)` means the intrinsic sequence
/// `R = R_i(a) · R_j(b) · R_k(c)`: rotate about `i`, then about the new `j`,
/// then about the twice-rotated `k`.
pub struct EulerCodec;

impl EulerCodec {
    /// Extracts the angles of `orientation` along `order`.
    ///
    /// Output angles are canonical: first and third in `(-π, π]`, middle in
    /// `[-π/2, π/2]`. At gimbal lock the third angle is pinned to zero and the
    /// whole residual rotation is assigned to the first.
    pub fn to_euler(orientation: &Orientation, order: AxisOrder) -> Result<EulerTriple> {
        order.check()?;
        let [i, j, k] = order.indices().map(usize::from);
        let s = order.parity();
        let m = DMat3::from_quat(orientation.as_quat());
        let r = |row: usize, col: usize| m.col(col)[row];

        let sin_b = clamp_unit(s * r(i, k));
        let cos_b = r(i, i).hypot(r(i, j));
        let b = sin_b.atan2(cos_b);

        let (a, c) = if cos_b < GIMBAL_EPSILON {
            tracing::trace!(target: "codec", %order, "gimbal lock, pinning third angle");
            // With c = 0 the j-th column is R_i(a)·e_j.
            ((s * r(k, j)).atan2(r(j, j)), 0.0)
        } else {
            (
                (-s * r(j, k)).atan2(r(k, k)),
                (-s * r(i, j)).atan2(r(i, i)),
            )
        };

        Ok(EulerTriple::new(wrap_angle(a), b, wrap_angle(c)))
    }

    /// Composes the elementary rotations `R_i(a) · R_j(b) · R_k(c)`.
    pub fn to_quaternion(triple: &EulerTriple, order: AxisOrder) -> Result<Orientation> {
        order.check()?;
        let q = order
            .axes()
            .iter()
            .zip(triple.angles())
            .fold(DQuat::IDENTITY, |acc, (axis, angle)| {
                acc * DQuat::from_axis_angle(axis.unit(), angle)
            });
        Orientation::from_quat(q)
    }
}
