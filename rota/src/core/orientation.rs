use glam::{DQuat, DVec3, DVec4};
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, RotationError};
use crate::core::tolerance::{DEGENERATE_NORM, NORM_DRIFT, clamp_unit};

/// A rotation in 3D space, stored as a unit quaternion.
///
/// The unit-norm invariant is restored after every mutation, so an
/// `Orientation` handed out by this crate always satisfies `|q| ≈ 1`.
/// Serialized as `[w, x, y, z]`; deserialization re-validates the components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct Orientation {
    q: DQuat,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Orientation {
    pub const IDENTITY: Self = Self { q: DQuat::IDENTITY };

    /// Builds an orientation from scalar-first components, normalizing them.
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Result<Self> {
        Self::from_quat(DQuat::from_xyzw(x, y, z, w))
    }

    pub fn from_quat(q: DQuat) -> Result<Self> {
        let mut orientation = Self { q };
        orientation.normalize()?;
        Ok(orientation)
    }

    /// Rotation of `angle` radians about `axis`. The axis need not be unit length.
    pub fn from_axis_angle(axis: DVec3, angle: f64) -> Result<Self> {
        let axis = axis
            .try_normalize()
            .ok_or_else(|| RotationError::degenerate("rotation axis has zero length"))?;
        Self::from_quat(DQuat::from_axis_angle(axis, angle))
    }

    /// Rescales to unit norm.
    ///
    /// Fails with `DegenerateInput` on non-finite components or a norm that is
    /// effectively zero; `self` is untouched in that case.
    pub fn normalize(&mut self) -> Result<()> {
        if !self.q.is_finite() {
            return Err(RotationError::degenerate(format!(
                "non-finite components {:?}",
                self.components()
            )));
        }
        // Scale by the largest component first so the length cannot overflow.
        let scale = DVec4::from(self.q).abs().max_element();
        if scale < DEGENERATE_NORM {
            return Err(RotationError::degenerate(format!("quaternion norm {scale:e} is zero")));
        }
        let scaled = self.q / scale;
        self.q = scaled / scaled.length();
        Ok(())
    }

    pub fn w(&self) -> f64 {
        self.q.w
    }

    pub fn x(&self) -> f64 {
        self.q.x
    }

    pub fn y(&self) -> f64 {
        self.q.y
    }

    pub fn z(&self) -> f64 {
        self.q.z
    }

    /// Components in scalar-first order `[w, x, y, z]`.
    pub fn components(&self) -> [f64; 4] {
        [self.q.w, self.q.x, self.q.y, self.q.z]
    }

    pub fn as_quat(&self) -> DQuat {
        self.q
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.q.dot(other.q)
    }

    /// The same rotation with every component negated.
    pub fn antipode(&self) -> Self {
        Self { q: -self.q }
    }

    pub fn inverse(&self) -> Self {
        Self { q: self.q.conjugate() }
    }

    /// Approximate equality on rotations.
    ///
    /// `q` and `-q` describe the same rotation, so the comparison succeeds if
    /// either sign matches component-wise within `epsilon`.
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        let same = DVec4::from(self.q - other.q).abs().max_element();
        let flipped = DVec4::from(self.q + other.q).abs().max_element();
        same.min(flipped) <= epsilon
    }

    /// Hamilton product `self ∘ other`: `other` is applied first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        Self::renormalized(self.q * other.q)
    }

    /// Rotation angle in `[0, π]` separating the two orientations along the
    /// shorter arc.
    pub fn angle_to(&self, other: &Self) -> f64 {
        2.0 * clamp_unit(self.dot(other).abs()).acos()
    }

    pub fn rotate(&self, v: DVec3) -> DVec3 {
        self.q * v
    }

    /// Wraps a product of unit quaternions, renormalizing only when the norm
    /// has drifted past `NORM_DRIFT`.
    pub(crate) fn renormalized(q: DQuat) -> Self {
        let norm = q.length();
        if (norm - 1.0).abs() > NORM_DRIFT && norm > DEGENERATE_NORM {
            Self { q: q / norm }
        } else {
            Self { q }
        }
    }
}

impl TryFrom<[f64; 4]> for Orientation {
    type Error = RotationError;

    fn try_from([w, x, y, z]: [f64; 4]) -> Result<Self> {
        Self::new(w, x, y, z)
    }
}

impl From<Orientation> for [f64; 4] {
    fn from(orientation: Orientation) -> Self {
        orientation.components()
    }
}
