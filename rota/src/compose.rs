use crate::core::euler::EulerTriple;
use crate::core::orientation::Orientation;

/// Rotation composition: apply `first`, then `second`.
///
/// Not commutative. The result is `second ∘ first`, i.e. the second argument
/// is applied second.
pub fn compose_orientations(first: &Orientation, second: &Orientation) -> Orientation {
    second.compose(first)
}

/// Component-wise sum of two Euler triples.
///
/// **Approximation.** Adding Euler angles is not rotation composition. It only
/// agrees with [`compose_orientations`] when both rotations are small enough
/// to linearize, or when all non-zero angles act about the same single axis.
/// Frames labelled as an Euler sum display exactly this quantity.
pub fn compose_euler_sum(first: &EulerTriple, second: &EulerTriple) -> EulerTriple {
    *first + *second
}
