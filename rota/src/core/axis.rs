use std::fmt;

use bytemuck::{Pod, Zeroable};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, RotationError};

/// One of the three principal axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }

    pub fn unit(self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }
}

/// The sequence of axes an Euler triple is decomposed along.
///
/// Only Tait–Bryan sequences are representable: all three axes are distinct.
/// The type is `Pod` so it can ride inside a raw frame payload; bytes from
/// such a payload have not passed through [`AxisOrder::new`], which is why
/// the codec calls [`AxisOrder::check`] before using an order.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
#[serde(try_from = "[u8; 3]", into = "[u8; 3]")]
pub struct AxisOrder([u8; 3]);

impl AxisOrder {
    pub const XYZ: Self = Self([0, 1, 2]);
    pub const XZY: Self = Self([0, 2, 1]);
    pub const YXZ: Self = Self([1, 0, 2]);
    pub const YZX: Self = Self([1, 2, 0]);
    pub const ZXY: Self = Self([2, 0, 1]);
    pub const ZYX: Self = Self([2, 1, 0]);

    pub const ALL: [Self; 6] = [
        Self::XYZ,
        Self::XZY,
        Self::YXZ,
        Self::YZX,
        Self::ZXY,
        Self::ZYX,
    ];

    pub fn new(a: u8, b: u8, c: u8) -> Result<Self> {
        let order = Self([a, b, c]);
        order.check()?;
        Ok(order)
    }

    /// Verifies the permutation invariant.
    pub fn check(&self) -> Result<()> {
        let mut seen = [false; 3];
        for &index in &self.0 {
            match seen.get_mut(index as usize) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(RotationError::InvalidAxisOrder { axes: self.0 }),
            }
        }
        Ok(())
    }

    pub fn indices(&self) -> [u8; 3] {
        self.0
    }

    /// Axes in application order. Callers must hold a checked order.
    pub fn axes(&self) -> [Axis; 3] {
        self.0.map(|index| Axis::from_index(index).unwrap_or(Axis::X))
    }

    /// `+1` when the sequence is a cyclic shift of XYZ, `-1` otherwise.
    pub fn parity(&self) -> f64 {
        let [i, j, _] = self.0;
        if (i + 1) % 3 == j { 1.0 } else { -1.0 }
    }
}

impl Default for AxisOrder {
    fn default() -> Self {
        Self::XYZ
    }
}

impl TryFrom<[u8; 3]> for AxisOrder {
    type Error = RotationError;

    fn try_from([a, b, c]: [u8; 3]) -> Result<Self> {
        Self::new(a, b, c)
    }
}

impl From<AxisOrder> for [u8; 3] {
    fn from(order: AxisOrder) -> Self {
        order.0
    }
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in self.0 {
            let name = match index {
                0 => 'X',
                1 => 'Y',
                2 => 'Z',
                _ => '?',
            };
            write!(f, "{name}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AxisOrder({self})")
    }
}
