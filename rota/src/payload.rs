use bytemuck::{Pod, Zeroable};

use crate::core::axis::AxisOrder;
use crate::core::error::{Result, RotationError};
use crate::core::euler::EulerTriple;
use crate::core::orientation::Orientation;
use crate::sync::frame::Frame;

/// Fixed 64-byte snapshot of a frame for transport collaborators.
///
/// Layout: `[w, x, y, z]`, three Euler angles in radians, the axis indices,
/// then zero padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FramePayload {
    pub orientation: [f64; 4],
    pub euler: [f64; 3],
    pub axes: AxisOrder,
    pub _padding: [u8; 5],
}

impl FramePayload {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn from_frame(frame: &Frame) -> Self {
        Self {
            orientation: frame.orientation().components(),
            euler: frame.euler().angles(),
            axes: frame.axes(),
            _padding: [0; 5],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bytemuck::try_pod_read_unaligned(bytes)
            .map_err(|err| RotationError::MalformedPayload(format!("{err:?} ({} bytes)", bytes.len())))
    }

    /// Validates and unpacks the payload. Raw bytes never went through the
    /// constructors, so every invariant is checked here.
    pub fn decode(&self) -> Result<(Orientation, EulerTriple, AxisOrder)> {
        self.axes.check()?;
        let orientation = Orientation::try_from(self.orientation)?;
        let euler = EulerTriple(self.euler);
        if !euler.is_finite() {
            return Err(RotationError::MalformedPayload(format!(
                "non-finite Euler angles {:?}",
                self.euler
            )));
        }
        Ok((orientation, euler, self.axes))
    }
}
