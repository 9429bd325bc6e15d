use std::collections::BTreeMap;
use std::fmt;
use std::ops::BitOr;

use crate::core::axis::AxisOrder;
use crate::core::error::{Result, RotationError};
use crate::core::euler::{EulerCodec, EulerTriple};
use crate::core::orientation::Orientation;

/// Stable handle of a frame inside one broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub(crate) usize);

impl FrameId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which representations of a frame moved during a propagation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Changes {
    pub orientation: bool,
    pub euler: bool,
    pub axes: bool,
}

impl Changes {
    pub const NONE: Self = Self {
        orientation: false,
        euler: false,
        axes: false,
    };

    pub fn is_empty(&self) -> bool {
        !(self.orientation || self.euler || self.axes)
    }

    /// Clears every flag set in `mask`.
    pub fn without(self, mask: Changes) -> Self {
        Self {
            orientation: self.orientation && !mask.orientation,
            euler: self.euler && !mask.euler,
            axes: self.axes && !mask.axes,
        }
    }
}

impl BitOr for Changes {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self {
            orientation: self.orientation || rhs.orientation,
            euler: self.euler || rhs.euler,
            axes: self.axes || rhs.axes,
        }
    }
}

/// A named slot holding one orientation and the axis order used to view it.
///
/// The Euler view is cached alongside the quaternion. When the frame is set
/// through its angles the entered triple is kept verbatim; orientation and
/// axis changes re-derive it through the codec.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    id: FrameId,
    name: String,
    orientation: Orientation,
    axes: AxisOrder,
    euler: EulerTriple,
    read_only: bool,
}

impl Frame {
    pub(crate) fn new(id: FrameId, name: String, axes: AxisOrder, read_only: bool) -> Self {
        Self {
            id,
            name,
            orientation: Orientation::IDENTITY,
            axes,
            euler: EulerTriple::ZERO,
            read_only,
        }
    }

    pub fn id(&self) -> FrameId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn axes(&self) -> AxisOrder {
        self.axes
    }

    pub fn euler(&self) -> EulerTriple {
        self.euler
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub(crate) fn set_orientation(&mut self, orientation: Orientation, epsilon: f64) -> Result<Changes> {
        if self.orientation.approx_eq(&orientation, epsilon) {
            return Ok(Changes::NONE);
        }
        let euler = EulerCodec::to_euler(&orientation, self.axes)?;
        let euler_changed = !euler.approx_eq(&self.euler, epsilon);
        self.orientation = orientation;
        self.euler = euler;
        Ok(Changes {
            orientation: true,
            euler: euler_changed,
            axes: false,
        })
    }

    pub(crate) fn set_euler(&mut self, euler: EulerTriple, epsilon: f64) -> Result<Changes> {
        if !euler.is_finite() {
            return Err(RotationError::degenerate(format!(
                "non-finite Euler angles {:?}",
                euler.angles()
            )));
        }
        let orientation = EulerCodec::to_quaternion(&euler, self.axes)?;
        let changes = Changes {
            orientation: !orientation.approx_eq(&self.orientation, epsilon),
            euler: !euler.approx_eq(&self.euler, epsilon),
            axes: false,
        };
        self.orientation = orientation;
        self.euler = euler;
        Ok(changes)
    }

    /// Adopts a new axis order and re-reads the Euler view from the current
    /// orientation. The orientation itself never moves.
    pub(crate) fn set_axes(&mut self, axes: AxisOrder, epsilon: f64) -> Result<Changes> {
        axes.check()?;
        if axes == self.axes {
            return Ok(Changes::NONE);
        }
        let euler = EulerCodec::to_euler(&self.orientation, axes)?;
        let euler_changed = !euler.approx_eq(&self.euler, epsilon);
        self.axes = axes;
        self.euler = euler;
        Ok(Changes {
            orientation: false,
            euler: euler_changed,
            axes: true,
        })
    }
}

/// Read access to frames during a pass: staged copies shadow committed state.
pub struct FrameView<'a> {
    committed: &'a [Frame],
    staged: &'a BTreeMap<FrameId, Frame>,
}

impl<'a> FrameView<'a> {
    pub(crate) fn new(committed: &'a [Frame], staged: &'a BTreeMap<FrameId, Frame>) -> Self {
        Self { committed, staged }
    }

    pub fn get(&self, id: FrameId) -> Result<&'a Frame> {
        self.staged
            .get(&id)
            .or_else(|| self.committed.get(id.0))
            .ok_or_else(|| RotationError::UnknownFrame(id.to_string()))
    }
}
