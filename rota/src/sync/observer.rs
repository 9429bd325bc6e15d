use std::cell::RefCell;
use std::rc::Rc;

use crate::core::axis::AxisOrder;
use crate::core::euler::EulerTriple;
use crate::core::orientation::Orientation;
use crate::sync::frame::{Changes, Frame, FrameId};

/// Where a propagation pass came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// A 3D manipulator dragged the frame's gizmo.
    Manipulator,
    /// Angles typed into the frame's Euler fields.
    EulerField,
    /// A new axis order picked for the frame.
    AxisField,
    /// A clock tick advanced an interpolation.
    Clock,
    /// The manual progress slider moved.
    Slider,
}

impl Source {
    /// Representations of the origin frame that already show the new value
    /// and must not be sent it again.
    pub fn echo(self) -> Changes {
        match self {
            Source::Manipulator => Changes {
                orientation: true,
                ..Changes::NONE
            },
            Source::EulerField => Changes {
                euler: true,
                ..Changes::NONE
            },
            Source::AxisField => Changes {
                axes: true,
                ..Changes::NONE
            },
            Source::Clock | Source::Slider => Changes::NONE,
        }
    }

    /// External sources arrive through collaborators and may not touch
    /// read-only frames.
    pub fn is_external(self) -> bool {
        matches!(self, Source::Manipulator | Source::EulerField | Source::AxisField)
    }
}

/// A committed frame snapshot, delivered once per frame per pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUpdate {
    pub frame: FrameId,
    pub name: String,
    pub orientation: Orientation,
    pub axes: AxisOrder,
    pub euler: EulerTriple,
    pub changes: Changes,
    pub source: Source,
    pub origin: FrameId,
}

impl FrameUpdate {
    pub(crate) fn new(frame: &Frame, changes: Changes, source: Source, origin: FrameId) -> Self {
        Self {
            frame: frame.id(),
            name: frame.name().to_string(),
            orientation: frame.orientation(),
            axes: frame.axes(),
            euler: frame.euler(),
            changes,
            source,
            origin,
        }
    }
}

/// Output boundary: display and numeric-field collaborators implement this
/// and are handed to the broker, which owns no global display state.
pub trait Observer {
    fn name(&self) -> &str;
    fn frame_updated(&mut self, update: &FrameUpdate);
}

/// Keeps every update it sees. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct UpdateLog {
    updates: Rc<RefCell<Vec<FrameUpdate>>>,
}

impl UpdateLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.updates.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.borrow().is_empty()
    }

    pub fn snapshot(&self) -> Vec<FrameUpdate> {
        self.updates.borrow().clone()
    }

    /// Updates delivered for `frame`, oldest first.
    pub fn for_frame(&self, frame: FrameId) -> Vec<FrameUpdate> {
        self.updates
            .borrow()
            .iter()
            .filter(|update| update.frame == frame)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.updates.borrow_mut().clear();
    }
}

impl Observer for UpdateLog {
    fn name(&self) -> &str {
        "update-log"
    }

    fn frame_updated(&mut self, update: &FrameUpdate) {
        self.updates.borrow_mut().push(update.clone());
    }
}
