// Rotation state engine
pub mod core {
    pub mod axis;
    pub mod error;
    pub mod euler;
    pub mod orientation;
    pub mod tolerance;
}

pub mod compose;
pub mod interpolate;

pub mod sync {
    pub mod broker;
    pub mod derive;
    pub mod frame;
    pub mod link;
    pub mod observer;
}

pub mod clock;
pub mod config;
pub mod control;
pub mod payload;
pub mod workbench;

pub use crate::core::axis::{Axis, AxisOrder};
pub use crate::core::error::{Result, RotationError};
pub use crate::core::euler::{EulerCodec, EulerTriple};
pub use crate::core::orientation::Orientation;
pub use crate::sync::broker::{PassReport, SyncBroker};
pub use crate::workbench::Workbench;
