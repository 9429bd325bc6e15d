use crate::compose::{compose_euler_sum, compose_orientations};
use crate::core::error::Result;
use crate::core::euler::EulerTriple;
use crate::core::orientation::Orientation;
use crate::sync::frame::{FrameId, FrameView};

/// The value a derivation writes into its target frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Update {
    /// Replace the orientation; the target re-derives its Euler view.
    Orientation(Orientation),
    /// Replace the Euler view verbatim; the target re-derives its orientation.
    Euler(EulerTriple),
}

/// A frame whose value is computed from other frames.
///
/// The broker runs a derivation whenever one of its sources changes during a
/// pass, after every upstream derivation of that pass, at most once per pass,
/// and never into the frame that started it.
pub trait Derivation {
    fn name(&self) -> &str;
    fn sources(&self) -> &[FrameId];
    fn target(&self) -> FrameId;
    fn derive(&self, frames: &FrameView<'_>) -> Result<Update>;
}

/// Copies the source orientation; the target views it through its own axes.
pub struct Mirror {
    sources: [FrameId; 1],
    target: FrameId,
}

impl Mirror {
    pub fn new(source: FrameId, target: FrameId) -> Self {
        Self {
            sources: [source],
            target,
        }
    }
}

impl Derivation for Mirror {
    fn name(&self) -> &str {
        "mirror"
    }

    fn sources(&self) -> &[FrameId] {
        &self.sources
    }

    fn target(&self) -> FrameId {
        self.target
    }

    fn derive(&self, frames: &FrameView<'_>) -> Result<Update> {
        Ok(Update::Orientation(frames.get(self.sources[0])?.orientation()))
    }
}

/// True rotation composition: `first` applied, then `second`.
pub struct Product {
    sources: [FrameId; 2],
    target: FrameId,
}

impl Product {
    pub fn new(first: FrameId, second: FrameId, target: FrameId) -> Self {
        Self {
            sources: [first, second],
            target,
        }
    }
}

impl Derivation for Product {
    fn name(&self) -> &str {
        "product"
    }

    fn sources(&self) -> &[FrameId] {
        &self.sources
    }

    fn target(&self) -> FrameId {
        self.target
    }

    fn derive(&self, frames: &FrameView<'_>) -> Result<Update> {
        let first = frames.get(self.sources[0])?.orientation();
        let second = frames.get(self.sources[1])?.orientation();
        Ok(Update::Orientation(compose_orientations(&first, &second)))
    }
}

/// Sum of the two source Euler views, written as the target's Euler view.
///
/// Approximate outside the small-angle regime; see
/// [`compose_euler_sum`].
pub struct EulerSum {
    sources: [FrameId; 2],
    target: FrameId,
}

impl EulerSum {
    pub fn new(first: FrameId, second: FrameId, target: FrameId) -> Self {
        Self {
            sources: [first, second],
            target,
        }
    }
}

impl Derivation for EulerSum {
    fn name(&self) -> &str {
        "euler-sum"
    }

    fn sources(&self) -> &[FrameId] {
        &self.sources
    }

    fn target(&self) -> FrameId {
        self.target
    }

    fn derive(&self, frames: &FrameView<'_>) -> Result<Update> {
        let first = frames.get(self.sources[0])?.euler();
        let second = frames.get(self.sources[1])?.euler();
        Ok(Update::Euler(compose_euler_sum(&first, &second)))
    }
}
