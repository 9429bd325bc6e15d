use std::collections::BTreeMap;

use crate::sync::frame::FrameId;

/// Undirected subscriptions between frames that share an axis order.
///
/// Linking is symmetric: whichever side changes its order notifies the other.
/// Cycles are allowed; the broker visits each frame once per pass.
#[derive(Debug, Clone, Default)]
pub struct AxisLinks {
    neighbours: BTreeMap<FrameId, Vec<FrameId>>,
}

impl AxisLinks {
    pub fn link(&mut self, a: FrameId, b: FrameId) {
        if a == b {
            return;
        }
        Self::insert(&mut self.neighbours, a, b);
        Self::insert(&mut self.neighbours, b, a);
    }

    pub fn unlink(&mut self, a: FrameId, b: FrameId) {
        if let Some(list) = self.neighbours.get_mut(&a) {
            list.retain(|&id| id != b);
        }
        if let Some(list) = self.neighbours.get_mut(&b) {
            list.retain(|&id| id != a);
        }
    }

    pub fn linked(&self, frame: FrameId) -> &[FrameId] {
        self.neighbours.get(&frame).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn are_linked(&self, a: FrameId, b: FrameId) -> bool {
        self.linked(a).contains(&b)
    }

    fn insert(map: &mut BTreeMap<FrameId, Vec<FrameId>>, from: FrameId, to: FrameId) {
        let list = map.entry(from).or_default();
        if !list.contains(&to) {
            list.push(to);
        }
    }
}
