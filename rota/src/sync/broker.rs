use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::time::Duration;

use crate::core::axis::AxisOrder;
use crate::core::error::{Result, RotationError};
use crate::core::euler::EulerTriple;
use crate::core::orientation::Orientation;
use crate::interpolate::{Driver, InterpolationSession};
use crate::sync::derive::{Derivation, Update};
use crate::sync::frame::{Changes, Frame, FrameId, FrameView};
use crate::sync::link::AxisLinks;
use crate::sync::observer::{FrameUpdate, Observer, Source};

/// An interpolation session wired to the frames it watches and feeds.
#[derive(Debug, Clone)]
pub struct InterpolationBinding {
    pub start: FrameId,
    pub end: FrameId,
    pub target: FrameId,
    pub driver: Driver,
    pub session: InterpolationSession,
}

/// Outcome of one accepted event.
#[derive(Debug, Clone, PartialEq)]
pub struct PassReport {
    pub origin: FrameId,
    pub source: Source,
    /// Frames whose committed state changed, in propagation order.
    pub updated: Vec<FrameId>,
    /// Frame updates delivered to observers (one per frame, not per observer).
    pub notifications: usize,
}

impl PassReport {
    fn unchanged(origin: FrameId, source: Source) -> Self {
        Self {
            origin,
            source,
            updated: Vec::new(),
            notifications: 0,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.updated.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Start,
    End,
}

/// Everything a pass intends to change, held aside until the pass succeeds.
#[derive(Default)]
struct Staged {
    frames: BTreeMap<FrameId, Frame>,
    changes: BTreeMap<FrameId, Changes>,
    order: Vec<FrameId>,
    endpoints: Vec<(usize, Endpoint, Orientation)>,
}

impl Staged {
    fn record(&mut self, frame: Frame, delta: Changes) {
        let id = frame.id();
        self.frames.insert(id, frame);
        if !self.order.contains(&id) {
            self.order.push(id);
        }
        let merged = self.changes.entry(id).or_default();
        *merged = *merged | delta;
    }
}

/// Synchronous fan-out of orientation changes to every dependent frame.
///
/// Each event starts one pass tagged with its origin frame and [`Source`].
/// The pass stages every dependent update and commits them together, so a
/// failure anywhere leaves all frames untouched. A frame is written by at most
/// one derivation per pass and the origin is never written back, which bounds
/// a pass even when derivations or axis links form cycles.
pub struct SyncBroker {
    frames: Vec<Frame>,
    by_name: HashMap<String, FrameId>,
    links: AxisLinks,
    derivations: Vec<Box<dyn Derivation>>,
    bindings: Vec<InterpolationBinding>,
    observers: Vec<Box<dyn Observer>>,
    epsilon: f64,
}

impl SyncBroker {
    pub fn new(epsilon: f64) -> Self {
        Self {
            frames: Vec::new(),
            by_name: HashMap::new(),
            links: AxisLinks::default(),
            derivations: Vec::new(),
            bindings: Vec::new(),
            observers: Vec::new(),
            epsilon,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn add_frame(&mut self, name: impl Into<String>, axes: AxisOrder, read_only: bool) -> Result<FrameId> {
        let name = name.into();
        axes.check()?;
        if self.by_name.contains_key(&name) {
            return Err(RotationError::DuplicateFrame(name));
        }
        let id = FrameId(self.frames.len());
        tracing::debug!(target: "broker", %id, %name, %axes, read_only, "frame registered");
        self.by_name.insert(name.clone(), id);
        self.frames.push(Frame::new(id, name, axes, read_only));
        Ok(id)
    }

    pub fn frame_id(&self, name: &str) -> Result<FrameId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| RotationError::UnknownFrame(name.to_string()))
    }

    pub fn frame(&self, id: FrameId) -> Result<&Frame> {
        self.frames
            .get(id.0)
            .ok_or_else(|| RotationError::UnknownFrame(id.to_string()))
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    pub fn links(&self) -> &AxisLinks {
        &self.links
    }

    pub fn bindings(&self) -> &[InterpolationBinding] {
        &self.bindings
    }

    /// Subscribes two frames to each other's axis order.
    pub fn link_axes(&mut self, a: FrameId, b: FrameId) -> Result<()> {
        self.frame(a)?;
        self.frame(b)?;
        self.links.link(a, b);
        Ok(())
    }

    pub fn add_derivation(&mut self, derivation: impl Derivation + 'static) -> Result<()> {
        for &source in derivation.sources() {
            self.frame(source)?;
        }
        self.frame(derivation.target())?;
        tracing::debug!(
            target: "broker",
            name = derivation.name(),
            target_frame = %derivation.target(),
            "derivation registered"
        );
        self.derivations.push(Box::new(derivation));
        Ok(())
    }

    /// Binds a session to two watched frames. Endpoints start from their
    /// current orientations and follow every later change.
    pub fn add_interpolation(
        &mut self,
        start: FrameId,
        end: FrameId,
        target: FrameId,
        driver: Driver,
        period: Duration,
    ) -> Result<usize> {
        let session = InterpolationSession::new(
            self.frame(start)?.orientation(),
            self.frame(end)?.orientation(),
            period,
        );
        self.frame(target)?;
        self.bindings.push(InterpolationBinding {
            start,
            end,
            target,
            driver,
            session,
        });
        Ok(self.bindings.len() - 1)
    }

    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        tracing::debug!(target: "broker", observer = observer.name(), "observer subscribed");
        self.observers.push(observer);
    }

    /// A new orientation for `id`, e.g. from a manipulator drag.
    pub fn set_orientation(&mut self, id: FrameId, orientation: Orientation, source: Source) -> Result<PassReport> {
        let mut frame = self.writable(id, source)?.clone();
        let delta = frame.set_orientation(orientation, self.epsilon)?;
        self.run_pass(frame, delta, source)
    }

    /// New angles typed into the Euler fields of `id`.
    pub fn set_euler(&mut self, id: FrameId, euler: EulerTriple) -> Result<PassReport> {
        let source = Source::EulerField;
        let mut frame = self.writable(id, source)?.clone();
        let delta = frame.set_euler(euler, self.epsilon)?;
        self.run_pass(frame, delta, source)
    }

    /// A new axis order for `id`; linked frames follow.
    pub fn set_axis_order(&mut self, id: FrameId, axes: AxisOrder) -> Result<PassReport> {
        let source = Source::AxisField;
        let mut frame = self.writable(id, source)?.clone();
        let delta = frame.set_axes(axes, self.epsilon)?;
        self.run_pass(frame, delta, source)
    }

    /// Advances every clock-driven session by `dt` and pushes the result.
    ///
    /// With no clock-driven session this is a no-op.
    pub fn tick(&mut self, dt: Duration) -> Result<Vec<PassReport>> {
        self.drive(Driver::Clock, Source::Clock, |session| session.advance(dt))
    }

    /// Sets progress of every manually driven session.
    pub fn set_progress(&mut self, t: f64) -> Result<Vec<PassReport>> {
        self.drive(Driver::Manual, Source::Slider, |session| session.set_progress(t))
    }

    /// Steps each session of `driver` and runs one pass per binding.
    ///
    /// Passes are committed binding by binding. When one fails, that binding's
    /// progress is rolled back and the error is returned; bindings stepped
    /// before it keep their committed state.
    fn drive(
        &mut self,
        driver: Driver,
        source: Source,
        step: impl Fn(&mut InterpolationSession),
    ) -> Result<Vec<PassReport>> {
        let mut reports = Vec::new();
        for index in 0..self.bindings.len() {
            if self.bindings[index].driver != driver {
                continue;
            }
            let binding = &mut self.bindings[index];
            let previous = binding.session.clone();
            step(&mut binding.session);
            let target = binding.target;
            let value = binding.session.evaluate();
            tracing::trace!(
                target: "broker",
                binding = index,
                t = binding.session.progress(),
                "interpolation evaluated"
            );

            match self.push_interpolated(target, value, source) {
                Ok(report) => reports.push(report),
                Err(err) => {
                    self.bindings[index].session = previous;
                    return Err(err);
                }
            }
        }
        Ok(reports)
    }

    fn push_interpolated(&mut self, target: FrameId, value: Orientation, source: Source) -> Result<PassReport> {
        let mut frame = self.frame(target)?.clone();
        let delta = frame.set_orientation(value, self.epsilon)?;
        self.run_pass(frame, delta, source)
    }

    fn writable(&self, id: FrameId, source: Source) -> Result<&Frame> {
        let frame = self.frame(id)?;
        if source.is_external() && frame.is_read_only() {
            tracing::warn!(target: "broker", frame = frame.name(), ?source, "rejected input to read-only frame");
            return Err(RotationError::ReadOnlyFrame(frame.name().to_string()));
        }
        Ok(frame)
    }

    fn run_pass(&mut self, seed: Frame, delta: Changes, source: Source) -> Result<PassReport> {
        let origin = seed.id();
        if delta.is_empty() {
            tracing::trace!(target: "broker", frame = seed.name(), ?source, "event leaves frame unchanged");
            return Ok(PassReport::unchanged(origin, source));
        }

        let staged = self.propagate(seed, delta).inspect_err(|err| {
            tracing::warn!(target: "broker", %origin, ?source, %err, "propagation aborted, state retained");
        })?;
        Ok(self.commit(origin, source, staged))
    }

    fn propagate(&self, seed: Frame, delta: Changes) -> Result<Staged> {
        let origin = seed.id();
        let mut staged = Staged::default();
        staged.record(seed, delta);

        if delta.axes {
            self.propagate_axes(origin, &mut staged)?;
        }

        let mut written = BTreeSet::from([origin]);
        let mut remaining = self.reached_derivations(origin, &staged.order);
        loop {
            remaining.retain(|&index| !written.contains(&self.derivations[index].target()));
            if remaining.is_empty() {
                break;
            }

            // A derivation is ready once none of its sources still waits on
            // another derivation in this pass. A cycle has no ready entry and
            // is cut at the earliest registered one.
            let pending: BTreeSet<FrameId> = remaining
                .iter()
                .map(|&index| self.derivations[index].target())
                .collect();
            let ready = remaining.iter().position(|&index| {
                let derivation = &self.derivations[index];
                derivation
                    .sources()
                    .iter()
                    .all(|source| *source == derivation.target() || !pending.contains(source))
            });
            let derivation = &self.derivations[remaining.remove(ready.unwrap_or(0))];
            if ready.is_none() {
                tracing::trace!(target: "broker", derivation = derivation.name(), "derivation cycle cut");
            }

            let target = derivation.target();
            let (update, mut frame) = {
                let view = FrameView::new(&self.frames, &staged.frames);
                (derivation.derive(&view)?, view.get(target)?.clone())
            };
            let delta = match update {
                Update::Orientation(orientation) => frame.set_orientation(orientation, self.epsilon)?,
                Update::Euler(euler) => frame.set_euler(euler, self.epsilon)?,
            };
            written.insert(target);
            tracing::debug!(
                target: "broker",
                derivation = derivation.name(),
                frame = frame.name(),
                changed = !delta.is_empty(),
                "derivation applied"
            );
            if !delta.is_empty() {
                staged.record(frame, delta);
            }
        }

        for (index, binding) in self.bindings.iter().enumerate() {
            for (watched, endpoint) in [(binding.start, Endpoint::Start), (binding.end, Endpoint::End)] {
                let moved = staged.changes.get(&watched).is_some_and(|c| c.orientation);
                if let (true, Some(frame)) = (moved, staged.frames.get(&watched)) {
                    staged.endpoints.push((index, endpoint, frame.orientation()));
                }
            }
        }

        Ok(staged)
    }

    /// Indices of every derivation downstream of `changed`, in registration
    /// order. Derivations into the origin are left out.
    fn reached_derivations(&self, origin: FrameId, changed: &[FrameId]) -> Vec<usize> {
        let mut dirty: BTreeSet<FrameId> = changed.iter().copied().collect();
        let mut reached = vec![false; self.derivations.len()];
        let mut grew = true;
        while grew {
            grew = false;
            for (index, derivation) in self.derivations.iter().enumerate() {
                if reached[index]
                    || derivation.target() == origin
                    || !derivation.sources().iter().any(|source| dirty.contains(source))
                {
                    continue;
                }
                reached[index] = true;
                dirty.insert(derivation.target());
                grew = true;
            }
        }
        (0..self.derivations.len()).filter(|&index| reached[index]).collect()
    }

    /// Breadth-first walk of the link graph; each reachable frame adopts the
    /// origin's axis order once.
    fn propagate_axes(&self, origin: FrameId, staged: &mut Staged) -> Result<()> {
        let axes = staged.frames[&origin].axes();
        let mut reached = BTreeSet::from([origin]);
        let mut queue = VecDeque::from([origin]);
        while let Some(id) = queue.pop_front() {
            for &linked in self.links.linked(id) {
                if !reached.insert(linked) {
                    continue;
                }
                let mut frame = self.frame(linked)?.clone();
                let delta = frame.set_axes(axes, self.epsilon)?;
                if !delta.is_empty() {
                    staged.record(frame, delta);
                }
                queue.push_back(linked);
            }
        }
        Ok(())
    }

    fn commit(&mut self, origin: FrameId, source: Source, staged: Staged) -> PassReport {
        let Staged {
            frames,
            changes,
            order,
            endpoints,
        } = staged;

        for (id, frame) in frames {
            self.frames[id.0] = frame;
        }
        for (index, endpoint, orientation) in endpoints {
            let session = &mut self.bindings[index].session;
            match endpoint {
                Endpoint::Start => session.set_start(orientation),
                Endpoint::End => session.set_end(orientation),
            }
        }

        let mut notifications = 0;
        for &id in &order {
            let mut delta = changes.get(&id).copied().unwrap_or_default();
            if id == origin {
                delta = delta.without(source.echo());
            }
            if delta.is_empty() {
                continue;
            }
            let update = FrameUpdate::new(&self.frames[id.0], delta, source, origin);
            for observer in &mut self.observers {
                observer.frame_updated(&update);
            }
            notifications += 1;
        }

        tracing::debug!(
            target: "broker",
            %origin,
            ?source,
            updated = order.len(),
            notifications,
            "pass committed"
        );

        PassReport {
            origin,
            source,
            updated: order,
            notifications,
        }
    }
}
