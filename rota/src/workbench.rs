use std::time::Duration;

use crate::clock::Ticker;
use crate::config::{DerivationSpec, WorkbenchConfig};
use crate::control::{Command, CommandQueue};
use crate::core::error::Result;
use crate::core::euler::EulerTriple;
use crate::interpolate::SliderMapping;
use crate::sync::broker::{PassReport, SyncBroker};
use crate::sync::derive::{EulerSum, Mirror, Product};
use crate::sync::observer::{Observer, Source};

/// A broker wired from a [`WorkbenchConfig`], plus the clock and slider that
/// drive its interpolations.
pub struct Workbench {
    broker: SyncBroker,
    ticker: Ticker,
    slider: SliderMapping,
}

impl Workbench {
    pub fn from_config(config: &WorkbenchConfig) -> Result<Self> {
        let mut broker = SyncBroker::new(config.epsilon);
        for spec in &config.frames {
            broker.add_frame(spec.name.as_str(), spec.axes, spec.read_only)?;
        }
        for (a, b) in &config.links {
            broker.link_axes(broker.frame_id(a)?, broker.frame_id(b)?)?;
        }
        for spec in &config.derivations {
            match spec {
                DerivationSpec::Mirror { source, target } => {
                    let derivation = Mirror::new(broker.frame_id(source)?, broker.frame_id(target)?);
                    broker.add_derivation(derivation)?;
                }
                DerivationSpec::Product { first, second, target } => {
                    let derivation = Product::new(
                        broker.frame_id(first)?,
                        broker.frame_id(second)?,
                        broker.frame_id(target)?,
                    );
                    broker.add_derivation(derivation)?;
                }
                DerivationSpec::EulerSum { first, second, target } => {
                    let derivation = EulerSum::new(
                        broker.frame_id(first)?,
                        broker.frame_id(second)?,
                        broker.frame_id(target)?,
                    );
                    broker.add_derivation(derivation)?;
                }
            }
        }
        let period = Duration::from_millis(config.period_ms);
        for spec in &config.interpolations {
            broker.add_interpolation(
                broker.frame_id(&spec.start)?,
                broker.frame_id(&spec.end)?,
                broker.frame_id(&spec.target)?,
                spec.driver,
                period,
            )?;
        }

        // Initial orientations go through ordinary passes so derived frames
        // and interpolation endpoints start consistent.
        for spec in &config.frames {
            if let Some(initial) = spec.initial {
                let id = broker.frame_id(&spec.name)?;
                if broker.frame(id)?.is_read_only() {
                    tracing::warn!(target: "broker", frame = %spec.name, "ignoring initial value of read-only frame");
                    continue;
                }
                broker.set_orientation(id, initial, Source::Manipulator)?;
            }
        }

        let mut ticker = Ticker::new(Duration::from_millis(config.tick_interval_ms));
        if config.autostart_clock {
            ticker.start();
        }

        Ok(Self {
            broker,
            ticker,
            slider: config.slider,
        })
    }

    pub fn broker(&self) -> &SyncBroker {
        &self.broker
    }

    pub fn broker_mut(&mut self) -> &mut SyncBroker {
        &mut self.broker
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.broker.subscribe(observer);
    }

    /// Feeds host time to the clock and runs one tick per elapsed interval.
    pub fn elapse(&mut self, delta: Duration) -> Result<Vec<PassReport>> {
        let ticks = self.ticker.advance(delta);
        let interval = self.ticker.interval();
        let mut reports = Vec::new();
        for _ in 0..ticks {
            reports.extend(self.broker.tick(interval)?);
        }
        Ok(reports)
    }

    /// Applies one input event. A rejected event leaves every frame as it was.
    pub fn apply(&mut self, command: Command) -> Result<Vec<PassReport>> {
        tracing::debug!(target: "broker", ?command, "applying command");
        match command {
            Command::SetOrientation { frame, orientation } => {
                let id = self.broker.frame_id(&frame)?;
                Ok(vec![self.broker.set_orientation(id, orientation, Source::Manipulator)?])
            }
            Command::SetEuler { frame, degrees } => {
                let id = self.broker.frame_id(&frame)?;
                let [a, b, c] = degrees;
                Ok(vec![self.broker.set_euler(id, EulerTriple::from_degrees(a, b, c))?])
            }
            Command::SetAxisOrder { frame, axes } => {
                let id = self.broker.frame_id(&frame)?;
                Ok(vec![self.broker.set_axis_order(id, axes)?])
            }
            Command::SetSlider(position) => self.broker.set_progress(self.slider.progress(position)),
            Command::Elapse(ms) => self.elapse(Duration::from_millis(ms)),
            Command::StartClock => {
                self.ticker.start();
                Ok(Vec::new())
            }
            Command::StopClock => {
                self.ticker.stop();
                Ok(Vec::new())
            }
        }
    }

    /// Drains every pending command. Rejected commands are logged and skipped.
    pub fn drain(&mut self, queue: &CommandQueue) -> Vec<PassReport> {
        let mut reports = Vec::new();
        while let Some(command) = queue.try_recv() {
            match self.apply(command) {
                Ok(done) => reports.extend(done),
                Err(err) => tracing::warn!(target: "broker", %err, "command rejected"),
            }
        }
        reports
    }
}
