use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::axis::AxisOrder;
use crate::core::orientation::Orientation;
use crate::core::tolerance::APPROX_EPSILON;
use crate::interpolate::{Driver, SliderMapping};

/// Scene description: frames, how they depend on each other, and timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    /// Tolerance below which an incoming value counts as unchanged.
    pub epsilon: f64,
    pub tick_interval_ms: u64,
    /// Time for one full start-to-end sweep of clock-driven interpolation.
    pub period_ms: u64,
    pub slider: SliderMapping,
    pub autostart_clock: bool,
    pub frames: Vec<FrameSpec>,
    pub links: Vec<(String, String)>,
    pub derivations: Vec<DerivationSpec>,
    pub interpolations: Vec<InterpolationSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    pub name: String,
    #[serde(default)]
    pub axes: AxisOrder,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub initial: Option<Orientation>,
}

impl FrameSpec {
    pub fn new(name: &str, axes: AxisOrder, read_only: bool) -> Self {
        Self {
            name: name.to_string(),
            axes,
            read_only,
            initial: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DerivationSpec {
    Mirror { source: String, target: String },
    Product { first: String, second: String, target: String },
    EulerSum { first: String, second: String, target: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolationSpec {
    pub start: String,
    pub end: String,
    pub target: String,
    pub driver: Driver,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        let link = |a: &str, b: &str| (a.to_string(), b.to_string());
        Self {
            epsilon: APPROX_EPSILON,
            tick_interval_ms: 100,
            period_ms: 2000,
            slider: SliderMapping::default(),
            autostart_clock: true,
            frames: vec![
                FrameSpec::new("frame 1", AxisOrder::XYZ, false),
                FrameSpec::new("frame 1 - different axis", AxisOrder::ZYX, false),
                FrameSpec::new("frame 2", AxisOrder::XYZ, false),
                FrameSpec::new("frame 1+2", AxisOrder::XYZ, true),
                FrameSpec::new("frame 1*2", AxisOrder::XYZ, true),
                FrameSpec::new("frame slerp", AxisOrder::XYZ, true),
                FrameSpec::new("interpolated", AxisOrder::XYZ, true),
            ],
            links: vec![
                link("frame 1", "frame 2"),
                link("frame 1", "frame 1+2"),
                link("frame 1", "frame 1*2"),
            ],
            derivations: vec![
                DerivationSpec::Mirror {
                    source: "frame 1".into(),
                    target: "frame 1 - different axis".into(),
                },
                DerivationSpec::EulerSum {
                    first: "frame 1".into(),
                    second: "frame 2".into(),
                    target: "frame 1+2".into(),
                },
                DerivationSpec::Product {
                    first: "frame 1".into(),
                    second: "frame 2".into(),
                    target: "frame 1*2".into(),
                },
            ],
            interpolations: vec![
                InterpolationSpec {
                    start: "frame 1".into(),
                    end: "frame 2".into(),
                    target: "frame slerp".into(),
                    driver: Driver::Manual,
                },
                InterpolationSpec {
                    start: "frame 1".into(),
                    end: "frame 2".into(),
                    target: "interpolated".into(),
                    driver: Driver::Clock,
                },
            ],
        }
    }
}

impl WorkbenchConfig {
    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text).context("parsing workbench config")
    }

    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("serializing workbench config")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_ron(&text).with_context(|| format!("in {}", path.display()))
    }
}
