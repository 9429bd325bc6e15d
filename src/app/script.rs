use std::path::Path;

use anyhow::{Context, Result};
use rota::control::Command;
use rota::{AxisOrder, Orientation};

pub fn load(path: &Path) -> Result<Vec<Command>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    ron::from_str(&text).with_context(|| format!("parsing script {}", path.display()))
}

/// Drags frame 1 a quarter turn about Z, types angles into frame 2, switches
/// the shared axis order, then scrubs the slider.
pub fn demo() -> Result<Vec<Command>> {
    let quarter_z = Orientation::new(
        std::f64::consts::FRAC_1_SQRT_2,
        0.0,
        0.0,
        std::f64::consts::FRAC_1_SQRT_2,
    )
    .context("building demo orientation")?;

    Ok(vec![
        Command::SetOrientation {
            frame: "frame 1".into(),
            orientation: quarter_z,
        },
        Command::SetEuler {
            frame: "frame 2".into(),
            degrees: [30.0, 0.0, 0.0],
        },
        Command::Elapse(300),
        Command::SetAxisOrder {
            frame: "frame 2".into(),
            axes: AxisOrder::ZYX,
        },
        Command::SetSlider(250),
        Command::SetSlider(500),
        Command::StopClock,
        Command::Elapse(500),
        Command::StartClock,
    ])
}
