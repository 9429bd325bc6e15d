use rota::sync::observer::{FrameUpdate, Observer};

/// Stand-in for the 3D display and the numeric fields: logs every update it
/// would have shown.
#[derive(Debug, Default)]
pub struct LogDisplay {
    update_count: u64,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self { update_count: 0 }
    }
}

impl Observer for LogDisplay {
    fn name(&self) -> &str {
        "log-display"
    }

    fn frame_updated(&mut self, update: &FrameUpdate) {
        self.update_count += 1;
        let [w, x, y, z] = update.orientation.components();
        let [a, b, c] = update.euler.to_degrees();
        tracing::info!(
            target: "display",
            update = self.update_count,
            frame = %update.name,
            source = ?update.source,
            axes = %update.axes,
            "q = ({w:.4}, {x:.4}, {y:.4}, {z:.4})  euler = ({a:.2}°, {b:.2}°, {c:.2}°)"
        );
    }
}
