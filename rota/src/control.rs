use std::sync::mpsc::{Receiver, Sender, channel};

use serde::{Deserialize, Serialize};

use crate::core::axis::AxisOrder;
use crate::core::orientation::Orientation;

/// An external input event, addressed to a frame by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Gizmo dragged to a new orientation.
    SetOrientation { frame: String, orientation: Orientation },
    /// Angles entered in degrees.
    SetEuler { frame: String, degrees: [f64; 3] },
    SetAxisOrder { frame: String, axes: AxisOrder },
    /// Raw slider position, mapped through the workbench's slider range.
    SetSlider(i64),
    /// Host time passing, in milliseconds.
    Elapse(u64),
    StartClock,
    StopClock,
}

/// Receiving end drained by the host loop; events are handled one at a time
/// in arrival order.
pub struct CommandQueue {
    receiver: Receiver<Command>,
}

#[derive(Clone)]
pub struct CommandSender {
    sender: Sender<Command>,
}

impl CommandQueue {
    pub fn new() -> (Self, CommandSender) {
        let (sender, receiver) = channel();
        (Self { receiver }, CommandSender { sender })
    }

    pub fn try_recv(&self) -> Option<Command> {
        self.receiver.try_recv().ok()
    }
}

impl CommandSender {
    pub fn send(&self, cmd: Command) {
        if self.sender.send(cmd).is_err() {
            tracing::warn!(target: "broker", "command dropped: queue closed");
        }
    }
}
