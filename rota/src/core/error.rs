use thiserror::Error;

/// Failures of the rotation engine.
///
/// None of these are fatal. A rejected mutation leaves every frame exactly as
/// it was before the event arrived.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RotationError {
    /// Zero-norm or non-finite quaternion components.
    #[error("degenerate orientation input: {reason}")]
    DegenerateInput { reason: String },

    /// The axis triple is not a permutation of {0, 1, 2}.
    #[error("invalid axis order {axes:?}: expected a permutation of [0, 1, 2]")]
    InvalidAxisOrder { axes: [u8; 3] },

    #[error("unknown frame `{0}`")]
    UnknownFrame(String),

    #[error("frame `{0}` is already registered")]
    DuplicateFrame(String),

    /// The frame is fed by a derivation or interpolation and takes no external input.
    #[error("frame `{0}` is read only")]
    ReadOnlyFrame(String),

    #[error("malformed frame payload: {0}")]
    MalformedPayload(String),
}

impl RotationError {
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = RotationError> = std::result::Result<T, E>;
