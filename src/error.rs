use thiserror::Error;

/// Errors raised by the paint core.
///
/// None of these are fatal: the operation that produced one is aborted and the
/// editor keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaintError {
    /// A pixel access fell outside the surface
    #[error("pixel ({x}, {y}) is outside the {width}x{height} surface")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// A color string did not parse to three byte values
    #[error("invalid color {0:?}: expected #RRGGBB")]
    InvalidColor(String),

    /// The interaction state machine refused a transition
    #[error("cannot transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No usable font for the text tool
    #[error("font unavailable: {0}")]
    FontUnavailable(String),
}

/// Result type for paint operations
pub type PaintResult<T> = Result<T, PaintError>;
