//! Error types for the walk core and the display backend.

/// Errors raised by the numeric core: shape and value violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WalkError {
    /// Returned when a matrix would have zero walks or zero steps.
    #[error("empty shape: {walks} walks x {steps} steps (both must be at least 1)")]
    EmptyShape {
        /// Number of walks (rows).
        walks: usize,
        /// Number of steps (columns).
        steps: usize,
    },

    /// Returned when a step matrix entry is not exactly -1 or +1.
    #[error("invalid step {value} at walk {walk}, step {step} (must be -1 or +1)")]
    InvalidStep {
        walk: usize,
        step: usize,
        value: i8,
    },

    /// Returned when rows passed to a matrix constructor differ in length.
    #[error("ragged rows: row {row} has {got} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Returned when a position matrix row does not start at the origin.
    #[error("walk {walk} starts at {value}, expected 0")]
    NonZeroOrigin { walk: usize, value: i64 },

    /// Returned when consecutive positions differ by something other than one.
    #[error("invalid increment {delta} at walk {walk}, step {step} (must be -1 or +1)")]
    InvalidIncrement {
        walk: usize,
        step: usize,
        delta: i64,
    },

    /// Returned when a histogram is requested over no samples.
    #[error("no samples to bin")]
    EmptySamples,

    /// Returned when a histogram is requested with zero bins.
    #[error("histogram needs at least one bin")]
    ZeroBins,

    /// Returned when a run configuration is rejected.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

/// Errors raised while putting a chart on screen.
///
/// Backend errors are carried as their messages.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DisplayError {
    #[error("event loop failed: {reason}")]
    EventLoop { reason: String },

    #[error("could not create window: {reason}")]
    Window { reason: String },

    #[error("could not create render surface: {reason}")]
    Surface { reason: String },

    #[error("could not create renderer: {reason}")]
    Renderer { reason: String },

    #[error("rendering failed: {reason}")]
    Render { reason: String },

    #[error("no render device for surface {dev_id}")]
    NoDevice { dev_id: usize },

    #[error("could not load font {path}: {reason}")]
    Font { path: String, reason: String },
}

impl From<winit::error::EventLoopError> for DisplayError {
    fn from(err: winit::error::EventLoopError) -> Self {
        Self::EventLoop {
            reason: err.to_string(),
        }
    }
}

impl From<winit::error::OsError> for DisplayError {
    fn from(err: winit::error::OsError) -> Self {
        Self::Window {
            reason: err.to_string(),
        }
    }
}
