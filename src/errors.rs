//! Error Types
//!
//! The scene pass has no recoverable runtime failures. Everything in
//! [`PassError`] is a programming defect: the infallible entry points panic
//! with the error message, while the `try_*` / `validate` twins hand the same
//! value back so callers (and tests) can probe a configuration first.
//!
//! Benign empty work (no items, zero-area resolve rects, empty segments) is
//! never reported here; it is skipped silently.

use thiserror::Error;

/// Defects detected while configuring or executing a scene pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PassError {
    // ========================================================================
    // Execution state
    // ========================================================================
    /// A pass execution was started while another one is still active
    /// somewhere in the process. Scene passes are not reentrant.
    #[error(
        "Scene pass execution is not reentrant: another pass is already active in this process (depth: {depth})"
    )]
    RecursiveExecution {
        /// Depth observed when the second execution was requested.
        depth: u32,
    },

    // ========================================================================
    // Render targets
    // ========================================================================
    /// Bound color targets do not share the same dimensions.
    #[error("Color targets are of different size: slot {slot} is {width}x{height}, expected {expected_width}x{expected_height}")]
    ColorTargetSizeMismatch {
        slot: usize,
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    /// The depth target is narrower than the color target(s).
    #[error("Depth target is smaller than the color target(s): depth width {depth_width} < color width {color_width}")]
    DepthTargetTooSmall { depth_width: u32, color_width: u32 },

    /// A target handed to a light-weight exchange has no device allocation.
    #[error("Render target '{label}' is not resident on the device")]
    TargetNotResident { label: String },

    /// Color slot index outside `0..MAX_COLOR_TARGETS`.
    #[error("Invalid color target slot: {0}")]
    InvalidSlot(usize),

    // ========================================================================
    // Resources
    // ========================================================================
    /// The pass was given (or used with) an invalid resource layout.
    #[error("Resource layout is missing or invalid")]
    MissingResourceLayout,
}

/// Alias for `Result<T, PassError>`.
pub type Result<T> = std::result::Result<T, PassError>;
