//! Stereo / Multi-Resolution Projection Contract
//!
//! Passes flagged with [`PassFlags::PROJECTION_PASS`](crate::renderer::graph::PassFlags::PROJECTION_PASS)
//! let the projection manager own viewport and scissor setup. All methods
//! take `&self` and a per-thread command list: they run concurrently from
//! recording workers.

use crate::renderer::core::command::CommandList;
use crate::renderer::core::rect::Viewport;

pub trait ProjectionManager: Send + Sync {
    /// Whether multi-resolution shading is enabled for the current frame.
    fn is_multi_res_enabled(&self) -> bool;

    /// Uploads projection constants for `viewport` into `cmd`.
    fn prepare_projection_parameters(&self, cmd: &mut dyn CommandList, viewport: &Viewport);

    /// Applies projection render state.
    ///
    /// Returns `true` when the manager has set viewports and scissors itself,
    /// in which case the pass must not set them again.
    fn set_rendering_state(
        &self,
        cmd: &mut dyn CommandList,
        viewport: &Viewport,
        use_projection_state: bool,
        require_projection_constants: bool,
    ) -> bool;

    /// Restores the state changed by [`set_rendering_state`](Self::set_rendering_state).
    fn restore_state(&self, cmd: &mut dyn CommandList);
}
