//! Render Pass Scheduler
//!
//! When a scheduler is active, scene passes do not draw while they are being
//! built. They register themselves at `begin_execution` and buffer their
//! contexts; the frame later replays them in the scheduler's order via
//! [`SceneRenderPass::execute`](crate::renderer::graph::SceneRenderPass::execute).

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::renderer::graph::scene_pass::PassId;

/// Contract between scene passes and the frame-level pass scheduler.
pub trait PassScheduler: Send + Sync {
    /// Whether passes should buffer their contexts instead of drawing.
    fn is_active(&self) -> bool;

    /// Hands the scheduling slot of a pass to the scheduler. The pass keeps
    /// ownership of its contexts.
    fn add_pass(&self, pass: PassId);
}

/// Default scheduler: records registered passes in order.
///
/// ```rust
/// use myth_scene_pass::renderer::graph::{PassScheduler, RenderPassScheduler};
///
/// let scheduler = RenderPassScheduler::new();
/// assert!(!scheduler.is_active());
/// scheduler.set_active(true);
/// assert!(scheduler.is_active());
/// assert!(scheduler.take_passes().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct RenderPassScheduler {
    active: AtomicBool,
    passes: Mutex<Vec<PassId>>,
}

impl RenderPassScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    /// Number of passes registered since the last [`take_passes`](Self::take_passes).
    #[must_use]
    pub fn pass_count(&self) -> usize {
        self.passes.lock().len()
    }

    /// Drains the registered passes in registration order.
    #[must_use]
    pub fn take_passes(&self) -> Vec<PassId> {
        std::mem::take(&mut *self.passes.lock())
    }
}

impl PassScheduler for RenderPassScheduler {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    fn add_pass(&self, pass: PassId) {
        log::debug!("RenderPassScheduler: registered {pass:?}");
        self.passes.lock().push(pass);
    }
}
