//! Render View Contract
//!
//! A render view owns the compiled draw items of one viewpoint, bucketed by
//! [`RenderListId`]. The scene pass only partitions index ranges of those
//! buckets; drawing a context is delegated back to the view.
//!
//! # Transparent segments
//!
//! For transparent lists that sample the scene color, the view runs an
//! asynchronous job that splits the sorted items into [`TransparentSegment`]s:
//! contiguous item ranges, each preceded by the screen regions that must be
//! resolved before it is drawn. The pass blocks on
//! [`RenderView::wait_for_transparent_segments`] before reading them.
//! [`SegmentFence`] is a ready-made rendezvous for implementers.

use std::ops::Range;

use parking_lot::{Condvar, Mutex};
use smallvec::SmallVec;

use crate::renderer::core::rect::{RenderViewport, ScreenRect};
use crate::renderer::graph::context::PassContext;
use crate::renderer::graph::render_list::{BatchFlags, RenderListId};
use crate::renderer::graph::scene_pass::SceneRenderPass;

/// A contiguous range of transparent items and the regions to resolve
/// before drawing it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransparentSegment {
    pub items: Range<usize>,
    pub resolve_rects: SmallVec<[ScreenRect; 4]>,
}

impl TransparentSegment {
    #[must_use]
    pub fn new(items: Range<usize>, resolve_rects: &[ScreenRect]) -> Self {
        Self {
            items,
            resolve_rects: SmallVec::from_slice(resolve_rects),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn needs_resolve(&self) -> bool {
        !self.resolve_rects.is_empty()
    }
}

/// Compiled-item storage of one viewpoint, as consumed by scene passes.
///
/// Implementations must be shareable across recording threads: contexts are
/// replayed against the view from worker threads.
pub trait RenderView: Send + Sync {
    /// Whether `list` holds any item matching `filter`.
    fn has_render_items(&self, list: RenderListId, filter: BatchFlags) -> bool;

    /// Total number of compiled items in `list`.
    fn render_item_count(&self, list: RenderListId) -> usize;

    /// Pseudo-list that statistics and labels for `list` are recorded under.
    fn recording_list(&self, list: RenderListId) -> RenderListId {
        list
    }

    /// Draws one context synchronously.
    ///
    /// For draw contexts the view records the item range between
    /// [`SceneRenderPass::begin_render_pass`] and
    /// [`SceneRenderPass::end_render_pass`]; for resolve contexts it calls
    /// [`SceneRenderPass::resolve_pass`].
    fn draw_compiled_render_items(&self, pass: &SceneRenderPass, context: &PassContext);

    /// Blocks until the transparent segment job has finished.
    fn wait_for_transparent_segments(&self);

    /// Whether any item of `list` needs the scene color resolved first.
    fn has_resolve_for_list(&self, list: RenderListId) -> bool;

    /// Ordered transparent segments of `list`. Only valid after
    /// [`wait_for_transparent_segments`](Self::wait_for_transparent_segments).
    fn transparent_segments(&self, list: RenderListId) -> &[TransparentSegment];

    /// Current viewport of the view.
    fn viewport(&self) -> RenderViewport;
}

// ─── SegmentFence ─────────────────────────────────────────────────────────────

/// One-shot blocking rendezvous for the transparent segment job.
///
/// ```rust
/// use std::sync::Arc;
/// use myth_scene_pass::renderer::graph::SegmentFence;
///
/// let fence = Arc::new(SegmentFence::pending());
/// let worker = {
///     let fence = Arc::clone(&fence);
///     std::thread::spawn(move || fence.signal())
/// };
/// fence.wait();
/// assert!(fence.is_signaled());
/// worker.join().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct SegmentFence {
    done: Mutex<bool>,
    cond: Condvar,
}

impl SegmentFence {
    /// A fence whose job has not finished yet.
    #[must_use]
    pub fn pending() -> Self {
        Self::default()
    }

    /// A fence that never blocks.
    #[must_use]
    pub fn signaled() -> Self {
        Self {
            done: Mutex::new(true),
            cond: Condvar::new(),
        }
    }

    /// Marks the job as finished and wakes every waiter.
    pub fn signal(&self) {
        let mut done = self.done.lock();
        *done = true;
        self.cond.notify_all();
    }

    /// Re-arms the fence for the next frame's job.
    pub fn reset(&self) {
        *self.done.lock() = false;
    }

    #[must_use]
    pub fn is_signaled(&self) -> bool {
        *self.done.lock()
    }

    /// Blocks the calling thread until [`signal`](Self::signal) has been called.
    pub fn wait(&self) {
        let mut done = self.done.lock();
        while !*done {
            self.cond.wait(&mut done);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_signaled_fence_does_not_block() {
        let fence = SegmentFence::signaled();
        fence.wait();
        assert!(fence.is_signaled());
    }

    #[test]
    fn test_fence_wakes_waiter() {
        let fence = Arc::new(SegmentFence::pending());
        let waiter = {
            let fence = Arc::clone(&fence);
            std::thread::spawn(move || {
                fence.wait();
                fence.is_signaled()
            })
        };
        fence.signal();
        assert!(waiter.join().unwrap());

        fence.reset();
        assert!(!fence.is_signaled());
    }

    #[test]
    fn test_segment_emptiness() {
        let s = TransparentSegment::new(5..5, &[]);
        assert!(s.is_empty());
        assert!(!s.needs_resolve());
    }
}
