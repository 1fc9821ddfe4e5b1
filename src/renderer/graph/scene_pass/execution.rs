//! Pass execution: the recursion guard, `draw_render_items`, and deferred
//! replay.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::errors::{PassError, Result};
use crate::renderer::graph::context::{PassContext, PassContextKind};
use crate::renderer::graph::render_list::{BatchFlags, RenderListId};
use crate::renderer::graph::view::RenderView;
use crate::renderer::settings::NoDrawMode;

use super::SceneRenderPass;
use super::partition::{ResolveHooks, partition_render_items};

/// Active scene pass executions in the process; always 0 or 1.
static EXECUTION_DEPTH: AtomicU32 = AtomicU32::new(0);

/// Token of an active pass execution.
///
/// Obtained from [`SceneRenderPass::begin_execution`]; dropping it (or
/// calling [`end_execution`](Self::end_execution)) ends the execution.
/// Holding it borrows the pass mutably, so the pass configuration is frozen
/// for the whole execution.
pub struct ExecutionGuard<'a> {
    pass: &'a mut SceneRenderPass,
}

impl SceneRenderPass {
    /// Starts an execution, or reports that another scene pass execution is
    /// active anywhere in the process.
    pub fn try_begin_execution(&mut self) -> Result<ExecutionGuard<'_>> {
        EXECUTION_DEPTH
            .compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|depth| PassError::RecursiveExecution { depth })?;

        self.num_groups = 0;

        if let Some(scheduler) = &self.scheduler
            && scheduler.is_active()
        {
            scheduler.add_pass(self.id);
        }

        log::debug!("SceneRenderPass '{}' [{}]: begin execution", self.label, self.stage.name());
        Ok(ExecutionGuard { pass: self })
    }

    /// Starts an execution.
    ///
    /// # Panics
    ///
    /// Panics if another scene pass execution is active in the process.
    pub fn begin_execution(&mut self) -> ExecutionGuard<'_> {
        match self.try_begin_execution() {
            Ok(guard) => guard,
            Err(err) => panic!("{err}"),
        }
    }

    /// Whether a scene pass execution is active in the process.
    #[must_use]
    pub fn is_execution_active() -> bool {
        EXECUTION_DEPTH.load(Ordering::Acquire) != 0
    }

    /// Replays every buffered context, in insertion order, against its view.
    ///
    /// Contexts are consumed: a second call without new buffered work is a
    /// no-op.
    pub fn execute(&mut self) {
        let mut contexts = std::mem::take(&mut self.contexts);
        log::debug!(
            "SceneRenderPass '{}': replaying {} buffered context(s)",
            self.label,
            contexts.len()
        );

        for context in &contexts {
            context.view.draw_compiled_render_items(self, context);
        }

        // Keep the allocation for the next frame.
        contexts.clear();
        self.contexts = contexts;
    }
}

impl ExecutionGuard<'_> {
    /// The pass being executed.
    #[inline]
    #[must_use]
    pub fn pass(&self) -> &SceneRenderPass {
        self.pass
    }

    /// Ends the execution. Equivalent to dropping the guard.
    pub fn end_execution(self) {}

    /// Records the items `[start, end)` of `list`.
    ///
    /// Out-of-range requests are clamped to the list; empty work, filtered
    /// lists and the strictest no-draw level are silent no-ops. Produced
    /// contexts are buffered when the pass scheduler is active and drawn
    /// immediately otherwise.
    pub fn draw_render_items(&mut self, view: &Arc<dyn RenderView>, list: RenderListId, start: usize, end: usize) {
        let pass = &mut *self.pass;
        let settings = pass.settings;

        if settings.no_draw == NoDrawMode::SkipRecording {
            return;
        }

        let nearest = list.is_nearest();
        let nearest_pass = pass.flags.contains(super::PassFlags::RENDER_NEAREST);
        if nearest && settings.no_draw_near && nearest_pass {
            log::trace!("SceneRenderPass '{}': nearest list {list:?} disabled", pass.label);
            return;
        }

        if !view.has_render_items(list, pass.include_filter | BatchFlags::COMPILED_OBJECT) {
            log::trace!("SceneRenderPass '{}': no items in {list:?}", pass.label);
            return;
        }

        let end = end.min(view.render_item_count(list));
        let start = start.min(end);
        if start >= end {
            return;
        }

        let template = pass.make_context(view, list, start, end, nearest && nearest_pass);
        let hooks = ResolveHooks {
            level: settings.resolve_debug,
            stats: pass.resolve_stats.as_deref(),
            overlay: pass.overlay.as_deref(),
        };
        let contexts = partition_render_items(template, view.as_ref(), settings.resolve_mode, &hooks);

        if pass.scheduler_active() {
            log::trace!(
                "SceneRenderPass '{}': buffered {} context(s) for {list:?}",
                pass.label,
                contexts.len()
            );
            pass.contexts.extend(contexts);
            return;
        }

        if settings.no_draw.submits() {
            for context in &contexts {
                view.draw_compiled_render_items(pass, context);
            }
        }
    }
}

impl Drop for ExecutionGuard<'_> {
    fn drop(&mut self) {
        EXECUTION_DEPTH.store(0, Ordering::Release);
        log::debug!(
            "SceneRenderPass '{}': end execution ({} group(s))",
            self.pass.label,
            self.pass.num_groups
        );
    }
}

impl SceneRenderPass {
    /// Builds the draw context template of one `draw_render_items` call and
    /// claims its group index.
    fn make_context(
        &mut self,
        view: &Arc<dyn RenderView>,
        list: RenderListId,
        start: usize,
        end: usize,
        render_nearest: bool,
    ) -> PassContext {
        let record_list = view.recording_list(list);
        let group_label: Arc<str> = format!(
            "{}{} ({})",
            if self.include_filter.contains(BatchFlags::Z) { "Z " } else { "" },
            self.label,
            record_list.name()
        )
        .into();

        let group_index = self.num_groups;
        self.num_groups += 1;

        let profiler_section = self.profiler.as_ref().map(|p| p.insert_section(&group_label));

        PassContext {
            kind: PassContextKind::Draw { items: start..end },
            pass: self.id,
            view: Arc::clone(view),
            technique: self.technique,
            include_filter: self.include_filter,
            exclude_filter: self.exclude_filter,
            stage: self.stage,
            stage_pass: self.stage_pass,
            render_nearest,
            render_list: list,
            record_list,
            group_label,
            group_index,
            profiler_section,
        }
    }
}
