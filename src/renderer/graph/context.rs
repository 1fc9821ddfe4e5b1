//! Pass Execution Contexts
//!
//! A [`PassContext`] is one unit of schedulable work produced by a scene
//! pass: either a **draw** of an item range or a **resolve** of a set of
//! screen regions. Both shapes share the same header (view, filters,
//! identifiers, group label) so that every sub-context of a single
//! `draw_render_items` call lands in the same debug / profiling group.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::renderer::core::rect::ScreenRect;
use crate::renderer::graph::render_list::{BatchFlags, RenderListId};
use crate::renderer::graph::scene_pass::PassId;
use crate::renderer::graph::stage::{RenderStage, ShaderTechnique};
use crate::renderer::graph::view::RenderView;

/// Payload of a pass context. Exactly one shape is ever populated.
#[derive(Debug, Clone, PartialEq)]
pub enum PassContextKind {
    /// Draw the compiled items `items` of the context's render list.
    Draw { items: Range<usize> },
    /// Copy the given regions from the HDR target into the scene target.
    Resolve { rects: SmallVec<[ScreenRect; 4]> },
}

/// One unit of recordable work belonging to a scene pass.
#[derive(Clone)]
pub struct PassContext {
    pub kind: PassContextKind,
    /// Scene pass that produced the context.
    pub pass: PassId,
    /// Render view the items belong to.
    pub view: Arc<dyn RenderView>,

    pub technique: ShaderTechnique,
    pub include_filter: BatchFlags,
    pub exclude_filter: BatchFlags,
    pub stage: RenderStage,
    /// Index of the pass within its stage.
    pub stage_pass: u32,

    /// Draw with the nearest-range viewport.
    pub render_nearest: bool,
    pub render_list: RenderListId,
    /// Pseudo-list statistics are recorded under.
    pub record_list: RenderListId,

    pub group_label: Arc<str>,
    /// Monotonic within one pass execution.
    pub group_index: u32,
    pub profiler_section: Option<u32>,
}

impl PassContext {
    #[inline]
    #[must_use]
    pub fn is_draw(&self) -> bool {
        matches!(self.kind, PassContextKind::Draw { .. })
    }

    #[inline]
    #[must_use]
    pub fn is_resolve(&self) -> bool {
        matches!(self.kind, PassContextKind::Resolve { .. })
    }

    /// Item range of a draw context.
    #[must_use]
    pub fn items(&self) -> Option<Range<usize>> {
        match &self.kind {
            PassContextKind::Draw { items } => Some(items.clone()),
            PassContextKind::Resolve { .. } => None,
        }
    }

    /// Resolve regions of a resolve context.
    #[must_use]
    pub fn resolve_rects(&self) -> Option<&[ScreenRect]> {
        match &self.kind {
            PassContextKind::Resolve { rects } => Some(rects),
            PassContextKind::Draw { .. } => None,
        }
    }

    /// Copies the header into a new context with a different payload.
    #[must_use]
    pub(crate) fn with_kind(&self, kind: PassContextKind) -> Self {
        Self {
            kind,
            pass: self.pass,
            view: Arc::clone(&self.view),
            technique: self.technique,
            include_filter: self.include_filter,
            exclude_filter: self.exclude_filter,
            stage: self.stage,
            stage_pass: self.stage_pass,
            render_nearest: self.render_nearest,
            render_list: self.render_list,
            record_list: self.record_list,
            group_label: Arc::clone(&self.group_label),
            group_index: self.group_index,
            profiler_section: self.profiler_section,
        }
    }
}

impl fmt::Debug for PassContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassContext")
            .field("kind", &self.kind)
            .field("pass", &self.pass)
            .field("render_list", &self.render_list)
            .field("render_nearest", &self.render_nearest)
            .field("group_label", &self.group_label)
            .field("group_index", &self.group_index)
            .finish_non_exhaustive()
    }
}
