//! Render-item batch partitioning.
//!
//! Turns one clamped `[start, end)` request into the ordered contexts that
//! have to be recorded for it:
//!
//! | List                       | Output                                   |
//! |----------------------------|------------------------------------------|
//! | opaque                     | `draw(start..end)`                       |
//! | transparent, no resolve    | `draw(start..end)`                       |
//! | transparent, `Static`      | `resolve(viewport)`, `draw(start..end)`  |
//! | transparent, `Segmented`   | per non-empty segment: `[resolve(rects)]`, `draw(segment)` |
//!
//! Emission order is the recording order. Later transparent items may sample
//! the result of an earlier partial resolve, so it must survive buffering.

use smallvec::{SmallVec, smallvec};

use crate::renderer::core::rect::ScreenRect;
use crate::renderer::graph::context::{PassContext, PassContextKind};
use crate::renderer::graph::debug::{DebugOverlay, ResolveStats, record_resolve};
use crate::renderer::graph::view::RenderView;
use crate::renderer::settings::{ResolveDebug, ResolveMode};

pub(crate) type Partition = SmallVec<[PassContext; 4]>;

/// Statistics / overlay sinks fed for every emitted resolve.
pub(crate) struct ResolveHooks<'a> {
    pub level: ResolveDebug,
    pub stats: Option<&'a ResolveStats>,
    pub overlay: Option<&'a dyn DebugOverlay>,
}

impl ResolveHooks<'_> {
    fn record(&self, template: &PassContext, rects: &[ScreenRect], ordinal: usize) {
        record_resolve(self.level, self.stats, self.overlay, template.record_list, rects, ordinal);
    }
}

/// Partitions `template` (a draw context over the clamped item range).
pub(crate) fn partition_render_items(
    template: PassContext,
    view: &dyn RenderView,
    mode: ResolveMode,
    hooks: &ResolveHooks<'_>,
) -> Partition {
    if template.render_list.is_transparent() {
        partition_transparent(template, view, mode, hooks)
    } else {
        smallvec![template]
    }
}

fn partition_transparent(
    template: PassContext,
    view: &dyn RenderView,
    mode: ResolveMode,
    hooks: &ResolveHooks<'_>,
) -> Partition {
    let list = template.render_list;

    // Segments and the resolve requirement are produced by the view's job.
    view.wait_for_transparent_segments();

    if !view.has_resolve_for_list(list) {
        return smallvec![template];
    }

    match mode {
        ResolveMode::Static => {
            let rects: SmallVec<[ScreenRect; 4]> = smallvec![view.viewport().screen_rect()];
            hooks.record(&template, &rects, 0);

            let resolve = template.with_kind(PassContextKind::Resolve { rects });
            smallvec![resolve, template]
        }
        ResolveMode::Segmented => {
            let mut contexts = Partition::new();
            let mut ordinal = 0;

            for segment in view.transparent_segments(list) {
                if segment.is_empty() {
                    continue;
                }

                if segment.needs_resolve() {
                    hooks.record(&template, &segment.resolve_rects, ordinal);
                    ordinal += 1;
                    contexts.push(template.with_kind(PassContextKind::Resolve {
                        rects: segment.resolve_rects.clone(),
                    }));
                }

                contexts.push(template.with_kind(PassContextKind::Draw {
                    items: segment.items.clone(),
                }));
            }

            contexts
        }
    }
}
