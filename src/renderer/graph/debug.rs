//! Resolve Statistics, Overlay & Profiling Hooks
//!
//! Pure side effects of pass building: nothing here feeds back into
//! partitioning or drawing.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::renderer::core::rect::ScreenRect;
use crate::renderer::graph::render_list::RenderListId;
use crate::renderer::settings::ResolveDebug;

const OVERLAY_ALPHA: u8 = 64;

const fn rgba(r: u8, g: u8, b: u8) -> [u8; 4] {
    [r, g, b, OVERLAY_ALPHA]
}

/// Overlay colors, indexed by resolve ordinal (wrapping).
pub const RESOLVE_OVERLAY_COLORS: [[u8; 4]; 56] = [
    rgba(255, 0, 0),
    rgba(0, 255, 0),
    rgba(0, 0, 255),
    rgba(255, 255, 0),
    rgba(255, 0, 255),
    rgba(0, 255, 255),
    rgba(128, 0, 0),
    rgba(0, 128, 0),
    rgba(0, 0, 128),
    rgba(128, 128, 0),
    rgba(128, 0, 128),
    rgba(0, 128, 128),
    rgba(192, 192, 192),
    rgba(128, 128, 128),
    rgba(153, 153, 255),
    rgba(153, 51, 102),
    rgba(255, 255, 204),
    rgba(204, 255, 255),
    rgba(102, 0, 102),
    rgba(255, 128, 128),
    rgba(0, 102, 204),
    rgba(204, 204, 255),
    rgba(0, 0, 128),
    rgba(255, 0, 255),
    rgba(255, 255, 0),
    rgba(0, 255, 255),
    rgba(128, 0, 128),
    rgba(128, 0, 0),
    rgba(0, 128, 128),
    rgba(0, 0, 255),
    rgba(0, 204, 255),
    rgba(204, 255, 255),
    rgba(204, 255, 204),
    rgba(255, 255, 153),
    rgba(153, 204, 255),
    rgba(255, 153, 204),
    rgba(204, 153, 255),
    rgba(255, 204, 153),
    rgba(51, 102, 255),
    rgba(51, 204, 204),
    rgba(153, 204, 0),
    rgba(255, 204, 0),
    rgba(255, 153, 0),
    rgba(255, 102, 0),
    rgba(102, 102, 153),
    rgba(150, 150, 150),
    rgba(0, 51, 102),
    rgba(51, 153, 102),
    rgba(0, 51, 0),
    rgba(51, 51, 0),
    rgba(153, 51, 0),
    rgba(153, 51, 102),
    rgba(51, 51, 153),
    rgba(51, 51, 51),
    rgba(0, 0, 0),
    rgba(255, 255, 255),
];

/// Overlay color of the `ordinal`-th resolve of a call.
#[inline]
#[must_use]
pub fn overlay_color(ordinal: usize) -> [u8; 4] {
    RESOLVE_OVERLAY_COLORS[ordinal % RESOLVE_OVERLAY_COLORS.len()]
}

// ─── Collaborator contracts ───────────────────────────────────────────────────

/// 2D debug drawing sink (alpha blended, no depth).
pub trait DebugOverlay: Send + Sync {
    fn draw_quad(&self, rect: &ScreenRect, color: [u8; 4]);
}

/// GPU profiler accepting multi-threaded sections.
pub trait PassProfiler: Send + Sync {
    /// Opens a section named `label` and returns its index.
    fn insert_section(&self, label: &str) -> u32;
}

// ─── ResolveStats ─────────────────────────────────────────────────────────────

/// Resolve counters of one record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveCounters {
    /// Number of resolve contexts emitted.
    pub resolve_count: u64,
    /// Sum of the requested resolve areas, in pixels.
    pub pixel_count: u64,
}

/// Per-list partial resolve statistics, shared by all passes of a frame.
#[derive(Debug, Default)]
pub struct ResolveStats {
    per_list: Mutex<FxHashMap<RenderListId, ResolveCounters>>,
}

impl ResolveStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one resolve covering `rects`.
    pub fn record(&self, list: RenderListId, rects: &[ScreenRect]) {
        let pixels: u64 = rects.iter().map(ScreenRect::area).sum();
        let mut per_list = self.per_list.lock();
        let counters = per_list.entry(list).or_default();
        counters.resolve_count += 1;
        counters.pixel_count += pixels;
    }

    #[must_use]
    pub fn for_list(&self, list: RenderListId) -> ResolveCounters {
        self.per_list.lock().get(&list).copied().unwrap_or_default()
    }

    /// Counters summed over every list.
    #[must_use]
    pub fn totals(&self) -> ResolveCounters {
        self.per_list
            .lock()
            .values()
            .fold(ResolveCounters::default(), |acc, c| ResolveCounters {
                resolve_count: acc.resolve_count + c.resolve_count,
                pixel_count: acc.pixel_count + c.pixel_count,
            })
    }

    /// Clears all counters (frame start).
    pub fn reset(&self) {
        self.per_list.lock().clear();
    }
}

/// Records statistics and the optional overlay for one emitted resolve.
pub(crate) fn record_resolve(
    level: ResolveDebug,
    stats: Option<&ResolveStats>,
    overlay: Option<&dyn DebugOverlay>,
    list: RenderListId,
    rects: &[ScreenRect],
    ordinal: usize,
) {
    if !level.is_enabled() {
        return;
    }

    if level == ResolveDebug::Overlay
        && let Some(overlay) = overlay
    {
        let color = overlay_color(ordinal);
        for rect in rects {
            overlay.draw_quad(rect, color);
        }
    }

    if let Some(stats) = stats {
        stats.record(list, rects);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_accumulate_per_list() {
        let stats = ResolveStats::new();
        stats.record(
            RenderListId::Transparent,
            &[ScreenRect::from_bounds(0, 0, 10, 10), ScreenRect::from_bounds(20, 20, 25, 30)],
        );
        stats.record(RenderListId::TransparentNearest, &[ScreenRect::from_bounds(0, 0, 4, 4)]);

        assert_eq!(
            stats.for_list(RenderListId::Transparent),
            ResolveCounters { resolve_count: 1, pixel_count: 150 }
        );
        assert_eq!(stats.totals(), ResolveCounters { resolve_count: 2, pixel_count: 166 });

        stats.reset();
        assert_eq!(stats.totals(), ResolveCounters::default());
    }

    #[test]
    fn test_degenerate_rect_adds_no_pixels() {
        let stats = ResolveStats::new();
        stats.record(RenderListId::Transparent, &[ScreenRect::from_bounds(10, 10, 5, 5)]);
        let c = stats.for_list(RenderListId::Transparent);
        assert_eq!(c.resolve_count, 1);
        assert_eq!(c.pixel_count, 0);
    }

    #[test]
    fn test_overlay_color_wraps() {
        assert_eq!(overlay_color(0), overlay_color(RESOLVE_OVERLAY_COLORS.len()));
        assert_eq!(overlay_color(1)[3], OVERLAY_ALPHA);
    }

    #[test]
    fn test_disabled_level_records_nothing() {
        let stats = ResolveStats::new();
        record_resolve(
            ResolveDebug::Off,
            Some(&stats),
            None,
            RenderListId::Transparent,
            &[ScreenRect::from_bounds(0, 0, 1, 1)],
            0,
        );
        assert_eq!(stats.totals(), ResolveCounters::default());
    }
}
