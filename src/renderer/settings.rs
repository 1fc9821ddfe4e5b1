//! Scene Pass Settings & Debug Overrides
//!
//! Global switches that every [`SceneRenderPass`](crate::renderer::graph::SceneRenderPass)
//! consults while recording. They are debug and tuning knobs: none of them
//! changes what a pass *is*, only how much of its work reaches the GPU.
//!
//! # Quick Start
//!
//! ```rust
//! use myth_scene_pass::renderer::settings::{NoDrawMode, PassSettings, ResolveMode};
//!
//! // Default: segmented partial resolves, everything drawn
//! let settings = PassSettings::default();
//! assert_eq!(settings.resolve_mode, ResolveMode::Segmented);
//!
//! // Profile CPU-side recording without submitting draws
//! let settings = PassSettings {
//!     no_draw: NoDrawMode::SkipSubmit,
//!     ..Default::default()
//! };
//! assert!(!settings.no_draw.submits());
//! ```

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// NoDrawMode
// ---------------------------------------------------------------------------

/// Global "no draw" override.
///
/// | Mode            | Partitioning / stats | Draw submission |
/// |-----------------|----------------------|-----------------|
/// | `Off`           | ✅                   | ✅              |
/// | `SkipSubmit`    | ✅                   | ❌              |
/// | `SkipRecording` | ❌                   | ❌              |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoDrawMode {
    #[default]
    Off,
    /// Walk the full partitioning logic but never hand contexts to the view.
    SkipSubmit,
    /// Strictest level: `draw_render_items` returns before doing anything.
    SkipRecording,
}

impl NoDrawMode {
    /// Returns `true` when immediate contexts should reach the render view.
    #[inline]
    #[must_use]
    pub fn submits(self) -> bool {
        matches!(self, Self::Off)
    }
}

// ---------------------------------------------------------------------------
// ResolveMode
// ---------------------------------------------------------------------------

/// How transparent lists that read the scene color are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResolveMode {
    /// One full-viewport resolve ahead of the whole transparent batch.
    Static,
    /// Partial resolves interleaved between the render view's precomputed
    /// transparent segments.
    #[default]
    Segmented,
}

// ---------------------------------------------------------------------------
// ResolveDebug
// ---------------------------------------------------------------------------

/// Resolve statistics / visualization level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResolveDebug {
    #[default]
    Off,
    /// Count resolves and resolved pixels.
    Stats,
    /// Stats, plus a translucent screen-space quad per resolve rect.
    Overlay,
}

impl ResolveDebug {
    #[inline]
    #[must_use]
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

// ---------------------------------------------------------------------------
// DeviceTier
// ---------------------------------------------------------------------------

/// Graphics API tier, as far as the scene pass cares.
///
/// Legacy tiers set rasterizer depth bias dynamically on the command list;
/// modern tiers bake it into pipeline state, which turns
/// [`set_depth_bias`](crate::renderer::graph::SceneRenderPass::set_depth_bias)
/// into stored data for pipeline creation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeviceTier {
    Legacy,
    #[default]
    Modern,
}

impl DeviceTier {
    #[inline]
    #[must_use]
    pub fn has_dynamic_depth_bias(self) -> bool {
        matches!(self, Self::Legacy)
    }
}

// ---------------------------------------------------------------------------
// PassSettings
// ---------------------------------------------------------------------------

/// Debug overrides and tuning values shared by scene passes.
///
/// | Field            | Description                                  | Default     |
/// |------------------|----------------------------------------------|-------------|
/// | `no_draw`        | Global draw suppression level                | `Off`       |
/// | `no_draw_near`   | Skip nearest lists on nearest-capable passes | `false`     |
/// | `near_z_range`   | Depth range of the nearest viewport          | `0.12`      |
/// | `resolve_mode`   | Transparent resolve strategy                 | `Segmented` |
/// | `resolve_debug`  | Resolve statistics / overlay                 | `Off`       |
/// | `device_tier`    | Depth bias application tier                  | `Modern`    |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassSettings {
    pub no_draw: NoDrawMode,
    pub no_draw_near: bool,
    /// Upper bound of the nearest viewport's depth range, in `[0, 1]`.
    pub near_z_range: f32,
    pub resolve_mode: ResolveMode,
    pub resolve_debug: ResolveDebug,
    pub device_tier: DeviceTier,
}

impl Default for PassSettings {
    fn default() -> Self {
        Self {
            no_draw: NoDrawMode::Off,
            no_draw_near: false,
            near_z_range: 0.12,
            resolve_mode: ResolveMode::Segmented,
            resolve_debug: ResolveDebug::Off,
            device_tier: DeviceTier::Modern,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_draw_levels() {
        assert!(NoDrawMode::Off.submits());
        assert!(!NoDrawMode::SkipSubmit.submits());
        assert!(!NoDrawMode::SkipRecording.submits());
    }

    #[test]
    fn test_depth_bias_tier() {
        assert!(DeviceTier::Legacy.has_dynamic_depth_bias());
        assert!(!DeviceTier::Modern.has_dynamic_depth_bias());
    }
}
