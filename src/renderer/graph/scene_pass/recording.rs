//! Command-list recording of a scene pass.
//!
//! [`SceneRenderPass::begin_render_pass`], [`SceneRenderPass::end_render_pass`]
//! and [`SceneRenderPass::resolve_pass`] run on recording worker threads,
//! each with its own command list. They only read pass state.

use crate::errors::PassError;
use crate::renderer::core::binding::ResourceLayoutSlot;
use crate::renderer::core::command::{CommandList, CopyMode, RegionMapping};
use crate::renderer::core::rect::ScreenRect;
use crate::renderer::graph::descriptor::DepthBias;

use super::{PassFlags, SceneRenderPass};

impl SceneRenderPass {
    /// Prepares the pass for recording on `cmd`.
    ///
    /// Re-derives the device render pass if a target was exchanged since the
    /// last derivation. Called single-threaded, before contexts are
    /// dispatched to workers.
    pub fn prepare_render_pass_for_use(&mut self, cmd: &mut dyn CommandList) {
        if self.descriptor.is_dirty() {
            self.update_device_render_pass();
        }

        cmd.prepare_render_pass_for_use(&self.device_render_pass);
        cmd.prepare_resources_for_use(ResourceLayoutSlot::PerPass, self.per_pass_resources.as_deref());

        if self.flags.contains(PassFlags::PROJECTION_PASS)
            && let Some(projection) = &self.projection
            && projection.is_multi_res_enabled()
        {
            // Whether nearest lists follow is unknown here; prepare both.
            projection.prepare_projection_parameters(cmd, &self.descriptor.viewport(false));
            projection.prepare_projection_parameters(cmd, &self.descriptor.viewport(true));
        }
    }

    /// Opens the render pass on `cmd` and applies viewport, scissor,
    /// resources and (legacy tiers) depth bias.
    ///
    /// # Panics
    ///
    /// Panics if no valid resource layout was set.
    pub fn begin_render_pass(&self, cmd: &mut dyn CommandList, nearest: bool) {
        let viewport = self.descriptor.viewport(nearest);
        let scissor = self.descriptor.scissor();

        cmd.begin_render_pass(&self.device_render_pass, scissor);

        let mut viewport_set = false;
        if self.flags.contains(PassFlags::PROJECTION_PASS)
            && let Some(projection) = &self.projection
        {
            viewport_set = projection.set_rendering_state(
                cmd,
                &viewport,
                self.flags.contains(PassFlags::USE_PROJECTION_STATE),
                self.flags.contains(PassFlags::REQUIRE_PROJECTION_CONSTANTS),
            );
        }

        if !viewport_set {
            cmd.set_viewports(&[viewport]);
            cmd.set_scissor_rects(&[scissor]);
        }

        let layout = match self.resource_layout.as_deref() {
            Some(layout) if layout.valid => layout,
            _ => panic!("SceneRenderPass '{}': {}", self.label, PassError::MissingResourceLayout),
        };
        cmd.set_resource_layout(layout);
        cmd.set_resources(ResourceLayoutSlot::PerPass, self.per_pass_resources.as_deref());

        if self.settings.device_tier.has_dynamic_depth_bias() {
            let bias = self.descriptor.depth_bias();
            cmd.set_depth_bias(bias.constant, bias.slope_scale, bias.clamp);
        }
    }

    /// Closes the render pass and restores shared device state.
    pub fn end_render_pass(&self, cmd: &mut dyn CommandList, _nearest: bool) {
        cmd.end_render_pass(&self.device_render_pass);

        if self.settings.device_tier.has_dynamic_depth_bias() {
            let none = DepthBias::NONE;
            cmd.set_depth_bias(none.constant, none.slope_scale, none.clamp);
        }

        if self.flags.contains(PassFlags::USE_PROJECTION_STATE)
            && let Some(projection) = &self.projection
        {
            projection.restore_state(cmd);
        }
    }

    /// Copies `rects` from the resolve source into the resolve target.
    ///
    /// Each rect is clamped to the target; zero-area results are skipped.
    /// Copies are tagged [`CopyMode::NoOverwriteConcurrent`]: concurrently
    /// recorded resolves must target disjoint regions.
    pub fn resolve_pass(&self, cmd: &mut dyn CommandList, rects: &[ScreenRect]) {
        let (Some(source), Some(target)) = (&self.resolve_source, &self.resolve_target) else {
            log::warn!("SceneRenderPass '{}': resolve requested without resolve targets", self.label);
            return;
        };

        for rect in rects {
            let Some(mapping) = clamp_resolve_region(rect, target.width(), target.height()) else {
                continue;
            };
            cmd.copy_region(source, target, &mapping);
        }
    }
}

/// Maps `rect` onto a `width` x `height` target, or `None` if nothing remains.
fn clamp_resolve_region(rect: &ScreenRect, width: u32, height: u32) -> Option<RegionMapping> {
    let (x, y) = (rect.min.x, rect.min.y);
    let clamp = |extent: i64, limit: u32, origin: u32| -> u32 {
        extent.min(i64::from(limit) - i64::from(origin)).max(0) as u32
    };
    let w = clamp(i64::from(rect.max.x) - i64::from(x), width, x);
    let h = clamp(i64::from(rect.max.y) - i64::from(y), height, y);

    let origin = wgpu::Origin3d { x, y, z: 0 };
    let mapping = RegionMapping {
        src_origin: origin,
        dst_origin: origin,
        extent: wgpu::Extent3d {
            width: w,
            height: h,
            depth_or_array_layers: 1,
        },
        mode: CopyMode::NoOverwriteConcurrent,
    };

    (!mapping.is_empty()).then_some(mapping)
}
