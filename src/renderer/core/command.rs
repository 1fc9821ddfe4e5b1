//! Command Recording Interface
//!
//! [`CommandList`] is the narrow slice of the device layer the scene pass
//! records into. One command list is recorded by exactly one thread; several
//! lists may be recorded in parallel against the same (read-only) pass.

use crate::renderer::core::binding::{ResourceLayout, ResourceLayoutSlot, ResourceSet};
use crate::renderer::core::rect::{ScissorRect, Viewport};
use crate::renderer::core::render_pass::DeviceRenderPass;
use crate::renderer::core::texture::Texture;

/// Overlap contract of a region copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CopyMode {
    /// Destination regions of concurrently issued copies never overlap, so
    /// the device may skip inter-copy synchronization.
    NoOverwriteConcurrent,
}

/// Source/destination placement of one texture region copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionMapping {
    pub src_origin: wgpu::Origin3d,
    pub dst_origin: wgpu::Origin3d,
    pub extent: wgpu::Extent3d,
    pub mode: CopyMode,
}

impl RegionMapping {
    /// `true` when the copy touches no texel.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extent.width == 0 || self.extent.height == 0 || self.extent.depth_or_array_layers == 0
    }
}

/// Graphics + copy recording interface of a device command list.
pub trait CommandList {
    /// Makes the attachments of `pass` usable before recording starts.
    fn prepare_render_pass_for_use(&mut self, pass: &DeviceRenderPass);

    /// Makes `set` usable at `slot` before recording starts.
    fn prepare_resources_for_use(&mut self, slot: ResourceLayoutSlot, set: Option<&ResourceSet>);

    fn begin_render_pass(&mut self, pass: &DeviceRenderPass, render_area: ScissorRect);

    fn end_render_pass(&mut self, pass: &DeviceRenderPass);

    fn set_viewports(&mut self, viewports: &[Viewport]);

    fn set_scissor_rects(&mut self, rects: &[ScissorRect]);

    fn set_resource_layout(&mut self, layout: &ResourceLayout);

    fn set_resources(&mut self, slot: ResourceLayoutSlot, set: Option<&ResourceSet>);

    /// Rasterizer depth bias. Only called on [`DeviceTier::Legacy`](crate::renderer::settings::DeviceTier::Legacy).
    fn set_depth_bias(&mut self, constant: f32, slope_scale: f32, clamp: f32);

    fn copy_region(&mut self, src: &Texture, dst: &Texture, mapping: &RegionMapping);
}
