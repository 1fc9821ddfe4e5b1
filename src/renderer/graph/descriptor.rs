//! Pass Descriptor
//!
//! Render target bindings, the two viewport variants, scissor and depth bias
//! of a scene pass, plus derivation of the [`DeviceRenderPass`].
//!
//! # Invariants
//!
//! - All bound color targets share the same width and height.
//! - The depth target is at least as wide as the widest color target.
//!
//! Both are programming contracts: [`PassDescriptor::validate`] reports them,
//! the infallible setters on the scene pass panic on violation.

use crate::errors::{PassError, Result};
use crate::renderer::core::rect::{ScissorRect, Viewport};
use crate::renderer::core::render_pass::{DeviceAttachment, DeviceRenderPass};
use crate::renderer::core::texture::{ResourceViewHandle, TargetBinding, TextureRef};

/// Maximum number of simultaneously bound color targets.
pub const MAX_COLOR_TARGETS: usize = 4;

/// Rasterizer depth bias triple.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DepthBias {
    pub constant: f32,
    pub slope_scale: f32,
    pub clamp: f32,
}

impl DepthBias {
    pub const NONE: Self = Self {
        constant: 0.0,
        slope_scale: 0.0,
        clamp: 0.0,
    };
}

/// Depth range policy of the nearest viewport variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestDepth {
    /// Upper bound of the nearest depth range (`[0, range]`).
    pub range: f32,
    /// Convert the range into the reverse-Z convention.
    pub reverse_depth: bool,
}

/// Targets, viewports and raster parameters of a scene pass.
#[derive(Debug, Clone, Default)]
pub struct PassDescriptor {
    color_targets: [Option<TargetBinding>; MAX_COLOR_TARGETS],
    depth_target: Option<TargetBinding>,
    /// `[standard, nearest]`.
    viewports: [Viewport; 2],
    scissor: ScissorRect,
    depth_bias: DepthBias,
    /// Targets changed since the device render pass was last derived.
    dirty: bool,
}

impl PassDescriptor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Render targets ===

    /// Replaces every binding and validates the result.
    ///
    /// The bindings are applied even when validation fails.
    pub fn try_set_render_targets(
        &mut self,
        depth: Option<&TextureRef>,
        colors: [Option<&TextureRef>; MAX_COLOR_TARGETS],
    ) -> Result<()> {
        for (slot, color) in colors.into_iter().enumerate() {
            self.color_targets[slot] =
                color.map(|t| TargetBinding::new(t.clone(), ResourceViewHandle::DEFAULT));
        }
        self.depth_target = depth.map(|t| TargetBinding::new(t.clone(), ResourceViewHandle::DEFAULT));
        self.dirty = true;
        self.validate()
    }

    /// Binds a single color slot.
    pub fn set_color_target(
        &mut self,
        slot: usize,
        target: Option<&TextureRef>,
        view: ResourceViewHandle,
    ) -> Result<()> {
        let entry = self.color_targets.get_mut(slot).ok_or(PassError::InvalidSlot(slot))?;
        *entry = target.map(|t| TargetBinding::new(t.clone(), view));
        self.dirty = true;
        Ok(())
    }

    pub fn set_depth_target(&mut self, target: Option<&TextureRef>, view: ResourceViewHandle) {
        self.depth_target = target.map(|t| TargetBinding::new(t.clone(), view));
        self.dirty = true;
    }

    #[must_use]
    pub fn color_target(&self, slot: usize) -> Option<&TargetBinding> {
        self.color_targets.get(slot).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn depth_target(&self) -> Option<&TargetBinding> {
        self.depth_target.as_ref()
    }

    /// Checks the size invariants of the bound targets.
    pub fn validate(&self) -> Result<()> {
        let mut reference: Option<(u32, u32)> = None;
        for (slot, binding) in self.color_targets.iter().enumerate() {
            let Some(binding) = binding else { continue };
            let size = (binding.texture.width(), binding.texture.height());
            match reference {
                None => reference = Some(size),
                Some((w, h)) if (w, h) != size => {
                    return Err(PassError::ColorTargetSizeMismatch {
                        slot,
                        width: size.0,
                        height: size.1,
                        expected_width: w,
                        expected_height: h,
                    });
                }
                Some(_) => {}
            }
        }

        if let (Some(depth), Some((color_width, _))) = (&self.depth_target, reference) {
            let depth_width = depth.texture.width();
            if depth_width < color_width {
                return Err(PassError::DepthTargetTooSmall { depth_width, color_width });
            }
        }

        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Derives the device render pass and clears the dirty flag.
    pub fn derive_device_render_pass(&mut self, revision: u64) -> DeviceRenderPass {
        self.dirty = false;

        let color_attachments = self
            .color_targets
            .iter()
            .flatten()
            .map(DeviceAttachment::from)
            .collect();
        let depth_attachment = self.depth_target.as_ref().map(DeviceAttachment::from);

        let extent = self
            .color_targets
            .iter()
            .flatten()
            .next()
            .or(self.depth_target.as_ref())
            .map_or(wgpu::Extent3d::default(), |b| b.texture.extent());

        DeviceRenderPass {
            color_attachments,
            depth_attachment,
            extent,
            revision,
        }
    }

    // === Viewport ===

    /// Sets the standard viewport and derives the nearest variant and the
    /// scissor rectangle.
    ///
    /// Without `nearest` both variants are identical. The scissor always
    /// follows the standard viewport.
    pub fn set_viewport(&mut self, viewport: Viewport, nearest: Option<NearestDepth>) {
        self.viewports = [viewport; 2];

        if let Some(nearest) = nearest {
            let near = viewport.with_depth_range(0.0, nearest.range);
            self.viewports[1] = if nearest.reverse_depth { near.reverse_depth() } else { near };
        }

        self.scissor = self.viewports[0].scissor();
    }

    #[inline]
    #[must_use]
    pub fn viewport(&self, nearest: bool) -> Viewport {
        self.viewports[usize::from(nearest)]
    }

    #[inline]
    #[must_use]
    pub fn scissor(&self) -> ScissorRect {
        self.scissor
    }

    // === Depth bias ===

    pub fn set_depth_bias(&mut self, bias: DepthBias) {
        self.depth_bias = bias;
    }

    #[inline]
    #[must_use]
    pub fn depth_bias(&self) -> DepthBias {
        self.depth_bias
    }

    /// Depth bias as pipeline state, for tiers that bake it into pipelines.
    #[must_use]
    pub fn depth_bias_state(&self) -> wgpu::DepthBiasState {
        wgpu::DepthBiasState {
            constant: self.depth_bias.constant as i32,
            slope_scale: self.depth_bias.slope_scale,
            clamp: self.depth_bias.clamp,
        }
    }
}
