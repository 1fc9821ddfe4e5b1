//! Device Render Pass
//!
//! The device-level render pass object derived from a pass descriptor:
//! attachment formats, bound views and render extent. It is a plain value so
//! that worker threads can read it while recording.

use smallvec::SmallVec;

use crate::renderer::core::texture::{ResourceViewHandle, TargetBinding};

/// One resolved attachment of a [`DeviceRenderPass`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceAttachment {
    pub texture_id: u64,
    pub view: ResourceViewHandle,
    pub format: wgpu::TextureFormat,
}

impl From<&TargetBinding> for DeviceAttachment {
    fn from(binding: &TargetBinding) -> Self {
        Self {
            texture_id: binding.texture.id(),
            view: binding.view,
            format: binding.texture.format(),
        }
    }
}

/// Device render pass derived from a pass descriptor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceRenderPass {
    /// Compacted color attachments, in slot order (empty slots skipped).
    pub color_attachments: SmallVec<[DeviceAttachment; 4]>,
    pub depth_attachment: Option<DeviceAttachment>,
    /// Size of the color attachments, or of the depth attachment when no
    /// color target is bound.
    pub extent: wgpu::Extent3d,
    /// Bumped every time the object is re-derived.
    pub revision: u64,
}

impl DeviceRenderPass {
    /// Returns `true` when nothing is bound.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.color_attachments.is_empty() && self.depth_attachment.is_none()
    }

    /// Color attachment formats, in slot order.
    #[must_use]
    pub fn color_formats(&self) -> SmallVec<[wgpu::TextureFormat; 4]> {
        self.color_attachments.iter().map(|a| a.format).collect()
    }
}
