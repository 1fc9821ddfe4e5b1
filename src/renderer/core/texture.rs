//! Render Target Handles
//!
//! The scene pass never owns GPU memory. It keeps shared [`Texture`] handles
//! for its attachments and for the resolve source/destination, and only
//! reads their size, format and residency.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

/// Shared reference to a render target.
pub type TextureRef = Arc<Texture>;

/// Sub-resource view selector for an attachment.
///
/// [`ResourceViewHandle::DEFAULT`] selects the texture's default view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResourceViewHandle(pub u32);

impl ResourceViewHandle {
    pub const DEFAULT: Self = Self(0);
}

/// A 2D render target as seen by the pass layer.
#[derive(Debug)]
pub struct Texture {
    id: u64,
    label: String,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
    /// Set once the device allocation exists.
    resident: AtomicBool,
}

impl Texture {
    /// Creates a resident texture handle.
    #[must_use]
    pub fn new(label: &str, width: u32, height: u32, format: wgpu::TextureFormat) -> TextureRef {
        Arc::new(Self {
            id: NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed),
            label: label.to_owned(),
            width,
            height,
            format,
            resident: AtomicBool::new(true),
        })
    }

    /// Creates a handle whose device allocation does not exist yet.
    #[must_use]
    pub fn new_pending(label: &str, width: u32, height: u32, format: wgpu::TextureFormat) -> TextureRef {
        let texture = Self::new(label, width, height, format);
        texture.resident.store(false, Ordering::Release);
        texture
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    #[inline]
    #[must_use]
    pub fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_resident(&self) -> bool {
        self.resident.load(Ordering::Acquire)
    }

    pub fn mark_resident(&self) {
        self.resident.store(true, Ordering::Release);
    }
}

/// A texture bound to an attachment slot, with the view it is bound through.
#[derive(Debug, Clone)]
pub struct TargetBinding {
    pub texture: TextureRef,
    pub view: ResourceViewHandle,
}

impl TargetBinding {
    #[must_use]
    pub fn new(texture: TextureRef, view: ResourceViewHandle) -> Self {
        Self { texture, view }
    }
}

impl PartialEq for TargetBinding {
    fn eq(&self, other: &Self) -> bool {
        self.texture.id() == other.texture.id() && self.view == other.view
    }
}
