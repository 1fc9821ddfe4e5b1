//! Device-Facing Contracts
//!
//! Provides:
//! - Screen-space geometry: [`Viewport`], [`ScissorRect`], [`ScreenRect`]
//! - Render target handles: [`Texture`], [`TargetBinding`]
//! - Resource layout / set handles bound at [`ResourceLayoutSlot::PerPass`]
//! - [`CommandList`]: the command recording interface passes record into
//! - [`DeviceRenderPass`]: the device-level render pass object

pub mod binding;
pub mod command;
pub mod rect;
pub mod render_pass;
pub mod texture;

pub use binding::{ResourceLayout, ResourceLayoutRef, ResourceLayoutSlot, ResourceSet, ResourceSetRef};
pub use command::{CommandList, CopyMode, RegionMapping};
pub use rect::{RenderViewport, ScissorRect, ScreenRect, Viewport};
pub use render_pass::{DeviceAttachment, DeviceRenderPass};
pub use texture::{ResourceViewHandle, TargetBinding, Texture, TextureRef};
