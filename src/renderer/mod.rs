//! Renderer
//!
//! - [`core`]: device-facing contracts (targets, command lists, geometry)
//! - [`graph`]: the scene render pass and its collaborators
//! - [`settings`]: global debug overrides consulted while recording

pub mod core;
pub mod graph;
pub mod settings;

pub use graph::SceneRenderPass;
pub use settings::PassSettings;
