//! Pipeline Stage & Technique Identifiers
//!
//! `RenderStage` names the graphics pipeline stage a scene pass belongs to.
//! Together with the stage-local pass index and the [`ShaderTechnique`] it is
//! stamped on every pass context so that the render view can pick the right
//! compiled pipeline state for each item.
//!
//! # Stage Overview
//!
//! | Stage | Typical passes |
//! |-------|----------------|
//! | `ShadowMap` | Cascaded shadows, point-light shadows |
//! | `GBuffer` | Z-prepass, G-Buffer fill, velocity |
//! | `Forward` | Forward opaque, transparent (with partial resolves) |
//! | `Water` | Water surface, water volumes |
//! | `Custom` | Highlights, selection outlines |
//! | `Debug` | Debug helpers, wireframe |

/// Graphics pipeline stage owning a scene pass.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum RenderStage {
    ShadowMap = 0,
    GBuffer = 1,
    #[default]
    Forward = 2,
    Water = 3,
    Custom = 4,
    Debug = 5,
}

impl RenderStage {
    /// Numeric stage id, as used by compiled pipeline state lookups.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// Stage name (for debugging).
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ShadowMap => "ShadowMap",
            Self::GBuffer => "GBuffer",
            Self::Forward => "Forward",
            Self::Water => "Water",
            Self::Custom => "Custom",
            Self::Debug => "Debug",
        }
    }
}

/// Shader technique selected for the items of a pass.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Default)]
pub enum ShaderTechnique {
    #[default]
    General,
    ZPass,
    ShadowGen,
    Custom,
    Debug,
    Velocity,
}
