//! Render Lists & Batch Filters
//!
//! A render view buckets its compiled draw items into render lists. The
//! scene pass classifies lists as nearest / transparent, and filters items
//! by [`BatchFlags`].

use bitflags::bitflags;

/// Identifier of a render-item bucket inside a render view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum RenderListId {
    Invalid = 0,
    Preprocess,
    ZPrepass,
    ZPrepassNearest,
    General,
    TerrainLayer,
    ShadowGen,
    Decal,
    WaterVolumes,
    /// Back-to-front sorted transparent items.
    Transparent,
    /// Alpha-tested transparent items.
    TransparentAlphaTest,
    /// Transparent items of the nearest (first-person) range.
    TransparentNearest,
    Water,
    NearestObjects,
    ForwardOpaque,
    ForwardOpaqueNearest,
    HalfResParticles,
    ParticlesThickness,
    LensOptics,
    FogVolume,
    Eye,
    Sky,
    AfterHdrPostProcess,
    AfterPostProcess,
    DebugHelper,
    Custom,
    Highlight,
}

impl RenderListId {
    /// Lists rendered with the nearest-range viewport.
    #[inline]
    #[must_use]
    pub const fn is_nearest(self) -> bool {
        matches!(
            self,
            Self::ZPrepassNearest | Self::NearestObjects | Self::ForwardOpaqueNearest | Self::TransparentNearest
        )
    }

    /// Lists that go through the resolve-aware transparent path.
    #[inline]
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        matches!(self, Self::Transparent | Self::TransparentAlphaTest | Self::TransparentNearest)
    }

    /// Display name used in pass group labels.
    ///
    /// Several lists share a name because they are recorded into the same
    /// statistics bucket.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Invalid => "INVALID",
            Self::Preprocess => "PREPROCESS",
            Self::ZPrepass => "NON-NEAREST",
            Self::ZPrepassNearest
            | Self::NearestObjects
            | Self::ForwardOpaqueNearest
            | Self::TransparentNearest => "NEAREST",
            Self::General | Self::Transparent | Self::TransparentAlphaTest | Self::ForwardOpaque => "GENERAL",
            Self::TerrainLayer => "TERRAIN",
            Self::ShadowGen => "SHADOWS",
            Self::Decal => "DECAL",
            Self::WaterVolumes => "WATER_VOLUMES",
            Self::Water => "WATER",
            Self::HalfResParticles => "HALFRES_PARTICLES",
            Self::ParticlesThickness => "PARTICLES_THICKNESS",
            Self::LensOptics => "LENSOPTICS",
            Self::FogVolume => "FOG_VOLUME",
            Self::Eye => "EYE",
            Self::Sky => "SKY",
            Self::AfterHdrPostProcess => "AFTER_HDRPOSTPROCESS",
            Self::AfterPostProcess => "AFTER_POSTPROCESS",
            Self::DebugHelper => "DEBUG_HELPER",
            Self::Custom => "CUSTOM",
            Self::Highlight => "HIGHLIGHT",
        }
    }
}

bitflags! {
    /// Batch filter bits of compiled render items.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BatchFlags: u32 {
        const GENERAL         = 1 << 0;
        const TRANSPARENT     = 1 << 1;
        /// Depth-only rendering (z-prepass, shadow).
        const Z               = 1 << 2;
        const ZPREPASS        = 1 << 3;
        const POST_3D_RENDER  = 1 << 4;
        const MOTION_BLUR     = 1 << 5;
        const CUSTOM_RENDER   = 1 << 6;
        const SOFT_PARTICLE   = 1 << 7;
        const LAYER_EFFECT    = 1 << 8;
        const WATER_REFL      = 1 << 9;
        const TILED_FORWARD   = 1 << 10;
        const REFRACTION      = 1 << 11;
        /// Item has a compiled render object; always part of the item query.
        const COMPILED_OBJECT = 1 << 31;
    }
}
