//! Scene Render Pass
//!
//! A scene pass draws compiled render items of one or more render lists into
//! a fixed set of render targets. Building a pass is single-threaded; the
//! resulting [`PassContext`]s are either drawn immediately or buffered for a
//! [`PassScheduler`] and replayed later, possibly from worker threads.
//!
//! # Lifecycle
//!
//! ```text
//! configure (targets, viewport, resources, draw setup)
//!     └── begin_execution() ──► ExecutionGuard
//!             ├── draw_render_items(view, list, start, end)   × N
//!             │       ├── opaque list      → 1 draw context
//!             │       └── transparent list → resolve / draw partition
//!             └── drop / end_execution()
//! execute()   (scheduled mode: replay buffered contexts in order)
//! ```
//!
//! While an [`ExecutionGuard`] is alive it holds the pass mutably, so
//! targets, viewport and resources cannot change mid-execution.

mod execution;
mod partition;
mod recording;

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use bitflags::bitflags;

use crate::errors::PassError;
use crate::renderer::core::binding::{ResourceLayoutRef, ResourceSetRef};
use crate::renderer::core::rect::{RenderViewport, Viewport};
use crate::renderer::core::render_pass::DeviceRenderPass;
use crate::renderer::core::texture::{ResourceViewHandle, TextureRef};
use crate::renderer::graph::context::PassContext;
use crate::renderer::graph::debug::{DebugOverlay, PassProfiler, ResolveStats};
use crate::renderer::graph::descriptor::{DepthBias, MAX_COLOR_TARGETS, NearestDepth, PassDescriptor};
use crate::renderer::graph::projection::ProjectionManager;
use crate::renderer::graph::render_list::BatchFlags;
use crate::renderer::graph::scheduler::PassScheduler;
use crate::renderer::graph::stage::{RenderStage, ShaderTechnique};
use crate::renderer::settings::PassSettings;

pub use execution::ExecutionGuard;

static NEXT_PASS_ID: AtomicU32 = AtomicU32::new(0);

const DEFAULT_LABEL: &str = "SCENE_PASS";

/// Process-unique identity of a scene pass, used for scheduler registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassId(u32);

impl PassId {
    fn next() -> Self {
        Self(NEXT_PASS_ID.fetch_add(1, Ordering::Relaxed))
    }
}

bitflags! {
    /// Behavior variants of a scene pass, fixed at configuration time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PassFlags: u32 {
        /// Nearest lists are drawn with the nearest-range viewport.
        const RENDER_NEAREST               = 1 << 0;
        /// Depth is stored reversed (near = 1).
        const REVERSE_DEPTH                = 1 << 1;
        /// Stereo / multi-resolution projection pass.
        const PROJECTION_PASS              = 1 << 2;
        const USE_PROJECTION_STATE         = 1 << 3;
        const REQUIRE_PROJECTION_CONSTANTS = 1 << 4;
    }
}

/// A scene rendering pass. See the [module docs](self).
pub struct SceneRenderPass {
    id: PassId,
    label: String,
    flags: PassFlags,
    settings: PassSettings,

    // === Draw setup ===
    stage: RenderStage,
    stage_pass: u32,
    technique: ShaderTechnique,
    include_filter: BatchFlags,
    exclude_filter: BatchFlags,

    // === Targets & device state ===
    descriptor: PassDescriptor,
    device_render_pass: DeviceRenderPass,
    render_pass_revision: u64,
    resource_layout: Option<ResourceLayoutRef>,
    per_pass_resources: Option<ResourceSetRef>,
    resolve_source: Option<TextureRef>,
    resolve_target: Option<TextureRef>,

    // === Collaborators ===
    scheduler: Option<Arc<dyn PassScheduler>>,
    projection: Option<Arc<dyn ProjectionManager>>,
    profiler: Option<Arc<dyn PassProfiler>>,
    overlay: Option<Arc<dyn DebugOverlay>>,
    resolve_stats: Option<Arc<ResolveStats>>,

    // === Execution state ===
    num_groups: u32,
    /// Buffered contexts awaiting [`execute`](Self::execute), in emission order.
    contexts: Vec<PassContext>,
}

impl Default for SceneRenderPass {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRenderPass {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: PassId::next(),
            label: DEFAULT_LABEL.to_owned(),
            flags: PassFlags::empty(),
            settings: PassSettings::default(),
            stage: RenderStage::default(),
            stage_pass: 0,
            technique: ShaderTechnique::default(),
            include_filter: BatchFlags::empty(),
            exclude_filter: BatchFlags::empty(),
            descriptor: PassDescriptor::new(),
            device_render_pass: DeviceRenderPass::default(),
            render_pass_revision: 0,
            resource_layout: None,
            per_pass_resources: None,
            resolve_source: None,
            resolve_target: None,
            scheduler: None,
            projection: None,
            profiler: None,
            overlay: None,
            resolve_stats: None,
            num_groups: 0,
            contexts: Vec::with_capacity(16),
        }
    }

    // ========================================================================
    // Builder-style configuration
    // ========================================================================

    #[must_use]
    pub fn with_label(mut self, label: &str) -> Self {
        self.set_label(label);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: PassFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: PassSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_scheduler(mut self, scheduler: Arc<dyn PassScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    #[must_use]
    pub fn with_projection(mut self, projection: Arc<dyn ProjectionManager>) -> Self {
        self.projection = Some(projection);
        self
    }

    #[must_use]
    pub fn with_profiler(mut self, profiler: Arc<dyn PassProfiler>) -> Self {
        self.profiler = Some(profiler);
        self
    }

    /// Attaches resolve statistics and, optionally, an overlay sink. Both are
    /// only fed when [`PassSettings::resolve_debug`] is enabled.
    #[must_use]
    pub fn with_resolve_debug(mut self, stats: Arc<ResolveStats>, overlay: Option<Arc<dyn DebugOverlay>>) -> Self {
        self.resolve_stats = Some(stats);
        self.overlay = overlay;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn id(&self) -> PassId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    #[must_use]
    pub fn flags(&self) -> PassFlags {
        self.flags
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &PassSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn descriptor(&self) -> &PassDescriptor {
        &self.descriptor
    }

    #[inline]
    #[must_use]
    pub fn device_render_pass(&self) -> &DeviceRenderPass {
        &self.device_render_pass
    }

    /// Viewport used for nearest (`true`) or regular (`false`) lists.
    #[inline]
    #[must_use]
    pub fn viewport(&self, nearest: bool) -> Viewport {
        self.descriptor.viewport(nearest)
    }

    #[inline]
    #[must_use]
    pub fn stage(&self) -> RenderStage {
        self.stage
    }

    #[inline]
    #[must_use]
    pub fn include_filter(&self) -> BatchFlags {
        self.include_filter
    }

    /// Contexts buffered for scheduled execution, in emission order.
    #[inline]
    #[must_use]
    pub fn pending_contexts(&self) -> &[PassContext] {
        &self.contexts
    }

    /// Number of context groups emitted during the current / last execution.
    #[inline]
    #[must_use]
    pub fn group_count(&self) -> u32 {
        self.num_groups
    }

    // ========================================================================
    // Setters (only reachable while no execution is active)
    // ========================================================================

    pub fn set_label(&mut self, label: &str) {
        label.clone_into(&mut self.label);
    }

    pub fn set_flags(&mut self, flags: PassFlags) {
        self.flags = flags;
    }

    pub fn set_settings(&mut self, settings: PassSettings) {
        self.settings = settings;
    }

    /// Identifiers, technique and batch filters stamped on every context.
    pub fn setup_draw_context(
        &mut self,
        stage: RenderStage,
        stage_pass: u32,
        technique: ShaderTechnique,
        include_filter: BatchFlags,
        exclude_filter: BatchFlags,
    ) {
        self.stage = stage;
        self.stage_pass = stage_pass;
        self.technique = technique;
        self.include_filter = include_filter;
        self.exclude_filter = exclude_filter;
    }

    /// Sets the resource layout and the set bound at the per-pass slot.
    ///
    /// # Panics
    ///
    /// Panics if `layout` is invalid.
    pub fn set_pass_resources(&mut self, layout: ResourceLayoutRef, per_pass: Option<ResourceSetRef>) {
        assert!(layout.valid, "SceneRenderPass '{}': {}", self.label, PassError::MissingResourceLayout);
        self.resource_layout = Some(layout);
        self.per_pass_resources = per_pass;
    }

    /// Source (HDR) and destination (scene) targets of partial resolves.
    pub fn set_resolve_targets(&mut self, source: TextureRef, target: TextureRef) {
        self.resolve_source = Some(source);
        self.resolve_target = Some(target);
    }

    /// Binds every render target at once and re-derives the device render pass.
    ///
    /// # Panics
    ///
    /// Panics if the color targets differ in size or the depth target is
    /// narrower than the color targets.
    pub fn set_render_targets(&mut self, depth: Option<&TextureRef>, colors: [Option<&TextureRef>; MAX_COLOR_TARGETS]) {
        if let Err(err) = self.descriptor.try_set_render_targets(depth, colors) {
            panic!("SceneRenderPass '{}': {err}", self.label);
        }
        self.update_device_render_pass();
    }

    /// Swaps one color target without re-deriving the device render pass;
    /// the next [`prepare_render_pass_for_use`](Self::prepare_render_pass_for_use)
    /// picks the change up.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not resident or `slot` is out of range.
    pub fn exchange_render_target(&mut self, slot: usize, target: Option<&TextureRef>, view: ResourceViewHandle) {
        Self::assert_resident(target);
        if let Err(err) = self.descriptor.set_color_target(slot, target, view) {
            panic!("SceneRenderPass '{}': {err}", self.label);
        }
    }

    /// Depth counterpart of [`exchange_render_target`](Self::exchange_render_target).
    pub fn exchange_depth_target(&mut self, target: Option<&TextureRef>, view: ResourceViewHandle) {
        Self::assert_resident(target);
        self.descriptor.set_depth_target(target, view);
    }

    /// Sets the standard viewport; derives the nearest variant when the pass
    /// renders nearest lists, and the scissor from the standard viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            log::warn!("SceneRenderPass '{}': viewport has zero area", self.label);
        }

        let nearest = self.flags.contains(PassFlags::RENDER_NEAREST).then(|| NearestDepth {
            range: self.settings.near_z_range,
            reverse_depth: self.flags.contains(PassFlags::REVERSE_DEPTH),
        });
        self.descriptor.set_viewport(viewport, nearest);
    }

    /// [`set_viewport`](Self::set_viewport) from a render view's integer viewport.
    pub fn set_render_viewport(&mut self, viewport: RenderViewport) {
        self.set_viewport(Viewport::from(viewport));
    }

    /// Stored verbatim. Applied on the command list on legacy tiers only;
    /// modern tiers read it through [`PassDescriptor::depth_bias_state`].
    pub fn set_depth_bias(&mut self, constant: f32, slope_scale: f32, clamp: f32) {
        self.descriptor.set_depth_bias(DepthBias {
            constant,
            slope_scale,
            clamp,
        });
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn assert_resident(target: Option<&TextureRef>) {
        if let Some(texture) = target {
            assert!(
                texture.is_resident(),
                "{}",
                PassError::TargetNotResident {
                    label: texture.label().to_owned()
                }
            );
        }
    }

    fn update_device_render_pass(&mut self) {
        self.render_pass_revision += 1;
        self.device_render_pass = self.descriptor.derive_device_render_pass(self.render_pass_revision);
        if self.device_render_pass.is_empty() {
            log::warn!("SceneRenderPass '{}': no render target bound", self.label);
        }
        log::debug!(
            "SceneRenderPass '{}': device render pass re-derived (revision {}, colors {:?})",
            self.label,
            self.render_pass_revision,
            self.device_render_pass.color_formats()
        );
    }

    fn scheduler_active(&self) -> bool {
        self.scheduler.as_ref().is_some_and(|s| s.is_active())
    }
}
