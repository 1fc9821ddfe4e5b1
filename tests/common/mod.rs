//! Shared test doubles: a recording render view and a recording command list.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use myth_scene_pass::renderer::core::{
    CommandList, DeviceRenderPass, RegionMapping, RenderViewport, ResourceLayout, ResourceLayoutSlot, ResourceSet,
    ScissorRect, ScreenRect, Texture, TextureRef, Viewport,
};
use myth_scene_pass::renderer::graph::{
    BatchFlags, PassContext, PassContextKind, RenderListId, RenderView, SceneRenderPass, SegmentFence,
    TransparentSegment,
};

pub const WIDTH: u32 = 1920;
pub const HEIGHT: u32 = 1080;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Only one scene pass execution may be active per process, so tests that
/// begin one hold this lock for their whole body.
static EXECUTION_LOCK: Mutex<()> = parking_lot::const_mutex(());

pub fn serial_execution() -> MutexGuard<'static, ()> {
    EXECUTION_LOCK.lock()
}

// ============================================================================
// Recorded events
// ============================================================================

/// What the view saw for one context.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawn {
    Draw {
        list: RenderListId,
        items: Range<usize>,
        nearest: bool,
        group: u32,
    },
    Resolve {
        list: RenderListId,
        rects: Vec<ScreenRect>,
        group: u32,
    },
}

impl Drawn {
    pub fn draw(list: RenderListId, items: Range<usize>, group: u32) -> Self {
        Self::Draw {
            list,
            items,
            nearest: false,
            group,
        }
    }

    pub fn resolve(list: RenderListId, rects: &[ScreenRect], group: u32) -> Self {
        Self::Resolve {
            list,
            rects: rects.to_vec(),
            group,
        }
    }

    fn from_context(context: &PassContext) -> Self {
        match &context.kind {
            PassContextKind::Draw { items } => Self::Draw {
                list: context.render_list,
                items: items.clone(),
                nearest: context.render_nearest,
                group: context.group_index,
            },
            PassContextKind::Resolve { rects } => Self::Resolve {
                list: context.render_list,
                rects: rects.to_vec(),
                group: context.group_index,
            },
        }
    }
}

/// One command recorded by [`RecordingCommandList`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    PrepareRenderPass { revision: u64 },
    PrepareResources { slot: ResourceLayoutSlot, set: Option<u64> },
    BeginRenderPass { revision: u64, area: ScissorRect },
    EndRenderPass { revision: u64 },
    SetViewports(Vec<Viewport>),
    SetScissorRects(Vec<ScissorRect>),
    SetResourceLayout(u64),
    SetResources { slot: ResourceLayoutSlot, set: Option<u64> },
    SetDepthBias(f32, f32, f32),
    CopyRegion { src: u64, dst: u64, mapping: RegionMapping },
}

#[derive(Debug, Default)]
pub struct RecordingCommandList {
    pub commands: Vec<Cmd>,
}

impl RecordingCommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copies(&self) -> Vec<RegionMapping> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Cmd::CopyRegion { mapping, .. } => Some(*mapping),
                _ => None,
            })
            .collect()
    }

    pub fn depth_biases(&self) -> Vec<(f32, f32, f32)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Cmd::SetDepthBias(a, b, c) => Some((*a, *b, *c)),
                _ => None,
            })
            .collect()
    }

    pub fn viewports(&self) -> Vec<Viewport> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Cmd::SetViewports(v) => Some(v.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

impl CommandList for RecordingCommandList {
    fn prepare_render_pass_for_use(&mut self, pass: &DeviceRenderPass) {
        self.commands.push(Cmd::PrepareRenderPass { revision: pass.revision });
    }

    fn prepare_resources_for_use(&mut self, slot: ResourceLayoutSlot, set: Option<&ResourceSet>) {
        self.commands.push(Cmd::PrepareResources {
            slot,
            set: set.map(|s| s.id),
        });
    }

    fn begin_render_pass(&mut self, pass: &DeviceRenderPass, render_area: ScissorRect) {
        self.commands.push(Cmd::BeginRenderPass {
            revision: pass.revision,
            area: render_area,
        });
    }

    fn end_render_pass(&mut self, pass: &DeviceRenderPass) {
        self.commands.push(Cmd::EndRenderPass { revision: pass.revision });
    }

    fn set_viewports(&mut self, viewports: &[Viewport]) {
        self.commands.push(Cmd::SetViewports(viewports.to_vec()));
    }

    fn set_scissor_rects(&mut self, rects: &[ScissorRect]) {
        self.commands.push(Cmd::SetScissorRects(rects.to_vec()));
    }

    fn set_resource_layout(&mut self, layout: &ResourceLayout) {
        self.commands.push(Cmd::SetResourceLayout(layout.id));
    }

    fn set_resources(&mut self, slot: ResourceLayoutSlot, set: Option<&ResourceSet>) {
        self.commands.push(Cmd::SetResources {
            slot,
            set: set.map(|s| s.id),
        });
    }

    fn set_depth_bias(&mut self, constant: f32, slope_scale: f32, clamp: f32) {
        self.commands.push(Cmd::SetDepthBias(constant, slope_scale, clamp));
    }

    fn copy_region(&mut self, src: &Texture, dst: &Texture, mapping: &RegionMapping) {
        self.commands.push(Cmd::CopyRegion {
            src: src.id(),
            dst: dst.id(),
            mapping: *mapping,
        });
    }
}

// ============================================================================
// MockView
// ============================================================================

/// Render view that logs every drawn context and records it into its own
/// command list through the pass's recording entry points.
pub struct MockView {
    counts: HashMap<RenderListId, usize>,
    resolve_lists: HashSet<RenderListId>,
    segments: HashMap<RenderListId, Vec<TransparentSegment>>,
    record_lists: HashMap<RenderListId, RenderListId>,
    viewport: RenderViewport,
    pub fence: SegmentFence,
    pub drawn: Mutex<Vec<Drawn>>,
    pub cmd: Mutex<RecordingCommandList>,
}

impl MockView {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            resolve_lists: HashSet::new(),
            segments: HashMap::new(),
            record_lists: HashMap::new(),
            viewport: RenderViewport::new(0, 0, WIDTH as i32, HEIGHT as i32),
            fence: SegmentFence::signaled(),
            drawn: Mutex::new(Vec::new()),
            cmd: Mutex::new(RecordingCommandList::new()),
        }
    }

    pub fn with_items(mut self, list: RenderListId, count: usize) -> Self {
        self.counts.insert(list, count);
        self
    }

    pub fn with_resolve(mut self, list: RenderListId) -> Self {
        self.resolve_lists.insert(list);
        self
    }

    pub fn with_segments(mut self, list: RenderListId, segments: Vec<TransparentSegment>) -> Self {
        self.segments.insert(list, segments);
        self
    }

    pub fn with_record_list(mut self, list: RenderListId, record: RenderListId) -> Self {
        self.record_lists.insert(list, record);
        self
    }

    pub fn with_viewport(mut self, viewport: RenderViewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_fence(mut self, fence: SegmentFence) -> Self {
        self.fence = fence;
        self
    }

    pub fn drawn(&self) -> Vec<Drawn> {
        self.drawn.lock().clone()
    }

    pub fn commands(&self) -> Vec<Cmd> {
        self.cmd.lock().commands.clone()
    }
}

impl RenderView for MockView {
    fn has_render_items(&self, list: RenderListId, filter: BatchFlags) -> bool {
        filter.contains(BatchFlags::COMPILED_OBJECT) && self.counts.get(&list).is_some_and(|&n| n > 0)
    }

    fn render_item_count(&self, list: RenderListId) -> usize {
        self.counts.get(&list).copied().unwrap_or(0)
    }

    fn recording_list(&self, list: RenderListId) -> RenderListId {
        self.record_lists.get(&list).copied().unwrap_or(list)
    }

    fn draw_compiled_render_items(&self, pass: &SceneRenderPass, context: &PassContext) {
        self.drawn.lock().push(Drawn::from_context(context));

        let mut cmd = self.cmd.lock();
        match &context.kind {
            PassContextKind::Draw { .. } => {
                pass.begin_render_pass(&mut *cmd, context.render_nearest);
                pass.end_render_pass(&mut *cmd, context.render_nearest);
            }
            PassContextKind::Resolve { rects } => pass.resolve_pass(&mut *cmd, rects),
        }
    }

    fn wait_for_transparent_segments(&self) {
        self.fence.wait();
    }

    fn has_resolve_for_list(&self, list: RenderListId) -> bool {
        self.resolve_lists.contains(&list)
    }

    fn transparent_segments(&self, list: RenderListId) -> &[TransparentSegment] {
        self.segments.get(&list).map(Vec::as_slice).unwrap_or_default()
    }

    fn viewport(&self) -> RenderViewport {
        self.viewport
    }
}

/// Coerces a shared mock into the trait object the pass consumes.
pub fn as_view(view: &Arc<MockView>) -> Arc<dyn RenderView> {
    Arc::clone(view) as Arc<dyn RenderView>
}

// ============================================================================
// Pass fixtures
// ============================================================================

pub struct Targets {
    pub color: TextureRef,
    pub depth: TextureRef,
    pub hdr: TextureRef,
}

impl Targets {
    pub fn new() -> Self {
        Self {
            color: Texture::new("scene", WIDTH, HEIGHT, wgpu::TextureFormat::Rgba8UnormSrgb),
            depth: Texture::new("depth", WIDTH, HEIGHT, wgpu::TextureFormat::Depth32Float),
            hdr: Texture::new("hdr", WIDTH, HEIGHT, wgpu::TextureFormat::Rgba16Float),
        }
    }
}

pub const LAYOUT_ID: u64 = 11;
pub const PER_PASS_SET_ID: u64 = 42;

/// A forward pass with targets, viewport, resources and resolve targets set.
pub fn forward_pass(targets: &Targets) -> SceneRenderPass {
    let mut pass = SceneRenderPass::new().with_label("FORWARD");
    configure(&mut pass, targets);
    pass
}

pub fn configure(pass: &mut SceneRenderPass, targets: &Targets) {
    pass.set_pass_resources(
        ResourceLayout::new(LAYOUT_ID, "scene_layout"),
        Some(ResourceSet::new(PER_PASS_SET_ID, "per_pass")),
    );
    pass.set_render_targets(Some(&targets.depth), [Some(&targets.hdr), None, None, None]);
    pass.set_viewport(Viewport::new(0.0, 0.0, WIDTH as f32, HEIGHT as f32));
    pass.set_resolve_targets(targets.hdr.clone(), targets.color.clone());
}
