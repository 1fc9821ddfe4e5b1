//! Scene pass organization
//!
//! Provides:
//! - SceneRenderPass: batching, resolve partitioning and recording of scene draws
//! - ExecutionGuard: token of an active pass execution
//! - PassContext: one unit of recordable work (draw range or resolve)
//! - PassDescriptor: render targets, viewports, scissor and depth bias
//! - RenderView: compiled-item storage the pass draws from
//! - PassScheduler: deferred (multi-threaded) execution registration
//! - ProjectionManager: stereo / multi-resolution projection hooks
//! - ResolveStats / DebugOverlay: resolve statistics and visualization

pub mod context;
pub mod debug;
pub mod descriptor;
pub mod projection;
pub mod render_list;
pub mod scene_pass;
pub mod scheduler;
pub mod stage;
pub mod view;

pub use context::{PassContext, PassContextKind};
pub use debug::{DebugOverlay, PassProfiler, ResolveCounters, ResolveStats, overlay_color};
pub use descriptor::{DepthBias, MAX_COLOR_TARGETS, NearestDepth, PassDescriptor};
pub use projection::ProjectionManager;
pub use render_list::{BatchFlags, RenderListId};
pub use scene_pass::{ExecutionGuard, PassFlags, PassId, SceneRenderPass};
pub use scheduler::{PassScheduler, RenderPassScheduler};
pub use stage::{RenderStage, ShaderTechnique};
pub use view::{RenderView, SegmentFence, TransparentSegment};
