#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod errors;
pub mod renderer;

pub use errors::{PassError, Result};
pub use renderer::core::{CommandList, ScreenRect, Texture, TextureRef, Viewport};
pub use renderer::graph::{
    ExecutionGuard, PassContext, PassFlags, RenderListId, RenderView, SceneRenderPass, TransparentSegment,
};
pub use renderer::settings::PassSettings;
