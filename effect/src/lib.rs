//! Magic lamp minimize animation for compositing window managers.
//!
//! When a window minimizes, its surface squashes into a flat band, pours
//! into the taskbar icon like smoke into a lamp, and settles with a small
//! sideways bump; unminimize plays the shape back out. The host compositor
//! drives the effect through per-frame paint hooks and window-lifecycle
//! signals, and the effect answers with deformed vertex meshes, clip
//! regions, and redirect requests. See [`effects::MagicLampEffect`] for the
//! hook surface and [`compositor::Compositor`] for what the host provides.

// Host-facing seams
pub mod compositor;
pub mod scene;

// Effect internals
pub mod config;
pub mod effects;
pub mod error;

pub use compositor::{
    Compositor, PaintMask, ScreenPrePaintData, WindowHandle, WindowId, WindowPrePaintData,
};
pub use config::{EffectConfig, ShapeCurve};
pub use effects::{AnimationKind, AnimationParameters, AnimationPhase, MagicLampEffect, Model};
pub use error::EffectError;
pub use scene::{QuadList, Rect, Region, WindowQuad, WindowVertex};
