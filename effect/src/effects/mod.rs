//! Visual effects driven by the host's frame loop.
//!
//! Each effect is a self-contained state machine the host talks to through
//! paint and window-lifecycle hooks. Only the magic lamp lives here today.

pub mod magic_lamp;

pub use magic_lamp::{AnimationKind, AnimationParameters, AnimationPhase, MagicLampEffect, Model};
