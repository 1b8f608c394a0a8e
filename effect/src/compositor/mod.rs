//! The seam between the effect and the host compositor.
//!
//! The host drives the effect through the paint and window-lifecycle hooks on
//! [`MagicLampEffect`](crate::effects::MagicLampEffect); the effect talks back
//! through the [`Compositor`] trait to capture window contents, schedule
//! repaints, and query capabilities. Window state crosses the seam as plain
//! [`WindowHandle`] snapshots, so the effect never holds references into the
//! host's window objects.

use bitflags::bitflags;

use crate::scene::Rect;

// ============================================================================
// Window Identity
// ============================================================================

/// Stable identity token for a window, assigned by the host.
///
/// Remains valid for the lifetime of the window, including across minimize
/// cycles. Identity only; carries no geometry and no ownership.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

/// Snapshot of the window state the effect needs, captured by the host when
/// it invokes a hook.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WindowHandle {
    /// The window's identity token.
    pub id: WindowId,

    /// Screen-space frame of the window at its restored size.
    pub frame: Rect,

    /// Screen-space geometry of the window's taskbar icon.
    ///
    /// An invalid rect means the host has no icon position for this window;
    /// the animation is skipped in that case.
    pub icon_geometry: Rect,
}

impl WindowHandle {
    /// Creates a handle from its parts.
    #[must_use]
    pub const fn new(id: WindowId, frame: Rect, icon_geometry: Rect) -> Self {
        Self { id, frame, icon_geometry }
    }
}

// ============================================================================
// Paint Masks
// ============================================================================

bitflags! {
    /// Paint-pass flags exchanged with the host's paint pipeline.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct PaintMask: u32 {
        /// At least one window on screen is painted with transformed geometry.
        const SCREEN_WITH_TRANSFORMED_WINDOWS = 1 << 0;
        /// This window is painted with transformed geometry.
        const WINDOW_TRANSFORMED = 1 << 1;
        /// Painting is suppressed because the window is minimized.
        const DISABLED_BY_MINIMIZE = 1 << 2;
    }
}

/// Mutable screen paint state passed to the screen pre-paint hook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenPrePaintData {
    /// Flags for the upcoming screen paint pass.
    pub mask: PaintMask,
}

/// Mutable per-window paint state passed to the window pre-paint hook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowPrePaintData {
    /// Flags for the upcoming window paint pass.
    pub mask: PaintMask,

    /// Reasons the host currently suppresses painting of this window.
    /// An effect clears flags here to force the window visible.
    pub disabled: PaintMask,
}

// ============================================================================
// Compositor
// ============================================================================

/// Host-side operations the effect consumes.
///
/// Implemented by the compositor embedding the effect. All calls happen on
/// the render thread inside the frame callbacks; implementations must not
/// block.
pub trait Compositor {
    /// Captures the window's contents into an off-screen buffer so its
    /// geometry can be transformed before compositing.
    ///
    /// Every `redirect` is paired with exactly one later [`unredirect`]
    /// for the same window.
    ///
    /// [`unredirect`]: Compositor::unredirect
    fn redirect(&mut self, window: WindowId);

    /// Releases the off-screen buffer acquired by [`redirect`].
    ///
    /// [`redirect`]: Compositor::redirect
    fn unredirect(&mut self, window: WindowId);

    /// Schedules a repaint of the whole screen for the next frame.
    fn add_repaint_full(&mut self);

    /// Whether the host can run window animations at all.
    fn animations_supported(&self) -> bool;

    /// Whether hardware-accelerated rendering is active. Deforming window
    /// contents requires it.
    fn accelerated_rendering_active(&self) -> bool;

    /// Whether a full-screen effect currently has exclusive control of the
    /// screen.
    fn active_fullscreen_effect(&self) -> bool;
}

// ============================================================================
// Tests
// ============================================================================
