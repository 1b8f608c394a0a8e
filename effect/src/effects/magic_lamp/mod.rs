//! The magic lamp minimize effect.
//!
//! Coordinates one [`Model`] per animating window against the host's frame
//! loop. The host invokes the paint hooks every frame while the effect is
//! active and the window-lifecycle hooks as windows change state; everything
//! runs frame-synchronous on the render thread, so no hook blocks and no
//! state needs locking.
//!
//! # Frame flow
//!
//! ```text
//! pre_paint_screen      step every model by the present-time delta
//!         │
//! pre_paint_window      force minimized-but-animating windows visible
//!         │
//! paint_window          clip painting to the deforming region
//!         │
//! deform                subdivide the surface and displace its vertices
//!         │
//! post_paint_screen     retire done models, release their redirects
//! ```

pub mod easing;
pub mod model;

use std::collections::HashMap;
use std::time::Duration;

use smallvec::SmallVec;

use crate::compositor::{
    Compositor, PaintMask, ScreenPrePaintData, WindowHandle, WindowId, WindowPrePaintData,
};
use crate::config::{self, EffectConfig};
use crate::scene::{QuadList, Region};

pub use model::{AnimationKind, AnimationParameters, AnimationPhase, Model};

// ============================================================================
// Effect
// ============================================================================

/// The magic lamp effect controller.
///
/// Owns the registry of active animations and translates host callbacks into
/// model updates. At most one model exists per window; starting a new
/// animation for a window that already has one replaces it outright.
pub struct MagicLampEffect {
    /// Active animations keyed by window identity.
    models: HashMap<WindowId, Model>,

    /// Settings stamped onto each animation when it starts.
    parameters: AnimationParameters,

    /// Mesh density for the deformation grid.
    grid_resolution: u32,

    /// Present time of the previous frame. `None` while idle, so the first
    /// frame of a fresh animation steps by zero.
    last_present_time: Option<Duration>,
}

impl MagicLampEffect {
    /// Creates the effect, reading settings from the configuration file.
    #[must_use]
    pub fn new() -> Self { Self::with_config(&config::load_or_default()) }

    /// Creates the effect with explicit settings.
    #[must_use]
    pub fn with_config(config: &EffectConfig) -> Self {
        Self {
            models: HashMap::new(),
            parameters: AnimationParameters::from_config(config),
            grid_resolution: config.grid_resolution.max(1),
            last_present_time: None,
        }
    }

    /// Re-reads the configuration file. Animations started from now on pick
    /// up the new settings; running ones keep the settings they began with.
    pub fn reconfigure(&mut self) { self.apply_config(&config::load_or_default()); }

    fn apply_config(&mut self, config: &EffectConfig) {
        self.parameters = AnimationParameters::from_config(config);
        self.grid_resolution = config.grid_resolution.max(1);
    }

    /// Whether the effect can run on this host. Deforming window contents
    /// needs animation support and hardware-accelerated rendering.
    #[must_use]
    pub fn supported(compositor: &dyn Compositor) -> bool {
        compositor.animations_supported() && compositor.accelerated_rendering_active()
    }

    /// Whether any animation is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool { !self.models.is_empty() }

    // ------------------------------------------------------------------
    // Paint hooks
    // ------------------------------------------------------------------

    /// Screen pre-paint: advances every model by the time since the previous
    /// frame and flags the pass as transformed.
    pub fn pre_paint_screen(&mut self, data: &mut ScreenPrePaintData, present_time: Duration) {
        let delta = self
            .last_present_time
            .map_or(Duration::ZERO, |last| present_time.saturating_sub(last));
        self.last_present_time = Some(present_time);

        for model in self.models.values_mut() {
            model.step(delta);
        }

        data.mask |= PaintMask::SCREEN_WITH_TRANSFORMED_WINDOWS;
    }

    /// Screen post-paint: retires finished models, releases their redirects,
    /// and schedules the next frame.
    ///
    /// Runs strictly after every paint hook of the frame, so a model is never
    /// removed while a window still needs it.
    pub fn post_paint_screen(&mut self, compositor: &mut dyn Compositor) {
        // Collect first; removing while iterating would invalidate the map
        let finished: SmallVec<[WindowId; 4]> = self
            .models
            .iter()
            .filter(|(_, model)| model.done())
            .map(|(id, _)| *id)
            .collect();
        for id in finished {
            self.models.remove(&id);
            compositor.unredirect(id);
        }

        if self.models.is_empty() {
            self.last_present_time = None;
        }

        compositor.add_repaint_full();
    }

    /// Window pre-paint: forces a minimized window visible while its
    /// animation runs.
    pub fn pre_paint_window(&self, window: &WindowHandle, data: &mut WindowPrePaintData) {
        if self.models.contains_key(&window.id) {
            data.mask |= PaintMask::WINDOW_TRANSFORMED;
            data.disabled.remove(PaintMask::DISABLED_BY_MINIMIZE);
        }
    }

    /// Window paint: returns the region the window may paint into. Animated
    /// windows are clipped to their model's region, everything else passes
    /// its region through untouched.
    #[must_use]
    pub fn paint_window(&self, window: &WindowHandle, region: &Region) -> Region {
        match self.models.get(&window.id) {
            Some(model) if model.needs_clip() => model.clip_region(),
            _ => region.clone(),
        }
    }

    /// Deform hook: subdivides the window's surface and displaces its
    /// vertices for the current animation state.
    pub fn deform(&self, window: &WindowHandle, quads: &mut QuadList) {
        if let Some(model) = self.models.get(&window.id) {
            *quads = quads.make_grid(self.grid_resolution);
            model.apply(quads);
        }
    }

    // ------------------------------------------------------------------
    // Window lifecycle hooks
    // ------------------------------------------------------------------

    /// Window-minimized signal: starts a minimize animation.
    pub fn window_minimized(&mut self, window: &WindowHandle, compositor: &mut dyn Compositor) {
        self.start_animation(window, AnimationKind::Minimize, compositor);
    }

    /// Window-unminimized signal: starts an unminimize animation.
    pub fn window_unminimized(&mut self, window: &WindowHandle, compositor: &mut dyn Compositor) {
        self.start_animation(window, AnimationKind::Unminimize, compositor);
    }

    /// Window-deleted signal: drops the window's animation and releases its
    /// redirect.
    pub fn window_deleted(&mut self, window: WindowId, compositor: &mut dyn Compositor) {
        if self.models.remove(&window).is_some() {
            compositor.unredirect(window);
        }
    }

    /// Full-screen-effect signal: a full-screen takeover cancels every
    /// animation unconditionally. Deactivation changes nothing.
    pub fn active_fullscreen_effect_changed(&mut self, compositor: &mut dyn Compositor) {
        if !compositor.active_fullscreen_effect() {
            return;
        }
        let cancelled: SmallVec<[WindowId; 4]> = self.models.keys().copied().collect();
        for id in cancelled {
            self.models.remove(&id);
            compositor.unredirect(id);
        }
        self.last_present_time = None;
    }

    fn start_animation(
        &mut self,
        window: &WindowHandle,
        kind: AnimationKind,
        compositor: &mut dyn Compositor,
    ) {
        if compositor.active_fullscreen_effect() {
            return;
        }
        if !window.icon_geometry.is_valid() || !window.frame.is_valid() {
            tracing::debug!(window = window.id.0, "magic-lamp: invalid geometry, not animating");
            return;
        }

        let fresh = !self.models.contains_key(&window.id);
        let model = self.models.entry(window.id).or_default();
        model.set_window(window.clone());
        model.set_parameters(self.parameters);
        model.start(kind);

        // A replaced animation keeps the redirect it already holds
        if fresh {
            compositor.redirect(window.id);
        }
        compositor.add_repaint_full();
    }
}

impl Default for MagicLampEffect {
    fn default() -> Self { Self::new() }
}

// ============================================================================
// Tests
// ============================================================================
