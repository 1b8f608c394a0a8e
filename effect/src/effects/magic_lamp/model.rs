//! Per-window animation state machine and quad deformation.
//!
//! A model advances through three timed phases. For a minimize animation the
//! window first compresses into a flat band next to the icon (squash), the
//! band then pours towards the icon forming the lamp's neck (stretch), and
//! the remainder slides in with a sideways overshoot (bump). Unminimize runs
//! the same phase sequence with the geometry mapping reversed, so the window
//! rises out of the icon and lands on its frame.
//!
//! Vertex positions are resolved on two normalized axes: `v` runs along the
//! travel direction from the window edge farthest from the icon (0) to the
//! edge closest to it (1), `u` runs across it. Each phase interpolates
//! between two reference shapes expressed in those axes, which keeps the
//! deformation a pure function of phase, progress, and window geometry.

use std::time::Duration;

use crate::compositor::WindowHandle;
use crate::config::{EffectConfig, ShapeCurve};
use crate::scene::{QuadList, Rect, Region};

use super::easing;

// ============================================================================
// Types
// ============================================================================

/// Which way the animation plays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimationKind {
    /// The window collapses into its icon.
    #[default]
    Minimize,
    /// The window emerges from its icon.
    Unminimize,
}

/// Timing phase of one animation. Phases only ever advance in declaration
/// order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnimationPhase {
    /// The window compresses into a flat band next to the icon.
    Squashing,
    /// The band pours towards the icon, forming the lamp's neck.
    Stretching,
    /// The remainder slides into the icon with a sideways overshoot.
    Bumping,
    /// Terminal. The model produces no further geometry and can be retired.
    #[default]
    Done,
}

/// Immutable timing and shape settings shared by every model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationParameters {
    /// Easing curve shaping the squash motion and the neck profile.
    pub shape_curve: ShapeCurve,
    /// Length of the squash phase.
    pub squash_duration: Duration,
    /// Length of the stretch phase. Never longer than the squash phase.
    pub stretch_duration: Duration,
    /// Length of the bump phase.
    pub bump_duration: Duration,
    /// Thickness of the compressed band relative to the window, in [0, 1].
    pub shape_factor: f64,
    /// Maximum sideways overshoot of the bump phase, in pixels.
    pub bump_distance: f64,
}

impl AnimationParameters {
    /// Derives animation parameters from the user configuration.
    ///
    /// The stretch phase runs at 0.7x the base duration, rounded to the
    /// nearest millisecond and never below one.
    #[must_use]
    pub fn from_config(config: &EffectConfig) -> Self {
        let base = u64::from(config.duration.max(1));
        let stretch = (base * 7 + 5) / 10;
        Self {
            shape_curve: config.shape_curve,
            squash_duration: Duration::from_millis(base),
            stretch_duration: Duration::from_millis(stretch.max(1)),
            bump_duration: Duration::from_millis(base),
            shape_factor: config.initial_shape_factor.clamp(0.0, 1.0),
            bump_distance: config.max_bump_distance.max(0.0),
        }
    }
}

impl Default for AnimationParameters {
    fn default() -> Self { Self::from_config(&EffectConfig::default()) }
}

/// The side of the window its icon sits on, picked from the dominant axis of
/// the center-to-center offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    fn between(frame: &Rect, icon: &Rect) -> Self {
        let (frame_x, frame_y) = frame.center();
        let (icon_x, icon_y) = icon.center();
        let dx = icon_x - frame_x;
        let dy = icon_y - frame_y;
        if dx.abs() > dy.abs() {
            if dx >= 0.0 { Self::Right } else { Self::Left }
        } else if dy >= 0.0 {
            Self::Bottom
        } else {
            Self::Top
        }
    }

    /// Maps a window-local vertex position onto the normalized deformation
    /// axes. `v` is 0 at the window edge farthest from the icon and 1 at the
    /// closest edge; `u` runs across the travel axis.
    fn normalize(self, frame: &Rect, local_x: f64, local_y: f64) -> (f64, f64) {
        match self {
            Self::Bottom => (local_x / frame.width, local_y / frame.height),
            Self::Top => (local_x / frame.width, 1.0 - local_y / frame.height),
            Self::Right => (local_y / frame.height, local_x / frame.width),
            Self::Left => (local_y / frame.height, 1.0 - local_x / frame.width),
        }
    }

    /// Maps a deformed (travel, cross) pair back to screen coordinates.
    const fn denormalize(self, travel: f64, cross: f64) -> (f64, f64) {
        match self {
            Self::Top | Self::Bottom => (cross, travel),
            Self::Left | Self::Right => (travel, cross),
        }
    }
}

/// Screen-space coordinate spans for one deformation frame, resolved against
/// the travel direction.
#[derive(Clone, Copy, Debug)]
struct DeformSpans {
    /// Window edge farthest from the icon, on the travel axis.
    window_far: f64,
    /// Window edge closest to the icon, on the travel axis.
    window_near: f64,
    /// Icon edge closest to the window, on the travel axis.
    icon_near: f64,
    /// Icon edge farthest from the window, on the travel axis.
    icon_far: f64,
    /// Far edge of the compressed band the squash phase collapses into.
    band_far: f64,
    /// Window extent on the cross axis, min to max.
    window_cross: (f64, f64),
    /// Icon extent on the cross axis, min to max.
    icon_cross: (f64, f64),
    /// Sideways overshoot direction for the bump phase.
    bump_sign: f64,
}

impl DeformSpans {
    fn resolve(frame: &Rect, icon: &Rect, direction: Direction, shape_factor: f64) -> Self {
        let (window_far, window_near, icon_near, icon_far, band, window_cross, icon_cross) =
            match direction {
                Direction::Bottom => (
                    frame.y,
                    frame.bottom(),
                    icon.y,
                    icon.bottom(),
                    shape_factor * frame.height,
                    (frame.x, frame.right()),
                    (icon.x, icon.right()),
                ),
                Direction::Top => (
                    frame.bottom(),
                    frame.y,
                    icon.bottom(),
                    icon.y,
                    shape_factor * frame.height,
                    (frame.x, frame.right()),
                    (icon.x, icon.right()),
                ),
                Direction::Right => (
                    frame.x,
                    frame.right(),
                    icon.x,
                    icon.right(),
                    shape_factor * frame.width,
                    (frame.y, frame.bottom()),
                    (icon.y, icon.bottom()),
                ),
                Direction::Left => (
                    frame.right(),
                    frame.x,
                    icon.right(),
                    icon.x,
                    shape_factor * frame.width,
                    (frame.y, frame.bottom()),
                    (icon.y, icon.bottom()),
                ),
            };
        let travel_sign: f64 = match direction {
            Direction::Bottom | Direction::Right => 1.0,
            Direction::Top | Direction::Left => -1.0,
        };
        let window_mid = (window_cross.0 + window_cross.1) / 2.0;
        let icon_mid = (icon_cross.0 + icon_cross.1) / 2.0;
        Self {
            window_far,
            window_near,
            icon_near,
            icon_far,
            band_far: travel_sign.mul_add(-band, icon_near),
            window_cross,
            icon_cross,
            bump_sign: if icon_mid >= window_mid { 1.0 } else { -1.0 },
        }
    }

    /// Travel position on the undeformed window at depth `v`.
    fn window_travel(&self, v: f64) -> f64 { easing::lerp(self.window_far, self.window_near, v) }

    /// Travel position on the compressed band at depth `v`.
    fn band_travel(&self, v: f64) -> f64 { easing::lerp(self.band_far, self.icon_near, v) }

    /// Travel position on the band stretched over the icon at depth `v`.
    fn funnel_travel(&self, v: f64) -> f64 { easing::lerp(self.band_far, self.icon_far, v) }

    /// Travel position on the icon at depth `v`.
    fn icon_travel(&self, v: f64) -> f64 { easing::lerp(self.icon_near, self.icon_far, v) }

    /// Cross position on the window at lateral offset `u`.
    fn window_cross_at(&self, u: f64) -> f64 {
        easing::lerp(self.window_cross.0, self.window_cross.1, u)
    }

    /// Cross position on the icon at lateral offset `u`.
    fn icon_cross_at(&self, u: f64) -> f64 {
        easing::lerp(self.icon_cross.0, self.icon_cross.1, u)
    }
}

/// Animation state for a single window.
///
/// A default-constructed model is inert: it reports done and leaves quads
/// untouched until [`Model::start`] is called.
#[derive(Clone, Debug, Default)]
pub struct Model {
    window: WindowHandle,
    kind: AnimationKind,
    phase: AnimationPhase,
    elapsed: Duration,
    parameters: AnimationParameters,
}

impl Model {
    /// Binds the model to the window it animates.
    pub fn set_window(&mut self, window: WindowHandle) { self.window = window; }

    /// The window this model animates.
    #[must_use]
    pub const fn window(&self) -> &WindowHandle { &self.window }

    /// Replaces the timing and shape settings. Callers set this before
    /// [`Model::start`]; the model reads it live.
    pub fn set_parameters(&mut self, parameters: AnimationParameters) {
        self.parameters = parameters;
    }

    /// The active timing and shape settings.
    #[must_use]
    pub const fn parameters(&self) -> &AnimationParameters { &self.parameters }

    /// Which way the animation plays.
    #[must_use]
    pub const fn kind(&self) -> AnimationKind { self.kind }

    /// The current timing phase.
    #[must_use]
    pub const fn phase(&self) -> AnimationPhase { self.phase }

    /// Restarts the animation in the given direction, discarding any state
    /// from a previous run.
    pub fn start(&mut self, kind: AnimationKind) {
        self.kind = kind;
        self.phase = AnimationPhase::Squashing;
        self.elapsed = Duration::ZERO;
    }

    /// Advances the animation clock by `delta`.
    ///
    /// Time left over at a phase boundary carries into the next phase, so
    /// many small steps land in exactly the same state as one large step.
    /// Stepping a done model, or stepping by zero, changes nothing.
    pub fn step(&mut self, delta: Duration) {
        if self.phase == AnimationPhase::Done || delta.is_zero() {
            return;
        }
        let mut remaining = delta;
        while self.phase != AnimationPhase::Done {
            let available = self.phase_duration().saturating_sub(self.elapsed);
            if remaining < available {
                self.elapsed += remaining;
                return;
            }
            remaining -= available;
            self.advance_phase();
        }
    }

    /// Whether the animation has finished.
    #[must_use]
    pub fn done(&self) -> bool { self.phase == AnimationPhase::Done }

    /// Whether painting must be clipped to [`Model::clip_region`] this frame.
    #[must_use]
    pub fn needs_clip(&self) -> bool { !self.done() }

    /// Normalized progress through the current phase, in [0, 1].
    ///
    /// A zero-length phase reports full progress.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let duration = self.phase_duration();
        if duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// The screen-space region the deformed window must be clipped to.
    ///
    /// Covers the frame, the icon, and the gap between them, with slack on
    /// the cross axis for the bump overshoot. Only meaningful while
    /// [`Model::needs_clip`] is true.
    #[must_use]
    pub fn clip_region(&self) -> Region {
        let frame = self.window.frame;
        let icon = self.window.icon_geometry;
        if !frame.is_valid() || !icon.is_valid() {
            return Region::new();
        }
        let direction = Direction::between(&frame, &icon);
        let bounds = frame.united(&icon);
        let bump = self.parameters.bump_distance;
        // The compressed band can poke past the frame-icon union when the
        // icon overlaps the window, so pad the travel axis by the band
        // thickness as well.
        let padded = match direction {
            Direction::Top | Direction::Bottom => {
                bounds.inflated(bump, self.parameters.shape_factor * frame.height)
            }
            Direction::Left | Direction::Right => {
                bounds.inflated(self.parameters.shape_factor * frame.width, bump)
            }
        };
        Region::from(padded)
    }

    /// Deforms a window surface in place for the current phase and progress.
    ///
    /// Deterministic for a given model state and grid topology. A done model
    /// or a window without valid geometry leaves the quads untouched.
    pub fn apply(&self, quads: &mut QuadList) {
        if self.phase == AnimationPhase::Done {
            return;
        }
        let frame = self.window.frame;
        let icon = self.window.icon_geometry;
        if !frame.is_valid() || !icon.is_valid() {
            return;
        }
        let direction = Direction::between(&frame, &icon);
        let spans = DeformSpans::resolve(&frame, &icon, direction, self.parameters.shape_factor);
        let progress = self.progress();

        for quad in quads.iter_mut() {
            for vertex in quad.vertices_mut() {
                let (u, v) = direction.normalize(&frame, vertex.x, vertex.y);
                let (travel, cross) = self.deformed_position(&spans, u, v, progress);
                let (x, y) = direction.denormalize(travel, cross);
                vertex.x = x - frame.x;
                vertex.y = y - frame.y;
            }
        }
    }

    fn phase_duration(&self) -> Duration {
        match self.phase {
            AnimationPhase::Squashing => self.parameters.squash_duration,
            AnimationPhase::Stretching => self.parameters.stretch_duration,
            AnimationPhase::Bumping => self.parameters.bump_duration,
            AnimationPhase::Done => Duration::ZERO,
        }
    }

    fn advance_phase(&mut self) {
        self.phase = match self.phase {
            AnimationPhase::Squashing => AnimationPhase::Stretching,
            AnimationPhase::Stretching => AnimationPhase::Bumping,
            AnimationPhase::Bumping | AnimationPhase::Done => AnimationPhase::Done,
        };
        self.elapsed = Duration::ZERO;
    }

    /// Resolves one vertex on the deformation axes. Unminimize plays the
    /// minimize shapes backwards: its first phase is the bump in reverse and
    /// its last phase un-squashes onto the frame.
    fn deformed_position(&self, spans: &DeformSpans, u: f64, v: f64, progress: f64) -> (f64, f64) {
        match self.kind {
            AnimationKind::Minimize => match self.phase {
                AnimationPhase::Squashing => self.squash_position(spans, u, v, progress),
                AnimationPhase::Stretching => self.stretch_position(spans, u, v, progress),
                AnimationPhase::Bumping => self.bump_position(spans, u, v, progress),
                AnimationPhase::Done => (spans.icon_travel(v), spans.icon_cross_at(u)),
            },
            AnimationKind::Unminimize => match self.phase {
                AnimationPhase::Squashing => self.bump_position(spans, u, v, 1.0 - progress),
                AnimationPhase::Stretching => self.stretch_position(spans, u, v, 1.0 - progress),
                AnimationPhase::Bumping => self.squash_position(spans, u, v, 1.0 - progress),
                AnimationPhase::Done => (spans.window_travel(v), spans.window_cross_at(u)),
            },
        }
    }

    /// Squash: the window eases from its frame into the compressed band.
    /// The cross axis is untouched.
    fn squash_position(&self, spans: &DeformSpans, u: f64, v: f64, progress: f64) -> (f64, f64) {
        let eased = easing::evaluate(self.parameters.shape_curve, progress);
        let travel = easing::lerp(spans.window_travel(v), spans.band_travel(v), eased);
        (travel, spans.window_cross_at(u))
    }

    /// Stretch: the band's near edge pours over the icon while the cross
    /// axis narrows towards the icon span. The curve shapes the neck over
    /// depth, so the far edge keeps the window's width while the near edge
    /// pinches in first.
    fn stretch_position(&self, spans: &DeformSpans, u: f64, v: f64, progress: f64) -> (f64, f64) {
        let travel = easing::lerp(spans.band_travel(v), spans.funnel_travel(v), progress);
        let neck = easing::evaluate(self.parameters.shape_curve, v);
        let cross =
            easing::lerp(spans.window_cross_at(u), spans.icon_cross_at(u), progress * neck);
        (travel, cross)
    }

    /// Bump: the funnel settles onto the icon while the whole shape sways
    /// sideways by up to the bump distance, returning to rest at the end.
    fn bump_position(&self, spans: &DeformSpans, u: f64, v: f64, progress: f64) -> (f64, f64) {
        let travel = easing::lerp(spans.funnel_travel(v), spans.icon_travel(v), progress);
        let neck = easing::evaluate(self.parameters.shape_curve, v);
        let narrowed = easing::lerp(spans.window_cross_at(u), spans.icon_cross_at(u), neck);
        let settled = easing::lerp(narrowed, spans.icon_cross_at(u), progress);
        let sway = (std::f64::consts::PI * progress).sin();
        (travel, (spans.bump_sign * self.parameters.bump_distance).mul_add(sway, settled))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::WindowId;

    const MS: Duration = Duration::from_millis(1);

    fn test_window() -> WindowHandle {
        WindowHandle::new(
            WindowId(7),
            Rect::new(100.0, 100.0, 400.0, 300.0),
            Rect::new(260.0, 800.0, 80.0, 40.0),
        )
    }

    fn started_model(kind: AnimationKind) -> Model {
        let mut model = Model::default();
        model.set_window(test_window());
        model.set_parameters(AnimationParameters::default());
        model.start(kind);
        model
    }

    mod parameters_tests {
        use super::*;

        #[test]
        fn test_default_durations() {
            let params = AnimationParameters::default();
            assert_eq!(params.squash_duration, Duration::from_millis(300));
            assert_eq!(params.stretch_duration, Duration::from_millis(210));
            assert_eq!(params.bump_duration, Duration::from_millis(300));
        }

        #[test]
        fn test_stretch_rounds_to_nearest_millisecond() {
            let config = EffectConfig { duration: 15, ..EffectConfig::default() };
            let params = AnimationParameters::from_config(&config);
            assert_eq!(params.stretch_duration, Duration::from_millis(11));
        }

        #[test]
        fn test_stretch_has_a_floor_of_one_millisecond() {
            let config = EffectConfig { duration: 1, ..EffectConfig::default() };
            let params = AnimationParameters::from_config(&config);
            assert_eq!(params.stretch_duration, MS);

            let config = EffectConfig { duration: 0, ..EffectConfig::default() };
            let params = AnimationParameters::from_config(&config);
            assert_eq!(params.squash_duration, MS);
            assert_eq!(params.stretch_duration, MS);
        }

        #[test]
        fn test_stretch_never_exceeds_squash() {
            for duration in 1..=50 {
                let config = EffectConfig { duration, ..EffectConfig::default() };
                let params = AnimationParameters::from_config(&config);
                assert!(
                    params.stretch_duration <= params.squash_duration,
                    "violated at duration {duration}"
                );
            }
        }

        #[test]
        fn test_shape_factor_and_bump_distance_are_clamped() {
            let config = EffectConfig {
                initial_shape_factor: 1.5,
                max_bump_distance: -5.0,
                ..EffectConfig::default()
            };
            let params = AnimationParameters::from_config(&config);
            assert!((params.shape_factor - 1.0).abs() < f64::EPSILON);
            assert!(params.bump_distance.abs() < f64::EPSILON);

            let config = EffectConfig { initial_shape_factor: -0.2, ..EffectConfig::default() };
            let params = AnimationParameters::from_config(&config);
            assert!(params.shape_factor.abs() < f64::EPSILON);
        }
    }

    mod stepping_tests {
        use super::*;

        #[test]
        fn test_default_model_is_inert() {
            let model = Model::default();
            assert!(model.done());
            assert!(!model.needs_clip());
        }

        #[test]
        fn test_start_enters_squashing() {
            let model = started_model(AnimationKind::Minimize);
            assert_eq!(model.phase(), AnimationPhase::Squashing);
            assert_eq!(model.kind(), AnimationKind::Minimize);
            assert!(!model.done());
            assert!(model.needs_clip());
            assert!(model.progress().abs() < f64::EPSILON);
        }

        #[test]
        fn test_full_timeline() {
            let mut model = started_model(AnimationKind::Minimize);

            model.step(150 * MS);
            assert_eq!(model.phase(), AnimationPhase::Squashing);
            assert!((model.progress() - 0.5).abs() < 1e-9);

            // 300ms total consumed exactly at the boundary
            model.step(150 * MS);
            assert_eq!(model.phase(), AnimationPhase::Stretching);
            assert!(model.progress().abs() < f64::EPSILON);

            model.step(210 * MS);
            assert_eq!(model.phase(), AnimationPhase::Bumping);
            assert!(model.progress().abs() < f64::EPSILON);

            model.step(300 * MS);
            assert!(model.done());
        }

        #[test]
        fn test_split_steps_match_one_large_step() {
            let mut split = started_model(AnimationKind::Minimize);
            let mut lump = started_model(AnimationKind::Minimize);

            for _ in 0..35 {
                split.step(10 * MS);
            }
            lump.step(350 * MS);

            assert_eq!(split.phase(), lump.phase());
            assert!((split.progress() - lump.progress()).abs() < 1e-9);
        }

        #[test]
        fn test_one_step_can_cross_several_phases() {
            let mut model = started_model(AnimationKind::Minimize);
            model.step(510 * MS + MS / 2);
            // 300 squash + 210 stretch + 0.5 carried into bump
            assert_eq!(model.phase(), AnimationPhase::Bumping);
            assert!((model.progress() - 0.5 / 300.0).abs() < 1e-9);
        }

        #[test]
        fn test_phase_never_regresses() {
            let mut model = started_model(AnimationKind::Minimize);
            let mut previous = model.phase();
            for _ in 0..200 {
                model.step(7 * MS);
                assert!(model.phase() >= previous);
                previous = model.phase();
            }
        }

        #[test]
        fn test_done_latches() {
            let mut model = started_model(AnimationKind::Minimize);
            model.step(Duration::from_secs(10));
            assert!(model.done());
            model.step(Duration::from_secs(10));
            assert!(model.done());
            assert_eq!(model.phase(), AnimationPhase::Done);
        }

        #[test]
        fn test_step_zero_is_a_noop() {
            let mut model = started_model(AnimationKind::Minimize);
            model.step(75 * MS);
            let progress = model.progress();
            model.step(Duration::ZERO);
            assert_eq!(model.phase(), AnimationPhase::Squashing);
            assert!((model.progress() - progress).abs() < f64::EPSILON);
        }

        #[test]
        fn test_restart_resets_phase_and_elapsed() {
            let mut model = started_model(AnimationKind::Minimize);
            model.step(450 * MS);
            assert_eq!(model.phase(), AnimationPhase::Stretching);

            model.start(AnimationKind::Unminimize);
            assert_eq!(model.phase(), AnimationPhase::Squashing);
            assert_eq!(model.kind(), AnimationKind::Unminimize);
            assert!(model.progress().abs() < f64::EPSILON);
        }

        #[test]
        fn test_restart_after_done() {
            let mut model = started_model(AnimationKind::Minimize);
            model.step(Duration::from_secs(1));
            assert!(model.done());

            model.start(AnimationKind::Minimize);
            assert_eq!(model.phase(), AnimationPhase::Squashing);
            assert!(!model.done());
        }

        #[test]
        fn test_zero_length_phases_are_skipped() {
            let mut model = Model::default();
            model.set_window(test_window());
            model.set_parameters(AnimationParameters {
                squash_duration: Duration::ZERO,
                stretch_duration: Duration::ZERO,
                bump_duration: Duration::ZERO,
                ..AnimationParameters::default()
            });
            model.start(AnimationKind::Minimize);
            assert!((model.progress() - 1.0).abs() < f64::EPSILON);

            model.step(Duration::from_nanos(1));
            assert!(model.done());
        }

        #[test]
        fn test_unminimize_follows_the_same_phase_sequence() {
            let mut model = started_model(AnimationKind::Unminimize);
            assert_eq!(model.phase(), AnimationPhase::Squashing);
            model.step(300 * MS);
            assert_eq!(model.phase(), AnimationPhase::Stretching);
            model.step(210 * MS);
            assert_eq!(model.phase(), AnimationPhase::Bumping);
            model.step(300 * MS);
            assert!(model.done());
        }
    }

    mod deformation_tests {
        use super::*;

        fn local_frame() -> Rect { Rect::new(0.0, 0.0, 400.0, 300.0) }

        fn grid(resolution: u32) -> QuadList {
            QuadList::from_window(400.0, 300.0).make_grid(resolution)
        }

        #[test]
        fn test_minimize_start_keeps_window_geometry() {
            let model = started_model(AnimationKind::Minimize);
            let mut quads = grid(8);
            model.apply(&mut quads);
            assert!(quads.bounding_rect().approx_eq(&local_frame(), 1e-9));
        }

        #[test]
        fn test_unminimize_start_sits_on_the_icon() {
            let model = started_model(AnimationKind::Unminimize);
            let mut quads = grid(8);
            model.apply(&mut quads);
            // Icon rect translated into window-local coordinates
            let expected = Rect::new(160.0, 700.0, 80.0, 40.0);
            assert!(quads.bounding_rect().approx_eq(&expected, 1e-6));
        }

        #[test]
        fn test_squash_moves_towards_the_icon_only_on_the_travel_axis() {
            let mut model = started_model(AnimationKind::Minimize);
            model.step(150 * MS);
            let mut quads = grid(8);
            model.apply(&mut quads);
            let bounds = quads.bounding_rect();
            // Cross axis untouched while squashing
            assert!(bounds.x.abs() < 1e-9);
            assert!((bounds.right() - 400.0).abs() < 1e-9);
            // Both edges moved down, towards an icon below the window
            assert!(bounds.y > 0.0);
            assert!(bounds.bottom() > 300.0);
        }

        #[test]
        fn test_squash_ends_on_the_compressed_band() {
            let mut model = started_model(AnimationKind::Minimize);
            model.step(300 * MS);
            assert_eq!(model.phase(), AnimationPhase::Stretching);
            let mut quads = grid(8);
            model.apply(&mut quads);
            // Band of thickness 0.3 x 300 resting against the icon's top
            // edge, still at the window's full width
            let expected = Rect::new(0.0, 610.0, 400.0, 90.0);
            assert!(quads.bounding_rect().approx_eq(&expected, 1e-6));
        }

        #[test]
        fn test_stretch_narrows_the_near_edge_first() {
            let mut model = started_model(AnimationKind::Minimize);
            model.step(405 * MS);
            assert_eq!(model.phase(), AnimationPhase::Stretching);
            let mut quads = grid(10);
            model.apply(&mut quads);

            let mut near_min = f64::MAX;
            let mut near_max = f64::MIN;
            let mut far_min = f64::MAX;
            let mut far_max = f64::MIN;
            let split = quads.bounding_rect().center().1;
            for quad in quads.iter() {
                for vertex in quad.vertices() {
                    if vertex.y > split {
                        near_min = near_min.min(vertex.x);
                        near_max = near_max.max(vertex.x);
                    } else {
                        far_min = far_min.min(vertex.x);
                        far_max = far_max.max(vertex.x);
                    }
                }
            }
            assert!(near_max - near_min < far_max - far_min);
        }

        #[test]
        fn test_bump_sways_sideways_mid_phase() {
            let mut model = started_model(AnimationKind::Minimize);
            model.step((300 + 210 + 150) * MS);
            assert_eq!(model.phase(), AnimationPhase::Bumping);
            let mut quads = grid(8);
            model.apply(&mut quads);

            let mut still = started_model(AnimationKind::Minimize);
            still.set_parameters(AnimationParameters {
                bump_distance: 0.0,
                ..AnimationParameters::default()
            });
            still.start(AnimationKind::Minimize);
            still.step((300 + 210 + 150) * MS);
            let mut reference = grid(8);
            still.apply(&mut reference);

            let offset = quads.bounding_rect().x - reference.bounding_rect().x;
            // sin(pi/2) puts the full bump distance into the offset
            assert!((offset.abs() - 30.0).abs() < 1e-6);
        }

        #[test]
        fn test_deformation_is_deterministic() {
            let mut model = started_model(AnimationKind::Minimize);
            model.step(222 * MS);
            let mut first = grid(12);
            let mut second = grid(12);
            model.apply(&mut first);
            model.apply(&mut second);
            assert_eq!(first, second);
        }

        #[test]
        fn test_done_model_leaves_quads_untouched() {
            let mut model = started_model(AnimationKind::Minimize);
            model.step(Duration::from_secs(5));
            assert!(model.done());
            let mut quads = grid(4);
            let reference = quads.clone();
            model.apply(&mut quads);
            assert_eq!(quads, reference);
        }

        #[test]
        fn test_invalid_geometry_leaves_quads_untouched() {
            let mut model = Model::default();
            model.set_window(WindowHandle::default());
            model.set_parameters(AnimationParameters::default());
            model.start(AnimationKind::Minimize);
            let mut quads = grid(4);
            let reference = quads.clone();
            model.apply(&mut quads);
            assert_eq!(quads, reference);
        }

        #[test]
        fn test_single_quad_surface_deforms_without_subdivision() {
            let model = started_model(AnimationKind::Unminimize);
            let mut quads = QuadList::from_window(400.0, 300.0);
            model.apply(&mut quads);
            assert_eq!(quads.len(), 1);
            let expected = Rect::new(160.0, 700.0, 80.0, 40.0);
            assert!(quads.bounding_rect().approx_eq(&expected, 1e-6));
        }

        #[test]
        fn test_unminimize_start_reaches_the_icon_in_all_directions() {
            let frame = Rect::new(100.0, 100.0, 400.0, 300.0);
            let icons = [
                Rect::new(260.0, 800.0, 80.0, 40.0),
                Rect::new(260.0, -500.0, 80.0, 40.0),
                Rect::new(900.0, 230.0, 40.0, 80.0),
                Rect::new(-700.0, 230.0, 40.0, 80.0),
            ];
            for icon in icons {
                let mut model = Model::default();
                model.set_window(WindowHandle::new(WindowId(1), frame, icon));
                model.set_parameters(AnimationParameters::default());
                model.start(AnimationKind::Unminimize);

                let mut quads = grid(6);
                model.apply(&mut quads);
                let expected =
                    Rect::new(icon.x - frame.x, icon.y - frame.y, icon.width, icon.height);
                assert!(
                    quads.bounding_rect().approx_eq(&expected, 1e-6),
                    "missed the icon at {icon:?}"
                );
            }
        }

        #[test]
        fn test_clip_region_covers_frame_and_icon() {
            let model = started_model(AnimationKind::Minimize);
            let bounds = model.clip_region().bounding_rect();
            assert!(bounds.contains_point(300.0, 250.0));
            assert!(bounds.contains_point(300.0, 820.0));
            // Bump slack on the cross axis
            assert!(bounds.x <= 100.0 - 30.0 + 1e-9);
            assert!(bounds.right() >= 500.0 + 30.0 - 1e-9);
        }

        #[test]
        fn test_clip_region_is_empty_without_geometry() {
            let model = Model::default();
            assert!(model.clip_region().is_empty());
        }
    }
}
