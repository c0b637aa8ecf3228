//! Pan/zoom state of the board view and the gesture reducer that drives it.
//!
//! Gestures are expressed as [`GestureEvent`]s and folded into a [`ViewportTransform`]
//! by [`reduce`]. The reducer never rejects input: out-of-range scales are clamped.
//! The pan stream and the pinch stream each have their own phase and both write
//! into the same transform.

use crate::constants::{MAX_ZOOM, MIN_ZOOM, SETTLE_DURATION, SOFT_MIN_ZOOM, WHEEL_ZOOM_STEP};
use crate::types::ScreenOffset;

/// Phase of the pan gesture stream.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanPhase {
    /// No pan in progress
    #[default]
    Idle,
    /// Panning; `baseline` is the pan offset captured when the gesture started
    Panning {
        /// (pan_x, pan_y) when the gesture started
        baseline: (f32, f32),
    },
}

/// Phase of the pinch gesture stream.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PinchPhase {
    /// No pinch in progress
    #[default]
    Idle,
    /// Fingers down, zoom follows the reported scale
    Pinching,
    /// Pinch released below the soft floor; zoom is easing back up
    Settling(SettleAnimation),
}

/// Time-based zoom interpolation started when a pinch ends below the soft floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleAnimation {
    /// Zoom at release
    pub from: f32,
    /// Zoom the animation converges to
    pub to: f32,
    /// Clock time (seconds) the animation started at
    pub started_at: f64,
    /// Length of the animation in seconds
    pub duration: f64,
}

impl SettleAnimation {
    /// Zoom value at clock time `now`, or `None` once the animation is over.
    pub fn sample(&self, now: f64) -> Option<f32> {
        if self.duration <= 0.0 {
            return None;
        }
        let t = (now - self.started_at) / self.duration;
        if t >= 1.0 {
            return None;
        }
        let eased = ease_in_out_quad(t.max(0.0)) as f32;
        Some(self.from + (self.to - self.from) * eased)
    }
}

/// Quadratic ease-in-out over `t` in [0, 1].
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Input events understood by the viewport reducer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// A pan gesture began
    PanStart,
    /// Pan gesture moved; translation is cumulative since [`GestureEvent::PanStart`]
    PanMove {
        /// Horizontal translation in pixels
        translation_x: f32,
        /// Vertical translation in pixels
        translation_y: f32,
    },
    /// Pan gesture finished
    PanEnd,
    /// A pinch gesture began
    PinchStart,
    /// Pinch reported a new scale factor
    PinchMove {
        /// Requested zoom scale, clamped by the reducer
        scale: f32,
    },
    /// Pinch released at clock time `now` (seconds)
    PinchEnd {
        /// Clock time in seconds
        now: f64,
    },
    /// Scroll wheel moved; the sign selects zoom in (positive) or out (negative)
    Wheel {
        /// Scroll amount; only its sign is used
        delta: f32,
    },
    /// Frame tick at clock time `now` (seconds), advances the settle animation
    Tick {
        /// Clock time in seconds
        now: f64,
    },
}

/// Pan offset and zoom scale applied to the whole board.
///
/// A new board view starts from [`ViewportTransform::default`]: no pan, zoom 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    /// Horizontal pan in screen pixels
    pub pan_x: f32,
    /// Vertical pan in screen pixels
    pub pan_y: f32,
    /// Zoom scale, kept within [`MIN_ZOOM`, `MAX_ZOOM`]
    pub zoom: f32,
    /// Pan stream phase
    pub pan: PanPhase,
    /// Pinch stream phase
    pub pinch: PinchPhase,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
            pan: PanPhase::Idle,
            pinch: PinchPhase::Idle,
        }
    }
}

/// Clamps a requested zoom scale into the allowed range.
pub fn clamp_zoom(scale: f32) -> f32 {
    if scale.is_nan() {
        return MIN_ZOOM;
    }
    scale.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Folds one gesture event into the transform.
pub fn reduce(state: ViewportTransform, event: GestureEvent) -> ViewportTransform {
    let mut next = state;
    match event {
        GestureEvent::PanStart => {
            next.pan = PanPhase::Panning {
                baseline: (state.pan_x, state.pan_y),
            };
        }
        GestureEvent::PanMove {
            translation_x,
            translation_y,
        } => {
            // A move without a start pans from the current offset.
            let (base_x, base_y) = match state.pan {
                PanPhase::Panning { baseline } => baseline,
                PanPhase::Idle => (state.pan_x, state.pan_y),
            };
            next.pan_x = base_x + translation_x;
            next.pan_y = base_y + translation_y;
            if state.pan == PanPhase::Idle {
                next.pan = PanPhase::Panning {
                    baseline: (base_x, base_y),
                };
            }
        }
        GestureEvent::PanEnd => {
            next.pan = PanPhase::Idle;
        }
        GestureEvent::PinchStart => {
            next.pinch = PinchPhase::Pinching;
        }
        GestureEvent::PinchMove { scale } => {
            next.zoom = clamp_zoom(scale);
            next.pinch = PinchPhase::Pinching;
        }
        GestureEvent::PinchEnd { now } => {
            next.pinch = if state.zoom < SOFT_MIN_ZOOM {
                PinchPhase::Settling(SettleAnimation {
                    from: state.zoom,
                    to: SOFT_MIN_ZOOM,
                    started_at: now,
                    duration: SETTLE_DURATION,
                })
            } else {
                PinchPhase::Idle
            };
        }
        GestureEvent::Wheel { delta } => {
            let step = if delta > 0.0 {
                WHEEL_ZOOM_STEP
            } else if delta < 0.0 {
                -WHEEL_ZOOM_STEP
            } else {
                0.0
            };
            next.zoom = clamp_zoom(state.zoom + step);
            if matches!(state.pinch, PinchPhase::Settling(_)) {
                next.pinch = PinchPhase::Idle;
            }
        }
        GestureEvent::Tick { now } => {
            if let PinchPhase::Settling(anim) = state.pinch {
                match anim.sample(now) {
                    Some(zoom) => next.zoom = zoom,
                    None => {
                        next.zoom = anim.to;
                        next.pinch = PinchPhase::Idle;
                    }
                }
            }
        }
    }
    next
}

impl ViewportTransform {
    /// Applies an event in place.
    pub fn apply(&mut self, event: GestureEvent) {
        *self = reduce(*self, event);
    }

    /// Returns true while the post-pinch settle animation is running.
    pub fn is_animating(&self) -> bool {
        matches!(self.pinch, PinchPhase::Settling(_))
    }

    /// Maps a point of the projected board into screen space.
    ///
    /// The board is scaled about `world_pivot`, which lands on `screen_pivot` shifted by the pan.
    pub fn to_screen(
        &self,
        point: ScreenOffset,
        world_pivot: ScreenOffset,
        screen_pivot: ScreenOffset,
    ) -> ScreenOffset {
        ScreenOffset {
            x: screen_pivot.x + self.pan_x + (point.x - world_pivot.x) * self.zoom,
            y: screen_pivot.y + self.pan_y + (point.y - world_pivot.y) * self.zoom,
        }
    }
}
