// Smooth scrolling: an eased glide toward the latest scroll target, driven
// once per frame, or native scrolling when the host cannot drive the offset.

use log::warn;

use crate::easing::{lerp, Easing};
use crate::types::{Command, ScrollSettings, Timestamp};

/// Base glide duration before the weight multiplier (microseconds).
const BASE_DURATION_US: f32 = 1_000_000.0;

/// Offset delta below which a glide counts as settled.
const SETTLE_EPSILON: f32 = 0.1;

/// Eased interpolation of the page scroll offset toward a moving target.
#[derive(Debug)]
pub struct SmoothScroll {
    settings: ScrollSettings,
    current: f32,
    glide_from: f32,
    target: f32,
    glide_started: Option<Timestamp>,
}

impl SmoothScroll {
    pub fn new(settings: ScrollSettings) -> Self {
        SmoothScroll {
            settings,
            current: 0.0,
            glide_from: 0.0,
            target: 0.0,
            glide_started: None,
        }
    }

    /// New scroll input. The glide restarts from the current animated offset
    /// so retargeting mid-flight stays continuous.
    pub fn retarget(&mut self, now: Timestamp, offset: f32) {
        if (offset - self.current).abs() < SETTLE_EPSILON {
            return;
        }
        self.glide_from = self.current;
        self.target = offset;
        self.glide_started = Some(now);
    }

    /// Advance the glide one frame. Returns the next offset while settling,
    /// `None` once at rest.
    pub fn advance(&mut self, now: Timestamp) -> Option<f32> {
        let started = self.glide_started?;

        if !self.settings.smoothing {
            self.current = self.target;
            self.glide_started = None;
            return Some(self.current);
        }

        let duration = BASE_DURATION_US * self.settings.duration_weight;
        let elapsed = now.as_micros().saturating_sub(started.as_micros()) as f32;
        let t = (elapsed / duration).min(1.0);
        self.current = lerp(self.glide_from, self.target, Easing::Expo.apply(t));

        if t >= 1.0 || (self.target - self.current).abs() < SETTLE_EPSILON {
            self.current = self.target;
            self.glide_started = None;
        }
        Some(self.current)
    }

    pub fn offset(&self) -> f32 {
        self.current
    }
}

/// Scroll behavior, selected once at startup from the host capability.
#[derive(Debug)]
pub enum ScrollStrategy {
    /// Engine-driven glide physics.
    Physics(SmoothScroll),
    /// Capability absent; native scrolling stands, no commands are emitted.
    Native,
}

impl ScrollStrategy {
    pub fn select(available: bool, settings: ScrollSettings) -> Self {
        if available {
            ScrollStrategy::Physics(SmoothScroll::new(settings))
        } else {
            warn!("scroll driver capability missing, keeping native scrolling");
            ScrollStrategy::Native
        }
    }

    pub fn on_scroll_input(&mut self, now: Timestamp, offset: f32) {
        if let ScrollStrategy::Physics(scroll) = self {
            scroll.retarget(now, offset);
        }
    }

    pub fn frame(&mut self, now: Timestamp, out: &mut Vec<Command>) {
        if let ScrollStrategy::Physics(scroll) = self {
            if let Some(offset) = scroll.advance(now) {
                out.push(Command::ScrollTo { offset });
            }
        }
    }
}

/// Per-frame driver loop. Production never stops it; tests can, so the
/// otherwise unbounded self-rescheduling has a deterministic off switch.
#[derive(Debug)]
pub struct FrameLoop {
    running: bool,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        FrameLoop {
            running: true,
            frames: 0,
        }
    }

    /// Mark a frame serviced. Returns false once stopped.
    pub fn begin_frame(&mut self) -> bool {
        if self.running {
            self.frames += 1;
        }
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}
