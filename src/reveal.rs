// Scroll reveals: play an element's entrance tween when its top crosses the
// reveal line, reverse it from the current progress when it scrolls back out.
// Each trigger is independent and re-triggerable.

use std::collections::HashMap;

use crate::easing::Easing;
use crate::timeline::{emit_tween_frame, Track, Tween};
use crate::types::{Command, ElementId, Timestamp};

/// Fraction of viewport height where the reveal line sits.
pub const REVEAL_LINE: f32 = 0.85;

/// Reveal tween duration (microseconds).
const REVEAL_DURATION_US: u64 = 800_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Reverse,
}

#[derive(Debug)]
struct RevealTrigger {
    tween: Tween,
    /// Linear playback position in [0,1]; easing applies at emit time.
    progress: f32,
    direction: Direction,
    entered: bool,
    settled: bool,
}

impl RevealTrigger {
    fn new(element: ElementId) -> Self {
        RevealTrigger {
            tween: Tween {
                element,
                tracks: vec![
                    Track::Opacity { from: 0.0, to: 1.0 },
                    Track::TranslateY { from: 40.0, to: 0.0 },
                ],
                duration_us: REVEAL_DURATION_US,
                easing: Easing::EaseOut,
            },
            progress: 0.0,
            direction: Direction::Reverse,
            entered: false,
            settled: true,
        }
    }
}

/// Per-element scroll-gated reveal animations.
#[derive(Debug, Default)]
pub struct RevealRegistry {
    triggers: HashMap<ElementId, RevealTrigger>,
    last_frame: Option<Timestamp>,
}

impl RevealRegistry {
    pub fn new() -> Self {
        RevealRegistry::default()
    }

    /// Idempotent.
    pub fn register(&mut self, element: ElementId) {
        self.triggers
            .entry(element.clone())
            .or_insert_with(|| RevealTrigger::new(element));
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Scroll update for one element. `top` is the element's viewport-relative
    /// top; crossing the reveal line toggles playback direction.
    pub fn on_scroll(&mut self, element: &ElementId, top: f32, viewport_height: f32) {
        let Some(trigger) = self.triggers.get_mut(element) else {
            return;
        };
        let entered = top < viewport_height * REVEAL_LINE;
        if entered != trigger.entered {
            trigger.entered = entered;
            trigger.direction = if entered {
                Direction::Forward
            } else {
                Direction::Reverse
            };
            trigger.settled = false;
        }
    }

    /// Advance all moving reveals one frame.
    pub fn frame(&mut self, now: Timestamp, out: &mut Vec<Command>) {
        let dt_us = match self.last_frame {
            Some(last) => now.as_micros().saturating_sub(last.as_micros()),
            None => 0,
        };
        self.last_frame = Some(now);

        for trigger in self.triggers.values_mut() {
            if trigger.settled {
                continue;
            }
            let step = dt_us as f32 / trigger.tween.duration_us as f32;
            trigger.progress = match trigger.direction {
                Direction::Forward => (trigger.progress + step).min(1.0),
                Direction::Reverse => (trigger.progress - step).max(0.0),
            };
            emit_tween_frame(
                &trigger.tween,
                trigger.tween.easing.apply(trigger.progress),
                out,
            );

            let at_bound = match trigger.direction {
                Direction::Forward => trigger.progress >= 1.0,
                Direction::Reverse => trigger.progress <= 0.0,
            };
            if at_bound {
                trigger.settled = true;
            }
        }
    }
}
