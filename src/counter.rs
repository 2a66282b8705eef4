// Count-up animation gated on first sufficient visibility. One shot per
// element: completed counters leave the registry and never re-animate.

use std::collections::HashMap;

use crate::easing::Easing;
use crate::types::{Command, CounterSettings, ElementId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Animating { started: Timestamp },
}

#[derive(Debug)]
struct Entry {
    target: u64,
    phase: Phase,
}

/// Registry of observed counter elements, keyed by element identity.
/// Registration is idempotent; removal on completion is mandatory so the
/// relation stays bounded and a finished counter can never replay.
#[derive(Debug)]
pub struct CounterRegistry {
    settings: CounterSettings,
    entries: HashMap<ElementId, Entry>,
}

impl CounterRegistry {
    pub fn new(settings: CounterSettings) -> Self {
        CounterRegistry {
            settings,
            entries: HashMap::new(),
        }
    }

    /// Idempotent: re-registering a live element keeps its current state.
    pub fn register(&mut self, element: ElementId, target: u64) {
        self.entries.entry(element).or_insert(Entry {
            target,
            phase: Phase::Idle,
        });
    }

    pub fn is_observed(&self, element: &ElementId) -> bool {
        self.entries.contains_key(element)
    }

    /// Visibility update from the host observer. The ascent starts the first
    /// time the visible fraction reaches the threshold; later toggles are
    /// ignored.
    pub fn on_intersection(&mut self, element: &ElementId, ratio: f32, now: Timestamp) {
        if ratio < self.settings.visibility_threshold {
            return;
        }
        if let Some(entry) = self.entries.get_mut(element) {
            if entry.phase == Phase::Idle {
                entry.phase = Phase::Animating { started: now };
            }
        }
    }

    /// Advance all animating counters one frame. A counter that reaches full
    /// progress emits the exact formatted target and is unregistered.
    pub fn frame(&mut self, now: Timestamp, out: &mut Vec<Command>) {
        let duration = self.settings.duration_us;
        self.entries.retain(|element, entry| {
            let started = match entry.phase {
                Phase::Idle => return true,
                Phase::Animating { started } => started,
            };

            let elapsed = now.as_micros().saturating_sub(started.as_micros());
            let progress = (elapsed as f32 / duration as f32).min(1.0);

            if progress >= 1.0 {
                // Exact target, not floor(eased * target): no undershoot.
                out.push(Command::SetText {
                    element: element.clone(),
                    text: display_value(entry.target),
                });
                return false;
            }

            let eased = Easing::EaseOut.apply(progress);
            let shown = (eased as f64 * entry.target as f64).floor() as u64;
            out.push(Command::SetText {
                element: element.clone(),
                text: display_value(shown),
            });
            true
        });
    }
}

/// Thousands-grouped value with the trailing plus, e.g. `1,500+`.
fn display_value(value: u64) -> String {
    let mut grouped = String::new();
    for (i, c) in value.to_string().chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let mut text: String = grouped.chars().rev().collect();
    text.push('+');
    text
}
