// Pointer spotlight: mirror pointer coordinates into CSS custom properties.
// Document-level writes are throttled; per-card writes are not.

use crate::throttle::Throttle;
use crate::types::{Command, ElementId, ElementRect, PagePoint, Timestamp, VarScope};

/// Custom property names consumed by the spotlight glow CSS.
pub const POINTER_X: &str = "--pointer-x";
pub const POINTER_Y: &str = "--pointer-y";

/// Mirrors pointer positions into style variables: globally for the
/// document-level glow, per card for the hover highlight.
#[derive(Debug)]
pub struct SpotlightTracker {
    throttle: Throttle,
}

impl SpotlightTracker {
    pub fn new(pointer_window_us: u64) -> Self {
        SpotlightTracker {
            throttle: Throttle::new(pointer_window_us),
        }
    }

    /// Document-level handler. Rate-limited; moves during cooldown are dropped.
    pub fn on_pointer_move(&mut self, now: Timestamp, position: PagePoint, out: &mut Vec<Command>) {
        if !self.throttle.allow(now) {
            return;
        }
        push_pointer_vars(VarScope::Root, position, out);
    }

    /// Per-card handler. Unthrottled; coordinates relative to the card box
    /// override the root values for that card's rendering.
    pub fn on_card_pointer_move(
        &self,
        card: &ElementId,
        position: PagePoint,
        bounds: &ElementRect,
        out: &mut Vec<Command>,
    ) {
        let local = bounds.to_local(position);
        push_pointer_vars(VarScope::Element(card.clone()), local, out);
    }
}

fn push_pointer_vars(scope: VarScope, position: PagePoint, out: &mut Vec<Command>) {
    out.push(Command::SetVar {
        scope: scope.clone(),
        name: POINTER_X.to_string(),
        value: format!("{:.1}px", position.x),
    });
    out.push(Command::SetVar {
        scope,
        name: POINTER_Y.to_string(),
        value: format!("{:.1}px", position.y),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_writes_are_throttled() {
        let mut tracker = SpotlightTracker::new(33_000);
        let mut out = Vec::new();

        tracker.on_pointer_move(Timestamp::from_micros(0), PagePoint::new(10.0, 20.0), &mut out);
        tracker.on_pointer_move(Timestamp::from_micros(5000), PagePoint::new(11.0, 21.0), &mut out);
        tracker.on_pointer_move(Timestamp::from_micros(40_000), PagePoint::new(12.0, 22.0), &mut out);

        // First and third move pass; two vars each.
        assert_eq!(out.len(), 4);
        assert_eq!(
            out[0],
            Command::SetVar {
                scope: VarScope::Root,
                name: POINTER_X.to_string(),
                value: "10.0px".to_string(),
            }
        );
    }

    #[test]
    fn card_writes_are_relative_and_unthrottled() {
        let tracker = SpotlightTracker::new(33_000);
        let card = ElementId::new("card-1");
        let bounds = ElementRect::new(100.0, 50.0, 300.0, 200.0);
        let mut out = Vec::new();

        tracker.on_card_pointer_move(&card, PagePoint::new(130.0, 75.0), &bounds, &mut out);
        tracker.on_card_pointer_move(&card, PagePoint::new(131.0, 76.0), &bounds, &mut out);

        assert_eq!(out.len(), 4);
        assert_eq!(
            out[0],
            Command::SetVar {
                scope: VarScope::Element(card.clone()),
                name: POINTER_X.to_string(),
                value: "30.0px".to_string(),
            }
        );
        assert_eq!(
            out[1],
            Command::SetVar {
                scope: VarScope::Element(card),
                name: POINTER_Y.to_string(),
                value: "25.0px".to_string(),
            }
        );
    }
}
