// Easing curves shared by the glide, tween, and counter animations.

use serde::{Deserialize, Serialize};

/// Easing function mapping linear progress onto a motion curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Cubic ease-out.
    EaseOut,
    /// Cubic ease-in-out.
    EaseInOut,
    /// Exponential approach: 1 - 2^(-10t). The scroll glide curve.
    Expo,
}

impl Easing {
    /// Map progress t in [0,1] onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Expo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
        }
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_bounds() {
        for easing in [
            Easing::Linear,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::Expo,
        ] {
            let start = easing.apply(0.0);
            let end = easing.apply(1.0);
            assert!(start.abs() < 0.01, "{easing:?} should start at ~0");
            assert!((end - 1.0).abs() < 0.01, "{easing:?} should end at 1");
        }
    }

    #[test]
    fn ease_out_is_monotone() {
        let mut last = 0.0;
        for i in 0..=100 {
            let v = Easing::EaseOut.apply(i as f32 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(2.0, 10.0, 0.5), 6.0);
    }
}
