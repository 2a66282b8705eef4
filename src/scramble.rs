// Text scramble: random characters lock in left-to-right until the source
// string is fully restored.

use crate::types::Timestamp;

/// Characters drawn for positions that have not locked in yet.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789#$%&*+=?!";

/// Gap between frames (microseconds).
pub const TICK_INTERVAL_US: u64 = 25_000;

/// Advance applied to the reveal index on every tick.
const REVEAL_PER_TICK: f32 = 0.4;

/// One running scramble over a single element's text. Ticks until the
/// target is fully restored unless cancelled first.
#[derive(Debug)]
pub struct ScrambleEffect {
    target: Vec<char>,
    reveal: f32,
    next_tick: Timestamp,
    done: bool,
}

impl ScrambleEffect {
    pub fn new(target: &str, now: Timestamp) -> Self {
        ScrambleEffect {
            target: target.chars().collect(),
            reveal: 0.0,
            next_tick: now,
            done: false,
        }
    }

    /// True once the final frame has been produced (or after `cancel`).
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Stop early. No further frames are produced.
    pub fn cancel(&mut self) {
        self.done = true;
    }

    /// Produce the next frame if a tick is due. `sample` supplies randomness
    /// in [0,1). Returns `None` when no tick is due or the effect finished.
    ///
    /// The copy-vs-random branch runs per character on every tick including
    /// the terminating one, so the last frame is exactly the target string.
    pub fn tick(&mut self, now: Timestamp, sample: &mut dyn FnMut() -> f64) -> Option<String> {
        if self.done || now < self.next_tick {
            return None;
        }
        self.next_tick = Timestamp::from_micros(now.as_micros() + TICK_INTERVAL_US);

        let locked = self.reveal.floor() as usize;
        let frame: String = self
            .target
            .iter()
            .enumerate()
            .map(|(i, &c)| if i < locked { c } else { random_char(sample) })
            .collect();

        if self.reveal >= self.target.len() as f32 {
            self.done = true;
        } else {
            self.reveal += REVEAL_PER_TICK;
        }
        Some(frame)
    }
}

fn random_char(sample: &mut dyn FnMut() -> f64) -> char {
    let idx = (sample() * ALPHABET.len() as f64) as usize;
    ALPHABET[idx.min(ALPHABET.len() - 1)] as char
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fixed_sampler(value: f64) -> impl FnMut() -> f64 {
        move || value
    }

    /// Run the effect to completion at the tick cadence, collecting frames.
    fn run_to_end(target: &str, sample: &mut dyn FnMut() -> f64) -> Vec<String> {
        let mut effect = ScrambleEffect::new(target, Timestamp::from_micros(0));
        let mut frames = Vec::new();
        let mut now = 0u64;
        while !effect.is_done() {
            if let Some(frame) = effect.tick(Timestamp::from_micros(now), sample) {
                frames.push(frame);
            }
            now += TICK_INTERVAL_US;
            assert!(now < 60_000_000, "scramble failed to terminate");
        }
        frames
    }

    #[test]
    fn settles_on_exact_target() {
        let mut sample = fixed_sampler(0.0);
        let frames = run_to_end("ACCESS", &mut sample);
        assert_eq!(frames.last().unwrap(), "ACCESS");
    }

    #[test]
    fn locked_prefix_matches_target_and_tail_is_alphabet() {
        let target = "ACCESS";
        let mut effect = ScrambleEffect::new(target, Timestamp::from_micros(0));
        let mut sample = fixed_sampler(0.99);
        let target_chars: Vec<char> = target.chars().collect();
        let mut now = 0u64;
        let mut tick_index = 0u32;

        while !effect.is_done() {
            if let Some(frame) = effect.tick(Timestamp::from_micros(now), &mut sample) {
                let locked = ((tick_index as f32) * 0.4).floor() as usize;
                for (i, c) in frame.chars().enumerate() {
                    if i < locked.min(target_chars.len()) {
                        assert_eq!(c, target_chars[i], "locked position changed");
                    } else {
                        assert!(ALPHABET.contains(&(c as u8)), "tail outside alphabet");
                    }
                }
                tick_index += 1;
            }
            now += TICK_INTERVAL_US;
        }
    }

    #[test]
    fn no_frame_before_tick_is_due() {
        let mut effect = ScrambleEffect::new("HI", Timestamp::from_micros(100));
        let mut sample = fixed_sampler(0.5);
        assert!(effect.tick(Timestamp::from_micros(0), &mut sample).is_none());
        assert!(effect.tick(Timestamp::from_micros(100), &mut sample).is_some());
        // Next tick only after the interval elapses.
        assert!(effect
            .tick(Timestamp::from_micros(100 + TICK_INTERVAL_US - 1), &mut sample)
            .is_none());
    }

    #[test]
    fn cancel_stops_frames() {
        let mut effect = ScrambleEffect::new("LONG STRING", Timestamp::from_micros(0));
        let mut sample = fixed_sampler(0.5);
        effect.tick(Timestamp::from_micros(0), &mut sample);
        effect.cancel();
        assert!(effect.is_done());
        assert!(effect
            .tick(Timestamp::from_micros(10_000_000), &mut sample)
            .is_none());
    }

    #[test]
    fn empty_target_finishes_immediately() {
        let mut effect = ScrambleEffect::new("", Timestamp::from_micros(0));
        let mut sample = fixed_sampler(0.5);
        assert_eq!(effect.tick(Timestamp::from_micros(0), &mut sample), Some(String::new()));
        assert!(effect.is_done());
    }

    proptest! {
        /// Any target settles to exactly itself, within the expected number
        /// of ticks (len / 0.4 plus the terminating frame).
        #[test]
        fn always_terminates_on_target(target in "[A-Z0-9 ]{0,32}", seed in 0.0f64..1.0) {
            let mut sample = fixed_sampler(seed);
            let frames = run_to_end(&target, &mut sample);
            prop_assert_eq!(frames.last().cloned().unwrap_or_default(), target.clone());
            let expected = (target.chars().count() as f32 / 0.4).ceil() as usize + 2;
            prop_assert!(frames.len() <= expected);
        }
    }
}
