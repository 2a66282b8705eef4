// Entrance timeline: sequenced tweens over style tracks, with relative
// placement (overlaps via negative offsets) and staggered groups.

use crate::easing::{lerp, Easing};
use crate::types::{Command, ElementId, PageInventory, Timestamp};

/// Animated style property with its endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Track {
    Opacity { from: f32, to: f32 },
    /// Vertical offset in pixels.
    TranslateY { from: f32, to: f32 },
    Scale { from: f32, to: f32 },
}

/// One element's tween.
#[derive(Debug, Clone)]
pub struct Tween {
    pub element: ElementId,
    pub tracks: Vec<Track>,
    pub duration_us: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(element: ElementId, tracks: Vec<Track>, duration_us: u64) -> Self {
        Tween {
            element,
            tracks,
            duration_us,
            easing: Easing::EaseOut,
        }
    }
}

/// Placement of a step relative to the sequence built so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Start when the previous step ends.
    After,
    /// Start before the previous step ends by this much (microseconds).
    /// The sequenced equivalent of a negative relative offset.
    Overlap(u64),
    /// Absolute offset from timeline start.
    At(u64),
}

#[derive(Debug)]
struct Scheduled {
    tween: Tween,
    start_offset_us: u64,
    started: bool,
    finished: bool,
}

/// A one-shot sequence of tweens. Build with `add`/`add_stagger`, start with
/// `play`, then drive `sample` once per frame.
#[derive(Debug, Default)]
pub struct Timeline {
    steps: Vec<Scheduled>,
    /// End offset of the most recently added step or group.
    cursor_us: u64,
    started_at: Option<Timestamp>,
}

impl Timeline {
    pub fn new() -> Self {
        Timeline {
            steps: Vec::new(),
            cursor_us: 0,
            started_at: None,
        }
    }

    fn resolve_start(&self, position: Position) -> u64 {
        match position {
            Position::After => self.cursor_us,
            Position::Overlap(us) => self.cursor_us.saturating_sub(us),
            Position::At(us) => us,
        }
    }

    /// Append a step; the sequencing cursor moves to its end.
    pub fn add(&mut self, tween: Tween, position: Position) -> &mut Self {
        let start = self.resolve_start(position);
        self.cursor_us = start + tween.duration_us;
        self.steps.push(Scheduled {
            tween,
            start_offset_us: start,
            started: false,
            finished: false,
        });
        self
    }

    /// Append a group of tweens, each starting `each_us` after the previous.
    /// The cursor moves to the end of the whole group.
    pub fn add_stagger(&mut self, tweens: Vec<Tween>, each_us: u64, position: Position) -> &mut Self {
        let base = self.resolve_start(position);
        let mut group_end = base;
        for (i, tween) in tweens.into_iter().enumerate() {
            let start = base + i as u64 * each_us;
            group_end = group_end.max(start + tween.duration_us);
            self.steps.push(Scheduled {
                tween,
                start_offset_us: start,
                started: false,
                finished: false,
            });
        }
        self.cursor_us = group_end;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Start the clock. Sampling before `play` emits nothing.
    pub fn play(&mut self, now: Timestamp) {
        self.started_at = Some(now);
    }

    pub fn is_playing(&self) -> bool {
        self.started_at.is_some() && !self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.started_at.is_some() && self.steps.iter().all(|s| s.finished)
    }

    /// Emit style writes for the current frame. Returns the elements whose
    /// steps started on this frame, so callers can hook step starts.
    pub fn sample(&mut self, now: Timestamp, out: &mut Vec<Command>) -> Vec<ElementId> {
        let Some(started_at) = self.started_at else {
            return Vec::new();
        };
        let elapsed = now.as_micros().saturating_sub(started_at.as_micros());

        let mut newly_started = Vec::new();
        for step in &mut self.steps {
            if step.finished || elapsed < step.start_offset_us {
                continue;
            }
            if !step.started {
                step.started = true;
                newly_started.push(step.tween.element.clone());
            }

            let local = elapsed - step.start_offset_us;
            let t = if step.tween.duration_us == 0 {
                1.0
            } else {
                (local as f32 / step.tween.duration_us as f32).min(1.0)
            };
            emit_tween_frame(&step.tween, step.tween.easing.apply(t), out);
            if t >= 1.0 {
                step.finished = true;
            }
        }
        newly_started
    }
}

/// Write one frame of a tween at the given eased progress. Transform tracks
/// merge into a single transform value per element.
pub(crate) fn emit_tween_frame(tween: &Tween, eased: f32, out: &mut Vec<Command>) {
    let mut transform = String::new();
    for track in &tween.tracks {
        match *track {
            Track::Opacity { from, to } => out.push(Command::SetOpacity {
                element: tween.element.clone(),
                value: lerp(from, to, eased),
            }),
            Track::TranslateY { from, to } => {
                if !transform.is_empty() {
                    transform.push(' ');
                }
                transform.push_str(&format!("translateY({:.1}px)", lerp(from, to, eased)));
            }
            Track::Scale { from, to } => {
                if !transform.is_empty() {
                    transform.push(' ');
                }
                transform.push_str(&format!("scale({:.3})", lerp(from, to, eased)));
            }
        }
    }
    if !transform.is_empty() {
        out.push(Command::SetTransform {
            element: tween.element.clone(),
            value: transform,
        });
    }
}

/// Entrance sequence for the page chrome: navbar, then hero (overlapping),
/// then staggered hero children and stat elements, then the ticker.
pub fn build_entrance(inventory: &PageInventory) -> Timeline {
    let mut timeline = Timeline::new();

    if let Some(navbar) = &inventory.navbar {
        timeline.add(
            Tween::new(
                navbar.clone(),
                vec![
                    Track::Opacity { from: 0.0, to: 1.0 },
                    Track::TranslateY { from: -100.0, to: 0.0 },
                ],
                1_000_000,
            ),
            Position::At(0),
        );
    }

    if let Some(hero) = &inventory.hero {
        timeline.add(
            Tween::new(
                hero.clone(),
                vec![
                    Track::Opacity { from: 0.0, to: 1.0 },
                    Track::TranslateY { from: 50.0, to: 0.0 },
                    Track::Scale { from: 0.8, to: 1.0 },
                ],
                1_200_000,
            ),
            Position::Overlap(500_000),
        );
    }

    if !inventory.hero_children.is_empty() {
        let tweens = inventory
            .hero_children
            .iter()
            .map(|element| {
                Tween::new(
                    element.clone(),
                    vec![
                        Track::Opacity { from: 0.0, to: 1.0 },
                        Track::TranslateY { from: 30.0, to: 0.0 },
                    ],
                    800_000,
                )
            })
            .collect();
        timeline.add_stagger(tweens, 200_000, Position::Overlap(800_000));
    }

    if !inventory.stats.is_empty() {
        let tweens = inventory
            .stats
            .iter()
            .map(|element| {
                Tween::new(
                    element.clone(),
                    vec![
                        Track::Opacity { from: 0.0, to: 1.0 },
                        Track::TranslateY { from: 20.0, to: 0.0 },
                    ],
                    600_000,
                )
            })
            .collect();
        timeline.add_stagger(tweens, 150_000, Position::Overlap(600_000));
    }

    if let Some(ticker) = &inventory.ticker {
        timeline.add(
            Tween::new(
                ticker.clone(),
                vec![Track::Opacity { from: 0.0, to: 1.0 }],
                800_000,
            ),
            Position::Overlap(400_000),
        );
    }

    timeline
}
