// motion_core: landing-page motion engine.
// All motion math lives here; JS is plumbing. The plumbing scans the DOM once
// for marker classes and data attributes, then streams timestamped input
// batches in and applies the command batches that tick() returns.

mod counter;
mod easing;
mod embed;
mod error;
mod reveal;
mod scramble;
mod scroll;
mod spotlight;
mod throttle;
mod timeline;
mod types;

use wasm_bindgen::prelude::*;

pub use counter::CounterRegistry;
pub use easing::Easing;
pub use embed::{EmbedLoader, SCENE_URL};
pub use error::EngineError;
pub use reveal::{RevealRegistry, REVEAL_LINE};
pub use scramble::{ScrambleEffect, ALPHABET, TICK_INTERVAL_US};
pub use scroll::{FrameLoop, ScrollStrategy, SmoothScroll};
pub use spotlight::{SpotlightTracker, POINTER_X, POINTER_Y};
pub use throttle::Throttle;
pub use timeline::{build_entrance, Position, Timeline, Track, Tween};
pub use types::*;

use log::error;

/// Stroke width passed to the host icon library's scan-and-replace.
const ICON_STROKE_WIDTH: f32 = 1.5;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// The engine core: one state object per concern, advanced only by explicit
/// event and frame calls from the host loop.
pub struct MotionEngine {
    capabilities: Capabilities,
    inventory: PageInventory,
    spotlight: SpotlightTracker,
    counters: CounterRegistry,
    reveals: RevealRegistry,
    scroll: ScrollStrategy,
    frame_loop: FrameLoop,
    timeline: Option<Timeline>,
    scramble: Option<ScrambleEffect>,
    embed: EmbedLoader,
    booted: bool,
}

impl MotionEngine {
    pub fn new(config: EngineConfig) -> Self {
        // Strategy selection happens once, here, not per call site.
        let scroll = ScrollStrategy::select(config.capabilities.scroll_physics, config.scroll);
        let embed = EmbedLoader::new(config.embed, config.inventory.embed_container.clone());

        MotionEngine {
            capabilities: config.capabilities,
            spotlight: SpotlightTracker::new(config.spotlight.pointer_window_us),
            counters: CounterRegistry::new(config.counter),
            reveals: RevealRegistry::new(),
            scroll,
            frame_loop: FrameLoop::new(),
            timeline: None,
            scramble: None,
            embed,
            inventory: config.inventory,
            booted: false,
        }
    }

    /// Route a batch of page signals. Returns the commands to apply.
    pub fn handle_events(&mut self, batch: &EventBatch) -> Vec<Command> {
        let mut out = Vec::new();
        for event in &batch.events {
            let now = event.timestamp;
            match &event.kind {
                EventKind::DomReady => self.boot(now, &mut out),
                EventKind::PageLoaded => self.embed.on_page_loaded(now),
                EventKind::PointerMove { position } => {
                    self.spotlight.on_pointer_move(now, *position, &mut out);
                }
                EventKind::CardPointerMove {
                    card,
                    position,
                    bounds,
                } => {
                    self.spotlight
                        .on_card_pointer_move(card, *position, bounds, &mut out);
                }
                EventKind::IntersectionChange { element, ratio } => {
                    self.counters.on_intersection(element, *ratio, now);
                }
                EventKind::ScrollChange {
                    offset,
                    viewport_height,
                    element_tops,
                } => {
                    self.scroll.on_scroll_input(now, *offset);
                    for entry in element_tops {
                        self.reveals
                            .on_scroll(&entry.element, entry.top, *viewport_height);
                    }
                }
            }
        }
        out
    }

    /// Page-ready bootstrap. Runs once; later DomReady signals are ignored.
    fn boot(&mut self, now: Timestamp, out: &mut Vec<Command>) {
        if self.booted {
            return;
        }
        self.booted = true;

        if self.capabilities.icons {
            out.push(Command::RenderIcons {
                stroke_width: ICON_STROKE_WIDTH,
            });
        }

        if let Some(target) = &self.inventory.counter {
            self.counters.register(target.element.clone(), target.target);
        }

        if self.capabilities.timelines {
            let mut timeline = build_entrance(&self.inventory);
            timeline.play(now);
            self.timeline = Some(timeline);
            for element in &self.inventory.reveal {
                self.reveals.register(element.clone());
            }
        } else {
            error!("timeline capability missing, forcing hidden elements visible");
            for element in &self.inventory.hidden {
                out.push(Command::SetOpacity {
                    element: element.clone(),
                    value: 1.0,
                });
            }
        }
    }

    /// Advance one animation frame. `sample` supplies randomness in [0,1)
    /// for the scramble effect.
    pub fn tick(&mut self, now: Timestamp, sample: &mut dyn FnMut() -> f64) -> Vec<Command> {
        let mut out = Vec::new();
        if !self.frame_loop.begin_frame() {
            return out;
        }

        self.scroll.frame(now, &mut out);

        if let Some(timeline) = &mut self.timeline {
            let started = timeline.sample(now, &mut out);
            // The hero step's start launches the scramble on its text.
            if let (Some(hero), Some(target)) = (&self.inventory.hero, &self.inventory.scramble) {
                if started.contains(hero) {
                    self.scramble = Some(ScrambleEffect::new(&target.text, now));
                }
            }
        }

        if let (Some(effect), Some(target)) = (&mut self.scramble, &self.inventory.scramble) {
            if let Some(frame) = effect.tick(now, sample) {
                out.push(Command::SetText {
                    element: target.element.clone(),
                    text: frame,
                });
            }
            if effect.is_done() {
                self.scramble = None;
            }
        }

        self.counters.frame(now, &mut out);
        self.reveals.frame(now, &mut out);
        self.embed.frame(now, &mut out);
        out
    }

    /// Stop the per-frame loop. Subsequent ticks emit nothing.
    pub fn stop(&mut self) {
        self.frame_loop.stop();
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }
}

// ============================================================================
// WASM Bindings
// ============================================================================

/// Main engine interface exposed to JavaScript.
/// Batch interface to minimize JS↔WASM crossings.
#[wasm_bindgen]
pub struct Engine {
    inner: MotionEngine,
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Engine, JsValue> {
        let config =
            EngineConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Engine {
            inner: MotionEngine::new(config),
        })
    }

    /// Process a batch of page signals and return the commands to apply.
    pub fn handle_events(&mut self, events_json: &str) -> Result<String, JsValue> {
        let batch =
            EventBatch::from_json(events_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let commands = self.inner.handle_events(&batch);
        CommandBatch { commands }
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Advance one animation frame. `now_us` is the page clock in
    /// microseconds (performance.now() * 1000).
    pub fn tick(&mut self, now_us: u64) -> Result<String, JsValue> {
        let mut sample = || js_sys::Math::random();
        let commands = self.inner.tick(Timestamp::from_micros(now_us), &mut sample);
        CommandBatch { commands }
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Stop the per-frame loop.
    pub fn stop_frame_loop(&mut self) {
        self.inner.stop();
    }
}
