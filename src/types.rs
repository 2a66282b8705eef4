// Strong typing over strings. Newtypes for timestamps and element handles;
// tagged enums for the input and command wire formats.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Timestamp in microseconds. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_micros(us: u64) -> Self {
        Timestamp(us)
    }

    pub fn from_millis(ms: u64) -> Self {
        Timestamp(ms * 1000)
    }

    pub fn as_micros(&self) -> u64 {
        self.0
    }

    pub fn as_millis(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    pub fn as_secs(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }
}

/// Handle to a DOM element, as reported by the plumbing's marker scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        ElementId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Point in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PagePoint {
    pub x: f32,
    pub y: f32,
}

impl PagePoint {
    pub fn new(x: f32, y: f32) -> Self {
        PagePoint { x, y }
    }
}

/// Element bounding box in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ElementRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ElementRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        ElementRect {
            left,
            top,
            width,
            height,
        }
    }

    /// Translate a page-space point into this box's local space.
    pub fn to_local(&self, point: PagePoint) -> PagePoint {
        PagePoint::new(point.x - self.left, point.y - self.top)
    }
}

/// Host capabilities, reported once at startup. Each one gates the enhanced
/// variant of a concern; the degraded variant is chosen when absent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Capabilities {
    /// Host can apply per-frame scroll positioning.
    #[serde(default)]
    pub scroll_physics: bool,
    /// Host can apply per-frame style writes for entrance timelines.
    #[serde(default)]
    pub timelines: bool,
    /// Host icon library is loaded and can scan-and-replace placeholders.
    #[serde(default)]
    pub icons: bool,
}

/// Scramble target: the element plus the final string its data attribute holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrambleTarget {
    pub element: ElementId,
    pub text: String,
}

/// Counter target: the element plus the numeric goal its data attribute holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterTarget {
    pub element: ElementId,
    pub target: u64,
}

/// Elements found by the plumbing's one-time DOM scan. Everything is
/// optional; absent entries silently disable the feature that needs them.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PageInventory {
    pub navbar: Option<ElementId>,
    pub hero: Option<ElementId>,
    #[serde(default)]
    pub hero_children: Vec<ElementId>,
    #[serde(default)]
    pub stats: Vec<ElementId>,
    pub ticker: Option<ElementId>,
    pub scramble: Option<ScrambleTarget>,
    pub counter: Option<CounterTarget>,
    #[serde(default)]
    pub reveal: Vec<ElementId>,
    #[serde(default)]
    pub hidden: Vec<ElementId>,
    #[serde(default)]
    pub cards: Vec<ElementId>,
    pub embed_container: Option<ElementId>,
}

/// Engine configuration passed from JS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub inventory: PageInventory,
    #[serde(default)]
    pub scroll: ScrollSettings,
    #[serde(default)]
    pub spotlight: SpotlightSettings,
    #[serde(default)]
    pub counter: CounterSettings,
    #[serde(default)]
    pub embed: EmbedSettings,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))
    }
}

/// Scroll glide settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScrollSettings {
    /// Multiplier on the base one-second glide duration.
    #[serde(default = "default_duration_weight")]
    pub duration_weight: f32,
    /// Glide toward targets instead of jumping.
    #[serde(default = "default_true")]
    pub smoothing: bool,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        ScrollSettings {
            duration_weight: default_duration_weight(),
            smoothing: true,
        }
    }
}

fn default_duration_weight() -> f32 {
    1.2
}

fn default_true() -> bool {
    true
}

/// Pointer spotlight settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpotlightSettings {
    /// Minimum gap between document-level pointer writes (microseconds).
    #[serde(default = "default_pointer_window")]
    pub pointer_window_us: u64,
}

impl Default for SpotlightSettings {
    fn default() -> Self {
        SpotlightSettings {
            pointer_window_us: default_pointer_window(),
        }
    }
}

fn default_pointer_window() -> u64 {
    33_000 // ~30 writes/second
}

/// Count-up animation settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CounterSettings {
    /// Full ascent duration (microseconds).
    #[serde(default = "default_count_duration")]
    pub duration_us: u64,
    /// Visible fraction that starts the ascent.
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f32,
}

impl Default for CounterSettings {
    fn default() -> Self {
        CounterSettings {
            duration_us: default_count_duration(),
            visibility_threshold: default_visibility_threshold(),
        }
    }
}

fn default_count_duration() -> u64 {
    2_000_000 // 2s
}

fn default_visibility_threshold() -> f32 {
    0.5
}

/// Deferred embed settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmbedSettings {
    /// Delay between full page load and the mount (microseconds).
    #[serde(default = "default_embed_delay")]
    pub delay_us: u64,
    /// Container opacity while the embedded scene boots.
    #[serde(default = "default_dim_opacity")]
    pub dim_opacity: f32,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        EmbedSettings {
            delay_us: default_embed_delay(),
            dim_opacity: default_dim_opacity(),
        }
    }
}

fn default_embed_delay() -> u64 {
    500_000 // 500ms
}

fn default_dim_opacity() -> f32 {
    0.3
}

/// Batch of input signals from JS (minimizes JS↔WASM crossings).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBatch {
    pub events: Vec<InputEvent>,
}

impl EventBatch {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::InvalidEvents(e.to_string()))
    }
}

/// Single input signal from the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputEvent {
    pub timestamp: Timestamp,
    pub kind: EventKind,
}

/// Viewport-relative top of a reveal-flagged element, carried on scroll updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementTop {
    pub element: ElementId,
    pub top: f32,
}

/// Type of input signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventKind {
    /// DOM parsed; entrance sequencing may begin.
    DomReady,
    /// All resources fetched; deferred work may be armed.
    PageLoaded,
    /// Pointer moved anywhere in the document.
    PointerMove { position: PagePoint },
    /// Pointer moved within a spotlight card.
    CardPointerMove {
        card: ElementId,
        position: PagePoint,
        bounds: ElementRect,
    },
    /// Observed element's visible fraction changed.
    IntersectionChange { element: ElementId, ratio: f32 },
    /// Scroll offset changed. Reveal-flagged element tops ride along.
    ScrollChange {
        offset: f32,
        viewport_height: f32,
        #[serde(default)]
        element_tops: Vec<ElementTop>,
    },
}

/// Scope of a CSS custom property write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarScope {
    /// Document root; consumed by the global spotlight glow.
    Root,
    /// A single element; overrides the root value for that element.
    Element(ElementId),
}

/// Command for the JS plumbing to apply to the DOM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    SetVar {
        scope: VarScope,
        name: String,
        value: String,
    },
    SetText {
        element: ElementId,
        text: String,
    },
    SetOpacity {
        element: ElementId,
        value: f32,
    },
    SetTransform {
        element: ElementId,
        value: String,
    },
    ScrollTo {
        offset: f32,
    },
    MountEmbed {
        container: ElementId,
        url: String,
        dim_opacity: f32,
    },
    RenderIcons {
        stroke_width: f32,
    },
}

/// Complete command batch returned to JS for one event batch or frame.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CommandBatch {
    pub commands: Vec<Command>,
}

impl CommandBatch {
    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string(self).map_err(EngineError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_conversions() {
        let ts = Timestamp::from_millis(1500);
        assert_eq!(ts.as_micros(), 1_500_000);
        assert!((ts.as_secs() - 1.5).abs() < 0.0001);
    }

    #[test]
    fn rect_to_local() {
        let rect = ElementRect::new(100.0, 200.0, 50.0, 50.0);
        let local = rect.to_local(PagePoint::new(125.0, 210.0));
        assert_eq!(local.x, 25.0);
        assert_eq!(local.y, 10.0);
    }

    #[test]
    fn config_defaults_fill_in() {
        let config = EngineConfig::from_json(r#"{"capabilities":{"timelines":true}}"#).unwrap();
        assert!(config.capabilities.timelines);
        assert!(!config.capabilities.scroll_physics);
        assert_eq!(config.counter.duration_us, 2_000_000);
        assert_eq!(config.spotlight.pointer_window_us, 33_000);
        assert!((config.scroll.duration_weight - 1.2).abs() < f32::EPSILON);
        assert!((config.embed.dim_opacity - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn event_batch_parses_tagged_kinds() {
        let json = r#"{"events":[
            {"timestamp":1000,"kind":{"type":"DomReady"}},
            {"timestamp":2000,"kind":{"type":"PointerMove","position":{"x":10.0,"y":20.0}}}
        ]}"#;
        let batch = EventBatch::from_json(json).unwrap();
        assert_eq!(batch.events.len(), 2);
        assert!(matches!(batch.events[0].kind, EventKind::DomReady));
    }

    #[test]
    fn invalid_config_is_typed() {
        let err = EngineConfig::from_json("not json").unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }
}
