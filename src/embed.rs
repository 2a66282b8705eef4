// Deferred mount of the externally hosted 3D scene. One shot, no retry,
// no load-failure detection for the frame itself.

use crate::types::{Command, ElementId, EmbedSettings, Timestamp};

/// Hosted scene loaded into the container's iframe.
pub const SCENE_URL: &str =
    "https://my.spline.design/nexbotrobotcharacterconcept-eb06af3b0293e5142a7cb4aff5dd5e81/";

/// Arms a fixed delay on page load and mounts the scene once it elapses.
/// The container keeps a dimmed opacity until the embedded scene's own
/// script restores it.
#[derive(Debug)]
pub struct EmbedLoader {
    settings: EmbedSettings,
    container: Option<ElementId>,
    deadline: Option<Timestamp>,
    mounted: bool,
}

impl EmbedLoader {
    pub fn new(settings: EmbedSettings, container: Option<ElementId>) -> Self {
        EmbedLoader {
            settings,
            container,
            deadline: None,
            mounted: false,
        }
    }

    /// Arm the delay once all page resources have loaded.
    pub fn on_page_loaded(&mut self, now: Timestamp) {
        if !self.mounted && self.deadline.is_none() {
            self.deadline = Some(Timestamp::from_micros(
                now.as_micros() + self.settings.delay_us,
            ));
        }
    }

    /// Emits the mount command on the first frame at or past the deadline.
    /// Missing container: the feature is skipped silently.
    pub fn frame(&mut self, now: Timestamp, out: &mut Vec<Command>) {
        let Some(deadline) = self.deadline else {
            return;
        };
        if now < deadline {
            return;
        }
        self.deadline = None;
        self.mounted = true;
        if let Some(container) = &self.container {
            out.push(Command::MountEmbed {
                container: container.clone(),
                url: SCENE_URL.to_string(),
                dim_opacity: self.settings.dim_opacity,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader(container: Option<&str>) -> EmbedLoader {
        EmbedLoader::new(EmbedSettings::default(), container.map(ElementId::new))
    }

    #[test]
    fn mounts_once_after_delay() {
        let mut loader = loader(Some("spline-container"));
        loader.on_page_loaded(Timestamp::from_micros(1_000_000));

        let mut out = Vec::new();
        loader.frame(Timestamp::from_micros(1_400_000), &mut out);
        assert!(out.is_empty(), "mounted before the 500ms delay");

        loader.frame(Timestamp::from_micros(1_500_000), &mut out);
        assert_eq!(out.len(), 1);
        match &out[0] {
            Command::MountEmbed {
                container,
                url,
                dim_opacity,
            } => {
                assert_eq!(container.as_str(), "spline-container");
                assert_eq!(url, SCENE_URL);
                assert!((dim_opacity - 0.3).abs() < f32::EPSILON);
            }
            other => panic!("expected MountEmbed, got {other:?}"),
        }

        // One shot.
        let mut later = Vec::new();
        loader.frame(Timestamp::from_micros(5_000_000), &mut later);
        assert!(later.is_empty());
    }

    #[test]
    fn missing_container_skips_silently() {
        let mut loader = loader(None);
        loader.on_page_loaded(Timestamp::from_micros(0));

        let mut out = Vec::new();
        loader.frame(Timestamp::from_micros(600_000), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn nothing_before_page_load() {
        let mut loader = loader(Some("spline-container"));
        let mut out = Vec::new();
        loader.frame(Timestamp::from_micros(10_000_000), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn repeated_load_events_do_not_rearm() {
        let mut loader = loader(Some("spline-container"));
        loader.on_page_loaded(Timestamp::from_micros(0));
        let mut out = Vec::new();
        loader.frame(Timestamp::from_micros(500_000), &mut out);
        assert_eq!(out.len(), 1);

        loader.on_page_loaded(Timestamp::from_micros(600_000));
        let mut again = Vec::new();
        loader.frame(Timestamp::from_micros(2_000_000), &mut again);
        assert!(again.is_empty());
    }
}
