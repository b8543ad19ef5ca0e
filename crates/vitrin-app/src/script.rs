//! Scripted visits replayed against a headless page.
//!
//! A script is a TOML list of `[[step]]` tables, each firing one user action
//! at `at_ms` on the simulated clock:
//!
//! ```toml
//! duration_ms = 12000
//!
//! [[step]]
//! at_ms = 1000
//! action = "click"
//! selector = "#heroNext"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use vitrin_core::Site;
use vitrin_core::backend::PageBackend;
use vitrin_core::geometry::ElementId;
use vitrin_core::input::{Key, PageEvent};
use vitrin_core::ui::HeadlessPage;

/// One animation frame at 60 Hz.
pub const FRAME_MS: u64 = 16;

const DEMO_SCRIPT: &str = include_str!("../scripts/demo.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Simulated time to run, including the quiet tail after the last step.
    pub duration_ms: u64,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Move the window. A smooth scroll animates over the following frames.
    ScrollTo {
        y: f32,
        #[serde(default)]
        smooth: bool,
    },
    Resize {
        width: f32,
        height: f32,
    },
    Click {
        selector: String,
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    Hover {
        selector: String,
    },
    Leave {
        selector: String,
    },
    TouchStart {
        selector: String,
        x: f32,
        y: f32,
    },
    TouchEnd {
        selector: String,
        x: f32,
        y: f32,
    },
    /// A DOM `KeyboardEvent.key` value, e.g. `"ArrowRight"` or `"e"`.
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
    },
    PointerDown,
    Focus {
        selector: String,
    },
    Blur {
        selector: String,
    },
    /// Set a form field's value without firing anything.
    Type {
        selector: String,
        value: String,
    },
    Hide,
    Show,
    ImageLoaded {
        selector: String,
    },
    ImageFailed {
        selector: String,
    },
}

/// Counters collected while replaying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub frames: u64,
    pub events: u64,
    pub prevented: u64,
}

fn find(page: &mut HeadlessPage, selector: &str) -> Result<ElementId> {
    page.query(selector)
        .with_context(|| format!("no element matches `{selector}`"))
}

impl Action {
    /// Apply the page-side part of the action and return the events the
    /// browser would fire for it.
    fn perform(&self, page: &mut HeadlessPage) -> Result<Vec<PageEvent>> {
        let events = match self {
            Self::ScrollTo { y, smooth: true } => {
                page.scroll_to(*y, true)?;
                Vec::new()
            },
            Self::ScrollTo { y, smooth: false } => {
                page.set_scroll(*y);
                vec![PageEvent::Scroll]
            },
            Self::Resize { width, height } => {
                page.set_viewport_size(*width, *height);
                vec![PageEvent::Resize]
            },
            Self::Click { selector, x, y } => vec![PageEvent::Click {
                target: find(page, selector)?,
                x: *x,
                y: *y,
            }],
            Self::Hover { selector } => vec![PageEvent::PointerEnter {
                target: find(page, selector)?,
            }],
            Self::Leave { selector } => vec![PageEvent::PointerLeave {
                target: find(page, selector)?,
            }],
            Self::TouchStart { selector, x, y } => vec![PageEvent::TouchStart {
                target: find(page, selector)?,
                x: *x,
                y: *y,
            }],
            Self::TouchEnd { selector, x, y } => vec![PageEvent::TouchEnd {
                target: find(page, selector)?,
                x: *x,
                y: *y,
            }],
            Self::Key { key, ctrl } => vec![PageEvent::KeyDown {
                key: Key::from_dom(key),
                ctrl: *ctrl,
            }],
            Self::PointerDown => vec![PageEvent::PointerDown],
            Self::Focus { selector } => vec![PageEvent::Focus {
                target: find(page, selector)?,
            }],
            Self::Blur { selector } => vec![PageEvent::Blur {
                target: find(page, selector)?,
            }],
            Self::Type { selector, value } => {
                let target = find(page, selector)?;
                page.set_value(target, value);
                Vec::new()
            },
            Self::Hide => vec![PageEvent::VisibilityChange { hidden: true }],
            Self::Show => vec![PageEvent::VisibilityChange { hidden: false }],
            Self::ImageLoaded { selector } => vec![PageEvent::ImageLoaded {
                target: find(page, selector)?,
            }],
            Self::ImageFailed { selector } => vec![PageEvent::ImageFailed {
                target: find(page, selector)?,
            }],
        };
        Ok(events)
    }
}

impl Script {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        let script = Self::from_toml(&text)?;
        log::info!("Loaded {} steps from {}", script.steps.len(), path.display());
        Ok(script)
    }

    /// The built-in tour of the demo page.
    pub fn demo() -> Result<Self> {
        Self::from_toml(DEMO_SCRIPT)
    }

    /// Drive `site` frame by frame until `duration_ms`.
    ///
    /// Each frame fires the steps that are due, advances any smooth scroll
    /// (dispatching a scroll event when the window moved), then ticks.
    pub fn replay(&self, site: &mut Site, page: &mut HeadlessPage) -> Result<ReplayStats> {
        let mut steps = self.steps.clone();
        steps.sort_by_key(|s| s.at_ms);
        let mut pending = steps.iter().peekable();
        let mut stats = ReplayStats::default();
        let mut now = 0;

        loop {
            while let Some(step) = pending.next_if(|s| s.at_ms <= now) {
                log::debug!("t={now}: {:?}", step.action);
                for event in step.action.perform(page)? {
                    stats.events += 1;
                    if site.handle_event(&event, now, page) {
                        stats.prevented += 1;
                    }
                }
            }
            if page.advance_scroll() {
                site.handle_event(&PageEvent::Scroll, now, page);
            }
            site.tick(now, page);
            stats.frames += 1;

            if now >= self.duration_ms {
                break;
            }
            now = (now + FRAME_MS).min(self.duration_ms);
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrin_core::config::SiteConfig;
    use vitrin_core::ui::headless::demo_page;

    fn run(text: &str) -> (HeadlessPage, Site, ReplayStats) {
        let mut page = demo_page();
        let mut site = Site::new(SiteConfig::default(), &mut page);
        site.init(0, &mut page);
        let stats = Script::from_toml(text)
            .unwrap()
            .replay(&mut site, &mut page)
            .unwrap();
        (page, site, stats)
    }

    #[test]
    fn demo_script_parses() {
        let script = Script::demo().unwrap();
        assert!(!script.steps.is_empty());
        assert!(script.steps.iter().all(|s| s.at_ms <= script.duration_ms));
    }

    #[test]
    fn step_fields_flatten_into_action() {
        let script = Script::from_toml(
            r#"
            duration_ms = 100

            [[step]]
            at_ms = 10
            action = "scroll_to"
            y = 400

            [[step]]
            at_ms = 20
            action = "key"
            key = "e"
            ctrl = true

            [[step]]
            at_ms = 30
            action = "hide"
            "#,
        )
        .unwrap();
        assert_eq!(script.steps[0].action, Action::ScrollTo {
            y: 400.0,
            smooth: false
        });
        assert_eq!(script.steps[1].action, Action::Key {
            key: "e".into(),
            ctrl: true
        });
        assert_eq!(script.steps[2].action, Action::Hide);
    }

    #[test]
    fn frames_cover_the_whole_duration() {
        let (_, _, stats) = run("duration_ms = 160\n");
        assert_eq!(stats.frames, 11);
        let (_, _, stats) = run("duration_ms = 0\n");
        assert_eq!(stats.frames, 1);
    }

    #[test]
    fn anchor_click_smooth_scrolls_to_section() {
        let (page, site, stats) = run(
            r##"
            duration_ms = 1000

            [[step]]
            at_ms = 100
            action = "click"
            selector = '.nav-link[href="#about"]'
            "##,
        );
        assert_eq!(stats.prevented, 1);
        assert_eq!(page.viewport().scroll_y, 820.0);
        assert!(!page.is_smooth_scrolling());
        assert!(site.nav().is_scrolled());
    }

    #[test]
    fn steps_run_in_time_order() {
        let (_, site, stats) = run(
            r##"
            duration_ms = 2000

            [[step]]
            at_ms = 1500
            action = "click"
            selector = "#heroPrev"

            [[step]]
            at_ms = 100
            action = "click"
            selector = "#heroNext"
            "##,
        );
        assert_eq!(stats.events, 2);
        // Next on the first frame after 100 ms; the lock is gone by 1500 ms.
        assert_eq!(site.hero().current(), 0);
    }

    #[test]
    fn unknown_selector_fails() {
        let mut page = demo_page();
        let mut site = Site::new(SiteConfig::default(), &mut page);
        site.init(0, &mut page);
        let script = Script::from_toml(
            "duration_ms = 100\n[[step]]\nat_ms = 0\naction = \"click\"\nselector = \"#missing\"\n",
        )
        .unwrap();
        let err = script.replay(&mut site, &mut page).unwrap_err();
        assert!(err.to_string().contains("#missing"));
    }
}
