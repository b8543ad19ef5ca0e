//! Environment-agnostic page events.
//!
//! Every environment (browser binding, headless simulator) maps its native
//! events to these enums. Controllers never see raw DOM events.

use serde::{Deserialize, Serialize};

use crate::geometry::ElementId;

/// A page event delivered to the controllers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageEvent {
    /// The window scrolled. The new offset is read from the backend.
    Scroll,
    /// The window was resized.
    Resize,
    /// Pointer entered an element (`mouseenter`).
    PointerEnter { target: ElementId },
    /// Pointer left an element (`mouseleave`).
    PointerLeave { target: ElementId },
    /// Any pointer button went down anywhere on the page.
    PointerDown,
    /// Click on an element at viewport coordinates.
    Click { target: ElementId, x: f32, y: f32 },
    /// First touch point went down on an element.
    TouchStart { target: ElementId, x: f32, y: f32 },
    /// Last touch point lifted on an element.
    TouchEnd { target: ElementId, x: f32, y: f32 },
    /// Key pressed anywhere on the page.
    KeyDown {
        key: Key,
        #[serde(default)]
        ctrl: bool,
    },
    /// An element received focus.
    Focus { target: ElementId },
    /// An element lost focus.
    Blur { target: ElementId },
    /// The tab was hidden or shown again.
    VisibilityChange { hidden: bool },
    /// An image fetch started with `load_image` finished.
    ImageLoaded { target: ElementId },
    /// An image fetch started with `load_image` failed.
    ImageFailed { target: ElementId },
}

impl PageEvent {
    /// The element the event is aimed at, if any.
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Self::PointerEnter { target }
            | Self::PointerLeave { target }
            | Self::Click { target, .. }
            | Self::TouchStart { target, .. }
            | Self::TouchEnd { target, .. }
            | Self::Focus { target }
            | Self::Blur { target }
            | Self::ImageLoaded { target }
            | Self::ImageFailed { target } => Some(*target),
            _ => None,
        }
    }
}

/// Keys the controllers react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Tab,
    Enter,
    Escape,
    Char(char),
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Tab" => Self::Tab,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_key_names() {
        assert_eq!(Key::from_dom("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_dom("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_dom("Tab"), Key::Tab);
        assert_eq!(Key::from_dom("Esc"), Key::Escape);
        assert_eq!(Key::from_dom("e"), Key::Char('e'));
        assert_eq!(Key::from_dom("F5"), Key::Other);
        assert_eq!(Key::from_dom(""), Key::Other);
    }

    #[test]
    fn target_of_element_events() {
        let e = PageEvent::Click {
            target: ElementId(4),
            x: 1.0,
            y: 2.0,
        };
        assert_eq!(e.target(), Some(ElementId(4)));
        assert_eq!(PageEvent::Scroll.target(), None);
        assert_eq!(PageEvent::VisibilityChange { hidden: true }.target(), None);
    }

    #[test]
    fn tagged_serde_shape() {
        let json = r#"{"kind":"touch_end","target":3,"x":10.0,"y":5.0}"#;
        let e: PageEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            e,
            PageEvent::TouchEnd {
                target: ElementId(3),
                x: 10.0,
                y: 5.0
            }
        );
    }

    #[test]
    fn key_down_ctrl_defaults_off() {
        let e: PageEvent = serde_json::from_str(r#"{"kind":"key_down","key":"Tab"}"#).unwrap();
        assert_eq!(
            e,
            PageEvent::KeyDown {
                key: Key::Tab,
                ctrl: false
            }
        );
    }

    #[test]
    fn all_event_variants_distinct() {
        let t = ElementId(0);
        let events = vec![
            PageEvent::Scroll,
            PageEvent::Resize,
            PageEvent::PointerEnter { target: t },
            PageEvent::PointerLeave { target: t },
            PageEvent::PointerDown,
            PageEvent::Click {
                target: t,
                x: 0.0,
                y: 0.0,
            },
            PageEvent::TouchStart {
                target: t,
                x: 0.0,
                y: 0.0,
            },
            PageEvent::TouchEnd {
                target: t,
                x: 0.0,
                y: 0.0,
            },
            PageEvent::KeyDown {
                key: Key::Tab,
                ctrl: false,
            },
            PageEvent::Focus { target: t },
            PageEvent::Blur { target: t },
            PageEvent::VisibilityChange { hidden: false },
            PageEvent::ImageLoaded { target: t },
            PageEvent::ImageFailed { target: t },
        ];
        for (i, a) in events.iter().enumerate() {
            for (j, b) in events.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "variants {i} and {j} should differ");
                }
            }
        }
    }
}
