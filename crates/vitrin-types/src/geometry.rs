//! Element handles, geometry, and page identity.

use serde::{Deserialize, Serialize};

/// Opaque handle to an element, issued by the backend on query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

/// An axis-aligned box in CSS pixels.
///
/// Returned by [`crate::backend::PageBackend::rect`] relative to the
/// viewport (like `getBoundingClientRect`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Same box moved vertically by `dy`.
    pub fn offset_y(self, dy: f32) -> Self {
        Self {
            top: self.top + dy,
            ..self
        }
    }
}

/// Window scroll offset and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Vertical scroll offset (`window.pageYOffset`).
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

/// Where the page was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub host: String,
    pub path: String,
}

impl Location {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
        }
    }

    /// Last path segment, or `index.html` for a bare directory path.
    pub fn page(&self) -> &str {
        match self.path.rsplit('/').next() {
            Some(page) if !page.is_empty() => page,
            _ => "index.html",
        }
    }

    /// Whether the page is served from the local machine.
    pub fn is_loopback(&self) -> bool {
        self.host == "localhost" || self.host == "127.0.0.1"
    }
}

/// Computed visibility of an element, as far as the controllers care.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    pub opacity: f32,
    pub hidden: bool,
}

impl Visibility {
    pub const VISIBLE: Self = Self {
        opacity: 1.0,
        hidden: false,
    };

    /// Fully opaque and not `visibility: hidden`.
    pub fn is_fully_visible(&self) -> bool {
        self.opacity >= 1.0 && !self.hidden
    }
}
