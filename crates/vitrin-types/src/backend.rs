//! Page backend trait.
//!
//! Every environment implements this trait. The controllers reach the page
//! only through it -- they never call browser APIs directly. Selectors are
//! plain CSS selector strings; backends must at least understand `#id`,
//! `.class`, `tag`, `[attr]`, `[attr*="text"]`, compounds of those
//! (`img[data-src]`) and comma-separated lists.

use crate::error::Result;
use crate::geometry::{ElementId, Location, Rect, Viewport, Visibility};

/// Narrow DOM interface consumed by the controllers.
pub trait PageBackend {
    // -- Queries --

    /// First element matching `selector` in document order.
    fn query(&mut self, selector: &str) -> Option<ElementId>;

    /// All elements matching `selector` in document order.
    fn query_all(&mut self, selector: &str) -> Vec<ElementId>;

    /// First descendant of `parent` matching `selector`.
    fn query_within(&mut self, parent: ElementId, selector: &str) -> Option<ElementId>;

    /// Parent element, `None` for the root or detached elements.
    fn parent(&mut self, el: ElementId) -> Option<ElementId>;

    // -- Attributes, classes, styles, text --

    fn attribute(&self, el: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) -> Result<()>;

    fn remove_attribute(&mut self, el: ElementId, name: &str) -> Result<()>;

    fn has_class(&self, el: ElementId, class: &str) -> bool;

    /// Add (`on == true`) or remove a class. Idempotent.
    fn set_class(&mut self, el: ElementId, class: &str, on: bool) -> Result<()>;

    /// Set an inline style property. An empty `value` clears it.
    fn set_style(&mut self, el: ElementId, property: &str, value: &str) -> Result<()>;

    /// Computed opacity / visibility after all stylesheets apply.
    fn computed_visibility(&self, el: ElementId) -> Visibility;

    fn text(&self, el: ElementId) -> String;

    fn set_text(&mut self, el: ElementId, text: &str) -> Result<()>;

    /// Current value of a form field (empty for non-fields).
    fn value(&self, el: ElementId) -> String;

    // -- Geometry --

    /// Bounding box relative to the viewport.
    fn rect(&self, el: ElementId) -> Rect;

    /// Distance from the document top (`offsetTop`).
    fn offset_top(&self, el: ElementId) -> f32;

    /// Rendered height (`offsetHeight`).
    fn offset_height(&self, el: ElementId) -> f32;

    fn viewport(&self) -> Viewport;

    // -- Tree mutation --

    /// Append a new `tag` element with `class` to `parent`.
    fn create_child(&mut self, parent: ElementId, tag: &str, class: &str) -> Result<ElementId>;

    /// Detach an element. Removing an already-removed element is a no-op.
    fn remove(&mut self, el: ElementId) -> Result<()>;

    /// Install a stylesheet once. Later calls with the same `id` are no-ops.
    fn add_stylesheet(&mut self, id: &str, css: &str) -> Result<()>;

    // -- Window --

    /// Scroll the window so its offset becomes `top`.
    fn scroll_to(&mut self, top: f32, smooth: bool) -> Result<()>;

    fn location(&self) -> Location;

    /// Warm the cache for `src`; completion is not reported.
    fn preload_image(&mut self, src: &str) -> Result<()>;

    /// Start fetching `src` for `el`. Completion arrives later as
    /// [`crate::input::PageEvent::ImageLoaded`] or `ImageFailed`.
    fn load_image(&mut self, el: ElementId, src: &str) -> Result<()>;

    /// Activate an element as if clicked by the user.
    fn click(&mut self, el: ElementId) -> Result<()>;
}
