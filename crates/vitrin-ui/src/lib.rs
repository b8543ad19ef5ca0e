//! vitrin-ui: the widget controllers behind the site's interactive parts.
//!
//! Each controller owns the elements it queried at construction and reaches
//! the page only through `PageBackend`. Time is always passed in as
//! `now_ms`, so every timing contract runs the same under a browser clock
//! and a simulated one.

pub mod carousel;
pub mod counter;
pub mod decorations;
pub mod fab;
pub mod headless;
pub mod nav;
pub mod timer;
pub mod timing;
pub mod tree;
pub mod visibility;

#[cfg(test)]
pub(crate) mod test_utils;

pub use carousel::Carousel;
pub use counter::CounterGroup;
pub use decorations::Interactions;
pub use fab::FloatingButton;
pub use headless::HeadlessPage;
pub use nav::ScrollWatcher;
pub use timer::Timer;
