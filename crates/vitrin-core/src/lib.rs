//! vitrin core: the site's composition root.
//!
//! [`site::Site`] constructs every widget controller once against an
//! injected page backend, initializes them in a fixed order, routes page
//! events and clock ticks to them, and tears them down. This crate has no
//! platform dependencies; the browser binding and the simulator both drive
//! a `Site`.

// Re-exports from vitrin-types (foundation types and traits).
pub use vitrin_types::backend;
pub use vitrin_types::config;
pub use vitrin_types::error;
pub use vitrin_types::geometry;
pub use vitrin_types::input;

pub use vitrin_ui as ui;

pub mod devtools;
pub mod site;

pub use devtools::DevTools;
pub use site::{Site, SiteSnapshot};
