//! Foundation types and traits for vitrin.
//!
//! This crate contains the environment-agnostic types shared by all vitrin
//! crates: page events, element handles and geometry, the `PageBackend`
//! trait every environment implements, site configuration, and errors.

pub mod backend;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
