//! Geometry-driven visibility observation.
//!
//! Works like an intersection observer with a single threshold: elements
//! are registered with [`VisibilityObserver::observe`], and each
//! [`VisibilityObserver::check`] (run on scroll and resize) reports the ones
//! whose visible/hidden state changed. The first check after `observe`
//! always reports, so callers learn the initial state.

use vitrin_types::backend::PageBackend;
use vitrin_types::config::ObserveConfig;
use vitrin_types::geometry::{ElementId, Rect};

/// A visibility change for one observed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub element: ElementId,
    pub visible: bool,
    /// Fraction of the element inside the (margin-adjusted) viewport.
    pub ratio: f32,
}

/// Fraction of `rect` inside the viewport after applying the root margins.
///
/// A zero-height element counts as fully visible when its top edge lies
/// inside the root.
pub fn intersection_ratio(rect: Rect, viewport_height: f32, observe: &ObserveConfig) -> f32 {
    let root_top = -observe.margin_top_px;
    let root_bottom = viewport_height + observe.margin_bottom_px;
    if rect.height <= 0.0 {
        return if rect.top >= root_top && rect.top <= root_bottom {
            1.0
        } else {
            0.0
        };
    }
    let overlap = rect.bottom().min(root_bottom) - rect.top.max(root_top);
    (overlap.max(0.0) / rect.height).min(1.0)
}

/// Whether `ratio` meets `threshold`. A zero threshold needs any overlap.
pub fn meets_threshold(ratio: f32, threshold: f32) -> bool {
    if threshold <= 0.0 {
        ratio > 0.0
    } else {
        ratio >= threshold
    }
}

#[derive(Debug, Clone, Copy)]
struct Target {
    element: ElementId,
    last: Option<bool>,
}

/// Tracks visible/hidden state for a set of elements.
#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    config: ObserveConfig,
    targets: Vec<Target>,
}

impl VisibilityObserver {
    pub fn new(config: ObserveConfig) -> Self {
        Self {
            config,
            targets: Vec::new(),
        }
    }

    /// Start watching `element`. Observing twice is a no-op.
    pub fn observe(&mut self, element: ElementId) {
        if !self.targets.iter().any(|t| t.element == element) {
            self.targets.push(Target {
                element,
                last: None,
            });
        }
    }

    pub fn unobserve(&mut self, element: ElementId) {
        self.targets.retain(|t| t.element != element);
    }

    pub fn disconnect(&mut self) {
        self.targets.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Re-measure every target and return the state changes.
    pub fn check(&mut self, backend: &dyn PageBackend) -> Vec<Observation> {
        let vh = backend.viewport().height;
        let mut changes = Vec::new();
        for target in &mut self.targets {
            let ratio = intersection_ratio(backend.rect(target.element), vh, &self.config);
            let visible = meets_threshold(ratio, self.config.threshold);
            if target.last != Some(visible) {
                target.last = Some(visible);
                changes.push(Observation {
                    element: target.element,
                    visible,
                    ratio,
                });
            }
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{ElementSpec, HeadlessPage};

    fn half() -> ObserveConfig {
        ObserveConfig {
            threshold: 0.5,
            ..ObserveConfig::default()
        }
    }

    #[test]
    fn ratio_fully_inside() {
        let r = Rect::new(0.0, 100.0, 10.0, 200.0);
        assert_eq!(intersection_ratio(r, 900.0, &ObserveConfig::default()), 1.0);
    }

    #[test]
    fn ratio_partially_below_fold() {
        let r = Rect::new(0.0, 800.0, 10.0, 400.0);
        assert_eq!(intersection_ratio(r, 900.0, &ObserveConfig::default()), 0.25);
    }

    #[test]
    fn negative_bottom_margin_shrinks_root() {
        let r = Rect::new(0.0, 800.0, 10.0, 400.0);
        let observe = ObserveConfig {
            margin_bottom_px: -50.0,
            ..ObserveConfig::default()
        };
        assert_eq!(intersection_ratio(r, 900.0, &observe), 0.125);
    }

    #[test]
    fn ratio_outside_is_zero() {
        let r = Rect::new(0.0, 1000.0, 10.0, 400.0);
        assert_eq!(intersection_ratio(r, 900.0, &ObserveConfig::default()), 0.0);
        let above = Rect::new(0.0, -500.0, 10.0, 400.0);
        assert_eq!(intersection_ratio(above, 900.0, &ObserveConfig::default()), 0.0);
    }

    #[test]
    fn zero_threshold_needs_overlap() {
        assert!(!meets_threshold(0.0, 0.0));
        assert!(meets_threshold(0.01, 0.0));
        assert!(meets_threshold(0.5, 0.5));
        assert!(!meets_threshold(0.49, 0.5));
    }

    #[test]
    fn reports_initial_state_then_only_changes() {
        let mut page = HeadlessPage::new(1280.0, 900.0);
        let body = page.body();
        let el = page.append(body, ElementSpec::new("div").rect(0.0, 1200.0, 100.0, 400.0));
        page.set_document_height(4000.0);

        let mut obs = VisibilityObserver::new(half());
        obs.observe(el);
        let first = obs.check(&page);
        assert_eq!(first.len(), 1);
        assert!(!first[0].visible);
        assert!(obs.check(&page).is_empty());

        page.set_scroll(600.0);
        let changes = obs.check(&page);
        assert_eq!(changes.len(), 1);
        assert!(changes[0].visible);
    }

    #[test]
    fn unobserve_stops_reports() {
        let mut page = HeadlessPage::new(1280.0, 900.0);
        let body = page.body();
        let el = page.append(body, ElementSpec::new("img").rect(0.0, 0.0, 100.0, 100.0));
        let mut obs = VisibilityObserver::new(ObserveConfig::default());
        obs.observe(el);
        obs.observe(el);
        assert_eq!(obs.len(), 1);
        obs.unobserve(el);
        assert!(obs.is_empty());
        assert!(obs.check(&page).is_empty());
    }
}
