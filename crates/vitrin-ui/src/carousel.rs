//! Slide carousel controller.
//!
//! One type drives both the hero slider (stacked slides, `active` class,
//! indicator dots, background images) and the products slider (slides on a
//! track shifted with `translateX`, paused while mostly off-screen). The
//! differences live in [`CarouselConfig`].
//!
//! Timing is one [`Timer`] per concern: the autoplay interval, the
//! transition lock release, and the delayed resume after a touch gesture.

use serde::Serialize;

use vitrin_types::backend::PageBackend;
use vitrin_types::config::{CarouselConfig, SlideStyle};
use vitrin_types::error::Result;
use vitrin_types::geometry::ElementId;
use vitrin_types::input::{Key, PageEvent};

use crate::timer::Timer;
use crate::timing::is_in_viewport;
use crate::tree::is_within;
use crate::visibility::VisibilityObserver;

/// Serializable view of a carousel's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselSnapshot {
    pub name: String,
    pub slides: usize,
    pub current: usize,
    pub transitioning: bool,
    pub paused: bool,
    pub autoplay: bool,
}

/// Index of the slide after `current`, wrapping to the start.
pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + 1) % len }
}

/// Index of the slide before `current`, wrapping to the end.
pub fn previous_index(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + len - 1) % len }
}

/// Horizontal swipe direction, if the gesture qualifies.
///
/// `dx` is start minus end, so a positive value is a swipe to the left.
/// Returns `Some(true)` for "next", `Some(false)` for "previous".
pub fn swipe_direction(dx: f32, dy: f32, threshold: f32) -> Option<bool> {
    if dx.abs() > threshold && dx.abs() >= dy.abs() {
        Some(dx > 0.0)
    } else {
        None
    }
}

pub struct Carousel {
    config: CarouselConfig,
    root: Option<ElementId>,
    slides: Vec<ElementId>,
    indicators: Vec<ElementId>,
    prev_button: Option<ElementId>,
    next_button: Option<ElementId>,
    track: Option<ElementId>,
    current: usize,
    transitioning: bool,
    paused: bool,
    autoplay_enabled: bool,
    autoplay: Timer,
    unlock: Timer,
    touch_resume: Timer,
    touch_start: Option<(f32, f32)>,
    visibility: Option<VisibilityObserver>,
    initialized: bool,
    destroyed: bool,
}

impl Carousel {
    /// Capture the carousel's elements from the page.
    pub fn new(config: CarouselConfig, backend: &mut dyn PageBackend) -> Self {
        let root = backend.query(&config.root_selector);
        let mut carousel = Self {
            root,
            slides: Vec::new(),
            indicators: Vec::new(),
            prev_button: None,
            next_button: None,
            track: None,
            current: 0,
            transitioning: false,
            paused: false,
            autoplay_enabled: config.autoplay,
            autoplay: Timer::idle(),
            unlock: Timer::idle(),
            touch_resume: Timer::idle(),
            touch_start: None,
            visibility: None,
            initialized: false,
            destroyed: false,
            config,
        };
        if root.is_none() {
            log::debug!("{}: root {} not found", carousel.config.name, carousel.config.root_selector);
            return carousel;
        }
        let config = &carousel.config;
        carousel.slides = backend.query_all(&config.slide_selector);
        carousel.indicators = config
            .indicator_selector
            .as_deref()
            .map(|s| backend.query_all(s))
            .unwrap_or_default();
        carousel.prev_button = config.prev_selector.as_deref().and_then(|s| backend.query(s));
        carousel.next_button = config.next_selector.as_deref().and_then(|s| backend.query(s));
        carousel.track = config.track_selector.as_deref().and_then(|s| backend.query(s));
        if config.style == SlideStyle::Translate && carousel.track.is_none() {
            log::warn!("{}: no track element, slides will not move", config.name);
        }
        carousel
    }

    /// Whether the carousel has something to drive.
    pub fn is_active(&self) -> bool {
        self.root.is_some() && !self.slides.is_empty() && !self.destroyed
    }

    /// Prepare slides and start autoplay. Runs once; later calls are no-ops.
    pub fn init(&mut self, now_ms: u64, backend: &mut dyn PageBackend) -> Result<()> {
        if !self.is_active() || self.initialized {
            return Ok(());
        }
        self.initialized = true;

        if self.config.apply_backgrounds {
            for &slide in &self.slides {
                if let Some(bg) = backend.attribute(slide, "data-bg") {
                    backend.set_style(slide, "background-image", &format!("url({bg})"))?;
                    backend.preload_image(&bg)?;
                }
            }
        }

        self.current = 0;
        for (i, &slide) in self.slides.iter().enumerate() {
            backend.set_class(slide, "active", i == 0)?;
        }
        for (i, &dot) in self.indicators.iter().enumerate() {
            backend.set_class(dot, "active", i == 0)?;
        }

        self.restart_autoplay(now_ms);

        if let (Some(observe), Some(root)) = (self.config.visibility_pause, self.root) {
            let mut observer = VisibilityObserver::new(observe);
            observer.observe(root);
            self.visibility = Some(observer);
            self.refresh_visibility(backend);
        }

        log::info!(
            "{}: {} slides, autoplay {}",
            self.config.name,
            self.slides.len(),
            if self.autoplay_enabled { "on" } else { "off" }
        );
        Ok(())
    }

    /// Show slide `index`. Returns whether the slide changed.
    ///
    /// Rejected while the transition lock is held, for out-of-range
    /// indices, and for the current slide.
    pub fn go_to(&mut self, now_ms: u64, index: usize, backend: &mut dyn PageBackend) -> Result<bool> {
        if !self.is_active()
            || index >= self.slides.len()
            || self.transitioning
            || index == self.current
        {
            return Ok(false);
        }
        let track = match (self.config.style, self.track) {
            (SlideStyle::Translate, None) => return Ok(false),
            (_, track) => track,
        };

        backend.set_class(self.slides[self.current], "active", false)?;
        backend.set_class(self.slides[index], "active", true)?;
        if let Some(&dot) = self.indicators.get(self.current) {
            backend.set_class(dot, "active", false)?;
        }
        if let Some(&dot) = self.indicators.get(index) {
            backend.set_class(dot, "active", true)?;
        }
        if self.config.style == SlideStyle::Translate
            && let Some(track) = track
        {
            let offset = -(index as i64) * 100;
            backend.set_style(track, "transform", &format!("translateX({offset}%)"))?;
        }

        log::debug!("{}: slide {} -> {}", self.config.name, self.current, index);
        self.current = index;
        self.transitioning = true;
        self.unlock.start_once(now_ms, self.config.transition_ms);
        self.restart_autoplay(now_ms);
        Ok(true)
    }

    pub fn next(&mut self, now_ms: u64, backend: &mut dyn PageBackend) -> Result<bool> {
        let index = next_index(self.current, self.slides.len());
        self.go_to(now_ms, index, backend)
    }

    pub fn previous(&mut self, now_ms: u64, backend: &mut dyn PageBackend) -> Result<bool> {
        let index = previous_index(self.current, self.slides.len());
        self.go_to(now_ms, index, backend)
    }

    /// Turn autoplay on (restarting the interval) or off (cancelling it).
    pub fn set_autoplay(&mut self, now_ms: u64, enabled: bool) {
        if self.destroyed {
            return;
        }
        self.autoplay_enabled = enabled;
        self.restart_autoplay(now_ms);
    }

    pub fn pause(&mut self) {
        if !self.destroyed {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if !self.destroyed {
            self.paused = false;
        }
    }

    fn restart_autoplay(&mut self, now_ms: u64) {
        self.autoplay.cancel();
        if self.autoplay_enabled && self.initialized && !self.slides.is_empty() {
            self.autoplay.start_repeating(now_ms, self.config.interval_ms);
        }
    }

    /// Advance timers: lock release, delayed touch resume, autoplay.
    pub fn tick(&mut self, now_ms: u64, backend: &mut dyn PageBackend) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        if self.unlock.fire(now_ms) {
            self.transitioning = false;
        }
        if self.touch_resume.fire(now_ms) {
            self.paused = false;
        }
        if self.autoplay.fire(now_ms) {
            let skip = self.config.skip_tick_while_transitioning && self.transitioning;
            if !self.paused && !skip {
                self.next(now_ms, backend)?;
            }
        }
        Ok(())
    }

    /// Re-measure the root against the pause threshold, if configured.
    pub fn refresh_visibility(&mut self, backend: &dyn PageBackend) {
        if self.destroyed {
            return;
        }
        let Some(observer) = self.visibility.as_mut() else {
            return;
        };
        for change in observer.check(backend) {
            log::debug!(
                "{}: {} (ratio {:.2})",
                self.config.name,
                if change.visible { "visible" } else { "off-screen" },
                change.ratio
            );
            self.paused = !change.visible;
        }
    }

    pub fn handle_event(
        &mut self,
        event: &PageEvent,
        now_ms: u64,
        backend: &mut dyn PageBackend,
    ) -> Result<()> {
        if !self.is_active() || !self.initialized {
            return Ok(());
        }
        let Some(root) = self.root else {
            return Ok(());
        };
        match *event {
            PageEvent::PointerEnter { target } if target == root => self.paused = true,
            PageEvent::PointerLeave { target } if target == root => self.paused = false,
            PageEvent::Click { target, .. } => self.handle_click(target, now_ms, backend)?,
            PageEvent::TouchStart { target, x, y } if is_within(backend, root, target) => {
                self.touch_start = Some((x, y));
                self.touch_resume.cancel();
                self.paused = true;
            },
            PageEvent::TouchEnd { x, y, .. } => {
                if let Some((start_x, start_y)) = self.touch_start.take() {
                    match swipe_direction(start_x - x, start_y - y, self.config.swipe_threshold_px) {
                        Some(true) => {
                            self.next(now_ms, backend)?;
                        },
                        Some(false) => {
                            self.previous(now_ms, backend)?;
                        },
                        None => {},
                    }
                    self.touch_resume.start_once(now_ms, self.config.touch_resume_ms);
                }
            },
            PageEvent::KeyDown {
                key: key @ (Key::ArrowLeft | Key::ArrowRight),
                ..
            } => {
                if self.accepts_keys(backend) {
                    if key == Key::ArrowLeft {
                        self.previous(now_ms, backend)?;
                    } else {
                        self.next(now_ms, backend)?;
                    }
                }
            },
            PageEvent::VisibilityChange { hidden } => self.paused = hidden,
            PageEvent::Scroll => self.refresh_visibility(backend),
            _ => {},
        }
        Ok(())
    }

    fn handle_click(
        &mut self,
        target: ElementId,
        now_ms: u64,
        backend: &mut dyn PageBackend,
    ) -> Result<()> {
        if let Some(prev) = self.prev_button
            && is_within(backend, prev, target)
        {
            self.previous(now_ms, backend)?;
            return Ok(());
        }
        if let Some(next) = self.next_button
            && is_within(backend, next, target)
        {
            self.next(now_ms, backend)?;
            return Ok(());
        }
        let dots = self.indicators.clone();
        if let Some(i) = dots.iter().position(|&dot| is_within(backend, dot, target)) {
            self.go_to(now_ms, i, backend)?;
        }
        Ok(())
    }

    /// Arrow keys only act while the root is near the viewport.
    pub fn accepts_keys(&self, backend: &dyn PageBackend) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        is_in_viewport(
            backend.rect(root),
            backend.viewport().height,
            self.config.keyboard_margin_px,
        )
    }

    /// Cancel every timer and stop reacting to anything.
    pub fn destroy(&mut self) {
        self.autoplay.cancel();
        self.unlock.cancel();
        self.touch_resume.cancel();
        if let Some(observer) = self.visibility.as_mut() {
            observer.disconnect();
        }
        self.touch_start = None;
        self.paused = true;
        self.destroyed = true;
    }

    // -- Accessors --

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    pub fn slides(&self) -> &[ElementId] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay_enabled
    }

    /// Whether the autoplay interval is currently armed.
    pub fn autoplay_running(&self) -> bool {
        self.autoplay.is_armed()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            name: self.config.name.clone(),
            slides: self.slides.len(),
            current: self.current,
            transitioning: self.transitioning,
            paused: self.paused,
            autoplay: self.autoplay.is_armed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{ElementSpec, HeadlessPage, demo_page};
    use crate::test_utils::{RecordingPage, active_slides, hero, products};

    fn click(target: ElementId) -> PageEvent {
        PageEvent::Click {
            target,
            x: 0.0,
            y: 0.0,
        }
    }

    fn swipe(c: &mut Carousel, page: &mut HeadlessPage, now: u64, dx: f32, dy: f32) {
        let root = c.root().unwrap();
        c.handle_event(
            &PageEvent::TouchStart {
                target: root,
                x: 300.0,
                y: 300.0,
            },
            now,
            page,
        )
        .unwrap();
        c.handle_event(
            &PageEvent::TouchEnd {
                target: root,
                x: 300.0 - dx,
                y: 300.0 - dy,
            },
            now + 50,
            page,
        )
        .unwrap();
    }

    #[test]
    fn index_wrapping() {
        assert_eq!(next_index(2, 3), 0);
        assert_eq!(previous_index(0, 3), 2);
        assert_eq!(next_index(0, 1), 0);
        assert_eq!(previous_index(0, 1), 0);
        assert_eq!(next_index(0, 0), 0);
    }

    #[test]
    fn swipe_rules() {
        assert_eq!(swipe_direction(60.0, 0.0, 50.0), Some(true));
        assert_eq!(swipe_direction(-60.0, 10.0, 50.0), Some(false));
        assert_eq!(swipe_direction(40.0, 0.0, 50.0), None);
        assert_eq!(swipe_direction(50.0, 0.0, 50.0), None);
        // Vertical-dominant scroll gesture.
        assert_eq!(swipe_direction(60.0, 200.0, 50.0), None);
    }

    #[test]
    fn init_prepares_hero() {
        let (mut page, c) = hero();
        assert!(c.is_active());
        assert_eq!(c.len(), 3);
        assert_eq!(c.current(), 0);
        assert!(c.autoplay_running());
        assert_eq!(page.preloaded().len(), 3);
        let first = c.slides()[0];
        assert_eq!(
            page.style(first, "background-image"),
            Some("url(img/hero-1.jpg)")
        );
        assert_eq!(active_slides(&page, &c), vec![0]);
        let dots = page.query_all(".hero-indicator");
        assert!(page.has_class(dots[0], "active"));
    }

    #[test]
    fn go_to_moves_active_marker_and_indicator() {
        let (mut page, mut c) = hero();
        assert!(c.go_to(100, 2, &mut page).unwrap());
        assert_eq!(c.current(), 2);
        assert!(c.is_transitioning());
        assert_eq!(active_slides(&page, &c), vec![2]);
        let dots = page.query_all(".hero-indicator");
        assert!(!page.has_class(dots[0], "active"));
        assert!(page.has_class(dots[2], "active"));
    }

    #[test]
    fn go_to_current_changes_nothing() {
        let (page, mut c) = hero();
        let mut rec = RecordingPage::new(page);
        let before = c.snapshot();
        assert!(!c.go_to(100, 0, &mut rec).unwrap());
        assert_eq!(c.snapshot(), before);
        assert!(rec.mutations.is_empty());
    }

    #[test]
    fn out_of_range_rejected() {
        let (mut page, mut c) = hero();
        assert!(!c.go_to(100, 3, &mut page).unwrap());
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn lock_rejects_until_transition_ends() {
        let (mut page, mut c) = hero();
        assert!(c.go_to(0, 1, &mut page).unwrap());
        assert!(!c.go_to(500, 2, &mut page).unwrap());
        assert_eq!(c.current(), 1);
        c.tick(999, &mut page).unwrap();
        assert!(c.is_transitioning());
        c.tick(1000, &mut page).unwrap();
        assert!(!c.is_transitioning());
        assert!(c.go_to(1000, 2, &mut page).unwrap());
    }

    #[test]
    fn next_len_times_returns_to_start() {
        let (mut page, mut c) = hero();
        let mut now = 0;
        for _ in 0..c.len() {
            assert!(c.next(now, &mut page).unwrap());
            now += 1000;
            c.tick(now, &mut page).unwrap();
        }
        assert_eq!(c.current(), 0);
        assert_eq!(active_slides(&page, &c), vec![0]);
    }

    #[test]
    fn previous_wraps_to_last() {
        let (mut page, mut c) = hero();
        let prev = page.query("#heroPrev").unwrap();
        c.handle_event(&click(prev), 10, &mut page).unwrap();
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn indicator_click_jumps() {
        let (mut page, mut c) = hero();
        let dots = page.query_all(".hero-indicator");
        c.handle_event(&click(dots[1]), 10, &mut page).unwrap();
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn autoplay_advances_on_interval() {
        let (mut page, mut c) = hero();
        c.tick(7999, &mut page).unwrap();
        assert_eq!(c.current(), 0);
        c.tick(8000, &mut page).unwrap();
        assert_eq!(c.current(), 1);
        c.tick(9000, &mut page).unwrap();
        c.tick(16_000, &mut page).unwrap();
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn manual_transition_restarts_interval() {
        let (mut page, mut c) = hero();
        // User moves at 6 s; the next automatic advance is at 14 s, not 8 s.
        c.go_to(6000, 1, &mut page).unwrap();
        c.tick(8000, &mut page).unwrap();
        assert_eq!(c.current(), 1);
        c.tick(13_999, &mut page).unwrap();
        assert_eq!(c.current(), 1);
        c.tick(14_000, &mut page).unwrap();
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn hover_pauses_autoplay_without_stopping_timer() {
        let (mut page, mut c) = hero();
        let root = c.root().unwrap();
        c.handle_event(&PageEvent::PointerEnter { target: root }, 100, &mut page)
            .unwrap();
        c.tick(8000, &mut page).unwrap();
        assert_eq!(c.current(), 0);
        assert!(c.autoplay_running());
        c.handle_event(&PageEvent::PointerLeave { target: root }, 9000, &mut page)
            .unwrap();
        c.tick(16_000, &mut page).unwrap();
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn disabling_autoplay_cancels_timer() {
        let (mut page, mut c) = hero();
        c.set_autoplay(100, false);
        assert!(!c.autoplay_running());
        c.tick(100_000, &mut page).unwrap();
        assert_eq!(c.current(), 0);
        // Manual navigation does not re-arm it.
        c.next(100_000, &mut page).unwrap();
        assert!(!c.autoplay_running());
        c.set_autoplay(200_000, true);
        assert!(c.autoplay_running());
    }

    #[test]
    fn hidden_tab_pauses() {
        let (mut page, mut c) = hero();
        c.handle_event(&PageEvent::VisibilityChange { hidden: true }, 10, &mut page)
            .unwrap();
        assert!(c.is_paused());
        c.handle_event(&PageEvent::VisibilityChange { hidden: false }, 20, &mut page)
            .unwrap();
        assert!(!c.is_paused());
    }

    #[test]
    fn short_swipe_ignored_long_swipe_moves_once() {
        let (mut page, mut c) = hero();
        swipe(&mut c, &mut page, 100, 40.0, 0.0);
        assert_eq!(c.current(), 0);
        swipe(&mut c, &mut page, 200, 60.0, 0.0);
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn swipe_right_goes_back() {
        let (mut page, mut c) = hero();
        swipe(&mut c, &mut page, 100, -80.0, 5.0);
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn touch_resume_is_delayed() {
        let (mut page, mut c) = hero();
        swipe(&mut c, &mut page, 100, 10.0, 0.0);
        assert!(c.is_paused());
        c.tick(1149, &mut page).unwrap();
        assert!(c.is_paused());
        c.tick(1150, &mut page).unwrap();
        assert!(!c.is_paused());
    }

    #[test]
    fn new_touch_cancels_pending_resume() {
        let (mut page, mut c) = hero();
        swipe(&mut c, &mut page, 100, 10.0, 0.0);
        let root = c.root().unwrap();
        c.handle_event(
            &PageEvent::TouchStart {
                target: root,
                x: 0.0,
                y: 0.0,
            },
            600,
            &mut page,
        )
        .unwrap();
        c.tick(2000, &mut page).unwrap();
        assert!(c.is_paused());
    }

    #[test]
    fn arrow_keys_need_root_near_viewport() {
        let (mut page, mut c) = hero();
        let right = PageEvent::KeyDown {
            key: Key::ArrowRight,
            ctrl: false,
        };
        c.handle_event(&right, 10, &mut page).unwrap();
        assert_eq!(c.current(), 1);

        page.set_scroll(1000.0);
        c.tick(5000, &mut page).unwrap();
        c.handle_event(&right, 5000, &mut page).unwrap();
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn products_translate_track() {
        let (mut page, mut c) = products();
        page.set_scroll(1900.0);
        c.handle_event(&PageEvent::Scroll, 0, &mut page).unwrap();
        assert!(c.next(10, &mut page).unwrap());
        let track = page.query(".products-slider").unwrap();
        assert_eq!(page.style(track, "transform"), Some("translateX(-100%)"));
        c.tick(510, &mut page).unwrap();
        c.previous(510, &mut page).unwrap();
        assert_eq!(page.style(track, "transform"), Some("translateX(0%)"));
    }

    #[test]
    fn products_pause_while_off_screen() {
        let (mut page, mut c) = products();
        // Demo page starts at the top, far above the products slider.
        assert!(c.is_paused());
        c.tick(5000, &mut page).unwrap();
        assert_eq!(c.current(), 0);

        page.set_scroll(1900.0);
        c.handle_event(&PageEvent::Scroll, 5100, &mut page).unwrap();
        assert!(!c.is_paused());
        c.tick(10_000, &mut page).unwrap();
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn products_without_track_never_moves() {
        let mut page = HeadlessPage::new(1280.0, 900.0);
        let body = page.body();
        let mut container = ElementSpec::new("div")
            .class("products-slider-container")
            .rect(0.0, 0.0, 1280.0, 600.0);
        for _ in 0..3 {
            container = container.child(ElementSpec::new("div").class("products-slide"));
        }
        page.append(body, container);
        let mut c = Carousel::new(CarouselConfig::products(), &mut page);
        c.init(0, &mut page).unwrap();
        assert!(!c.next(10, &mut page).unwrap());
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn products_skip_tick_inside_lock() {
        let config = CarouselConfig {
            interval_ms: 300,
            visibility_pause: None,
            ..CarouselConfig::products()
        };
        let mut page = demo_page();
        let mut c = Carousel::new(config, &mut page);
        c.init(0, &mut page).unwrap();
        c.tick(300, &mut page).unwrap();
        assert_eq!(c.current(), 1);
        // Lock held until 800, tick at 600 is skipped.
        c.tick(600, &mut page).unwrap();
        assert_eq!(c.current(), 1);
        c.tick(900, &mut page).unwrap();
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn missing_root_is_noop() {
        let mut page = HeadlessPage::new(1280.0, 900.0);
        let mut c = Carousel::new(CarouselConfig::hero(), &mut page);
        assert!(!c.is_active());
        c.init(0, &mut page).unwrap();
        assert!(!c.next(0, &mut page).unwrap());
        c.tick(100_000, &mut page).unwrap();
        assert!(!c.autoplay_running());
    }

    #[test]
    fn single_slide_never_changes() {
        let mut page = HeadlessPage::new(1280.0, 900.0);
        let body = page.body();
        page.append(
            body,
            ElementSpec::new("section")
                .class("hero-section")
                .rect(0.0, 0.0, 1280.0, 900.0)
                .child(ElementSpec::new("div").class("hero-slide")),
        );
        let mut c = Carousel::new(CarouselConfig::hero(), &mut page);
        c.init(0, &mut page).unwrap();
        assert!(!c.next(0, &mut page).unwrap());
        assert!(!c.previous(0, &mut page).unwrap());
        c.tick(80_000, &mut page).unwrap();
        assert_eq!(c.current(), 0);
        assert_eq!(active_slides(&page, &c), vec![0]);
    }

    #[test]
    fn missing_buttons_drop_only_that_affordance() {
        let mut page = HeadlessPage::new(1280.0, 900.0);
        let body = page.body();
        let mut section = ElementSpec::new("section")
            .class("hero-section")
            .rect(0.0, 0.0, 1280.0, 900.0);
        for _ in 0..2 {
            section = section.child(ElementSpec::new("div").class("hero-slide"));
        }
        page.append(body, section);
        let mut c = Carousel::new(CarouselConfig::hero(), &mut page);
        c.init(0, &mut page).unwrap();
        let root = c.root().unwrap();
        c.handle_event(&click(root), 5, &mut page).unwrap();
        assert_eq!(c.current(), 0);
        c.tick(8000, &mut page).unwrap();
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn destroy_stops_all_mutation() {
        let (page, mut c) = hero();
        let mut rec = RecordingPage::new(page);
        c.go_to(0, 1, &mut rec).unwrap();
        rec.mutations.clear();
        c.destroy();
        let before = c.snapshot();
        let root = c.root().unwrap();
        let mut now = 0;
        while now < 100_000 {
            now += 500;
            c.tick(now, &mut rec).unwrap();
        }
        c.handle_event(&PageEvent::PointerLeave { target: root }, now, &mut rec)
            .unwrap();
        c.set_autoplay(now, true);
        assert!(!c.next(now, &mut rec).unwrap());
        assert_eq!(c.snapshot(), before);
        assert!(!c.autoplay_running());
        assert!(rec.mutations.is_empty());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Next,
            Previous,
            GoTo(usize),
            Wait(u64),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                Just(Op::Next),
                Just(Op::Previous),
                (0usize..5).prop_map(Op::GoTo),
                (0u64..3000).prop_map(Op::Wait),
            ]
        }

        proptest! {
            #[test]
            fn exactly_one_active_slide(ops in proptest::collection::vec(op(), 0..40)) {
                let (mut page, mut c) = hero();
                let mut now = 0;
                for op in ops {
                    match op {
                        Op::Next => { c.next(now, &mut page).unwrap(); },
                        Op::Previous => { c.previous(now, &mut page).unwrap(); },
                        Op::GoTo(i) => { c.go_to(now, i, &mut page).unwrap(); },
                        Op::Wait(dt) => {
                            now += dt;
                            c.tick(now, &mut page).unwrap();
                        },
                    }
                    prop_assert!(c.current() < c.len());
                    prop_assert_eq!(active_slides(&page, &c), vec![c.current()]);
                }
            }

            #[test]
            fn rejected_while_locked(target in 0usize..3) {
                let (mut page, mut c) = hero();
                c.go_to(0, 1, &mut page).unwrap();
                let before = c.snapshot();
                prop_assert!(!c.go_to(10, target, &mut page).unwrap());
                prop_assert_eq!(c.snapshot(), before);
            }
        }
    }
}
