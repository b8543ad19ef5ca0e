//! Small per-element interaction effects: click ripples, card hover, form
//! field state, lazy images, and keyboard-navigation accessibility.

use serde::Serialize;

use vitrin_types::backend::PageBackend;
use vitrin_types::config::{InteractionConfig, ObserveConfig};
use vitrin_types::error::Result;
use vitrin_types::geometry::{ElementId, Rect};
use vitrin_types::input::{Key, PageEvent};

use crate::timer::Timer;
use crate::tree::closest_of;
use crate::visibility::VisibilityObserver;

const RIPPLE_STYLESHEET_ID: &str = "ripple-keyframes";
const RIPPLE_KEYFRAMES: &str =
    "@keyframes ripple-animation { to { transform: scale(2); opacity: 0; } }";

/// Placement of a ripple circle inside its host, in host-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub size: f32,
    pub left: f32,
    pub top: f32,
}

/// A circle as large as the host's longer side, centered on the click.
pub fn ripple_geometry(host: Rect, click_x: f32, click_y: f32) -> RippleGeometry {
    let size = host.width.max(host.height);
    RippleGeometry {
        size,
        left: click_x - host.left - size / 2.0,
        top: click_y - host.top - size / 2.0,
    }
}

#[derive(Debug, Clone)]
struct Ripple {
    host: ElementId,
    element: ElementId,
    expiry: Timer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionSnapshot {
    pub keyboard_navigation: bool,
    pub ripples: usize,
    pub images_loading: usize,
    pub images_loaded: usize,
}

pub struct Interactions {
    config: InteractionConfig,
    body: Option<ElementId>,
    ripple_hosts: Vec<ElementId>,
    cards: Vec<(ElementId, Option<ElementId>)>,
    fields: Vec<ElementId>,
    focusables: Vec<ElementId>,
    lazy_images: VisibilityObserver,
    loading: Vec<(ElementId, String)>,
    loaded: usize,
    ripples: Vec<Ripple>,
    keyboard_navigation: bool,
    initialized: bool,
    destroyed: bool,
}

impl Interactions {
    pub fn new(config: InteractionConfig, backend: &mut dyn PageBackend) -> Self {
        let cards = backend
            .query_all(&config.card_selector)
            .into_iter()
            .map(|card| (card, backend.query_within(card, &config.card_icon_selector)))
            .collect();
        Self {
            body: backend.query("body"),
            ripple_hosts: backend.query_all(&config.ripple_selector),
            cards,
            fields: backend.query_all(&config.field_selector),
            focusables: backend.query_all(&config.focusable_selector),
            lazy_images: VisibilityObserver::new(ObserveConfig::default()),
            loading: Vec::new(),
            loaded: 0,
            ripples: Vec::new(),
            keyboard_navigation: false,
            initialized: false,
            destroyed: false,
            config,
        }
    }

    pub fn init(&mut self, backend: &mut dyn PageBackend) -> Result<()> {
        if self.initialized || self.destroyed {
            return Ok(());
        }
        self.initialized = true;
        for img in backend.query_all(&self.config.lazy_image_selector) {
            self.lazy_images.observe(img);
        }
        log::debug!(
            "interactions: {} ripple hosts, {} cards, {} fields, {} lazy images",
            self.ripple_hosts.len(),
            self.cards.len(),
            self.fields.len(),
            self.lazy_images.len()
        );
        self.refresh_lazy_images(backend)
    }

    pub fn handle_event(
        &mut self,
        event: &PageEvent,
        now_ms: u64,
        backend: &mut dyn PageBackend,
    ) -> Result<()> {
        if !self.initialized || self.destroyed {
            return Ok(());
        }
        match *event {
            PageEvent::Click { target, x, y } => {
                let hosts = self.ripple_hosts.clone();
                if let Some(host) = closest_of(backend, target, &hosts) {
                    self.ripple(host, x, y, now_ms, backend)?;
                }
            },
            PageEvent::PointerEnter { target } => self.hover(target, true, backend)?,
            PageEvent::PointerLeave { target } => self.hover(target, false, backend)?,
            PageEvent::Focus { target } => {
                if self.fields.contains(&target)
                    && let Some(parent) = backend.parent(target)
                {
                    backend.set_class(parent, "focused", true)?;
                }
                if self.focusables.contains(&target) {
                    backend.set_attribute(target, "data-focused", "true")?;
                }
            },
            PageEvent::Blur { target } => {
                if self.fields.contains(&target)
                    && let Some(parent) = backend.parent(target)
                {
                    backend.set_class(parent, "focused", false)?;
                    let filled = !backend.value(target).is_empty();
                    backend.set_class(parent, "filled", filled)?;
                }
                if self.focusables.contains(&target) {
                    backend.remove_attribute(target, "data-focused")?;
                }
            },
            PageEvent::KeyDown { key: Key::Tab, .. } => self.set_keyboard_navigation(true, backend)?,
            PageEvent::KeyDown {
                key: Key::Char('e'),
                ctrl: true,
            } => {
                if let Some(link) = self.emergency_link(backend) {
                    log::info!("interactions: emergency call shortcut");
                    backend.click(link)?;
                }
            },
            PageEvent::PointerDown => self.set_keyboard_navigation(false, backend)?,
            PageEvent::Scroll => self.refresh_lazy_images(backend)?,
            PageEvent::ImageLoaded { target } => {
                if let Some(src) = self.take_loading(target) {
                    backend.set_attribute(target, "src", &src)?;
                    backend.set_style(target, "filter", "blur(0)")?;
                    backend.set_class(target, "loaded", true)?;
                    self.loaded += 1;
                }
            },
            PageEvent::ImageFailed { target } => {
                if let Some(src) = self.take_loading(target) {
                    log::warn!("interactions: image {src} failed to load");
                }
            },
            _ => {},
        }
        Ok(())
    }

    /// Remove ripples whose animation has finished.
    pub fn tick(&mut self, now_ms: u64, backend: &mut dyn PageBackend) -> Result<()> {
        let mut expired = Vec::new();
        self.ripples.retain_mut(|r| {
            if r.expiry.fire(now_ms) {
                expired.push(r.element);
                false
            } else {
                true
            }
        });
        for element in expired {
            backend.remove(element)?;
        }
        Ok(())
    }

    fn ripple(
        &mut self,
        host: ElementId,
        x: f32,
        y: f32,
        now_ms: u64,
        backend: &mut dyn PageBackend,
    ) -> Result<()> {
        if self.ripples.iter().any(|r| r.host == host) {
            return Ok(());
        }
        let geometry = ripple_geometry(backend.rect(host), x, y);
        let element = backend.create_child(host, "div", "ripple-effect")?;
        let size = format!("{}px", geometry.size);
        let left = format!("{}px", geometry.left);
        let top = format!("{}px", geometry.top);
        for (property, value) in [
            ("position", "absolute"),
            ("width", size.as_str()),
            ("height", size.as_str()),
            ("left", left.as_str()),
            ("top", top.as_str()),
            ("background", "rgba(255, 255, 255, 0.3)"),
            ("border-radius", "50%"),
            ("transform", "scale(0)"),
            ("animation", "ripple-animation 0.6s ease-out"),
            ("pointer-events", "none"),
            ("z-index", "1"),
        ] {
            backend.set_style(element, property, value)?;
        }
        backend.set_style(host, "position", "relative")?;
        backend.set_style(host, "overflow", "hidden")?;
        backend.add_stylesheet(RIPPLE_STYLESHEET_ID, RIPPLE_KEYFRAMES)?;

        let mut expiry = Timer::idle();
        expiry.start_once(now_ms, self.config.ripple_ms);
        self.ripples.push(Ripple {
            host,
            element,
            expiry,
        });
        Ok(())
    }

    fn hover(&self, target: ElementId, on: bool, backend: &mut dyn PageBackend) -> Result<()> {
        let Some(&(_, Some(icon))) = self.cards.iter().find(|(card, _)| *card == target) else {
            return Ok(());
        };
        if on {
            backend.set_style(icon, "transform", "scale(1.1) rotate(5deg)")?;
            backend.set_style(
                icon,
                "transition",
                "transform 0.3s cubic-bezier(0.68, -0.55, 0.265, 1.55)",
            )
        } else {
            backend.set_style(icon, "transform", "")
        }
    }

    fn set_keyboard_navigation(&mut self, on: bool, backend: &mut dyn PageBackend) -> Result<()> {
        if self.keyboard_navigation == on {
            return Ok(());
        }
        self.keyboard_navigation = on;
        match self.body {
            Some(body) => backend.set_class(body, "keyboard-navigation", on),
            None => Ok(()),
        }
    }

    /// The link the Ctrl+E shortcut activates, if the page has one.
    pub fn emergency_link(&self, backend: &mut dyn PageBackend) -> Option<ElementId> {
        backend.query(&self.config.emergency_selector)
    }

    /// Start loading lazy images that have come into view.
    pub fn refresh_lazy_images(&mut self, backend: &mut dyn PageBackend) -> Result<()> {
        if self.lazy_images.is_empty() {
            return Ok(());
        }
        for change in self.lazy_images.check(backend) {
            if !change.visible {
                continue;
            }
            let img = change.element;
            self.lazy_images.unobserve(img);
            let Some(src) = backend.attribute(img, "data-src").filter(|s| !s.is_empty()) else {
                continue;
            };
            backend.set_style(img, "filter", "blur(10px)")?;
            backend.set_style(img, "transition", "filter 0.3s ease")?;
            backend.load_image(img, &src)?;
            self.loading.push((img, src));
        }
        Ok(())
    }

    fn take_loading(&mut self, img: ElementId) -> Option<String> {
        let index = self.loading.iter().position(|(el, _)| *el == img)?;
        Some(self.loading.remove(index).1)
    }

    /// Drop in-flight ripples and stop reacting to events.
    pub fn destroy(&mut self, backend: &mut dyn PageBackend) -> Result<()> {
        self.destroyed = true;
        self.lazy_images.disconnect();
        for ripple in std::mem::take(&mut self.ripples) {
            backend.remove(ripple.element)?;
        }
        Ok(())
    }

    pub fn is_keyboard_navigation(&self) -> bool {
        self.keyboard_navigation
    }

    pub fn snapshot(&self) -> InteractionSnapshot {
        InteractionSnapshot {
            keyboard_navigation: self.keyboard_navigation,
            ripples: self.ripples.len(),
            images_loading: self.loading.len(),
            images_loaded: self.loaded,
        }
    }
}
