//! Site bootstrap and event routing.

use serde::Serialize;

use vitrin_types::backend::PageBackend;
use vitrin_types::config::SiteConfig;
use vitrin_types::error::Result;
use vitrin_types::geometry::{ElementId, Location};
use vitrin_types::input::{Key, PageEvent};
use vitrin_ui::carousel::CarouselSnapshot;
use vitrin_ui::counter::CounterSnapshot;
use vitrin_ui::decorations::InteractionSnapshot;
use vitrin_ui::fab::FabSnapshot;
use vitrin_ui::nav::NavSnapshot;
use vitrin_ui::timing::Debounce;
use vitrin_ui::{Carousel, CounterGroup, FloatingButton, Interactions, ScrollWatcher};

use crate::devtools::DevTools;

/// Serializable state of every controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSnapshot {
    pub initialized: bool,
    pub page: String,
    pub scroll_y: f32,
    pub nav: NavSnapshot,
    pub hero: CarouselSnapshot,
    pub counters: CounterSnapshot,
    pub products: CarouselSnapshot,
    pub fab: FabSnapshot,
    pub interactions: InteractionSnapshot,
}

impl SiteSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Log a controller failure. Failures are never retried and never stop
/// the other controllers.
fn report(component: &str, result: Result<()>) {
    if let Err(e) = result {
        log::error!("{component}: {e}");
    }
}

/// Every widget controller on the page, built once.
pub struct Site {
    config: SiteConfig,
    location: Location,
    body: Option<ElementId>,
    nav: ScrollWatcher,
    hero: Carousel,
    counters: CounterGroup,
    products: Carousel,
    fab: FloatingButton,
    interactions: Interactions,
    resize: Debounce,
    initialized: bool,
}

impl Site {
    /// Build every controller. Each one queries its elements here, once.
    pub fn new(config: SiteConfig, backend: &mut dyn PageBackend) -> Self {
        Self {
            location: backend.location(),
            body: backend.query("body"),
            nav: ScrollWatcher::new(config.nav.clone(), backend),
            hero: Carousel::new(config.hero.clone(), backend),
            counters: CounterGroup::new(config.counters.clone(), backend),
            products: Carousel::new(config.products.clone(), backend),
            fab: FloatingButton::new(config.fab.clone(), backend),
            interactions: Interactions::new(config.interactions.clone(), backend),
            resize: Debounce::new(config.resize_debounce_ms),
            initialized: false,
            config,
        }
    }

    /// Initialize every controller, exactly once, in page order.
    pub fn init(&mut self, now_ms: u64, backend: &mut dyn PageBackend) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        report("nav", self.nav.init(backend));
        report("hero", self.hero.init(now_ms, backend));
        report("counters", self.counters.init(now_ms, backend));
        report("products", self.products.init(now_ms, backend));
        report("fab", self.fab.init(now_ms, backend));
        report("interactions", self.interactions.init(backend));

        if let Some(body) = self.body {
            report("site", backend.set_class(body, "loaded", true));
        }
        log::info!("Tek Alcipan Profil Sistemleri: site loaded ({})", self.location.page());
        if self.location.is_loopback() {
            log::info!("Developer tools available: go_to_slide(index), toggle_autoplay(), config()");
        }
    }

    /// Whether the environment should suppress its default action for
    /// `event` (in-page anchor jumps, products arrow keys, the call shortcut).
    pub fn prevents_default(&self, event: &PageEvent, backend: &mut dyn PageBackend) -> bool {
        if !self.initialized {
            return false;
        }
        match *event {
            PageEvent::Click { target, .. } => self.nav.is_anchor_click(target, backend),
            PageEvent::KeyDown {
                key: Key::ArrowLeft | Key::ArrowRight,
                ..
            } => self.products.is_active() && self.products.accepts_keys(backend),
            PageEvent::KeyDown {
                key: Key::Char('e'),
                ctrl: true,
            } => self.interactions.emergency_link(backend).is_some(),
            _ => false,
        }
    }

    /// Route a page event to every controller.
    ///
    /// Returns whether the environment should suppress the event's default
    /// action; see [`Site::prevents_default`].
    pub fn handle_event(
        &mut self,
        event: &PageEvent,
        now_ms: u64,
        backend: &mut dyn PageBackend,
    ) -> bool {
        if !self.initialized {
            return false;
        }
        let prevent = self.prevents_default(event, backend);
        if matches!(event, PageEvent::Resize) {
            self.resize.call(now_ms);
        }
        report("nav", self.nav.handle_event(event, now_ms, backend));
        report("hero", self.hero.handle_event(event, now_ms, backend));
        self.counters.handle_event(event, now_ms, backend);
        report("products", self.products.handle_event(event, now_ms, backend));
        report("fab", self.fab.handle_event(event, now_ms, backend));
        report(
            "interactions",
            self.interactions.handle_event(event, now_ms, backend),
        );
        prevent
    }

    /// Advance every controller's timers and animations to `now_ms`.
    pub fn tick(&mut self, now_ms: u64, backend: &mut dyn PageBackend) {
        if !self.initialized {
            return;
        }
        if self.resize.poll(now_ms) {
            log::debug!("site: re-measuring after resize");
            self.products.refresh_visibility(backend);
            self.counters.refresh_visibility(now_ms, backend);
            report("interactions", self.interactions.refresh_lazy_images(backend));
        }
        report("hero", self.hero.tick(now_ms, backend));
        report("counters", self.counters.tick(now_ms, backend));
        report("products", self.products.tick(now_ms, backend));
        report("fab", self.fab.tick(now_ms, backend));
        report("interactions", self.interactions.tick(now_ms, backend));
    }

    /// Stop every controller and cancel all of their timers.
    pub fn destroy(&mut self, backend: &mut dyn PageBackend) {
        self.nav.destroy();
        self.hero.destroy();
        self.counters.destroy();
        self.products.destroy();
        self.fab.destroy();
        report("interactions", self.interactions.destroy(backend));
        self.initialized = false;
        log::info!("site: destroyed");
    }

    /// Diagnostic surface, available only when served from the local machine.
    pub fn dev_tools(&mut self) -> Option<DevTools<'_>> {
        if self.location.is_loopback() {
            Some(DevTools::new(self))
        } else {
            None
        }
    }

    pub fn snapshot(&self, backend: &dyn PageBackend) -> SiteSnapshot {
        SiteSnapshot {
            initialized: self.initialized,
            page: self.location.page().to_string(),
            scroll_y: backend.viewport().scroll_y,
            nav: self.nav.snapshot(),
            hero: self.hero.snapshot(),
            counters: self.counters.snapshot(),
            products: self.products.snapshot(),
            fab: self.fab.snapshot(),
            interactions: self.interactions.snapshot(),
        }
    }

    // -- Accessors --

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn nav(&self) -> &ScrollWatcher {
        &self.nav
    }

    pub fn hero(&self) -> &Carousel {
        &self.hero
    }

    pub fn hero_mut(&mut self) -> &mut Carousel {
        &mut self.hero
    }

    pub fn products(&self) -> &Carousel {
        &self.products
    }

    pub fn counters(&self) -> &CounterGroup {
        &self.counters
    }

    pub fn fab(&self) -> &FloatingButton {
        &self.fab
    }

    pub fn interactions(&self) -> &Interactions {
        &self.interactions
    }
}
