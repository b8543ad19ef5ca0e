//! Navigation bar and scroll-position watcher.
//!
//! Tracks whether the page has scrolled past the threshold (the nav bar's
//! `scrolled` class), which section is current, and which navigation links
//! are highlighted. Also handles in-page anchor links and the mobile menu
//! toggle.

use serde::Serialize;

use vitrin_types::backend::PageBackend;
use vitrin_types::config::{NavConfig, PageRoute};
use vitrin_types::error::Result;
use vitrin_types::geometry::ElementId;
use vitrin_types::input::PageEvent;

use crate::timing::Throttle;
use crate::tree::is_within;

/// A section's vertical extent in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f32,
    pub height: f32,
}

/// The first section (in source order) whose band contains the marker line.
///
/// A section is current while `scroll_y` lies in
/// `[top - vh/3, top + height - vh/3)`.
pub fn active_section_at(sections: &[SectionBounds], scroll_y: f32, viewport_height: f32) -> Option<&str> {
    let third = viewport_height / 3.0;
    sections
        .iter()
        .find(|s| scroll_y >= s.top - third && scroll_y < s.top + s.height - third)
        .map(|s| s.id.as_str())
}

/// Section a page highlights before any scrolling happens.
pub fn initial_section(page: &str, routes: &[PageRoute], default: &str) -> String {
    routes
        .iter()
        .find(|r| r.matches_page(page))
        .map_or(default, |r| r.section.as_str())
        .to_string()
}

/// Whether a link should be highlighted.
///
/// A link to the current page wins; otherwise a `#section` link is active
/// when it names the current section.
pub fn link_is_active(href: &str, page: &str, routes: &[PageRoute], active_section: &str) -> bool {
    let page_match = routes
        .iter()
        .any(|r| href.contains(&r.pattern) && r.matches_page(page));
    page_match || href.strip_prefix('#') == Some(active_section)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSnapshot {
    pub scrolled: bool,
    pub active_section: String,
    pub menu_open: bool,
}

pub struct ScrollWatcher {
    config: NavConfig,
    nav: Option<ElementId>,
    links: Vec<(ElementId, String)>,
    toggle: Option<ElementId>,
    sections: Vec<ElementId>,
    tracks_sections: bool,
    page: String,
    scrolled: bool,
    active_section: String,
    menu_open: bool,
    throttle: Throttle,
    initialized: bool,
    destroyed: bool,
}

impl ScrollWatcher {
    pub fn new(config: NavConfig, backend: &mut dyn PageBackend) -> Self {
        let nav = backend.query(&config.nav_selector);
        let links = backend
            .query_all(&config.link_selector)
            .into_iter()
            .map(|link| (link, backend.attribute(link, "href").unwrap_or_default()))
            .collect();
        let toggle = backend.query(&config.toggle_selector);
        let sections = backend.query_all(&config.section_selector);
        let tracks_sections = backend.query(&config.hero_selector).is_some();
        let page = backend.location().page().to_string();
        let active_section = initial_section(&page, &config.routes, &config.default_section);
        Self {
            nav,
            links,
            toggle,
            sections,
            tracks_sections,
            page,
            scrolled: false,
            active_section,
            menu_open: false,
            throttle: Throttle::new(config.throttle_ms),
            initialized: false,
            destroyed: false,
            config,
        }
    }

    pub fn is_active(&self) -> bool {
        self.nav.is_some() && !self.destroyed
    }

    pub fn init(&mut self, backend: &mut dyn PageBackend) -> Result<()> {
        if !self.is_active() || self.initialized {
            return Ok(());
        }
        self.initialized = true;
        log::debug!("nav: page {} starts on section {}", self.page, self.active_section);
        self.update_links(backend)
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
        match *event {
            PageEvent::Scroll => {
                if self.throttle.ready(now_ms) {
                    self.handle_scroll(backend)?;
                }
            },
            PageEvent::Click { target, .. } => self.handle_click(target, backend)?,
            _ => {},
        }
        Ok(())
    }

    /// Re-evaluate the scrolled state and the active section.
    pub fn handle_scroll(&mut self, backend: &mut dyn PageBackend) -> Result<()> {
        let Some(nav) = self.nav else {
            return Ok(());
        };
        let viewport = backend.viewport();
        let scrolled = viewport.scroll_y > self.config.scroll_threshold_px;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            backend.set_class(nav, "scrolled", scrolled)?;
        }

        if !self.tracks_sections {
            return Ok(());
        }
        let bounds: Vec<SectionBounds> = self
            .sections
            .iter()
            .filter_map(|&section| {
                let id = backend.attribute(section, "id")?;
                let rect = backend.rect(section);
                Some(SectionBounds {
                    id,
                    top: rect.top + viewport.scroll_y,
                    height: rect.height,
                })
            })
            .collect();
        if let Some(id) = active_section_at(&bounds, viewport.scroll_y, viewport.height)
            && id != self.active_section
        {
            log::debug!("nav: active section {} -> {}", self.active_section, id);
            self.active_section = id.to_string();
            self.update_links(backend)?;
        }
        Ok(())
    }

    fn handle_click(&mut self, target: ElementId, backend: &mut dyn PageBackend) -> Result<()> {
        if let Some(toggle) = self.toggle
            && is_within(backend, toggle, target)
        {
            return self.toggle_menu(backend);
        }
        let Some((link, href)) = self.link_for(target, backend) else {
            return Ok(());
        };
        if href.contains(".html") || !href.starts_with('#') {
            return Ok(());
        }
        let Some(section) = backend.query(&href) else {
            return Ok(());
        };
        self.scroll_to_section(section, backend)?;
        for (other, _) in &self.links {
            backend.set_class(*other, "active", *other == link)?;
        }
        Ok(())
    }

    /// The navigation link containing `target`, with its `href`.
    fn link_for(&self, target: ElementId, backend: &mut dyn PageBackend) -> Option<(ElementId, String)> {
        self.links
            .iter()
            .find(|(link, _)| is_within(backend, *link, target))
            .cloned()
    }

    /// Whether clicking `target` is an in-page anchor jump handled here
    /// (the browser's own navigation should then be suppressed).
    pub fn is_anchor_click(&self, target: ElementId, backend: &mut dyn PageBackend) -> bool {
        self.is_active()
            && self
                .link_for(target, backend)
                .is_some_and(|(_, href)| href.starts_with('#') && !href.contains(".html"))
    }

    /// Smooth scroll so `section` sits just below the nav bar.
    pub fn scroll_to_section(&self, section: ElementId, backend: &mut dyn PageBackend) -> Result<()> {
        let Some(nav) = self.nav else {
            return Ok(());
        };
        let top = backend.offset_top(section) - backend.offset_height(nav);
        backend.scroll_to(top, true)
    }

    fn toggle_menu(&mut self, backend: &mut dyn PageBackend) -> Result<()> {
        let Some(nav) = self.nav else {
            return Ok(());
        };
        self.menu_open = !self.menu_open;
        log::debug!("nav: mobile menu {}", if self.menu_open { "open" } else { "closed" });
        backend.set_class(nav, "menu-open", self.menu_open)
    }

    fn update_links(&self, backend: &mut dyn PageBackend) -> Result<()> {
        for (link, href) in &self.links {
            let active = link_is_active(href, &self.page, &self.config.routes, &self.active_section);
            backend.set_class(*link, "active", active)?;
        }
        Ok(())
    }

    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn active_section(&self) -> &str {
        &self.active_section
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn snapshot(&self) -> NavSnapshot {
        NavSnapshot {
            scrolled: self.scrolled,
            active_section: self.active_section.clone(),
            menu_open: self.menu_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessPage, demo_page};

    fn bounds(id: &str, top: f32, height: f32) -> SectionBounds {
        SectionBounds {
            id: id.into(),
            top,
            height,
        }
    }

    fn watcher(page: &mut HeadlessPage) -> ScrollWatcher {
        let mut w = ScrollWatcher::new(NavConfig::default(), page);
        w.init(page).unwrap();
        w
    }

    fn link(page: &mut HeadlessPage, href: &str) -> ElementId {
        page.query(&format!(r#".nav-link[href="{href}"]"#)).unwrap()
    }

    #[test]
    fn marker_line_sits_a_third_down() {
        let sections = [bounds("top", 0.0, 500.0), bounds("middle", 500.0, 700.0)];
        // scroll 700 + 900/3 puts the marker line at 1000, inside [500, 1200).
        assert_eq!(active_section_at(&sections, 700.0, 900.0), Some("middle"));
        assert_eq!(active_section_at(&sections, 100.0, 900.0), Some("top"));
        assert_eq!(active_section_at(&sections, 950.0, 900.0), None);
    }

    #[test]
    fn first_match_in_source_order_wins() {
        let sections = [bounds("outer", 0.0, 2000.0), bounds("inner", 400.0, 200.0)];
        assert_eq!(active_section_at(&sections, 300.0, 900.0), Some("outer"));
    }

    #[test]
    fn routes_pick_initial_section() {
        let config = NavConfig::default();
        let pick = |page| initial_section(page, &config.routes, &config.default_section);
        assert_eq!(pick("Urunler.html"), "products");
        assert_eq!(pick("Iletisim.html"), "contact");
        assert_eq!(pick("index.html"), "hero");
        assert_eq!(pick("Hakkimizda.html"), "hero");
    }

    #[test]
    fn page_match_beats_anchor_match() {
        let routes = NavConfig::default().routes;
        assert!(link_is_active("Urunler.html", "Urunler.html", &routes, "about"));
        assert!(!link_is_active("#products", "Urunler.html", &routes, "about"));
        assert!(link_is_active("#about", "Urunler.html", &routes, "about"));
        assert!(!link_is_active("Iletisim.html", "Urunler.html", &routes, "contact"));
    }

    #[test]
    fn init_highlights_current_page() {
        let mut page = demo_page();
        let w = watcher(&mut page);
        assert_eq!(w.active_section(), "hero");
        let home = link(&mut page, "Anasayfa.html");
        let products = link(&mut page, "Urunler.html");
        assert!(page.has_class(home, "active"));
        assert!(!page.has_class(products, "active"));
    }

    #[test]
    fn scrolled_class_toggles_at_threshold() {
        let mut page = demo_page();
        let mut w = watcher(&mut page);
        let nav = page.query("#premiumNav").unwrap();
        page.set_scroll(100.0);
        w.handle_event(&PageEvent::Scroll, 0, &mut page).unwrap();
        assert!(!w.is_scrolled());
        page.set_scroll(101.0);
        w.handle_event(&PageEvent::Scroll, 20, &mut page).unwrap();
        assert!(w.is_scrolled());
        assert!(page.has_class(nav, "scrolled"));
        page.set_scroll(0.0);
        w.handle_event(&PageEvent::Scroll, 40, &mut page).unwrap();
        assert!(!page.has_class(nav, "scrolled"));
    }

    #[test]
    fn throttle_drops_rapid_scrolls() {
        let mut page = demo_page();
        let mut w = watcher(&mut page);
        w.handle_event(&PageEvent::Scroll, 0, &mut page).unwrap();
        page.set_scroll(500.0);
        w.handle_event(&PageEvent::Scroll, 5, &mut page).unwrap();
        assert!(!w.is_scrolled());
        w.handle_event(&PageEvent::Scroll, 16, &mut page).unwrap();
        assert!(w.is_scrolled());
    }

    #[test]
    fn active_section_follows_scroll_and_keeps_previous() {
        let mut page = demo_page();
        let mut w = watcher(&mut page);
        page.set_scroll(700.0);
        w.handle_event(&PageEvent::Scroll, 0, &mut page).unwrap();
        assert_eq!(w.active_section(), "about");
        let about = link(&mut page, "#about");
        assert!(page.has_class(about, "active"));

        page.set_scroll(1800.0);
        w.handle_event(&PageEvent::Scroll, 100, &mut page).unwrap();
        assert_eq!(w.active_section(), "products");
        assert!(!page.has_class(about, "active"));
        let products = link(&mut page, "#products");
        assert!(page.has_class(products, "active"));
    }

    #[test]
    fn no_section_tracking_without_hero() {
        let mut page = demo_page();
        let hero = page.query("#hero").unwrap();
        page.set_attribute(hero, "id", "banner").unwrap();
        let mut w = watcher(&mut page);
        page.set_scroll(1800.0);
        w.handle_event(&PageEvent::Scroll, 0, &mut page).unwrap();
        assert!(w.is_scrolled());
        assert_eq!(w.active_section(), "hero");
    }

    #[test]
    fn anchor_click_scrolls_below_nav() {
        let mut page = demo_page();
        let mut w = watcher(&mut page);
        let about = link(&mut page, "#about");
        assert!(w.is_anchor_click(about, &mut page));
        w.handle_event(
            &PageEvent::Click {
                target: about,
                x: 0.0,
                y: 0.0,
            },
            0,
            &mut page,
        )
        .unwrap();
        // about at 900, nav 80 tall.
        assert_eq!(page.scroll_requests(), &[(820.0, true)]);
        let active: Vec<ElementId> = page
            .query_all(".nav-link")
            .into_iter()
            .filter(|l| page.has_class(*l, "active"))
            .collect();
        assert_eq!(active, vec![about]);
    }

    #[test]
    fn page_links_are_left_to_the_browser() {
        let mut page = demo_page();
        let mut w = watcher(&mut page);
        let products = link(&mut page, "Urunler.html");
        assert!(!w.is_anchor_click(products, &mut page));
        w.handle_event(
            &PageEvent::Click {
                target: products,
                x: 0.0,
                y: 0.0,
            },
            0,
            &mut page,
        )
        .unwrap();
        assert!(page.scroll_requests().is_empty());
    }

    #[test]
    fn mobile_toggle_flips_menu() {
        let mut page = demo_page();
        let mut w = watcher(&mut page);
        let toggle = page.query("#mobileMenuToggle").unwrap();
        let nav = page.query("#premiumNav").unwrap();
        let click = PageEvent::Click {
            target: toggle,
            x: 0.0,
            y: 0.0,
        };
        w.handle_event(&click, 0, &mut page).unwrap();
        assert!(w.is_menu_open());
        assert!(page.has_class(nav, "menu-open"));
        w.handle_event(&click, 10, &mut page).unwrap();
        assert!(!page.has_class(nav, "menu-open"));
    }

    #[test]
    fn missing_nav_is_noop() {
        let mut page = HeadlessPage::new(1280.0, 900.0);
        let mut w = watcher(&mut page);
        assert!(!w.is_active());
        page.set_scroll(0.0);
        w.handle_event(&PageEvent::Scroll, 0, &mut page).unwrap();
        assert!(!w.is_scrolled());
    }
}
