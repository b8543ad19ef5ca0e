//! Shared test utilities for vitrin-ui controller tests.
//!
//! Provides a [`RecordingPage`] that wraps a [`HeadlessPage`] and records
//! every mutating backend call, plus ready-initialized controllers on the
//! demo page.

use vitrin_types::backend::PageBackend;
use vitrin_types::config::CarouselConfig;
use vitrin_types::error::Result;
use vitrin_types::geometry::{ElementId, Location, Rect, Viewport, Visibility};

use crate::carousel::Carousel;
use crate::headless::{HeadlessPage, demo_page};

/// A recorded mutating call.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Mutation {
    SetAttribute(ElementId, String, String),
    RemoveAttribute(ElementId, String),
    SetClass(ElementId, String, bool),
    SetStyle(ElementId, String, String),
    SetText(ElementId, String),
    CreateChild(ElementId, String),
    Remove(ElementId),
    AddStylesheet(String),
    ScrollTo(f32, bool),
    PreloadImage(String),
    LoadImage(ElementId, String),
    Click(ElementId),
}

/// Headless page that logs every mutation for assertion.
pub struct RecordingPage {
    pub page: HeadlessPage,
    pub mutations: Vec<Mutation>,
}

impl RecordingPage {
    pub fn new(page: HeadlessPage) -> Self {
        Self {
            page,
            mutations: Vec::new(),
        }
    }
}

impl PageBackend for RecordingPage {
    fn query(&mut self, selector: &str) -> Option<ElementId> {
        self.page.query(selector)
    }

    fn query_all(&mut self, selector: &str) -> Vec<ElementId> {
        self.page.query_all(selector)
    }

    fn query_within(&mut self, parent: ElementId, selector: &str) -> Option<ElementId> {
        self.page.query_within(parent, selector)
    }

    fn parent(&mut self, el: ElementId) -> Option<ElementId> {
        self.page.parent(el)
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.page.attribute(el, name)
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) -> Result<()> {
        self.mutations
            .push(Mutation::SetAttribute(el, name.into(), value.into()));
        self.page.set_attribute(el, name, value)
    }

    fn remove_attribute(&mut self, el: ElementId, name: &str) -> Result<()> {
        self.mutations.push(Mutation::RemoveAttribute(el, name.into()));
        self.page.remove_attribute(el, name)
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.page.has_class(el, class)
    }

    fn set_class(&mut self, el: ElementId, class: &str, on: bool) -> Result<()> {
        self.mutations.push(Mutation::SetClass(el, class.into(), on));
        self.page.set_class(el, class, on)
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) -> Result<()> {
        self.mutations
            .push(Mutation::SetStyle(el, property.into(), value.into()));
        self.page.set_style(el, property, value)
    }

    fn computed_visibility(&self, el: ElementId) -> Visibility {
        self.page.computed_visibility(el)
    }

    fn text(&self, el: ElementId) -> String {
        self.page.text(el)
    }

    fn set_text(&mut self, el: ElementId, text: &str) -> Result<()> {
        self.mutations.push(Mutation::SetText(el, text.into()));
        self.page.set_text(el, text)
    }

    fn value(&self, el: ElementId) -> String {
        self.page.value(el)
    }

    fn rect(&self, el: ElementId) -> Rect {
        self.page.rect(el)
    }

    fn offset_top(&self, el: ElementId) -> f32 {
        self.page.offset_top(el)
    }

    fn offset_height(&self, el: ElementId) -> f32 {
        self.page.offset_height(el)
    }

    fn viewport(&self) -> Viewport {
        self.page.viewport()
    }

    fn create_child(&mut self, parent: ElementId, tag: &str, class: &str) -> Result<ElementId> {
        self.mutations.push(Mutation::CreateChild(parent, class.into()));
        self.page.create_child(parent, tag, class)
    }

    fn remove(&mut self, el: ElementId) -> Result<()> {
        self.mutations.push(Mutation::Remove(el));
        self.page.remove(el)
    }

    fn add_stylesheet(&mut self, id: &str, css: &str) -> Result<()> {
        self.mutations.push(Mutation::AddStylesheet(id.into()));
        self.page.add_stylesheet(id, css)
    }

    fn scroll_to(&mut self, top: f32, smooth: bool) -> Result<()> {
        self.mutations.push(Mutation::ScrollTo(top, smooth));
        self.page.scroll_to(top, smooth)
    }

    fn location(&self) -> Location {
        self.page.location()
    }

    fn preload_image(&mut self, src: &str) -> Result<()> {
        self.mutations.push(Mutation::PreloadImage(src.into()));
        self.page.preload_image(src)
    }

    fn load_image(&mut self, el: ElementId, src: &str) -> Result<()> {
        self.mutations.push(Mutation::LoadImage(el, src.into()));
        self.page.load_image(el, src)
    }

    fn click(&mut self, el: ElementId) -> Result<()> {
        self.mutations.push(Mutation::Click(el));
        self.page.click(el)
    }
}

/// Demo page with an initialized hero carousel (at t = 0).
pub fn hero() -> (HeadlessPage, Carousel) {
    let mut page = demo_page();
    let mut carousel = Carousel::new(CarouselConfig::hero(), &mut page);
    carousel.init(0, &mut page).unwrap();
    (page, carousel)
}

/// Demo page with an initialized products carousel (at t = 0).
pub fn products() -> (HeadlessPage, Carousel) {
    let mut page = demo_page();
    let mut carousel = Carousel::new(CarouselConfig::products(), &mut page);
    carousel.init(0, &mut page).unwrap();
    (page, carousel)
}

/// Indices of the carousel's slides that carry the `active` class.
pub fn active_slides(page: &HeadlessPage, carousel: &Carousel) -> Vec<usize> {
    carousel
        .slides()
        .iter()
        .enumerate()
        .filter(|(_, slide)| page.has_class(**slide, "active"))
        .map(|(i, _)| i)
        .collect()
}

/// Run `tick` on a fixed 16 ms frame clock from `from` to `to` inclusive.
pub fn run_frames(from: u64, to: u64, mut tick: impl FnMut(u64)) {
    let mut now = from;
    while now <= to {
        tick(now);
        now += 16;
    }
}
