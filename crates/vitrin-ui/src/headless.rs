//! In-memory page backend.
//!
//! `HeadlessPage` keeps an element tree with classes, attributes, inline
//! styles and document-space geometry, plus a window with a scroll offset
//! and a simulated smooth scroll. It backs the controller tests and the
//! `vitrin-sim` replay binary.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use vitrin_types::backend::PageBackend;
use vitrin_types::error::{Result, VitrinError};
use vitrin_types::geometry::{ElementId, Location, Rect, Viewport, Visibility};

/// Pixels a smooth scroll moves per [`HeadlessPage::advance_scroll`] step.
pub const SMOOTH_SCROLL_STEP: f32 = 120.0;

// ---------------------------------------------------------------------------
// Element specs (builder + fixture format)
// ---------------------------------------------------------------------------

/// Description of an element to insert, usable as a builder or as TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ElementSpec {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
    pub value: String,
    /// Document-space box (viewport-space when `fixed`).
    pub rect: Rect,
    /// `position: fixed` elements do not move when the window scrolls.
    pub fixed: bool,
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn rect(mut self, left: f32, top: f32, width: f32, height: f32) -> Self {
        self.rect = Rect::new(left, top, width, height);
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }
}

/// A whole page as loaded from a TOML fixture.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageFixture {
    pub host: String,
    pub path: String,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Scrollable height; defaults to the lowest element bottom.
    pub document_height: Option<f32>,
    pub elements: Vec<ElementSpec>,
}

impl Default for PageFixture {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            path: "/index.html".into(),
            viewport_width: 1280.0,
            viewport_height: 900.0,
            document_height: None,
            elements: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum AttrOp {
    Exists,
    Equals(String),
    Contains(String),
    Prefix(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, AttrOp)>,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        out.push(c);
        chars.next();
    }
    out
}

fn parse_attr(body: &str) -> Option<(String, AttrOp)> {
    let body = body.trim();
    let unquote = |v: &str| v.trim().trim_matches(|c| c == '"' || c == '\'').to_string();
    if let Some((name, value)) = body.split_once("*=") {
        return Some((name.trim().to_string(), AttrOp::Contains(unquote(value))));
    }
    if let Some((name, value)) = body.split_once("^=") {
        return Some((name.trim().to_string(), AttrOp::Prefix(unquote(value))));
    }
    if let Some((name, value)) = body.split_once('=') {
        return Some((name.trim().to_string(), AttrOp::Equals(unquote(value))));
    }
    if !body.is_empty() && body.chars().all(is_ident_char) {
        Some((body.to_string(), AttrOp::Exists))
    } else {
        None
    }
}

fn parse_compound(text: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut chars = text.trim().chars().peekable();
    if chars.peek().is_none() {
        return None;
    }
    while let Some(&c) = chars.peek() {
        match c {
            '#' => {
                chars.next();
                compound.id = Some(take_ident(&mut chars));
            },
            '.' => {
                chars.next();
                compound.classes.push(take_ident(&mut chars));
            },
            '[' => {
                chars.next();
                let body: String = chars.by_ref().take_while(|&c| c != ']').collect();
                compound.attrs.push(parse_attr(&body)?);
            },
            c if is_ident_char(c) => compound.tag = Some(take_ident(&mut chars)),
            _ => return None,
        }
    }
    Some(compound)
}

fn parse_selector(selector: &str) -> Vec<Compound> {
    let mut out = Vec::new();
    for part in selector.split(',') {
        match parse_compound(part) {
            Some(c) => out.push(c),
            None => log::warn!("headless: unsupported selector {part:?}"),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    rect: Rect,
    fixed: bool,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attached: bool,
}

impl Node {
    fn from_spec(spec: &ElementSpec, parent: Option<ElementId>) -> Self {
        Self {
            tag: spec.tag.to_ascii_lowercase(),
            id: spec.id.clone(),
            classes: spec.classes.clone(),
            attrs: spec.attrs.clone(),
            styles: BTreeMap::new(),
            text: spec.text.clone(),
            value: spec.value.clone(),
            rect: spec.rect,
            fixed: spec.fixed,
            parent,
            children: Vec::new(),
            attached: true,
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.clone(),
            "class" if !self.classes.is_empty() => Some(self.classes.join(" ")),
            _ => self.attrs.get(name).cloned(),
        }
    }

    fn matches(&self, c: &Compound) -> bool {
        if let Some(tag) = &c.tag
            && *tag != self.tag
        {
            return false;
        }
        if let Some(id) = &c.id
            && self.id.as_ref() != Some(id)
        {
            return false;
        }
        if !c.classes.iter().all(|cls| self.classes.contains(cls)) {
            return false;
        }
        c.attrs.iter().all(|(name, op)| match (self.attr(name), op) {
            (None, _) => false,
            (Some(_), AttrOp::Exists) => true,
            (Some(v), AttrOp::Equals(want)) => v == *want,
            (Some(v), AttrOp::Contains(want)) => v.contains(want.as_str()),
            (Some(v), AttrOp::Prefix(want)) => v.starts_with(want.as_str()),
        })
    }
}

/// In-memory page implementing [`PageBackend`].
#[derive(Debug, Clone)]
pub struct HeadlessPage {
    nodes: Vec<Node>,
    viewport: Viewport,
    document_height: Option<f32>,
    location: Location,
    stylesheets: BTreeSet<String>,
    scroll_target: Option<f32>,
    scroll_requests: Vec<(f32, bool)>,
    preloaded: Vec<String>,
    image_requests: Vec<(ElementId, String)>,
    clicked: Vec<ElementId>,
}

impl HeadlessPage {
    /// Empty page with just a `<body>`, served from `localhost`.
    pub fn new(width: f32, height: f32) -> Self {
        let body = Node::from_spec(&ElementSpec::new("body"), None);
        Self {
            nodes: vec![body],
            viewport: Viewport {
                scroll_y: 0.0,
                width,
                height,
            },
            document_height: None,
            location: Location::new("localhost", "/index.html"),
            stylesheets: BTreeSet::new(),
            scroll_target: None,
            scroll_requests: Vec::new(),
            preloaded: Vec::new(),
            image_requests: Vec::new(),
            clicked: Vec::new(),
        }
    }

    pub fn from_fixture(fixture: &PageFixture) -> Self {
        let mut page = Self::new(fixture.viewport_width, fixture.viewport_height);
        page.location = Location::new(fixture.host.clone(), fixture.path.clone());
        page.document_height = fixture.document_height;
        let body = page.body();
        for spec in &fixture.elements {
            page.append(body, spec.clone());
        }
        page
    }

    /// Parse a TOML fixture.
    pub fn from_toml(text: &str) -> Result<Self> {
        let fixture: PageFixture = toml::from_str(text)?;
        Ok(Self::from_fixture(&fixture))
    }

    pub fn body(&self) -> ElementId {
        ElementId(0)
    }

    /// Insert `spec` (and its children) as the last child of `parent`.
    pub fn append(&mut self, parent: ElementId, spec: ElementSpec) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(Node::from_spec(&spec, Some(parent)));
        if let Some(p) = self.nodes.get_mut(parent.0 as usize) {
            p.children.push(id);
        }
        for child in spec.children {
            self.append(id, child);
        }
        id
    }

    pub fn set_location(&mut self, host: &str, path: &str) {
        self.location = Location::new(host, path);
    }

    pub fn set_document_height(&mut self, height: f32) {
        self.document_height = Some(height);
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.viewport.scroll_y = self.viewport.scroll_y.min(self.max_scroll());
    }

    /// Jump the window (user scroll). Cancels a smooth scroll in flight.
    pub fn set_scroll(&mut self, y: f32) {
        self.scroll_target = None;
        self.viewport.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    pub fn document_height(&self) -> f32 {
        self.document_height.unwrap_or_else(|| {
            self.nodes
                .iter()
                .filter(|n| n.attached && !n.fixed)
                .map(|n| n.rect.bottom())
                .fold(self.viewport.height, f32::max)
        })
    }

    pub fn max_scroll(&self) -> f32 {
        (self.document_height() - self.viewport.height).max(0.0)
    }

    /// Move a smooth scroll one step toward its target.
    /// Returns true if the offset changed.
    pub fn advance_scroll(&mut self) -> bool {
        let Some(target) = self.scroll_target else {
            return false;
        };
        let y = self.viewport.scroll_y;
        let delta = target - y;
        if delta.abs() <= SMOOTH_SCROLL_STEP {
            self.viewport.scroll_y = target;
            self.scroll_target = None;
        } else {
            self.viewport.scroll_y = y + SMOOTH_SCROLL_STEP.copysign(delta);
        }
        self.viewport.scroll_y != y
    }

    pub fn is_smooth_scrolling(&self) -> bool {
        self.scroll_target.is_some()
    }

    /// Every `scroll_to` request so far as `(top, smooth)`.
    pub fn scroll_requests(&self) -> &[(f32, bool)] {
        &self.scroll_requests
    }

    pub fn preloaded(&self) -> &[String] {
        &self.preloaded
    }

    /// Every `load_image` request so far.
    pub fn image_requests(&self) -> &[(ElementId, String)] {
        &self.image_requests
    }

    /// Elements activated through `click`.
    pub fn clicked(&self) -> &[ElementId] {
        &self.clicked
    }

    pub fn has_stylesheet(&self, id: &str) -> bool {
        self.stylesheets.contains(id)
    }

    /// Inline style value, if set.
    pub fn style(&self, el: ElementId, property: &str) -> Option<&str> {
        self.node(el)
            .and_then(|n| n.styles.get(property))
            .map(String::as_str)
    }

    pub fn children(&self, el: ElementId) -> Vec<ElementId> {
        self.node(el)
            .map(|n| {
                n.children
                    .iter()
                    .copied()
                    .filter(|c| self.is_attached(*c))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_attached(&self, el: ElementId) -> bool {
        self.node(el).is_some_and(|n| n.attached)
    }

    /// Simulate a user typing into a form field.
    pub fn set_value(&mut self, el: ElementId, value: &str) {
        if let Some(n) = self.node_mut(el) {
            n.value = value.to_string();
        }
    }

    fn node(&self, el: ElementId) -> Option<&Node> {
        self.nodes.get(el.0 as usize)
    }

    fn node_mut(&mut self, el: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(el.0 as usize)
    }

    fn attached_node_mut(&mut self, el: ElementId) -> Result<&mut Node> {
        match self.nodes.get_mut(el.0 as usize) {
            Some(n) if n.attached => Ok(n),
            _ => Err(VitrinError::Element(format!("no attached element {}", el.0))),
        }
    }

    /// Document-order walk below `root`, optionally starting with `root`.
    fn descendants(&self, root: ElementId, include_root: bool) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = if include_root {
            vec![root]
        } else {
            self.node(root)
                .map(|n| n.children.iter().rev().copied().collect())
                .unwrap_or_default()
        };
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            if !node.attached {
                continue;
            }
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    fn matching(&self, root: ElementId, include_root: bool, selector: &str) -> Vec<ElementId> {
        let compounds = parse_selector(selector);
        self.descendants(root, include_root)
            .into_iter()
            .filter(|id| {
                self.node(*id)
                    .is_some_and(|n| compounds.iter().any(|c| n.matches(c)))
            })
            .collect()
    }
}

impl PageBackend for HeadlessPage {
    fn query(&mut self, selector: &str) -> Option<ElementId> {
        self.matching(self.body(), true, selector).into_iter().next()
    }

    fn query_all(&mut self, selector: &str) -> Vec<ElementId> {
        self.matching(self.body(), true, selector)
    }

    fn query_within(&mut self, parent: ElementId, selector: &str) -> Option<ElementId> {
        self.matching(parent, false, selector).into_iter().next()
    }

    fn parent(&mut self, el: ElementId) -> Option<ElementId> {
        self.node(el).and_then(|n| n.parent)
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.node(el).and_then(|n| n.attr(name))
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) -> Result<()> {
        let node = self.attached_node_mut(el)?;
        match name {
            "id" => node.id = Some(value.to_string()),
            "class" => node.classes = value.split_whitespace().map(str::to_string).collect(),
            _ => {
                node.attrs.insert(name.to_string(), value.to_string());
            },
        }
        Ok(())
    }

    fn remove_attribute(&mut self, el: ElementId, name: &str) -> Result<()> {
        let node = self.attached_node_mut(el)?;
        node.attrs.remove(name);
        Ok(())
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.node(el)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn set_class(&mut self, el: ElementId, class: &str, on: bool) -> Result<()> {
        let node = self.attached_node_mut(el)?;
        let present = node.classes.iter().any(|c| c == class);
        if on && !present {
            node.classes.push(class.to_string());
        } else if !on && present {
            node.classes.retain(|c| c != class);
        }
        Ok(())
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) -> Result<()> {
        let node = self.attached_node_mut(el)?;
        if value.is_empty() {
            node.styles.remove(property);
        } else {
            node.styles.insert(property.to_string(), value.to_string());
        }
        Ok(())
    }

    fn computed_visibility(&self, el: ElementId) -> Visibility {
        let Some(node) = self.node(el) else {
            return Visibility {
                opacity: 0.0,
                hidden: true,
            };
        };
        let opacity = node
            .styles
            .get("opacity")
            .and_then(|v| v.trim().parse::<f32>().ok())
            .unwrap_or(1.0);
        let hidden = !node.attached
            || node.styles.get("visibility").is_some_and(|v| v == "hidden")
            || node.styles.get("display").is_some_and(|v| v == "none");
        Visibility { opacity, hidden }
    }

    fn text(&self, el: ElementId) -> String {
        self.node(el).map(|n| n.text.clone()).unwrap_or_default()
    }

    fn set_text(&mut self, el: ElementId, text: &str) -> Result<()> {
        self.attached_node_mut(el)?.text = text.to_string();
        Ok(())
    }

    fn value(&self, el: ElementId) -> String {
        self.node(el).map(|n| n.value.clone()).unwrap_or_default()
    }

    fn rect(&self, el: ElementId) -> Rect {
        match self.node(el) {
            Some(n) if n.fixed => n.rect,
            Some(n) => n.rect.offset_y(-self.viewport.scroll_y),
            None => Rect::default(),
        }
    }

    fn offset_top(&self, el: ElementId) -> f32 {
        self.node(el).map(|n| n.rect.top).unwrap_or(0.0)
    }

    fn offset_height(&self, el: ElementId) -> f32 {
        self.node(el).map(|n| n.rect.height).unwrap_or(0.0)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn create_child(&mut self, parent: ElementId, tag: &str, class: &str) -> Result<ElementId> {
        let parent_rect = self.attached_node_mut(parent)?.rect;
        let spec = ElementSpec::new(tag)
            .class(class)
            .rect(parent_rect.left, parent_rect.top, 0.0, 0.0);
        Ok(self.append(parent, spec))
    }

    fn remove(&mut self, el: ElementId) -> Result<()> {
        let Some(node) = self.node_mut(el) else {
            return Ok(());
        };
        if !node.attached {
            return Ok(());
        }
        node.attached = false;
        if let Some(parent) = node.parent
            && let Some(p) = self.node_mut(parent)
        {
            p.children.retain(|c| *c != el);
        }
        Ok(())
    }

    fn add_stylesheet(&mut self, id: &str, _css: &str) -> Result<()> {
        self.stylesheets.insert(id.to_string());
        Ok(())
    }

    fn scroll_to(&mut self, top: f32, smooth: bool) -> Result<()> {
        self.scroll_requests.push((top, smooth));
        let top = top.clamp(0.0, self.max_scroll());
        if smooth {
            self.scroll_target = Some(top);
        } else {
            self.scroll_target = None;
            self.viewport.scroll_y = top;
        }
        Ok(())
    }

    fn location(&self) -> Location {
        self.location.clone()
    }

    fn preload_image(&mut self, src: &str) -> Result<()> {
        self.preloaded.push(src.to_string());
        Ok(())
    }

    fn load_image(&mut self, el: ElementId, src: &str) -> Result<()> {
        self.image_requests.push((el, src.to_string()));
        Ok(())
    }

    fn click(&mut self, el: ElementId) -> Result<()> {
        self.clicked.push(el);
        Ok(())
    }
}

/// The site's home page: navigation, hero slider, about section with
/// service cards, statistics, product slider, contact form with a lazy map
/// image, and the floating scroll button. 1280x900 viewport on `localhost`.
pub fn demo_page() -> HeadlessPage {
    let mut page = HeadlessPage::new(1280.0, 900.0);
    let body = page.body();

    let mut nav = ElementSpec::new("nav")
        .id("premiumNav")
        .rect(0.0, 0.0, 1280.0, 80.0)
        .fixed()
        .child(
            ElementSpec::new("button")
                .id("mobileMenuToggle")
                .class("menu-toggle")
                .rect(1220.0, 20.0, 40.0, 40.0)
                .fixed(),
        );
    for href in [
        "Anasayfa.html",
        "#about",
        "#products",
        "Urunler.html",
        "Iletisim.html",
    ] {
        nav = nav.child(
            ElementSpec::new("a")
                .class("nav-link")
                .attr("href", href)
                .fixed(),
        );
    }
    page.append(body, nav);

    let mut hero = ElementSpec::new("section")
        .id("hero")
        .class("hero-section")
        .rect(0.0, 0.0, 1280.0, 900.0);
    for i in 0..3 {
        let mut slide = ElementSpec::new("div")
            .class("hero-slide")
            .attr("data-bg", &format!("img/hero-{}.jpg", i + 1))
            .rect(0.0, 0.0, 1280.0, 900.0);
        if i == 0 {
            slide = slide.class("active");
        }
        hero = hero.child(slide);
    }
    for i in 0..3 {
        let mut dot = ElementSpec::new("button")
            .class("hero-indicator")
            .rect(600.0 + i as f32 * 30.0, 850.0, 20.0, 20.0);
        if i == 0 {
            dot = dot.class("active");
        }
        hero = hero.child(dot);
    }
    hero = hero
        .child(
            ElementSpec::new("button")
                .id("heroPrev")
                .class("hero-btn")
                .rect(20.0, 420.0, 60.0, 60.0),
        )
        .child(
            ElementSpec::new("button")
                .id("heroNext")
                .class("hero-btn")
                .rect(1200.0, 420.0, 60.0, 60.0),
        );
    page.append(body, hero);

    let mut about = ElementSpec::new("section")
        .id("about")
        .rect(0.0, 900.0, 1280.0, 700.0);
    for i in 0..2 {
        about = about.child(
            ElementSpec::new("div")
                .class("service-card")
                .rect(100.0 + i as f32 * 560.0, 1000.0, 500.0, 400.0)
                .child(
                    ElementSpec::new("i")
                        .class("service-icon")
                        .rect(120.0 + i as f32 * 560.0, 1020.0, 48.0, 48.0),
                ),
        );
    }
    page.append(body, about);

    let mut grid = ElementSpec::new("div")
        .class("stats-grid")
        .rect(0.0, 1650.0, 1280.0, 300.0);
    for (i, count) in ["1200", "350", "25", "98"].iter().enumerate() {
        grid = grid.child(
            ElementSpec::new("div")
                .class("stat-item")
                .rect(i as f32 * 320.0, 1650.0, 320.0, 300.0)
                .child(
                    ElementSpec::new("span")
                        .class("stat-number")
                        .attr("data-count", count)
                        .text("0")
                        .rect(i as f32 * 320.0, 1700.0, 320.0, 80.0),
                ),
        );
    }
    page.append(
        body,
        ElementSpec::new("section")
            .id("stats")
            .rect(0.0, 1600.0, 1280.0, 400.0)
            .child(grid),
    );

    let mut track = ElementSpec::new("div")
        .class("products-slider")
        .rect(0.0, 2100.0, 1280.0, 600.0);
    for i in 0..4 {
        track = track.child(
            ElementSpec::new("div")
                .class("products-slide")
                .rect(i as f32 * 1280.0, 2100.0, 1280.0, 600.0)
                .child(
                    ElementSpec::new("div")
                        .class("product-card")
                        .rect(i as f32 * 1280.0 + 340.0, 2150.0, 600.0, 500.0)
                        .child(ElementSpec::new("i").class("card-icon")),
                ),
        );
    }
    page.append(
        body,
        ElementSpec::new("section")
            .id("products")
            .rect(0.0, 2000.0, 1280.0, 800.0)
            .child(
                ElementSpec::new("div")
                    .class("products-slider-container")
                    .rect(0.0, 2100.0, 1280.0, 600.0)
                    .child(track)
                    .child(
                        ElementSpec::new("button")
                            .id("productsPrev")
                            .class("slider-btn")
                            .rect(20.0, 2370.0, 60.0, 60.0),
                    )
                    .child(
                        ElementSpec::new("button")
                            .id("productsNext")
                            .class("slider-btn")
                            .rect(1200.0, 2370.0, 60.0, 60.0),
                    ),
            ),
    );

    page.append(
        body,
        ElementSpec::new("section")
            .id("contact")
            .rect(0.0, 2800.0, 1280.0, 700.0)
            .child(
                ElementSpec::new("div")
                    .class("form-group")
                    .rect(100.0, 2900.0, 500.0, 60.0)
                    .child(ElementSpec::new("input").attr("name", "name").rect(
                        100.0, 2900.0, 500.0, 40.0,
                    )),
            )
            .child(
                ElementSpec::new("div")
                    .class("form-group")
                    .rect(100.0, 2980.0, 500.0, 160.0)
                    .child(ElementSpec::new("textarea").attr("name", "message").rect(
                        100.0, 2980.0, 500.0, 140.0,
                    )),
            )
            .child(
                ElementSpec::new("a")
                    .class("btn btn-call")
                    .attr("href", "tel:+902621234567")
                    .rect(100.0, 3160.0, 200.0, 48.0),
            )
            .child(
                ElementSpec::new("img")
                    .class("map-image")
                    .attr("data-src", "img/map.jpg")
                    .attr("src", "img/map-placeholder.jpg")
                    .rect(700.0, 2900.0, 500.0, 400.0),
            ),
    );

    page.append(
        body,
        ElementSpec::new("button")
            .id("dynamicScrollBtn")
            .class("dynamic-scroll-btn")
            .rect(1200.0, 820.0, 56.0, 56.0)
            .fixed(),
    );

    page.set_document_height(3500.0);
    page
}
