//! `PageBackend` over the live DOM.
//!
//! Elements handed to the controllers are registered once and addressed by
//! a handle afterwards. The handle is also stored on the element itself, so
//! mapping an event target back to it is a property read. Event targets are
//! mapped to the nearest registered ancestor, which is all the controllers
//! compare against. Removed elements leave the registry.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, HtmlImageElement, HtmlInputElement, HtmlTextAreaElement,
    ScrollBehavior, ScrollToOptions, Window,
};

use vitrin_core::backend::PageBackend;
use vitrin_core::error::{Result, VitrinError};
use vitrin_core::geometry::{ElementId, Location, Rect, Viewport, Visibility};
use vitrin_core::input::PageEvent;

/// Expando property carrying an element's handle.
const HANDLE_KEY: &str = "__vitrinHandle";

pub(crate) fn js_err(e: JsValue) -> VitrinError {
    VitrinError::Backend(format!("{e:?}"))
}

/// Computed `opacity`; unparseable values count as opaque.
fn parse_opacity(raw: &str) -> f32 {
    raw.trim().parse().unwrap_or(1.0)
}

fn is_hidden(visibility: &str, display: &str) -> bool {
    visibility.trim() == "hidden" || display.trim() == "none"
}

/// An image fetch in flight. Dropping it detaches both callbacks, so the
/// closures can be released whichever of them fired.
struct PendingImage {
    image: HtmlImageElement,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

impl Drop for PendingImage {
    fn drop(&mut self) {
        self.image.set_onload(None);
        self.image.set_onerror(None);
    }
}

pub struct DomPage {
    window: Window,
    document: Document,
    elements: HashMap<u32, Element>,
    next_handle: u32,
    /// Image load results keyed by fetch, filled by `onload`/`onerror`
    /// callbacks and drained once per frame.
    image_events: Rc<RefCell<Vec<(u32, PageEvent)>>>,
    pending_images: HashMap<u32, PendingImage>,
    next_fetch: u32,
}

impl DomPage {
    pub fn new() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| VitrinError::Backend("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| VitrinError::Backend("no document".into()))?;
        Ok(Self {
            window,
            document,
            elements: HashMap::new(),
            next_handle: 0,
            image_events: Rc::new(RefCell::new(Vec::new())),
            pending_images: HashMap::new(),
            next_fetch: 0,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn register(&mut self, el: Element) -> ElementId {
        if let Some(id) = self.known(&el) {
            return id;
        }
        let handle = self.next_handle;
        self.next_handle += 1;
        if let Err(e) = js_sys::Reflect::set(&el, &HANDLE_KEY.into(), &JsValue::from(handle)) {
            log::warn!("dom: cannot tag element {handle}: {e:?}");
        }
        self.elements.insert(handle, el);
        ElementId(handle)
    }

    /// Handle of `el` if a controller has seen it and it was not removed.
    pub fn known(&self, el: &Element) -> Option<ElementId> {
        let handle = js_sys::Reflect::get(el, &HANDLE_KEY.into()).ok()?.as_f64()? as u32;
        (self.elements.get(&handle)? == el).then_some(ElementId(handle))
    }

    /// Number of elements currently addressable by a handle.
    pub fn registered(&self) -> usize {
        self.elements.len()
    }

    /// Image fetches still waiting for `onload`/`onerror`.
    pub fn pending_images(&self) -> usize {
        self.pending_images.len()
    }

    /// The closest registered element at or above `el`.
    pub fn nearest_known(&self, el: Element) -> Option<ElementId> {
        let mut cursor = Some(el);
        while let Some(node) = cursor {
            if let Some(id) = self.known(&node) {
                return Some(id);
            }
            cursor = node.parent_element();
        }
        None
    }

    fn element(&self, id: ElementId) -> Result<&Element> {
        self.elements
            .get(&id.0)
            .ok_or_else(|| VitrinError::Element(format!("unknown element {}", id.0)))
    }

    fn html(&self, id: ElementId) -> Result<&HtmlElement> {
        self.element(id)?
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| VitrinError::Element(format!("element {} is not HTML", id.0)))
    }

    /// Image results collected since the last call. Their fetches are
    /// released here, outside the callbacks that reported them.
    pub fn take_image_events(&mut self) -> Vec<PageEvent> {
        let finished = std::mem::take(&mut *self.image_events.borrow_mut());
        finished
            .into_iter()
            .map(|(fetch, event)| {
                self.pending_images.remove(&fetch);
                event
            })
            .collect()
    }

    fn collect(
        &mut self,
        list: std::result::Result<web_sys::NodeList, JsValue>,
        selector: &str,
    ) -> Vec<ElementId> {
        let list = match list {
            Ok(list) => list,
            Err(e) => {
                log::warn!("dom: bad selector {selector:?}: {e:?}");
                return Vec::new();
            },
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| self.register(el))
            .collect()
    }
}

impl PageBackend for DomPage {
    fn query(&mut self, selector: &str) -> Option<ElementId> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(|el| self.register(el)),
            Err(e) => {
                log::warn!("dom: bad selector {selector:?}: {e:?}");
                None
            },
        }
    }

    fn query_all(&mut self, selector: &str) -> Vec<ElementId> {
        let list = self.document.query_selector_all(selector);
        self.collect(list, selector)
    }

    fn query_within(&mut self, parent: ElementId, selector: &str) -> Option<ElementId> {
        let found = self.element(parent).ok()?.query_selector(selector).ok()??;
        Some(self.register(found))
    }

    fn parent(&mut self, el: ElementId) -> Option<ElementId> {
        let parent = self.element(el).ok()?.parent_element()?;
        Some(self.register(parent))
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.element(el).ok()?.get_attribute(name)
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) -> Result<()> {
        self.element(el)?.set_attribute(name, value).map_err(js_err)
    }

    fn remove_attribute(&mut self, el: ElementId, name: &str) -> Result<()> {
        self.element(el)?.remove_attribute(name).map_err(js_err)
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.element(el).is_ok_and(|e| e.class_list().contains(class))
    }

    fn set_class(&mut self, el: ElementId, class: &str, on: bool) -> Result<()> {
        self.element(el)?
            .class_list()
            .toggle_with_force(class, on)
            .map(|_| ())
            .map_err(js_err)
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) -> Result<()> {
        let style = self.html(el)?.style();
        if value.is_empty() {
            style.remove_property(property).map(|_| ()).map_err(js_err)
        } else {
            style.set_property(property, value).map_err(js_err)
        }
    }

    fn computed_visibility(&self, el: ElementId) -> Visibility {
        let Some(style) = self
            .element(el)
            .ok()
            .and_then(|e| self.window.get_computed_style(e).ok().flatten())
        else {
            return Visibility::VISIBLE;
        };
        let read = |name: &str| style.get_property_value(name).unwrap_or_default();
        Visibility {
            opacity: parse_opacity(&read("opacity")),
            hidden: is_hidden(&read("visibility"), &read("display")),
        }
    }

    fn text(&self, el: ElementId) -> String {
        self.element(el)
            .ok()
            .and_then(|e| e.text_content())
            .unwrap_or_default()
    }

    fn set_text(&mut self, el: ElementId, text: &str) -> Result<()> {
        self.element(el)?.set_text_content(Some(text));
        Ok(())
    }

    fn value(&self, el: ElementId) -> String {
        let Ok(el) = self.element(el) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn rect(&self, el: ElementId) -> Rect {
        let Ok(el) = self.element(el) else {
            return Rect::default();
        };
        let r = el.get_bounding_client_rect();
        Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
    }

    fn offset_top(&self, el: ElementId) -> f32 {
        self.html(el).map_or(0.0, |e| e.offset_top() as f32)
    }

    fn offset_height(&self, el: ElementId) -> f32 {
        self.html(el).map_or(0.0, |e| e.offset_height() as f32)
    }

    fn viewport(&self) -> Viewport {
        let dimension = |v: std::result::Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        Viewport {
            scroll_y: self.window.scroll_y().unwrap_or(0.0) as f32,
            width: dimension(self.window.inner_width()),
            height: dimension(self.window.inner_height()),
        }
    }

    fn create_child(&mut self, parent: ElementId, tag: &str, class: &str) -> Result<ElementId> {
        let child = self.document.create_element(tag).map_err(js_err)?;
        child.set_class_name(class);
        self.element(parent)?.append_child(&child).map_err(js_err)?;
        Ok(self.register(child))
    }

    fn remove(&mut self, el: ElementId) -> Result<()> {
        if let Some(element) = self.elements.remove(&el.0) {
            element.remove();
        }
        Ok(())
    }

    fn add_stylesheet(&mut self, id: &str, css: &str) -> Result<()> {
        if self.document.get_element_by_id(id).is_some() {
            return Ok(());
        }
        let style = self.document.create_element("style").map_err(js_err)?;
        style.set_id(id);
        style.set_text_content(Some(css));
        let head = self
            .document
            .query_selector("head")
            .map_err(js_err)?
            .ok_or_else(|| VitrinError::Backend("document has no head".into()))?;
        head.append_child(&style).map_err(js_err)?;
        Ok(())
    }

    fn scroll_to(&mut self, top: f32, smooth: bool) -> Result<()> {
        let options = ScrollToOptions::new();
        options.set_top(f64::from(top));
        options.set_behavior(if smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Auto
        });
        self.window.scroll_to_with_scroll_to_options(&options);
        Ok(())
    }

    fn location(&self) -> Location {
        let location = self.window.location();
        Location::new(
            location.hostname().unwrap_or_default(),
            location.pathname().unwrap_or_default(),
        )
    }

    fn preload_image(&mut self, src: &str) -> Result<()> {
        HtmlImageElement::new().map_err(js_err)?.set_src(src);
        Ok(())
    }

    fn load_image(&mut self, el: ElementId, src: &str) -> Result<()> {
        let image = HtmlImageElement::new().map_err(js_err)?;
        let fetch = self.next_fetch;
        self.next_fetch += 1;

        let loaded = Rc::clone(&self.image_events);
        let onload: Closure<dyn FnMut()> = Closure::once(move || {
            loaded
                .borrow_mut()
                .push((fetch, PageEvent::ImageLoaded { target: el }));
        });
        let failed = Rc::clone(&self.image_events);
        let onerror: Closure<dyn FnMut()> = Closure::once(move || {
            failed
                .borrow_mut()
                .push((fetch, PageEvent::ImageFailed { target: el }));
        });
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        image.set_src(src);

        self.pending_images.insert(
            fetch,
            PendingImage {
                image,
                _onload: onload,
                _onerror: onerror,
            },
        );
        Ok(())
    }

    fn click(&mut self, el: ElementId) -> Result<()> {
        self.html(el)?.click();
        Ok(())
    }
}
