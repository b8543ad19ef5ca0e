//! Browser event wiring and the animation-frame clock.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Element, ErrorEvent, Event, EventTarget, KeyboardEvent, MouseEvent,
    Node, PageTransitionEvent, PromiseRejectionEvent, TouchEvent, Window,
};

use vitrin_core::Site;
use vitrin_core::input::{Key, PageEvent};

use crate::dom::DomPage;

/// The running site and the page it drives.
pub struct App {
    pub site: Site,
    pub page: DomPage,
}

impl App {
    /// One animation frame: deliver image results, then advance timers.
    fn frame(&mut self, now_ms: u64) {
        if !self.site.is_initialized() {
            return;
        }
        for event in self.page.take_image_events() {
            self.site.handle_event(&event, now_ms, &mut self.page);
        }
        self.site.tick(now_ms, &mut self.page);
    }

    /// A page entering the back/forward cache comes back live, so only a
    /// real unload tears the controllers down.
    fn page_hide(&mut self, event: &Event) {
        let persisted = event
            .dyn_ref::<PageTransitionEvent>()
            .is_some_and(PageTransitionEvent::persisted);
        if persisted {
            log::debug!("vitrin: page cached, controllers kept");
            return;
        }
        let App { site, page } = self;
        site.destroy(page);
    }

    fn dispatch(&mut self, events: &[PageEvent]) -> bool {
        let now = now_ms();
        let mut prevent = false;
        for event in events {
            prevent |= self.site.handle_event(event, now, &mut self.page);
        }
        prevent
    }
}

/// Milliseconds on the same clock as `requestAnimationFrame` timestamps.
pub fn now_ms() -> u64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0, |p| p.now() as u64)
}

type Translate = fn(&Event, &DomPage) -> Vec<PageEvent>;

fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn target_id(event: &Event, page: &DomPage) -> Option<vitrin_core::geometry::ElementId> {
    page.nearest_known(target_element(event)?)
}

fn scroll(_: &Event, _: &DomPage) -> Vec<PageEvent> {
    vec![PageEvent::Scroll]
}

fn resize(_: &Event, _: &DomPage) -> Vec<PageEvent> {
    vec![PageEvent::Resize]
}

fn pointer_down(_: &Event, _: &DomPage) -> Vec<PageEvent> {
    vec![PageEvent::PointerDown]
}

fn click(event: &Event, page: &DomPage) -> Vec<PageEvent> {
    let (Some(target), Some(mouse)) = (target_id(event, page), event.dyn_ref::<MouseEvent>())
    else {
        return Vec::new();
    };
    vec![PageEvent::Click {
        target,
        x: mouse.client_x() as f32,
        y: mouse.client_y() as f32,
    }]
}

/// Registered elements between `event.target` and the first ancestor that
/// also contains `relatedTarget`: the ones the pointer entered or left.
fn crossed(event: &Event, page: &DomPage) -> Vec<vitrin_core::geometry::ElementId> {
    let related: Option<Node> = event
        .dyn_ref::<MouseEvent>()
        .and_then(|m| m.related_target())
        .and_then(|t| t.dyn_into::<Node>().ok());
    let mut out = Vec::new();
    let mut cursor = target_element(event);
    while let Some(el) = cursor {
        if el.contains(related.as_ref()) {
            break;
        }
        if let Some(id) = page.known(&el) {
            out.push(id);
        }
        cursor = el.parent_element();
    }
    out
}

fn pointer_enter(event: &Event, page: &DomPage) -> Vec<PageEvent> {
    crossed(event, page)
        .into_iter()
        .map(|target| PageEvent::PointerEnter { target })
        .collect()
}

fn pointer_leave(event: &Event, page: &DomPage) -> Vec<PageEvent> {
    crossed(event, page)
        .into_iter()
        .map(|target| PageEvent::PointerLeave { target })
        .collect()
}

fn touch(event: &Event, page: &DomPage, start: bool) -> Vec<PageEvent> {
    let Some(touch_event) = event.dyn_ref::<TouchEvent>() else {
        return Vec::new();
    };
    let list = if start {
        touch_event.touches()
    } else {
        touch_event.changed_touches()
    };
    let (Some(point), Some(target)) = (list.get(0), target_id(event, page)) else {
        return Vec::new();
    };
    let (x, y) = (point.client_x() as f32, point.client_y() as f32);
    if start {
        vec![PageEvent::TouchStart { target, x, y }]
    } else {
        vec![PageEvent::TouchEnd { target, x, y }]
    }
}

fn touch_start(event: &Event, page: &DomPage) -> Vec<PageEvent> {
    touch(event, page, true)
}

fn touch_end(event: &Event, page: &DomPage) -> Vec<PageEvent> {
    touch(event, page, false)
}

fn key_down(event: &Event, _: &DomPage) -> Vec<PageEvent> {
    event
        .dyn_ref::<KeyboardEvent>()
        .map(|k| PageEvent::KeyDown {
            key: Key::from_dom(&k.key()),
            ctrl: k.ctrl_key(),
        })
        .into_iter()
        .collect()
}

fn focus(event: &Event, page: &DomPage) -> Vec<PageEvent> {
    target_id(event, page)
        .map(|target| PageEvent::Focus { target })
        .into_iter()
        .collect()
}

fn blur(event: &Event, page: &DomPage) -> Vec<PageEvent> {
    target_id(event, page)
        .map(|target| PageEvent::Blur { target })
        .into_iter()
        .collect()
}

fn visibility(_: &Event, page: &DomPage) -> Vec<PageEvent> {
    vec![PageEvent::VisibilityChange {
        hidden: page.document().hidden(),
    }]
}

/// Register `translate` for `kind` on `target`. Scroll and touch
/// listeners are passive; the rest may suppress the default action.
fn listen(
    target: &EventTarget,
    kind: &str,
    app: &Rc<RefCell<App>>,
    passive: bool,
    translate: Translate,
) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        // A synthetic click issued by a controller re-enters here while
        // the app is borrowed; the controllers never need to see it.
        let Ok(mut app) = app.try_borrow_mut() else {
            return;
        };
        let events = translate(&event, &app.page);
        if app.dispatch(&events) && !passive {
            event.prevent_default();
        }
    });
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        handler.as_ref().unchecked_ref(),
        &options,
    )?;
    handler.forget();
    Ok(())
}

/// Attach every page listener the controllers consume.
pub fn wire(app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = app.borrow().page.document().clone();

    listen(&window, "scroll", app, true, scroll)?;
    listen(&window, "resize", app, true, resize)?;
    listen(&document, "click", app, false, click)?;
    listen(&document, "mousedown", app, true, pointer_down)?;
    listen(&document, "mouseover", app, true, pointer_enter)?;
    listen(&document, "mouseout", app, true, pointer_leave)?;
    listen(&document, "touchstart", app, true, touch_start)?;
    listen(&document, "touchend", app, true, touch_end)?;
    listen(&document, "keydown", app, false, key_down)?;
    listen(&document, "focusin", app, true, focus)?;
    listen(&document, "focusout", app, true, blur)?;
    listen(&document, "visibilitychange", app, true, visibility)?;

    let teardown = Rc::clone(app);
    let pagehide = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(mut app) = teardown.try_borrow_mut() {
            app.page_hide(&event);
        }
    });
    window.add_event_listener_with_callback("pagehide", pagehide.as_ref().unchecked_ref())?;
    pagehide.forget();

    catch_uncaught(&window)
}

/// One log line for an uncaught script error or unhandled rejection.
fn describe_error(event: &Event) -> Option<String> {
    if let Some(e) = event.dyn_ref::<ErrorEvent>() {
        Some(format!(
            "uncaught error: {} ({}:{}) {:?}",
            e.message(),
            e.filename(),
            e.lineno(),
            e.error()
        ))
    } else {
        event
            .dyn_ref::<PromiseRejectionEvent>()
            .map(|e| format!("unhandled rejection: {:?}", e.reason()))
    }
}

/// Log script errors and promise rejections that nothing else handled.
fn catch_uncaught(window: &Window) -> Result<(), JsValue> {
    let handler = Closure::<dyn FnMut(Event)>::new(|event: Event| {
        if let Some(line) = describe_error(&event) {
            log::error!("vitrin: {line}");
        }
    });
    window.add_event_listener_with_callback("error", handler.as_ref().unchecked_ref())?;
    window.add_event_listener_with_callback(
        "unhandledrejection",
        handler.as_ref().unchecked_ref(),
    )?;
    handler.forget();
    Ok(())
}

/// Drive `App::frame` from `requestAnimationFrame` for the page's lifetime.
pub fn start_frames(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&callback);

    *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        if let Ok(mut app) = app.try_borrow_mut() {
            app.frame(timestamp as u64);
        }
        if let (Some(window), Some(cb)) = (web_sys::window(), next.borrow().as_ref())
            && let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref())
        {
            log::error!("vitrin: frame clock stopped: {e:?}");
        }
    }));

    if let Some(cb) = callback.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}
