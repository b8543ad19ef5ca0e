//! Browser entry point for the site controllers.
//!
//! `start()` runs when the wasm module loads: it installs the panic hook and
//! `wasm_logger`, waits for the DOM, builds a [`Site`] over [`DomPage`],
//! wires page events and starts the animation-frame clock. Configuration is
//! read from an optional `<script type="application/toml" id="vitrin-config">`
//! block; anything it leaves out keeps the defaults.

pub mod dom;
pub mod runtime;

use std::cell::RefCell;
use std::rc::Rc;

use log::Level;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use vitrin_core::Site;
use vitrin_core::config::SiteConfig;
use vitrin_core::geometry::Location;

pub use dom::DomPage;
use runtime::{App, now_ms};

const CONFIG_ELEMENT_ID: &str = "vitrin-config";

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log_level()));

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(|| {
            if let Err(e) = boot() {
                log::error!("vitrin: startup failed: {e:?}");
            }
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.unchecked_ref::<js_sys::Function>(),
        )?;
        Ok(())
    } else {
        boot()
    }
}

/// Debug output on loopback hosts, info elsewhere.
fn log_level() -> Level {
    let location = web_sys::window().map(|w| w.location());
    let hostname = location
        .and_then(|l| l.hostname().ok())
        .unwrap_or_default();
    if Location::new(hostname, String::new()).is_loopback() {
        Level::Debug
    } else {
        Level::Info
    }
}

fn load_config(page: &DomPage) -> SiteConfig {
    let Some(text) = page
        .document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };
    match SiteConfig::from_toml(&text) {
        Ok(config) => config,
        Err(e) => {
            log::error!("vitrin: ignoring #{CONFIG_ELEMENT_ID}: {e}");
            SiteConfig::default()
        },
    }
}

fn boot() -> Result<(), JsValue> {
    let mut page = DomPage::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let config = load_config(&page);
    let mut site = Site::new(config, &mut page);
    site.init(now_ms(), &mut page);

    let app = Rc::new(RefCell::new(App { site, page }));
    runtime::wire(&app)?;
    runtime::start_frames(Rc::clone(&app))?;
    APP.with(|slot| *slot.borrow_mut() = Some(app));
    Ok(())
}

/// Run `f` against the live app, unless it is busy or not started.
fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    APP.with(|slot| {
        let slot = slot.borrow();
        let app = slot.as_ref()?;
        let mut app = app.try_borrow_mut().ok()?;
        Some(f(&mut app))
    })
}

/// Stop every controller and remove what they added to the page. Repeat
/// calls are harmless.
#[wasm_bindgen(js_name = destroy)]
pub fn destroy() {
    let done = with_app(|app| {
        let App { site, page } = app;
        site.destroy(page);
    });
    if done.is_none() {
        log::warn!("vitrin: destroy() before start, nothing to tear down");
    }
}

// ---------------------------------------------------------------------------
// Developer tools (loopback hosts only)
// ---------------------------------------------------------------------------

/// Jump the hero slider to `index`. Returns whether it moved.
#[wasm_bindgen(js_name = goToSlide)]
pub fn go_to_slide(index: usize) -> bool {
    with_app(|app| {
        let App { site, page } = app;
        let mut tools = site.dev_tools()?;
        tools.go_to_slide(now_ms(), index, page).ok()
    })
    .flatten()
    .unwrap_or(false)
}

/// Flip hero autoplay. Returns the new setting, or nothing off loopback.
#[wasm_bindgen(js_name = toggleAutoplay)]
pub fn toggle_autoplay() -> Option<bool> {
    with_app(|app| {
        let mut tools = app.site.dev_tools()?;
        Some(tools.toggle_autoplay(now_ms()))
    })
    .flatten()
}

/// The active configuration as TOML.
#[wasm_bindgen(js_name = siteConfig)]
pub fn site_config() -> Option<String> {
    with_app(|app| {
        let tools = app.site.dev_tools()?;
        toml::to_string_pretty(tools.config()).ok()
    })
    .flatten()
}
