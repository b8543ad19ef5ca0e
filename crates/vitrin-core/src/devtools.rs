//! Developer tools for local debugging.
//!
//! Obtained through [`crate::Site::dev_tools`], which only hands them out
//! when the page is served from `localhost` or `127.0.0.1`.

use vitrin_types::backend::PageBackend;
use vitrin_types::config::SiteConfig;
use vitrin_types::error::Result;

use crate::site::Site;

pub struct DevTools<'a> {
    site: &'a mut Site,
}

impl<'a> DevTools<'a> {
    pub(crate) fn new(site: &'a mut Site) -> Self {
        Self { site }
    }

    /// Jump the hero carousel to `index`. Returns whether it moved.
    pub fn go_to_slide(
        &mut self,
        now_ms: u64,
        index: usize,
        backend: &mut dyn PageBackend,
    ) -> Result<bool> {
        self.site.hero_mut().go_to(now_ms, index, backend)
    }

    /// Flip hero autoplay. Returns the new setting.
    pub fn toggle_autoplay(&mut self, now_ms: u64) -> bool {
        let hero = self.site.hero_mut();
        let enabled = !hero.autoplay_enabled();
        hero.set_autoplay(now_ms, enabled);
        log::info!("devtools: hero autoplay {}", if enabled { "on" } else { "off" });
        enabled
    }

    pub fn config(&self) -> &SiteConfig {
        self.site.config()
    }
}
