//! Headless simulator for the site controllers.
//!
//! Builds a page (the bundled home page, or a TOML fixture from
//! `VITRIN_PAGE`), starts every controller with the configuration from
//! `VITRIN_CONFIG` (defaults otherwise), replays a scripted visit on a
//! simulated 60 Hz clock and prints the final controller state as JSON.
//!
//! Usage:
//!   cargo run -p vitrin-app -- [script.toml]
//!   VITRIN_PAGE=page.toml VITRIN_CONFIG=site.toml cargo run -p vitrin-app

mod script;

use anyhow::Result;

use vitrin_core::Site;
use vitrin_core::config::SiteConfig;
use vitrin_core::ui::HeadlessPage;
use vitrin_core::ui::headless::demo_page;

use script::Script;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::var("VITRIN_CONFIG") {
        Ok(path) => SiteConfig::load(&path)?,
        Err(_) => SiteConfig::default(),
    };

    let mut page = match std::env::var("VITRIN_PAGE") {
        Ok(path) => {
            let text = std::fs::read_to_string(&path)?;
            log::info!("Loaded page fixture from {path}");
            HeadlessPage::from_toml(&text)?
        },
        Err(_) => demo_page(),
    };

    let script = match std::env::args().nth(1) {
        Some(path) => Script::load(&path)?,
        None => Script::demo()?,
    };
    log::info!(
        "Simulating {} ms, {} steps",
        script.duration_ms,
        script.steps.len()
    );

    let mut site = Site::new(config, &mut page);
    site.init(0, &mut page);
    let stats = script.replay(&mut site, &mut page)?;
    log::info!(
        "Replayed {} frames, {} events ({} default actions suppressed)",
        stats.frames,
        stats.events,
        stats.prevented
    );

    println!("{}", site.snapshot(&page).to_json()?);
    site.destroy(&mut page);
    Ok(())
}
