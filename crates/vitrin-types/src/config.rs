//! Site configuration.
//!
//! Every value defaults to what the live site ships with; a TOML file only
//! needs to name what it changes. Carousel sections are patches applied on
//! top of their instance's preset, so `[products]` with a single key keeps
//! every other products default.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, VitrinError};

/// Top-level configuration for every controller on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    #[serde(deserialize_with = "hero_section")]
    pub hero: CarouselConfig,
    #[serde(deserialize_with = "products_section")]
    pub products: CarouselConfig,
    pub nav: NavConfig,
    pub fab: FabConfig,
    pub counters: CounterConfig,
    pub interactions: InteractionConfig,
    /// Quiet period before a window resize re-evaluates visibility.
    pub resize_debounce_ms: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            hero: CarouselConfig::hero(),
            products: CarouselConfig::products(),
            nav: NavConfig::default(),
            fab: FabConfig::default(),
            counters: CounterConfig::default(),
            interactions: InteractionConfig::default(),
            resize_debounce_ms: 16,
        }
    }
}

impl SiteConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        log::info!("Loaded site config from {}", path.display());
        Ok(config)
    }

    /// Reject values no controller can run with.
    pub fn validate(&self) -> Result<()> {
        for carousel in [&self.hero, &self.products] {
            if carousel.autoplay && carousel.interval_ms == 0 {
                return Err(VitrinError::Config(format!(
                    "{}: autoplay interval must be positive",
                    carousel.name
                )));
            }
            if carousel.swipe_threshold_px < 0.0 {
                return Err(VitrinError::Config(format!(
                    "{}: swipe threshold must not be negative",
                    carousel.name
                )));
            }
            if let Some(observe) = &carousel.visibility_pause {
                observe.validate(&carousel.name)?;
            }
        }
        if self.fab.poll_interval_ms == 0 || self.fab.watch_interval_ms == 0 {
            return Err(VitrinError::Config(
                "fab: poll and watch intervals must be positive".into(),
            ));
        }
        self.counters.observe.validate("counters")?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Visibility observation
// ---------------------------------------------------------------------------

/// Threshold and root margin for a visibility observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserveConfig {
    /// Fraction of the element that must be visible, `0.0..=1.0`.
    /// Zero means any overlap at all.
    pub threshold: f32,
    /// Grows (positive) or shrinks (negative) the viewport's top edge.
    pub margin_top_px: f32,
    /// Grows (positive) or shrinks (negative) the viewport's bottom edge.
    pub margin_bottom_px: f32,
}

impl Default for ObserveConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            margin_top_px: 0.0,
            margin_bottom_px: 0.0,
        }
    }
}

impl ObserveConfig {
    fn validate(&self, owner: &str) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(VitrinError::Config(format!(
                "{owner}: visibility threshold {} outside 0..=1",
                self.threshold
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

/// How a carousel shows its current slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideStyle {
    /// Slides stack; the current one carries the `active` class.
    ActiveClass,
    /// Slides sit side by side on a track shifted with `translateX`.
    Translate,
}

/// One carousel instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Name used in logs.
    pub name: String,
    pub root_selector: String,
    pub slide_selector: String,
    pub indicator_selector: Option<String>,
    pub prev_selector: Option<String>,
    pub next_selector: Option<String>,
    /// Track element moved by [`SlideStyle::Translate`].
    pub track_selector: Option<String>,
    pub style: SlideStyle,
    pub autoplay: bool,
    pub interval_ms: u64,
    /// How long the transition lock is held after a slide change.
    pub transition_ms: u64,
    /// Grace period after a touch gesture before autoplay resumes.
    pub touch_resume_ms: u64,
    pub swipe_threshold_px: f32,
    /// Arrow keys only act while the root is this far inside the viewport.
    pub keyboard_margin_px: f32,
    /// Skip an autoplay tick that lands inside the transition lock.
    pub skip_tick_while_transitioning: bool,
    /// Apply each slide's `data-bg` as its background image and preload it.
    pub apply_backgrounds: bool,
    /// Pause while the root is less visible than this.
    pub visibility_pause: Option<ObserveConfig>,
}

impl CarouselConfig {
    /// Full-width hero slider at the top of the home page.
    pub fn hero() -> Self {
        Self {
            name: "hero".into(),
            root_selector: ".hero-section".into(),
            slide_selector: ".hero-slide".into(),
            indicator_selector: Some(".hero-indicator".into()),
            prev_selector: Some("#heroPrev".into()),
            next_selector: Some("#heroNext".into()),
            track_selector: None,
            style: SlideStyle::ActiveClass,
            autoplay: true,
            interval_ms: 8000,
            transition_ms: 1000,
            touch_resume_ms: 1000,
            swipe_threshold_px: 50.0,
            keyboard_margin_px: 200.0,
            skip_tick_while_transitioning: false,
            apply_backgrounds: true,
            visibility_pause: None,
        }
    }

    /// Product showcase slider.
    pub fn products() -> Self {
        Self {
            name: "products".into(),
            root_selector: ".products-slider-container".into(),
            slide_selector: ".products-slide".into(),
            indicator_selector: None,
            prev_selector: Some("#productsPrev".into()),
            next_selector: Some("#productsNext".into()),
            track_selector: Some(".products-slider".into()),
            style: SlideStyle::Translate,
            autoplay: true,
            interval_ms: 5000,
            transition_ms: 500,
            touch_resume_ms: 2000,
            swipe_threshold_px: 50.0,
            keyboard_margin_px: 200.0,
            skip_tick_while_transitioning: true,
            apply_backgrounds: false,
            visibility_pause: Some(ObserveConfig {
                threshold: 0.3,
                margin_top_px: -50.0,
                margin_bottom_px: -50.0,
            }),
        }
    }
}

/// Partial carousel section as written in TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CarouselPatch {
    name: Option<String>,
    root_selector: Option<String>,
    slide_selector: Option<String>,
    indicator_selector: Option<String>,
    prev_selector: Option<String>,
    next_selector: Option<String>,
    track_selector: Option<String>,
    style: Option<SlideStyle>,
    autoplay: Option<bool>,
    interval_ms: Option<u64>,
    transition_ms: Option<u64>,
    touch_resume_ms: Option<u64>,
    swipe_threshold_px: Option<f32>,
    keyboard_margin_px: Option<f32>,
    skip_tick_while_transitioning: Option<bool>,
    apply_backgrounds: Option<bool>,
    visibility_pause: Option<ObserveConfig>,
}

impl CarouselPatch {
    fn apply(self, mut base: CarouselConfig) -> CarouselConfig {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if let Some(v) = self.$field { base.$field = v; })*
            };
        }
        take!(
            name,
            root_selector,
            slide_selector,
            style,
            autoplay,
            interval_ms,
            transition_ms,
            touch_resume_ms,
            swipe_threshold_px,
            keyboard_margin_px,
            skip_tick_while_transitioning,
            apply_backgrounds
        );
        if self.indicator_selector.is_some() {
            base.indicator_selector = self.indicator_selector;
        }
        if self.prev_selector.is_some() {
            base.prev_selector = self.prev_selector;
        }
        if self.next_selector.is_some() {
            base.next_selector = self.next_selector;
        }
        if self.track_selector.is_some() {
            base.track_selector = self.track_selector;
        }
        if self.visibility_pause.is_some() {
            base.visibility_pause = self.visibility_pause;
        }
        base
    }
}

fn hero_section<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<CarouselConfig, D::Error> {
    Ok(CarouselPatch::deserialize(d)?.apply(CarouselConfig::hero()))
}

fn products_section<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<CarouselConfig, D::Error> {
    Ok(CarouselPatch::deserialize(d)?.apply(CarouselConfig::products()))
}

// ---------------------------------------------------------------------------
// Navigation / scroll watcher
// ---------------------------------------------------------------------------

/// Maps a page file name fragment to the section it highlights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRoute {
    /// Substring of the page file name (`Urunler` matches `Urunler.html`).
    pub pattern: String,
    pub section: String,
    /// The home route also matches the bare directory / `index.html`.
    #[serde(default)]
    pub home: bool,
}

impl PageRoute {
    fn new(pattern: &str, section: &str, home: bool) -> Self {
        Self {
            pattern: pattern.into(),
            section: section.into(),
            home,
        }
    }

    /// Whether `page` (a file name) is this route's page.
    pub fn matches_page(&self, page: &str) -> bool {
        page.contains(&self.pattern) || (self.home && (page.is_empty() || page == "index.html"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub nav_selector: String,
    pub link_selector: String,
    pub toggle_selector: String,
    pub section_selector: String,
    /// Active-section tracking only runs on pages containing this element.
    pub hero_selector: String,
    pub scroll_threshold_px: f32,
    pub throttle_ms: u64,
    pub routes: Vec<PageRoute>,
    pub default_section: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            nav_selector: "#premiumNav".into(),
            link_selector: ".nav-link".into(),
            toggle_selector: "#mobileMenuToggle".into(),
            section_selector: "section[id]".into(),
            hero_selector: "#hero".into(),
            scroll_threshold_px: 100.0,
            throttle_ms: 16,
            routes: vec![
                PageRoute::new("Anasayfa", "hero", true),
                PageRoute::new("Urunler", "products", false),
                PageRoute::new("Iletisim", "contact", false),
            ],
            default_section: "hero".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Floating action button
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FabConfig {
    pub button_selector: String,
    /// Both this and `reference_selector` must exist for the section-based
    /// direction threshold.
    pub companion_selector: String,
    /// Section the button scrolls down to.
    pub reference_selector: String,
    pub nav_selector: String,
    pub fallback_nav_height_px: f32,
    pub throttle_ms: u64,
    /// Length of the shrink cue on a direction change.
    pub shrink_ms: u64,
    pub first_poll_ms: u64,
    pub poll_interval_ms: u64,
    pub settle_ms: u64,
    pub max_polls: u32,
    /// Offset movement below this between polls counts as settled.
    pub settle_epsilon_px: f32,
    pub watch_interval_ms: u64,
}

impl Default for FabConfig {
    fn default() -> Self {
        Self {
            button_selector: "#dynamicScrollBtn".into(),
            companion_selector: "#hero".into(),
            reference_selector: "#about".into(),
            nav_selector: "#premiumNav".into(),
            fallback_nav_height_px: 80.0,
            throttle_ms: 8,
            shrink_ms: 150,
            first_poll_ms: 100,
            poll_interval_ms: 50,
            settle_ms: 100,
            max_polls: 50,
            settle_epsilon_px: 1.0,
            watch_interval_ms: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// Counters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub number_selector: String,
    pub duration_ms: u64,
    pub stagger_ms: u64,
    pub observe: ObserveConfig,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            number_selector: ".stat-number".into(),
            duration_ms: 2000,
            stagger_ms: 100,
            observe: ObserveConfig {
                threshold: 0.5,
                margin_top_px: 0.0,
                margin_bottom_px: -50.0,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Interaction decorations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub ripple_selector: String,
    pub ripple_ms: u64,
    pub card_selector: String,
    pub card_icon_selector: String,
    pub field_selector: String,
    pub lazy_image_selector: String,
    pub focusable_selector: String,
    /// Link activated by the Ctrl+E shortcut.
    pub emergency_selector: String,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            ripple_selector: r#"[class*="btn"], [class*="button"]"#.into(),
            ripple_ms: 600,
            card_selector: ".service-card, .featured-service, .product-card".into(),
            card_icon_selector: "i, .service-icon, .card-icon".into(),
            field_selector: "input, textarea, select".into(),
            lazy_image_selector: "img[data-src]".into(),
            focusable_selector: "a, button, input, textarea, select, [tabindex]".into(),
            emergency_selector: r#"a[href*="tel:"]"#.into(),
        }
    }
}
