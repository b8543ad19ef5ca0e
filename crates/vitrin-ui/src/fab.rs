//! Floating scroll button.
//!
//! The button either scrolls down to the reference section or back to the
//! top, depending on how far the page has scrolled. Its whole visual state
//! is written by one idempotent [`FloatingButton::apply`]; a drift watcher
//! re-runs it whenever something else on the page has faded or hidden the
//! button.
//!
//! A click starts a smooth scroll tracked by a small state machine:
//!
//! ```text
//! Idle --click--> Scrolling --offset stable / poll cap--> Settling --settle delay--> Idle
//! ```
//!
//! While it is not `Idle`, scroll ticks do not re-evaluate the direction.

use serde::Serialize;

use vitrin_types::backend::PageBackend;
use vitrin_types::config::FabConfig;
use vitrin_types::error::Result;
use vitrin_types::geometry::ElementId;
use vitrin_types::input::PageEvent;

use crate::timer::Timer;
use crate::timing::Throttle;
use crate::tree::is_within;

/// What a click on the button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Scroll down to the reference section.
    Down,
    /// Scroll back to the top of the page.
    Up,
}

/// Progress of a button-initiated smooth scroll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ScrollPhase {
    Idle,
    /// Polling the offset until it stops moving.
    Scrolling { last_y: f32, checks: u32 },
    /// Offset settled; waiting out the settle delay.
    Settling,
}

impl ScrollPhase {
    pub fn is_busy(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Phase after polling the scroll offset `scroll_y`.
///
/// A scroll settles once the offset moved less than `epsilon` since the
/// previous poll or after `max_polls` polls, whichever comes first.
pub fn next_phase(phase: ScrollPhase, scroll_y: f32, max_polls: u32, epsilon: f32) -> ScrollPhase {
    match phase {
        ScrollPhase::Scrolling { last_y, checks } => {
            if (scroll_y - last_y).abs() < epsilon || checks >= max_polls {
                ScrollPhase::Settling
            } else {
                ScrollPhase::Scrolling {
                    last_y: scroll_y,
                    checks: checks + 1,
                }
            }
        },
        other => other,
    }
}

/// Direction for a scroll offset: `Up` once past `threshold`.
pub fn direction_at(scroll_y: f32, threshold: f32) -> Direction {
    if scroll_y >= threshold {
        Direction::Up
    } else {
        Direction::Down
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FabSnapshot {
    pub direction: Direction,
    pub shown: Direction,
    pub shrinking: bool,
    pub phase: ScrollPhase,
}

pub struct FloatingButton {
    config: FabConfig,
    button: Option<ElementId>,
    companion: Option<ElementId>,
    reference: Option<ElementId>,
    nav: Option<ElementId>,
    direction: Direction,
    shown: Direction,
    shrinking: bool,
    phase: ScrollPhase,
    throttle: Throttle,
    shrink: Timer,
    poll: Timer,
    settle: Timer,
    watch: Timer,
    initialized: bool,
    destroyed: bool,
}

impl FloatingButton {
    pub fn new(config: FabConfig, backend: &mut dyn PageBackend) -> Self {
        Self {
            button: backend.query(&config.button_selector),
            companion: backend.query(&config.companion_selector),
            reference: backend.query(&config.reference_selector),
            nav: backend.query(&config.nav_selector),
            direction: Direction::Down,
            shown: Direction::Down,
            shrinking: false,
            phase: ScrollPhase::Idle,
            throttle: Throttle::new(config.throttle_ms),
            shrink: Timer::idle(),
            poll: Timer::idle(),
            settle: Timer::idle(),
            watch: Timer::idle(),
            initialized: false,
            destroyed: false,
            config,
        }
    }

    pub fn is_active(&self) -> bool {
        self.button.is_some() && !self.destroyed
    }

    pub fn init(&mut self, now_ms: u64, backend: &mut dyn PageBackend) -> Result<()> {
        if !self.is_active() || self.initialized {
            return Ok(());
        }
        self.initialized = true;
        self.apply(backend)?;
        self.watch.start_repeating(now_ms, self.config.watch_interval_ms);
        self.evaluate(now_ms, backend)
    }

    /// Write the button's full visual state. Safe to call any number of times.
    pub fn apply(&self, backend: &mut dyn PageBackend) -> Result<()> {
        let Some(button) = self.button else {
            return Ok(());
        };
        backend.set_style(button, "opacity", "1")?;
        backend.set_style(button, "visibility", "visible")?;
        backend.set_style(button, "display", "flex")?;
        backend.set_style(button, "pointer-events", "auto")?;
        let scale = if self.shrinking { "scale(0.8)" } else { "scale(1)" };
        backend.set_style(button, "transform", scale)?;
        backend.set_class(button, "scroll-up", self.shown == Direction::Up)
    }

    /// Scroll offset at which the button flips to `Up`.
    pub fn threshold(&self, backend: &dyn PageBackend) -> f32 {
        let viewport = backend.viewport();
        match (self.companion, self.reference) {
            (Some(_), Some(reference)) => backend.offset_top(reference) - viewport.height / 3.0,
            _ => viewport.height / 2.0,
        }
    }

    /// Where a click scrolls to in the current direction.
    pub fn click_target(&self, backend: &dyn PageBackend) -> f32 {
        let viewport = backend.viewport();
        match (self.direction, self.reference) {
            (Direction::Up, _) => 0.0,
            (Direction::Down, Some(reference)) => {
                let nav_height = self
                    .nav
                    .map(|nav| backend.offset_height(nav))
                    .filter(|h| *h > 0.0)
                    .unwrap_or(self.config.fallback_nav_height_px);
                backend.offset_top(reference) - nav_height
            },
            (Direction::Down, None) => viewport.scroll_y + viewport.height,
        }
    }

    fn evaluate(&mut self, now_ms: u64, backend: &mut dyn PageBackend) -> Result<()> {
        let want = direction_at(backend.viewport().scroll_y, self.threshold(backend));
        if want != self.direction {
            log::debug!("fab: direction {:?} -> {:?}", self.direction, want);
            self.direction = want;
            self.shrinking = true;
            self.shrink.start_once(now_ms, self.config.shrink_ms);
        }
        self.apply(backend)
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
                if !self.throttle.ready(now_ms) {
                    return Ok(());
                }
                if self.phase.is_busy() {
                    self.apply(backend)?;
                } else {
                    self.evaluate(now_ms, backend)?;
                }
            },
            PageEvent::Resize | PageEvent::VisibilityChange { hidden: false } => {
                self.apply(backend)?;
            },
            PageEvent::Click { target, .. } => {
                if let Some(button) = self.button
                    && is_within(backend, button, target)
                {
                    self.click(now_ms, backend)?;
                }
            },
            _ => {},
        }
        Ok(())
    }

    /// Start a smooth scroll in the current direction.
    pub fn click(&mut self, now_ms: u64, backend: &mut dyn PageBackend) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        let target = self.click_target(backend);
        self.phase = ScrollPhase::Scrolling {
            last_y: backend.viewport().scroll_y,
            checks: 0,
        };
        self.settle.cancel();
        self.poll.start_once(now_ms, self.config.first_poll_ms);
        log::debug!("fab: scrolling {:?} to {target}", self.direction);
        self.apply(backend)?;
        backend.scroll_to(target, true)
    }

    pub fn tick(&mut self, now_ms: u64, backend: &mut dyn PageBackend) -> Result<()> {
        if !self.is_active() || !self.initialized {
            return Ok(());
        }
        if self.shrink.fire(now_ms) {
            self.shrinking = false;
            self.shown = self.direction;
            self.apply(backend)?;
        }
        if self.poll.fire(now_ms) {
            self.phase = next_phase(
                self.phase,
                backend.viewport().scroll_y,
                self.config.max_polls,
                self.config.settle_epsilon_px,
            );
            match self.phase {
                ScrollPhase::Scrolling { .. } => {
                    self.poll.start_once(now_ms, self.config.poll_interval_ms);
                },
                ScrollPhase::Settling => self.settle.start_once(now_ms, self.config.settle_ms),
                ScrollPhase::Idle => {},
            }
            self.apply(backend)?;
        }
        if self.settle.fire(now_ms) {
            self.phase = ScrollPhase::Idle;
            self.apply(backend)?;
            self.evaluate(now_ms, backend)?;
        }
        if self.watch.fire(now_ms)
            && let Some(button) = self.button
            && !backend.computed_visibility(button).is_fully_visible()
        {
            log::debug!("fab: visibility drifted, restoring");
            self.apply(backend)?;
        }
        Ok(())
    }

    pub fn destroy(&mut self) {
        self.shrink.cancel();
        self.poll.cancel();
        self.settle.cancel();
        self.watch.cancel();
        self.destroyed = true;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    pub fn snapshot(&self) -> FabSnapshot {
        FabSnapshot {
            direction: self.direction,
            shown: self.direction_shown(),
            shrinking: self.shrinking,
            phase: self.phase,
        }
    }

    /// Direction whose class is currently displayed.
    pub fn direction_shown(&self) -> Direction {
        self.shown
    }
}
