//! Statistic counters that count up once when scrolled into view.

use serde::Serialize;

use vitrin_types::backend::PageBackend;
use vitrin_types::config::CounterConfig;
use vitrin_types::error::Result;
use vitrin_types::geometry::ElementId;
use vitrin_types::input::PageEvent;

use crate::timing::ease_out_quart;
use crate::visibility::VisibilityObserver;

/// Displayed value `elapsed_ms` into a count-up to `target`.
///
/// Never exceeds `target` and returns it exactly once `elapsed_ms` reaches
/// `duration_ms`.
pub fn counter_value(target: u64, elapsed_ms: u64, duration_ms: u64) -> u64 {
    if duration_ms == 0 || elapsed_ms >= duration_ms {
        return target;
    }
    let progress = elapsed_ms as f32 / duration_ms as f32;
    let value = (target as f64 * f64::from(ease_out_quart(progress))).floor() as u64;
    value.min(target)
}

/// Leading decimal digits of a `data-count` value; anything else is 0.
pub fn parse_count(raw: &str) -> u64 {
    let digits: String = raw
        .trim_start()
        .trim_start_matches('+')
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

#[derive(Debug, Clone)]
struct Counter {
    element: ElementId,
    target: u64,
    start_ms: u64,
    shown: Option<u64>,
    done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterSnapshot {
    pub triggered: bool,
    pub finished: bool,
    pub values: Vec<Option<u64>>,
}

/// All counters of one statistics block, animated together.
pub struct CounterGroup {
    config: CounterConfig,
    numbers: Vec<ElementId>,
    container: Option<ElementId>,
    observer: VisibilityObserver,
    counters: Vec<Counter>,
    has_animated: bool,
    initialized: bool,
    destroyed: bool,
}

impl CounterGroup {
    pub fn new(config: CounterConfig, backend: &mut dyn PageBackend) -> Self {
        let numbers = backend.query_all(&config.number_selector);
        // Observe the block holding the stat items, not a single number.
        let container = numbers
            .first()
            .and_then(|&first| backend.parent(first))
            .and_then(|item| backend.parent(item));
        Self {
            observer: VisibilityObserver::new(config.observe),
            config,
            numbers,
            container,
            counters: Vec::new(),
            has_animated: false,
            initialized: false,
            destroyed: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.numbers.is_empty() && self.container.is_some() && !self.destroyed
    }

    pub fn init(&mut self, now_ms: u64, backend: &mut dyn PageBackend) -> Result<()> {
        if !self.is_active() || self.initialized {
            return Ok(());
        }
        self.initialized = true;
        if let Some(container) = self.container {
            self.observer.observe(container);
        }
        self.refresh_visibility(now_ms, backend);
        Ok(())
    }

    /// Check the container against the trigger threshold.
    pub fn refresh_visibility(&mut self, now_ms: u64, backend: &dyn PageBackend) {
        if self.has_animated || self.destroyed {
            return;
        }
        if self.observer.check(backend).iter().any(|o| o.visible) {
            self.trigger(now_ms, backend);
        }
    }

    fn trigger(&mut self, now_ms: u64, backend: &dyn PageBackend) {
        self.has_animated = true;
        self.observer.disconnect();
        self.counters = self
            .numbers
            .iter()
            .enumerate()
            .map(|(i, &element)| Counter {
                element,
                target: backend
                    .attribute(element, "data-count")
                    .map_or(0, |raw| parse_count(&raw)),
                start_ms: now_ms + i as u64 * self.config.stagger_ms,
                shown: None,
                done: false,
            })
            .collect();
        log::debug!("counters: animating {} values", self.counters.len());
    }

    pub fn handle_event(&mut self, event: &PageEvent, now_ms: u64, backend: &mut dyn PageBackend) {
        if matches!(event, PageEvent::Scroll) && self.initialized {
            self.refresh_visibility(now_ms, backend);
        }
    }

    /// Render one animation frame.
    pub fn tick(&mut self, now_ms: u64, backend: &mut dyn PageBackend) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        let duration = self.config.duration_ms;
        for counter in self.counters.iter_mut().filter(|c| !c.done) {
            if now_ms < counter.start_ms {
                continue;
            }
            let elapsed = now_ms - counter.start_ms;
            let value = counter_value(counter.target, elapsed, duration);
            backend.set_text(counter.element, &value.to_string())?;
            counter.shown = Some(value);
            counter.done = elapsed >= duration;
        }
        Ok(())
    }

    pub fn destroy(&mut self) {
        self.observer.disconnect();
        self.destroyed = true;
    }

    pub fn has_animated(&self) -> bool {
        self.has_animated
    }

    pub fn is_finished(&self) -> bool {
        self.has_animated && self.counters.iter().all(|c| c.done)
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            triggered: self.has_animated,
            finished: self.is_finished(),
            values: self.counters.iter().map(|c| c.shown).collect(),
        }
    }
}
