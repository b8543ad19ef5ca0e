//! Deferred and repeating timers over a caller-supplied clock.
//!
//! A `Timer` is the single handle a controller keeps per timing concern.
//! Starting a timer replaces whatever it was doing before, so there is never
//! more than one pending callback per handle.

/// One-shot or repeating deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    due_ms: Option<u64>,
    period_ms: Option<u64>,
}

impl Timer {
    pub const fn idle() -> Self {
        Self {
            due_ms: None,
            period_ms: None,
        }
    }

    /// Arm a one-shot firing `delay_ms` from now, replacing any previous arm.
    pub fn start_once(&mut self, now_ms: u64, delay_ms: u64) {
        self.due_ms = Some(now_ms + delay_ms);
        self.period_ms = None;
    }

    /// Arm a repeating firing every `period_ms`, first one a full period out.
    pub fn start_repeating(&mut self, now_ms: u64, period_ms: u64) {
        let period = period_ms.max(1);
        self.due_ms = Some(now_ms + period);
        self.period_ms = Some(period);
    }

    pub fn cancel(&mut self) {
        self.due_ms = None;
        self.period_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due_ms.is_some()
    }

    pub fn is_repeating(&self) -> bool {
        self.period_ms.is_some()
    }

    pub fn due_ms(&self) -> Option<u64> {
        self.due_ms
    }

    /// Returns true if the deadline has passed, consuming the firing.
    ///
    /// A repeating timer re-arms on its own cadence; periods missed entirely
    /// (e.g. a throttled background tab) collapse into this single firing.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        let Some(due) = self.due_ms else {
            return false;
        };
        if now_ms < due {
            return false;
        }
        self.due_ms = self.period_ms.map(|period| {
            let missed = (now_ms - due) / period;
            due + (missed + 1) * period
        });
        true
    }
}
