//! Timing utilities: easing, interpolation, viewport tests, and rate
//! limiting gates for high-frequency events.

use vitrin_types::geometry::Rect;

/// Quartic ease-out: fast start, long gentle finish.
///
/// Input is clamped to `[0.0, 1.0]`; `ease_out_quart(0) == 0` and
/// `ease_out_quart(1) == 1` exactly.
pub fn ease_out_quart(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv
}

/// Linear interpolation between `start` and `end`.
pub fn lerp(start: f32, end: f32, factor: f32) -> f32 {
    start + (end - start) * factor
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics: an inverted range yields `min`'s
/// side first, the way `Math.min(Math.max(v, min), max)` does.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Whether `rect` (viewport-relative) is inside the viewport with `margin`
/// pixels to spare at both edges. A negative margin widens the test.
pub fn is_in_viewport(rect: Rect, viewport_height: f32, margin: f32) -> bool {
    rect.top <= viewport_height - margin && rect.bottom() >= margin
}

/// Leading-edge throttle: lets the first call through, then rejects calls
/// until `limit_ms` has passed. Rejected calls are dropped, not deferred.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    limit_ms: u64,
    blocked_until: Option<u64>,
}

impl Throttle {
    pub const fn new(limit_ms: u64) -> Self {
        Self {
            limit_ms,
            blocked_until: None,
        }
    }

    /// Returns true when the caller may run now.
    pub fn ready(&mut self, now_ms: u64) -> bool {
        if let Some(until) = self.blocked_until
            && now_ms < until
        {
            return false;
        }
        self.blocked_until = Some(now_ms + self.limit_ms);
        true
    }
}

/// Trailing-edge debounce: fires once after calls stop for `wait_ms`.
#[derive(Debug, Clone, Copy)]
pub struct Debounce {
    wait_ms: u64,
    due: Option<u64>,
}

impl Debounce {
    pub const fn new(wait_ms: u64) -> Self {
        Self { wait_ms, due: None }
    }

    /// Record a call; pushes the firing point out to `now + wait`.
    pub fn call(&mut self, now_ms: u64) {
        self.due = Some(now_ms + self.wait_ms);
    }

    /// Returns true exactly once per quiet period, when it has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.due {
            Some(due) if now_ms >= due => {
                self.due = None;
                true
            },
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }
}
