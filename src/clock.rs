use std::time::Duration;

/// Milliseconds on the page clock. Browser timestamps are fractional, so this wraps an `f64`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Timestamp(f64);

impl Timestamp {
    pub const ZERO: Self = Self(0.0);

    pub fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    pub fn as_millis(self) -> f64 {
        self.0
    }

    pub fn after(self, delay: Duration) -> Self {
        Self(self.0 + delay.as_secs_f64() * 1_000.0)
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future.
    pub fn since(self, earlier: Timestamp) -> Duration {
        let millis = self.0 - earlier.0;
        if millis.is_finite() && millis > 0.0 {
            Duration::from_secs_f64(millis / 1_000.0)
        } else {
            Duration::ZERO
        }
    }

    /// Whole milliseconds until `self`, rounded up so a timer never fires early.
    pub fn millis_until(self, now: Timestamp) -> u32 {
        let remaining = (self.0 - now.0).ceil();
        if remaining.is_finite() && remaining > 0.0 {
            remaining.min(f64::from(u32::MAX)) as u32
        } else {
            0
        }
    }
}

/// Monotonic page time from `performance.now()`. Wall-clock time only when
/// the page has no `Performance` object.
#[cfg(target_arch = "wasm32")]
pub fn now() -> Timestamp {
    let millis = web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now);
    Timestamp::from_millis(millis)
}

/// Milliseconds since the first call in this process.
#[cfg(not(target_arch = "wasm32"))]
pub fn now() -> Timestamp {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    let origin = *ORIGIN.get_or_init(Instant::now);
    Timestamp::from_millis(origin.elapsed().as_secs_f64() * 1_000.0)
}

/// Unix time in milliseconds, for log records rather than animation.
#[cfg(target_arch = "wasm32")]
pub fn now_unix_millis() -> Timestamp {
    Timestamp::from_millis(js_sys::Date::now())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_unix_millis() -> Timestamp {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| Timestamp::from_millis(value.as_secs_f64() * 1_000.0))
        .unwrap_or(Timestamp::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_saturates_when_earlier_is_later() {
        let a = Timestamp::from_millis(100.0);
        let b = Timestamp::from_millis(350.0);

        assert_eq!(b.since(a), Duration::from_millis(250));
        assert_eq!(a.since(b), Duration::ZERO);
    }

    #[test]
    fn millis_until_rounds_up() {
        let now = Timestamp::from_millis(10.2);
        let due = Timestamp::from_millis(20.0);

        assert_eq!(due.millis_until(now), 10);
        assert_eq!(now.millis_until(due), 0);
    }

    #[test]
    fn now_never_runs_backwards() {
        let mut previous = now();
        for _ in 0..1_000 {
            let next = now();
            assert!(next >= previous);
            previous = next;
        }
    }
}
