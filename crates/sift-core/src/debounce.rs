#![forbid(unsafe_code)]

//! Time-injected value debouncing.
//!
//! A [`Debouncer`] delays propagation of a changing value until it has been
//! stable for a fixed interval. Every new value cancels the emission
//! scheduled by the previous one, so a burst of edits yields exactly one
//! emission carrying the last value of the burst.
//!
//! # State Machine
//!
//! ```text
//!                 feed(v)                     poll(now >= deadline)
//! ┌──────────┐ ─────────────▶ ┌─────────────────┐ ───────────────────▶ emit v
//! │   Idle   │                │ Pending { v, t } │                      (if v != last)
//! └──────────┘ ◀───────────── └─────────────────┘
//!      ▲          cancel()           │  ▲
//!      │                             └──┘ feed(v'): replace v, restart t
//!      └───────────────────────────────────────────────────────── after emit
//! ```
//!
//! The debouncer never reads the clock. Callers pass `now` to [`feed`] and
//! [`poll`], and use [`deadline`] to schedule their next wakeup.
//!
//! # Example
//!
//! ```
//! use web_time::{Duration, Instant};
//! use sift_core::debounce::{DebounceConfig, Debouncer};
//!
//! let mut debouncer = Debouncer::new(DebounceConfig::default(), String::new());
//! let t = Instant::now();
//!
//! debouncer.feed("x".to_string(), t);
//! debouncer.feed("xy".to_string(), t + Duration::from_millis(100));
//!
//! // Still inside the window measured from the last feed.
//! assert_eq!(debouncer.poll(t + Duration::from_millis(500)), None);
//!
//! // Settled: only the final value comes out.
//! let settled = debouncer.poll(t + Duration::from_millis(600));
//! assert_eq!(settled.as_deref(), Some("xy"));
//! ```
//!
//! [`feed`]: Debouncer::feed
//! [`poll`]: Debouncer::poll
//! [`deadline`]: Debouncer::deadline

use web_time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Configuration Constants
// ---------------------------------------------------------------------------

/// Default stability window before a value is emitted.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Minimum allowed debounce window.
pub const MIN_DEBOUNCE_MS: u64 = 0;

/// Maximum allowed debounce window.
pub const MAX_DEBOUNCE_MS: u64 = 5_000;

/// Environment variable overriding the debounce window.
pub const DEBOUNCE_ENV_VAR: &str = "SIFT_DEBOUNCE_MS";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for a [`Debouncer`].
///
/// | Setting | Default | Range | Env |
/// |---------|---------|-------|-----|
/// | `delay` | 500ms | 0-5000ms | `SIFT_DEBOUNCE_MS` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// How long a value must stay unchanged before it is emitted.
    pub delay: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl DebounceConfig {
    /// Create a config with the given delay in milliseconds.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(ms),
        }
    }

    /// Set a custom delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Load config from the environment.
    ///
    /// Reads `SIFT_DEBOUNCE_MS`; see [`from_env_value`](Self::from_env_value)
    /// for how the raw value is interpreted. Widgets never call this on
    /// their own: hosts opt in by passing the result to the widget builder.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(DEBOUNCE_ENV_VAR).ok().as_deref())
    }

    /// Build a config from a raw `SIFT_DEBOUNCE_MS` value.
    ///
    /// Missing or unparseable values fall back to the default and the
    /// result is clamped to the valid range.
    ///
    /// ```
    /// use sift_core::debounce::DebounceConfig;
    ///
    /// assert_eq!(DebounceConfig::from_env_value(Some(" 250 ")).delay.as_millis(), 250);
    /// assert_eq!(DebounceConfig::from_env_value(Some("soon")).delay.as_millis(), 500);
    /// ```
    #[must_use]
    pub fn from_env_value(raw: Option<&str>) -> Self {
        let mut config = Self::default();

        if let Some(val) = raw
            && let Ok(ms) = val.trim().parse::<u64>()
        {
            config.delay = Duration::from_millis(ms);
        }

        config.validated()
    }

    /// Clamp the delay to 0-5000ms.
    ///
    /// ```
    /// use sift_core::debounce::DebounceConfig;
    ///
    /// let config = DebounceConfig::from_millis(60_000).validated();
    /// assert_eq!(config.delay.as_millis(), 5_000);
    /// ```
    #[must_use]
    pub fn validated(mut self) -> Self {
        let ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX);
        self.delay = Duration::from_millis(ms.clamp(MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS));
        self
    }

    /// Check if the delay is within the valid range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        u64::try_from(self.delay.as_millis())
            .is_ok_and(|ms| (MIN_DEBOUNCE_MS..=MAX_DEBOUNCE_MS).contains(&ms))
    }
}

// ---------------------------------------------------------------------------
// Debouncer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum DebounceState<T> {
    Idle,
    Pending { value: T, since: Instant },
}

/// Coalesces rapid value changes into one emission per stability window.
///
/// # Guarantees
///
/// - At most one emission per window; the window restarts on every
///   [`feed`](Self::feed).
/// - An emission always carries the most recently fed value.
/// - A settled value equal to the last emitted one is swallowed, so a value
///   that was edited and then restored does not re-trigger downstream work.
///
/// # Thread Safety
///
/// Single-owner and not synchronized; drive it from one event loop.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    config: DebounceConfig,
    state: DebounceState<T>,
    last_emitted: T,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Create a debouncer. `initial` counts as already emitted.
    #[must_use]
    pub fn new(config: DebounceConfig, initial: T) -> Self {
        Self {
            config,
            state: DebounceState::Idle,
            last_emitted: initial,
        }
    }

    /// Record a new value, cancelling any pending emission.
    pub fn feed(&mut self, value: T, now: Instant) {
        self.state = DebounceState::Pending { value, since: now };
    }

    /// Emit the pending value if it has been stable for the configured delay.
    ///
    /// Returns `None` when nothing is pending, the window has not elapsed,
    /// or the settled value equals the last emitted one.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let DebounceState::Pending { since, .. } = &self.state else {
            return None;
        };
        if now.saturating_duration_since(*since) < self.config.delay {
            return None;
        }
        self.take_pending()
    }

    /// Emit the pending value immediately, ignoring the window.
    pub fn flush(&mut self) -> Option<T> {
        self.take_pending()
    }

    fn take_pending(&mut self) -> Option<T> {
        match std::mem::replace(&mut self.state, DebounceState::Idle) {
            DebounceState::Idle => None,
            DebounceState::Pending { value, .. } => {
                if value == self.last_emitted {
                    return None;
                }
                self.last_emitted = value.clone();
                Some(value)
            }
        }
    }

    /// Instant at which the pending value will settle, if any.
    ///
    /// `None` also when the deadline is not representable (a delay so large
    /// the value never settles).
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            DebounceState::Idle => None,
            DebounceState::Pending { since, .. } => since.checked_add(self.config.delay),
        }
    }

    /// Whether a value is waiting for its window to elapse.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    /// The pending value, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&T> {
        match &self.state {
            DebounceState::Idle => None,
            DebounceState::Pending { value, .. } => Some(value),
        }
    }

    /// Discard the pending value without emitting it.
    pub fn cancel(&mut self) {
        self.state = DebounceState::Idle;
    }

    /// The value most recently emitted (or the initial value).
    #[must_use]
    pub fn last_emitted(&self) -> &T {
        &self.last_emitted
    }

    /// Get a reference to the current configuration.
    #[must_use]
    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    /// Update the configuration.
    ///
    /// A pending value keeps its start instant; the new delay applies to it.
    pub fn set_config(&mut self, config: DebounceConfig) {
        self.config = config;
    }
}
