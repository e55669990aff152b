//! Per-tag scan debouncing
//!
//! A single physical presentation of a card is often read several times by
//! the reader. The `Debouncer` remembers when each tag was last processed and
//! rejects repeated reads of the same tag inside the cooldown window. Other
//! tags are not affected.

use crate::types::TagId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default cooldown between two processed scans of the same tag
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(2);

/// Tracks the last processed scan time of every tag
#[derive(Debug)]
pub struct Debouncer {
    cooldown: Duration,
    last_seen: HashMap<TagId, Instant>,
}

impl Debouncer {
    pub fn new(cooldown: Duration) -> Self {
        Debouncer {
            cooldown,
            last_seen: HashMap::new(),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Decide whether a read of `tag` at `now` should be processed
    ///
    /// Returns `true` and records `now` as the tag's last scan time when the
    /// tag was never seen or its cooldown has elapsed. Returns `false` for a
    /// repeated read inside the window; the recorded time is not extended, so
    /// a card held against the reader is processed again once per cooldown.
    pub fn admit(&mut self, tag: &str, now: Instant) -> bool {
        if let Some(last) = self.last_seen.get(tag) {
            if now.saturating_duration_since(*last) < self.cooldown {
                return false;
            }
        }

        self.last_seen.insert(tag.to_string(), now);
        true
    }

    /// Forget tags whose cooldown elapsed before `now`
    pub fn prune(&mut self, now: Instant) {
        let cooldown = self.cooldown;
        self.last_seen
            .retain(|_, last| now.saturating_duration_since(*last) < cooldown);
    }

    /// Number of tags currently inside their cooldown window
    pub fn tracked(&self) -> usize {
        self.last_seen.len()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}
