use std::collections::{HashMap, HashSet};

pub const DEFAULT_MAX_UNIQUE_ATTEMPTS: u32 = 1000;

/// Values already handed out, per field.
#[derive(Debug, Clone)]
pub struct UniqueTracker {
    seen: HashMap<String, HashSet<String>>,
    max_attempts: u32,
}

impl Default for UniqueTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UNIQUE_ATTEMPTS)
    }
}

impl UniqueTracker {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            seen: HashMap::new(),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Record `value` for `field`; returns false if it was already taken.
    pub fn insert(&mut self, field: &str, value: &str) -> bool {
        let values = self.seen.entry(field.to_string()).or_default();
        if values.contains(value) {
            return false;
        }
        values.insert(value.to_string());
        true
    }

    pub fn seen_count(&self, field: &str) -> usize {
        self.seen.get(field).map(HashSet::len).unwrap_or(0)
    }
}
