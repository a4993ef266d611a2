//! Best survival time
//!
//! A single record, stored as a plain decimal string so older saves and
//! hand-edited values stay readable.

use crate::persistence::KeyValueStore;

/// Best survival time in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BestTime {
    pub seconds: f32,
}

impl BestTime {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "samuraiJump_highScore";

    /// Read the stored best, 0 when missing or unparsable
    pub fn load(store: &impl KeyValueStore) -> Self {
        let seconds = store
            .get(Self::STORAGE_KEY)
            .and_then(|raw| match raw.trim().parse::<f32>() {
                Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
                _ => {
                    log::warn!("Ignoring unreadable best time {raw:?}");
                    None
                }
            })
            .unwrap_or(0.0);
        Self { seconds }
    }

    /// Record a new sample. Returns true if it beat the best.
    pub fn submit(&mut self, seconds: f32) -> bool {
        if seconds > self.seconds {
            self.seconds = seconds;
            true
        } else {
            false
        }
    }

    /// Persist (best effort)
    pub fn save(&self, store: &mut impl KeyValueStore) {
        if !store.set(Self::STORAGE_KEY, &self.seconds.to_string()) {
            log::warn!("Best time could not be saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_missing_is_zero() {
        assert_eq!(BestTime::load(&MemoryStore::new()).seconds, 0.0);
    }

    #[test]
    fn test_unparsable_is_zero() {
        let mut store = MemoryStore::new();
        store.set(BestTime::STORAGE_KEY, "abc");
        assert_eq!(BestTime::load(&store).seconds, 0.0);
        store.set(BestTime::STORAGE_KEY, "-4");
        assert_eq!(BestTime::load(&store).seconds, 0.0);
    }

    #[test]
    fn test_decimal_string_format() {
        let mut store = MemoryStore::new();
        store.set(BestTime::STORAGE_KEY, "12.5");
        let mut best = BestTime::load(&store);
        assert_eq!(best.seconds, 12.5);

        assert!(!best.submit(10.0));
        assert!(best.submit(20.25));
        best.save(&mut store);
        assert_eq!(store.get(BestTime::STORAGE_KEY).as_deref(), Some("20.25"));
    }
}
