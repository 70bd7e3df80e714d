//! Sources for the `id` field of translation requests
//!
//! The MTUOC API requires an integer `id` in every request. Its meaning is not
//! documented; it is treated as an opaque tag and never read back.

use rand::Rng;
use std::sync::atomic::{AtomicU32, Ordering};

pub const MIN_REQUEST_ID: u32 = 1;
pub const MAX_REQUEST_ID: u32 = 1000;

/// Generator of request ids, injected into [`crate::MtuocConnector`]
///
/// Implementations are shared across queries, hence `&self` and `Sync`.
pub trait RequestIdSource: Send + Sync {
    /// Next id, within `MIN_REQUEST_ID..=MAX_REQUEST_ID`
    fn next_id(&self) -> u32;
}

/// Uniformly random ids from the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdSource;

impl RequestIdSource for RandomIdSource {
    fn next_id(&self) -> u32 {
        rand::rng().random_range(MIN_REQUEST_ID..=MAX_REQUEST_ID)
    }
}

/// Always the same id
#[derive(Debug, Clone, Copy)]
pub struct FixedIdSource(u32);

impl FixedIdSource {
    /// Out-of-range ids are clamped into `MIN_REQUEST_ID..=MAX_REQUEST_ID`
    pub fn new(id: u32) -> Self {
        FixedIdSource(id.clamp(MIN_REQUEST_ID, MAX_REQUEST_ID))
    }
}

impl RequestIdSource for FixedIdSource {
    fn next_id(&self) -> u32 {
        self.0
    }
}

/// 1, 2, 3, ... wrapping back to 1 after `MAX_REQUEST_ID`
#[derive(Debug)]
pub struct SequentialIdSource {
    next: AtomicU32,
}

impl SequentialIdSource {
    /// Start a sequence whose first id is `MIN_REQUEST_ID`
    pub fn new() -> Self {
        SequentialIdSource {
            next: AtomicU32::new(0),
        }
    }
}

impl Default for SequentialIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestIdSource for SequentialIdSource {
    fn next_id(&self) -> u32 {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        n % MAX_REQUEST_ID + MIN_REQUEST_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_in_range() {
        let source = RandomIdSource;
        for _ in 0..2000 {
            let id = source.next_id();
            assert!((MIN_REQUEST_ID..=MAX_REQUEST_ID).contains(&id));
        }
    }

    #[test]
    fn test_fixed_id() {
        let source = FixedIdSource::new(42);
        assert_eq!(source.next_id(), 42);
        assert_eq!(source.next_id(), 42);
    }

    #[test]
    fn test_fixed_id_clamped() {
        assert_eq!(FixedIdSource::new(0).next_id(), 1);
        assert_eq!(FixedIdSource::new(5000).next_id(), 1000);
    }

    #[test]
    fn test_sequential_wraps() {
        let source = SequentialIdSource::new();
        assert_eq!(source.next_id(), 1);
        assert_eq!(source.next_id(), 2);
        for _ in 2..MAX_REQUEST_ID {
            source.next_id();
        }
        assert_eq!(source.next_id(), 1);
    }
}
