// Id generation for tags and lines
//
// Ids are injected rather than drawn from global state so that tests can pin
// them down (SequentialIds) while the running client uses opaque values.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh ids for tags and lines
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> u64;
}

/// Monotonic counter starting at 1
#[cfg(test)]
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

#[cfg(test)]
impl SequentialIds {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}

#[cfg(test)]
impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl IdGenerator for SequentialIds {
    fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// Opaque 64-bit ids: a counter hashed with a per-instance random key
///
/// Uses the std RandomState so no RNG dependency is needed.
#[derive(Debug, Default)]
pub struct RandomIds {
    state: RandomState,
    counter: AtomicU64,
}

impl RandomIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&self) -> u64 {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let mut hasher = self.state.build_hasher();
        hasher.write_u64(n);
        hasher.finish()
    }
}

impl<T: IdGenerator + ?Sized> IdGenerator for &T {
    fn next_id(&self) -> u64 {
        (**self).next_id()
    }
}

impl<T: IdGenerator + ?Sized> IdGenerator for std::sync::Arc<T> {
    fn next_id(&self) -> u64 {
        (**self).next_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_ids_count_up() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.next_id(), 3);
    }

    #[test]
    fn test_random_ids_are_distinct() {
        let ids = RandomIds::new();
        let seen: HashSet<u64> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn test_generators_work_through_references() {
        let ids = SequentialIds::new();
        let by_ref: &dyn IdGenerator = &ids;
        assert_eq!(by_ref.next_id(), 1);
        assert_eq!((&ids).next_id(), 2);
    }
}
