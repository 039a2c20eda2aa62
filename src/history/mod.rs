//! This module contains the [`EpochHistory`] data structure.
//!
//! The history stores the fleet-size trajectory for one balanced fleet as an
//! ordered sequence of epochs, oldest first. The placement algorithm walks
//! this sequence forward to decide where a request lands, so the history is
//! the single piece of shared state in the crate. It is intended to be
//! thread-safe for changes made to it: one writer records fleet-size changes
//! while any number of readers take snapshots for placement.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Error, Result};

/// Type alias for the underlying sequence of fleet sizes, oldest first
type Epochs = Vec<usize>;

/// The thread-safe epoch sequence. Cloning yields another handle over the
/// same underlying history.
#[derive(Clone, Debug, Default)]
pub struct EpochHistory {
    inner: Arc<Mutex<Epochs>>,
}

impl EpochHistory {
    /// private function used to acquire a lock over the epoch sequence.
    /// A fail to acquire a lock is considered a [`Error::Logic`] since the only reason why
    /// an [`Error`] should be returned is in case of [`Mutex`] poisoning
    fn acquire_lock(&self) -> Result<MutexGuard<Epochs>> {
        match self.inner.lock() {
            Ok(guard) => Ok(guard),
            Err(_) => Err(Error::Logic {
                reason: "Unable to acquire lock over the epoch history - poisoned...".to_string(),
            }),
        }
    }

    /// Appends a fleet size to the tail of the history.
    ///
    /// No validation happens here - positivity is the caller's contract,
    /// enforced at the balancer boundary.
    pub fn append(&self, n: usize) -> Result<()> {
        let mut guard = self.acquire_lock()?;
        guard.push(n);
        Ok(())
    }

    /// Returns an owned copy of the current sequence. The copy is fully
    /// disconnected from the live history: it may become stale, but it can
    /// never be observed mid-mutation.
    pub fn snapshot(&self) -> Result<Vec<usize>> {
        let guard = self.acquire_lock()?;
        Ok(guard.clone())
    }

    /// Atomically replaces the entire history with a new sequence.
    ///
    /// An empty replacement is accepted, although it leaves the balancer
    /// unable to place requests until the next append.
    pub fn replace_all(&self, epochs: Vec<usize>) -> Result<()> {
        let mut guard = self.acquire_lock()?;
        *guard = epochs;
        Ok(())
    }

    /// Returns the current fleet size, or [`None`] if no epoch was recorded yet.
    pub fn last_epoch(&self) -> Result<Option<usize>> {
        let guard = self.acquire_lock()?;
        Ok(guard.last().copied())
    }

    /// Returns the count of epochs currently in the history.
    pub fn len(&self) -> Result<usize> {
        let guard = self.acquire_lock()?;
        Ok(guard.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Human-friendly rendering of the sequence, NOT a stable format.
impl std::fmt::Display for EpochHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_lock() {
            Ok(guard) => write!(f, "{:?}", *guard),
            Err(_) => write!(f, "Unable to acquire lock for display at this time..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EpochHistory;
    use crate::utils::generate_random_epochs;
    use quickcheck::Arbitrary;

    #[test]
    fn append_and_inspect() {
        let history = EpochHistory::default();
        assert!(history.is_empty().unwrap());
        assert_eq!(history.last_epoch().unwrap(), None);

        history.append(5).unwrap();
        history.append(7).unwrap();

        assert_eq!(history.len().unwrap(), 2);
        assert_eq!(history.last_epoch().unwrap(), Some(7));
        assert_eq!(history.snapshot().unwrap(), vec![5, 7]);
    }

    #[test]
    fn snapshot_is_disconnected() {
        let history = EpochHistory::default();
        history.append(5).unwrap();

        let mut snapshot = history.snapshot().unwrap();
        snapshot.push(42);

        assert_eq!(history.snapshot().unwrap(), vec![5]);
    }

    #[test]
    fn replace_all_swaps_the_whole_sequence() {
        let history = EpochHistory::default();
        history.append(5).unwrap();
        history.append(7).unwrap();

        history.replace_all(vec![3]).unwrap();
        assert_eq!(history.snapshot().unwrap(), vec![3]);
        assert_eq!(history.last_epoch().unwrap(), Some(3));
    }

    #[test]
    fn replace_all_accepts_empty() {
        let history = EpochHistory::default();
        history.append(5).unwrap();

        history.replace_all(Vec::new()).unwrap();
        assert!(history.is_empty().unwrap());
        assert_eq!(history.last_epoch().unwrap(), None);
    }

    #[test]
    fn concurrent_appends_are_not_lost() {
        let history = EpochHistory::default();
        let mut handles = Vec::new();
        for _ in 0..4 {
            let handle = history.clone();
            handles.push(std::thread::spawn(move || {
                for n in 1..=100 {
                    handle.append(n).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(history.len().unwrap(), 400);
    }

    #[derive(Debug, Clone)]
    struct AppendTestInput {
        epochs: Vec<usize>,
    }

    impl Arbitrary for AppendTestInput {
        fn arbitrary(_: &mut quickcheck::Gen) -> Self {
            Self {
                epochs: generate_random_epochs(0..50, 100),
            }
        }
    }

    #[quickcheck]
    fn test_snapshot_mirrors_appends_randomized(test_input: AppendTestInput) {
        let history = EpochHistory::default();
        for &n in test_input.epochs.iter() {
            history.append(n).unwrap();
        }

        assert_eq!(history.snapshot().unwrap(), test_input.epochs);
        assert_eq!(history.len().unwrap(), test_input.epochs.len());
        assert_eq!(
            history.last_epoch().unwrap(),
            test_input.epochs.last().copied()
        );
    }
}
