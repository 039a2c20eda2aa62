//! The library of WHEN policies shipped with the crate

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use super::WhenPolicy;

/// Never a good time to compact.
#[derive(Clone, Copy, Debug, Default)]
pub struct Never;

impl WhenPolicy for Never {
    fn should_compact(&self, _epochs: &[usize]) -> bool {
        false
    }
}

/// Always a good time to compact.
#[derive(Clone, Copy, Debug, Default)]
pub struct Always;

impl WhenPolicy for Always {
    fn should_compact(&self, _epochs: &[usize]) -> bool {
        true
    }
}

/// Compacts after every kth epoch.
///
/// The length is measured after the triggering append, so a period of 5
/// first fires when the fifth epoch lands.
#[derive(Clone, Copy, Debug)]
pub struct Periodic {
    every: usize,
}

impl Periodic {
    /// `every` must be at least 1.
    pub fn new(every: usize) -> Self {
        assert!(every > 0, "Periodic requires a period of at least 1");
        Self { every }
    }
}

impl WhenPolicy for Periodic {
    fn should_compact(&self, epochs: &[usize]) -> bool {
        epochs.len() % self.every == 0
    }
}

/// Compacts only when armed via [`OnDemand::set_go`].
///
/// The armed flag is consumed on read: the first check after arming fires
/// and disarms in one atomic step. The struct is cheap to clone and clones
/// share the flag, so callers keep a clone around for arming after the
/// balancer takes ownership of the other.
#[derive(Clone, Debug, Default)]
pub struct OnDemand {
    armed: Arc<AtomicBool>,
}

impl OnDemand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms (or disarms) the next compaction check.
    pub fn set_go(&self, go: bool) {
        self.armed.store(go, Ordering::SeqCst);
    }

    pub fn is_go(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }
}

impl WhenPolicy for OnDemand {
    fn should_compact(&self, _epochs: &[usize]) -> bool {
        self.armed.swap(false, Ordering::SeqCst)
    }
}

/// Compacts when the fleet size stops moving, ie the last two epochs are equal.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stasis;

impl WhenPolicy for Stasis {
    fn should_compact(&self, epochs: &[usize]) -> bool {
        let size = epochs.len();
        size > 1 && epochs[size - 1] == epochs[size - 2]
    }
}

/// Compacts while the fleet size sits below a threshold.
#[derive(Clone, Copy, Debug)]
pub struct LowServerCount {
    threshold: usize,
}

impl LowServerCount {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }
}

impl WhenPolicy for LowServerCount {
    fn should_compact(&self, epochs: &[usize]) -> bool {
        // An empty history counts as below any threshold.
        epochs.last().map_or(true, |last| *last < self.threshold)
    }
}

/// Compacts while the fleet size sits above a threshold.
#[derive(Clone, Copy, Debug)]
pub struct HighServerCount {
    threshold: usize,
}

impl HighServerCount {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }
}

impl WhenPolicy for HighServerCount {
    fn should_compact(&self, epochs: &[usize]) -> bool {
        epochs.last().map_or(false, |last| *last > self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::{Always, HighServerCount, LowServerCount, Never, OnDemand, Periodic, Stasis};
    use crate::policy::WhenPolicy;

    #[test]
    fn never_and_always() {
        assert!(!Never.should_compact(&[]));
        assert!(!Never.should_compact(&[5, 7, 4, 2]));
        assert!(Always.should_compact(&[]));
        assert!(Always.should_compact(&[5, 7, 4, 2]));
    }

    #[test]
    fn periodic_fires_on_multiples_of_the_period() {
        let periodic = Periodic::new(3);
        assert!(!periodic.should_compact(&[5]));
        assert!(!periodic.should_compact(&[5, 7]));
        assert!(periodic.should_compact(&[5, 7, 4]));
        assert!(!periodic.should_compact(&[5, 7, 4, 2]));
        assert!(periodic.should_compact(&[5, 7, 4, 2, 2, 6]));
    }

    #[test]
    #[should_panic]
    fn periodic_rejects_a_zero_period() {
        let _ = Periodic::new(0);
    }

    #[test]
    fn on_demand_consumes_the_armed_flag() {
        let on_demand = OnDemand::new();
        assert!(!on_demand.should_compact(&[5]));

        on_demand.set_go(true);
        assert!(on_demand.is_go());
        assert!(on_demand.should_compact(&[5]));
        // Consumed by the read above.
        assert!(!on_demand.is_go());
        assert!(!on_demand.should_compact(&[5]));
    }

    #[test]
    fn on_demand_clones_share_the_flag() {
        let handle = OnDemand::new();
        let moved_into_balancer = handle.clone();

        handle.set_go(true);
        assert!(moved_into_balancer.should_compact(&[5]));
        assert!(!handle.is_go());
    }

    #[test]
    fn stasis_needs_two_equal_entries_at_the_tail() {
        assert!(!Stasis.should_compact(&[]));
        assert!(!Stasis.should_compact(&[5]));
        assert!(Stasis.should_compact(&[5, 5]));
        assert!(!Stasis.should_compact(&[5, 7]));
        assert!(!Stasis.should_compact(&[5, 5, 7]));
        assert!(Stasis.should_compact(&[7, 5, 5]));
    }

    #[test]
    fn low_server_count_compares_the_current_fleet() {
        let low = LowServerCount::new(5);
        assert!(low.should_compact(&[7, 4]));
        assert!(!low.should_compact(&[2, 9]));
        assert!(!low.should_compact(&[5]));
        assert!(low.should_compact(&[]));
    }

    #[test]
    fn high_server_count_compares_the_current_fleet() {
        let high = HighServerCount::new(5);
        assert!(!high.should_compact(&[7, 4]));
        assert!(high.should_compact(&[2, 9]));
        assert!(!high.should_compact(&[5]));
        assert!(!high.should_compact(&[]));
    }
}
