//! Module that contains the compaction policy pair
//!
//! After every appended epoch the balancer asks a [`WhenPolicy`] whether the
//! history should be compacted, and if so asks a [`WhatPolicy`] to rewrite
//! it. Both run over an owned snapshot, entirely outside the history's lock,
//! so slow policy logic can never stall placement readers.

use std::fmt::Debug;

pub mod mock;
pub mod what;
pub mod when;

/// Decides WHEN the epoch history should be compacted.
///
/// Implementations answer a yes/no question over a snapshot taken right
/// after the triggering append. Most variants are stateless; the one that
/// is not ([`when::OnDemand`]) keeps its state behind an atomic so the
/// shared-reference call still works.
pub trait WhenPolicy: Debug + Send + Sync {
    /// returns true if the history should be compacted now
    fn should_compact(&self, epochs: &[usize]) -> bool;
}

/// Decides WHAT the epoch history is rewritten to when compaction fires.
///
/// Implementations are pure over the snapshot they receive and never fail.
/// On non-empty input the rewrite must be non-empty and preserve the tail
/// (the current fleet size), and must never emit a zero.
pub trait WhatPolicy: Debug + Send + Sync {
    /// computes the replacement history from a snapshot
    fn rewrite(&self, epochs: &[usize]) -> Vec<usize>;
}
