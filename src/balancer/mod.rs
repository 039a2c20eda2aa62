//! This module contains the [`PlasticHash`] balancer.
//!
//! A balancer instance encapsulates one epoch history and one each of a
//! when/what compaction policy, so one instance governs one fleet. Unlike a
//! hash ring, placement is not computed from the current fleet size alone:
//! the algorithm walks the recorded fleet-size history forward and migrates
//! an assignment only when an epoch forces it, which is what keeps the
//! mapping "plastic" - it reshapes gradually instead of reshuffling globally
//! every time the fleet changes.

use std::fmt::Display;

use tracing::{event, Level};

use crate::error::{Error, Result};
use crate::history::EpochHistory;
use crate::policy::{what::Snap, when::Stasis, WhatPolicy, WhenPolicy};

/// The balancer. Owns the history exclusively; policies only ever see
/// snapshots of it.
#[derive(Debug)]
pub struct PlasticHash {
    history: EpochHistory,
    when: Box<dyn WhenPolicy>,
    what: Box<dyn WhatPolicy>,
}

impl Default for PlasticHash {
    /// Stasis + Snap: forget all history once the fleet stops changing.
    fn default() -> Self {
        Self::new(Box::new(Stasis), Box::new(Snap))
    }
}

impl PlasticHash {
    pub fn new(when: Box<dyn WhenPolicy>, what: Box<dyn WhatPolicy>) -> Self {
        Self {
            history: EpochHistory::default(),
            when,
            what,
        }
    }

    /// Records a fleet-size change, then gives the policy pair a chance to
    /// compact the grown history. Returns `&self` so calls can be chained.
    ///
    /// `add_epoch` expects a single writer; concurrent placement reads are
    /// fine and at worst observe a one-step-stale history.
    pub fn add_epoch(&self, n: usize) -> Result<&Self> {
        if n == 0 {
            return Err(Error::InvalidEpoch { got: n });
        }
        self.history.append(n)?;

        let snapshot = self.history.snapshot()?;
        if self.when.should_compact(&snapshot) {
            let rewritten = self.what.rewrite(&snapshot);
            event!(
                Level::DEBUG,
                what = ?self.what,
                before = snapshot.len(),
                after = rewritten.len(),
                "Compaction fired"
            );
            self.history.replace_all(rewritten)?;
        }

        Ok(self)
    }

    /// Resolves one request to a zero-based server index in the current fleet.
    ///
    /// The walk runs over a snapshot: stale perhaps, but never inconsistent.
    /// Chasing the freshest history instead would force every read through
    /// the lock for barely any difference in where requests land.
    pub fn server_for(&self, id: u64) -> Result<usize> {
        let epochs = self.history.snapshot()?;

        let mut fleet = *epochs.first().ok_or(Error::EmptyHistory)?;
        let mut server = (id % fleet as u64) as usize;
        for &next in &epochs[1..] {
            // A zero marks the end of meaningful history.
            if next == 0 {
                break;
            }
            let candidate = (id % next as u64) as usize;
            // Migrate only when forced: either the fleet grew and the new
            // mod lands in territory the old mapping could not reach, or it
            // shrank and the old server no longer exists.
            if (next > fleet && candidate >= fleet) || (next < fleet && server >= next) {
                fleet = next;
                server = candidate;
            }
        }

        // The history may have moved on while we walked the snapshot, and
        // the selected server may be outside the fleet by now. Re-running
        // the walk could lose the same race again, so orphans go to server
        // 0 instead - it exists as long as any epoch does.
        match self.history.last_epoch()? {
            Some(last) if server < last => Ok(server),
            Some(_) => Ok(0),
            None => Err(Error::EmptyHistory),
        }
    }

    /// Read access to the underlying history, for inspection.
    pub fn history(&self) -> &EpochHistory {
        &self.history
    }
}

impl Display for PlasticHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "When={:?} What={:?} History={}",
            self.when, self.what, self.history
        )
    }
}
