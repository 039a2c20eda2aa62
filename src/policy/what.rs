//! The library of WHAT policies shipped with the crate
//!
//! Every rewrite here preserves the current fleet size as the tail of the
//! output and no-ops on an empty snapshot.

use super::WhatPolicy;

/// Discards all history, keeping only the current fleet size.
#[derive(Clone, Copy, Debug, Default)]
pub struct Snap;

impl WhatPolicy for Snap {
    fn rewrite(&self, epochs: &[usize]) -> Vec<usize> {
        match epochs.last() {
            Some(last) => vec![*last],
            None => Vec::new(),
        }
    }
}

/// Collapses runs of equal adjacent fleet sizes into single entries.
///
/// Equal neighbours carry no placement information - `id mod n` lands on the
/// same server twice - so squeezing them out changes no allocation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Squeeze;

impl WhatPolicy for Squeeze {
    fn rewrite(&self, epochs: &[usize]) -> Vec<usize> {
        let mut rewritten = epochs.to_vec();
        rewritten.dedup();
        rewritten
    }
}

/// Retains the newer half of the history.
///
/// For odd lengths the kept half is the larger one: a 5-entry history keeps
/// its newest 3 entries.
#[derive(Clone, Copy, Debug, Default)]
pub struct Halve;

impl WhatPolicy for Halve {
    fn rewrite(&self, epochs: &[usize]) -> Vec<usize> {
        let kept = (epochs.len() as f64 / 2.0).round() as usize;
        epochs[epochs.len() - kept..].to_vec()
    }
}

/// Rolls history back to the earliest occurrence of the current fleet size.
///
/// If the fleet returned to a size it held before, every epoch in between
/// was a detour; the prefix up to that first occurrence places requests the
/// same way the full history does for the current fleet.
#[derive(Clone, Copy, Debug, Default)]
pub struct Spring;

impl WhatPolicy for Spring {
    fn rewrite(&self, epochs: &[usize]) -> Vec<usize> {
        let last = match epochs.last() {
            Some(last) => *last,
            None => return Vec::new(),
        };
        let earliest = epochs
            .iter()
            .position(|&epoch| epoch == last)
            .unwrap_or(epochs.len() - 1);
        epochs[..=earliest].to_vec()
    }
}

/// Conservative single-step smoothing of the history, newest to oldest.
///
/// Equal-adjacent entries squeeze out for free; beyond that, at most one
/// entry moves one unit toward its newer neighbour per invocation. Repeated
/// rounds pull a jagged history toward the current fleet size while paying
/// at most one unit of migration each time.
#[derive(Clone, Copy, Debug, Default)]
pub struct Anneal;

impl WhatPolicy for Anneal {
    fn rewrite(&self, epochs: &[usize]) -> Vec<usize> {
        if epochs.is_empty() {
            return Vec::new();
        }
        // Accumulates the rewritten history newest-first.
        let mut rewritten = vec![epochs[epochs.len() - 1]];
        let mut changed = false;
        for i in (0..epochs.len() - 1).rev() {
            // Comparisons run against the original neighbour, not the
            // entry just emitted.
            if epochs[i] == epochs[i + 1] {
                // A true squeeze: no allocation changes, so it does not
                // consume the single-change budget.
            } else if !changed && epochs[i] < epochs[i + 1] {
                rewritten.push(epochs[i] + 1);
                changed = true;
            } else if !changed && epochs[i] > epochs[i + 1] {
                rewritten.push(epochs[i] - 1);
                changed = true;
            } else {
                rewritten.push(epochs[i]);
            }
        }
        rewritten.reverse();
        rewritten
    }
}
