//! The mock module contains mock [`WhenPolicy`]/[`WhatPolicy`] implementations used for tests

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use super::{WhatPolicy, WhenPolicy};

/// For the purpose of these tests we don't care about real compaction
/// decisions - just give a canned answer and keep count of how many times
/// the balancer asked.
#[derive(Clone, Debug)]
pub struct MockWhenPolicy {
    answer: bool,
    invocations: Arc<AtomicUsize>,
}

impl MockWhenPolicy {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            invocations: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl WhenPolicy for MockWhenPolicy {
    fn should_compact(&self, _epochs: &[usize]) -> bool {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

/// Rewrites to a canned sequence no matter what the snapshot holds, so
/// tests can tell whether the balancer applied the rewrite.
#[derive(Clone, Debug)]
pub struct MockWhatPolicy {
    canned: Vec<usize>,
    invocations: Arc<AtomicUsize>,
}

impl MockWhatPolicy {
    pub fn returning(canned: Vec<usize>) -> Self {
        Self {
            canned,
            invocations: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl WhatPolicy for MockWhatPolicy {
    fn rewrite(&self, _epochs: &[usize]) -> Vec<usize> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.canned.clone()
    }
}
