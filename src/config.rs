//! Typed configuration for a balancer's policy pair.
//!
//! The crate does not load configuration files itself - callers deserialize
//! these types from whatever source they have and call [`Config::build`].
//! An [`WhenConfig::OnDemand`] built this way cannot be armed afterwards,
//! since the arming handle stays inside the balancer; callers that need
//! arming should construct [`crate::policy::when::OnDemand`] directly and
//! keep a clone.

use serde::{Deserialize, Serialize};

use crate::balancer::PlasticHash;
use crate::policy::{what, when, WhatPolicy, WhenPolicy};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    pub when: WhenConfig,
    pub what: WhatConfig,
}

impl Config {
    pub fn build(self) -> PlasticHash {
        PlasticHash::new(self.when.build(), self.what.build())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhenConfig {
    Never,
    Always,
    Periodic { every: usize },
    OnDemand,
    Stasis,
    LowServerCount { threshold: usize },
    HighServerCount { threshold: usize },
}

impl WhenConfig {
    /// Panics if `Periodic` carries a zero period, mirroring the policy's
    /// constructor contract.
    pub fn build(self) -> Box<dyn WhenPolicy> {
        match self {
            Self::Never => Box::new(when::Never),
            Self::Always => Box::new(when::Always),
            Self::Periodic { every } => Box::new(when::Periodic::new(every)),
            Self::OnDemand => Box::new(when::OnDemand::new()),
            Self::Stasis => Box::new(when::Stasis),
            Self::LowServerCount { threshold } => Box::new(when::LowServerCount::new(threshold)),
            Self::HighServerCount { threshold } => Box::new(when::HighServerCount::new(threshold)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhatConfig {
    Snap,
    Squeeze,
    Halve,
    Spring,
    Anneal,
}

impl WhatConfig {
    pub fn build(self) -> Box<dyn WhatPolicy> {
        match self {
            Self::Snap => Box::new(what::Snap),
            Self::Squeeze => Box::new(what::Squeeze),
            Self::Halve => Box::new(what::Halve),
            Self::Spring => Box::new(what::Spring),
            Self::Anneal => Box::new(what::Anneal),
        }
    }
}
