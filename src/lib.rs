pub mod balancer;
pub mod config;
pub mod error;
pub mod history;
pub mod policy;
pub mod utils;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
