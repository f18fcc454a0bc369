//! # Core Engine Module
//!
//! Main-loop plumbing shared by the [`Engine`](crate::Engine): the
//! per-frame continuation policy.

pub mod loop_policy;

pub use loop_policy::LoopPolicy;
