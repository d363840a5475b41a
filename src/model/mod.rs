//! Probabilistic outcome models
//!
//! Pure functions over injected RNG handles: the satisfaction delta
//! pipeline, the recommendation roll, and the tiered promotion sampler.

pub mod promotion;
pub mod recommend;
pub mod satisfaction;
