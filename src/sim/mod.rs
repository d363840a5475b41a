//! Simulation scheduling and stepping
//!
//! Two independent cadences drive the engine: the fine-grained tick
//! ([`tick::run_tick`]) and the coarse day boundary ([`day::run_day`]).
//! Player actions ([`actions`]) interleave between steps; every step and
//! action runs to completion over the single [`engine::Engine`] aggregate.

pub mod actions;
pub mod clock;
pub mod day;
pub mod engine;
pub mod events;
pub mod tick;

pub use clock::SimClock;
pub use engine::{Engine, EngineSnapshot, Prompt};
pub use events::SimEvent;
