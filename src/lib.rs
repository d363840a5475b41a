//! Boardcafe - time-stepped board-game cafe management simulation

pub mod cafe;
pub mod catalog;
pub mod core;
pub mod model;
pub mod providers;
pub mod sim;
