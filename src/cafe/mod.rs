//! Cafe state: money, tables, the game library, buffs, and reviews

pub mod buffs;
pub mod economy;
pub mod inventory;
pub mod reviews;
pub mod tables;
