//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use crate::core::types::Money;

/// Configuration for the cafe simulation
///
/// These values have been tuned to produce good pacing over a 30-day month.
/// Changing them will affect gameplay pacing and feel.
#[derive(Debug, Clone)]
pub struct CafeConfig {
    // === STARTING STATE ===
    /// Funds the cafe opens with
    ///
    /// Enough for roughly one month of maintenance plus one or two
    /// mid-priced purchases; running promotions early requires revenue.
    pub initial_funds: Money,

    /// Starting aggregate satisfaction on the 0-100 scale
    ///
    /// 20 corresponds to a 2.0 public rating; arrivals start on the
    /// pessimistic branch of the initial-satisfaction rule.
    pub initial_satisfaction: f64,

    /// Starting regular-customer count (never drops below 1)
    pub initial_regulars: u32,

    /// Tables available at open. Expansion is a paid action capped at
    /// `max_tables`.
    pub initial_tables: usize,

    /// Hard cap on table expansion
    pub max_tables: usize,

    // === TIME ===
    /// Base tick interval in milliseconds (divided by the speed multiplier)
    pub tick_interval_ms: u64,

    /// Base day interval in milliseconds (divided by the speed multiplier)
    ///
    /// Must stay above `tick_interval_ms` so several ticks land in each day.
    pub day_interval_ms: u64,

    /// The fast-forward multiplier toggled by the speed control
    pub speed_multiplier: u32,

    // === ECONOMY ===
    /// Revenue accrued per tick per point of occupied-table satisfaction
    pub revenue_per_satisfaction_point: Money,

    /// Maintenance cost settled every 30 days against accumulated revenue
    pub monthly_maintenance_cost: Money,

    /// Cost of adding one table
    pub table_cost: Money,

    // === WEAR-OUT ===
    /// Visitor count between wear-out evaluations (monotonic watermark)
    pub visitor_milestone_interval: u32,

    /// A game is only evicted once it has been recommended this often
    pub wear_out_min_recommends: u32,

    /// Wear-out never thins a library at or below this size
    pub wear_out_min_pool: usize,

    // === PROMOTIONS ===
    /// Width of the failure band at a zero bonus rate.
    ///
    /// The permanent bonus rate shrinks this band (floor 0) and hands the
    /// freed width to tier 3; tiers 1 and 2 keep fixed width 0.35 each.
    pub promotion_failure_band: f64,

    /// Permanent promotion bonus rate (shrinks the failure band)
    pub promotion_bonus_rate: f64,

    // === RNG ===
    /// Seed for the engine's random-number generator. Fixed seed makes a
    /// whole session reproducible tick for tick.
    pub rng_seed: u64,
}

impl Default for CafeConfig {
    fn default() -> Self {
        Self {
            initial_funds: 4_000_000,
            initial_satisfaction: 20.0,
            initial_regulars: 1,
            initial_tables: 4,
            max_tables: 8,
            tick_interval_ms: 1000,
            day_interval_ms: 2500,
            speed_multiplier: 2,
            revenue_per_satisfaction_point: 2000,
            monthly_maintenance_cost: 1_000_000,
            table_cost: 5_000_000,
            visitor_milestone_interval: 100,
            wear_out_min_recommends: 10,
            wear_out_min_pool: 2,
            promotion_failure_band: 0.15,
            promotion_bonus_rate: 0.0,
            rng_seed: 12345,
        }
    }
}
