//! Economy counters and the expense waterfall
//!
//! Revenue accumulates between monthly settlements; every paid action drains
//! revenue first and only then dips into funds. A transaction either applies
//! in full or not at all, so the running total never goes negative mid-step.

use serde::{Deserialize, Serialize};

use crate::catalog::UnlockContext;
use crate::core::error::{CafeError, Result};
use crate::core::types::{Day, Money, Week};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyState {
    pub day: Day,
    pub revenue: Money,
    pub funds: Money,
    /// Aggregate satisfaction on a 0-100 scale, kept at tenths precision.
    /// The public rating is `satisfaction / 10`.
    satisfaction: f64,
    pub regulars: u32,
    pub total_visitors: u32,

    /// Monotonic watermark: last handled `total_visitors / milestone` bucket
    pub last_visitor_milestone: u32,
    /// Day of the last monthly settlement
    pub last_settlement_day: Day,
    /// Day of the last forced weekly prompt
    pub last_weekly_prompt_day: Day,
    /// Last week the community trending set was recomputed for
    pub last_community_week: Week,

    /// Active opportunity bonus in percentage points, fed into the
    /// recommendation model while the countdown runs
    pub opportunity_bonus: i32,
    pub opportunity_bonus_days: u32,

    /// Satisfaction level at the last regulars-swing conversion; every
    /// accumulated +/-20 rating points converts into +/-1 regular
    pub satisfaction_baseline: f64,
}

impl EconomyState {
    pub fn new(initial_funds: Money, initial_satisfaction: f64, initial_regulars: u32) -> Self {
        Self {
            day: 1,
            revenue: 0,
            funds: initial_funds,
            satisfaction: initial_satisfaction,
            regulars: initial_regulars,
            total_visitors: 0,
            last_visitor_milestone: 0,
            last_settlement_day: 0,
            last_weekly_prompt_day: 0,
            last_community_week: 0,
            opportunity_bonus: 0,
            opportunity_bonus_days: 0,
            satisfaction_baseline: initial_satisfaction,
        }
    }

    pub fn can_afford(&self, cost: Money) -> bool {
        self.revenue + self.funds >= cost
    }

    /// Pay `cost` through the waterfall: revenue first, then funds.
    /// Fails with no mutation when the combined total is short.
    pub fn charge(&mut self, cost: Money) -> Result<()> {
        if !self.can_afford(cost) {
            return Err(CafeError::InsufficientFunds {
                needed: cost,
                available: self.revenue + self.funds,
            });
        }
        let from_revenue = cost.min(self.revenue);
        self.revenue -= from_revenue;
        self.funds -= cost - from_revenue;
        Ok(())
    }

    /// Monthly settlement: revenue folds into funds after maintenance
    pub fn settle(&mut self, maintenance_cost: Money) {
        self.funds += self.revenue - maintenance_cost;
        self.revenue = 0;
        self.last_settlement_day = self.day;
    }

    pub fn satisfaction(&self) -> f64 {
        self.satisfaction
    }

    /// Public rating on the 0-10 scale
    pub fn rating(&self) -> f64 {
        self.satisfaction / 10.0
    }

    pub fn adjust_satisfaction(&mut self, delta: f64) {
        self.satisfaction = (self.satisfaction + delta).clamp(0.0, 100.0);
    }

    /// Convert large satisfaction swings into regulars gained or lost.
    /// Every full +/-20 points against the stored baseline is +/-1 regular
    /// (never dropping below 1), and the baseline advances.
    pub fn apply_satisfaction_swing(&mut self) {
        let swing = self.satisfaction - self.satisfaction_baseline;
        if swing.abs() >= 20.0 {
            let regulars_change = (swing / 20.0).trunc() as i64;
            self.regulars = (self.regulars as i64 + regulars_change).max(1) as u32;
            self.satisfaction_baseline = self.satisfaction;
        }
    }

    /// Visitor-milestone watermark: returns true at most once per crossed
    /// bucket, no matter how often it is evaluated.
    pub fn crossed_visitor_milestone(&mut self, interval: u32) -> bool {
        let bucket = self.total_visitors / interval;
        if bucket > self.last_visitor_milestone {
            self.last_visitor_milestone = bucket;
            true
        } else {
            false
        }
    }

    pub fn unlock_context(&self) -> UnlockContext {
        UnlockContext {
            day: self.day,
            total_visitors: self.total_visitors,
            satisfaction: self.satisfaction,
            regulars: self.regulars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn economy() -> EconomyState {
        EconomyState::new(4_000_000, 20.0, 1)
    }

    #[test]
    fn test_waterfall_revenue_first() {
        let mut eco = economy();
        eco.revenue = 300_000;
        eco.charge(200_000).unwrap();
        assert_eq!(eco.revenue, 100_000);
        assert_eq!(eco.funds, 4_000_000);
    }

    #[test]
    fn test_waterfall_spills_into_funds() {
        let mut eco = economy();
        eco.revenue = 50_000;
        eco.charge(200_000).unwrap();
        assert_eq!(eco.revenue, 0);
        assert_eq!(eco.funds, 3_850_000);
    }

    #[test]
    fn test_insufficient_funds_leaves_state_untouched() {
        let mut eco = economy();
        eco.revenue = 100;
        let err = eco.charge(5_000_000).unwrap_err();
        assert!(matches!(err, CafeError::InsufficientFunds { .. }));
        assert_eq!(eco.revenue, 100);
        assert_eq!(eco.funds, 4_000_000);
    }

    #[test]
    fn test_settlement_folds_revenue_into_funds() {
        let mut eco = economy();
        eco.day = 30;
        eco.revenue = 2_000_000;
        eco.settle(1_000_000);
        assert_eq!(eco.funds, 5_000_000);
        assert_eq!(eco.revenue, 0);
        assert_eq!(eco.last_settlement_day, 30);
    }

    #[test]
    fn test_satisfaction_clamps() {
        let mut eco = economy();
        eco.adjust_satisfaction(500.0);
        assert_eq!(eco.satisfaction(), 100.0);
        eco.adjust_satisfaction(-500.0);
        assert_eq!(eco.satisfaction(), 0.0);
    }

    #[test]
    fn test_milestone_watermark_fires_once() {
        let mut eco = economy();
        eco.total_visitors = 105;
        assert!(eco.crossed_visitor_milestone(100));
        assert!(!eco.crossed_visitor_milestone(100));
        eco.total_visitors = 199;
        assert!(!eco.crossed_visitor_milestone(100));
        eco.total_visitors = 215;
        assert!(eco.crossed_visitor_milestone(100));
    }

    #[test]
    fn test_satisfaction_swing_converts_to_regulars() {
        let mut eco = economy();
        eco.adjust_satisfaction(45.0);
        eco.apply_satisfaction_swing();
        assert_eq!(eco.regulars, 3);
        // Baseline advanced: no double conversion
        eco.apply_satisfaction_swing();
        assert_eq!(eco.regulars, 3);
    }
}
