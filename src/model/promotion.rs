//! Tiered promotional-event outcome model
//!
//! Each promotion kind has a fixed upfront cost and a 4-band outcome
//! partition of [0, 1): failure, then tiers 1 and 2 at fixed width 0.35
//! each, with tier 3 taking the remainder. A permanent bonus rate shrinks
//! the failure band (floor 0) and hands the freed width to tier 3. Rewards
//! grow strictly with the tier.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Money;

/// Width of tiers 1 and 2, anchored right after the failure band
const MID_TIER_WIDTH: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionKind {
    SnsCampaign,
    Tournament,
    DiscountDay,
}

impl PromotionKind {
    pub fn cost(&self) -> Money {
        match self {
            PromotionKind::SnsCampaign => 200_000,
            PromotionKind::Tournament => 500_000,
            PromotionKind::DiscountDay => 100_000,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PromotionKind::SnsCampaign => "SNS campaign",
            PromotionKind::Tournament => "tournament",
            PromotionKind::DiscountDay => "discount day",
        }
    }
}

/// What a tier pays out; tier 0 pays nothing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PromotionReward {
    pub visitors: u32,
    pub satisfaction: f64,
    pub revenue: Money,
    pub regulars: u32,
}

/// Sample the outcome tier for a draw in [0, 1)
pub fn tier_for_roll(roll: f64, failure_band: f64, bonus_rate: f64) -> u8 {
    let failure = (failure_band - bonus_rate).max(0.0);
    if roll < failure {
        0
    } else if roll < failure + MID_TIER_WIDTH {
        1
    } else if roll < failure + 2.0 * MID_TIER_WIDTH {
        2
    } else {
        3
    }
}

pub fn sample_tier<R: Rng>(rng: &mut R, failure_band: f64, bonus_rate: f64) -> u8 {
    tier_for_roll(rng.gen::<f64>(), failure_band, bonus_rate)
}

/// Reward bundle for a (kind, tier) pair; visitor counts are drawn from the
/// kind/tier-specific range
pub fn reward<R: Rng>(kind: PromotionKind, tier: u8, rng: &mut R) -> PromotionReward {
    match (kind, tier) {
        (_, 0) => PromotionReward::default(),
        (PromotionKind::SnsCampaign, 1) => PromotionReward {
            visitors: rng.gen_range(5..=9),
            satisfaction: 2.0,
            ..Default::default()
        },
        (PromotionKind::SnsCampaign, 2) => PromotionReward {
            visitors: rng.gen_range(10..=17),
            satisfaction: 5.0,
            ..Default::default()
        },
        (PromotionKind::SnsCampaign, _) => PromotionReward {
            visitors: rng.gen_range(20..=29),
            satisfaction: 10.0,
            regulars: 1,
            ..Default::default()
        },
        (PromotionKind::Tournament, 1) => PromotionReward {
            visitors: rng.gen_range(10..=17),
            satisfaction: 5.0,
            revenue: 150_000,
            ..Default::default()
        },
        (PromotionKind::Tournament, 2) => PromotionReward {
            visitors: rng.gen_range(15..=26),
            satisfaction: 12.0,
            revenue: 300_000,
            regulars: 1,
        },
        (PromotionKind::Tournament, _) => PromotionReward {
            visitors: rng.gen_range(25..=39),
            satisfaction: 20.0,
            revenue: 500_000,
            regulars: 3,
        },
        (PromotionKind::DiscountDay, 1) => PromotionReward {
            visitors: rng.gen_range(15..=29),
            satisfaction: 2.0,
            ..Default::default()
        },
        (PromotionKind::DiscountDay, 2) => PromotionReward {
            visitors: rng.gen_range(25..=44),
            satisfaction: 5.0,
            ..Default::default()
        },
        (PromotionKind::DiscountDay, _) => PromotionReward {
            visitors: rng.gen_range(40..=64),
            satisfaction: 8.0,
            regulars: 2,
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_default_bands() {
        assert_eq!(tier_for_roll(0.00, 0.15, 0.0), 0);
        assert_eq!(tier_for_roll(0.14, 0.15, 0.0), 0);
        assert_eq!(tier_for_roll(0.15, 0.15, 0.0), 1);
        assert_eq!(tier_for_roll(0.49, 0.15, 0.0), 1);
        assert_eq!(tier_for_roll(0.50, 0.15, 0.0), 2);
        assert_eq!(tier_for_roll(0.84, 0.15, 0.0), 2);
        assert_eq!(tier_for_roll(0.85, 0.15, 0.0), 3);
        assert_eq!(tier_for_roll(0.99, 0.15, 0.0), 3);
    }

    #[test]
    fn test_bonus_shrinks_failure_and_grows_tier3() {
        // Bonus 0.10: failure [0, 0.05), tier1 [0.05, 0.40), tier2
        // [0.40, 0.75), tier3 [0.75, 1)
        assert_eq!(tier_for_roll(0.04, 0.15, 0.10), 0);
        assert_eq!(tier_for_roll(0.05, 0.15, 0.10), 1);
        assert_eq!(tier_for_roll(0.74, 0.15, 0.10), 2);
        assert_eq!(tier_for_roll(0.76, 0.15, 0.10), 3);

        // Bonus beyond the band floors failure at zero
        assert_eq!(tier_for_roll(0.0, 0.15, 0.50), 1);
    }

    #[test]
    fn test_rewards_increase_with_tier() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for kind in [
            PromotionKind::SnsCampaign,
            PromotionKind::Tournament,
            PromotionKind::DiscountDay,
        ] {
            assert_eq!(reward(kind, 0, &mut rng), PromotionReward::default());
            let r1 = reward(kind, 1, &mut rng);
            let r2 = reward(kind, 2, &mut rng);
            let r3 = reward(kind, 3, &mut rng);
            assert!(r1.satisfaction < r2.satisfaction);
            assert!(r2.satisfaction < r3.satisfaction);
            assert!(r1.revenue <= r2.revenue && r2.revenue <= r3.revenue);
            assert!(r1.regulars <= r2.regulars && r2.regulars <= r3.regulars);
        }
    }

    #[test]
    fn test_discount_day_never_pays_revenue() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for tier in 0..=3 {
            assert_eq!(reward(PromotionKind::DiscountDay, tier, &mut rng).revenue, 0);
        }
    }

    #[test]
    fn test_costs() {
        assert_eq!(PromotionKind::SnsCampaign.cost(), 200_000);
        assert_eq!(PromotionKind::Tournament.cost(), 500_000);
        assert_eq!(PromotionKind::DiscountDay.cost(), 100_000);
    }
}
