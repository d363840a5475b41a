//! Property tests over the pure models: the expense waterfall, the
//! recommendation odds, the promotion tier partition, and the buff window.

use proptest::prelude::*;

use boardcafe::cafe::buffs::{BuffCategory, BuffKind, BuffManager, BuffSpec};
use boardcafe::cafe::economy::EconomyState;
use boardcafe::cafe::inventory::{Inventory, OwnedGame};
use boardcafe::model::promotion::tier_for_roll;
use boardcafe::model::recommend::{
    adjusted_success_rate, apply_delta, base_success_rate, RecommendInput,
};
use boardcafe::model::satisfaction::band_resistance;

proptest! {
    /// The waterfall conserves money: a successful charge removes exactly
    /// the cost, never more, and neither pool goes negative
    #[test]
    fn charge_conserves_total(
        revenue in 0i64..10_000_000,
        funds in 0i64..10_000_000,
        cost in 0i64..20_000_000,
    ) {
        let mut eco = EconomyState::new(funds, 20.0, 1);
        eco.revenue = revenue;
        let total_before = revenue + funds;

        match eco.charge(cost) {
            Ok(()) => {
                prop_assert!(cost <= total_before);
                prop_assert_eq!(eco.revenue + eco.funds, total_before - cost);
                prop_assert!(eco.revenue >= 0);
                prop_assert!(eco.funds >= 0);
                // Revenue drains before funds are touched
                if cost <= revenue {
                    prop_assert_eq!(eco.funds, funds);
                }
            }
            Err(_) => {
                prop_assert!(cost > total_before);
                prop_assert_eq!(eco.revenue, revenue);
                prop_assert_eq!(eco.funds, funds);
            }
        }
    }

    /// Success odds never rise as the level/difficulty gap widens
    #[test]
    fn base_rate_monotone_in_gap(gap in 0u8..20) {
        prop_assert!(base_success_rate(gap) >= base_success_rate(gap.saturating_add(1)));
    }

    /// The adjusted rate always lands in its clamp window
    #[test]
    fn adjusted_rate_clamped(
        customer_level in 1u8..=5,
        table_satisfaction in 1u8..=5,
        game_difficulty in 1u8..=5,
        opportunity_bonus in -100i32..=100,
    ) {
        let rate = adjusted_success_rate(&RecommendInput {
            customer_level,
            table_satisfaction,
            game_difficulty,
            opportunity_bonus,
        });
        prop_assert!((0.10..=0.95).contains(&rate));
    }

    /// Table satisfaction never escapes [1, 5] after a recommendation
    #[test]
    fn delta_application_clamped(satisfaction in 1u8..=5, delta in -5i8..=5) {
        let result = apply_delta(satisfaction, delta);
        prop_assert!((1..=5).contains(&result));
    }

    /// Tiers partition [0, 1): every roll lands in exactly one tier, and a
    /// larger roll never gives a smaller tier
    #[test]
    fn tier_partition_monotone(
        roll_a in 0.0f64..1.0,
        roll_b in 0.0f64..1.0,
        bonus in 0.0f64..0.5,
    ) {
        let (lo, hi) = if roll_a <= roll_b { (roll_a, roll_b) } else { (roll_b, roll_a) };
        let tier_lo = tier_for_roll(lo, 0.15, bonus);
        let tier_hi = tier_for_roll(hi, 0.15, bonus);
        prop_assert!(tier_lo <= 3 && tier_hi <= 3);
        prop_assert!(tier_lo <= tier_hi);
    }

    /// A bonus rate can only improve the sampled tier for the same roll
    #[test]
    fn bonus_never_hurts(roll in 0.0f64..1.0, bonus in 0.0f64..0.5) {
        prop_assert!(tier_for_roll(roll, 0.15, bonus) >= tier_for_roll(roll, 0.15, 0.0));
    }

    /// A timed buff is active from its start day up to (exclusive) its
    /// expiry day, and the sweep removes it exactly once
    #[test]
    fn buff_window_half_open(start in 1u32..1000, duration in 1i32..365) {
        let mut buffs = BuffManager::new();
        buffs.add(BuffSpec {
            kind: BuffKind::Regular,
            category: BuffCategory::Positive,
            name: "window".into(),
            description: String::new(),
            value: 1,
            start_day: start,
            duration,
            source: "prop".into(),
            stackable: false,
        });
        let expiry = start + duration as u32;
        let buff = buffs.active()[0].clone();
        prop_assert!(buff.is_active(start));
        prop_assert!(buff.is_active(expiry - 1));
        prop_assert!(!buff.is_active(expiry));

        prop_assert_eq!(buffs.check_expiry(expiry).len(), 1);
        prop_assert!(buffs.check_expiry(expiry).is_empty());
    }

    /// Wear-out never thins a library at or below the pool floor
    #[test]
    fn wear_out_respects_pool_floor(
        copies in 1usize..=6,
        recommends in 0u32..50,
        min_pool in 1usize..=6,
    ) {
        let mut inv = Inventory::new();
        for i in 0..copies {
            let mut game = OwnedGame::basic(&format!("game-{i}"), 2, 30_000, 0);
            game.recommend_count = recommends;
            inv.add(game);
        }
        let candidate = inv.most_recommended(min_pool, 10);
        if copies <= min_pool || recommends < 10 {
            prop_assert!(candidate.is_none());
        } else {
            prop_assert!(candidate.is_some());
        }
    }

    /// Band resistance damps gains, never flips sign, never touches losses
    #[test]
    fn band_resistance_shrinks_gains(delta in -5.0f64..5.0, rating in 0.0f64..10.0) {
        let out = band_resistance(delta, rating);
        if delta <= 0.0 {
            prop_assert_eq!(out, delta);
        } else {
            prop_assert!(out > 0.0);
            prop_assert!(out <= delta);
        }
    }
}
