//! Recommendation outcome model
//!
//! Success odds hinge on the gap between the party's level and the game's
//! difficulty, nudged by the table's current mood and any running
//! opportunity bonus. A single uniform draw decides the outcome; the
//! satisfaction delta then depends on the gap again.

use rand::Rng;

/// Inputs to one recommendation attempt
#[derive(Debug, Clone, Copy)]
pub struct RecommendInput {
    pub customer_level: u8,
    pub table_satisfaction: u8,
    pub game_difficulty: u8,
    /// Percentage points from an accepted opportunity
    pub opportunity_bonus: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct RecommendOutcome {
    pub success: bool,
    pub gap: u8,
    /// Signed satisfaction change, applied with a [1, 5] clamp by the caller
    pub delta: i8,
}

/// Level/difficulty gap
pub fn gap(customer_level: u8, game_difficulty: u8) -> u8 {
    customer_level.abs_diff(game_difficulty)
}

/// Base success rate by gap, non-increasing as the gap grows
pub fn base_success_rate(gap: u8) -> f64 {
    match gap {
        0 => 0.85,
        1 => 0.70,
        2 => 0.50,
        _ => 0.30,
    }
}

/// Base rate adjusted for table mood and opportunity bonus, clamped to
/// [0.10, 0.95]
pub fn adjusted_success_rate(input: &RecommendInput) -> f64 {
    let g = gap(input.customer_level, input.game_difficulty);
    let mood_bonus = (input.table_satisfaction as f64 - 3.0) * 0.05;
    let news_bonus = input.opportunity_bonus as f64 / 100.0;
    (base_success_rate(g) + mood_bonus + news_bonus).clamp(0.10, 0.95)
}

/// Roll one recommendation attempt
pub fn roll<R: Rng>(input: &RecommendInput, rng: &mut R) -> RecommendOutcome {
    let g = gap(input.customer_level, input.game_difficulty);
    let success = rng.gen::<f64>() < adjusted_success_rate(input);

    let delta = if success {
        match g {
            0 => rng.gen_range(2..=3),
            1 => rng.gen_range(1..=2),
            _ => 1,
        }
    } else {
        match g {
            0 | 1 => -1,
            2 => -rng.gen_range(1..=2),
            _ => -rng.gen_range(2..=3),
        }
    };

    RecommendOutcome {
        success,
        gap: g,
        delta,
    }
}

/// Clamp a table's satisfaction after applying a recommendation delta
pub fn apply_delta(satisfaction: u8, delta: i8) -> u8 {
    (satisfaction as i16 + delta as i16).clamp(1, 5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_base_rate_non_increasing() {
        let rates: Vec<f64> = (0..5).map(base_success_rate).collect();
        for pair in rates.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn test_adjusted_rate_clamped() {
        let high = RecommendInput {
            customer_level: 3,
            table_satisfaction: 5,
            game_difficulty: 3,
            opportunity_bonus: 50,
        };
        assert_eq!(adjusted_success_rate(&high), 0.95);

        let low = RecommendInput {
            customer_level: 1,
            table_satisfaction: 1,
            game_difficulty: 5,
            opportunity_bonus: -30,
        };
        assert_eq!(adjusted_success_rate(&low), 0.10);
    }

    #[test]
    fn test_success_delta_ranges_by_gap() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let input = RecommendInput {
            customer_level: 3,
            table_satisfaction: 5,
            game_difficulty: 3,
            opportunity_bonus: 50,
        };
        // Rate is clamped to 0.95; forced-success draws land delta in {2, 3}
        for _ in 0..200 {
            let outcome = roll(&input, &mut rng);
            if outcome.success {
                assert!(outcome.delta == 2 || outcome.delta == 3);
                assert_eq!(apply_delta(5, outcome.delta), 5);
            }
        }
    }

    #[test]
    fn test_failure_delta_ranges_by_gap() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for (level, difficulty, allowed) in [
            (3u8, 3u8, vec![-1i8]),
            (3, 1, vec![-1, -2]),
            (1, 5, vec![-2, -3]),
        ] {
            let input = RecommendInput {
                customer_level: level,
                table_satisfaction: 1,
                game_difficulty: difficulty,
                opportunity_bonus: -100,
            };
            for _ in 0..200 {
                let outcome = roll(&input, &mut rng);
                if !outcome.success {
                    assert!(allowed.contains(&outcome.delta), "delta {}", outcome.delta);
                }
            }
        }
    }

    #[test]
    fn test_apply_delta_clamps() {
        assert_eq!(apply_delta(5, 3), 5);
        assert_eq!(apply_delta(2, -3), 1);
        assert_eq!(apply_delta(3, 1), 4);
    }
}
