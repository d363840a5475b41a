//! Tick step - the fine-grained simulation heartbeat
//!
//! Runs as one run-to-completion step over the engine aggregate:
//! 1. Process departures scheduled by failed recommendations
//! 2. Accrue revenue from occupied tables
//! 3. Drift regulars (perfect tables mint them, unhappy tables bleed them)
//! 4. Apply the aggregate satisfaction delta through the modifier pipeline
//! 5. Convert large satisfaction swings into regulars
//! 6. Attempt one random table transition (arrival or departure)
//! 7. Evaluate the visitor-milestone wear-out watermark
//!
//! Returns the events that occurred for the presentation layer's log.

use rand::Rng;

use crate::cafe::reviews::ReviewContext;
use crate::core::error::{CafeError, Result};
use crate::model::satisfaction::{collect_modifiers, tick_delta, TableCensus};
use crate::sim::engine::Engine;
use crate::sim::events::SimEvent;

/// Chance that a tick attempts a table transition at all
const TRANSITION_CHANCE: f64 = 0.85;
/// Arrival chance for the sampled empty table
const ARRIVAL_CHANCE: f64 = 0.80;
/// Chance a departing party leaves a review
const DEPARTURE_REVIEW_CHANCE: f64 = 0.30;
/// Chance a regular is minted per perfect table per tick
const REGULAR_MINT_CHANCE: f64 = 0.05;
/// Chance a regular is lost per tick while 2+ tables are unhappy
const REGULAR_LOSS_CHANCE: f64 = 0.02;

/// Run a single simulation tick
pub fn run_tick(engine: &mut Engine) -> Result<Vec<SimEvent>> {
    if !engine.is_ready() {
        return Err(CafeError::NotReady);
    }
    // Lost-time policy: a paused engine never advances, and skipped ticks
    // are not replayed on resume
    if engine.is_paused() {
        return Ok(Vec::new());
    }

    let mut events = Vec::new();

    process_pending_departures(engine, &mut events);
    accrue_revenue(engine);
    drift_regulars(engine, &mut events);
    apply_satisfaction_delta(engine);
    engine.economy.apply_satisfaction_swing();
    attempt_table_transition(engine, &mut events);
    check_wear_out(engine, &mut events);

    Ok(events)
}

/// Tables that bottomed out on a failed recommendation empty now, docking
/// the global rating one point each
fn process_pending_departures(engine: &mut Engine, events: &mut Vec<SimEvent>) {
    let pending = std::mem::take(&mut engine.pending_departures);
    for id in pending {
        // The party may have left on its own in the meantime
        let Some(table) = engine.tables.get_mut(id) else {
            continue;
        };
        if !table.occupied {
            continue;
        }
        let satisfaction = table.satisfaction();
        table.clear();
        engine.economy.adjust_satisfaction(-1.0);
        events.push(SimEvent::PartyDeparted {
            table: id,
            satisfaction,
        });
    }
}

fn accrue_revenue(engine: &mut Engine) {
    let total_satisfaction: i64 = engine
        .tables
        .iter()
        .filter(|t| t.occupied)
        .map(|t| t.satisfaction() as i64)
        .sum();
    engine.economy.revenue += total_satisfaction * engine.config.revenue_per_satisfaction_point;
}

fn drift_regulars(engine: &mut Engine, events: &mut Vec<SimEvent>) {
    let perfect = engine.tables.perfect_count();
    let unhappy = engine.tables.unhappy_count();

    for _ in 0..perfect {
        if engine.rng.gen_bool(REGULAR_MINT_CHANCE) {
            let name = engine.regulars.add_random(&mut engine.rng);
            engine.economy.regulars += 1;
            events.push(SimEvent::RegularGained { name });
        }
    }

    if unhappy >= 2 && engine.rng.gen_bool(REGULAR_LOSS_CHANCE) && engine.economy.regulars > 1 {
        let name = engine.regulars.remove_one();
        engine.economy.regulars -= 1;
        events.push(SimEvent::RegularLost { name });
    }
}

fn apply_satisfaction_delta(engine: &mut Engine) {
    let census = census_of(engine);
    let modifiers = collect_modifiers(&engine.buffs, engine.owns_trending_game());
    let delta = tick_delta(&census, &modifiers, engine.economy.rating());
    if delta != 0.0 {
        engine.economy.adjust_satisfaction(delta);
    }
}

fn census_of(engine: &Engine) -> TableCensus {
    TableCensus {
        table_count: engine.tables.len(),
        occupied: engine.tables.occupied_count(),
        empty: engine.tables.empty_count(),
        perfect: engine.tables.perfect_count(),
        unhappy: engine.tables.unhappy_count(),
    }
}

/// Sample exactly one table for a transition attempt. The held selection is
/// exempt; everything else follows the arrival/departure odds.
fn attempt_table_transition(engine: &mut Engine, events: &mut Vec<SimEvent>) {
    if !engine.rng.gen_bool(TRANSITION_CHANCE) {
        return;
    }
    let index = engine.rng.gen_range(0..engine.tables.len());
    let id = engine.tables.at_index(index).id;
    if engine.selected_table == Some(id) {
        return;
    }

    if engine.tables.at_index(index).occupied {
        try_departure(engine, index, events);
    } else {
        try_arrival(engine, index, events);
    }
}

/// Departure odds step down with satisfaction and climb with time at the
/// table: 5 -> 0.60, 4 -> 0.40, 3 -> 0.50, 2 -> 0.50, 1 -> 0.80, plus
/// min(0.30, turns * 0.05), capped at 0.95
fn try_departure(engine: &mut Engine, index: usize, events: &mut Vec<SimEvent>) {
    let table = engine.tables.at_index(index);
    let base = match table.satisfaction() {
        5 => 0.60,
        4 => 0.40,
        3 => 0.50,
        2 => 0.50,
        _ => 0.80,
    };
    let turn_bonus = (table.turns_at_table as f64 * 0.05).min(0.30);
    let leave_chance = (base + turn_bonus).min(0.95);
    let id = table.id;
    let satisfaction = table.satisfaction();

    if engine.rng.gen_bool(leave_chance) {
        if engine.rng.gen_bool(DEPARTURE_REVIEW_CHANCE) {
            record_departure_review(engine, events);
        }
        engine.tables.at_index_mut(index).clear();
        events.push(SimEvent::PartyDeparted {
            table: id,
            satisfaction,
        });
    } else {
        engine.tables.at_index_mut(index).turns_at_table += 1;
    }
}

fn record_departure_review(engine: &mut Engine, events: &mut Vec<SimEvent>) {
    let full_house = engine.tables.occupied_count() == engine.tables.len();
    let unhappy_tables = engine.tables.unhappy_count() >= 2;
    // Contextual reviews only surface half the time
    let context = if engine.rng.gen_bool(0.5) {
        if full_house {
            ReviewContext::FullHouse
        } else if unhappy_tables {
            ReviewContext::UnhappyTables
        } else {
            ReviewContext::General
        }
    } else {
        ReviewContext::General
    };
    let review = engine
        .reviews
        .record(engine.economy.day, engine.economy.satisfaction(), context);
    events.push(SimEvent::ReviewPosted {
        sentiment: review.sentiment,
        context: review.context,
    });
}

/// Seat a walk-in party at the sampled empty table. Arrivals need a game
/// from the library; initial mood depends on the public rating.
fn try_arrival(engine: &mut Engine, index: usize, events: &mut Vec<SimEvent>) {
    if !engine.rng.gen_bool(ARRIVAL_CHANCE) {
        return;
    }
    let Some(game) = engine.inventory.random_owned(&mut engine.rng) else {
        return;
    };
    let game_name = game.name.clone();
    let game_difficulty = game.difficulty;

    let rating = engine.economy.rating();
    let initial_satisfaction = if rating >= 6.0 {
        engine.rng.gen_range(2..=4)
    } else {
        2
    };
    let customer_level = engine.rng.gen_range(1..=5);

    let id = engine.tables.at_index(index).id;
    engine.tables.at_index_mut(index).seat(
        &game_name,
        game_difficulty,
        initial_satisfaction,
        customer_level,
    );

    let visitors = engine.rng.gen_range(2..=3);
    engine.economy.total_visitors += visitors;

    // New walk-ins move the rating by reputation band
    let nudge = if rating >= 8.0 {
        0.0
    } else if rating >= 7.0 {
        0.3
    } else if rating >= 6.0 {
        0.5
    } else if rating >= 5.0 {
        0.0
    } else {
        -0.5
    };
    if nudge != 0.0 {
        engine.economy.adjust_satisfaction(nudge);
    }

    events.push(SimEvent::PartyArrived {
        table: id,
        game: game_name,
        satisfaction: initial_satisfaction,
        visitors,
    });
}

/// Visitor-milestone wear-out: at most once per crossed bucket, the
/// most-recommended game is evicted if the library is large and worn enough
fn check_wear_out(engine: &mut Engine, events: &mut Vec<SimEvent>) {
    if !engine
        .economy
        .crossed_visitor_milestone(engine.config.visitor_milestone_interval)
    {
        return;
    }
    let candidate = engine
        .inventory
        .most_recommended(
            engine.config.wear_out_min_pool,
            engine.config.wear_out_min_recommends,
        )
        .map(|g| (g.name.clone(), g.recommend_count));
    if let Some((name, recommend_count)) = candidate {
        engine.inventory.remove_first(&name);
        tracing::info!(game = %name, recommend_count, "game wore out");
        events.push(SimEvent::GameWoreOut {
            name,
            recommend_count,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TableId;
    use crate::sim::testutil::demo_engine;

    #[test]
    fn test_fresh_engine_ticks() {
        let mut engine = demo_engine();
        assert!(run_tick(&mut engine).is_ok());
    }

    #[test]
    fn test_paused_tick_is_a_no_op() {
        let mut engine = demo_engine();
        engine.selected_table = Some(TableId(1));
        let day_before = engine.economy.day;
        let revenue_before = engine.economy.revenue;
        let events = run_tick(&mut engine).unwrap();
        assert!(events.is_empty());
        assert_eq!(engine.economy.day, day_before);
        assert_eq!(engine.economy.revenue, revenue_before);
    }

    #[test]
    fn test_revenue_accrues_from_occupied_tables() {
        let mut engine = demo_engine();
        engine
            .tables
            .get_mut(TableId(1))
            .unwrap()
            .seat("Rolling Hills", 1, 4, 2);
        engine
            .tables
            .get_mut(TableId(2))
            .unwrap()
            .seat("Night Signals", 2, 3, 2);
        accrue_revenue(&mut engine);
        assert_eq!(engine.economy.revenue, 7 * 2000);
    }

    #[test]
    fn test_pending_departure_clears_table_and_docks_rating() {
        let mut engine = demo_engine();
        engine
            .tables
            .get_mut(TableId(2))
            .unwrap()
            .seat("Night Signals", 2, 1, 2);
        engine.pending_departures.push(TableId(2));
        let before = engine.economy.satisfaction();

        let mut events = Vec::new();
        process_pending_departures(&mut engine, &mut events);

        assert!(!engine.tables.get(TableId(2)).unwrap().occupied);
        assert_eq!(engine.economy.satisfaction(), before - 1.0);
        assert!(matches!(events[0], SimEvent::PartyDeparted { .. }));
        // Queue drained: nothing left to double-process
        assert!(engine.pending_departures.is_empty());
    }

    #[test]
    fn test_pending_departure_on_empty_table_is_silent() {
        let mut engine = demo_engine();
        engine.pending_departures.push(TableId(3));
        let before = engine.economy.satisfaction();
        let mut events = Vec::new();
        process_pending_departures(&mut engine, &mut events);
        assert!(events.is_empty());
        assert_eq!(engine.economy.satisfaction(), before);
    }

    #[test]
    fn test_wear_out_fires_once_per_milestone() {
        let mut engine = demo_engine();
        for _ in 0..12 {
            engine.inventory.increment_recommend("Rolling Hills");
        }
        engine.economy.total_visitors = 120;

        let mut events = Vec::new();
        check_wear_out(&mut engine, &mut events);
        assert!(matches!(events[0], SimEvent::GameWoreOut { .. }));
        assert!(!engine.inventory.has("Rolling Hills"));

        // Re-evaluating the same bucket never double-fires
        let mut events = Vec::new();
        check_wear_out(&mut engine, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_wear_out_skips_small_library() {
        let mut engine = demo_engine();
        engine.inventory.remove_first("Harbor Masters");
        for _ in 0..20 {
            engine.inventory.increment_recommend("Rolling Hills");
        }
        engine.economy.total_visitors = 150;

        let mut events = Vec::new();
        check_wear_out(&mut engine, &mut events);
        assert!(events.is_empty());
        assert!(engine.inventory.has("Rolling Hills"));
    }
}
