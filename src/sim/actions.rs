//! Player actions
//!
//! Actions interleave between scheduler steps and run to completion like the
//! steps do. Paid actions charge through the expense waterfall before any
//! other mutation, so a failed payment leaves the engine untouched. Actions
//! referencing unknown or stale targets are silent no-ops: the scheduler may
//! have changed the floor since the player looked at it.

use rand::Rng;

use crate::cafe::buffs::{BuffCategory, BuffKind, BuffSpec};
use crate::cafe::inventory::OwnedGame;
use crate::cafe::reviews::ReviewContext;
use crate::core::error::{CafeError, Result};
use crate::core::types::TableId;
use crate::model::promotion::{self, PromotionKind};
use crate::model::recommend::{self, RecommendInput};
use crate::sim::engine::{Engine, Prompt};
use crate::sim::events::SimEvent;

/// Chance a successful or failed recommendation produces a review
const RECOMMEND_REVIEW_CHANCE: f64 = 0.20;
/// Walk-in satisfaction for promotion-seeded parties
const PROMOTION_WALK_IN_SATISFACTION: u8 = 3;

fn ensure_ready(engine: &Engine) -> Result<()> {
    if engine.is_ready() {
        Ok(())
    } else {
        Err(CafeError::NotReady)
    }
}

/// Toggle the table selection. Selecting pauses the simulation; selecting an
/// empty table additionally opens the promotion-choice prompt for it.
pub fn select_table(engine: &mut Engine, id: TableId) -> Result<Vec<SimEvent>> {
    ensure_ready(engine)?;
    if engine.selected_table == Some(id) {
        engine.selected_table = None;
        engine.open_prompt = None;
        return Ok(Vec::new());
    }
    let Some(table) = engine.tables.get(id) else {
        return Ok(Vec::new());
    };
    engine.selected_table = Some(id);
    if !table.occupied {
        engine.open_prompt = Some(Prompt::PromotionChoice { table: id });
    }
    Ok(Vec::new())
}

/// Buy an unlocked catalog game into the library
pub fn purchase_game(engine: &mut Engine, name: &str) -> Result<Vec<SimEvent>> {
    ensure_ready(engine)?;
    let Some(record) = engine.catalog.get(name).cloned() else {
        return Ok(Vec::new());
    };
    let ctx = engine.economy.unlock_context();
    if !record.is_unlocked(&ctx) || engine.inventory.has(&record.name) {
        return Ok(Vec::new());
    }
    engine.economy.charge(record.price)?;
    let day = engine.economy.day;
    engine
        .inventory
        .add(OwnedGame::from_record(&record, day));
    tracing::info!(game = %record.name, price = record.price, "game purchased");
    Ok(vec![SimEvent::GamePurchased {
        name: record.name,
        cost: record.price,
    }])
}

/// Recommend an owned game to the party at the selected table. The attempt
/// wears the copy and puts the recommended game on the table whether or not
/// it lands; the roll only decides the mood swing. A failure that bottoms
/// the party's mood schedules their departure for the next tick.
pub fn recommend_game(engine: &mut Engine, game_name: &str) -> Result<Vec<SimEvent>> {
    ensure_ready(engine)?;
    let Some(id) = engine.selected_table.take() else {
        return Ok(Vec::new());
    };

    let Some(game) = engine.inventory.get(game_name) else {
        return Ok(Vec::new());
    };
    let game_difficulty = game.difficulty;
    let game_name = game.name.clone();

    let Some(table) = engine.tables.get(id) else {
        return Ok(Vec::new());
    };
    if !table.occupied {
        return Ok(Vec::new());
    }

    let input = RecommendInput {
        customer_level: table.customer_level,
        table_satisfaction: table.satisfaction(),
        game_difficulty,
        opportunity_bonus: engine.economy.opportunity_bonus,
    };
    engine.inventory.increment_recommend(&game_name);
    let outcome = recommend::roll(&input, &mut engine.rng);
    let new_satisfaction = recommend::apply_delta(input.table_satisfaction, outcome.delta);

    if let Some(table) = engine.tables.get_mut(id) {
        // The party tries the recommended game either way; the roll only
        // decides how it lands
        table.game = Some(game_name.clone());
        table.difficulty = game_difficulty;
        table.turns_at_table = 0;
        table.set_satisfaction(new_satisfaction);
        if !outcome.success && new_satisfaction == 1 {
            engine.pending_departures.push(id);
        }
    }
    tracing::debug!(
        table = id.0,
        game = %game_name,
        success = outcome.success,
        delta = outcome.delta,
        "recommendation resolved"
    );

    let mut events = vec![SimEvent::RecommendationResolved {
        table: id,
        game: game_name,
        success: outcome.success,
        delta: outcome.delta,
    }];
    if engine.rng.gen_bool(RECOMMEND_REVIEW_CHANCE) {
        let review = engine.reviews.record(
            engine.economy.day,
            engine.economy.satisfaction(),
            ReviewContext::General,
        );
        events.push(SimEvent::ReviewPosted {
            sentiment: review.sentiment,
            context: review.context,
        });
    }
    Ok(events)
}

/// Run a paid promotion on the empty table behind the open promotion prompt.
/// The upfront cost is charged first; a short balance aborts with the prompt
/// closed and nothing else changed.
pub fn run_promotion(engine: &mut Engine, kind: PromotionKind) -> Result<Vec<SimEvent>> {
    ensure_ready(engine)?;
    let Some(Prompt::PromotionChoice { table: id }) = engine.open_prompt else {
        return Ok(Vec::new());
    };
    engine.open_prompt = None;
    engine.selected_table = None;

    engine.economy.charge(kind.cost())?;

    // The promoted table gets a walk-in party straight away
    let walk_in = engine
        .inventory
        .random_owned(&mut engine.rng)
        .map(|g| (g.name.clone(), g.difficulty));
    if let (Some((name, difficulty)), Some(table)) = (walk_in, engine.tables.get_mut(id)) {
        if !table.occupied {
            let customer_level = engine.rng.gen_range(1..=5);
            table.seat(
                &name,
                difficulty,
                PROMOTION_WALK_IN_SATISFACTION,
                customer_level,
            );
        }
    }

    let tier = promotion::sample_tier(
        &mut engine.rng,
        engine.config.promotion_failure_band,
        engine.config.promotion_bonus_rate,
    );
    let reward = promotion::reward(kind, tier, &mut engine.rng);
    engine.economy.total_visitors += reward.visitors;
    engine.economy.adjust_satisfaction(reward.satisfaction);
    engine.economy.revenue += reward.revenue;
    engine.economy.regulars += reward.regulars;
    tracing::info!(kind = kind.label(), tier, "promotion resolved");

    let mut events = vec![SimEvent::PromotionResolved { kind, tier, reward }];
    if tier > 0 {
        // The event colors the review only half the time; otherwise it
        // reads as an ordinary rating-banded review
        let context = if engine.rng.gen_bool(0.5) {
            ReviewContext::AfterEvent
        } else {
            ReviewContext::General
        };
        let review = engine.reviews.record(
            engine.economy.day,
            engine.economy.satisfaction(),
            context,
        );
        events.push(SimEvent::ReviewPosted {
            sentiment: review.sentiment,
            context: review.context,
        });
    }
    Ok(events)
}

/// Accept the forced weekly offer: pay its cost and take the game
pub fn weekly_accept(engine: &mut Engine) -> Result<Vec<SimEvent>> {
    ensure_ready(engine)?;
    let Some(Prompt::WeeklyOffer {
        name,
        difficulty,
        cost,
    }) = engine.open_prompt.clone()
    else {
        return Ok(Vec::new());
    };
    engine.economy.charge(cost)?;
    engine.open_prompt = None;
    engine.weekly_offer_index += 1;

    let day = engine.economy.day;
    let game = match engine.catalog.get(&name) {
        Some(record) => OwnedGame::from_record(record, day),
        None => OwnedGame::basic(&name, difficulty, cost, day),
    };
    engine.inventory.add(game);
    Ok(vec![SimEvent::GamePurchased { name, cost }])
}

/// Decline the forced weekly offer; the cycle still advances
pub fn weekly_reject(engine: &mut Engine) -> Result<Vec<SimEvent>> {
    ensure_ready(engine)?;
    if !matches!(engine.open_prompt, Some(Prompt::WeeklyOffer { .. })) {
        return Ok(Vec::new());
    }
    engine.open_prompt = None;
    engine.weekly_offer_index += 1;
    Ok(Vec::new())
}

/// Buy one more table, up to the hard cap
pub fn add_table(engine: &mut Engine) -> Result<Vec<SimEvent>> {
    ensure_ready(engine)?;
    if engine.tables.len() >= engine.config.max_tables {
        return Err(CafeError::CapacityExceeded {
            cap: engine.config.max_tables,
        });
    }
    engine.economy.charge(engine.config.table_cost)?;
    let id = engine.tables.add_table()?;
    tracing::info!(table = id.0, "table added");
    Ok(vec![SimEvent::TableAdded { table: id }])
}

/// Ask the regulars for news. When one has news available, the opportunity
/// opens as a prompt awaiting accept/reject.
pub fn request_regular_news(engine: &mut Engine) -> Result<Vec<SimEvent>> {
    ensure_ready(engine)?;
    if engine.open_prompt.is_some() {
        return Ok(Vec::new());
    }
    let day = engine.economy.day;
    let Some(opportunity) = engine.regulars.generate_opportunity(day, &mut engine.rng) else {
        return Ok(Vec::new());
    };
    let event = SimEvent::OpportunityOffered {
        regular: opportunity.regular_name.clone(),
        headline: opportunity.headline.clone(),
    };
    engine.open_prompt = Some(Prompt::OpportunityNews {
        regular: opportunity.regular_name.clone(),
        headline: opportunity.headline.clone(),
    });
    engine.pending_opportunity = Some(opportunity);
    Ok(vec![event])
}

/// Accept the pending news: the regular levels up and a time-boxed
/// recommendation bonus starts counting down
pub fn accept_opportunity(engine: &mut Engine) -> Result<Vec<SimEvent>> {
    ensure_ready(engine)?;
    let Some(opportunity) = engine.pending_opportunity.take() else {
        return Ok(Vec::new());
    };
    engine.open_prompt = None;
    let day = engine.economy.day;
    engine
        .regulars
        .resolve_opportunity(&opportunity.regular_name, true, day);

    engine.buffs.add(BuffSpec {
        kind: BuffKind::Regular,
        category: BuffCategory::Positive,
        name: format!("{}'s tip", opportunity.regular_name),
        description: opportunity.headline.clone(),
        value: opportunity.bonus_value,
        start_day: day,
        duration: opportunity.duration_days as i32,
        source: format!("regular:{}", opportunity.regular_name),
        stackable: false,
    });
    engine.economy.opportunity_bonus = opportunity.bonus_value;
    engine.economy.opportunity_bonus_days = opportunity.duration_days;

    Ok(vec![SimEvent::OpportunityAccepted {
        regular: opportunity.regular_name,
        bonus: opportunity.bonus_value,
        duration_days: opportunity.duration_days,
    }])
}

/// Decline the pending news; the regular's cadence still restarts
pub fn reject_opportunity(engine: &mut Engine) -> Result<Vec<SimEvent>> {
    ensure_ready(engine)?;
    let Some(opportunity) = engine.pending_opportunity.take() else {
        return Ok(Vec::new());
    };
    engine.open_prompt = None;
    let day = engine.economy.day;
    engine
        .regulars
        .resolve_opportunity(&opportunity.regular_name, false, day);
    Ok(vec![SimEvent::OpportunityRejected {
        regular: opportunity.regular_name,
    }])
}

/// Trade surrendered copies against a catalog game, paying any shortfall
/// through the waterfall. The shortfall is verified affordable before any
/// copy leaves the library.
pub fn trade_games(
    engine: &mut Engine,
    surrendered: &[String],
    target_name: &str,
) -> Result<Vec<SimEvent>> {
    ensure_ready(engine)?;
    let Some(record) = engine.catalog.get(target_name).cloned() else {
        return Ok(Vec::new());
    };
    let credit = engine.inventory.total_trade_value(surrendered);
    let shortfall = (record.price - credit).max(0);
    if !engine.economy.can_afford(shortfall) {
        return Err(CafeError::InsufficientFunds {
            needed: shortfall,
            available: engine.economy.revenue + engine.economy.funds,
        });
    }
    engine.economy.charge(shortfall)?;
    let day = engine.economy.day;
    let receipt = engine
        .inventory
        .trade(surrendered, OwnedGame::from_record(&record, day));
    Ok(vec![SimEvent::TradeCompleted {
        target: record.name,
        shortfall: receipt.shortfall,
    }])
}

/// Flip the clock between normal and fast speed
pub fn toggle_speed(engine: &mut Engine) -> Result<Vec<SimEvent>> {
    ensure_ready(engine)?;
    engine.clock.toggle_speed();
    Ok(Vec::new())
}

/// Close whatever prompt is open and drop any held selection
pub fn dismiss_prompt(engine: &mut Engine) -> Result<Vec<SimEvent>> {
    ensure_ready(engine)?;
    engine.open_prompt = None;
    engine.selected_table = None;
    engine.pending_opportunity = None;
    Ok(Vec::new())
}
