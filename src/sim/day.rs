//! Day-boundary step
//!
//! Runs independently of the tick on its own cadence. After the day counter
//! advances, the boundary work runs in a fixed order: the forced weekly
//! prompt, monthly settlement, the opportunity-bonus countdown, the buff
//! expiry sweep, and the community week advance. Each recurring piece is
//! guarded by a monotonic watermark so a boundary evaluated twice never
//! double-fires.

use crate::core::error::{CafeError, Result};
use crate::core::types::week_of;
use crate::sim::engine::{Engine, Prompt};
use crate::sim::events::SimEvent;

/// Advance the day counter and run the boundary sequence
pub fn run_day(engine: &mut Engine) -> Result<Vec<SimEvent>> {
    if !engine.is_ready() {
        return Err(CafeError::NotReady);
    }
    if engine.is_paused() {
        return Ok(Vec::new());
    }

    engine.economy.day += 1;
    let day = engine.economy.day;
    let mut events = vec![SimEvent::DayAdvanced { day }];
    tracing::debug!(day, "day advanced");

    open_weekly_prompt(engine, &mut events);
    run_settlement(engine, &mut events);
    tick_opportunity_bonus(engine);
    sweep_buffs(engine, &mut events);
    advance_community_week(engine, &mut events);

    Ok(events)
}

/// Every 7th day the cycled weekly offer interrupts play. The watermark
/// keeps a re-evaluated boundary from opening a second prompt for the same
/// day.
fn open_weekly_prompt(engine: &mut Engine, events: &mut Vec<SimEvent>) {
    let day = engine.economy.day;
    if day % 7 != 0 || day <= engine.economy.last_weekly_prompt_day {
        return;
    }
    let Some(offer) = engine.catalog.weekly_offer(engine.weekly_offer_index) else {
        return;
    };
    engine.economy.last_weekly_prompt_day = day;
    engine.open_prompt = Some(Prompt::WeeklyOffer {
        name: offer.name.clone(),
        difficulty: offer.difficulty,
        cost: offer.cost,
    });
    tracing::info!(day, offer = %offer.name, "weekly offer prompt opened");
    events.push(SimEvent::WeeklyPromptOpened {
        offer: offer.name.clone(),
        cost: offer.cost,
    });
}

/// Every 30th day revenue folds into funds after maintenance
fn run_settlement(engine: &mut Engine, events: &mut Vec<SimEvent>) {
    let day = engine.economy.day;
    if day % 30 != 0 || day <= engine.economy.last_settlement_day {
        return;
    }
    let revenue = engine.economy.revenue;
    let maintenance = engine.config.monthly_maintenance_cost;
    engine.economy.settle(maintenance);
    tracing::info!(day, revenue, maintenance, "monthly settlement");
    events.push(SimEvent::SettlementCompleted {
        revenue,
        maintenance,
        net: revenue - maintenance,
    });
}

/// Count the active opportunity bonus down one day, clearing the bonus when
/// the window closes
fn tick_opportunity_bonus(engine: &mut Engine) {
    if engine.economy.opportunity_bonus_days == 0 {
        return;
    }
    engine.economy.opportunity_bonus_days -= 1;
    if engine.economy.opportunity_bonus_days == 0 {
        engine.economy.opportunity_bonus = 0;
    }
}

fn sweep_buffs(engine: &mut Engine, events: &mut Vec<SimEvent>) {
    for buff in engine.buffs.check_expiry(engine.economy.day) {
        events.push(SimEvent::BuffExpired {
            name: buff.name,
            source: buff.source,
        });
    }
}

/// Recompute the trending set whenever the calendar week rolled over
fn advance_community_week(engine: &mut Engine, events: &mut Vec<SimEvent>) {
    let week = week_of(engine.economy.day);
    if week <= engine.economy.last_community_week {
        return;
    }
    let names = engine.refresh_trending(week);
    engine.economy.last_community_week = week;
    tracing::info!(week, ?names, "community week advanced");
    events.push(SimEvent::TrendingRefreshed { week, names });
}
