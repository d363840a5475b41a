//! Per-tick aggregate satisfaction model
//!
//! The delta is built in three stages: a base delta from the table census,
//! an ordered list of modifiers collected from active buffs (additive values
//! and vetoes), and band resistance that damps gains at high ratings. The
//! modifier list replaces scattered special cases: every buff effect goes
//! through the same pipeline.

use crate::cafe::buffs::{BuffKind, BuffManager};

/// Snapshot of the table situation one tick's delta is computed from
#[derive(Debug, Clone, Copy)]
pub struct TableCensus {
    pub table_count: usize,
    pub occupied: usize,
    pub empty: usize,
    /// Occupied tables at satisfaction 5
    pub perfect: usize,
    /// Occupied tables at satisfaction <= 2
    pub unhappy: usize,
}

/// One entry in the ordered modifier list
#[derive(Debug, Clone)]
pub enum SatisfactionModifier {
    /// Added to the base delta
    Additive { value: f64, reason: String },
    /// Zeroes the delta if the running total is negative
    VetoNegative { reason: String },
}

/// Base delta from the census alone, before any modifier
pub fn base_delta(census: &TableCensus) -> f64 {
    let mut delta = 0.0;

    if census.occupied == census.table_count && census.table_count > 0 {
        delta += 0.2;
    }
    if census.perfect >= 2 {
        delta += 0.1;
    }

    if census.occupied < 2 {
        delta -= 0.3;
    }
    if census.empty >= 3 {
        delta -= 0.2;
    }
    delta -= census.unhappy as f64 * 0.4;
    if census.unhappy >= 3 {
        delta -= 0.5;
    }

    delta + census.perfect as f64 * 0.3
}

/// Collect the tick's modifier list from active buffs.
///
/// Community and rating buff values are expressed in rating tenths, so a
/// value of 2 contributes +0.2 per tick. Owning a currently-trending game
/// vetoes a negative total for the tick.
pub fn collect_modifiers(buffs: &BuffManager, owns_trending: bool) -> Vec<SatisfactionModifier> {
    let mut modifiers = Vec::new();

    for kind in [BuffKind::Community, BuffKind::Rating] {
        for buff in buffs.by_kind(kind) {
            if buff.value != 0 {
                modifiers.push(SatisfactionModifier::Additive {
                    value: buff.value as f64 / 10.0,
                    reason: buff.name.clone(),
                });
            }
        }
    }

    if owns_trending {
        modifiers.push(SatisfactionModifier::VetoNegative {
            reason: "trending game owned".to_string(),
        });
    }

    modifiers
}

/// Apply the modifier list in order: additives accumulate, then any veto
/// zeroes a negative total
pub fn apply_modifiers(base: f64, modifiers: &[SatisfactionModifier]) -> f64 {
    let mut delta = base;
    let mut veto_negative = false;

    for modifier in modifiers {
        match modifier {
            SatisfactionModifier::Additive { value, .. } => delta += value,
            SatisfactionModifier::VetoNegative { .. } => veto_negative = true,
        }
    }

    if veto_negative && delta < 0.0 {
        0.0
    } else {
        delta
    }
}

/// Gains meet resistance at high ratings; losses pass through unchanged
pub fn band_resistance(delta: f64, rating: f64) -> f64 {
    if delta <= 0.0 {
        return delta;
    }
    if rating >= 8.0 {
        delta * 0.5
    } else if rating >= 7.0 {
        delta * 0.7
    } else if rating >= 6.0 {
        delta * 0.85
    } else {
        delta
    }
}

/// The complete per-tick delta for the current rating
pub fn tick_delta(census: &TableCensus, modifiers: &[SatisfactionModifier], rating: f64) -> f64 {
    band_resistance(apply_modifiers(base_delta(census), modifiers), rating)
}
