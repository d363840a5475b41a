//! Pre-parsed collaborator records
//!
//! The engine never parses catalog files itself; the presentation layer (or
//! the demo data in [`demo`]) hands over fully-parsed records and the core
//! only evaluates them. Unlock predicates gate purchasability against the
//! current economy counters.

pub mod demo;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{Day, Money, Week};

/// What has to be true before a purchasable game shows up in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockCondition {
    Always,
    /// Unlocks once `day >= value`
    Day,
    /// Unlocks once `total_visitors >= value`
    Visitors,
    /// Unlocks once `satisfaction >= value`
    Rating,
    /// Unlocks once `regulars >= value`
    Regulars,
}

/// Economy counters an unlock predicate is evaluated against
#[derive(Debug, Clone, Copy)]
pub struct UnlockContext {
    pub day: Day,
    pub total_visitors: u32,
    pub satisfaction: f64,
    pub regulars: u32,
}

/// A fully-parsed catalog entry for one game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub name: String,
    /// 1 (gateway) to 5 (heavy)
    pub difficulty: u8,
    pub genre: String,
    pub icon: String,
    pub price: Money,
    /// Supported player counts, e.g. "2-4"
    pub player_count: String,
    /// Typical play time in minutes
    pub play_time: u32,
    pub description: String,
    pub flavor: String,
    /// Seeds the starting inventory when true
    pub initial: bool,
    pub unlock_condition: UnlockCondition,
    pub unlock_value: u32,
}

impl GameRecord {
    pub fn is_unlocked(&self, ctx: &UnlockContext) -> bool {
        match self.unlock_condition {
            UnlockCondition::Always => true,
            UnlockCondition::Day => ctx.day >= self.unlock_value,
            UnlockCondition::Visitors => ctx.total_visitors >= self.unlock_value,
            UnlockCondition::Rating => ctx.satisfaction >= self.unlock_value as f64,
            UnlockCondition::Regulars => ctx.regulars >= self.unlock_value,
        }
    }
}

/// Template for one regular customer, drawn when the roster grows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegularTemplate {
    pub name: String,
    pub personality: String,
    pub news_type: String,
    /// Minimum days between two pieces of news from this regular
    pub news_frequency_days: u32,
    pub bonus_type: String,
    /// Percentage points added to recommendation success while active
    pub bonus_value: i32,
    pub duration_days: u32,
}

/// One week's community post with its trending games
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityRecord {
    pub week: Week,
    pub trending_names: Vec<String>,
    pub title: String,
    pub content: String,
    pub importance: Importance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
}

/// Offer presented by the forced weekly prompt, cycled in record order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyOffer {
    pub name: String,
    pub difficulty: u8,
    pub cost: Money,
}

/// The full pre-parsed catalog handed to the engine at bootstrap
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    games: Vec<GameRecord>,
    by_name: AHashMap<String, usize>,
    weekly_offers: Vec<WeeklyOffer>,
}

impl Catalog {
    pub fn new(games: Vec<GameRecord>, weekly_offers: Vec<WeeklyOffer>) -> Self {
        let by_name = games
            .iter()
            .enumerate()
            .map(|(i, g)| (g.name.clone(), i))
            .collect();
        Self {
            games,
            by_name,
            weekly_offers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn get(&self, name: &str) -> Option<&GameRecord> {
        self.by_name.get(name).map(|&i| &self.games[i])
    }

    /// Records that seed the starting inventory
    pub fn initial_games(&self) -> impl Iterator<Item = &GameRecord> {
        self.games.iter().filter(|g| g.initial)
    }

    /// Purchasable records whose unlock predicate currently passes
    pub fn unlocked(&self, ctx: &UnlockContext) -> Vec<&GameRecord> {
        self.games
            .iter()
            .filter(|g| !g.initial && g.is_unlocked(ctx))
            .collect()
    }

    pub fn weekly_offer(&self, index: usize) -> Option<&WeeklyOffer> {
        if self.weekly_offers.is_empty() {
            return None;
        }
        Some(&self.weekly_offers[index % self.weekly_offers.len()])
    }

    pub fn weekly_offer_count(&self) -> usize {
        self.weekly_offers.len()
    }
}
