//! Owned game library - acquisition, trade-in, and wear-out
//!
//! Duplicates of the same title are allowed (two copies wear independently);
//! a deduplicated view exists for display only. Trade value is fixed at
//! half the original price when the copy is acquired and never recomputed.

use ahash::AHashSet;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::GameRecord;
use crate::core::types::{Day, Money};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedGame {
    pub name: String,
    pub difficulty: u8,
    pub genre: String,
    pub icon: String,
    pub original_price: Money,
    /// floor(original_price * 0.5), fixed at acquisition
    pub trade_value: Money,
    pub recommend_count: u32,
    pub acquired_day: Day,
}

impl OwnedGame {
    pub fn from_record(record: &GameRecord, acquired_day: Day) -> Self {
        Self {
            name: record.name.clone(),
            difficulty: record.difficulty,
            genre: record.genre.clone(),
            icon: record.icon.clone(),
            original_price: record.price,
            trade_value: record.price / 2,
            recommend_count: 0,
            acquired_day,
        }
    }

    /// Fallback for titles not present in the catalog (e.g. weekly offers)
    pub fn basic(name: &str, difficulty: u8, price: Money, acquired_day: Day) -> Self {
        Self {
            name: name.to_string(),
            difficulty,
            genre: "misc".to_string(),
            icon: "🎲".to_string(),
            original_price: price,
            trade_value: price / 2,
            recommend_count: 0,
            acquired_day,
        }
    }
}

/// Outcome of a completed trade-in
#[derive(Debug, Clone)]
pub struct TradeReceipt {
    pub surrendered: Vec<String>,
    pub surrendered_value: Money,
    pub target_price: Money,
    /// Amount still owed after trade-in credit, for the caller to charge
    pub shortfall: Money,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    owned: Vec<OwnedGame>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.owned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OwnedGame> {
        self.owned.iter()
    }

    pub fn add(&mut self, game: OwnedGame) {
        tracing::debug!(game = %game.name, "game added to library");
        self.owned.push(game);
    }

    /// Remove the first copy matching `name`, if any
    pub fn remove_first(&mut self, name: &str) -> Option<OwnedGame> {
        let idx = self.owned.iter().position(|g| g.name == name)?;
        Some(self.owned.remove(idx))
    }

    pub fn has(&self, name: &str) -> bool {
        self.owned.iter().any(|g| g.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&OwnedGame> {
        self.owned.iter().find(|g| g.name == name)
    }

    /// Uniform pick among owned copies, used when a party sits down
    pub fn random_owned<R: Rng>(&self, rng: &mut R) -> Option<&OwnedGame> {
        if self.owned.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.owned.len());
        Some(&self.owned[idx])
    }

    pub fn increment_recommend(&mut self, name: &str) {
        if let Some(game) = self.owned.iter_mut().find(|g| g.name == name) {
            game.recommend_count += 1;
        }
    }

    /// Wear-out candidate: the most-recommended copy, but only when the
    /// library is bigger than `min_pool` and that maximum has reached
    /// `min_recommends`. The gate keeps small libraries from being thinned.
    pub fn most_recommended(&self, min_pool: usize, min_recommends: u32) -> Option<&OwnedGame> {
        if self.owned.len() <= min_pool {
            return None;
        }
        let most = self.owned.iter().max_by_key(|g| g.recommend_count)?;
        if most.recommend_count < min_recommends {
            return None;
        }
        Some(most)
    }

    /// Total trade-in credit for the named copies (first match each)
    pub fn total_trade_value(&self, names: &[String]) -> Money {
        let mut remaining = self.owned.clone();
        let mut total = 0;
        for name in names {
            if let Some(idx) = remaining.iter().position(|g| &g.name == name) {
                total += remaining.remove(idx).trade_value;
            }
        }
        total
    }

    /// Surrender the named copies against `target`; the caller charges the
    /// returned shortfall through the expense waterfall.
    pub fn trade(&mut self, surrendered: &[String], target: OwnedGame) -> TradeReceipt {
        let mut value = 0;
        for name in surrendered {
            if let Some(game) = self.remove_first(name) {
                value += game.trade_value;
            }
        }
        let target_price = target.original_price;
        let receipt = TradeReceipt {
            surrendered: surrendered.to_vec(),
            surrendered_value: value,
            target_price,
            shortfall: (target_price - value).max(0),
        };
        tracing::debug!(
            target = %target.name,
            shortfall = receipt.shortfall,
            "trade-in completed"
        );
        self.add(target);
        receipt
    }

    /// Copies eligible for trade-in (played enough to have resale interest)
    pub fn tradable(&self, min_recommends: u32) -> Vec<&OwnedGame> {
        self.owned
            .iter()
            .filter(|g| g.recommend_count >= min_recommends)
            .collect()
    }

    /// First copy of each title, display only
    pub fn unique_view(&self) -> Vec<&OwnedGame> {
        let mut seen = AHashSet::new();
        self.owned
            .iter()
            .filter(|g| seen.insert(g.name.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(name: &str, price: Money, recommends: u32) -> OwnedGame {
        let mut g = OwnedGame::basic(name, 2, price, 0);
        g.recommend_count = recommends;
        g
    }

    #[test]
    fn test_trade_value_fixed_at_half_price() {
        let g = OwnedGame::basic("A", 2, 45_000, 3);
        assert_eq!(g.trade_value, 22_500);
    }

    #[test]
    fn test_most_recommended_gated_by_pool_size() {
        let mut inv = Inventory::new();
        inv.add(owned("A", 30_000, 12));
        inv.add(owned("B", 30_000, 3));
        assert!(inv.most_recommended(2, 10).is_none());

        inv.add(owned("C", 30_000, 1));
        assert_eq!(inv.most_recommended(2, 10).unwrap().name, "A");
    }

    #[test]
    fn test_most_recommended_gated_by_count() {
        let mut inv = Inventory::new();
        inv.add(owned("A", 30_000, 9));
        inv.add(owned("B", 30_000, 3));
        inv.add(owned("C", 30_000, 1));
        assert!(inv.most_recommended(2, 10).is_none());
    }

    #[test]
    fn test_trade_shortfall() {
        let mut inv = Inventory::new();
        inv.add(owned("A", 30_000, 5)); // trade value 15_000
        inv.add(owned("B", 40_000, 5)); // trade value 20_000
        let receipt = inv.trade(
            &["A".to_string(), "B".to_string()],
            OwnedGame::basic("C", 4, 50_000, 10),
        );
        assert_eq!(receipt.surrendered_value, 35_000);
        assert_eq!(receipt.shortfall, 15_000);
        assert!(!inv.has("A"));
        assert!(!inv.has("B"));
        assert!(inv.has("C"));
    }

    #[test]
    fn test_duplicates_and_unique_view() {
        let mut inv = Inventory::new();
        inv.add(owned("A", 30_000, 0));
        inv.add(owned("A", 30_000, 0));
        inv.add(owned("B", 30_000, 0));
        assert_eq!(inv.len(), 3);
        assert_eq!(inv.unique_view().len(), 2);

        inv.remove_first("A");
        assert!(inv.has("A"));
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut inv = Inventory::new();
        assert!(inv.remove_first("ghost").is_none());
    }
}
