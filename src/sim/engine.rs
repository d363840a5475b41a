//! The engine state aggregate
//!
//! One owned aggregate replaces long-lived singleton managers: the engine is
//! constructed by [`Engine::bootstrap`], mutated only by the step functions
//! in [`crate::sim::tick`] / [`crate::sim::day`] and the player actions in
//! [`crate::sim::actions`], and read by the presentation layer through
//! snapshot getters. Every step commits fully before returning; there are no
//! suspension points inside a step.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::cafe::buffs::{Buff, BuffCategory, BuffKind, BuffManager, BuffSpec};
use crate::cafe::economy::EconomyState;
use crate::cafe::inventory::{Inventory, OwnedGame};
use crate::cafe::reviews::{Review, ReviewLog};
use crate::cafe::tables::{Table, TableRoster};
use crate::catalog::{Catalog, CommunityRecord, GameRecord};
use crate::core::config::CafeConfig;
use crate::core::error::{CafeError, Result};
use crate::core::types::{Money, TableId, Week};
use crate::providers::{CommunityProvider, Opportunity, RegularsProvider};
use crate::sim::clock::SimClock;

/// Source tag for the weekly community trending buff, replaced wholesale on
/// week advance
pub const TRENDING_BUFF_SOURCE: &str = "community-trending";

/// A copy becomes trade-in material once recommended this often
const TRADABLE_MIN_RECOMMENDS: u32 = 5;

/// An exclusive player decision in progress. While a prompt is open the
/// simulation is paused.
#[derive(Debug, Clone, Serialize)]
pub enum Prompt {
    /// Forced weekly offer: buy the cycled game or pass
    WeeklyOffer {
        name: String,
        difficulty: u8,
        cost: Money,
    },
    /// Choose a promotion to run on the selected empty table
    PromotionChoice { table: TableId },
    /// A regular's news, to accept or decline
    OpportunityNews { regular: String, headline: String },
}

pub struct Engine {
    pub(crate) config: CafeConfig,
    pub(crate) economy: EconomyState,
    pub(crate) tables: TableRoster,
    pub(crate) inventory: Inventory,
    pub(crate) buffs: BuffManager,
    pub(crate) reviews: ReviewLog,
    pub(crate) catalog: Catalog,
    pub(crate) regulars: Box<dyn RegularsProvider>,
    pub(crate) community: Box<dyn CommunityProvider>,
    pub(crate) clock: SimClock,
    pub(crate) rng: ChaCha8Rng,
    ready: bool,
    pub(crate) selected_table: Option<TableId>,
    pub(crate) open_prompt: Option<Prompt>,
    /// Tables scheduled to empty at the start of the next tick (a failed
    /// recommendation that bottomed out the party's mood)
    pub(crate) pending_departures: Vec<TableId>,
    pub(crate) pending_opportunity: Option<Opportunity>,
    pub(crate) weekly_offer_index: usize,
}

impl Engine {
    /// One-time bootstrap: validate the pre-parsed pools, seed the starting
    /// inventory and roster, and compute week 1's trending set. Ticking an
    /// engine that never bootstrapped is a startup fault.
    pub fn bootstrap(
        config: CafeConfig,
        catalog: Catalog,
        regulars: Box<dyn RegularsProvider>,
        community: Box<dyn CommunityProvider>,
    ) -> Result<Self> {
        if catalog.is_empty() {
            return Err(CafeError::DataLoad("catalog is empty".into()));
        }
        if !regulars.is_loaded() {
            return Err(CafeError::DataLoad("regulars pool is empty".into()));
        }
        if !community.is_loaded() {
            return Err(CafeError::DataLoad("community records are empty".into()));
        }

        let mut engine = Self {
            economy: EconomyState::new(
                config.initial_funds,
                config.initial_satisfaction,
                config.initial_regulars,
            ),
            tables: TableRoster::new(config.initial_tables, config.max_tables),
            inventory: Inventory::new(),
            buffs: BuffManager::new(),
            reviews: ReviewLog::new(),
            catalog,
            regulars,
            community,
            clock: SimClock::new(
                config.tick_interval_ms,
                config.day_interval_ms,
                config.speed_multiplier,
            ),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            ready: false,
            selected_table: None,
            open_prompt: None,
            pending_departures: Vec::new(),
            pending_opportunity: None,
            weekly_offer_index: 0,
            config,
        };

        for record in engine.catalog.initial_games() {
            engine.inventory.add(OwnedGame::from_record(record, 0));
        }
        if engine.inventory.is_empty() {
            return Err(CafeError::DataLoad(
                "catalog has no initial games to seed the library".into(),
            ));
        }

        for _ in 0..engine.config.initial_regulars {
            engine.regulars.add_random(&mut engine.rng);
        }

        engine.refresh_trending(1);
        engine.economy.last_community_week = 1;

        engine.ready = true;
        tracing::info!(
            games = engine.inventory.len(),
            tables = engine.tables.len(),
            "engine bootstrapped"
        );
        Ok(engine)
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Pause is derived, never stored: the simulation stands still whenever
    /// an exclusive player decision is in progress.
    pub fn is_paused(&self) -> bool {
        self.open_prompt.is_some() || self.selected_table.is_some()
    }

    /// Recompute the trending set for `week` and replace the weekly
    /// community buff (source-scoped replace, never accumulate)
    pub(crate) fn refresh_trending(&mut self, week: Week) -> Vec<String> {
        let names = self.community.recompute_trending(week);
        self.buffs.remove_by_source(TRENDING_BUFF_SOURCE);
        if !names.is_empty() {
            self.buffs.add(BuffSpec {
                kind: BuffKind::Community,
                category: BuffCategory::Positive,
                name: format!("Trending: {}", names.join(", ")),
                description: "Owning a trending game protects the rating this week".into(),
                value: 0,
                start_day: self.economy.day,
                duration: 7,
                source: TRENDING_BUFF_SOURCE.into(),
                stackable: false,
            });
        }
        names
    }

    /// True when any owned game is in the current trending set
    pub(crate) fn owns_trending_game(&self) -> bool {
        self.inventory
            .iter()
            .any(|g| self.community.is_trending(&g.name))
    }

    // === Read-only surface for the presentation layer ===

    pub fn config(&self) -> &CafeConfig {
        &self.config
    }

    pub fn economy(&self) -> &EconomyState {
        &self.economy
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn selected_table(&self) -> Option<TableId> {
        self.selected_table
    }

    pub fn open_prompt(&self) -> Option<&Prompt> {
        self.open_prompt.as_ref()
    }

    pub fn owned_games(&self) -> impl Iterator<Item = &OwnedGame> {
        self.inventory.iter()
    }

    /// Display view: first copy of each owned title
    pub fn owned_unique(&self) -> Vec<&OwnedGame> {
        self.inventory.unique_view()
    }

    /// Copies played enough to carry trade-in interest
    pub fn tradable_games(&self) -> Vec<&OwnedGame> {
        self.inventory.tradable(TRADABLE_MIN_RECOMMENDS)
    }

    pub fn active_buffs(&self) -> &[Buff] {
        self.buffs.active()
    }

    pub fn recent_reviews(&self, n: usize) -> Vec<&Review> {
        self.reviews.recent(n)
    }

    pub fn trending(&self) -> Vec<String> {
        self.community.trending()
    }

    pub fn community_posts(&self) -> &[CommunityRecord] {
        self.community.current_posts()
    }

    pub fn regulars_count(&self) -> usize {
        self.regulars.roster_len()
    }

    /// Unlock-filtered purchasable records, excluding already-owned titles
    pub fn purchasable(&self) -> Vec<&GameRecord> {
        let ctx = self.economy.unlock_context();
        self.catalog
            .unlocked(&ctx)
            .into_iter()
            .filter(|g| !self.inventory.has(&g.name))
            .collect()
    }

    /// Serializable snapshot for dumping or remote display
    pub fn snapshot(&self) -> EngineSnapshot<'_> {
        EngineSnapshot {
            economy: &self.economy,
            tables: self.tables.iter().collect(),
            owned: self.inventory.unique_view(),
            buffs: self.buffs.active(),
            reviews: self.reviews.recent(15),
            trending: self.trending(),
            paused: self.is_paused(),
        }
    }
}

/// Read-only snapshot of everything the presentation layer shows
#[derive(Debug, Serialize)]
pub struct EngineSnapshot<'a> {
    pub economy: &'a EconomyState,
    pub tables: Vec<&'a Table>,
    pub owned: Vec<&'a OwnedGame>,
    pub buffs: &'a [Buff],
    pub reviews: Vec<&'a Review>,
    pub trending: Vec<String>,
    pub paused: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::demo::{demo_catalog, demo_community, demo_regulars};
    use crate::providers::{CommunityBoard, RegularsRoster};
    use crate::sim::testutil::demo_engine;

    #[test]
    fn test_bootstrap_seeds_initial_state() {
        let engine = demo_engine();
        assert!(engine.is_ready());
        assert_eq!(engine.tables().count(), 4);
        assert_eq!(engine.inventory.len(), 3);
        assert_eq!(engine.regulars_count(), 1);
        assert_eq!(engine.economy().funds, 4_000_000);
        // Week 1 trending buff installed
        assert!(engine.buffs.has_source(TRENDING_BUFF_SOURCE));
    }

    #[test]
    fn test_bootstrap_rejects_empty_catalog() {
        let result = Engine::bootstrap(
            CafeConfig::default(),
            Catalog::default(),
            Box::new(RegularsRoster::new(demo_regulars())),
            Box::new(CommunityBoard::new(demo_community())),
        );
        assert!(matches!(result, Err(CafeError::DataLoad(_))));
    }

    #[test]
    fn test_bootstrap_rejects_empty_providers() {
        let result = Engine::bootstrap(
            CafeConfig::default(),
            demo_catalog(),
            Box::new(RegularsRoster::new(Vec::new())),
            Box::new(CommunityBoard::new(demo_community())),
        );
        assert!(matches!(result, Err(CafeError::DataLoad(_))));

        let result = Engine::bootstrap(
            CafeConfig::default(),
            demo_catalog(),
            Box::new(RegularsRoster::new(demo_regulars())),
            Box::new(CommunityBoard::new(Vec::new())),
        );
        assert!(matches!(result, Err(CafeError::DataLoad(_))));
    }

    #[test]
    fn test_pause_derived_from_interactions() {
        let mut engine = demo_engine();
        assert!(!engine.is_paused());
        engine.selected_table = Some(TableId(1));
        assert!(engine.is_paused());
        engine.selected_table = None;
        engine.open_prompt = Some(Prompt::PromotionChoice { table: TableId(1) });
        assert!(engine.is_paused());
    }

    #[test]
    fn test_purchasable_excludes_owned_and_locked() {
        let engine = demo_engine();
        let names: Vec<_> = engine.purchasable().iter().map(|g| g.name.clone()).collect();
        // Owned starters never show; locked records need their condition met
        assert!(!names.contains(&"Rolling Hills".to_string()));
        assert!(names.contains(&"Clockwork Garden".to_string()));
        assert!(!names.contains(&"Cinder Court".to_string()));
    }
}
