//! Opportunity providers
//!
//! Regulars and the community board are external, data-driven collaborators:
//! the scheduler only depends on the contracts here. The reference
//! implementations in [`regulars`] and [`community`] run over pre-parsed
//! template records; a real frontend may substitute its own sources.

pub mod community;
pub mod regulars;

use rand::RngCore;

use crate::catalog::CommunityRecord;
use crate::core::types::{Day, OpportunityId, Week};

pub use community::CommunityBoard;
pub use regulars::{RegularCustomer, RegularsRoster};

/// A time-boxed, single-use offer surfaced to the player. Acceptance
/// produces exactly one buff (built by the action layer from these fields);
/// rejection is bookkeeping only.
#[derive(Debug, Clone)]
pub struct Opportunity {
    pub id: OpportunityId,
    pub regular_name: String,
    pub personality: String,
    pub news_type: String,
    /// Percentage points added to recommendation success while active
    pub bonus_value: i32,
    pub duration_days: u32,
    pub created_day: Day,
    pub headline: String,
}

/// Regular customers: roster growth/shrink driven by the tick, plus news
/// opportunities rationed by each regular's frequency.
pub trait RegularsProvider {
    /// True once the backing template pool loaded non-empty. Bootstrap
    /// treats an empty pool as a startup fault, not "nothing to do".
    fn is_loaded(&self) -> bool;

    fn roster_len(&self) -> usize;

    /// Grow the roster from the template pool; returns the new name
    fn add_random(&mut self, rng: &mut dyn RngCore) -> Option<String>;

    /// Shrink the roster by one; returns the departed name
    fn remove_one(&mut self) -> Option<String>;

    /// True when at least one regular can provide news today
    fn has_news(&self, day: Day) -> bool;

    /// Draw an opportunity from a uniformly-chosen available regular
    fn generate_opportunity(&mut self, day: Day, rng: &mut dyn RngCore) -> Option<Opportunity>;

    /// Apply accept/reject bookkeeping for the named regular
    fn resolve_opportunity(&mut self, regular_name: &str, accepted: bool, day: Day);
}

/// The community board: weekly posts and the trending set, fully recomputed
/// on week advance.
pub trait CommunityProvider {
    /// True once the backing records loaded non-empty
    fn is_loaded(&self) -> bool;

    /// Recompute the trending set for `week` and return it
    fn recompute_trending(&mut self, week: Week) -> Vec<String>;

    fn is_trending(&self, name: &str) -> bool;

    fn trending(&self) -> Vec<String>;

    fn current_posts(&self) -> &[CommunityRecord];
}
