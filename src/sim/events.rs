//! Events generated during simulation steps
//!
//! These events are returned by the tick/day step functions and the player
//! actions for display in the presentation layer's activity log.

use serde::Serialize;

use crate::cafe::reviews::{ReviewContext, ReviewSentiment};
use crate::core::types::{Day, Money, TableId, Week};
use crate::model::promotion::{PromotionKind, PromotionReward};

#[derive(Debug, Clone, Serialize)]
pub enum SimEvent {
    /// A party sat down at an empty table
    PartyArrived {
        table: TableId,
        game: String,
        satisfaction: u8,
        /// Head count added to total_visitors
        visitors: u32,
    },
    /// An occupied table emptied
    PartyDeparted { table: TableId, satisfaction: u8 },
    /// The tick minted a new regular customer
    RegularGained { name: Option<String> },
    /// A regular drifted away over unhappy tables
    RegularLost { name: Option<String> },
    /// A review landed in the log
    ReviewPosted {
        sentiment: ReviewSentiment,
        context: ReviewContext,
    },
    /// The most-worn game was evicted at a visitor milestone
    GameWoreOut { name: String, recommend_count: u32 },
    /// The day counter advanced
    DayAdvanced { day: Day },
    /// Monthly settlement ran
    SettlementCompleted {
        revenue: Money,
        maintenance: Money,
        net: Money,
    },
    /// The forced weekly offer prompt opened
    WeeklyPromptOpened { offer: String, cost: Money },
    /// A buff left the registry at the day sweep
    BuffExpired { name: String, source: String },
    /// The community trending set was recomputed for a new week
    TrendingRefreshed { week: Week, names: Vec<String> },
    /// A recommendation resolved at a table
    RecommendationResolved {
        table: TableId,
        game: String,
        success: bool,
        delta: i8,
    },
    /// A promotion resolved with its tier and reward
    PromotionResolved {
        kind: PromotionKind,
        tier: u8,
        reward: PromotionReward,
    },
    /// A game was purchased into the library
    GamePurchased { name: String, cost: Money },
    /// A trade-in completed
    TradeCompleted {
        target: String,
        shortfall: Money,
    },
    /// A table was added to the floor
    TableAdded { table: TableId },
    /// A regular offered news
    OpportunityOffered { regular: String, headline: String },
    /// The player accepted a news opportunity
    OpportunityAccepted {
        regular: String,
        bonus: i32,
        duration_days: u32,
    },
    /// The player declined a news opportunity
    OpportunityRejected { regular: String },
}
