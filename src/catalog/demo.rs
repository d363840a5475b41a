//! Embedded demo data for the headless driver
//!
//! Stands in for the pre-parsed records a real frontend would supply.

use crate::catalog::{
    Catalog, CommunityRecord, GameRecord, Importance, RegularTemplate, UnlockCondition, WeeklyOffer,
};

fn game(
    name: &str,
    difficulty: u8,
    genre: &str,
    icon: &str,
    price: i64,
    initial: bool,
    unlock: UnlockCondition,
    unlock_value: u32,
) -> GameRecord {
    GameRecord {
        name: name.into(),
        difficulty,
        genre: genre.into(),
        icon: icon.into(),
        price,
        player_count: "2-4".into(),
        play_time: 30 + difficulty as u32 * 15,
        description: format!("{genre} game for the whole table"),
        flavor: String::new(),
        initial,
        unlock_condition: unlock,
        unlock_value,
    }
}

/// Demo catalog: three starter games plus an unlock ladder
pub fn demo_catalog() -> Catalog {
    let games = vec![
        game("Rolling Hills", 1, "family", "🎲", 30_000, true, UnlockCondition::Always, 0),
        game("Harbor Masters", 2, "strategy", "⚓", 40_000, true, UnlockCondition::Always, 0),
        game("Night Signals", 2, "party", "🕯️", 30_000, true, UnlockCondition::Always, 0),
        game("Clockwork Garden", 3, "engine", "⚙️", 50_000, false, UnlockCondition::Always, 0),
        game("Whisper Alley", 2, "detective", "🔎", 35_000, false, UnlockCondition::Day, 5),
        game("Cinder Court", 4, "strategy", "🔥", 60_000, false, UnlockCondition::Visitors, 100),
        game("Paper Lanterns", 1, "family", "🏮", 25_000, false, UnlockCondition::Rating, 50),
        game("Ledger of Kings", 5, "heavy", "👑", 80_000, false, UnlockCondition::Regulars, 5),
        game("Tide Runners", 3, "coop", "🌊", 45_000, false, UnlockCondition::Day, 15),
        game("Gloam Market", 4, "deckbuilding", "🃏", 55_000, false, UnlockCondition::Visitors, 250),
    ];
    let weekly_offers = vec![
        WeeklyOffer { name: "Clockwork Garden".into(), difficulty: 3, cost: 50_000 },
        WeeklyOffer { name: "Tide Runners".into(), difficulty: 3, cost: 45_000 },
        WeeklyOffer { name: "Cinder Court".into(), difficulty: 4, cost: 60_000 },
        WeeklyOffer { name: "Gloam Market".into(), difficulty: 4, cost: 55_000 },
    ];
    Catalog::new(games, weekly_offers)
}

/// Demo regular-customer templates
pub fn demo_regulars() -> Vec<RegularTemplate> {
    vec![
        RegularTemplate {
            name: "Mina".into(),
            personality: "analyst".into(),
            news_type: "game".into(),
            news_frequency_days: 7,
            bonus_type: "recommend".into(),
            bonus_value: 20,
            duration_days: 6,
        },
        RegularTemplate {
            name: "Jun".into(),
            personality: "socialite".into(),
            news_type: "event".into(),
            news_frequency_days: 8,
            bonus_type: "recommend".into(),
            bonus_value: 12,
            duration_days: 9,
        },
        RegularTemplate {
            name: "Hana".into(),
            personality: "scout".into(),
            news_type: "competitor".into(),
            news_frequency_days: 10,
            bonus_type: "recommend".into(),
            bonus_value: 25,
            duration_days: 4,
        },
        RegularTemplate {
            name: "Theo".into(),
            personality: "mentor".into(),
            news_type: "tip".into(),
            news_frequency_days: 9,
            bonus_type: "recommend".into(),
            bonus_value: 10,
            duration_days: 12,
        },
    ]
}

/// Demo community posts covering the first four weeks
pub fn demo_community() -> Vec<CommunityRecord> {
    vec![
        CommunityRecord {
            week: 1,
            trending_names: vec!["Rolling Hills".into()],
            title: "Family night is back".into(),
            content: "Light games are filling tables across the city.".into(),
            importance: Importance::Medium,
        },
        CommunityRecord {
            week: 2,
            trending_names: vec!["Harbor Masters".into(), "Clockwork Garden".into()],
            title: "Engine builders surge".into(),
            content: "Two local tournaments pushed strategy titles up the charts.".into(),
            importance: Importance::High,
        },
        CommunityRecord {
            week: 3,
            trending_names: vec!["Whisper Alley".into()],
            title: "Deduction craze".into(),
            content: "A streaming series has everyone playing detective.".into(),
            importance: Importance::Medium,
        },
        CommunityRecord {
            week: 4,
            trending_names: vec!["Tide Runners".into()],
            title: "Co-op weekend".into(),
            content: "Cooperative tables sold out downtown.".into(),
            importance: Importance::Low,
        },
    ]
}
