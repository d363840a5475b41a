//! Template-driven regular customers
//!
//! The roster grows and shrinks as the tick mints or loses regulars. Each
//! regular hands out news on a personal cadence; accepting raises the
//! relationship, rejecting lowers it, and either way the cadence restarts.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::catalog::RegularTemplate;
use crate::core::types::{Day, OpportunityId};
use crate::providers::{Opportunity, RegularsProvider};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegularCustomer {
    pub id: u32,
    pub name: String,
    pub personality: String,
    pub news_type: String,
    pub news_frequency_days: u32,
    pub bonus_value: i32,
    pub duration_days: u32,
    /// Grows with accepted news, 1-5
    pub level: u8,
    /// 0-100
    pub relationship: u8,
    pub last_news_day: Day,
}

impl RegularCustomer {
    fn from_template(id: u32, template: &RegularTemplate) -> Self {
        Self {
            id,
            name: template.name.clone(),
            personality: template.personality.clone(),
            news_type: template.news_type.clone(),
            news_frequency_days: template.news_frequency_days,
            bonus_value: template.bonus_value,
            duration_days: template.duration_days,
            level: 1,
            relationship: 50,
            last_news_day: 0,
        }
    }

    /// A regular can provide news once their cadence has elapsed
    pub fn can_provide_news(&self, day: Day) -> bool {
        day.saturating_sub(self.last_news_day) >= self.news_frequency_days
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegularsRoster {
    pool: Vec<RegularTemplate>,
    active: Vec<RegularCustomer>,
    next_id: u32,
    next_opportunity_id: u32,
}

impl RegularsRoster {
    pub fn new(pool: Vec<RegularTemplate>) -> Self {
        Self {
            pool,
            active: Vec::new(),
            next_id: 1,
            next_opportunity_id: 1,
        }
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn regulars(&self) -> &[RegularCustomer] {
        &self.active
    }

    fn providers_for(&self, day: Day) -> Vec<usize> {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, r)| r.can_provide_news(day))
            .map(|(i, _)| i)
            .collect()
    }
}

impl RegularsProvider for RegularsRoster {
    fn is_loaded(&self) -> bool {
        !self.pool.is_empty()
    }

    fn roster_len(&self) -> usize {
        self.active.len()
    }

    fn add_random(&mut self, rng: &mut dyn RngCore) -> Option<String> {
        if self.pool.is_empty() {
            return None;
        }
        // Prefer templates not already seated; fall back to reuse once the
        // pool is exhausted
        let unused: Vec<&RegularTemplate> = self
            .pool
            .iter()
            .filter(|t| !self.active.iter().any(|r| r.name == t.name))
            .collect();
        let template = if unused.is_empty() {
            &self.pool[rng.gen_range(0..self.pool.len())]
        } else {
            unused[rng.gen_range(0..unused.len())]
        }
        .clone();

        let customer = RegularCustomer::from_template(self.next_id, &template);
        self.next_id += 1;
        let name = customer.name.clone();
        tracing::debug!(regular = %name, "regular joined");
        self.active.push(customer);
        Some(name)
    }

    fn remove_one(&mut self) -> Option<String> {
        if self.active.is_empty() {
            return None;
        }
        let departed = self.active.remove(0);
        tracing::debug!(regular = %departed.name, "regular drifted away");
        Some(departed.name)
    }

    fn has_news(&self, day: Day) -> bool {
        self.active.iter().any(|r| r.can_provide_news(day))
    }

    fn generate_opportunity(&mut self, day: Day, rng: &mut dyn RngCore) -> Option<Opportunity> {
        let candidates = self.providers_for(day);
        if candidates.is_empty() {
            return None;
        }
        let idx = candidates[rng.gen_range(0..candidates.len())];
        let regular = &self.active[idx];

        let id = OpportunityId(self.next_opportunity_id);
        self.next_opportunity_id += 1;
        Some(Opportunity {
            id,
            regular_name: regular.name.clone(),
            personality: regular.personality.clone(),
            news_type: regular.news_type.clone(),
            bonus_value: regular.bonus_value,
            duration_days: regular.duration_days,
            created_day: day,
            headline: format!(
                "{} ({}) shares some {} news",
                regular.name, regular.personality, regular.news_type
            ),
        })
    }

    fn resolve_opportunity(&mut self, regular_name: &str, accepted: bool, day: Day) {
        let Some(regular) = self.active.iter_mut().find(|r| r.name == regular_name) else {
            return;
        };
        regular.last_news_day = day;
        if accepted {
            regular.level = (regular.level + 1).min(5);
            regular.relationship = (regular.relationship + 10).min(100);
        } else {
            regular.relationship = regular.relationship.saturating_sub(5);
        }
    }
}
