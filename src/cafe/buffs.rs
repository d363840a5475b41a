//! Time-boxed modifier registry
//!
//! Buffs are added explicitly and leave by day-boundary sweep, source-scoped
//! replacement, or id. The registry never merges buffs on its own; callers
//! that want additive stacking sum values through [`BuffManager::total_value`].

use serde::{Deserialize, Serialize};

use crate::core::types::{BuffId, Day};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuffKind {
    Community,
    Regular,
    Milestone,
    Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuffCategory {
    Positive,
    Negative,
    Neutral,
}

/// Everything a caller specifies when adding a buff; id and expiry are
/// assigned by the registry.
#[derive(Debug, Clone)]
pub struct BuffSpec {
    pub kind: BuffKind,
    pub category: BuffCategory,
    pub name: String,
    pub description: String,
    pub value: i32,
    pub start_day: Day,
    /// -1 means permanent
    pub duration: i32,
    pub source: String,
    pub stackable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Buff {
    pub id: BuffId,
    pub kind: BuffKind,
    pub category: BuffCategory,
    pub name: String,
    pub description: String,
    pub value: i32,
    pub start_day: Day,
    pub duration: i32,
    /// -1 if permanent, else start_day + duration
    pub expiry_day: i64,
    pub source: String,
    pub stackable: bool,
}

impl Buff {
    /// Active iff permanent or the expiry day lies strictly in the future
    pub fn is_active(&self, day: Day) -> bool {
        self.expiry_day == -1 || self.expiry_day > day as i64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuffManager {
    active: Vec<Buff>,
    next_id: u32,
}

impl BuffManager {
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add(&mut self, spec: BuffSpec) -> BuffId {
        let id = BuffId(self.next_id);
        self.next_id += 1;
        let expiry_day = if spec.duration == -1 {
            -1
        } else {
            spec.start_day as i64 + spec.duration as i64
        };
        tracing::debug!(buff = %spec.name, source = %spec.source, "buff added");
        self.active.push(Buff {
            id,
            kind: spec.kind,
            category: spec.category,
            name: spec.name,
            description: spec.description,
            value: spec.value,
            start_day: spec.start_day,
            duration: spec.duration,
            expiry_day,
            source: spec.source,
            stackable: spec.stackable,
        });
        id
    }

    /// Partition the registry by expiry, retain active, return the expired
    /// set. Calling twice with the same day returns an empty set the second
    /// time: the sweep is idempotent.
    pub fn check_expiry(&mut self, day: Day) -> Vec<Buff> {
        let (active, expired): (Vec<_>, Vec<_>) =
            self.active.drain(..).partition(|b| b.is_active(day));
        self.active = active;
        if !expired.is_empty() {
            tracing::debug!(count = expired.len(), day, "buffs expired");
        }
        expired
    }

    /// Atomically retire every buff tagged with `source`, used before
    /// installing a refreshed replacement of a recurring buff class
    pub fn remove_by_source(&mut self, source: &str) -> Vec<Buff> {
        let (removed, kept): (Vec<_>, Vec<_>) =
            self.active.drain(..).partition(|b| b.source == source);
        self.active = kept;
        removed
    }

    pub fn remove_by_id(&mut self, id: BuffId) -> Option<Buff> {
        let idx = self.active.iter().position(|b| b.id == id)?;
        Some(self.active.remove(idx))
    }

    pub fn active(&self) -> &[Buff] {
        &self.active
    }

    pub fn by_kind(&self, kind: BuffKind) -> impl Iterator<Item = &Buff> {
        self.active.iter().filter(move |b| b.kind == kind)
    }

    pub fn by_category(&self, category: BuffCategory) -> impl Iterator<Item = &Buff> {
        self.active.iter().filter(move |b| b.category == category)
    }

    pub fn has_source(&self, source: &str) -> bool {
        self.active.iter().any(|b| b.source == source)
    }

    /// Sum of values across a kind - the aggregation hook for additive
    /// stacking
    pub fn total_value(&self, kind: BuffKind) -> i32 {
        self.by_kind(kind).map(|b| b.value).sum()
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.next_id = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, source: &str, start: Day, duration: i32) -> BuffSpec {
        BuffSpec {
            kind: BuffKind::Community,
            category: BuffCategory::Positive,
            name: name.into(),
            description: String::new(),
            value: 5,
            start_day: start,
            duration,
            source: source.into(),
            stackable: false,
        }
    }

    #[test]
    fn test_duration_buff_active_window() {
        let mut buffs = BuffManager::new();
        buffs.add(spec("week boost", "community", 10, 3));
        let buff = &buffs.active()[0];
        assert_eq!(buff.expiry_day, 13);
        assert!(buff.is_active(10));
        assert!(buff.is_active(12));
        assert!(!buff.is_active(13));
    }

    #[test]
    fn test_permanent_buff_never_expires() {
        let mut buffs = BuffManager::new();
        buffs.add(spec("forever", "milestone", 1, -1));
        for day in [1, 100, 10_000] {
            assert!(buffs.check_expiry(day).is_empty());
        }
        assert_eq!(buffs.active().len(), 1);
    }

    #[test]
    fn test_check_expiry_idempotent() {
        let mut buffs = BuffManager::new();
        buffs.add(spec("short", "regular:Mina", 1, 2));
        let expired = buffs.check_expiry(3);
        assert_eq!(expired.len(), 1);
        assert!(buffs.check_expiry(3).is_empty());
    }

    #[test]
    fn test_remove_by_source_scoped() {
        let mut buffs = BuffManager::new();
        buffs.add(spec("a", "community-trending", 1, 7));
        buffs.add(spec("b", "community-trending", 1, 7));
        buffs.add(spec("c", "regular:Jun", 1, 7));
        let removed = buffs.remove_by_source("community-trending");
        assert_eq!(removed.len(), 2);
        assert_eq!(buffs.active().len(), 1);
        assert!(buffs.has_source("regular:Jun"));
    }

    #[test]
    fn test_total_value_sums_kind() {
        let mut buffs = BuffManager::new();
        buffs.add(spec("a", "x", 1, 7));
        buffs.add(spec("b", "y", 1, 7));
        assert_eq!(buffs.total_value(BuffKind::Community), 10);
        assert_eq!(buffs.total_value(BuffKind::Regular), 0);
    }

    #[test]
    fn test_remove_by_id() {
        let mut buffs = BuffManager::new();
        let id = buffs.add(spec("a", "x", 1, 7));
        assert!(buffs.remove_by_id(id).is_some());
        assert!(buffs.remove_by_id(id).is_none());
    }
}
