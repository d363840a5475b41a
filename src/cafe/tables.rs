//! Service tables - occupancy state machine
//!
//! Each table is Empty or Occupied; an occupied table carries the game on it,
//! the party's satisfaction (1-5) and a mood derived purely from that
//! satisfaction. Mood is never written directly: every satisfaction write
//! recomputes it.

use serde::{Deserialize, Serialize};

use crate::core::error::{CafeError, Result};
use crate::core::types::TableId;

/// Mood shown above an occupied table, a pure function of satisfaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    /// Unoccupied
    None,
    /// Satisfaction 4-5
    Happy,
    /// Satisfaction 2-3
    Confused,
    /// Satisfaction 0-1
    Unhappy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub occupied: bool,
    pub game: Option<String>,
    pub difficulty: u8,
    satisfaction: u8,
    status: TableStatus,
    pub customer_level: u8,
    /// Transition attempts survived without departing; raises the departure
    /// odds and resets when a recommendation lands on the table
    pub turns_at_table: u32,
}

impl Table {
    fn empty(id: TableId) -> Self {
        Self {
            id,
            occupied: false,
            game: None,
            difficulty: 0,
            satisfaction: 0,
            status: TableStatus::None,
            customer_level: 0,
            turns_at_table: 0,
        }
    }

    pub fn satisfaction(&self) -> u8 {
        self.satisfaction
    }

    pub fn status(&self) -> TableStatus {
        self.status
    }

    /// Write satisfaction and recompute the derived status
    pub fn set_satisfaction(&mut self, satisfaction: u8) {
        self.satisfaction = satisfaction.min(5);
        self.status = if !self.occupied {
            TableStatus::None
        } else if self.satisfaction >= 4 {
            TableStatus::Happy
        } else if self.satisfaction >= 2 {
            TableStatus::Confused
        } else {
            TableStatus::Unhappy
        };
    }

    /// Seat a party with the given game and starting satisfaction
    pub fn seat(&mut self, game: &str, difficulty: u8, satisfaction: u8, customer_level: u8) {
        self.occupied = true;
        self.game = Some(game.to_string());
        self.difficulty = difficulty;
        self.customer_level = customer_level;
        self.turns_at_table = 0;
        self.set_satisfaction(satisfaction);
    }

    /// Reset to the unoccupied baseline
    pub fn clear(&mut self) {
        *self = Self::empty(self.id);
    }
}

/// The fixed-then-growable collection of tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRoster {
    tables: Vec<Table>,
    max_tables: usize,
}

impl TableRoster {
    pub fn new(initial: usize, max_tables: usize) -> Self {
        let tables = (1..=initial as u32).map(|i| Table::empty(TableId(i))).collect();
        Self { tables, max_tables }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn get(&self, id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TableId) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }

    pub fn at_index(&self, index: usize) -> &Table {
        &self.tables[index]
    }

    pub fn at_index_mut(&mut self, index: usize) -> &mut Table {
        &mut self.tables[index]
    }

    /// Append one table, up to the hard cap
    pub fn add_table(&mut self) -> Result<TableId> {
        if self.tables.len() >= self.max_tables {
            return Err(CafeError::CapacityExceeded {
                cap: self.max_tables,
            });
        }
        let id = TableId(self.tables.len() as u32 + 1);
        self.tables.push(Table::empty(id));
        Ok(id)
    }

    pub fn occupied_count(&self) -> usize {
        self.tables.iter().filter(|t| t.occupied).count()
    }

    pub fn empty_count(&self) -> usize {
        self.tables.len() - self.occupied_count()
    }

    /// Occupied tables at the top satisfaction level
    pub fn perfect_count(&self) -> usize {
        self.tables
            .iter()
            .filter(|t| t.occupied && t.satisfaction() == 5)
            .count()
    }

    /// Occupied tables at satisfaction 2 or below
    pub fn unhappy_count(&self) -> usize {
        self.tables
            .iter()
            .filter(|t| t.occupied && t.satisfaction() <= 2)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_satisfaction() {
        let mut roster = TableRoster::new(4, 8);
        let table = roster.get_mut(TableId(1)).unwrap();
        table.seat("Rolling Hills", 1, 5, 2);
        assert_eq!(table.status(), TableStatus::Happy);
        table.set_satisfaction(3);
        assert_eq!(table.status(), TableStatus::Confused);
        table.set_satisfaction(1);
        assert_eq!(table.status(), TableStatus::Unhappy);
        table.clear();
        assert_eq!(table.status(), TableStatus::None);
        assert!(!table.occupied);
    }

    #[test]
    fn test_add_table_respects_cap() {
        let mut roster = TableRoster::new(4, 8);
        for _ in 0..4 {
            roster.add_table().unwrap();
        }
        assert_eq!(roster.len(), 8);
        let err = roster.add_table().unwrap_err();
        assert!(matches!(err, CafeError::CapacityExceeded { cap: 8 }));
    }

    #[test]
    fn test_counts() {
        let mut roster = TableRoster::new(4, 8);
        roster.get_mut(TableId(1)).unwrap().seat("A", 2, 5, 2);
        roster.get_mut(TableId(2)).unwrap().seat("B", 2, 2, 2);
        assert_eq!(roster.occupied_count(), 2);
        assert_eq!(roster.empty_count(), 2);
        assert_eq!(roster.perfect_count(), 1);
        assert_eq!(roster.unhappy_count(), 1);
    }
}
