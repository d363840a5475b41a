//! Weekly community board
//!
//! Posts are keyed by week; the trending set is rebuilt from scratch on
//! every week advance (never accumulated). Weeks past the end of the data
//! cycle back to the start.

use ahash::AHashSet;

use crate::catalog::CommunityRecord;
use crate::core::types::Week;
use crate::providers::CommunityProvider;

#[derive(Debug, Clone, Default)]
pub struct CommunityBoard {
    records: Vec<CommunityRecord>,
    max_week: Week,
    current_week: Week,
    current_posts: Vec<CommunityRecord>,
    trending: AHashSet<String>,
}

impl CommunityBoard {
    pub fn new(records: Vec<CommunityRecord>) -> Self {
        let max_week = records.iter().map(|r| r.week).max().unwrap_or(0);
        Self {
            records,
            max_week,
            current_week: 0,
            current_posts: Vec::new(),
            trending: AHashSet::new(),
        }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn current_week(&self) -> Week {
        self.current_week
    }

    fn posts_for(&self, week: Week) -> Vec<CommunityRecord> {
        let direct: Vec<_> = self
            .records
            .iter()
            .filter(|r| r.week == week)
            .cloned()
            .collect();
        if !direct.is_empty() || self.max_week == 0 {
            return direct;
        }
        // Cycle weeks beyond the data range
        let cycled = (week - 1) % self.max_week + 1;
        self.records
            .iter()
            .filter(|r| r.week == cycled)
            .cloned()
            .collect()
    }
}

impl CommunityProvider for CommunityBoard {
    fn is_loaded(&self) -> bool {
        !self.records.is_empty()
    }

    fn recompute_trending(&mut self, week: Week) -> Vec<String> {
        self.current_week = week;
        self.current_posts = self.posts_for(week);
        self.trending.clear();
        for post in &self.current_posts {
            for name in &post.trending_names {
                self.trending.insert(name.clone());
            }
        }
        tracing::debug!(week, trending = ?self.trending, "trending set recomputed");
        self.trending()
    }

    fn is_trending(&self, name: &str) -> bool {
        self.trending.contains(name)
    }

    fn trending(&self) -> Vec<String> {
        let mut names: Vec<String> = self.trending.iter().cloned().collect();
        names.sort();
        names
    }

    fn current_posts(&self) -> &[CommunityRecord] {
        &self.current_posts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Importance;

    fn record(week: Week, names: &[&str]) -> CommunityRecord {
        CommunityRecord {
            week,
            trending_names: names.iter().map(|n| n.to_string()).collect(),
            title: format!("week {week}"),
            content: String::new(),
            importance: Importance::Medium,
        }
    }

    #[test]
    fn test_recompute_replaces_not_accumulates() {
        let mut board = CommunityBoard::new(vec![
            record(1, &["Rolling Hills"]),
            record(2, &["Harbor Masters", "Clockwork Garden"]),
        ]);

        board.recompute_trending(1);
        assert!(board.is_trending("Rolling Hills"));

        board.recompute_trending(2);
        assert!(!board.is_trending("Rolling Hills"));
        assert!(board.is_trending("Harbor Masters"));
        assert_eq!(board.trending().len(), 2);
    }

    #[test]
    fn test_weeks_cycle_past_data_end() {
        let mut board = CommunityBoard::new(vec![
            record(1, &["A"]),
            record(2, &["B"]),
        ]);
        board.recompute_trending(3);
        assert!(board.is_trending("A"));
        board.recompute_trending(4);
        assert!(board.is_trending("B"));
    }

    #[test]
    fn test_empty_board() {
        let mut board = CommunityBoard::new(Vec::new());
        assert!(board.recompute_trending(1).is_empty());
        assert!(!board.is_trending("anything"));
    }
}
