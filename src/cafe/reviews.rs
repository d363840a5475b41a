//! Bounded log of customer reviews
//!
//! Reviews are a side effect of departures, recommendations and promotions.
//! Only the most recent entries are retained; the presentation layer reads
//! them most-recent-first.

use serde::{Deserialize, Serialize};

use crate::core::types::Day;

/// Cap on retained reviews
const MAX_REVIEWS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewSentiment {
    Positive,
    Neutral,
    Negative,
}

/// What was happening in the cafe when the review was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewContext {
    General,
    FullHouse,
    UnhappyTables,
    AfterEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: u32,
    pub day: Day,
    /// Public rating at write time, one decimal
    pub rating: f64,
    pub sentiment: ReviewSentiment,
    pub context: ReviewContext,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewLog {
    reviews: Vec<Review>,
    next_id: u32,
}

impl ReviewLog {
    pub fn new() -> Self {
        Self {
            reviews: Vec::new(),
            next_id: 1,
        }
    }

    /// Record one review. Sentiment follows the rating band unless the
    /// context override applies (context reviews read as their situation).
    pub fn record(&mut self, day: Day, satisfaction: f64, context: ReviewContext) -> &Review {
        let rating = satisfaction / 10.0;
        let sentiment = match context {
            ReviewContext::FullHouse => ReviewSentiment::Neutral,
            ReviewContext::UnhappyTables => ReviewSentiment::Negative,
            ReviewContext::AfterEvent => ReviewSentiment::Positive,
            ReviewContext::General => {
                if rating >= 8.0 {
                    ReviewSentiment::Positive
                } else if rating >= 5.0 {
                    ReviewSentiment::Neutral
                } else {
                    ReviewSentiment::Negative
                }
            }
        };
        let review = Review {
            id: self.next_id,
            day,
            rating: (rating * 10.0).round() / 10.0,
            sentiment,
            context,
        };
        self.next_id += 1;
        self.reviews.push(review);
        if self.reviews.len() > MAX_REVIEWS {
            self.reviews.remove(0);
        }
        self.reviews.last().unwrap()
    }

    /// Last `n` reviews, most recent first
    pub fn recent(&self, n: usize) -> Vec<&Review> {
        self.reviews.iter().rev().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn average_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.reviews.iter().map(|r| r.rating).sum();
        (sum / self.reviews.len() as f64 * 10.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_bands() {
        let mut log = ReviewLog::new();
        assert_eq!(
            log.record(1, 85.0, ReviewContext::General).sentiment,
            ReviewSentiment::Positive
        );
        assert_eq!(
            log.record(1, 55.0, ReviewContext::General).sentiment,
            ReviewSentiment::Neutral
        );
        assert_eq!(
            log.record(1, 30.0, ReviewContext::General).sentiment,
            ReviewSentiment::Negative
        );
    }

    #[test]
    fn test_context_overrides_sentiment() {
        let mut log = ReviewLog::new();
        assert_eq!(
            log.record(1, 90.0, ReviewContext::UnhappyTables).sentiment,
            ReviewSentiment::Negative
        );
    }

    #[test]
    fn test_bounded_most_recent_first() {
        let mut log = ReviewLog::new();
        for day in 1..=60 {
            log.record(day, 50.0, ReviewContext::General);
        }
        assert_eq!(log.len(), 50);
        let recent = log.recent(3);
        assert_eq!(recent[0].day, 60);
        assert_eq!(recent[2].day, 58);
        // Oldest entries were dropped
        assert!(log.recent(50).iter().all(|r| r.day > 10));
    }
}
