//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulation day counter (starts at 1)
pub type Day = u32;

/// Week index derived from the day: `day / 7 + 1`
pub type Week = u32;

/// Currency amount in won
pub type Money = i64;

/// Identifier for a service table (1-based, stable for the session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(pub u32);

/// Identifier for a registered buff (auto-incrementing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuffId(pub u32);

/// Identifier for an opportunity handed out by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpportunityId(pub u32);

/// Week index for a given day
pub fn week_of(day: Day) -> Week {
    day / 7 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_of() {
        assert_eq!(week_of(1), 1);
        assert_eq!(week_of(6), 1);
        assert_eq!(week_of(7), 2);
        assert_eq!(week_of(14), 3);
    }
}
