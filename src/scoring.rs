//! Prediction scoring.
//!
//! A bet is compared against the final score of its match and placed into one
//! of four ordered tiers. Missing data on either side (no bet yet, match not
//! played) is never an error; it classifies as [`Tier::Miss`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A home/away goal pair, either predicted or actual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub home: i32,
    pub away: i32,
}

impl Score {
    #[must_use]
    pub const fn new(home: i32, away: i32) -> Self {
        Self { home, away }
    }

    /// Builds a score from nullable columns. Both sides must be present.
    #[must_use]
    pub const fn from_parts(home: Option<i32>, away: Option<i32>) -> Option<Self> {
        match (home, away) {
            (Some(home), Some(away)) => Some(Self { home, away }),
            _ => None,
        }
    }

    /// Home goals minus away goals, widened so any pair of `i32` fits.
    #[must_use]
    pub fn difference(&self) -> i64 {
        i64::from(self.home) - i64::from(self.away)
    }

    /// Home win, draw or away win.
    #[must_use]
    pub fn outcome(&self) -> Ordering {
        self.home.cmp(&self.away)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.home, self.away)
    }
}

/// Accuracy of a prediction, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Miss,
    CorrectOutcome,
    CorrectDifference,
    Exact,
}

impl Tier {
    /// Every tier, best first.
    pub const ALL: [Self; 4] = [
        Self::Exact,
        Self::CorrectDifference,
        Self::CorrectOutcome,
        Self::Miss,
    ];

    /// Points awarded on the leaderboard.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Exact => 3,
            Self::CorrectDifference => 2,
            Self::CorrectOutcome => 1,
            Self::Miss => 0,
        }
    }

    /// Class name used by the frontend to style a match row.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Exact => "score-3",
            Self::CorrectDifference => "score-2",
            Self::CorrectOutcome => "score-1",
            Self::Miss => "score-0",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// Classifies a bet against the actual result. The first matching tier wins.
#[must_use]
pub fn classify(bet: Option<Score>, result: Option<Score>) -> Tier {
    let (Some(bet), Some(result)) = (bet, result) else {
        return Tier::Miss;
    };

    if bet == result {
        Tier::Exact
    } else if bet.difference() == result.difference() {
        Tier::CorrectDifference
    } else if bet.outcome() == result.outcome() {
        Tier::CorrectOutcome
    } else {
        Tier::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(bet: (i32, i32), result: (i32, i32)) -> Tier {
        classify(
            Some(Score::new(bet.0, bet.1)),
            Some(Score::new(result.0, result.1)),
        )
    }

    #[test]
    fn test_exact_score() {
        assert_eq!(tier((2, 1), (2, 1)), Tier::Exact);
        assert_eq!(tier((0, 0), (0, 0)), Tier::Exact);
    }

    #[test]
    fn test_correct_difference() {
        assert_eq!(tier((3, 2), (2, 1)), Tier::CorrectDifference);
        assert_eq!(tier((0, 2), (1, 3)), Tier::CorrectDifference);
    }

    #[test]
    fn test_draw_against_other_draw_is_difference() {
        assert_eq!(tier((1, 1), (2, 2)), Tier::CorrectDifference);
        assert_eq!(tier((0, 0), (3, 3)), Tier::CorrectDifference);
    }

    #[test]
    fn test_correct_outcome_only() {
        assert_eq!(tier((1, 0), (3, 1)), Tier::CorrectOutcome);
        assert_eq!(tier((0, 1), (0, 4)), Tier::CorrectOutcome);
    }

    #[test]
    fn test_wrong_outcome() {
        assert_eq!(tier((1, 0), (0, 1)), Tier::Miss);
        assert_eq!(tier((1, 1), (2, 0)), Tier::Miss);
        assert_eq!(tier((2, 0), (1, 1)), Tier::Miss);
    }

    #[test]
    fn test_missing_data_is_miss() {
        let bet = Some(Score::new(2, 1));
        assert_eq!(classify(bet, None), Tier::Miss);
        assert_eq!(classify(None, Some(Score::new(2, 1))), Tier::Miss);
        assert_eq!(classify(None, None), Tier::Miss);
    }

    #[test]
    fn test_half_recorded_result_is_absent() {
        assert_eq!(Score::from_parts(Some(1), None), None);
        assert_eq!(Score::from_parts(None, Some(1)), None);
        assert_eq!(
            Score::from_parts(Some(1), Some(0)),
            Some(Score::new(1, 0))
        );
    }

    #[test]
    fn test_extreme_goal_counts_do_not_overflow() {
        assert_eq!(Score::new(0, i32::MIN).difference(), -i64::from(i32::MIN));
        assert_eq!(tier((0, i32::MIN), (1, 0)), Tier::CorrectOutcome);
        assert_eq!(tier((i32::MAX, i32::MIN), (i32::MIN, i32::MAX)), Tier::Miss);
        assert_eq!(tier((i32::MAX, -1), (0, i32::MIN)), Tier::CorrectDifference);
    }

    #[test]
    fn test_tier_ordering_and_points() {
        assert!(Tier::Exact > Tier::CorrectDifference);
        assert!(Tier::CorrectDifference > Tier::CorrectOutcome);
        assert!(Tier::CorrectOutcome > Tier::Miss);

        let points: Vec<u32> = Tier::ALL.iter().map(|t| t.points()).collect();
        assert_eq!(points, vec![3, 2, 1, 0]);
        assert_eq!(Tier::Exact.to_string(), "score-3");
        assert_eq!(Tier::Miss.css_class(), "score-0");
    }
}
