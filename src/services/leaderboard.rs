//! Standings across all users, built from the tiers of bets on played matches.

use serde::Serialize;
use std::collections::HashMap;

use crate::db::{Bet, Store, StoreError, User};
use crate::display::to_fixed1;
use crate::entities::matches;
use crate::scoring::{Tier, classify};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    /// Competition ranking: equal points and exact hits share a rank.
    pub rank: usize,
    pub user_id: i32,
    pub name: String,
    pub points: u32,
    pub exact: u32,
    pub correct_difference: u32,
    pub correct_outcome: u32,
    pub misses: u32,
    pub scored_bets: u32,
    /// Points per scored bet, one decimal.
    pub average: f64,
}

impl Standing {
    fn empty(user: &User) -> Self {
        Self {
            rank: 0,
            user_id: user.id,
            name: user.name.clone(),
            points: 0,
            exact: 0,
            correct_difference: 0,
            correct_outcome: 0,
            misses: 0,
            scored_bets: 0,
            average: 0.0,
        }
    }

    fn record(&mut self, tier: Tier) {
        self.points += tier.points();
        self.scored_bets += 1;
        match tier {
            Tier::Exact => self.exact += 1,
            Tier::CorrectDifference => self.correct_difference += 1,
            Tier::CorrectOutcome => self.correct_outcome += 1,
            Tier::Miss => self.misses += 1,
        }
    }
}

/// Ranks every user by points, then exact hits, then name.
#[must_use]
pub fn compute_standings(users: &[User], scored: &[(Bet, matches::Model)]) -> Vec<Standing> {
    let mut by_user: HashMap<i32, Standing> =
        users.iter().map(|u| (u.id, Standing::empty(u))).collect();

    for (bet, game) in scored {
        if let Some(standing) = by_user.get_mut(&bet.user_id) {
            standing.record(classify(Some(bet.score()), game.result()));
        }
    }

    let mut standings: Vec<Standing> = by_user
        .into_values()
        .map(|mut s| {
            if s.scored_bets > 0 {
                s.average = to_fixed1(f64::from(s.points) / f64::from(s.scored_bets));
            }
            s
        })
        .collect();

    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.exact.cmp(&a.exact))
            .then_with(|| a.name.cmp(&b.name))
            .then(a.user_id.cmp(&b.user_id))
    });

    let mut previous: Option<(u32, u32, usize)> = None;
    for (index, standing) in standings.iter_mut().enumerate() {
        let rank = match previous {
            Some((points, exact, rank)) if points == standing.points && exact == standing.exact => {
                rank
            }
            _ => index + 1,
        };
        standing.rank = rank;
        previous = Some((standing.points, standing.exact, rank));
    }

    standings
}

#[async_trait::async_trait]
pub trait LeaderboardService: Send + Sync {
    async fn standings(&self) -> Result<Vec<Standing>, StoreError>;
}

pub struct SeaOrmLeaderboardService {
    store: Store,
}

impl SeaOrmLeaderboardService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl LeaderboardService for SeaOrmLeaderboardService {
    async fn standings(&self) -> Result<Vec<Standing>, StoreError> {
        let users = self.store.list_users().await?;
        let scored = self.store.list_bets_on_played_matches().await?;
        Ok(compute_standings(&users, &scored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: i32, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: None,
            email_confirmed: false,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn played(id: i32, home: i32, away: i32) -> matches::Model {
        matches::Model {
            id,
            kickoff: Utc::now(),
            goals_home: Some(home),
            goals_away: Some(away),
            home_team_id: 1,
            away_team_id: 2,
            match_type_id: 1,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn bet(user_id: i32, match_id: i32, home: i32, away: i32) -> Bet {
        Bet {
            id: user_id * 100 + match_id,
            user_id,
            match_id,
            goals_home: home,
            goals_away: away,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_points_and_tier_counts() {
        let users = vec![user(1, "Alice"), user(2, "Bob")];
        let m1 = played(1, 2, 1);
        let m2 = played(2, 0, 0);
        let scored = vec![
            (bet(1, 1, 2, 1), m1.clone()), // exact
            (bet(1, 2, 1, 1), m2.clone()), // difference
            (bet(2, 1, 3, 0), m1),         // outcome
            (bet(2, 2, 1, 0), m2),         // miss
        ];

        let standings = compute_standings(&users, &scored);
        assert_eq!(standings[0].name, "Alice");
        assert_eq!(standings[0].points, 5);
        assert_eq!(standings[0].exact, 1);
        assert_eq!(standings[0].correct_difference, 1);
        assert!((standings[0].average - 2.5).abs() < f64::EPSILON);

        assert_eq!(standings[1].name, "Bob");
        assert_eq!(standings[1].points, 1);
        assert_eq!(standings[1].correct_outcome, 1);
        assert_eq!(standings[1].misses, 1);
        assert_eq!(standings[1].rank, 2);
    }

    #[test]
    fn test_users_without_bets_are_listed() {
        let users = vec![user(1, "Zoe"), user(2, "Adam")];
        let standings = compute_standings(&users, &[]);

        assert_eq!(standings.len(), 2);
        assert!(standings.iter().all(|s| s.points == 0 && s.rank == 1));
        assert_eq!(standings[0].name, "Adam");
        assert!(standings[0].average.abs() < f64::EPSILON);
    }

    #[test]
    fn test_exact_hits_break_ties() {
        let users = vec![user(1, "Alice"), user(2, "Bob"), user(3, "Carl")];
        let m1 = played(1, 1, 0);
        let m2 = played(2, 2, 2);
        let m3 = played(3, 0, 3);
        let scored = vec![
            // Alice: 2 + 1 = 3 points, no exact hit
            (bet(1, 1, 2, 1), m1.clone()),
            (bet(1, 3, 0, 1), m3.clone()),
            // Bob: 3 points from one exact hit
            (bet(2, 2, 2, 2), m2),
            // Carl: 1 + 2 = 3 points, no exact hit
            (bet(3, 1, 3, 0), m1),
            (bet(3, 3, 1, 4), m3),
        ];

        let standings = compute_standings(&users, &scored);
        let names: Vec<&str> = standings.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice", "Carl"]);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[1].rank, 2);
        assert_eq!(standings[2].rank, 2);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        let users = vec![user(1, "Alice")];
        let scored = vec![
            (bet(1, 1, 1, 0), played(1, 1, 0)),
            (bet(1, 2, 0, 0), played(2, 1, 0)),
            (bet(1, 3, 0, 0), played(3, 1, 0)),
        ];

        let standings = compute_standings(&users, &scored);
        assert_eq!(standings[0].points, 3);
        assert!((standings[0].average - 1.0).abs() < f64::EPSILON);
    }
}
