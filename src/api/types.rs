use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::db::{Bet, MatchType, Team};
use crate::display::{calendar, calendar_short};
use crate::scoring::{Score, Tier};
use crate::services::MatchCard;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct TeamDto {
    pub id: i32,
    pub name: String,
    pub code: String,
}

impl From<Team> for TeamDto {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            code: team.code,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct MatchTypeDto {
    pub id: i32,
    pub code: String,
    pub name: String,
}

impl From<MatchType> for MatchTypeDto {
    fn from(match_type: MatchType) -> Self {
        Self {
            id: match_type.id,
            code: match_type.code,
            name: match_type.name,
        }
    }
}

/// Goals in the wire format shared by requests and responses.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct GoalsDto {
    pub goals_home: i32,
    pub goals_away: i32,
}

impl From<Score> for GoalsDto {
    fn from(score: Score) -> Self {
        Self {
            goals_home: score.home,
            goals_away: score.away,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchDto {
    pub id: i32,
    pub kickoff: String,
    /// e.g. `Saturday, June 14th, 21:00`
    pub kickoff_display: String,
    /// e.g. `Jun 14, 21:00`
    pub kickoff_short: String,
    pub expired: bool,
    pub home_team: TeamDto,
    pub away_team: TeamDto,
    pub match_type: MatchTypeDto,
    pub result: Option<GoalsDto>,
    pub bet: Option<GoalsDto>,
    pub tier: Tier,
    pub score_class: &'static str,
    pub points: u32,
}

impl MatchDto {
    #[must_use]
    pub fn from_card(card: MatchCard, offset: FixedOffset) -> Self {
        let fixture = card.fixture;
        Self {
            id: fixture.id,
            kickoff: fixture.kickoff.to_rfc3339(),
            kickoff_display: calendar(fixture.kickoff, offset),
            kickoff_short: calendar_short(fixture.kickoff, offset),
            expired: card.expired,
            home_team: fixture.home_team.into(),
            away_team: fixture.away_team.into(),
            match_type: fixture.match_type.into(),
            result: fixture.result.map(GoalsDto::from),
            bet: card.bet.map(GoalsDto::from),
            tier: card.tier,
            score_class: card.tier.css_class(),
            points: card.tier.points(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BetDto {
    pub id: i32,
    pub match_id: i32,
    pub goals_home: i32,
    pub goals_away: i32,
    pub updated_at: String,
}

impl From<Bet> for BetDto {
    fn from(bet: Bet) -> Self {
        Self {
            id: bet.id,
            match_id: bet.match_id,
            goals_home: bet.goals_home,
            goals_away: bet.goals_away,
            updated_at: bet.updated_at,
        }
    }
}
