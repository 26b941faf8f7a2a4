//! Field rules checked before rows are written.

use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use super::error::{StoreError, StoreResult};

pub const USER_NAME_LEN: RangeInclusive<usize> = 3..=40;
pub const TEAM_NAME_LEN: RangeInclusive<usize> = 1..=100;
pub const TEAM_CODE_LEN: RangeInclusive<usize> = 1..=10;
pub const MATCH_TYPE_CODE_LEN: RangeInclusive<usize> = 1..=10;
pub const MATCH_TYPE_NAME_LEN: RangeInclusive<usize> = 1..=100;
pub const BET_GOALS: RangeInclusive<i32> = 0..=20;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
            .expect("Invalid regex")
    })
}

/// Checks a string's length in characters, not bytes.
pub fn validate_len(field: &str, value: &str, range: &RangeInclusive<usize>) -> StoreResult<()> {
    let len = value.chars().count();
    if range.contains(&len) {
        Ok(())
    } else {
        Err(StoreError::validation(format!(
            "{field} must be between {} and {} characters",
            range.start(),
            range.end()
        )))
    }
}

pub fn validate_email(email: &str) -> StoreResult<()> {
    if email.len() <= 254 && email_regex().is_match(email) {
        Ok(())
    } else {
        Err(StoreError::validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

pub fn validate_bet_goals(home: i32, away: i32) -> StoreResult<()> {
    for (side, goals) in [("home", home), ("away", away)] {
        if !BET_GOALS.contains(&goals) {
            return Err(StoreError::validation(format!(
                "Predicted {side} goals must be between {} and {}",
                BET_GOALS.start(),
                BET_GOALS.end()
            )));
        }
    }
    Ok(())
}

pub fn validate_result_goals(home: i32, away: i32) -> StoreResult<()> {
    if home < 0 || away < 0 {
        return Err(StoreError::validation("Goals cannot be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_len_counts_chars() {
        assert!(validate_len("Name", "Bob", &USER_NAME_LEN).is_ok());
        assert!(validate_len("Name", "Jo", &USER_NAME_LEN).is_err());
        assert!(validate_len("Name", &"x".repeat(40), &USER_NAME_LEN).is_ok());
        assert!(validate_len("Name", &"x".repeat(41), &USER_NAME_LEN).is_err());
        // three characters, six bytes
        assert!(validate_len("Name", "äöü", &USER_NAME_LEN).is_ok());
        assert!(validate_len("Code", "", &TEAM_CODE_LEN).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("fan@example.com").is_ok());
        assert!(validate_email("first.last+pool@sub.example.org").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("two@@example.com").is_err());
    }

    #[test]
    fn test_validate_bet_goals() {
        assert!(validate_bet_goals(0, 0).is_ok());
        assert!(validate_bet_goals(20, 20).is_ok());
        assert!(validate_bet_goals(21, 0).is_err());
        assert!(validate_bet_goals(0, -1).is_err());
    }

    #[test]
    fn test_validate_result_goals() {
        assert!(validate_result_goals(0, 7).is_ok());
        assert!(validate_result_goals(25, 0).is_ok());
        assert!(validate_result_goals(-1, 0).is_err());
    }
}
