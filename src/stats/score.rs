use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

const SEPARATOR: &str = " - ";

/// Goal pair decoded from a `"<home> - <away>"` score string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

/// Which side a score favours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Score { home, away }
    }

    pub fn outcome(&self) -> Outcome {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Outcome::Home,
            std::cmp::Ordering::Less => Outcome::Away,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Goals by both sides, widened so the sum cannot overflow.
    pub fn total(&self) -> u64 {
        u64::from(self.home) + u64::from(self.away)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.home, SEPARATOR, self.away)
    }
}

impl FromStr for Score {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_score(s)
    }
}

/// Parse a score string such as `"2 - 1"`.
///
/// Exactly one space must surround the hyphen and both halves must be plain
/// decimal digits, so `"2-1"`, `"2 -1"`, `"+2 - 1"` and `"2 - 1 - 0"` are all
/// rejected.
pub fn parse_score(s: &str) -> Result<Score, ParseError> {
    if !s.contains(SEPARATOR) {
        return Err(ParseError::MissingSeparator(s.to_string()));
    }

    let parts: Vec<&str> = s.split(SEPARATOR).collect();
    if parts.len() != 2 {
        return Err(ParseError::TooManyParts(s.to_string()));
    }

    let home = parse_goals(s, parts[0])?;
    let away = parse_goals(s, parts[1])?;
    Ok(Score { home, away })
}

fn parse_goals(score: &str, part: &str) -> Result<u32, ParseError> {
    let invalid = || ParseError::InvalidGoals {
        score: score.to_string(),
        part: part.to_string(),
    };
    // u32::from_str accepts a leading '+', which is not a valid score digit
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    part.parse().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        assert_eq!(parse_score("2 - 1"), Ok(Score::new(2, 1)));
        assert_eq!(parse_score("10 - 0"), Ok(Score::new(10, 0)));
        assert_eq!(parse_score("0 - 0"), Ok(Score::new(0, 0)));
    }

    #[test]
    fn test_parse_missing_separator() {
        assert_eq!(
            parse_score("2-1"),
            Err(ParseError::MissingSeparator("2-1".into()))
        );
        assert!(matches!(
            parse_score("2 -1"),
            Err(ParseError::MissingSeparator(_))
        ));
        assert!(matches!(parse_score(""), Err(ParseError::MissingSeparator(_))));
    }

    #[test]
    fn test_parse_non_numeric() {
        assert!(matches!(
            parse_score("a - b"),
            Err(ParseError::InvalidGoals { .. })
        ));
        assert!(matches!(
            parse_score("+2 - 1"),
            Err(ParseError::InvalidGoals { .. })
        ));
        assert!(matches!(
            parse_score("-1 - 2"),
            Err(ParseError::InvalidGoals { .. })
        ));
    }

    #[test]
    fn test_parse_extra_whitespace() {
        assert!(matches!(
            parse_score("2  -  1"),
            Err(ParseError::InvalidGoals { .. })
        ));
        assert!(matches!(
            parse_score(" 2 - 1"),
            Err(ParseError::InvalidGoals { .. })
        ));
    }

    #[test]
    fn test_parse_too_many_parts() {
        assert_eq!(
            parse_score("2 - 1 - 0"),
            Err(ParseError::TooManyParts("2 - 1 - 0".into()))
        );
    }

    #[test]
    fn test_parse_overflow() {
        assert!(parse_score("99999999999 - 0").is_err());
    }

    #[test]
    fn test_display_matches_wire_format() {
        let s = Score::new(3, 2);
        assert_eq!(s.to_string(), "3 - 2");
        assert_eq!("3 - 2".parse::<Score>(), Ok(s));
    }

    #[test]
    fn test_total_of_huge_score() {
        let s = parse_score("4294967295 - 1").unwrap();
        assert_eq!(s.total(), 4_294_967_296);
    }

    #[test]
    fn test_outcome() {
        assert_eq!(Score::new(2, 1).outcome(), Outcome::Home);
        assert_eq!(Score::new(1, 1).outcome(), Outcome::Draw);
        assert_eq!(Score::new(0, 3).outcome(), Outcome::Away);
    }
}
