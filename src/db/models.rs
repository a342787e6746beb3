use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidMatchError;
use crate::stats::filter::FilterSpec;
use crate::stats::score::{parse_score, Outcome, Score};

/// A club as served by the data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    /// Unique within a dataset
    pub name: String,
    pub logo_url: String,
}

/// One finished fixture with its derived flags.
///
/// Only constructible through [`Match::new`] / [`Match::from_scores`], which
/// enforce the score invariants and compute `btts` and `comeback` once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    id: i64,
    home: String,
    away: String,
    home_team: Team,
    away_team: Team,
    /// Half-time score, "H - A"
    ht: String,
    /// Full-time score, "H - A"
    ft: String,
    /// Both teams scored
    btts: bool,
    comeback: bool,
    home_goals: u32,
    away_goals: u32,
    #[serde(skip)]
    ht_score: Score,
}

impl Match {
    /// Build a match from raw half-time and full-time score strings.
    pub fn new(
        id: i64,
        home_team: Team,
        away_team: Team,
        ht: &str,
        ft: &str,
    ) -> Result<Self, InvalidMatchError> {
        let ht = parse_score(ht)?;
        let ft = parse_score(ft)?;
        Self::from_scores(id, home_team, away_team, ht, ft)
    }

    pub fn from_scores(
        id: i64,
        home_team: Team,
        away_team: Team,
        ht: Score,
        ft: Score,
    ) -> Result<Self, InvalidMatchError> {
        if home_team.name == away_team.name {
            return Err(InvalidMatchError::SameTeam(home_team.name));
        }
        if ht.home > ft.home || ht.away > ft.away {
            return Err(InvalidMatchError::HalfTimeExceedsFullTime {
                ht: ht.to_string(),
                ft: ft.to_string(),
            });
        }

        let btts = ft.home > 0 && ft.away > 0;
        let ht_winner = ht.outcome();
        let ft_winner = ft.outcome();
        let comeback =
            ht_winner != Outcome::Draw && ft_winner != Outcome::Draw && ht_winner != ft_winner;

        Ok(Match {
            id,
            home: home_team.name.clone(),
            away: away_team.name.clone(),
            home_team,
            away_team,
            ht: ht.to_string(),
            ft: ft.to_string(),
            btts,
            comeback,
            home_goals: ft.home,
            away_goals: ft.away,
            ht_score: ht,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn away(&self) -> &str {
        &self.away
    }

    pub fn ht(&self) -> &str {
        &self.ht
    }

    pub fn ft(&self) -> &str {
        &self.ft
    }

    pub fn btts(&self) -> bool {
        self.btts
    }

    pub fn comeback(&self) -> bool {
        self.comeback
    }

    pub fn home_goals(&self) -> u32 {
        self.home_goals
    }

    pub fn away_goals(&self) -> u32 {
        self.away_goals
    }

    pub fn ht_score(&self) -> Score {
        self.ht_score
    }

    pub fn ft_score(&self) -> Score {
        Score::new(self.home_goals, self.away_goals)
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home == team || self.away == team
    }
}

/// Match record as it arrives from a dataset file, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMatch {
    pub id: i64,
    pub home: String,
    pub away: String,
    pub ht: String,
    pub ft: String,
}

impl RawMatch {
    /// Resolve team names against `teams` and run the match constructor.
    pub fn resolve(&self, teams: &[Team]) -> Result<Match, InvalidMatchError> {
        let lookup = |name: &str| {
            teams
                .iter()
                .find(|t| t.name == name)
                .cloned()
                .ok_or_else(|| InvalidMatchError::UnknownTeam(name.to_string()))
        };
        let home_team = lookup(&self.home)?;
        let away_team = lookup(&self.away)?;
        Match::new(self.id, home_team, away_team, &self.ht, &self.ft)
    }
}

/// A named filter preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFilter {
    pub id: String,
    pub name: String,
    pub filters: FilterSpec,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Backing database connection settings entered on the admin screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminConfig {
    pub url: String,
    pub key: String,
    pub is_connected: bool,
}

#[cfg(test)]
pub(crate) fn team(id: i64, name: &str) -> Team {
    Team {
        id,
        name: name.to_string(),
        logo_url: format!("https://example.com/{}.svg", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    fn fixture(ht: &str, ft: &str) -> Result<Match, InvalidMatchError> {
        Match::new(1, team(1, "Ferencváros"), team(2, "Újpest FC"), ht, ft)
    }

    #[test]
    fn test_comeback_away_lead_home_win() {
        let m = fixture("0 - 1", "2 - 1").unwrap();
        assert!(m.comeback());
        assert!(m.btts());
        assert_eq!(m.home_goals(), 2);
        assert_eq!(m.away_goals(), 1);
    }

    #[test]
    fn test_goalless_never_btts_or_comeback() {
        let m = fixture("0 - 0", "0 - 0").unwrap();
        assert!(!m.btts());
        assert!(!m.comeback());
    }

    #[test]
    fn test_no_comeback_when_half_time_drawn() {
        let m = fixture("1 - 1", "3 - 1").unwrap();
        assert!(!m.comeback());
    }

    #[test]
    fn test_no_comeback_when_full_time_drawn() {
        let m = fixture("1 - 0", "2 - 2").unwrap();
        assert!(!m.comeback());
        assert!(m.btts());
    }

    #[test]
    fn test_no_comeback_when_leader_holds() {
        let m = fixture("2 - 0", "3 - 1").unwrap();
        assert!(!m.comeback());
    }

    #[test]
    fn test_names_follow_teams() {
        let m = fixture("0 - 0", "1 - 0").unwrap();
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["homeTeam"]["name"], m.home());
        assert_eq!(v["awayTeam"]["name"], m.away());
        assert_eq!(m.ft(), "1 - 0");
        assert_eq!(m.ht_score(), Score::new(0, 0));
    }

    #[test]
    fn test_rejects_half_time_above_full_time() {
        let err = fixture("2 - 0", "1 - 0").unwrap_err();
        assert!(matches!(err, InvalidMatchError::HalfTimeExceedsFullTime { .. }));
    }

    #[test]
    fn test_rejects_same_team() {
        let err = Match::new(1, team(1, "Debrecen"), team(1, "Debrecen"), "0 - 0", "0 - 0")
            .unwrap_err();
        assert_eq!(err, InvalidMatchError::SameTeam("Debrecen".into()));
    }

    #[test]
    fn test_rejects_malformed_score() {
        let err = fixture("0-0", "1 - 0").unwrap_err();
        assert_eq!(
            err,
            InvalidMatchError::Score(ParseError::MissingSeparator("0-0".into()))
        );
    }

    #[test]
    fn test_serializes_wire_names() {
        let m = fixture("0 - 1", "2 - 1").unwrap();
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["homeGoals"], 2);
        assert_eq!(v["ft"], "2 - 1");
        assert_eq!(v["homeTeam"]["logoUrl"], "https://example.com/1.svg");
        assert!(v.get("htScore").is_none());
    }

    #[test]
    fn test_raw_match_unknown_team() {
        let raw = RawMatch {
            id: 7,
            home: "Ferencváros".into(),
            away: "Nowhere".into(),
            ht: "0 - 0".into(),
            ft: "0 - 0".into(),
        };
        let err = raw.resolve(&[team(1, "Ferencváros")]).unwrap_err();
        assert_eq!(err, InvalidMatchError::UnknownTeam("Nowhere".into()));
    }

    #[test]
    fn test_admin_config_tolerates_missing_fields() {
        let cfg: AdminConfig = serde_json::from_str(r#"{"url":"https://db.example.com"}"#).unwrap();
        assert_eq!(cfg.url, "https://db.example.com");
        assert!(cfg.key.is_empty());
        assert!(!cfg.is_connected);
    }
}
