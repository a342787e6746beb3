use serde::{Deserialize, Serialize};

use crate::db::models::{Match, Team};
use crate::stats::score::Outcome;
use crate::stats::summary::{percentage, rounded_mean};

/// Number of matches shown in a team's form guide.
pub const FORM_LENGTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormEntry {
    pub match_id: i64,
    pub opponent: String,
    pub result: FormResult,
    pub score: String,
}

/// Season figures for a single team, from its own point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub team: Team,
    pub total_matches: usize,
    pub home_matches: usize,
    pub away_matches: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub goals_scored: u64,
    pub goals_conceded: u64,
    pub goal_difference: i64,
    pub btts_matches: usize,
    pub comeback_matches: usize,
    pub win_percentage: u32,
    pub btts_percentage: u32,
    pub average_goals_scored: f64,
    pub average_goals_conceded: f64,
    /// Most recent first
    pub form: Vec<FormEntry>,
}

fn result_for(team: &str, m: &Match) -> FormResult {
    let outcome = m.ft_score().outcome();
    let is_home = m.home() == team;
    match (outcome, is_home) {
        (Outcome::Draw, _) => FormResult::Draw,
        (Outcome::Home, true) | (Outcome::Away, false) => FormResult::Win,
        _ => FormResult::Loss,
    }
}

/// Compute statistics for `team` over the matches it took part in.
///
/// Returns `None` when the team played no matches in `matches`.
pub fn team_stats(team: &Team, matches: &[Match]) -> Option<TeamStats> {
    let name = team.name.as_str();
    let played: Vec<&Match> = matches.iter().filter(|m| m.involves(name)).collect();
    if played.is_empty() {
        return None;
    }

    let total = played.len();
    let home_matches = played.iter().filter(|m| m.home() == name).count();
    let mut wins = 0;
    let mut draws = 0;
    let mut goals_scored: u64 = 0;
    let mut goals_conceded: u64 = 0;

    for m in &played {
        match result_for(name, m) {
            FormResult::Win => wins += 1,
            FormResult::Draw => draws += 1,
            FormResult::Loss => {}
        }
        let (scored, conceded) = if m.home() == name {
            (m.home_goals(), m.away_goals())
        } else {
            (m.away_goals(), m.home_goals())
        };
        goals_scored += u64::from(scored);
        goals_conceded += u64::from(conceded);
    }

    let btts_matches = played.iter().filter(|m| m.btts()).count();
    let comeback_matches = played.iter().filter(|m| m.comeback()).count();

    Some(TeamStats {
        team: team.clone(),
        total_matches: total,
        home_matches,
        away_matches: total - home_matches,
        wins,
        draws,
        losses: total - wins - draws,
        goals_scored,
        goals_conceded,
        goal_difference: goals_scored as i64 - goals_conceded as i64,
        btts_matches,
        comeback_matches,
        win_percentage: percentage(wins as u64, total as u64),
        btts_percentage: percentage(btts_matches as u64, total as u64),
        average_goals_scored: rounded_mean(goals_scored, total as u64, 2),
        average_goals_conceded: rounded_mean(goals_conceded, total as u64, 2),
        form: form(name, &played),
    })
}

/// Last few results, treating a higher match id as more recent.
fn form(team: &str, played: &[&Match]) -> Vec<FormEntry> {
    let mut recent: Vec<&Match> = played.to_vec();
    recent.sort_by(|a, b| b.id().cmp(&a.id()));
    recent
        .into_iter()
        .take(FORM_LENGTH)
        .map(|m| FormEntry {
            match_id: m.id(),
            opponent: if m.home() == team { m.away() } else { m.home() }.to_string(),
            result: result_for(team, m),
            score: m.ft().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::team;
    use approx::assert_relative_eq;

    fn fixtures() -> (Team, Vec<Match>) {
        let fer = team(1, "Ferencváros");
        let ujp = team(2, "Újpest FC");
        let deb = team(3, "Debrecen");
        let ms = vec![
            Match::new(1, fer.clone(), ujp.clone(), "0 - 1", "2 - 1").unwrap(),
            Match::new(2, ujp.clone(), fer.clone(), "0 - 0", "0 - 0").unwrap(),
            Match::new(3, deb.clone(), fer.clone(), "1 - 0", "2 - 1").unwrap(),
            Match::new(4, deb.clone(), ujp.clone(), "0 - 0", "1 - 0").unwrap(),
            Match::new(5, fer.clone(), deb.clone(), "1 - 1", "3 - 1").unwrap(),
            Match::new(6, ujp.clone(), fer.clone(), "0 - 0", "0 - 2").unwrap(),
            Match::new(7, fer.clone(), ujp, "0 - 0", "1 - 1").unwrap(),
        ];
        (fer, ms)
    }

    #[test]
    fn test_team_totals() {
        let (fer, ms) = fixtures();
        let s = team_stats(&fer, &ms).unwrap();
        assert_eq!(s.total_matches, 6);
        assert_eq!(s.home_matches, 3);
        assert_eq!(s.away_matches, 3);
        assert_eq!(s.wins, 3);
        assert_eq!(s.draws, 2);
        assert_eq!(s.losses, 1);
        assert_eq!(s.goals_scored, 2 + 0 + 1 + 3 + 2 + 1);
        assert_eq!(s.goals_conceded, 1 + 0 + 2 + 1 + 0 + 1);
        assert_eq!(s.goal_difference, 4);
        assert_eq!(s.btts_matches, 4);
        assert_eq!(s.comeback_matches, 1);
        assert_eq!(s.win_percentage, 50);
        assert_eq!(s.btts_percentage, 67);
        assert_relative_eq!(s.average_goals_scored, 1.5, epsilon = 1e-9);
        assert_relative_eq!(s.average_goals_conceded, 0.83, epsilon = 1e-9);
    }

    #[test]
    fn test_form_most_recent_first() {
        let (fer, ms) = fixtures();
        let s = team_stats(&fer, &ms).unwrap();
        let ids: Vec<i64> = s.form.iter().map(|f| f.match_id).collect();
        assert_eq!(ids, vec![7, 6, 5, 3, 2]);
        let results: Vec<FormResult> = s.form.iter().map(|f| f.result).collect();
        assert_eq!(
            results,
            vec![
                FormResult::Draw,
                FormResult::Win,
                FormResult::Win,
                FormResult::Loss,
                FormResult::Draw
            ]
        );
        assert_eq!(s.form[1].opponent, "Újpest FC");
        assert_eq!(s.form[1].score, "0 - 2");
    }

    #[test]
    fn test_team_without_matches() {
        let (_, ms) = fixtures();
        assert!(team_stats(&team(9, "MTK Budapest"), &ms).is_none());
    }

    #[test]
    fn test_form_serializes_letters() {
        let v = serde_json::to_value(FormResult::Win).unwrap();
        assert_eq!(v, "W");
    }
}
