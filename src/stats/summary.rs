use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::db::models::Match;
use crate::stats::score::Outcome;

/// Number of entries kept in the frequent-results histogram.
pub const FREQUENT_RESULTS_LIMIT: usize = 5;

/// Aggregate figures over a match collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub home_wins: usize,
    pub draws: usize,
    pub away_wins: usize,
    /// Mean home goals, one decimal place
    pub home_goal_avg: f64,
    /// Mean away goals, one decimal place
    pub away_goal_avg: f64,
    pub btts_count: usize,
    pub btts_percentage: u32,
    pub comeback_count: usize,
    /// `(full-time score, occurrences)`, most frequent first
    pub frequent_results: Vec<FrequentResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequentResult {
    pub score: String,
    pub count: usize,
}

/// Per-match figures shown on the match detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchBreakdown {
    pub total_goals: u64,
    pub half_time_goals: u64,
    pub second_half_goals: u64,
    pub home_score_percentage: u32,
    pub outcome: Outcome,
}

/// Compute the dashboard summary for `matches`.
pub fn summarize(matches: &[Match]) -> Summary {
    let total = matches.len();
    let mut home_wins = 0;
    let mut draws = 0;
    let mut away_wins = 0;
    let mut home_goals: u64 = 0;
    let mut away_goals: u64 = 0;
    let mut btts_count = 0;
    let mut comeback_count = 0;

    for m in matches {
        match m.ft_score().outcome() {
            Outcome::Home => home_wins += 1,
            Outcome::Draw => draws += 1,
            Outcome::Away => away_wins += 1,
        }
        home_goals += u64::from(m.home_goals());
        away_goals += u64::from(m.away_goals());
        if m.btts() {
            btts_count += 1;
        }
        if m.comeback() {
            comeback_count += 1;
        }
    }

    Summary {
        total,
        home_wins,
        draws,
        away_wins,
        home_goal_avg: rounded_mean(home_goals, total as u64, 1),
        away_goal_avg: rounded_mean(away_goals, total as u64, 1),
        btts_count,
        btts_percentage: percentage(btts_count as u64, total as u64),
        comeback_count,
        frequent_results: frequent_results(matches, FREQUENT_RESULTS_LIMIT),
    }
}

/// Count full-time results, most frequent first; ties keep first-seen order.
pub fn frequent_results(matches: &[Match], limit: usize) -> Vec<FrequentResult> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<FrequentResult> = Vec::new();
    for m in matches {
        match position.get(m.ft()) {
            Some(&i) => counts[i].count += 1,
            None => {
                position.insert(m.ft(), counts.len());
                counts.push(FrequentResult {
                    score: m.ft().to_string(),
                    count: 1,
                });
            }
        }
    }
    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

pub fn breakdown(m: &Match) -> MatchBreakdown {
    let ft = m.ft_score();
    let total_goals = ft.total();
    let half_time_goals = m.ht_score().total();
    MatchBreakdown {
        total_goals,
        half_time_goals,
        second_half_goals: total_goals - half_time_goals,
        home_score_percentage: percentage(u64::from(ft.home), total_goals),
        outcome: ft.outcome(),
    }
}

/// `round(part / whole * 100)` with halves rounded away from zero; 0 for an empty whole.
pub fn percentage(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((200 * part + whole) / (2 * whole)) as u32
}

/// Mean of `sum / count` rounded half-up to `decimals` places; 0.0 for no samples.
///
/// Rounding is done on integers so values such as 0.25 never drift below the
/// half-way point.
pub fn rounded_mean(sum: u64, count: u64, decimals: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let scale = 10u64.pow(decimals);
    let scaled = (2 * sum * scale + count) / (2 * count);
    scaled as f64 / scale as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::team;
    use approx::assert_relative_eq;

    fn m(id: i64, ht: &str, ft: &str) -> Match {
        Match::new(id, team(1, "Ferencváros"), team(2, "MTK Budapest"), ht, ft).unwrap()
    }

    #[test]
    fn test_empty_summary() {
        let s = summarize(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.home_wins + s.draws + s.away_wins, 0);
        assert_relative_eq!(s.home_goal_avg, 0.0);
        assert_relative_eq!(s.away_goal_avg, 0.0);
        assert_eq!(s.btts_percentage, 0);
        assert!(s.frequent_results.is_empty());
    }

    #[test]
    fn test_partition_and_averages() {
        let ms = vec![
            m(1, "0 - 1", "2 - 1"),
            m(2, "0 - 0", "0 - 0"),
            m(3, "0 - 1", "0 - 3"),
            m(4, "1 - 0", "1 - 1"),
        ];
        let s = summarize(&ms);
        assert_eq!(s.total, 4);
        assert_eq!(s.home_wins, 1);
        assert_eq!(s.draws, 2);
        assert_eq!(s.away_wins, 1);
        assert_eq!(s.home_wins + s.draws + s.away_wins, s.total);
        // 3 / 4 = 0.75 -> 0.8, 5 / 4 = 1.25 -> 1.3
        assert_relative_eq!(s.home_goal_avg, 0.8, epsilon = 1e-9);
        assert_relative_eq!(s.away_goal_avg, 1.3, epsilon = 1e-9);
        assert_eq!(s.btts_count, 2);
        assert_eq!(s.btts_percentage, 50);
        assert_eq!(s.comeback_count, 1);
    }

    #[test]
    fn test_btts_percentage_rounds() {
        let ms = vec![m(1, "0 - 0", "1 - 1"), m(2, "0 - 0", "1 - 0"), m(3, "0 - 0", "0 - 0")];
        assert_eq!(summarize(&ms).btts_percentage, 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13); // 12.5 rounds away from zero
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_rounded_mean_half_up() {
        assert_relative_eq!(rounded_mean(1, 4, 1), 0.3, epsilon = 1e-9); // 0.25
        assert_relative_eq!(rounded_mean(1, 3, 1), 0.3, epsilon = 1e-9);
        assert_relative_eq!(rounded_mean(2, 3, 2), 0.67, epsilon = 1e-9);
        assert_relative_eq!(rounded_mean(7, 0, 1), 0.0);
    }

    #[test]
    fn test_frequent_results_order_and_ties() {
        let ms = vec![
            m(1, "0 - 0", "1 - 0"),
            m(2, "0 - 0", "2 - 2"),
            m(3, "0 - 0", "2 - 2"),
            m(4, "0 - 0", "0 - 0"),
            m(5, "0 - 0", "1 - 0"),
            m(6, "0 - 0", "3 - 1"),
        ];
        let fr = frequent_results(&ms, 5);
        let got: Vec<(&str, usize)> = fr.iter().map(|r| (r.score.as_str(), r.count)).collect();
        assert_eq!(got, vec![("1 - 0", 2), ("2 - 2", 2), ("0 - 0", 1), ("3 - 1", 1)]);
    }

    #[test]
    fn test_frequent_results_truncated() {
        let ms: Vec<Match> = (0..7)
            .map(|i| m(i, "0 - 0", &format!("{} - 0", i)))
            .collect();
        let fr = summarize(&ms).frequent_results;
        assert_eq!(fr.len(), FREQUENT_RESULTS_LIMIT);
        assert_eq!(fr[0].score, "0 - 0");
        assert_eq!(fr[4].score, "4 - 0");
    }

    #[test]
    fn test_breakdown() {
        let b = breakdown(&m(1, "1 - 0", "3 - 1"));
        assert_eq!(b.total_goals, 4);
        assert_eq!(b.half_time_goals, 1);
        assert_eq!(b.second_half_goals, 3);
        assert_eq!(b.home_score_percentage, 75);
        assert_eq!(b.outcome, Outcome::Home);

        let huge = breakdown(&m(3, "0 - 0", "4294967295 - 1"));
        assert_eq!(huge.total_goals, 4_294_967_296);
        assert_eq!(huge.second_half_goals, 4_294_967_296);
        assert_eq!(huge.home_score_percentage, 100);

        let goalless = breakdown(&m(2, "0 - 0", "0 - 0"));
        assert_eq!(goalless.home_score_percentage, 0);
        assert_eq!(goalless.outcome, Outcome::Draw);
    }
}
