pub mod file;
pub mod mock;
pub mod provider;

pub use file::FileSource;
pub use mock::MockSource;
pub use provider::MatchSource;

use std::collections::HashSet;
use tracing::warn;

use crate::db::models::{Match, RawMatch, Team};

/// Validate a batch of raw records, skipping (and logging) the bad ones.
///
/// Match ids are unique within a batch; a repeated id keeps the first valid record.
pub fn build_matches(raw: &[RawMatch], teams: &[Team]) -> Vec<Match> {
    let mut seen = HashSet::new();
    raw.iter()
        .filter_map(|r| match r.resolve(teams) {
            Ok(_) if seen.contains(&r.id) => {
                warn!("Skipping match {}: duplicate id", r.id);
                None
            }
            Ok(m) => {
                seen.insert(r.id);
                Some(m)
            }
            Err(e) => {
                warn!("Skipping match {}: {}", r.id, e);
                None
            }
        })
        .collect()
}

/// Drop teams whose name was already taken by an earlier entry.
pub fn dedupe_teams(teams: Vec<Team>) -> Vec<Team> {
    let mut seen = HashSet::new();
    teams
        .into_iter()
        .filter(|t| {
            let fresh = seen.insert(t.name.clone());
            if !fresh {
                warn!("Skipping team {} ({:?}): duplicate name", t.id, t.name);
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::team;

    fn raw(id: i64, home: &str, away: &str, ft: &str) -> RawMatch {
        RawMatch {
            id,
            home: home.into(),
            away: away.into(),
            ht: "0 - 0".into(),
            ft: ft.into(),
        }
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let teams = vec![team(1, "Ferencváros"), team(2, "Debrecen")];
        let batch = vec![
            raw(1, "Ferencváros", "Debrecen", "1 - 0"),
            raw(1, "Debrecen", "Ferencváros", "3 - 3"),
            raw(2, "Debrecen", "Ferencváros", "0 - 2"),
        ];
        let ms = build_matches(&batch, &teams);
        let ids: Vec<i64> = ms.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(ms[0].ft(), "1 - 0");
    }

    #[test]
    fn test_invalid_record_does_not_claim_id() {
        let teams = vec![team(1, "Ferencváros"), team(2, "Debrecen")];
        let batch = vec![
            raw(1, "Ferencváros", "Nowhere", "1 - 0"),
            raw(1, "Ferencváros", "Debrecen", "2 - 0"),
        ];
        let ms = build_matches(&batch, &teams);
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].ft(), "2 - 0");
    }

    #[test]
    fn test_duplicate_team_names_keep_first() {
        let teams = dedupe_teams(vec![team(1, "A"), team(2, "B"), team(3, "A")]);
        let ids: Vec<i64> = teams.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
