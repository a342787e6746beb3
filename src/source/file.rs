use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{build_matches, dedupe_teams};
use super::provider::MatchSource;
use crate::db::models::{Match, RawMatch, Team};
use crate::error::FetchError;
use crate::stats::filter::{self, FilterSpec};

#[derive(Debug, Deserialize)]
struct DatasetFile {
    teams: Vec<Team>,
    #[serde(default)]
    matches: Vec<RawMatch>,
}

/// Source backed by a JSON dataset file, loaded once at startup.
///
/// ```json
/// { "teams":   [{ "id": 1, "name": "Ferencváros", "logoUrl": "..." }],
///   "matches": [{ "id": 1, "home": "Ferencváros", "away": "Debrecen",
///                 "ht": "1 - 0", "ft": "2 - 1" }] }
/// ```
pub struct FileSource {
    path: PathBuf,
    teams: Vec<Team>,
    matches: Vec<Match>,
}

impl FileSource {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset {}", path.display()))?;
        Self::from_json(path, &raw)
    }

    fn from_json(path: &Path, raw: &str) -> Result<Self> {
        let dataset: DatasetFile = serde_json::from_str(raw)
            .with_context(|| format!("Failed to parse dataset {}", path.display()))?;
        let teams = dedupe_teams(dataset.teams);
        let matches = build_matches(&dataset.matches, &teams);
        info!(
            "Loaded dataset {}: {} teams, {}/{} matches",
            path.display(),
            teams.len(),
            matches.len(),
            dataset.matches.len()
        );
        Ok(FileSource {
            path: path.to_path_buf(),
            teams,
            matches,
        })
    }
}

#[async_trait]
impl MatchSource for FileSource {
    fn name(&self) -> &str {
        self.path.to_str().unwrap_or("dataset file")
    }

    async fn fetch_teams(&self) -> Result<Vec<Team>, FetchError> {
        Ok(self.teams.clone())
    }

    async fn fetch_matches(&self, spec: &FilterSpec) -> Result<Vec<Match>, FetchError> {
        Ok(filter::apply(&self.matches, spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DATASET: &str = r#"{
        "teams": [
            { "id": 1, "name": "Ferencváros", "logoUrl": "https://example.com/fer.svg" },
            { "id": 2, "name": "Debrecen", "logoUrl": "https://example.com/deb.svg" }
        ],
        "matches": [
            { "id": 1, "home": "Ferencváros", "away": "Debrecen", "ht": "0 - 1", "ft": "2 - 1" },
            { "id": 2, "home": "Debrecen", "away": "Ferencváros", "ht": "1-0", "ft": "1 - 0" },
            { "id": 3, "home": "Debrecen", "away": "Ferencváros", "ht": "2 - 0", "ft": "1 - 0" },
            { "id": 4, "home": "Debrecen", "away": "Kisvárda", "ht": "0 - 0", "ft": "0 - 0" },
            { "id": 5, "home": "Debrecen", "away": "Ferencváros", "ht": "0 - 0", "ft": "1 - 1" }
        ]
    }"#;

    #[tokio::test]
    async fn test_bad_records_are_skipped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DATASET.as_bytes()).unwrap();

        let src = FileSource::load(file.path()).unwrap();
        let all = src.fetch_matches(&FilterSpec::default()).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec![1, 5]);
        assert!(all[0].comeback());
        assert_eq!(src.fetch_teams().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_ids_and_team_names() {
        let raw = r#"{
            "teams": [
                { "id": 1, "name": "A", "logoUrl": "https://example.com/a.svg" },
                { "id": 2, "name": "B", "logoUrl": "https://example.com/b.svg" },
                { "id": 3, "name": "A", "logoUrl": "https://example.com/a2.svg" }
            ],
            "matches": [
                { "id": 1, "home": "A", "away": "B", "ht": "0 - 0", "ft": "1 - 0" },
                { "id": 1, "home": "B", "away": "A", "ht": "0 - 0", "ft": "0 - 0" }
            ]
        }"#;
        let src = FileSource::from_json(Path::new("dupes.json"), raw).unwrap();
        let teams = src.fetch_teams().await.unwrap();
        let team_ids: Vec<i64> = teams.iter().map(|t| t.id).collect();
        assert_eq!(team_ids, vec![1, 2]);

        let all = src.fetch_matches(&FilterSpec::default()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].ft(), "1 - 0");
        let v = serde_json::to_value(&all[0]).unwrap();
        assert_eq!(v["homeTeam"]["logoUrl"], "https://example.com/a.svg");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let err = FileSource::from_json(Path::new("broken.json"), "{ not json").err();
        assert!(err.is_some());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(FileSource::load(Path::new("/nonexistent/winmix.json")).is_err());
    }
}
