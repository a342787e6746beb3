use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use super::provider::MatchSource;
use crate::db::models::{Match, Team};
use crate::error::FetchError;
use crate::stats::filter::{self, FilterSpec};
use crate::stats::score::Score;

/// Full-time goals per side are drawn from `0..MAX_GOALS`.
const MAX_GOALS: u32 = 5;
/// Half-time goals per side are drawn from `0..MAX_HT_GOALS`, capped at full time.
const MAX_HT_GOALS: u32 = 3;

/// The default league: top Hungarian clubs.
pub fn default_teams() -> Vec<Team> {
    let teams = [
        (
            "Ferencváros",
            "https://upload.wikimedia.org/wikipedia/en/5/5c/Ferencv%C3%A1rosi_TC.svg",
        ),
        (
            "Újpest FC",
            "https://upload.wikimedia.org/wikipedia/en/5/51/%C3%9Ajpest_FC.svg",
        ),
        (
            "Debrecen",
            "https://upload.wikimedia.org/wikipedia/en/4/4f/Debreceni_VSC.svg",
        ),
        (
            "Puskás Akadémia",
            "https://upload.wikimedia.org/wikipedia/en/8/8d/Pusk%C3%A1s_Akad%C3%A9mia_FC.svg",
        ),
        (
            "MTK Budapest",
            "https://upload.wikimedia.org/wikipedia/commons/2/21/MTK_Budapest_FC_logo.svg",
        ),
    ];
    teams
        .iter()
        .enumerate()
        .map(|(i, (name, logo))| Team {
            id: i as i64 + 1,
            name: name.to_string(),
            logo_url: logo.to_string(),
        })
        .collect()
}

/// In-memory source filled with randomly generated fixtures.
///
/// The dataset is generated once at construction so every view of the
/// dashboard works on the same matches.
pub struct MockSource {
    teams: Vec<Team>,
    matches: Vec<Match>,
}

impl MockSource {
    /// Generate `count` matches between the default teams.
    pub fn new(count: usize, seed: Option<u64>) -> Self {
        Self::with_teams(default_teams(), count, seed)
    }

    pub fn with_teams(teams: Vec<Team>, count: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let matches = generate_matches(&teams, count, &mut rng);
        info!(
            "Mock source ready: {} teams, {} matches (seed={:?})",
            teams.len(),
            matches.len(),
            seed
        );
        MockSource { teams, matches }
    }
}

fn generate_matches(teams: &[Team], count: usize, rng: &mut impl Rng) -> Vec<Match> {
    if teams.len() < 2 {
        warn!("Mock source needs at least two teams, generating no matches");
        return Vec::new();
    }

    let mut matches = Vec::with_capacity(count);
    for i in 0..count {
        let home_idx = rng.gen_range(0..teams.len());
        let mut away_idx = rng.gen_range(0..teams.len());
        while away_idx == home_idx {
            away_idx = rng.gen_range(0..teams.len());
        }

        let ft = Score::new(rng.gen_range(0..MAX_GOALS), rng.gen_range(0..MAX_GOALS));
        let ht = Score::new(
            ft.home.min(rng.gen_range(0..MAX_HT_GOALS)),
            ft.away.min(rng.gen_range(0..MAX_HT_GOALS)),
        );

        let id = i as i64 + 1;
        match Match::from_scores(
            id,
            teams[home_idx].clone(),
            teams[away_idx].clone(),
            ht,
            ft,
        ) {
            Ok(m) => matches.push(m),
            Err(e) => warn!("Skipping generated match {}: {}", id, e),
        }
    }
    matches
}

#[async_trait]
impl MatchSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_teams(&self) -> Result<Vec<Team>, FetchError> {
        Ok(self.teams.clone())
    }

    async fn fetch_matches(&self, spec: &FilterSpec) -> Result<Vec<Match>, FetchError> {
        Ok(filter::apply(&self.matches, spec))
    }
}
