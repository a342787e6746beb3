use serde::{Deserialize, Serialize};

use crate::db::models::Match;

/// Active filter criteria; `None` leaves a field unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub home: Option<String>,
    pub away: Option<String>,
    pub btts: Option<bool>,
    pub comeback: Option<bool>,
}

impl FilterSpec {
    /// Only the team criteria, as used by the extended statistics view.
    pub fn teams_only(&self) -> FilterSpec {
        FilterSpec {
            home: self.home.clone(),
            away: self.away.clone(),
            btts: None,
            comeback: None,
        }
    }

    /// Treat blank team names as unconstrained (form fields submit "").
    pub fn normalized(mut self) -> FilterSpec {
        self.home = self.home.filter(|s| !s.trim().is_empty());
        self.away = self.away.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.home.is_none() && self.away.is_none() && self.btts.is_none() && self.comeback.is_none()
    }

    pub fn matches(&self, m: &Match) -> bool {
        self.home.as_deref().map_or(true, |h| m.home() == h)
            && self.away.as_deref().map_or(true, |a| m.away() == a)
            && self.btts.map_or(true, |b| m.btts() == b)
            && self.comeback.map_or(true, |c| m.comeback() == c)
    }
}

/// Keep the matches satisfying every active criterion, in input order.
pub fn apply(matches: &[Match], spec: &FilterSpec) -> Vec<Match> {
    if spec.is_empty() {
        return matches.to_vec();
    }
    matches.iter().filter(|m| spec.matches(m)).cloned().collect()
}
