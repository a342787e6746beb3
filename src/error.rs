use thiserror::Error;

/// A score string that is not of the form `"<int> - <int>"`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("score {0:?} is missing the \" - \" separator")]
    MissingSeparator(String),

    #[error("score {0:?} has more than two halves")]
    TooManyParts(String),

    #[error("invalid goal count {part:?} in score {score:?}")]
    InvalidGoals { score: String, part: String },
}

/// A match record that violates one of the fixture invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidMatchError {
    #[error(transparent)]
    Score(#[from] ParseError),

    #[error("team {0:?} cannot play itself")]
    SameTeam(String),

    #[error("unknown team {0:?}")]
    UnknownTeam(String),

    #[error("half-time score {ht} exceeds full-time score {ft}")]
    HalfTimeExceedsFullTime { ht: String, ft: String },
}

/// Failure at the data-source boundary. Callers keep their previous data.
///
/// The bundled mock and file sources hold their dataset in memory and never
/// fail after startup; this is raised by remote sources. The HTTP 503 mapping
/// is covered by the router tests with a source that always fails.
#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("data source {source_name} unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },
}

/// Persisted local state that could not be decoded.
#[derive(Error, Debug)]
#[error("stored value under {key:?} is malformed: {source}")]
pub struct StorageDecodeError {
    pub key: String,
    #[source]
    pub source: serde_json::Error,
}
