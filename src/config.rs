use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Upper bound on generated mock matches.
pub const MAX_MATCH_COUNT: usize = 100_000;

/// WinMix football match dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "winmix-dashboard", version, about)]
pub struct Config {
    /// Dashboard listen address
    #[arg(long, env = "DASHBOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub dashboard_addr: String,

    /// SQLite database path for saved filters and admin settings
    #[arg(long, env = "DATABASE_PATH", default_value = "winmix.db")]
    pub database_path: String,

    /// Number of mock matches to generate at startup
    #[arg(long, env = "MATCH_COUNT", default_value = "100")]
    pub match_count: usize,

    /// Seed for the mock generator (random when unset)
    #[arg(long, env = "MOCK_SEED")]
    pub seed: Option<u64>,

    /// JSON dataset of teams and matches; replaces the mock generator when set
    #[arg(long, env = "MATCHES_FILE")]
    pub matches_file: Option<PathBuf>,

    /// Timeout for the admin connection test, in seconds
    #[arg(long, env = "CONNECTION_TIMEOUT_SECS", default_value = "5")]
    pub connection_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.match_count == 0 {
            anyhow::bail!("match_count must be positive");
        }
        if self.match_count > MAX_MATCH_COUNT {
            anyhow::bail!("match_count must be at most {}", MAX_MATCH_COUNT);
        }
        if self.connection_timeout_secs == 0 {
            anyhow::bail!("connection_timeout_secs must be positive");
        }
        if self.dashboard_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!("dashboard_addr {:?} is not a socket address", self.dashboard_addr);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["winmix-dashboard"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_are_valid() {
        let cfg = parse(&[]);
        assert_eq!(cfg.match_count, 100);
        assert_eq!(cfg.connection_timeout_secs, 5);
        assert!(cfg.matches_file.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse(&["--match-count", "0"]).validate().is_err());
        assert!(parse(&["--match-count", "100001"]).validate().is_err());
        assert!(parse(&["--connection-timeout-secs", "0"]).validate().is_err());
        assert!(parse(&["--dashboard-addr", "localhost"]).validate().is_err());
    }

    #[test]
    fn test_seed_and_file() {
        let cfg = parse(&["--seed", "7", "--matches-file", "data.json"]);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.matches_file, Some(PathBuf::from("data.json")));
    }
}
