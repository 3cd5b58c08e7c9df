use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::error::ConfigError;

/// Env files probed for credentials, in priority order.
pub const ENV_FILE_CANDIDATES: [&str; 2] = ["reddit.env", "config/reddit.env"];

pub const CLIENT_ID_VAR: &str = "REDDIT_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "REDDIT_CLIENT_SECRET";
pub const USER_AGENT_VAR: &str = "REDDIT_USER_AGENT";

/// Fixed run settings: which subreddits to pull, how much, and where the
/// output lands.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub subreddits: Vec<String>,
    pub per_subreddit_limit: u32,
    /// None disables the search stage entirely.
    pub search_keyword: Option<String>,
    pub search_limit: u32,
    pub output_path: PathBuf,
    /// Courtesy delay after a failed listing fetch. Not a retry.
    pub failure_pause: Duration,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            subreddits: vec![
                "personalfinance".to_string(),
                "investing".to_string(),
                "stocks".to_string(),
            ],
            per_subreddit_limit: 50,
            search_keyword: Some("index fund".to_string()),
            search_limit: 100,
            output_path: PathBuf::from("reddit_data.csv"),
            failure_pause: Duration::from_secs(2),
        }
    }
}

/// Validated Reddit script-app credentials.
#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl RedditCredentials {
    /// Read the three required settings from the process environment.
    /// Fails with a single error naming every missing variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            read_var(CLIENT_ID_VAR),
            read_var(CLIENT_SECRET_VAR),
            read_var(USER_AGENT_VAR),
        )
    }

    pub fn from_vars(
        client_id: Option<String>,
        client_secret: Option<String>,
        user_agent: Option<String>,
    ) -> Result<Self, ConfigError> {
        let client_id = client_id.filter(|v| !v.is_empty());
        let client_secret = client_secret.filter(|v| !v.is_empty());
        let user_agent = user_agent.filter(|v| !v.is_empty());

        let mut missing = Vec::new();
        if client_id.is_none() {
            missing.push(CLIENT_ID_VAR.to_string());
        }
        if client_secret.is_none() {
            missing.push(CLIENT_SECRET_VAR.to_string());
        }
        if user_agent.is_none() {
            missing.push(USER_AGENT_VAR.to_string());
        }
        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials { vars: missing });
        }

        Ok(Self {
            client_id: client_id.unwrap_or_default(),
            client_secret: client_secret.unwrap_or_default(),
            user_agent: user_agent.unwrap_or_default(),
        })
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Probe the candidate env files in order and load the first one that exists
/// and yields at least one key. Falls back to the default `.env` lookup so a
/// run can still pick up ambient configuration.
///
/// Returns the path that was loaded, if any. Never fails: missing credentials
/// are caught later by [`RedditCredentials::from_env`].
pub fn load_env_files(candidates: &[&str]) -> Option<PathBuf> {
    for candidate in candidates {
        let path = Path::new(candidate);
        if !path.exists() {
            continue;
        }
        match dotenvy::from_path_iter(path) {
            Ok(entries) => {
                let mut loaded = 0usize;
                for entry in entries {
                    match entry {
                        Ok((key, value)) => {
                            std::env::set_var(&key, &value);
                            loaded += 1;
                        }
                        Err(e) => {
                            warn!("Skipping malformed line in {}: {}", path.display(), e);
                        }
                    }
                }
                if loaded > 0 {
                    info!("Loaded credentials from: {}", path.display());
                    return Some(path.to_path_buf());
                }
                warn!("Env file {} contained no settings", path.display());
            }
            Err(e) => {
                warn!("Could not parse env file {}: {}", path.display(), e);
            }
        }
    }

    dotenvy::dotenv().ok();
    warn!("No reddit.env file found; relying on ambient environment");
    None
}
