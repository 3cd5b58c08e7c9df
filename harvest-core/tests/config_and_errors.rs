use harvest_core::{
    load_env_files, ConfigError, CoreError, RedditApiError, RedditCredentials, HarvestConfig,
    CLIENT_ID_VAR, CLIENT_SECRET_VAR, USER_AGENT_VAR,
};
use std::io::Write;

#[test]
fn test_missing_credentials_names_every_variable() {
    let err = RedditCredentials::from_vars(None, None, None).unwrap_err();
    match &err {
        ConfigError::MissingCredentials { vars } => {
            assert_eq!(
                vars,
                &vec![
                    CLIENT_ID_VAR.to_string(),
                    CLIENT_SECRET_VAR.to_string(),
                    USER_AGENT_VAR.to_string()
                ]
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let message = err.to_string();
    assert!(message.contains("REDDIT_CLIENT_ID"));
    assert!(message.contains("REDDIT_CLIENT_SECRET"));
    assert!(message.contains("REDDIT_USER_AGENT"));
}

#[test]
fn test_partial_credentials_report_only_missing() {
    let err = RedditCredentials::from_vars(
        Some("abc".to_string()),
        None,
        Some("harvest/0.1 by tester".to_string()),
    )
    .unwrap_err();
    match err {
        ConfigError::MissingCredentials { vars } => {
            assert_eq!(vars, vec![CLIENT_SECRET_VAR.to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_empty_string_counts_as_missing() {
    let err = RedditCredentials::from_vars(
        Some(String::new()),
        Some("secret".to_string()),
        Some("agent".to_string()),
    )
    .unwrap_err();
    match err {
        ConfigError::MissingCredentials { vars } => {
            assert_eq!(vars, vec![CLIENT_ID_VAR.to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_valid_credentials() {
    let creds = RedditCredentials::from_vars(
        Some("id".to_string()),
        Some("secret".to_string()),
        Some("harvest/0.1".to_string()),
    )
    .unwrap();
    assert_eq!(creds.client_id, "id");
    assert_eq!(creds.client_secret, "secret");
    assert_eq!(creds.user_agent, "harvest/0.1");
}

#[test]
fn test_default_config_settings() {
    let config = HarvestConfig::default();
    assert_eq!(config.subreddits, vec!["personalfinance", "investing", "stocks"]);
    assert_eq!(config.per_subreddit_limit, 50);
    assert_eq!(config.search_keyword.as_deref(), Some("index fund"));
    assert_eq!(config.search_limit, 100);
    assert_eq!(config.output_path.to_str(), Some("reddit_data.csv"));
}

#[test]
fn test_env_file_candidate_loading() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.env");
    let env_path = dir.path().join("present.env");
    let mut file = std::fs::File::create(&env_path).unwrap();
    writeln!(file, "HARVEST_TEST_ENV_KEY=loaded-from-file").unwrap();
    drop(file);

    let missing_str = missing.to_str().unwrap().to_string();
    let present_str = env_path.to_str().unwrap().to_string();
    let loaded = load_env_files(&[&missing_str, &present_str]);

    assert_eq!(loaded, Some(env_path));
    assert_eq!(
        std::env::var("HARVEST_TEST_ENV_KEY").unwrap(),
        "loaded-from-file"
    );
    std::env::remove_var("HARVEST_TEST_ENV_KEY");
}

#[test]
fn test_env_file_empty_candidate_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let empty_path = dir.path().join("empty.env");
    std::fs::File::create(&empty_path).unwrap();

    let empty_str = empty_path.to_str().unwrap().to_string();
    let loaded = load_env_files(&[&empty_str]);
    assert_eq!(loaded, None);
}

#[test]
fn test_error_display_wraps_domains() {
    let err = CoreError::RedditApi(RedditApiError::RateLimitExceeded { retry_after: 60 });
    assert!(err.to_string().contains("Retry after 60 seconds"));

    let err = CoreError::Config(ConfigError::MissingCredentials {
        vars: vec!["REDDIT_CLIENT_ID".to_string()],
    });
    assert!(err.to_string().starts_with("Configuration error:"));
}
