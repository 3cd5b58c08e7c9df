use harvest_core::{config, CoreError, HarvestConfig, RedditCredentials};
use reddit_client::RedditClient;
use tracing::{info, warn};

mod harvest;

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    tracing_subscriber::fmt()
        .with_env_filter("redditharvest=info,reddit_client=info,exporter=info,harvest_core=info")
        .init();

    info!("Starting Redditharvest - Reddit post collector");

    let run_config = HarvestConfig::default();

    config::load_env_files(&config::ENV_FILE_CANDIDATES);
    let credentials = RedditCredentials::from_env()?;
    let client = RedditClient::new(credentials);

    let (records, report) = harvest::collect_records(&client, &run_config).await;
    if report.failed_listings() > 0 {
        warn!(
            "{} of {} subreddits failed; exporting what was collected",
            report.failed_listings(),
            report.listings.len()
        );
    }
    info!("Collected {} records", records.len());

    exporter::export_csv(records, &run_config.output_path)?;
    Ok(())
}
