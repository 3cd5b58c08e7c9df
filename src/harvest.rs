use async_trait::async_trait;
use harvest_core::{CoreError, HarvestConfig, PostRecord};
use reddit_client::{record_from_submission, RedditClient, SubmissionData};
use tracing::{info, warn};

/// Seam between the fetch loop and the Reddit client so the loop's fault
/// isolation can be exercised against a stub.
#[async_trait]
pub trait SubmissionSource {
    async fn hot_listing(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<SubmissionData>, CoreError>;

    async fn search(
        &self,
        subreddits: &[String],
        keyword: &str,
        limit: u32,
    ) -> Result<Vec<SubmissionData>, CoreError>;
}

#[async_trait]
impl SubmissionSource for RedditClient {
    async fn hot_listing(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<SubmissionData>, CoreError> {
        RedditClient::hot_listing(self, subreddit, limit).await
    }

    async fn search(
        &self,
        subreddits: &[String],
        keyword: &str,
        limit: u32,
    ) -> Result<Vec<SubmissionData>, CoreError> {
        RedditClient::search(self, subreddits, keyword, limit).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    Fetched(usize),
    Failed(String),
}

/// Per-source outcomes for one run. Failures live here as data rather than
/// only as log lines.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub listings: Vec<(String, SourceOutcome)>,
    pub search: Option<SourceOutcome>,
}

impl FetchReport {
    pub fn failed_listings(&self) -> usize {
        self.listings
            .iter()
            .filter(|(_, outcome)| matches!(outcome, SourceOutcome::Failed(_)))
            .count()
    }
}

/// Run both retrieval stages. Never fails as a whole: a subreddit that errors
/// contributes zero records and the run moves on; a failed search skips the
/// stage. Records come back in fetch order, listings first.
pub async fn collect_records<S: SubmissionSource + Sync>(
    source: &S,
    config: &HarvestConfig,
) -> (Vec<PostRecord>, FetchReport) {
    let mut records = Vec::new();
    let mut report = FetchReport::default();

    for subreddit in &config.subreddits {
        match source
            .hot_listing(subreddit, config.per_subreddit_limit)
            .await
        {
            Ok(submissions) => {
                info!("Collected hot posts from r/{}", subreddit);
                report
                    .listings
                    .push((subreddit.clone(), SourceOutcome::Fetched(submissions.len())));
                records.extend(
                    submissions
                        .iter()
                        .map(|s| record_from_submission(s, None)),
                );
            }
            Err(e) => {
                warn!("r/{} failed: {}", subreddit, e);
                report
                    .listings
                    .push((subreddit.clone(), SourceOutcome::Failed(e.to_string())));
                // Courtesy pause before hitting the next subreddit.
                tokio::time::sleep(config.failure_pause).await;
            }
        }
    }

    if let Some(keyword) = &config.search_keyword {
        let target = config.subreddits.join("+");
        match source
            .search(&config.subreddits, keyword, config.search_limit)
            .await
        {
            Ok(submissions) => {
                info!("Search added results for '{}' across {}", keyword, target);
                report.search = Some(SourceOutcome::Fetched(submissions.len()));
                records.extend(
                    submissions
                        .iter()
                        .map(|s| record_from_submission(s, Some(keyword))),
                );
            }
            Err(e) => {
                warn!("search failed: {}", e);
                report.search = Some(SourceOutcome::Failed(e.to_string()));
            }
        }
    }

    (records, report)
}
