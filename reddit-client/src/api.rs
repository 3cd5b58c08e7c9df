use std::time::Duration;

use harvest_core::{CoreError, RedditApiError, RedditCredentials};
use reqwest::{Client, Response};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::auth::{request_app_token, RedditToken};
use crate::models::{Listing, SubmissionData};

const REDDIT_API_BASE: &str = "https://oauth.reddit.com";

/// Read-only Reddit API client for script-app credentials. Construction is
/// purely local; the first request triggers token acquisition, so credential
/// problems surface on first use rather than at startup.
#[derive(Debug)]
pub struct RedditClient {
    http_client: Client,
    credentials: RedditCredentials,
    token: Mutex<Option<RedditToken>>,
}

impl RedditClient {
    pub fn new(credentials: RedditCredentials) -> Self {
        let http_client = Client::builder()
            .user_agent(&credentials.user_agent)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            credentials,
            token: Mutex::new(None),
        }
    }

    /// Return a valid access token, fetching or refreshing as needed.
    async fn access_token(&self) -> Result<String, CoreError> {
        let mut guard = self.token.lock().await;
        let needs_fetch = match guard.as_ref() {
            Some(token) => token.needs_refresh(),
            None => true,
        };
        if needs_fetch {
            let token = request_app_token(&self.http_client, &self.credentials).await?;
            *guard = Some(token);
        }
        Ok(guard
            .as_ref()
            .map(|t| t.access_token.clone())
            .unwrap_or_default())
    }

    async fn make_request(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Response, CoreError> {
        let access_token = self.access_token().await?;
        let url = format!("{}{}", REDDIT_API_BASE, endpoint);

        debug!("Making Reddit API request: GET {}", endpoint);
        let response = match self
            .http_client
            .get(&url)
            .bearer_auth(&access_token)
            .header("User-Agent", &self.credentials.user_agent)
            .query(query_params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for GET {}: {}", endpoint, e);
                if e.is_timeout() {
                    return Err(CoreError::RedditApi(RedditApiError::RequestTimeout));
                }
                return Err(CoreError::Network(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!("Request successful: {} {}", status, endpoint);
            return Ok(response);
        }

        error!("Request failed with status: {} for {}", status, endpoint);
        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(CoreError::RedditApi(RedditApiError::RateLimitExceeded {
                    retry_after,
                }))
            }
            401 => Err(CoreError::RedditApi(RedditApiError::InvalidToken)),
            403 => Err(CoreError::RedditApi(RedditApiError::Forbidden {
                resource: endpoint.to_string(),
            })),
            404 => Err(CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: "Resource not found".to_string(),
            })),
            code => Err(CoreError::RedditApi(RedditApiError::ServerError {
                status_code: code,
            })),
        }
    }

    /// Fetch up to `limit` submissions from a subreddit's hot listing.
    pub async fn hot_listing(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<SubmissionData>, CoreError> {
        let endpoint = format!("/r/{}/hot", subreddit);
        let limit_str = limit.to_string();
        let params = [("limit", limit_str.as_str()), ("raw_json", "1")];

        let response = self.make_request(&endpoint, &params).await?;
        let listing: Listing<SubmissionData> = response.json().await.map_err(|e| {
            error!("Failed to parse subreddit posts: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse posts for r/{}", subreddit),
            })
        })?;

        info!(
            "Retrieved {} posts from r/{}",
            listing.data.children.len(),
            subreddit
        );
        Ok(listing.data.children.into_iter().map(|c| c.data).collect())
    }

    /// Keyword search across one or more subreddits (joined as `a+b+c`),
    /// ranked by relevance.
    pub async fn search(
        &self,
        subreddits: &[String],
        keyword: &str,
        limit: u32,
    ) -> Result<Vec<SubmissionData>, CoreError> {
        let target = subreddits.join("+");
        let endpoint = format!("/r/{}/search", target);
        let limit_str = limit.to_string();
        let params = [
            ("q", keyword),
            ("sort", "relevance"),
            ("restrict_sr", "on"),
            ("limit", limit_str.as_str()),
            ("raw_json", "1"),
        ];

        let response = self.make_request(&endpoint, &params).await?;
        let listing: Listing<SubmissionData> = response.json().await.map_err(|e| {
            error!("Failed to parse search results: {}", e);
            CoreError::RedditApi(RedditApiError::InvalidResponse {
                details: format!("Failed to parse search results for '{}'", keyword),
            })
        })?;

        info!(
            "Retrieved {} search results for '{}' across {}",
            listing.data.children.len(),
            keyword,
            target
        );
        Ok(listing.data.children.into_iter().map(|c| c.data).collect())
    }

    #[cfg(test)]
    pub(crate) fn user_agent(&self) -> &str {
        &self.credentials.user_agent
    }
}
