use std::time::{Duration, SystemTime};

use harvest_core::{CoreError, RedditApiError, RedditCredentials};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Refresh this long before the reported expiry to avoid using a token that
/// dies mid-request.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Application-only OAuth2 token (client_credentials grant). Script apps with
/// just an id/secret pair get read access this way; no browser flow involved.
#[derive(Debug, Clone)]
pub struct RedditToken {
    pub access_token: String,
    pub expires_at: SystemTime,
}

impl RedditToken {
    pub fn needs_refresh(&self) -> bool {
        match self.expires_at.duration_since(SystemTime::now()) {
            Ok(remaining) => remaining < EXPIRY_MARGIN,
            Err(_) => true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

pub async fn request_app_token(
    http_client: &Client,
    credentials: &RedditCredentials,
) -> Result<RedditToken, CoreError> {
    debug!("Requesting application-only access token");

    let response = http_client
        .post(TOKEN_URL)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .header("User-Agent", &credentials.user_agent)
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        error!("Token request failed with status {}", status);
        return Err(CoreError::RedditApi(RedditApiError::AuthenticationFailed {
            reason: format!("token endpoint returned {}", status),
        }));
    }

    let token: TokenResponse = response.json().await.map_err(|e| {
        error!("Failed to parse token response: {}", e);
        CoreError::RedditApi(RedditApiError::AuthenticationFailed {
            reason: "unparseable token response".to_string(),
        })
    })?;

    let expires_in = Duration::from_secs(token.expires_in.unwrap_or(3600));
    debug!("Obtained access token, valid for {:?}", expires_in);

    Ok(RedditToken {
        access_token: token.access_token,
        expires_at: SystemTime::now() + expires_in,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_does_not_need_refresh() {
        let token = RedditToken {
            access_token: "token".to_string(),
            expires_at: SystemTime::now() + Duration::from_secs(3600),
        };
        assert!(!token.needs_refresh());
    }

    #[test]
    fn test_expired_token_needs_refresh() {
        let token = RedditToken {
            access_token: "token".to_string(),
            expires_at: SystemTime::now() - Duration::from_secs(10),
        };
        assert!(token.needs_refresh());
    }

    #[test]
    fn test_token_within_margin_needs_refresh() {
        let token = RedditToken {
            access_token: "token".to_string(),
            expires_at: SystemTime::now() + Duration::from_secs(30),
        };
        assert!(token.needs_refresh());
    }
}
