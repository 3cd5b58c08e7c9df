use serde::{Deserialize, Serialize};

/// Standard Reddit listing envelope: `{"kind": "Listing", "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing<T> {
    #[serde(default)]
    pub kind: String,
    pub data: ListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingData<T> {
    pub children: Vec<Thing<T>>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub dist: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thing<T> {
    #[serde(default)]
    pub kind: String,
    pub data: T,
}

/// Submission payload. Everything is optional so that a sparse or truncated
/// object from the API still deserializes; the extraction layer decides what
/// missing fields mean.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionData {
    pub id: Option<String>,
    pub title: Option<String>,
    pub score: Option<i64>,
    pub upvote_ratio: Option<f64>,
    pub num_comments: Option<i64>,
    pub author: Option<String>,
    pub subreddit: Option<String>,
    pub url: Option<String>,
    pub permalink: Option<String>,
    pub created_utc: Option<f64>,
    pub is_self: Option<bool>,
    pub selftext: Option<String>,
    pub link_flair_text: Option<String>,
    pub domain: Option<String>,
}
