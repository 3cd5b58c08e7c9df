use serde::{Deserialize, Serialize};

/// Column names of the output table, in the exact order they are written.
pub const REQUIRED_COLUMNS: [&str; 14] = [
    "title",
    "score",
    "upvote_ratio",
    "num_comments",
    "author",
    "subreddit",
    "url",
    "permalink",
    "created_utc",
    "is_self",
    "selftext",
    "flair",
    "domain",
    "search_query",
];

/// One flattened submission. Every field is nullable; a missing or empty
/// upstream attribute is carried as None all the way to the output file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub title: Option<String>,
    pub score: Option<i64>,
    pub upvote_ratio: Option<f64>,
    pub num_comments: Option<i64>,
    pub author: Option<String>,
    pub subreddit: Option<String>,
    pub url: Option<String>,
    /// Absolute URL, already prefixed with the reddit.com base. Dedup key.
    pub permalink: Option<String>,
    pub created_utc: Option<i64>,
    pub is_self: Option<bool>,
    /// First 500 characters of the body text.
    pub selftext: Option<String>,
    pub flair: Option<String>,
    pub domain: Option<String>,
    /// Keyword this record was retrieved with; None for listing results.
    pub search_query: Option<String>,
}
