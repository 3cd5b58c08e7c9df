use harvest_core::PostRecord;

use crate::models::SubmissionData;

/// Base host prepended to the relative permalink path the API returns.
pub const PERMALINK_BASE: &str = "https://www.reddit.com";

/// Body text is truncated to this many characters.
pub const EXCERPT_MAX_CHARS: usize = 500;

const DELETED_AUTHOR: &str = "[deleted]";

/// Flatten a submission into a [`PostRecord`]. Every field is extracted
/// defensively: missing or empty upstream values become None instead of
/// failing the record.
pub fn record_from_submission(
    submission: &SubmissionData,
    search_query: Option<&str>,
) -> PostRecord {
    PostRecord {
        title: non_empty(submission.title.as_deref()),
        score: submission.score,
        upvote_ratio: submission.upvote_ratio,
        num_comments: submission.num_comments,
        author: author_name(submission.author.as_deref()),
        subreddit: non_empty(submission.subreddit.as_deref()),
        url: non_empty(submission.url.as_deref()),
        permalink: absolute_permalink(submission.permalink.as_deref()),
        created_utc: epoch_seconds(submission.created_utc),
        is_self: submission.is_self,
        selftext: body_excerpt(submission.selftext.as_deref()),
        flair: non_empty(submission.link_flair_text.as_deref()),
        domain: non_empty(submission.domain.as_deref()),
        search_query: search_query.map(str::to_string),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Deleted accounts come through as `[deleted]` (or not at all).
fn author_name(author: Option<&str>) -> Option<String> {
    non_empty(author).filter(|name| name != DELETED_AUTHOR)
}

fn absolute_permalink(path: Option<&str>) -> Option<String> {
    non_empty(path).map(|p| format!("{}{}", PERMALINK_BASE, p))
}

/// First `EXCERPT_MAX_CHARS` characters of the body, None when empty.
fn body_excerpt(selftext: Option<&str>) -> Option<String> {
    non_empty(selftext).map(|text| text.chars().take(EXCERPT_MAX_CHARS).collect())
}

/// Cast to whole seconds only when a non-zero raw value exists.
fn epoch_seconds(created_utc: Option<f64>) -> Option<i64> {
    created_utc.filter(|v| *v != 0.0).map(|v| v as i64)
}
