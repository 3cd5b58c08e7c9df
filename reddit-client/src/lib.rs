pub mod api;
pub mod auth;
pub mod extract;
pub mod models;


pub use api::RedditClient;
pub use auth::RedditToken;
pub use extract::{record_from_submission, EXCERPT_MAX_CHARS, PERMALINK_BASE};
pub use models::{Listing, ListingData, SubmissionData, Thing};
