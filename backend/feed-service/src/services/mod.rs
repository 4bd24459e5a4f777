//! Service layer for the feed service
//!
//! - feed_ranking: pure keyword extraction and scoring
//! - personalized_feed: store lookups around the ranker
//! - enrichment: per-viewer flags and counts shared by feed and bookmarks

pub mod enrichment;
pub mod feed_ranking;
pub mod personalized_feed;

pub use feed_ranking::{rank_notes, KeywordSet};
pub use personalized_feed::PersonalizedFeedService;
