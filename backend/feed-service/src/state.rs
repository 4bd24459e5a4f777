use std::sync::Arc;

use crate::config::FeedConfig;
use crate::db::Repositories;
use crate::services::PersonalizedFeedService;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub feed: Arc<PersonalizedFeedService>,
}

impl AppState {
    pub fn new(repos: Repositories, feed_config: FeedConfig) -> Self {
        let feed = Arc::new(PersonalizedFeedService::new(repos.clone(), feed_config));
        Self { repos, feed }
    }
}
