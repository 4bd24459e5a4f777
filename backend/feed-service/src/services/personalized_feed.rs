//! Personalized feed assembly
//!
//! Strictly sequential read chain per request:
//! user -> recent interactions -> interacted notes -> candidates -> enrichment.
//! Nothing is cached between requests and nothing is written. Any failed read
//! aborts the whole build.

use std::collections::HashSet;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::FeedConfig;
use crate::db::Repositories;
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::FeedNote;
use crate::services::enrichment::enrich;
use crate::services::feed_ranking::{
    mine_history_keywords, parse_interests, rank_notes, KeywordSet,
};

pub struct PersonalizedFeedService {
    repos: Repositories,
    settings: FeedConfig,
}

/// Signals gathered for one user before candidate retrieval
struct UserSignals {
    keywords: KeywordSet,
    seen: HashSet<i64>,
}

impl PersonalizedFeedService {
    pub fn new(repos: Repositories, settings: FeedConfig) -> Self {
        Self { repos, settings }
    }

    pub async fn build_feed(&self, user_id: Uuid) -> Result<Vec<FeedNote>> {
        let signals = match self.collect_signals(user_id).await {
            Ok(signals) => signals,
            Err(e) => {
                metrics::record_feed_request("unknown", "error");
                return Err(e);
            }
        };

        let mode = if signals.keywords.is_empty() {
            "cold_start"
        } else {
            "ranked"
        };

        match self.rank_and_enrich(user_id, signals).await {
            Ok(feed) => {
                metrics::record_feed_request(mode, "success");
                info!(
                    "Personalized feed built for user {} (mode={}, notes={})",
                    user_id,
                    mode,
                    feed.len()
                );
                Ok(feed)
            }
            Err(e) => {
                metrics::record_feed_request(mode, "error");
                Err(e)
            }
        }
    }

    async fn collect_signals(&self, user_id: Uuid) -> Result<UserSignals> {
        let user = self
            .repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))?;

        let interests = parse_interests(user.interests.as_deref());

        let interactions = self
            .repos
            .interactions
            .recent_for_user(user_id, self.settings.history_limit)
            .await?;

        let mut seen = HashSet::new();
        let seen_ids: Vec<i64> = interactions
            .iter()
            .map(|i| i.post_id)
            .filter(|id| seen.insert(*id))
            .collect();

        let mined = if seen_ids.is_empty() {
            Vec::new()
        } else {
            let interacted = self.repos.notes.find_by_ids(&seen_ids).await?;
            if interacted.len() < seen_ids.len() {
                warn!(
                    "User {} interacted with {} notes that no longer exist",
                    user_id,
                    seen_ids.len() - interacted.len()
                );
            }
            mine_history_keywords(&interacted)
        };

        let keywords = KeywordSet::build(interests, mined);

        debug!(
            "Keyword set for user {}: {} keywords from {} interactions",
            user_id,
            keywords.len(),
            interactions.len()
        );

        Ok(UserSignals { keywords, seen })
    }

    async fn rank_and_enrich(&self, user_id: Uuid, signals: UserSignals) -> Result<Vec<FeedNote>> {
        let mut candidates = self
            .repos
            .notes
            .search_any(signals.keywords.as_slice())
            .await?;

        if self.settings.exclude_seen {
            candidates.retain(|n| !signals.seen.contains(&n.id));
        }

        metrics::observe_feed_ranking(signals.keywords.len(), candidates.len());

        let ranked = rank_notes(candidates, &signals.keywords);
        enrich(&self.repos, user_id, ranked).await
    }
}
