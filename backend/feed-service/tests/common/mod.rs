//! In-memory stand-in for the managed backend used by integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use opennotes_feed::config::FeedConfig;
use opennotes_feed::db::{
    BookmarkRepository, CommentRepository, InteractionRepository, NoteRepository, Repositories,
    UserRepository,
};
use opennotes_feed::models::{
    BookmarkToggle, Comment, CommentAuthor, CommentWithAuthor, Interaction, InteractionType,
    NewTextNote, NewUser, Note, User,
};
use opennotes_feed::{AppError, AppState, Result};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    notes: Vec<Note>,
    interactions: Vec<Interaction>,
    bookmarks: Vec<(Uuid, i64)>,
    comments: Vec<Comment>,
}

#[derive(Default)]
pub struct InMemoryBackend {
    tables: Mutex<Tables>,
    notes_down: AtomicBool,
    clock: Mutex<i64>,
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

impl InMemoryBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            users: self.clone(),
            interactions: self.clone(),
            notes: self.clone(),
            bookmarks: self.clone(),
            comments: self.clone(),
        }
    }

    pub fn state(self: &Arc<Self>, feed: FeedConfig) -> AppState {
        AppState::new(self.repositories(), feed)
    }

    /// Make every note-store call fail as if the backend were unreachable
    pub fn take_notes_offline(&self) {
        self.notes_down.store(true, Ordering::SeqCst);
    }

    fn next_tick(&self) -> DateTime<Utc> {
        let mut clock = self.clock.lock().unwrap();
        *clock += 1;
        base_time() + Duration::seconds(*clock)
    }

    pub fn add_user(&self, interests: Option<&str>) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.lock().unwrap().users.push(User {
            id,
            name: Some(format!("user-{}", &id.to_string()[..8])),
            email: None,
            interests: interests.map(str::to_string),
            avatar_url: None,
        });
        id
    }

    /// Insert a note created `age_hours` before [`base_time`]
    pub fn add_note(&self, id: i64, tags: &str, title: &str, description: &str, age_hours: i64) {
        self.tables.lock().unwrap().notes.push(Note {
            id,
            name: None,
            url: None,
            title: title.to_string(),
            description: description.to_string(),
            tags: tags.to_string(),
            note_type: "text".to_string(),
            parent_post_id: None,
            created_at: base_time() - Duration::hours(age_hours),
        });
    }

    pub fn add_attachment(&self, id: i64, parent: i64, title: &str, age_hours: i64) {
        self.tables.lock().unwrap().notes.push(Note {
            id,
            name: Some(format!("{title}.pdf")),
            url: Some(format!("https://storage.example.com/uploads/{id}.pdf")),
            title: title.to_string(),
            description: "attachment".to_string(),
            tags: String::new(),
            note_type: "file".to_string(),
            parent_post_id: Some(parent),
            created_at: base_time() - Duration::hours(age_hours),
        });
    }

    pub fn add_interaction(&self, user_id: Uuid, post_id: i64, kind: InteractionType) {
        let created_at = self.next_tick();
        self.tables.lock().unwrap().interactions.push(Interaction {
            user_id,
            post_id,
            interaction_type: kind,
            created_at,
        });
    }

    pub fn add_bookmark(&self, user_id: Uuid, note_id: i64) {
        self.tables.lock().unwrap().bookmarks.push((user_id, note_id));
    }

    pub fn add_comment(&self, user_id: Uuid, post_id: i64, text: &str) {
        let created_at = self.next_tick();
        let mut tables = self.tables.lock().unwrap();
        let id = tables.comments.len() as i64 + 1;
        tables.comments.push(Comment {
            id,
            user_id,
            post_id,
            comment_text: text.to_string(),
            created_at,
        });
    }

    pub fn interaction_count(&self) -> usize {
        self.tables.lock().unwrap().interactions.len()
    }

    fn check_notes(&self) -> Result<()> {
        if self.notes_down.load(Ordering::SeqCst) {
            return Err(AppError::UpstreamUnavailable(
                "note store unreachable".to_string(),
            ));
        }
        Ok(())
    }
}

fn newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

fn count_by(ids: impl Iterator<Item = i64>, wanted: &[i64]) -> HashMap<i64, i64> {
    let mut counts = HashMap::new();
    for id in ids.filter(|id| wanted.contains(id)) {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

#[async_trait]
impl UserRepository for InMemoryBackend {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        let created = User {
            id: Uuid::new_v4(),
            name: Some(user.name),
            email: Some(user.email),
            interests: user.interests,
            avatar_url: None,
        };
        self.tables.lock().unwrap().users.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl InteractionRepository for InMemoryBackend {
    async fn recent_for_user(&self, user_id: Uuid, limit: i64) -> Result<Vec<Interaction>> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Interaction> = tables
            .interactions
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn liked_post_ids(&self, user_id: Uuid, post_ids: &[i64]) -> Result<Vec<i64>> {
        let tables = self.tables.lock().unwrap();
        let mut liked: Vec<i64> = tables
            .interactions
            .iter()
            .filter(|i| {
                i.user_id == user_id
                    && i.interaction_type == InteractionType::Like
                    && post_ids.contains(&i.post_id)
            })
            .map(|i| i.post_id)
            .collect();
        liked.dedup();
        Ok(liked)
    }

    async fn record(
        &self,
        user_id: Uuid,
        post_id: i64,
        interaction_type: InteractionType,
    ) -> Result<()> {
        self.add_interaction(user_id, post_id, interaction_type);
        Ok(())
    }
}

#[async_trait]
impl NoteRepository for InMemoryBackend {
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Note>> {
        self.check_notes()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .notes
            .iter()
            .filter(|n| ids.contains(&n.id))
            .cloned()
            .collect())
    }

    async fn search_any(&self, keywords: &[String]) -> Result<Vec<Note>> {
        self.check_notes()?;
        let tables = self.tables.lock().unwrap();
        let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        let mut matches: Vec<Note> = tables
            .notes
            .iter()
            .filter(|n| {
                lowered.is_empty()
                    || lowered.iter().any(|k| {
                        [&n.tags, &n.title, &n.description]
                            .iter()
                            .any(|field| field.to_lowercase().contains(k.as_str()))
                    })
            })
            .cloned()
            .collect();
        newest_first(&mut matches);
        Ok(matches)
    }

    async fn list_attachments(&self, parent_post_id: i64) -> Result<Vec<Note>> {
        self.check_notes()?;
        let tables = self.tables.lock().unwrap();
        let mut attachments: Vec<Note> = tables
            .notes
            .iter()
            .filter(|n| n.parent_post_id == Some(parent_post_id))
            .cloned()
            .collect();
        newest_first(&mut attachments);
        Ok(attachments)
    }

    async fn create_text_note(&self, note: NewTextNote) -> Result<Note> {
        self.check_notes()?;
        let created_at = self.next_tick();
        let mut tables = self.tables.lock().unwrap();
        let id = tables.notes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        let created = Note {
            id,
            name: None,
            url: None,
            title: note.title,
            description: note.description,
            tags: String::new(),
            note_type: "text".to_string(),
            parent_post_id: None,
            created_at,
        };
        tables.notes.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl BookmarkRepository for InMemoryBackend {
    async fn bookmarked_post_ids(&self, user_id: Uuid, post_ids: &[i64]) -> Result<Vec<i64>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .bookmarks
            .iter()
            .filter(|(u, n)| *u == user_id && post_ids.contains(n))
            .map(|(_, n)| *n)
            .collect())
    }

    async fn count_by_note(&self, post_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        let tables = self.tables.lock().unwrap();
        Ok(count_by(tables.bookmarks.iter().map(|(_, n)| *n), post_ids))
    }

    async fn toggle(&self, user_id: Uuid, note_id: i64) -> Result<BookmarkToggle> {
        if self.remove(user_id, note_id).await? {
            return Ok(BookmarkToggle::Removed);
        }
        self.add_bookmark(user_id, note_id);
        Ok(BookmarkToggle::Added)
    }

    async fn remove(&self, user_id: Uuid, note_id: i64) -> Result<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.bookmarks.len();
        tables
            .bookmarks
            .retain(|(u, n)| !(*u == user_id && *n == note_id));
        Ok(tables.bookmarks.len() < before)
    }

    async fn list_notes_for_user(&self, user_id: Uuid) -> Result<Vec<Note>> {
        self.check_notes()?;
        let tables = self.tables.lock().unwrap();
        let mut notes: Vec<Note> = tables
            .bookmarks
            .iter()
            .filter(|(u, _)| *u == user_id)
            .filter_map(|(_, id)| tables.notes.iter().find(|n| n.id == *id).cloned())
            .collect();
        newest_first(&mut notes);
        Ok(notes)
    }
}

#[async_trait]
impl CommentRepository for InMemoryBackend {
    async fn count_by_note(&self, post_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        let tables = self.tables.lock().unwrap();
        Ok(count_by(tables.comments.iter().map(|c| c.post_id), post_ids))
    }

    async fn create(&self, user_id: Uuid, post_id: i64, comment_text: String) -> Result<Comment> {
        self.add_comment(user_id, post_id, &comment_text);
        let tables = self.tables.lock().unwrap();
        Ok(tables.comments.last().cloned().expect("comment just inserted"))
    }

    async fn list_for_note(&self, post_id: i64) -> Result<Vec<CommentWithAuthor>> {
        let tables = self.tables.lock().unwrap();
        let mut comments: Vec<CommentWithAuthor> = tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .map(|c| CommentWithAuthor {
                comment: c.clone(),
                user: tables
                    .users
                    .iter()
                    .find(|u| u.id == c.user_id)
                    .map(|u| CommentAuthor {
                        id: u.id,
                        name: u.name.clone(),
                        avatar_url: u.avatar_url.clone(),
                    }),
            })
            .collect();
        comments.sort_by(|a, b| b.comment.created_at.cmp(&a.comment.created_at));
        Ok(comments)
    }
}
