//! Shared test doubles
//!
//! An in-memory vault and a programmable gateway fake, used by the store
//! and navigation unit tests. HTTP-level behavior is covered separately
//! against the demo server.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Notify;

use crate::domain::result::{Error, Result};
use crate::domain::{
    AuthSession, Comment, CommentAuthor, CommentDraft, News, NewsDraft, Registration, Role, User,
    Vote,
};
use crate::ports::{NewsGateway, PersistedSession, SessionVault};

pub(crate) fn sample_user(id: i64) -> User {
    User {
        id,
        firstname: "Ada".to_string(),
        lastname: "Chan".to_string(),
        email: format!("ada{}@example.com", id),
        image: "https://img.example/ada.png".to_string(),
        roles: vec![Role::Member, Role::Reader],
    }
}

pub(crate) fn sample_news(id: i64, date: NaiveDate, votes: &[Vote]) -> News {
    let comments = votes
        .iter()
        .enumerate()
        .map(|(i, vote)| Comment {
            id: id * 100 + i as i64,
            user: CommentAuthor::Name(format!("reader{}", i)),
            vote: *vote,
            comment: "checked the sources".to_string(),
            image_url: vec![],
        })
        .collect();
    News {
        id,
        topic: format!("Story {}", id),
        short_detail: format!("Short detail {}", id),
        full_detail: format!("Full detail {}", id),
        reporter: "Reporter".to_string(),
        report_date: date,
        image_url: vec![],
        comments,
    }
}

// =============================================================================
// MemoryVault
// =============================================================================

/// In-memory SessionVault
#[derive(Default)]
pub(crate) struct MemoryVault {
    session: Mutex<Option<PersistedSession>>,
    fail_store: AtomicBool,
}

impl MemoryVault {
    /// Pre-load a token with a stub profile
    pub(crate) fn set_token(&self, token: &str) {
        let session = PersistedSession {
            access_token: token.to_string(),
            user: sample_user(1),
        };
        *self.session.lock().unwrap() = Some(session);
    }

    /// Make every subsequent `store` fail
    pub(crate) fn set_fail_store(&self, fail: bool) {
        self.fail_store.store(fail, Ordering::SeqCst);
    }
}

impl SessionVault for MemoryVault {
    fn load(&self) -> Result<Option<PersistedSession>> {
        Ok(self.session.lock().unwrap().clone())
    }

    fn store(&self, access_token: &str, user: &User) -> Result<()> {
        if self.fail_store.load(Ordering::SeqCst) {
            return Err(Error::storage("vault write failed"));
        }
        *self.session.lock().unwrap() = Some(PersistedSession {
            access_token: access_token.to_string(),
            user: user.clone(),
        });
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}

// =============================================================================
// MockGateway
// =============================================================================

/// Failure injected into a mock call. Fresh errors are built per call
/// since `Error` is not `Clone`.
#[derive(Debug, Clone, Copy)]
pub(crate) enum MockFailure {
    NotFound,
    Network,
    Unauthorized,
}

impl MockFailure {
    fn into_error(self, resource: &str) -> Error {
        match self {
            Self::NotFound => Error::not_found(resource),
            Self::Network => Error::network("mock network failure"),
            Self::Unauthorized => Error::unauthorized("mock rejection"),
        }
    }
}

/// Programmable NewsGateway fake backed by an in-memory item list
#[derive(Default)]
pub(crate) struct MockGateway {
    pub(crate) news: Mutex<Vec<News>>,
    pub(crate) fail_list: Mutex<Option<MockFailure>>,
    pub(crate) fail_detail: Mutex<Option<MockFailure>>,
    pub(crate) fail_auth: AtomicBool,
    pub(crate) list_calls: AtomicUsize,
    pub(crate) detail_calls: AtomicUsize,
    /// One-shot gate: when set, the next `get_news` call signals
    /// `list_started` and then parks until the gate is notified or the
    /// call future is dropped.
    pub(crate) list_gate: Mutex<Option<Arc<Notify>>>,
    pub(crate) list_started: Arc<Notify>,
    pub(crate) registered: Mutex<Vec<Registration>>,
}

impl MockGateway {
    pub(crate) fn with_news(items: Vec<News>) -> Self {
        Self {
            news: Mutex::new(items),
            ..Default::default()
        }
    }

    pub(crate) fn set_fail_list(&self, failure: MockFailure) {
        *self.fail_list.lock().unwrap() = Some(failure);
    }

    pub(crate) fn set_fail_detail(&self, failure: MockFailure) {
        *self.fail_detail.lock().unwrap() = Some(failure);
    }

    /// Arm the one-shot listing gate and return the handle that releases it
    pub(crate) fn hold_next_list(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.list_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    fn next_comment_id(news: &[News]) -> i64 {
        news.iter()
            .flat_map(|n| n.comments.iter())
            .map(|c| c.id)
            .max()
            .unwrap_or(0)
            + 1
    }
}

#[async_trait]
impl NewsGateway for MockGateway {
    async fn get_news(&self, limit: Option<u32>, _page: Option<u32>) -> Result<Vec<News>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.list_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            self.list_started.notify_one();
            gate.notified().await;
        }
        if let Some(failure) = *self.fail_list.lock().unwrap() {
            return Err(failure.into_error("news"));
        }
        let news = self.news.lock().unwrap();
        match limit {
            Some(limit) => Ok(news.iter().take(limit as usize).cloned().collect()),
            None => Ok(news.clone()),
        }
    }

    async fn get_news_by_id(&self, id: i64) -> Result<News> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = *self.fail_detail.lock().unwrap() {
            return Err(failure.into_error("news"));
        }
        self.news
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("news"))
    }

    async fn save_news(&self, draft: &NewsDraft) -> Result<News> {
        let mut news = self.news.lock().unwrap();
        let item = News {
            id: news.iter().map(|n| n.id).max().unwrap_or(0) + 1,
            topic: draft.topic.clone(),
            short_detail: draft.short_detail.clone(),
            full_detail: draft.full_detail.clone(),
            reporter: draft.reporter.clone(),
            report_date: draft.report_date,
            image_url: draft.image_url.clone(),
            comments: vec![],
        };
        news.push(item.clone());
        Ok(item)
    }

    async fn delete_news(&self, id: i64) -> Result<()> {
        let mut news = self.news.lock().unwrap();
        let before = news.len();
        news.retain(|n| n.id != id);
        if news.len() < before {
            Ok(())
        } else {
            Err(Error::not_found("news"))
        }
    }

    async fn save_comment(&self, news_id: i64, draft: &CommentDraft) -> Result<Comment> {
        let mut news = self.news.lock().unwrap();
        let comment_id = Self::next_comment_id(&news);
        let item = news
            .iter_mut()
            .find(|n| n.id == news_id)
            .ok_or_else(|| Error::not_found("news"))?;
        let comment = Comment {
            id: comment_id,
            user: draft.user.clone(),
            vote: draft.vote,
            comment: draft.comment.clone(),
            image_url: draft.image_url.clone(),
        };
        item.comments.push(comment.clone());
        Ok(comment)
    }

    async fn delete_comment(&self, id: i64) -> Result<()> {
        let mut news = self.news.lock().unwrap();
        for item in news.iter_mut() {
            let before = item.comments.len();
            item.comments.retain(|c| c.id != id);
            if item.comments.len() < before {
                return Ok(());
            }
        }
        Err(Error::not_found("comment"))
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        Ok(vec![sample_user(1), sample_user(2)])
    }

    async fn promote_to_member(&self, user_id: i64) -> Result<User> {
        let mut user = sample_user(user_id);
        if !user.roles.contains(&Role::Member) {
            user.roles.push(Role::Member);
        }
        Ok(user)
    }

    async fn demote_to_reader(&self, user_id: i64) -> Result<User> {
        let mut user = sample_user(user_id);
        user.roles = vec![Role::Reader];
        Ok(user)
    }

    async fn authenticate(&self, email: &str, _password: &str) -> Result<AuthSession> {
        if self.fail_auth.load(Ordering::SeqCst) {
            return Err(Error::unauthorized("invalid email or password"));
        }
        let mut user = sample_user(1);
        user.email = email.to_string();
        Ok(AuthSession {
            access_token: "mock-token".to_string(),
            user,
        })
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        self.registered.lock().unwrap().push(registration.clone());
        Ok(())
    }
}
