//! News gateway port - remote backend abstraction

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{AuthSession, Comment, CommentDraft, News, NewsDraft, Registration, User};

/// Remote news backend abstraction
///
/// This trait defines every backend operation the client consumes.
/// Implementations (adapters) own the transport; callers never see HTTP
/// details, only domain values and domain errors. The gateway attaches
/// whatever credentials the session currently holds - authorization
/// decisions belong to the backend.
#[async_trait]
pub trait NewsGateway: Send + Sync {
    // === News ===

    /// List news items. `limit` and `page` are forwarded when set;
    /// the backend returns its default window otherwise.
    async fn get_news(&self, limit: Option<u32>, page: Option<u32>) -> Result<Vec<News>>;

    /// Fetch one news item with its comments.
    /// A missing id surfaces as `Error::NotFound`.
    async fn get_news_by_id(&self, id: i64) -> Result<News>;

    /// Submit a new news item, returning it with its assigned id
    async fn save_news(&self, draft: &NewsDraft) -> Result<News>;

    /// Delete a news item (privileged)
    async fn delete_news(&self, id: i64) -> Result<()>;

    // === Comments ===

    /// Post a vote-carrying comment on a news item, returning the stored
    /// comment with its assigned id
    async fn save_comment(&self, news_id: i64, draft: &CommentDraft) -> Result<Comment>;

    /// Delete a comment (privileged)
    async fn delete_comment(&self, id: i64) -> Result<()>;

    // === Users ===

    /// List all registered users (privileged)
    async fn get_all_users(&self) -> Result<Vec<User>>;

    /// Grant the member role, returning the updated user (privileged)
    async fn promote_to_member(&self, user_id: i64) -> Result<User>;

    /// Revoke down to the reader role, returning the updated user (privileged)
    async fn demote_to_reader(&self, user_id: i64) -> Result<User>;

    // === Auth ===

    /// Exchange credentials for a token and the user profile
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthSession>;

    /// Create a new account. Does not log in.
    async fn register(&self, registration: &Registration) -> Result<()>;
}
