//! News backend HTTP client
//!
//! Handles communication with the news API for listings, comments, user
//! administration and authentication. The bearer token is read from the
//! session vault at request time, so a login in one part of the app is
//! picked up here without rebuilding the client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::{AuthSession, Comment, CommentDraft, News, NewsDraft, Registration, User};
use crate::ports::{NewsGateway, SessionVault};

/// Request timeout for all backend calls
const REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Wire models (where the wire shape differs from the domain)
// =============================================================================

#[derive(Debug, Serialize)]
struct AuthenticateRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthenticateResponse {
    access_token: String,
    user: User,
}

/// Reference to the news item a comment belongs to
#[derive(Debug, Serialize)]
struct NewsRef {
    id: i64,
}

/// Comment POST body: the draft fields plus the owning news reference
#[derive(Debug, Serialize)]
struct CommentPayload<'a> {
    #[serde(flatten)]
    draft: &'a CommentDraft,
    news: NewsRef,
}

// =============================================================================
// HTTP gateway
// =============================================================================

/// News backend client
pub struct HttpGateway {
    client: Client,
    base_url: String,
    vault: Arc<dyn SessionVault>,
}

impl HttpGateway {
    /// Create a new gateway against the given base URL.
    ///
    /// The vault supplies the bearer token for privileged requests; an
    /// empty vault simply sends unauthenticated requests.
    pub fn new(base_url: &str, vault: Arc<dyn SessionVault>) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid API base URL '{}': {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            vault,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the current bearer token, if any. The token is read from the
    /// vault at call time, never cached on the client.
    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.vault.access_token() {
            Some(token) if !token.is_empty() => request.bearer_auth(token),
            _ => request,
        }
    }

    /// Map request errors to user-facing messages
    fn map_request_error(error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::network(format!(
                "connection timed out after {} seconds",
                REQUEST_TIMEOUT_SECS
            ))
        } else if error.is_connect() {
            Error::network("unable to connect to the news backend")
        } else {
            Error::network(format!("request failed: {}", error))
        }
    }

    /// Check response status and return appropriate errors.
    /// `resource` names what was asked for and becomes the NotFound payload.
    fn check_response_status(response: &reqwest::Response, resource: &str) -> Result<()> {
        match response.status().as_u16() {
            200..=299 => Ok(()),
            401 | 403 => Err(Error::unauthorized(format!(
                "the backend rejected the {} request",
                resource
            ))),
            404 => Err(Error::not_found(resource)),
            status => Err(Error::network(format!(
                "{} request failed: HTTP {}",
                resource, status
            ))),
        }
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| Error::network(format!("failed to parse {} response: {}", resource, e)))
    }
}

#[async_trait]
impl NewsGateway for HttpGateway {
    async fn get_news(&self, limit: Option<u32>, page: Option<u32>) -> Result<Vec<News>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(limit) = limit {
            query.push(("_limit", limit.to_string()));
        }
        if let Some(page) = page {
            query.push(("_page", page.to_string()));
        }

        let response = self
            .client
            .get(self.url("/news"))
            .query(&query)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::check_response_status(&response, "news")?;
        Self::parse_json(response, "news").await
    }

    async fn get_news_by_id(&self, id: i64) -> Result<News> {
        let response = self
            .client
            .get(self.url(&format!("/news/{}", id)))
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::check_response_status(&response, "news")?;
        Self::parse_json(response, "news").await
    }

    async fn save_news(&self, draft: &NewsDraft) -> Result<News> {
        draft.validate().map_err(Error::validation)?;

        let response = self
            .client
            .post(self.url("/news"))
            .json(draft)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::check_response_status(&response, "news")?;
        Self::parse_json(response, "news").await
    }

    async fn delete_news(&self, id: i64) -> Result<()> {
        let response = self
            .with_auth(self.client.delete(self.url(&format!("/news/{}", id))))
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::check_response_status(&response, "news")
    }

    async fn save_comment(&self, news_id: i64, draft: &CommentDraft) -> Result<Comment> {
        draft.validate().map_err(Error::validation)?;

        let payload = CommentPayload {
            draft,
            news: NewsRef { id: news_id },
        };

        let response = self
            .client
            .post(self.url("/comments"))
            .json(&payload)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::check_response_status(&response, "comment")?;
        Self::parse_json(response, "comment").await
    }

    async fn delete_comment(&self, id: i64) -> Result<()> {
        let response = self
            .with_auth(self.client.delete(self.url(&format!("/comments/{}", id))))
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::check_response_status(&response, "comment")
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        let response = self
            .with_auth(self.client.get(self.url("/users")))
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::check_response_status(&response, "users")?;
        Self::parse_json(response, "users").await
    }

    async fn promote_to_member(&self, user_id: i64) -> Result<User> {
        let response = self
            .with_auth(
                self.client
                    .put(self.url(&format!("/users/{}/promote-to-member", user_id))),
            )
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::check_response_status(&response, "user")?;
        Self::parse_json(response, "user").await
    }

    async fn demote_to_reader(&self, user_id: i64) -> Result<User> {
        let response = self
            .with_auth(
                self.client
                    .put(self.url(&format!("/users/{}/demote-to-reader", user_id))),
            )
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::check_response_status(&response, "user")?;
        Self::parse_json(response, "user").await
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthSession> {
        let response = self
            .client
            .post(self.url("/api/v1/auth/authenticate"))
            .json(&AuthenticateRequest { email, password })
            .send()
            .await
            .map_err(Self::map_request_error)?;

        if response.status().as_u16() == 401 || response.status().as_u16() == 403 {
            return Err(Error::unauthorized("invalid email or password"));
        }
        Self::check_response_status(&response, "authentication")?;

        let parsed: AuthenticateResponse = Self::parse_json(response, "authentication").await?;
        Ok(AuthSession {
            access_token: parsed.access_token,
            user: parsed.user,
        })
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        registration.validate().map_err(Error::validation)?;

        let response = self
            .client
            .post(self.url("/api/v1/auth/register"))
            .json(registration)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::check_response_status(&response, "registration")
    }
}
