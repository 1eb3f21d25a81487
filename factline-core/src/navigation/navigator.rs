//! Navigation guards
//!
//! Data staging happens here: a route is entered only after its guard has
//! fetched what the screen needs and put it in the right store. Screens
//! read stores; they never fetch.

use std::sync::{Arc, Mutex};

use crate::history::HistoryLog;
use crate::ports::NewsGateway;
use crate::stores::{CurrentNewsStore, NewsFilterStore, SessionStore};

use super::cancel::{CancelSource, CancelToken};
use super::route::{ListingFilter, Route};

/// Receives begin/end notifications around every navigation
pub trait ProgressSink: Send + Sync {
    fn start(&self);
    fn done(&self);
}

/// Default sink: no indication
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn start(&self) {}
    fn done(&self) {}
}

/// How a navigation concluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The requested route was entered
    Entered(Route),
    /// A guard sent the user elsewhere
    Redirected(Route),
    /// A newer navigation started before this one finished staging;
    /// no store was touched after the cutoff
    Superseded,
}

/// Runs the guard pipeline for each requested route
pub struct Navigator {
    gateway: Arc<dyn NewsGateway>,
    session: Arc<SessionStore>,
    current_news: Arc<CurrentNewsStore>,
    filter: Arc<NewsFilterStore>,
    history: Arc<HistoryLog>,
    progress: Mutex<Arc<dyn ProgressSink>>,
    active: Mutex<Option<CancelSource>>,
}

impl Navigator {
    pub fn new(
        gateway: Arc<dyn NewsGateway>,
        session: Arc<SessionStore>,
        current_news: Arc<CurrentNewsStore>,
        filter: Arc<NewsFilterStore>,
        history: Arc<HistoryLog>,
    ) -> Self {
        Self {
            gateway,
            session,
            current_news,
            filter,
            history,
            progress: Mutex::new(Arc::new(NoProgress)),
            active: Mutex::new(None),
        }
    }

    /// Install a progress indicator, replacing the default silent sink
    pub fn set_progress(&self, sink: Arc<dyn ProgressSink>) {
        *self.progress.lock().unwrap_or_else(|e| e.into_inner()) = sink;
    }

    /// Navigate to a route, running its guards
    ///
    /// Progress indication wraps the whole pipeline regardless of
    /// outcome, and every conclusion lands in the history log.
    pub async fn navigate(&self, route: Route) -> NavOutcome {
        let progress = self
            .progress
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        progress.start();
        let outcome = self.run_guards(&route).await;
        progress.done();
        self.record(&route, &outcome);
        outcome
    }

    async fn run_guards(&self, route: &Route) -> NavOutcome {
        let mut token = self.supersede_previous();

        // Synchronous gate, checked before any fetch is attempted
        if route.requires_auth() && !self.session.is_authenticated() {
            return NavOutcome::Redirected(Route::Login);
        }

        match route {
            Route::Listing { filter } => self.stage_listing(*filter, &mut token).await,
            Route::NewsDetail { id } | Route::NewsComment { id } | Route::NewsVote { id } => {
                self.stage_detail(route, *id, &mut token).await
            }
            other => NavOutcome::Entered(other.clone()),
        }
    }

    /// Cancel whatever navigation is still in flight and arm a token for
    /// this one
    fn supersede_previous(&self) -> CancelToken {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = active.take() {
            previous.cancel();
        }
        let (source, token) = CancelSource::new();
        *active = Some(source);
        token
    }

    async fn stage_listing(&self, filter: ListingFilter, token: &mut CancelToken) -> NavOutcome {
        self.filter.set_filter(filter.store_filter());

        let fetched = tokio::select! {
            biased;
            _ = token.cancelled() => return NavOutcome::Superseded,
            result = self.gateway.get_news(None, None) => result,
        };

        match fetched {
            Ok(news) => self.filter.set_news(news),
            Err(e) => {
                // Soft failure: enter with whatever is already staged
                let _ = self
                    .history
                    .log_error("listing_refresh_failed", &e.to_string(), None);
            }
        }
        NavOutcome::Entered(Route::Listing { filter })
    }

    async fn stage_detail(&self, route: &Route, id: i64, token: &mut CancelToken) -> NavOutcome {
        let fetched = tokio::select! {
            biased;
            _ = token.cancelled() => return NavOutcome::Superseded,
            result = self.gateway.get_news_by_id(id) => result,
        };

        match fetched {
            Ok(news) => {
                self.current_news.set_news(news);
                match route {
                    // The bare detail segment lands on its comments sub-route
                    Route::NewsDetail { id } => {
                        NavOutcome::Redirected(Route::NewsComment { id: *id })
                    }
                    other => NavOutcome::Entered(other.clone()),
                }
            }
            Err(e) if e.is_not_found() => NavOutcome::Redirected(Route::NotFoundResource {
                resource: "news".to_string(),
            }),
            Err(_) => NavOutcome::Redirected(Route::NetworkError),
        }
    }

    fn record(&self, requested: &Route, outcome: &NavOutcome) {
        // Log failures never block navigation
        let _ = match outcome {
            NavOutcome::Entered(_) => self
                .history
                .log_navigation("navigation_entered", &requested.path()),
            NavOutcome::Redirected(to) => self.history.log_navigation(
                "navigation_redirected",
                &format!("{} -> {}", requested.path(), to.path()),
            ),
            NavOutcome::Superseded => self
                .history
                .log_navigation("navigation_superseded", &requested.path()),
        };
    }
}
