//! Factline Core - client core for a crowd-moderated news service
//!
//! This crate implements the client-side core following hexagonal
//! architecture:
//!
//! - **domain**: news, comments, votes, users, and the trusted/fake
//!   classification predicates
//! - **ports**: trait definitions for external dependencies
//!   (NewsGateway, SessionVault)
//! - **stores**: session, current item, and filter/classification state
//! - **navigation**: route table, data-staging guards, cancellation
//! - **adapters**: concrete implementations (reqwest gateway, file
//!   vault, in-process demo server)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod history;
pub mod navigation;
pub mod ports;
pub mod stores;

#[cfg(test)]
pub(crate) mod testutil;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::{DemoConfig, DemoServer, FileVault, HttpGateway};
use config::Config;
use history::{EntryPoint, HistoryLog};
use navigation::Navigator;
use ports::{NewsGateway, SessionVault};
use stores::{CurrentNewsStore, NewsFilterStore, SessionStore};

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{
    Comment, CommentAuthor, CommentDraft, News, NewsDraft, Registration, Role, User, Vote,
};
pub use navigation::{ListingFilter, NavOutcome, ProgressSink, Route};
pub use stores::{FilterKind, NewsCounts};

/// Main context for Factline operations
///
/// The composition root: owns configuration, the gateway, the stores,
/// the history log, and the navigator. A front end constructs one
/// context and hands the Arc-shared pieces to whoever owns the views.
pub struct FactlineContext {
    pub config: Config,
    pub gateway: Arc<dyn NewsGateway>,
    pub vault: Arc<dyn SessionVault>,
    pub session: Arc<SessionStore>,
    pub current_news: Arc<CurrentNewsStore>,
    pub news_filter: Arc<NewsFilterStore>,
    pub history: Arc<HistoryLog>,
    pub navigator: Arc<Navigator>,
    // Kept alive for the life of the context; dropping it stops the server
    demo_server: Option<DemoServer>,
}

impl FactlineContext {
    /// Create a new context rooted at the profile directory
    pub fn new(factline_dir: &Path, entry_point: EntryPoint) -> Result<Self> {
        let config = Config::load(factline_dir)?;

        // Demo mode serves the API from inside this process
        let (demo_server, base_url) = if config.demo_mode {
            let server = DemoServer::start(DemoConfig::default())?;
            let base_url = server.base_url();
            (Some(server), base_url)
        } else {
            (None, config.api_base_url.clone())
        };

        let vault: Arc<dyn SessionVault> = Arc::new(FileVault::new(factline_dir));
        let gateway: Arc<dyn NewsGateway> = Arc::new(HttpGateway::new(&base_url, vault.clone())?);
        let history = Arc::new(HistoryLog::new(
            factline_dir,
            entry_point,
            env!("CARGO_PKG_VERSION"),
        )?);

        let session = Arc::new(SessionStore::new(gateway.clone(), vault.clone()));
        let current_news = Arc::new(CurrentNewsStore::new());
        let news_filter = Arc::new(NewsFilterStore::new());

        // The vault is read once, here; afterwards the session store is
        // the authority and writes through
        if let Some(persisted) = vault.load()? {
            session.restore(&persisted.access_token, persisted.user);
        }

        let navigator = Arc::new(Navigator::new(
            gateway.clone(),
            session.clone(),
            current_news.clone(),
            news_filter.clone(),
            history.clone(),
        ));

        Ok(Self {
            config,
            gateway,
            vault,
            session,
            current_news,
            news_filter,
            history,
            navigator,
            demo_server,
        })
    }

    /// Install a progress indicator for navigations
    pub fn with_progress(self, sink: Arc<dyn ProgressSink>) -> Self {
        self.navigator.set_progress(sink);
        self
    }

    /// Whether the API is served by the in-process demo server
    pub fn is_demo(&self) -> bool {
        self.demo_server.is_some()
    }
}
