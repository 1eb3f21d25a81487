//! News filter store - classification buckets and badge counts

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::News;

/// Classification bucket selected for the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    #[default]
    All,
    Trusted,
    Fake,
}

impl FilterKind {
    /// Label for presentation and logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Trusted => "trusted",
            Self::Fake => "fake",
        }
    }
}

/// Badge counts over the full collection
///
/// `trusted + fake` can be less than `all`: an item with comments and a
/// tied vote belongs to neither bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NewsCounts {
    pub all: usize,
    pub trusted: usize,
    pub fake: usize,
}

struct FilterState {
    active_filter: FilterKind,
    all_news: Vec<News>,
}

/// Holds the listing collection and the selected bucket
///
/// Both `filtered_news` and `counts` are derived on every read from the
/// domain predicates, never cached, so the list and the badges cannot
/// disagree.
pub struct NewsFilterStore {
    state: RwLock<FilterState>,
}

impl NewsFilterStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(FilterState {
                active_filter: FilterKind::default(),
                all_news: Vec::new(),
            }),
        }
    }

    pub fn set_filter(&self, filter: FilterKind) {
        self.write_state().active_filter = filter;
    }

    pub fn active_filter(&self) -> FilterKind {
        self.read_state().active_filter
    }

    /// Replace the collection wholesale. Listings are never merged.
    pub fn set_news(&self, news: Vec<News>) {
        self.write_state().all_news = news;
    }

    pub fn all_news(&self) -> Vec<News> {
        self.read_state().all_news.clone()
    }

    /// The active bucket, newest first
    ///
    /// Sorting is stable with no secondary key: items sharing a report
    /// date keep their collection order.
    pub fn filtered_news(&self) -> Vec<News> {
        let state = self.read_state();
        let mut items: Vec<News> = state
            .all_news
            .iter()
            .filter(|news| match state.active_filter {
                FilterKind::All => true,
                FilterKind::Trusted => news.is_trusted(),
                FilterKind::Fake => news.is_fake(),
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| b.report_date.cmp(&a.report_date));
        items
    }

    /// Badge counts over the full collection, independent of the active
    /// filter, using the same per-item predicates as `filtered_news`
    pub fn counts(&self) -> NewsCounts {
        let state = self.read_state();
        NewsCounts {
            all: state.all_news.len(),
            trusted: state.all_news.iter().filter(|n| n.is_trusted()).count(),
            fake: state.all_news.iter().filter(|n| n.is_fake()).count(),
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, FilterState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, FilterState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for NewsFilterStore {
    fn default() -> Self {
        Self::new()
    }
}
