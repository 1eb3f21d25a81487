//! Current news store - the single staged item

use std::sync::{RwLock, RwLockWriteGuard};

use crate::domain::{Comment, News};

/// Holds the news item staged for the detail view
///
/// The detail-route guard fills this slot before the view is entered;
/// comment and vote views read from it. One slot, no history.
#[derive(Default)]
pub struct CurrentNewsStore {
    slot: RwLock<Option<News>>,
}

impl CurrentNewsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an item, replacing whatever was held
    pub fn set_news(&self, news: News) {
        *self.write_slot() = Some(news);
    }

    /// Empty the slot
    pub fn clear(&self) {
        *self.write_slot() = None;
    }

    /// The staged item, if any
    pub fn news(&self) -> Option<News> {
        self.slot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Append a comment to the staged item. With no item staged this is
    /// a silent no-op, not an error.
    pub fn add_comment(&self, comment: Comment) {
        if let Some(news) = self.write_slot().as_mut() {
            news.comments.push(comment);
        }
    }

    fn write_slot(&self) -> RwLockWriteGuard<'_, Option<News>> {
        self.slot.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommentAuthor, Vote};
    use crate::testutil::sample_news;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    fn comment(id: i64) -> Comment {
        Comment {
            id,
            user: CommentAuthor::Name("somchai".to_string()),
            vote: Vote::Real,
            comment: "saw it myself".to_string(),
            image_url: vec![],
        }
    }

    #[test]
    fn test_set_read_clear() {
        let store = CurrentNewsStore::new();
        assert!(store.news().is_none());

        store.set_news(sample_news(1, date(), &[]));
        assert_eq!(store.news().unwrap().id, 1);

        store.set_news(sample_news(2, date(), &[]));
        assert_eq!(store.news().unwrap().id, 2);

        store.clear();
        assert!(store.news().is_none());
    }

    #[test]
    fn test_add_comment_appends_to_staged_item() {
        let store = CurrentNewsStore::new();
        store.set_news(sample_news(1, date(), &[Vote::Real]));

        store.add_comment(comment(50));

        let news = store.news().unwrap();
        assert_eq!(news.comments.len(), 2);
        assert_eq!(news.comments.last().unwrap().id, 50);
    }

    #[test]
    fn test_add_comment_with_empty_slot_is_a_no_op() {
        let store = CurrentNewsStore::new();
        store.add_comment(comment(50));
        assert!(store.news().is_none());
    }
}
