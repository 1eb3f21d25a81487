//! News and comment domain model
//!
//! A news item carries the full set of reader comments, each casting a
//! mandatory Real or Fake vote. Classification (trusted / fake) is derived
//! from the vote tally here and nowhere else, so filtering and badge counts
//! can never disagree.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A reader's verdict on a news item. There is no neutral value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vote {
    Real,
    Fake,
}

impl Vote {
    /// Wire and display spelling of the verdict
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Real => "Real",
            Self::Fake => "Fake",
        }
    }
}

/// Author of a comment
///
/// The backend has served two shapes over time: a structured reference to
/// a registered user, and a bare display-name string. Both still appear in
/// stored data, so both parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentAuthor {
    User {
        id: i64,
        firstname: String,
        lastname: String,
    },
    Name(String),
}

impl CommentAuthor {
    /// Display name for presentation
    pub fn display_name(&self) -> String {
        match self {
            Self::User {
                firstname, lastname, ..
            } => format!("{} {}", firstname, lastname),
            Self::Name(name) => name.clone(),
        }
    }
}

/// A vote-carrying comment on a news item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub user: CommentAuthor,
    pub vote: Vote,
    pub comment: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub image_url: Vec<String>,
}

/// A news item as served by the backend
///
/// `comments` and `image_url` deserialize absent or null to empty, so a
/// loaded item never holds a null collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: i64,
    pub topic: String,
    pub short_detail: String,
    pub full_detail: String,
    pub reporter: String,
    pub report_date: NaiveDate,
    #[serde(default, deserialize_with = "null_to_default")]
    pub image_url: Vec<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub comments: Vec<Comment>,
}

/// Aggregated vote counts for one news item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteTally {
    pub real: usize,
    pub fake: usize,
}

impl News {
    /// Count Real and Fake votes across all comments
    pub fn vote_tally(&self) -> VoteTally {
        let mut tally = VoteTally::default();
        for comment in &self.comments {
            match comment.vote {
                Vote::Real => tally.real += 1,
                Vote::Fake => tally.fake += 1,
            }
        }
        tally
    }

    /// Trusted: strictly more Real than Fake votes. An item with no votes
    /// at all is provisionally trusted until challenged.
    pub fn is_trusted(&self) -> bool {
        let tally = self.vote_tally();
        if tally.real == 0 && tally.fake == 0 {
            return true;
        }
        tally.real > tally.fake
    }

    /// Fake: strictly more Fake than Real votes. Ties and unvoted items
    /// are never fake.
    pub fn is_fake(&self) -> bool {
        let tally = self.vote_tally();
        tally.fake > tally.real
    }
}

/// Fields for submitting a new news item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDraft {
    pub topic: String,
    pub short_detail: String,
    pub full_detail: String,
    pub reporter: String,
    pub report_date: NaiveDate,
    #[serde(default)]
    pub image_url: Vec<String>,
}

impl NewsDraft {
    /// Validate draft data before submission
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.topic.trim().is_empty() {
            return Err("topic cannot be empty");
        }
        if self.short_detail.trim().is_empty() {
            return Err("short detail cannot be empty");
        }
        if self.full_detail.trim().is_empty() {
            return Err("full detail cannot be empty");
        }
        Ok(())
    }
}

/// Fields for posting a vote-carrying comment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDraft {
    pub user: CommentAuthor,
    pub vote: Vote,
    pub comment: String,
    #[serde(default)]
    pub image_url: Vec<String>,
}

impl CommentDraft {
    /// Validate draft data before submission
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.comment.trim().is_empty() {
            return Err("comment text cannot be empty");
        }
        Ok(())
    }
}

/// Deserialize a JSON null as the type's default value
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
