//! Route table
//!
//! One definition of every addressable screen, with path parsing and
//! rendering and the auth requirement per route. Guards and the CLI both
//! resolve against this table.

use crate::stores::FilterKind;

/// Listing bucket addressed in a path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFilter {
    All,
    Trusted,
    Fake,
    Unvoted,
}

impl ListingFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Trusted => "trusted",
            Self::Fake => "fake",
            Self::Unvoted => "unvoted",
        }
    }

    /// The store bucket backing this listing
    ///
    /// The filter store defines three buckets; the unvoted listing is a
    /// presentation of the unfiltered collection.
    pub fn store_filter(&self) -> FilterKind {
        match self {
            Self::Trusted => FilterKind::Trusted,
            Self::Fake => FilterKind::Fake,
            Self::All | Self::Unvoted => FilterKind::All,
        }
    }

    pub fn parse(segment: &str) -> Option<Self> {
        match segment {
            "all" => Some(Self::All),
            "trusted" => Some(Self::Trusted),
            "fake" => Some(Self::Fake),
            "unvoted" => Some(Self::Unvoted),
            _ => None,
        }
    }
}

/// An addressable screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Home and the `/news/{bucket}` listings
    Listing { filter: ListingFilter },
    /// `/news/{id}`. Never entered directly: the guard stages the item
    /// and redirects to the comments sub-route.
    NewsDetail { id: i64 },
    /// `/news/{id}/comments`
    NewsComment { id: i64 },
    /// `/news/{id}/vote`
    NewsVote { id: i64 },
    Login,
    Register,
    Profile,
    SubmitNews,
    UserManagement,
    History,
    /// `/404/{resource}` - a named resource the backend does not have
    NotFoundResource { resource: String },
    NetworkError,
    /// Catch-all for unknown paths
    NotFound,
}

impl Route {
    /// Resolve a path. Unknown paths resolve to the catch-all `NotFound`
    /// route; parsing never fails.
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Route::Listing {
                filter: ListingFilter::All,
            };
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        match segments.as_slice() {
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["profile"] => Route::Profile,
            ["submit-news"] => Route::SubmitNews,
            ["admin", "users"] => Route::UserManagement,
            ["admin", "history"] => Route::History,
            ["network-error"] => Route::NetworkError,
            ["404", resource] => Route::NotFoundResource {
                resource: resource.to_string(),
            },
            ["news", segment] => match ListingFilter::parse(segment) {
                Some(filter) => Route::Listing { filter },
                None => match segment.parse::<i64>() {
                    Ok(id) => Route::NewsDetail { id },
                    Err(_) => Route::NotFound,
                },
            },
            ["news", id, "comments"] => match id.parse::<i64>() {
                Ok(id) => Route::NewsComment { id },
                Err(_) => Route::NotFound,
            },
            ["news", id, "vote"] => match id.parse::<i64>() {
                Ok(id) => Route::NewsVote { id },
                Err(_) => Route::NotFound,
            },
            _ => Route::NotFound,
        }
    }

    /// Canonical path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Listing {
                filter: ListingFilter::All,
            } => "/".to_string(),
            Route::Listing { filter } => format!("/news/{}", filter.as_str()),
            Route::NewsDetail { id } => format!("/news/{}", id),
            Route::NewsComment { id } => format!("/news/{}/comments", id),
            Route::NewsVote { id } => format!("/news/{}/vote", id),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::SubmitNews => "/submit-news".to_string(),
            Route::UserManagement => "/admin/users".to_string(),
            Route::History => "/admin/history".to_string(),
            Route::NotFoundResource { resource } => format!("/404/{}", resource),
            Route::NetworkError => "/network-error".to_string(),
            Route::NotFound => "/not-found".to_string(),
        }
    }

    /// Whether entering requires an authenticated session
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Listing { .. }
                | Route::Profile
                | Route::SubmitNews
                | Route::UserManagement
                | Route::History
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_the_unfiltered_listing() {
        assert_eq!(
            Route::parse("/"),
            Route::Listing {
                filter: ListingFilter::All
            }
        );
        assert_eq!(Route::parse(""), Route::parse("/"));
    }

    #[test]
    fn test_listing_keywords_beat_numeric_ids() {
        assert_eq!(
            Route::parse("/news/trusted"),
            Route::Listing {
                filter: ListingFilter::Trusted
            }
        );
        assert_eq!(
            Route::parse("/news/fake"),
            Route::Listing {
                filter: ListingFilter::Fake
            }
        );
        assert_eq!(Route::parse("/news/42"), Route::NewsDetail { id: 42 });
        assert_eq!(Route::parse("/news/outbreak"), Route::NotFound);
    }

    #[test]
    fn test_nested_detail_routes() {
        assert_eq!(
            Route::parse("/news/7/comments"),
            Route::NewsComment { id: 7 }
        );
        assert_eq!(Route::parse("/news/7/vote"), Route::NewsVote { id: 7 });
        assert_eq!(Route::parse("/news/x/vote"), Route::NotFound);
    }

    #[test]
    fn test_fixed_routes_round_trip() {
        let routes = [
            Route::Login,
            Route::Register,
            Route::Profile,
            Route::SubmitNews,
            Route::UserManagement,
            Route::History,
            Route::NetworkError,
            Route::NotFoundResource {
                resource: "news".to_string(),
            },
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_unknown_paths_fall_through() {
        assert_eq!(Route::parse("/no/such/screen"), Route::NotFound);
        assert_eq!(Route::parse("/adminusers"), Route::NotFound);
    }

    #[test]
    fn test_auth_requirements() {
        assert!(Route::parse("/").requires_auth());
        assert!(Route::parse("/news/trusted").requires_auth());
        assert!(Route::parse("/profile").requires_auth());
        assert!(Route::parse("/submit-news").requires_auth());
        assert!(Route::parse("/admin/users").requires_auth());
        assert!(Route::parse("/admin/history").requires_auth());

        assert!(!Route::parse("/news/42").requires_auth());
        assert!(!Route::parse("/news/42/comments").requires_auth());
        assert!(!Route::parse("/news/42/vote").requires_auth());
        assert!(!Route::parse("/login").requires_auth());
        assert!(!Route::parse("/register").requires_auth());
        assert!(!Route::parse("/network-error").requires_auth());
        assert!(!Route::parse("/404/news").requires_auth());
    }

    #[test]
    fn test_unvoted_listing_maps_to_the_unfiltered_bucket() {
        assert_eq!(ListingFilter::Unvoted.store_filter(), FilterKind::All);
        assert_eq!(ListingFilter::Trusted.store_filter(), FilterKind::Trusted);
    }
}
