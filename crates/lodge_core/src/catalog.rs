//! Media metadata and lodging inventory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to an uploaded asset.
///
/// Media rows are referenced by blocks and suites but never deleted along
/// with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Primary key
    pub id: Uuid,
    /// Storage path or URL
    pub path: String,
    /// Alternative text
    pub alt: Option<String>,
    /// Upload timestamp
    pub created_at: DateTime<Utc>,
}

/// A lodging unit offered on the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    /// Primary key
    pub id: Uuid,
    /// Display name (unique)
    pub name: String,
    /// Maximum number of guests
    pub capacity: i32,
    /// Floor area in square metres
    pub area_m2: i32,
    /// Nightly price in whole currency units
    pub price: i32,
    /// Marketing description
    pub description: String,
    /// Media ids, in display order
    pub images: Vec<Uuid>,
}

/// A suite with its image ids resolved to media rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteWithMedia {
    /// The suite
    #[serde(flatten)]
    pub suite: Suite,
    /// Resolved media, in the suite's image order
    pub media: Vec<Media>,
}

impl SuiteWithMedia {
    /// Resolve a suite's image ids against a media list.
    ///
    /// Ids without a matching media row are dropped.
    pub fn resolve(suite: Suite, media: &[Media]) -> Self {
        let resolved = suite
            .images
            .iter()
            .filter_map(|id| media.iter().find(|m| m.id == *id).cloned())
            .collect();
        Self {
            suite,
            media: resolved,
        }
    }
}

/// A guest quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Primary key
    pub id: Uuid,
    /// Guest name
    pub author: String,
    /// Guest home town
    pub city: Option<String>,
    /// Star rating, 1 to 5
    pub rating: i16,
    /// The quote
    pub quote: String,
    /// Shown on the home page strip
    pub is_featured: bool,
}

impl Testimonial {
    /// Lowest accepted rating.
    pub const MIN_RATING: i16 = 1;
    /// Highest accepted rating.
    pub const MAX_RATING: i16 = 5;

    /// Whether the rating lies within 1..=5.
    pub fn has_valid_rating(&self) -> bool {
        (Self::MIN_RATING..=Self::MAX_RATING).contains(&self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(path: &str) -> Media {
        Media {
            id: Uuid::new_v4(),
            path: path.to_string(),
            alt: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn resolve_keeps_suite_order_and_drops_missing() {
        let a = media("/a.jpg");
        let b = media("/b.jpg");
        let suite = Suite {
            id: Uuid::new_v4(),
            name: "Canopy".to_string(),
            capacity: 2,
            area_m2: 38,
            price: 240,
            description: "Treetop suite".to_string(),
            images: vec![b.id, Uuid::new_v4(), a.id],
        };

        let resolved = SuiteWithMedia::resolve(suite, &[a.clone(), b.clone()]);
        assert_eq!(resolved.media, vec![b, a]);
    }
}
