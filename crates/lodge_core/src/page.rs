//! Routable pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Layout template a page renders with.
///
/// Stored as a kebab-case string in the `pages.template` column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PageTemplate {
    /// Landing page with full-bleed hero
    Home,
    /// Suite listing
    Suites,
    /// Activities and experiences
    Experiences,
    /// Photo gallery
    Gallery,
    /// Contact and booking details
    Contact,
    /// Generic content page
    #[default]
    Standard,
}

impl PageTemplate {
    /// Template a page with this slug renders with when it has not been
    /// created in the store yet.
    ///
    /// # Examples
    ///
    /// ```
    /// use lodge_core::PageTemplate;
    ///
    /// assert_eq!(PageTemplate::default_for_slug("home"), PageTemplate::Home);
    /// assert_eq!(PageTemplate::default_for_slug("our-story"), PageTemplate::Standard);
    /// ```
    pub fn default_for_slug(slug: &str) -> Self {
        match slug.trim_matches('/') {
            "" | "home" | "index" => Self::Home,
            "suites" | "rooms" => Self::Suites,
            "experiences" | "activities" => Self::Experiences,
            "gallery" => Self::Gallery,
            "contact" => Self::Contact,
            _ => Self::Standard,
        }
    }

    /// Parse a stored template name, falling back to [`PageTemplate::Standard`].
    pub fn from_stored(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!(template = value, "Unknown page template, using standard");
            Self::Standard
        })
    }
}

/// A routable content page.
///
/// # Examples
///
/// ```
/// use lodge_core::{PageBuilder, PageTemplate};
///
/// let page = PageBuilder::default()
///     .slug("suites")
///     .name("Suites")
///     .template(PageTemplate::Suites)
///     .priority(2)
///     .build()
///     .unwrap();
///
/// assert_eq!(page.slug, "suites");
/// assert!(!page.is_placeholder());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct Page {
    /// Primary key
    #[builder(default = "Uuid::new_v4()")]
    pub id: Uuid,
    /// Unique URL identifier
    pub slug: String,
    /// Display name
    pub name: String,
    /// Layout template
    #[builder(default)]
    pub template: PageTemplate,
    /// Ordering weight; lower sorts first
    #[builder(default = "100")]
    pub priority: i32,
    /// Creation timestamp
    #[builder(default = "Utc::now()")]
    pub created_at: DateTime<Utc>,
}

impl Page {
    /// Minimal stand-in for a page that does not exist in the store.
    ///
    /// Placeholders carry the nil id, a name derived from the slug and the
    /// slug's default template, so rendering code never needs a missing-page
    /// branch.
    ///
    /// # Examples
    ///
    /// ```
    /// use lodge_core::{Page, PageTemplate};
    ///
    /// let page = Page::placeholder("our-story");
    /// assert!(page.is_placeholder());
    /// assert_eq!(page.name, "Our Story");
    /// assert_eq!(page.template, PageTemplate::Standard);
    /// ```
    pub fn placeholder(slug: &str) -> Self {
        Self {
            id: Uuid::nil(),
            slug: slug.to_string(),
            name: humanize_slug(slug),
            template: PageTemplate::default_for_slug(slug),
            priority: i32::MAX,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// Whether this page was synthesized rather than loaded.
    pub fn is_placeholder(&self) -> bool {
        self.id.is_nil()
    }

    /// Site-relative path of the page; `home` maps to the root.
    pub fn path(&self) -> String {
        match PageTemplate::default_for_slug(&self.slug) {
            PageTemplate::Home => "/".to_string(),
            _ => format!("/{}", self.slug.trim_matches('/')),
        }
    }
}

fn humanize_slug(slug: &str) -> String {
    slug.split(['-', '_', '/'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_handles_separators() {
        assert_eq!(humanize_slug("eco-tours_and/more"), "Eco Tours And More");
        assert_eq!(humanize_slug(""), "");
    }

    #[test]
    fn home_slugs_map_to_root_path() {
        assert_eq!(Page::placeholder("home").path(), "/");
        assert_eq!(Page::placeholder("").path(), "/");
        assert_eq!(Page::placeholder("contact").path(), "/contact");
    }

    #[test]
    fn stored_template_falls_back_to_standard() {
        assert_eq!(PageTemplate::from_stored("gallery"), PageTemplate::Gallery);
        assert_eq!(PageTemplate::from_stored("landing-v2"), PageTemplate::Standard);
    }
}
