//! Cache key scheme.

use std::fmt;

/// Kind of query result held in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Resource {
    /// The page list
    Pages,
    /// A page joined with all its blocks, by slug
    PageContent,
    /// The published blocks of a page, by slug
    PublishedBlocks,
    /// Suites with resolved media
    Suites,
    /// Testimonials; scope distinguishes featured-only
    Testimonials,
    /// The media library
    Media,
}

/// Key of a cached query: a resource plus an optional scope.
///
/// Renders as `resource` or `resource:scope`, e.g. `published-blocks:home`.
///
/// # Examples
///
/// ```
/// use lodge_cache::{QueryKey, Resource};
///
/// assert_eq!(QueryKey::scoped(Resource::PublishedBlocks, "home").to_string(), "published-blocks:home");
/// assert_eq!(QueryKey::global(Resource::Pages).to_string(), "pages");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: Resource,
    scope: Option<String>,
}

impl QueryKey {
    /// Key for a resource that has a single instance.
    pub fn global(resource: Resource) -> Self {
        Self {
            resource,
            scope: None,
        }
    }

    /// Key for one instance of a resource.
    pub fn scoped(resource: Resource, scope: impl Into<String>) -> Self {
        Self {
            resource,
            scope: Some(scope.into()),
        }
    }

    /// The resource part.
    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// The scope part, if any.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{}:{}", self.resource, scope),
            None => write!(f, "{}", self.resource),
        }
    }
}
