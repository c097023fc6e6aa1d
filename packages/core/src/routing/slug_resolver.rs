//! Slug Resolution for Read Paths
//!
//! Turns an inbound path under the pages namespace into exactly one
//! [`PageIntent`]. Slugs may span several `/`-separated segments; the whole
//! remainder is one compound lookup key, never a traversal.
//!
//! # Priority
//!
//! Resolution walks an ordered table:
//!
//! 1. Empty remainder → [`PageIntent::ListAll`]
//! 2. Reserved literal routes, in table order (`id/<rest>` → [`PageIntent::GetById`])
//! 3. Catch-all slug capture → [`PageIntent::GetBySlug`]
//!
//! Reserved routes always win. A page whose slug starts with `id/` could never
//! be fetched by slug, so payload validation refuses such slugs up front (see
//! [`SlugResolver::is_addressable`]).
//!
//! # Examples
//!
//! ```rust
//! use pagecraft_core::routing::{PageIntent, SlugResolver};
//!
//! let resolver = SlugResolver::default();
//! assert_eq!(resolver.resolve("/api/pages"), PageIntent::ListAll);
//! assert_eq!(
//!     resolver.resolve("/api/pages/news/technology"),
//!     PageIntent::GetBySlug("news/technology".to_string())
//! );
//! ```

/// Namespace prefix the HTTP layer mounts page routes under
pub const PAGES_NAMESPACE: &str = "/api/pages";

/// The single operation a read path asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageIntent {
    ListAll,
    /// Identifier passed through untouched; format checks happen in the service
    GetById(String),
    /// Normalized compound slug
    GetBySlug(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReservedRoute {
    ById,
}

impl ReservedRoute {
    fn intent(self, rest: &str) -> PageIntent {
        match self {
            ReservedRoute::ById => PageIntent::GetById(rest.to_string()),
        }
    }
}

struct ReservedSegment {
    segment: &'static str,
    route: ReservedRoute,
}

/// Checked in order, before any slug capture
const RESERVED_ROUTES: &[ReservedSegment] = &[ReservedSegment {
    segment: "id",
    route: ReservedRoute::ById,
}];

/// Pure path → intent resolver for the pages namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugResolver {
    namespace: String,
}

impl Default for SlugResolver {
    fn default() -> Self {
        Self::new(PAGES_NAMESPACE)
    }
}

impl SlugResolver {
    /// Create a resolver for the given namespace prefix (trailing `/` ignored)
    pub fn new(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self {
            namespace: namespace.trim_end_matches('/').to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Resolve a full request path.
    ///
    /// Paths that do not start with the namespace are treated as already
    /// relative to it.
    pub fn resolve(&self, path: &str) -> PageIntent {
        self.resolve_remainder(self.strip_namespace(path))
    }

    /// Resolve the part of a path that follows `<namespace>/`
    pub fn resolve_remainder(&self, remainder: &str) -> PageIntent {
        if remainder.is_empty() {
            return PageIntent::ListAll;
        }

        for reserved in RESERVED_ROUTES {
            let rest = remainder
                .strip_prefix(reserved.segment)
                .and_then(|r| r.strip_prefix('/'));
            if let Some(rest) = rest.filter(|r| !r.is_empty()) {
                return reserved.route.intent(rest);
            }
        }

        let slug = remainder.strip_prefix('/').unwrap_or(remainder);
        if slug.is_empty() {
            PageIntent::ListAll
        } else {
            PageIntent::GetBySlug(slug.to_string())
        }
    }

    /// Whether a page stored under `slug` can be fetched back by slug.
    ///
    /// False for slugs a reserved route shadows (`id/<anything>`) and for
    /// slugs normalization would rewrite (a leading `/`).
    pub fn is_addressable(&self, slug: &str) -> bool {
        matches!(self.resolve_remainder(slug), PageIntent::GetBySlug(s) if s == slug)
    }

    fn strip_namespace<'a>(&self, path: &'a str) -> &'a str {
        match path.strip_prefix(self.namespace.as_str()) {
            Some("") => "",
            Some(rest) if rest.starts_with('/') => &rest[1..],
            _ => path.strip_prefix('/').unwrap_or(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(s: &str) -> PageIntent {
        PageIntent::GetBySlug(s.to_string())
    }

    #[test]
    fn namespace_root_lists_all() {
        let resolver = SlugResolver::default();
        assert_eq!(resolver.resolve("/api/pages"), PageIntent::ListAll);
        assert_eq!(resolver.resolve("/api/pages/"), PageIntent::ListAll);
    }

    #[test]
    fn multi_segment_slug_is_one_compound_key() {
        let resolver = SlugResolver::default();
        assert_eq!(resolver.resolve("/api/pages/news/technology"), slug("news/technology"));
        assert_eq!(resolver.resolve("/api/pages/a/b/c-d/e"), slug("a/b/c-d/e"));
        assert_eq!(resolver.resolve("/api/pages/home"), slug("home"));
    }

    #[test]
    fn id_route_takes_priority_over_slug_capture() {
        let resolver = SlugResolver::default();
        assert_eq!(
            resolver.resolve("/api/pages/id/550e8400-e29b-41d4-a716-446655440000"),
            PageIntent::GetById("550e8400-e29b-41d4-a716-446655440000".to_string())
        );
        // Remainder goes through untouched, even when it is not an id
        assert_eq!(
            resolver.resolve("/api/pages/id/not/an/id"),
            PageIntent::GetById("not/an/id".to_string())
        );
    }

    #[test]
    fn bare_reserved_segment_is_a_slug() {
        let resolver = SlugResolver::default();
        assert_eq!(resolver.resolve("/api/pages/id"), slug("id"));
        assert_eq!(resolver.resolve("/api/pages/id/"), slug("id/"));
        assert_eq!(resolver.resolve("/api/pages/identity"), slug("identity"));
        assert_eq!(resolver.resolve("/api/pages/ideas/id/x"), slug("ideas/id/x"));
    }

    #[test]
    fn single_leading_slash_is_stripped() {
        let resolver = SlugResolver::default();
        assert_eq!(resolver.resolve("/api/pages//news"), slug("news"));
        assert_eq!(resolver.resolve("/api/pages///news"), slug("/news"));
        assert_eq!(resolver.resolve("/api/pages//"), PageIntent::ListAll);
    }

    #[test]
    fn nonsense_is_still_a_candidate_slug() {
        let resolver = SlugResolver::default();
        assert_eq!(resolver.resolve("/api/pages/%%%/???"), slug("%%%/???"));
    }

    #[test]
    fn custom_namespace_and_relative_paths() {
        let resolver = SlugResolver::new("/pages/");
        assert_eq!(resolver.namespace(), "/pages");
        assert_eq!(resolver.resolve("/pages"), PageIntent::ListAll);
        assert_eq!(resolver.resolve("/pages/news/technology"), slug("news/technology"));
        assert_eq!(resolver.resolve("news/technology"), slug("news/technology"));
        // Only a whole-segment prefix counts as the namespace
        assert_eq!(resolver.resolve("/pagesx/home"), slug("pagesx/home"));
    }

    #[test]
    fn addressable_slugs() {
        let resolver = SlugResolver::default();
        assert!(resolver.is_addressable("home"));
        assert!(resolver.is_addressable("news/technology"));
        assert!(resolver.is_addressable("id"));
        assert!(resolver.is_addressable("ideas"));
        assert!(!resolver.is_addressable("id/123"));
        assert!(!resolver.is_addressable("/news"));
        assert!(!resolver.is_addressable("/"));
    }
}
