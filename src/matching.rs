//! Route parameter matching.
//!
//! Every entry the resolver creates carries the parameters of the route
//! pattern that matches its pathname. The resolver obtains them from a
//! [`RouteMatcher`]; this module provides the trait and two tables:
//!
//! - [`RouteTable`]: segment-based matching of `:param` and trailing `*rest`
//!   patterns, first registered pattern wins. Results are cached in an LRU
//!   when the `cache` feature is enabled.
//! - `MatchitTable` (feature `matchit`): the same pattern syntax compiled
//!   into a [`matchit`](https://docs.rs/matchit) radix tree, where the most
//!   specific pattern wins and a trailing wildcard never matches empty.
//!
//! # Design
//!
//! - Split paths by '/' into segments, ignoring empty ones
//! - Match literal segments exactly
//! - Extract `:param` segments into [`RouteParams`]
//! - A final `*name` segment captures the rest of the path (may be empty)

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, MatchCache};
use crate::error::NavigationError;
use crate::params::RouteParams;
use crate::{debug_log, trace_log};

/// Supplier of route parameters for a pathname.
pub trait RouteMatcher: Send {
    /// Parameters of the pattern matching `pathname`; empty when nothing
    /// matches.
    fn match_params(&mut self, pathname: &str) -> RouteParams;
}

/// Matcher that never captures anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoParams;

impl RouteMatcher for NoParams {
    fn match_params(&mut self, _pathname: &str) -> RouteParams {
        RouteParams::new()
    }
}

impl<F> RouteMatcher for F
where
    F: FnMut(&str) -> RouteParams + Send,
{
    fn match_params(&mut self, pathname: &str) -> RouteParams {
        self(pathname)
    }
}

/// A matched pattern and the parameters it captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub pattern: String,
    pub params: RouteParams,
}

/// Match `path` against a single `pattern`.
///
/// # Examples
///
/// ```
/// use tab_navigator::matching::match_pattern;
///
/// let params = match_pattern("/users/123/posts/9", "/users/:id/posts/:post").unwrap();
/// assert_eq!(params.get("id"), Some(&"123".to_string()));
/// assert_eq!(params.get("post"), Some(&"9".to_string()));
///
/// let params = match_pattern("/files/a/b.txt", "/files/*path").unwrap();
/// assert_eq!(params.get("path"), Some(&"a/b.txt".to_string()));
///
/// assert!(match_pattern("/users", "/users/:id").is_none());
/// ```
pub fn match_pattern(path: &str, pattern: &str) -> Option<RouteParams> {
    let path_segments = split_path(path);
    let pattern_segments = split_path(pattern);

    let wildcard = pattern_segments
        .last()
        .and_then(|last| wildcard_name(last).map(|name| (pattern_segments.len() - 1, name)));
    let fixed_len = wildcard.map_or(pattern_segments.len(), |(index, _)| index);

    // Early exit on segment count
    if wildcard.is_none() && path_segments.len() != fixed_len {
        return None;
    }
    if path_segments.len() < fixed_len {
        return None;
    }

    let mut params = RouteParams::new();
    for (pattern_seg, path_seg) in pattern_segments[..fixed_len].iter().zip(&path_segments) {
        if let Some(name) = extract_param_name(pattern_seg) {
            params.insert(name.to_string(), (*path_seg).to_string());
        } else if pattern_seg != path_seg {
            return None;
        }
    }

    if let Some((_, name)) = wildcard {
        if !name.is_empty() {
            params.insert(name.to_string(), path_segments[fixed_len..].join("/"));
        }
    }

    Some(params)
}

/// Split a path into segments, filtering empty segments
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Extract parameter name from a route segment
///
/// ```
/// use tab_navigator::matching::extract_param_name;
///
/// assert_eq!(extract_param_name(":id"), Some("id"));
/// assert_eq!(extract_param_name("users"), None);
/// ```
pub fn extract_param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix(':')
}

fn wildcard_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('*')
}

fn validate_pattern(pattern: &str) -> Result<(), NavigationError> {
    let segments = split_path(pattern);
    for (index, segment) in segments.iter().enumerate() {
        if extract_param_name(segment) == Some("") {
            return Err(NavigationError::InvalidPattern {
                pattern: pattern.to_string(),
                message: "parameter segment without a name".to_string(),
            });
        }
        if wildcard_name(segment).is_some() && index + 1 != segments.len() {
            return Err(NavigationError::InvalidPattern {
                pattern: pattern.to_string(),
                message: "wildcard must be the last segment".to_string(),
            });
        }
    }
    Ok(())
}

// ============================================================================
// RouteTable
// ============================================================================

/// Ordered list of route patterns; the first match wins.
///
/// # Example
///
/// ```
/// use tab_navigator::matching::{RouteMatcher, RouteTable};
///
/// let mut table = RouteTable::new()
///     .route("/tabs/:tab")
///     .unwrap()
///     .route("/tabs/:tab/items/:id")
///     .unwrap();
///
/// let params = table.match_params("/tabs/home/items/7");
/// assert_eq!(params.get("tab"), Some(&"home".to_string()));
/// assert_eq!(params.get_as::<u32>("id"), Some(7));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    patterns: Vec<String>,
    #[cfg(feature = "cache")]
    cache: MatchCache,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern (builder style).
    pub fn route(mut self, pattern: impl Into<String>) -> Result<Self, NavigationError> {
        self.add_route(pattern)?;
        Ok(self)
    }

    /// Register a pattern.
    pub fn add_route(&mut self, pattern: impl Into<String>) -> Result<(), NavigationError> {
        let pattern = pattern.into();
        validate_pattern(&pattern)?;
        debug_log!("Registered route pattern '{}'", pattern);
        self.patterns.push(pattern);
        #[cfg(feature = "cache")]
        self.cache.clear();
        Ok(())
    }

    /// Registered patterns in registration order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Find the first pattern matching `pathname`.
    pub fn find(&mut self, pathname: &str) -> Option<PatternMatch> {
        #[cfg(feature = "cache")]
        if let Some(cached) = self.cache.get(pathname) {
            return cached;
        }

        let found = self.patterns.iter().find_map(|pattern| {
            match_pattern(pathname, pattern).map(|params| PatternMatch {
                pattern: pattern.clone(),
                params,
            })
        });
        trace_log!(
            "Matched '{}' -> {:?}",
            pathname,
            found.as_ref().map(|m| m.pattern.as_str())
        );

        #[cfg(feature = "cache")]
        self.cache.insert(pathname.to_string(), found.clone());
        found
    }

    /// Cache statistics.
    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> &CacheStats {
        self.cache.stats()
    }
}

impl RouteMatcher for RouteTable {
    fn match_params(&mut self, pathname: &str) -> RouteParams {
        self.find(pathname).map(|m| m.params).unwrap_or_default()
    }
}

// ============================================================================
// MatchitTable
// ============================================================================

/// Route patterns compiled into a `matchit` radix tree.
///
/// Accepts the same `:param` / `*rest` syntax as [`RouteTable`], with two
/// differences:
///
/// - a static segment always beats a parameter, regardless of registration
///   order;
/// - a trailing `*rest` must capture at least one segment, so `/files/*path`
///   does not match `/files`. Register the bare prefix separately if it
///   should resolve.
#[cfg(feature = "matchit")]
#[derive(Default)]
pub struct MatchitTable {
    router: matchit::Router<String>,
}

#[cfg(feature = "matchit")]
impl MatchitTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern (builder style).
    pub fn route(mut self, pattern: &str) -> Result<Self, NavigationError> {
        self.add_route(pattern)?;
        Ok(self)
    }

    /// Register a pattern.
    pub fn add_route(&mut self, pattern: &str) -> Result<(), NavigationError> {
        validate_pattern(pattern)?;
        let converted = to_matchit_syntax(pattern);
        self.router
            .insert(converted, pattern.to_string())
            .map_err(|err| NavigationError::InvalidPattern {
                pattern: pattern.to_string(),
                message: err.to_string(),
            })
    }

    /// Find the pattern matching `pathname`.
    pub fn find(&self, pathname: &str) -> Option<PatternMatch> {
        let normalized = format!("/{}", split_path(pathname).join("/"));
        let matched = self.router.at(&normalized).ok()?;
        let params = matched
            .params
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Some(PatternMatch {
            pattern: matched.value.clone(),
            params,
        })
    }
}

#[cfg(feature = "matchit")]
impl RouteMatcher for MatchitTable {
    fn match_params(&mut self, pathname: &str) -> RouteParams {
        self.find(pathname).map(|m| m.params).unwrap_or_default()
    }
}

/// Rewrite `/users/:id/*rest` as `/users/{id}/{*rest}`.
#[cfg(feature = "matchit")]
fn to_matchit_syntax(pattern: &str) -> String {
    let segments: Vec<String> = split_path(pattern)
        .into_iter()
        .map(|segment| {
            if let Some(name) = extract_param_name(segment) {
                format!("{{{}}}", name)
            } else if let Some(name) = wildcard_name(segment) {
                format!("{{*{}}}", name)
            } else {
                segment.to_string()
            }
        })
        .collect();
    format!("/{}", segments.join("/"))
}
