//! Regular-expression search over the registry
//!
//! Patterns are vetted by [`check_pattern`] before they reach the `regex` crate: empty and
//! overlong patterns and nested quantifiers are refused outright, and the compiled program is
//! capped in size. Matching then runs per candidate on a blocking thread under a timeout, so
//! one expensive README cannot stall a search.

mod bounded_search;
mod pattern_guard;

pub use bounded_search::{BoundedRegex, SearchLimits};
pub use pattern_guard::{RegexError, check_pattern};
