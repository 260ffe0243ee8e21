//! Version range queries
//!
//! A small query language for selecting artifact versions:
//!
//! | Query | Meaning |
//! |---|---|
//! | `*` | any version |
//! | `1.2.3` | exactly this version string |
//! | `1.2.3-2.1.0` | inclusive numeric range |
//! | `~1.2.0` | same major.minor, patch ≥ 0 |
//! | `^1.2.0` | same major, minor.patch ≥ 2.0 |
//!
//! Any version or bound may carry a git-tag style leading `v`. Components are compared
//! numerically, never lexically, and missing components default to zero.

mod version_spec;
mod version_triple;

pub use version_spec::{VersionParseError, VersionSpec, match_versions};
pub use version_triple::{VersionTriple, strip_tag_prefix};
