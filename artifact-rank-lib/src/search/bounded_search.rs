use super::{RegexError, check_pattern};
use crate::facts::ArtifactFacts;
use core::time::Duration;
use futures_util::StreamExt;
use futures_util::stream;
use regex::{Regex, RegexBuilder};
use std::sync::Arc;
use tokio::task::spawn_blocking;

const LOG_TARGET: &str = "    search";

/// Resource limits applied to every search.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    pub max_pattern_length: usize,

    /// Upper bound on matching a single artifact; a candidate that runs over counts as a miss.
    pub candidate_timeout: Duration,

    /// How many candidates are matched at once.
    pub concurrency: usize,

    /// Upper bound, in bytes, on the compiled program.
    pub size_limit: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_pattern_length: 256,
            candidate_timeout: Duration::from_millis(250),
            concurrency: 8,
            size_limit: 1 << 20,
        }
    }
}

/// A vetted regular expression with a per-candidate time bound.
#[derive(Debug, Clone)]
pub struct BoundedRegex {
    regex: Regex,
    limits: SearchLimits,
}

impl BoundedRegex {
    /// Validate and compile `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError`] if the pattern is empty, too long, contains nested quantifiers,
    /// does not parse, or compiles to a program larger than [`SearchLimits::size_limit`].
    pub fn compile(pattern: &str, limits: &SearchLimits) -> Result<Self, RegexError> {
        check_pattern(pattern, limits.max_pattern_length)?;

        let regex = RegexBuilder::new(pattern)
            .size_limit(limits.size_limit)
            .dfa_size_limit(limits.size_limit)
            .build()
            .map_err(|e| match e {
                regex::Error::CompiledTooBig(_) => RegexError::TooLarge,
                other => RegexError::Invalid(other.to_string()),
            })?;

        Ok(Self {
            regex,
            limits: limits.clone(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the artifact's name, or failing that its README, matches.
    #[must_use]
    pub fn is_match(&self, facts: &ArtifactFacts) -> bool {
        self.regex.is_match(&facts.name) || self.regex.is_match(&facts.readme_text)
    }

    /// Return the artifacts in `corpus` that match, in their original order.
    pub async fn search(&self, corpus: Vec<Arc<ArtifactFacts>>) -> Vec<Arc<ArtifactFacts>> {
        let total = corpus.len();
        let timeout = self.limits.candidate_timeout;

        let matches: Vec<_> = stream::iter(corpus)
            .map(|facts| {
                let bounded = self.clone();
                async move {
                    let candidate = Arc::clone(&facts);
                    let outcome = tokio::time::timeout(timeout, spawn_blocking(move || bounded.is_match(&candidate))).await;

                    let matched = match outcome {
                        Ok(Ok(matched)) => matched,
                        Ok(Err(e)) => {
                            log::warn!(target: LOG_TARGET, "Matching '{}' failed: {e}", facts.id);
                            false
                        }
                        Err(_) => {
                            log::warn!(target: LOG_TARGET, "Matching '{}' timed out after {}ms", facts.id, timeout.as_millis());
                            false
                        }
                    };

                    matched.then_some(facts)
                }
            })
            .buffered(self.limits.concurrency.max(1))
            .filter_map(core::future::ready)
            .collect()
            .await;

        log::debug!(target: LOG_TARGET, "Pattern '{}' matched {} of {total} artifact(s)", self.as_str(), matches.len());
        matches
    }
}
