//! Small, allocation-light helpers for reading signals out of README text.

/// A markdown section: its lowercased heading and the text up to the next heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub heading: String,
    pub body: Vec<&'a str>,
}

/// Split README text into markdown sections. Text before the first heading is dropped.
pub fn sections(readme: &str) -> Vec<Section<'_>> {
    let mut result: Vec<Section<'_>> = Vec::new();
    let mut in_fence = false;

    for line in readme.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
        }

        if !in_fence && trimmed.starts_with('#') {
            let heading = trimmed.trim_start_matches('#').trim().to_lowercase();
            result.push(Section { heading, body: Vec::new() });
        } else if let Some(current) = result.last_mut() {
            current.body.push(line);
        }
    }

    result
}

/// Whether any section heading contains one of `needles`.
pub fn has_section(readme: &str, needles: &[&str]) -> bool {
    sections(readme).iter().any(|s| needles.iter().any(|n| s.heading.contains(n)))
}

/// Body text of the first section whose heading contains `needle`.
pub fn section_text(readme: &str, needle: &str) -> Option<String> {
    sections(readme)
        .into_iter()
        .find(|s| s.heading.contains(needle))
        .map(|s| s.body.join("\n"))
}

pub fn has_code_block(readme: &str) -> bool {
    readme.lines().any(|line| line.trim_start().starts_with("```"))
}

/// Whether the README contains a markdown table with at least one numeric cell.
pub fn has_numeric_table(readme: &str) -> bool {
    readme.lines().map(str::trim).filter(|line| line.starts_with('|')).any(|line| {
        line.split('|')
            .map(|cell| cell.trim().trim_end_matches('%'))
            .any(|cell| !cell.is_empty() && cell.parse::<f64>().is_ok())
    })
}

/// Number of distinct `keywords` that occur in `text`, ignoring case.
pub fn keyword_hits(text: &str, keywords: &[&str]) -> usize {
    let lower = text.to_lowercase();
    keywords.iter().filter(|k| lower.contains(*k)).count()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `hits / needed`, capped at one.
#[expect(clippy::cast_precision_loss, reason = "small counts")]
pub fn fraction(hits: usize, needed: usize) -> f64 {
    if needed == 0 {
        return 1.0;
    }

    (hits as f64 / needed as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const README: &str = "intro text\n# Model Card\nabout\n## Installation\npip install x\n```\n# not a heading\n```\n## Usage\nrun it\n";

    #[test]
    fn test_sections_skip_fenced_code() {
        let found = sections(README);
        let headings: Vec<_> = found.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["model card", "installation", "usage"]);
        assert!(found[1].body.contains(&"# not a heading"));
    }

    #[test]
    fn test_section_text() {
        assert_eq!(section_text(README, "usage").as_deref(), Some("run it"));
        assert_eq!(section_text(README, "license"), None);
    }

    #[test]
    fn test_has_code_block() {
        assert!(has_code_block(README));
        assert!(!has_code_block("no code here"));
    }

    #[test]
    fn test_numeric_table() {
        assert!(has_numeric_table("| metric | value |\n|---|---|\n| acc | 91.2% |"));
        assert!(!has_numeric_table("| a | b |\n|---|---|\n| x | y |"));
    }

    #[test]
    fn test_keyword_hits_are_case_insensitive_and_distinct() {
        assert_eq!(keyword_hits("Benchmark results: ACCURACY, accuracy", &["benchmark", "accuracy", "bleu"]), 2);
    }

    #[test]
    fn test_fraction_caps_at_one() {
        assert!((fraction(1, 4) - 0.25).abs() < f64::EPSILON);
        assert!((fraction(9, 4) - 1.0).abs() < f64::EPSILON);
    }
}
