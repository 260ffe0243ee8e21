use core::fmt::{self, Display};

/// A search pattern that was refused before or during compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexError {
    Empty,
    TooLong { length: usize, max: usize },

    /// A quantified group whose body already repeats, such as `(a+)+`.
    NestedQuantifier { offset: usize },

    /// The compiled program would exceed the configured size limit.
    TooLarge,
    Invalid(String),
}

impl Display for RegexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("search pattern is empty"),
            Self::TooLong { length, max } => write!(f, "search pattern is {length} characters long, the limit is {max}"),
            Self::NestedQuantifier { offset } => write!(f, "search pattern repeats a group that already repeats (at character {offset})"),
            Self::TooLarge => f.write_str("search pattern is too complex"),
            Self::Invalid(reason) => write!(f, "invalid search pattern: {reason}"),
        }
    }
}

impl core::error::Error for RegexError {}

#[derive(Debug, Default)]
struct Group {
    repeats: bool,
}

/// Reject patterns that are empty, too long, or contain nested quantifiers.
///
/// The scan understands escapes, character classes, and `(?...)` group prefixes, so
/// `\(a+\)+` and `[+*]+` are accepted while `(a+)+`, `(a{1,9}){1,9}`, and `((x*)y)*` are not.
pub fn check_pattern(pattern: &str, max_length: usize) -> Result<(), RegexError> {
    if pattern.is_empty() {
        return Err(RegexError::Empty);
    }

    let chars: Vec<char> = pattern.chars().collect();
    if chars.len() > max_length {
        return Err(RegexError::TooLong {
            length: chars.len(),
            max: max_length,
        });
    }

    let mut stack = vec![Group::default()];
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                i = skip_escape(&chars, i);
                i = apply_quantifier(&chars, i, &mut stack, false)?;
            }
            '[' => {
                i = skip_class(&chars, i);
                i = apply_quantifier(&chars, i, &mut stack, false)?;
            }
            '(' => {
                i += 1;
                if chars.get(i) == Some(&'?') {
                    while i < chars.len() && !matches!(chars[i], ':' | '>' | ')') {
                        i += 1;
                    }

                    // a bare flag group such as `(?i)` has no body
                    if chars.get(i) == Some(&')') {
                        i += 1;
                        continue;
                    }
                    i += 1;
                }
                stack.push(Group::default());
            }
            ')' => {
                i += 1;
                if stack.len() > 1 {
                    let inner = stack.pop().unwrap_or_default();
                    if let Some(parent) = stack.last_mut() {
                        parent.repeats |= inner.repeats;
                    }
                    i = apply_quantifier(&chars, i, &mut stack, inner.repeats)?;
                }
            }
            _ => {
                i += 1;
                i = apply_quantifier(&chars, i, &mut stack, false)?;
            }
        }
    }

    Ok(())
}

/// If a quantifier starts at `i`, record it on the innermost group and return the index past it.
fn apply_quantifier(chars: &[char], i: usize, stack: &mut [Group], atom_repeats: bool) -> Result<usize, RegexError> {
    let Some(len) = quantifier_len(chars, i) else {
        return Ok(i);
    };

    if atom_repeats {
        return Err(RegexError::NestedQuantifier { offset: i });
    }

    if let Some(current) = stack.last_mut() {
        current.repeats = true;
    }

    let mut next = i + len;
    if chars.get(next) == Some(&'?') {
        next += 1;
    }
    Ok(next)
}

fn quantifier_len(chars: &[char], i: usize) -> Option<usize> {
    match chars.get(i)? {
        '*' | '+' | '?' => Some(1),
        '{' => {
            let mut j = i + 1;
            let mut digits = 0;
            while let Some(c) = chars.get(j) {
                match c {
                    '0'..='9' => digits += 1,
                    ',' | ' ' => {}
                    '}' if digits > 0 => return Some(j - i + 1),
                    _ => return None,
                }
                j += 1;
            }
            None
        }
        _ => None,
    }
}

fn skip_escape(chars: &[char], i: usize) -> usize {
    let mut j = i + 2;
    let letter = chars.get(i + 1).is_some_and(|c| matches!(c, 'p' | 'P' | 'x' | 'u' | 'U'));
    if letter && chars.get(j) == Some(&'{') {
        while j < chars.len() && chars[j] != '}' {
            j += 1;
        }
        j += 1;
    }
    j.min(chars.len())
}

fn skip_class(chars: &[char], i: usize) -> usize {
    let mut j = i + 1;
    if chars.get(j) == Some(&'^') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }

    let mut depth = 1;
    while j < chars.len() {
        match chars[j] {
            '\\' => j += 1,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return j + 1;
                }
            }
            _ => {}
        }
        j += 1;
    }

    chars.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_patterns() {
        for pattern in [
            ".*bert.*",
            "^gpt-?[0-9]+$",
            r"\(a+\)+",
            "[+*]+",
            "(?i)llama",
            "(?:ab)+",
            "(foo|bar)*",
            r"\p{L}{2,5}",
            "a{3}",
            "x{",
        ] {
            assert_eq!(check_pattern(pattern, 256), Ok(()), "{pattern}");
        }
    }

    #[test]
    fn test_rejects_nested_quantifiers() {
        for pattern in ["(a+)+", "(a*)*", "(.*)*", "(a{1,9}){1,9}", "((x*)y)*", "(?:a+b)+", "(a{1,99999}){1,99999}$", "(a+)+?"] {
            assert!(
                matches!(check_pattern(pattern, 256), Err(RegexError::NestedQuantifier { .. })),
                "{pattern}"
            );
        }
    }

    #[test]
    fn test_rejects_empty_and_long() {
        assert_eq!(check_pattern("", 256), Err(RegexError::Empty));
        assert_eq!(check_pattern("abcd", 3), Err(RegexError::TooLong { length: 4, max: 3 }));
    }
}
