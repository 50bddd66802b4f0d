//! Regular expressions for match and substitute filters.
//!
//! Patterns arrive with slash-delimited flags (`ig`, `m`, ...). `g` is not a
//! regex option but a request to act on every occurrence, so it is carried
//! alongside the compiled [`Regex`].

use regex::{Regex, RegexBuilder};

use crate::error::FilterError;

#[derive(Debug, Clone)]
pub struct Pattern {
    pub regex: Regex,
    pub global: bool,
}

impl Pattern {
    pub fn compile(pattern: &str, flags: &str) -> Result<Self, FilterError> {
        let mut builder = RegexBuilder::new(pattern);
        let mut global = false;

        for flag in flags.chars() {
            match flag {
                'g' => global = true,
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'u' => {}
                other => {
                    return Err(FilterError::node(format!(
                        "Unsupported regular expression flag '{}'.",
                        other
                    )));
                }
            }
        }

        let regex = builder.build().map_err(|e| {
            FilterError::node(format!("Invalid regular expression '{}': {}", pattern, e))
        })?;

        Ok(Pattern { regex, global })
    }

    /// Replace the first occurrence, or all of them under `g`.
    pub fn replace(&self, haystack: &str, replacement: &str) -> String {
        let expanded = translate_replacement(replacement, self.regex.captures_len() - 1);
        if self.global {
            self.regex.replace_all(haystack, expanded.as_str()).into_owned()
        } else {
            self.regex.replace(haystack, expanded.as_str()).into_owned()
        }
    }
}

/// Rewrite `$1`, `$12`, `$&` and `$$` into the regex crate's `${n}` syntax.
///
/// A reference to a group that does not exist stays literal text. Two-digit
/// references fall back to one digit when only the shorter group exists.
pub fn translate_replacement(replacement: &str, groups: usize) -> String {
    let chars: Vec<char> = replacement.chars().collect();
    let mut out = String::with_capacity(replacement.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch != '$' {
            out.push(ch);
            i += 1;
            continue;
        }

        match chars.get(i + 1) {
            Some('$') => {
                out.push_str("$$");
                i += 2;
            }
            Some('&') => {
                out.push_str("${0}");
                i += 2;
            }
            Some(d) if d.is_ascii_digit() => {
                let one = d.to_digit(10).unwrap_or(0) as usize;
                let two = chars
                    .get(i + 2)
                    .and_then(|c| c.to_digit(10))
                    .map(|d2| one * 10 + d2 as usize);

                match two {
                    Some(n) if n >= 1 && n <= groups => {
                        out.push_str(&format!("${{{}}}", n));
                        i += 3;
                    }
                    _ if one >= 1 && one <= groups => {
                        out.push_str(&format!("${{{}}}", one));
                        i += 2;
                    }
                    _ => {
                        out.push_str("$$");
                        i += 1;
                    }
                }
            }
            _ => {
                out.push_str("$$");
                i += 1;
            }
        }
    }

    out
}
