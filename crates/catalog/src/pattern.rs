//! Case-insensitive `LIKE` patterns.
//!
//! `%` matches any run of characters (including none), `_` matches exactly
//! one character, and a backslash makes the next character literal. The
//! pattern must match the whole value.

use regex::{Regex, RegexBuilder};

/// A compiled `ILIKE` pattern.
#[derive(Debug, Clone)]
pub struct IlikePattern {
    regex: Regex,
}

impl IlikePattern {
    /// Compiles `pattern` as written.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&to_regex(pattern))
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()?;
        Ok(Self { regex })
    }

    /// Matches values starting with `pattern`.
    pub fn prefix(pattern: &str) -> Result<Self, regex::Error> {
        Self::new(&format!("{}%", pattern))
    }

    /// Matches values containing `pattern`.
    pub fn substring(pattern: &str) -> Result<Self, regex::Error> {
        Self::new(&format!("%{}%", pattern))
    }

    /// Returns true if the whole of `value` matches.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

fn to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 2);
    regex.push('^');

    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => regex.push_str(".*"),
            '_' => regex.push('.'),
            // A trailing backslash stands for itself
            '\\' => {
                let literal = chars.next().unwrap_or('\\');
                regex.push_str(&regex::escape(literal.encode_utf8(&mut [0; 4])));
            }
            other => regex.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }

    regex.push('$');
    regex
}
