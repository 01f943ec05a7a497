// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wildcard queries and timestamp intervals for filtered reads
//!
//! Patterns match the whole message: `*` matches any run of characters,
//! `?` matches exactly one, and `\` makes the next `*`, `?` or `\` literal.

use crate::event::EpochTimeMs;

/// A single normalized wildcard pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardQuery {
    pattern: String,
    case_sensitive: bool,
}

impl WildcardQuery {
    /// Normalize `pattern`: runs of `*` collapse to one, a trailing lone `\`
    /// is dropped, and escapes of ordinary characters are removed.
    pub fn new(pattern: &str, case_sensitive: bool) -> Self {
        let mut clean = String::with_capacity(pattern.len());
        let mut chars = pattern.chars();
        let mut prev_star = false;
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    prev_star = false;
                    match chars.next() {
                        Some(next @ ('*' | '?' | '\\')) => {
                            clean.push('\\');
                            clean.push(next);
                        }
                        Some(next) => clean.push(next),
                        None => {}
                    }
                }
                '*' => {
                    if !prev_star {
                        clean.push('*');
                    }
                    prev_star = true;
                }
                other => {
                    prev_star = false;
                    clean.push(other);
                }
            }
        }
        Self {
            pattern: clean,
            case_sensitive,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn matches(&self, text: &str) -> bool {
        wildcard_match(text, &self.pattern, self.case_sensitive)
    }
}

/// Several queries packed into one buffer, matched in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedWildcardQuery {
    concatenated: String,
    /// Cumulative end of each pattern within `concatenated`
    end_offsets: Vec<usize>,
    case_sensitivity: Vec<bool>,
}

impl MergedWildcardQuery {
    pub fn merge<I>(queries: I) -> Self
    where
        I: IntoIterator<Item = WildcardQuery>,
    {
        let mut merged = Self::default();
        for query in queries {
            merged.concatenated.push_str(&query.pattern);
            merged.end_offsets.push(merged.concatenated.len());
            merged.case_sensitivity.push(query.case_sensitive);
        }
        merged
    }

    pub fn concatenated(&self) -> &str {
        &self.concatenated
    }

    pub fn end_offsets(&self) -> &[usize] {
        &self.end_offsets
    }

    pub fn case_sensitivity(&self) -> &[bool] {
        &self.case_sensitivity
    }

    pub fn len(&self) -> usize {
        self.end_offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.end_offsets.is_empty()
    }

    /// Pattern and case flag of query `index`
    pub fn get(&self, index: usize) -> Option<(&str, bool)> {
        let end = *self.end_offsets.get(index)?;
        let start = match index {
            0 => 0,
            _ => self.end_offsets[index - 1],
        };
        Some((&self.concatenated[start..end], self.case_sensitivity[index]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Index of the first query matching `text`. An empty query set matches
    /// everything at index 0.
    pub fn first_match(&self, text: &str) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }
        self.iter()
            .position(|(pattern, case_sensitive)| wildcard_match(text, pattern, case_sensitive))
    }
}

/// Half-open timestamp range `[lower, upper)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampInterval {
    pub lower: EpochTimeMs,
    pub upper: EpochTimeMs,
}

impl TimestampInterval {
    pub fn new(lower: EpochTimeMs, upper: EpochTimeMs) -> Self {
        Self { lower, upper }
    }

    pub fn unbounded() -> Self {
        Self::new(EpochTimeMs::MIN, EpochTimeMs::MAX)
    }

    pub fn contains(&self, ts: EpochTimeMs) -> bool {
        self.lower <= ts && ts < self.upper
    }

    /// Whether `ts` lies at or beyond the upper bound
    pub fn is_past(&self, ts: EpochTimeMs) -> bool {
        ts >= self.upper
    }
}

impl Default for TimestampInterval {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[derive(Clone, Copy)]
enum Token {
    Any,
    One,
    Lit(char),
}

fn next_token(pattern: &str, pos: usize) -> Option<(Token, usize)> {
    let mut chars = pattern[pos..].chars();
    let c = chars.next()?;
    let token = match c {
        '*' => (Token::Any, 1),
        '?' => (Token::One, 1),
        '\\' => match chars.next() {
            Some(escaped) => (Token::Lit(escaped), 1 + escaped.len_utf8()),
            None => return None,
        },
        other => (Token::Lit(other), other.len_utf8()),
    };
    Some(token)
}

fn chars_eq(a: char, b: char, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.eq_ignore_ascii_case(&b)
    }
}

/// Whether `pattern` matches all of `text`.
///
/// Greedy scan that backtracks to the most recent `*` on mismatch.
pub fn wildcard_match(text: &str, pattern: &str, case_sensitive: bool) -> bool {
    let mut ti = 0;
    let mut pi = 0;
    // (pattern position after the star, text position the star resumes from)
    let mut star: Option<(usize, usize)> = None;

    while ti < text.len() {
        let c = match text[ti..].chars().next() {
            Some(c) => c,
            None => break,
        };
        match next_token(pattern, pi) {
            Some((Token::Any, len)) => {
                pi += len;
                star = Some((pi, ti));
                continue;
            }
            Some((Token::One, len)) => {
                pi += len;
                ti += c.len_utf8();
                continue;
            }
            Some((Token::Lit(p), len)) if chars_eq(p, c, case_sensitive) => {
                pi += len;
                ti += c.len_utf8();
                continue;
            }
            _ => {}
        }
        match star {
            Some((star_pi, star_ti)) => {
                let skipped = text[star_ti..].chars().next().map_or(1, char::len_utf8);
                let resume = star_ti + skipped;
                star = Some((star_pi, resume));
                pi = star_pi;
                ti = resume;
            }
            None => return false,
        }
    }

    while let Some((Token::Any, len)) = next_token(pattern, pi) {
        pi += len;
    }
    pi >= pattern.len()
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
