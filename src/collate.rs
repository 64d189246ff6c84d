//! Numeric-aware string ordering for billing codes.
//!
//! Digit runs compare by value, so `"9" < "10"` and `"970" < "45378"`.
//! Everything else compares case-insensitively, with punctuation before
//! digits before letters.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
enum Chunk<'a> {
    Digits(&'a str),
    Char(char),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        if first.is_ascii_digit() {
            let end = self
                .rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(self.rest.len());
            let (digits, rest) = self.rest.split_at(end);
            self.rest = rest;
            Some(Chunk::Digits(digits))
        } else {
            self.rest = &self.rest[first.len_utf8()..];
            Some(Chunk::Char(first))
        }
    }
}

fn chunks(s: &str) -> Chunks<'_> {
    Chunks { rest: s }
}

fn class_rank(c: char) -> u8 {
    if c.is_alphabetic() { 2 } else { 0 }
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_chunk(a: Chunk<'_>, b: Chunk<'_>) -> Ordering {
    match (a, b) {
        (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digits(x, y),
        (Chunk::Digits(_), Chunk::Char(c)) => 1u8.cmp(&class_rank(c)),
        (Chunk::Char(c), Chunk::Digits(_)) => class_rank(c).cmp(&1),
        (Chunk::Char(x), Chunk::Char(y)) => class_rank(x)
            .cmp(&class_rank(y))
            .then_with(|| x.to_lowercase().cmp(y.to_lowercase())),
    }
}

fn primary_cmp(a: &str, b: &str) -> Ordering {
    let mut left = chunks(a);
    let mut right = chunks(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = cmp_chunk(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn flip_case(c: char) -> char {
    if c.is_ascii_lowercase() {
        c.to_ascii_uppercase()
    } else {
        c.to_ascii_lowercase()
    }
}

/// Lowercase before uppercase for strings equal up to case.
fn case_cmp(a: &str, b: &str) -> Ordering {
    a.chars().map(flip_case).cmp(b.chars().map(flip_case))
}

/// Total order over strings treating embedded digit runs as numbers.
///
/// Strings equal up to case order lowercase first (`"a" < "A"`). Strings
/// equal up to leading zeros (`"007"` and `"7"`) fall back to byte order
/// so the result is deterministic.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    primary_cmp(a, b)
        .then_with(|| case_cmp(a, b))
        .then_with(|| a.cmp(b))
}
