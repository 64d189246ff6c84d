use std::collections::HashSet;

use crate::record::RateRecord;
use crate::summary::CodeSummary;

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Pulls standalone 4-5 digit codes out of free text, first-seen order.
pub fn extract_codes(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split(|c: char| !is_word_char(c))
        .filter(|w| (4..=5).contains(&w.len()) && w.chars().all(|c| c.is_ascii_digit()))
        .filter(|w| seen.insert(*w))
        .map(str::to_string)
        .collect()
}

/// Explicit codes first, then any codes typed into the search box.
pub fn merge_codes<S: AsRef<str>>(explicit: &[S], query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let typed = extract_codes(query);
    let candidates = explicit
        .iter()
        .map(|c| c.as_ref().trim())
        .chain(typed.iter().map(String::as_str));
    for code in candidates {
        if !code.is_empty() && seen.insert(code.to_string()) {
            out.push(code.to_string());
        }
    }
    out
}

#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    pub code_query: Option<String>,
    pub provider_query: Option<String>,
    pub min_rate: Option<f64>,
    pub max_rate: Option<f64>,
}

impl RowFilter {
    pub fn matches(&self, r: &RateRecord) -> bool {
        let code_ok =
            non_blank(self.code_query.as_deref()).is_none_or(|q| contains_ci(&r.code, q));
        let provider_ok = non_blank(self.provider_query.as_deref())
            .is_none_or(|q| contains_ci(&r.provider_name, q));
        let rate = r.negotiated_rate;
        let min_ok = self.min_rate.is_none_or(|m| rate >= m);
        let max_ok = self.max_rate.is_none_or(|m| rate <= m);
        code_ok && provider_ok && min_ok && max_ok
    }

    pub fn apply(&self, rows: &[RateRecord]) -> Vec<RateRecord> {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Keeps summaries whose code or description contains `query`.
pub fn filter_summaries(summaries: &[CodeSummary], query: &str) -> Vec<CodeSummary> {
    let Some(q) = non_blank(Some(query)) else {
        return summaries.to_vec();
    };
    summaries
        .iter()
        .filter(|s| contains_ci(&s.code, q) || contains_ci(&s.description, q))
        .cloned()
        .collect()
}
