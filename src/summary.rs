use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::collate::natural_cmp;
use crate::record::RateRecord;

pub const TOP_PROVIDERS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProvider {
    pub provider_name: String,
    pub negotiated_rate: f64,
}

/// Aggregated price statistics for one billing code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSummary {
    pub code: String,
    pub description: String,
    pub count: usize,
    pub min: f64,
    pub median: f64,
    pub p25: f64,
    pub p75: f64,
    pub max: f64,
    pub top3: Vec<TopProvider>,
}

/// Groups records by trimmed code and computes per-code statistics.
///
/// Records with a blank code are skipped. The result is ordered by code
/// using [`natural_cmp`].
pub fn summarize(records: &[RateRecord]) -> Vec<CodeSummary> {
    summarize_iter(records.iter())
}

/// Same as [`summarize`] restricted to an explicit set of codes.
///
/// Codes are compared after trimming, so the result always equals
/// `summarize(records)` with the other codes removed. An empty set keeps
/// nothing; callers without a code list should call [`summarize`].
pub fn summarize_codes<S: AsRef<str>>(records: &[RateRecord], codes: &[S]) -> Vec<CodeSummary> {
    summarize_iter(retain_codes(records, codes).into_iter())
}

/// Records whose trimmed code is one of `codes` (also trimmed), in input order.
pub fn retain_codes<'a, S: AsRef<str>>(
    records: &'a [RateRecord],
    codes: &[S],
) -> Vec<&'a RateRecord> {
    let wanted: HashSet<&str> = codes.iter().map(|c| c.as_ref().trim()).collect();
    records
        .iter()
        .filter(|r| wanted.contains(r.trimmed_code()))
        .collect()
}

fn summarize_iter<'a>(records: impl Iterator<Item = &'a RateRecord>) -> Vec<CodeSummary> {
    let mut groups: HashMap<&'a str, Vec<&'a RateRecord>> = HashMap::new();
    let mut seen = 0usize;
    let mut dropped = 0usize;
    for r in records {
        seen += 1;
        let code = r.trimmed_code();
        if code.is_empty() {
            dropped += 1;
            continue;
        }
        groups.entry(code).or_default().push(r);
    }

    let mut out: Vec<CodeSummary> = groups
        .into_iter()
        .map(|(code, items)| summarize_group(code, &items))
        .collect();
    out.sort_by(|a, b| natural_cmp(&a.code, &b.code));

    tracing::debug!(
        records = seen,
        dropped_blank_code = dropped,
        codes = out.len(),
        "summarized rate records"
    );
    out
}

fn summarize_group(code: &str, items: &[&RateRecord]) -> CodeSummary {
    let mut values: Vec<f64> = items.iter().map(|r| r.negotiated_rate).collect();
    values.sort_by(f64::total_cmp);

    let description = items
        .iter()
        .filter_map(|r| r.description.as_deref())
        .find(|d| !d.trim().is_empty())
        .unwrap_or_default()
        .to_string();

    let mut top: Vec<TopProvider> = items
        .iter()
        .map(|r| TopProvider {
            provider_name: r.provider_name.clone(),
            negotiated_rate: r.negotiated_rate,
        })
        .collect();
    // Stable: equal rates keep input order.
    top.sort_by(|a, b| {
        a.negotiated_rate
            .partial_cmp(&b.negotiated_rate)
            .unwrap_or(Ordering::Equal)
    });
    top.truncate(TOP_PROVIDERS);

    CodeSummary {
        code: code.to_string(),
        description,
        count: items.len(),
        min: values.first().copied().unwrap_or(0.0),
        median: median_sorted(&values),
        p25: percentile_sorted(&values, 25.0),
        p75: percentile_sorted(&values, 75.0),
        max: values.last().copied().unwrap_or(0.0),
        top3: top,
    }
}

/// Median of unsorted values; 0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    median_sorted(&sorted_copy(values))
}

/// Linear-interpolation percentile (`p` in 0..=100) of unsorted values.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    percentile_sorted(&sorted_copy(values), p)
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

fn median_sorted(s: &[f64]) -> f64 {
    let n = s.len();
    if n == 0 {
        return 0.0;
    }
    let m = n / 2;
    if n % 2 == 1 {
        s[m]
    } else {
        // Halve first: the sum of two large rates can overflow.
        s[m - 1] / 2.0 + s[m] / 2.0
    }
}

fn percentile_sorted(s: &[f64], p: f64) -> f64 {
    let n = s.len();
    match n {
        0 => 0.0,
        1 => s[0],
        _ => {
            let k = (n - 1) as f64 * (p.clamp(0.0, 100.0) / 100.0);
            let f = k.floor() as usize;
            let c = (f + 1).min(n - 1);
            if f == c {
                return s[f];
            }
            let t = k - f as f64;
            let span = s[c] - s[f];
            if span.is_finite() {
                s[f] + span * t
            } else {
                (s[f] * (1.0 - t) + s[c] * t).clamp(s[f], s[c])
            }
        }
    }
}
