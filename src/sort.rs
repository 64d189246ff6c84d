use std::cmp::Ordering;

use crate::collate::natural_cmp;
use crate::record::RateRecord;
use crate::summary::CodeSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySortKey {
    Code,
    Description,
    Count,
    Min,
    Median,
    P25,
    P75,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSortKey {
    ProviderName,
    CodeType,
    Code,
    Description,
    RateType,
    NegotiatedRate,
    Geo,
    LastUpdated,
}

pub fn parse_dir(s: Option<&str>) -> SortDir {
    match s.unwrap_or("asc").trim().to_ascii_lowercase().as_str() {
        "desc" => SortDir::Desc,
        _ => SortDir::Asc,
    }
}

pub fn parse_summary_sort(s: Option<&str>) -> SummarySortKey {
    match s.unwrap_or("median").trim().to_ascii_lowercase().as_str() {
        "code" => SummarySortKey::Code,
        "description" => SummarySortKey::Description,
        "count" => SummarySortKey::Count,
        "min" => SummarySortKey::Min,
        "p25" => SummarySortKey::P25,
        "p75" => SummarySortKey::P75,
        "max" => SummarySortKey::Max,
        _ => SummarySortKey::Median,
    }
}

pub fn parse_row_sort(s: Option<&str>) -> RowSortKey {
    match s.unwrap_or("negotiated_rate").trim().to_ascii_lowercase().as_str() {
        "provider_name" => RowSortKey::ProviderName,
        "code_type" => RowSortKey::CodeType,
        "code" => RowSortKey::Code,
        "description" => RowSortKey::Description,
        "rate_type" => RowSortKey::RateType,
        "geo" => RowSortKey::Geo,
        "last_updated" => RowSortKey::LastUpdated,
        _ => RowSortKey::NegotiatedRate,
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn directed(ord: Ordering, dir: SortDir) -> Ordering {
    match dir {
        SortDir::Asc => ord,
        SortDir::Desc => ord.reverse(),
    }
}

pub fn sort_summaries(summaries: &mut [CodeSummary], key: SummarySortKey, dir: SortDir) {
    summaries.sort_by(|a, b| {
        let ord = match key {
            SummarySortKey::Code => natural_cmp(&a.code, &b.code),
            SummarySortKey::Description => natural_cmp(&a.description, &b.description),
            SummarySortKey::Count => a.count.cmp(&b.count),
            SummarySortKey::Min => cmp_f64(a.min, b.min),
            SummarySortKey::Median => cmp_f64(a.median, b.median),
            SummarySortKey::P25 => cmp_f64(a.p25, b.p25),
            SummarySortKey::P75 => cmp_f64(a.p75, b.p75),
            SummarySortKey::Max => cmp_f64(a.max, b.max),
        };
        directed(ord, dir)
    });
}

pub fn sort_rows(rows: &mut [RateRecord], key: RowSortKey, dir: SortDir) {
    fn text(v: &Option<String>) -> &str {
        v.as_deref().unwrap_or("")
    }
    rows.sort_by(|a, b| {
        let ord = match key {
            RowSortKey::NegotiatedRate => cmp_f64(a.negotiated_rate, b.negotiated_rate),
            RowSortKey::ProviderName => natural_cmp(&a.provider_name, &b.provider_name),
            RowSortKey::Code => natural_cmp(&a.code, &b.code),
            RowSortKey::CodeType => natural_cmp(text(&a.code_type), text(&b.code_type)),
            RowSortKey::Description => natural_cmp(text(&a.description), text(&b.description)),
            RowSortKey::RateType => natural_cmp(text(&a.rate_type), text(&b.rate_type)),
            RowSortKey::Geo => natural_cmp(text(&a.geo), text(&b.geo)),
            RowSortKey::LastUpdated => natural_cmp(text(&a.last_updated), text(&b.last_updated)),
        };
        directed(ord, dir)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::summarize;

    #[test]
    fn parsing_is_lenient() {
        assert_eq!(parse_summary_sort(Some("P75")), SummarySortKey::P75);
        assert_eq!(parse_summary_sort(Some("bogus")), SummarySortKey::Median);
        assert_eq!(parse_summary_sort(None), SummarySortKey::Median);
        assert_eq!(parse_row_sort(Some("geo")), RowSortKey::Geo);
        assert_eq!(parse_row_sort(None), RowSortKey::NegotiatedRate);
        assert_eq!(parse_dir(Some("DESC")), SortDir::Desc);
        assert_eq!(parse_dir(Some("sideways")), SortDir::Asc);
    }

    #[test]
    fn sorts_summaries_by_numeric_column() {
        let rows = vec![
            RateRecord::new("a", "70551", 900.0),
            RateRecord::new("b", "99213", 80.0),
            RateRecord::new("c", "45378", 1500.0),
        ];
        let mut s = summarize(&rows);
        sort_summaries(&mut s, SummarySortKey::Median, SortDir::Desc);
        let codes: Vec<&str> = s.iter().map(|x| x.code.as_str()).collect();
        assert_eq!(codes, vec!["45378", "70551", "99213"]);

        sort_summaries(&mut s, SummarySortKey::Code, SortDir::Asc);
        let codes: Vec<&str> = s.iter().map(|x| x.code.as_str()).collect();
        assert_eq!(codes, vec!["45378", "70551", "99213"]);
    }

    #[test]
    fn sorts_rows_stably() {
        let mut rows = vec![
            RateRecord::new("Z", "10", 5.0),
            RateRecord::new("Y", "9", 5.0),
            RateRecord::new("X", "11", 1.0),
        ];
        sort_rows(&mut rows, RowSortKey::NegotiatedRate, SortDir::Asc);
        let names: Vec<&str> = rows.iter().map(|r| r.provider_name.as_str()).collect();
        assert_eq!(names, vec!["X", "Z", "Y"]);

        sort_rows(&mut rows, RowSortKey::Code, SortDir::Asc);
        let codes: Vec<&str> = rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["9", "10", "11"]);
    }
}
