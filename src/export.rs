use std::io::Write;

use csv::Writer;

use crate::error::SummaryError;
use crate::record::RateRecord;
use crate::summary::{CodeSummary, TOP_PROVIDERS};

pub const SUMMARY_HEADER: [&str; 11] = [
    "code",
    "description",
    "count",
    "min",
    "median",
    "p25",
    "p75",
    "max",
    "top1",
    "top2",
    "top3",
];

pub const ROW_HEADER: [&str; 8] = [
    "provider_name",
    "code_type",
    "code",
    "description",
    "rate_type",
    "negotiated_rate",
    "geo",
    "last_updated",
];

pub fn format_currency(v: f64) -> String {
    format!("${v:.2}")
}

pub fn write_summary_csv<W: Write>(out: W, summaries: &[CodeSummary]) -> Result<(), SummaryError> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(SUMMARY_HEADER)?;
    for s in summaries {
        let mut record = vec![
            s.code.clone(),
            s.description.clone(),
            s.count.to_string(),
            s.min.to_string(),
            s.median.to_string(),
            s.p25.to_string(),
            s.p75.to_string(),
            s.max.to_string(),
        ];
        for i in 0..TOP_PROVIDERS {
            record.push(
                s.top3
                    .get(i)
                    .map(|t| format!("{} ({})", t.provider_name, format_currency(t.negotiated_rate)))
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_rows_csv<W: Write>(out: W, rows: &[RateRecord]) -> Result<(), SummaryError> {
    fn text(v: &Option<String>) -> &str {
        v.as_deref().unwrap_or("")
    }
    let mut writer = Writer::from_writer(out);
    writer.write_record(ROW_HEADER)?;
    for r in rows {
        let rate = r.negotiated_rate.to_string();
        writer.write_record([
            r.provider_name.as_str(),
            text(&r.code_type),
            r.code.as_str(),
            text(&r.description),
            text(&r.rate_type),
            rate.as_str(),
            text(&r.geo),
            text(&r.last_updated),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
