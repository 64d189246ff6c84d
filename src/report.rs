use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, anyhow};
use costvista::catalog::{COMMON_PROCEDURES, search_catalog};
use costvista::export::{write_rows_csv, write_summary_csv};
use costvista::filter::{RowFilter, filter_summaries, merge_codes};
use costvista::sort::{parse_dir, parse_row_sort, parse_summary_sort, sort_rows, sort_summaries};
use costvista::summary::retain_codes;
use costvista::{CodeSummary, RateRecord, records_from_str, summarize, summarize_codes};
use serde::Serialize;

use crate::cli::{CatalogArgs, OutputFormat, SummarizeArgs, flatten_list};

#[derive(Debug, Serialize)]
struct SummaryResponse {
    count: usize,
    summary: Vec<CodeSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<Vec<RateRecord>>,
}

pub fn run(opts: SummarizeArgs) -> anyhow::Result<()> {
    let text = read_input(&opts.input)?;
    let records = records_from_str(&text).with_context(|| format!("parse {}", opts.input))?;
    tracing::info!("Loaded {} rate records from {}", records.len(), opts.input);

    let codes = merge_codes(&flatten_list(&opts.codes), opts.query.as_deref().unwrap_or(""));
    let (selected, mut summary) = if codes.is_empty() {
        (records.iter().collect::<Vec<_>>(), summarize(&records))
    } else {
        tracing::info!("Restricting to codes: {}", codes.join(","));
        (retain_codes(&records, &codes[..]), summarize_codes(&records, &codes[..]))
    };
    let count = selected.len();

    if let Some(q) = opts.search.as_deref() {
        summary = filter_summaries(&summary, q);
    }
    if opts.sort.is_some() || opts.dir.is_some() {
        let key = parse_summary_sort(opts.sort.as_deref());
        let dir = parse_dir(opts.dir.as_deref());
        sort_summaries(&mut summary, key, dir);
    }

    let row_filter = RowFilter {
        code_query: opts.row_code.clone(),
        provider_query: opts.provider.clone(),
        min_rate: opts.min_rate,
        max_rate: opts.max_rate,
    };
    let mut rows: Vec<RateRecord> = selected
        .into_iter()
        .filter(|r| row_filter.matches(r))
        .cloned()
        .collect();
    if opts.row_sort.is_some() || opts.row_dir.is_some() {
        let key = parse_row_sort(opts.row_sort.as_deref());
        let dir = parse_dir(opts.row_dir.as_deref());
        sort_rows(&mut rows, key, dir);
    }
    tracing::info!(
        "{} rows matched codes, {} after row filters, {} codes summarized",
        count,
        rows.len(),
        summary.len()
    );

    if let Some(p) = opts.rows_output.as_deref() {
        let path = Path::new(p);
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        write_rows_csv(BufWriter::new(file), &rows)
            .with_context(|| format!("write rows CSV {}", path.display()))?;
        tracing::info!("Wrote {} rows to {}", rows.len(), path.display());
    }

    let mut out = open_output(opts.output.as_deref())?;
    match opts.format {
        OutputFormat::Json => {
            let resp = SummaryResponse {
                count,
                summary,
                rows: opts.include_rows.then_some(rows),
            };
            serde_json::to_writer_pretty(&mut out, &resp).context("write JSON")?;
            writeln!(out).context("write JSON")?;
        }
        OutputFormat::Csv => {
            if opts.include_rows {
                tracing::warn!("--include-rows is ignored for CSV output; use --rows-output");
            }
            write_summary_csv(&mut out, &summary).context("write CSV")?;
        }
    }
    out.flush().context("flush output")?;
    Ok(())
}

pub fn run_catalog(opts: CatalogArgs) -> anyhow::Result<()> {
    let hits = search_catalog(COMMON_PROCEDURES, &opts.query, opts.limit);
    if hits.is_empty() {
        return Err(anyhow!("No catalog entries match '{}'", opts.query));
    }
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for e in hits {
        writeln!(out, "{}\t{}", e.code, e.label)?;
    }
    Ok(())
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .context("read stdin")?;
        return Ok(s);
    }
    let path = Path::new(input);
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn open_output(output: Option<&str>) -> anyhow::Result<Box<dyn Write>> {
    match output {
        Some(p) => {
            let path = Path::new(p);
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            tracing::info!("Writing {}", path.display());
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(std::io::stdout()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(input: &str, output: &str) -> SummarizeArgs {
        SummarizeArgs {
            input: input.to_string(),
            codes: vec![],
            query: None,
            search: None,
            sort: None,
            dir: None,
            format: OutputFormat::Json,
            include_rows: false,
            row_code: None,
            provider: None,
            min_rate: None,
            max_rate: None,
            row_sort: None,
            row_dir: None,
            rows_output: None,
            output: Some(output.to_string()),
        }
    }

    #[test]
    fn writes_json_summary_for_requested_codes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rates.json");
        let output = dir.path().join("summary.json");
        std::fs::write(
            &input,
            r#"[
                {"provider_name":"Mercy","code":"70551","description":"MRI brain","negotiated_rate":"900"},
                {"provider_name":"St. Mary","code":70551,"negotiated_rate":1100},
                {"provider_name":"Clinic","code":"99213","negotiated_rate":80}
            ]"#,
        )
        .unwrap();

        let mut opts = args(input.to_str().unwrap(), output.to_str().unwrap());
        opts.query = Some("MRI 70551".into());
        opts.include_rows = true;
        run(opts).unwrap();

        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(v["count"], 2);
        assert_eq!(v["rows"].as_array().unwrap().len(), 2);
        let summary = v["summary"].as_array().unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0]["code"], "70551");
        assert_eq!(summary[0]["median"], 1000.0);
        assert_eq!(summary[0]["top3"][0]["provider_name"], "Mercy");
    }

    #[test]
    fn writes_csv_and_rejects_non_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rates.json");
        let output = dir.path().join("summary.csv");
        std::fs::write(&input, r#"[{"provider_name":"A","code":"36415","negotiated_rate":9}]"#)
            .unwrap();

        let mut opts = args(input.to_str().unwrap(), output.to_str().unwrap());
        opts.format = OutputFormat::Csv;
        run(opts).unwrap();
        let csv = std::fs::read_to_string(&output).unwrap();
        assert_eq!(csv.lines().nth(1), Some("36415,,1,9,9,9,9,9,A ($9.00),,"));

        std::fs::write(&input, r#"{"rows": []}"#).unwrap();
        let err = run(args(input.to_str().unwrap(), output.to_str().unwrap())).unwrap_err();
        assert!(format!("{err:#}").contains("JSON must be an array"));
    }

    #[test]
    fn filters_sorts_and_exports_rows() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rates.json");
        let output = dir.path().join("summary.json");
        let rows_csv = dir.path().join("rows.csv");
        std::fs::write(
            &input,
            r#"[
                {"provider_name":"Mercy West","code":"70551","negotiated_rate":1300},
                {"provider_name":"St. Mary","code":"70551","negotiated_rate":1100},
                {"provider_name":"Mercy General","code":"70551","negotiated_rate":900},
                {"provider_name":"Mercy Clinic","code":"99213","negotiated_rate":80}
            ]"#,
        )
        .unwrap();

        let mut opts = args(input.to_str().unwrap(), output.to_str().unwrap());
        opts.include_rows = true;
        opts.provider = Some("mercy".into());
        opts.min_rate = Some(100.0);
        opts.row_sort = Some("negotiated_rate".into());
        opts.row_dir = Some("desc".into());
        opts.rows_output = Some(rows_csv.to_str().unwrap().to_string());
        run(opts).unwrap();

        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(v["count"], 4);
        assert_eq!(v["summary"].as_array().unwrap().len(), 2);
        let names: Vec<&str> = v["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["provider_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Mercy West", "Mercy General"]);

        let csv = std::fs::read_to_string(&rows_csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Mercy West,,70551,,,1300,,");
    }

    #[test]
    fn query_without_codes_summarizes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("rates.json");
        let output = dir.path().join("summary.json");
        std::fs::write(&input, r#"[{"provider_name":"A","code":"36415","negotiated_rate":9}]"#)
            .unwrap();

        let mut opts = args(input.to_str().unwrap(), output.to_str().unwrap());
        opts.query = Some("no codes here".into());
        run(opts).unwrap();
        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(v["count"], 1);
        assert_eq!(v["summary"].as_array().unwrap().len(), 1);
    }
}
